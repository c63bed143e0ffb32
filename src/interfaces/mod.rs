//! Inbound interfaces. Currently just the HTTP JSON API.

pub mod http;
