//! Application layer orchestrating the checkout flow.
//!
//! This module defines the `CheckoutService` which acts as the primary
//! entry point: it validates carts, drives the provider order lifecycle
//! through the gateway port and records every capture attempt through the
//! recorder port.

pub mod service;
