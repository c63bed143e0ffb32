//! Infrastructure adapters: the PayPal gateway and the transaction log
//! backends implementing the domain ports.

pub mod csv_log;
pub mod in_memory;
pub mod paypal;
