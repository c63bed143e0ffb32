pub mod amount;
pub mod cart;
pub mod order;
pub mod outcome;
pub mod ports;
pub mod record;
pub mod view;
