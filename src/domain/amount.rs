use crate::domain::cart::Cart;
use crate::domain::order::Order;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A charge amount normalized to exactly two fraction digits.
///
/// Always displayed (and serialized) as a decimal string such as `"44.99"`
/// or `"0.00"`, never as a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount(Decimal);

impl Amount {
    pub const ZERO: Amount = Amount(Decimal::ZERO);

    /// Normalizes to two fraction digits, rounding midpoints away from
    /// zero (`10.005` becomes `10.01`).
    pub fn new(value: Decimal) -> Self {
        Amount(value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
    }

    /// Resolves the amount to report for a capture attempt.
    ///
    /// Preference order: the captured amount, then the order-level amount,
    /// then the subtotal of the submitted cart. `"0.00"` only when all
    /// three are unavailable.
    pub fn extract(order: &Order, cart: Option<&Cart>) -> Self {
        if let Some(money) = order.capture_amount() {
            return Amount::new(money.value);
        }
        if let Some(money) = order.order_amount() {
            return Amount::new(money.value);
        }
        if let Some(cart) = cart {
            if !cart.items.is_empty() {
                return Amount::new(cart.subtotal());
            }
        }
        Amount::ZERO
    }

    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s).map(Amount::new)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(D::Error::custom)
    }
}
