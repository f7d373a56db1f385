// 1.0: all the primitives live here. side, quantity, order state, wire tags.
// each is a small type so the compiler catches mixups between raw strings and domain values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Wire tags the core understands. Values are the numeric tag strings.
pub mod tags {
    pub const BEGIN_STRING: &str = "8";
    pub const MSG_TYPE: &str = "35";
    pub const SYMBOL: &str = "55";
    pub const SIDE: &str = "54";
    pub const ORDER_QTY: &str = "38";
    pub const ORD_TYPE: &str = "40";
    pub const CHECKSUM: &str = "10";

    /// Tags every message must carry, in reporting order.
    pub const REQUIRED: [&str; 4] = [MSG_TYPE, SYMBOL, SIDE, ORDER_QTY];
}

// Buy adds to the net position, Sell takes from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub const BUY_CODE: &'static str = "1";
    pub const SELL_CODE: &'static str = "2";

    pub fn sign(&self) -> i64 {
        match self {
            Side::Buy => 1,
            Side::Sell => -1,
        }
    }

    /// Map a wire side code. Anything other than the two known codes is `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            Self::BUY_CODE => Some(Side::Buy),
            Self::SELL_CODE => Some(Side::Sell),
            _ => None,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Side::Buy => Self::BUY_CODE,
            Side::Sell => Self::SELL_CODE,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

// 1.1: order quantity. strictly positive and small enough to carry a sign as i64.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quantity(u64);

impl Quantity {
    pub fn new(value: u64) -> Option<Self> {
        if value == 0 || value > i64::MAX as u64 {
            return None;
        }
        Some(Self(value))
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Quantity with the side's sign applied. Buy is positive, Sell negative.
    pub fn signed(&self, side: Side) -> i64 {
        // new() caps the value at i64::MAX
        self.0 as i64 * side.sign()
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle states of an order. New is the only initial state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderState {
    New,
    Acked,
    Filled,
    Canceled,
    Rejected,
}

impl fmt::Display for OrderState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderState::New => "NEW",
            OrderState::Acked => "ACKED",
            OrderState::Filled => "FILLED",
            OrderState::Canceled => "CANCELED",
            OrderState::Rejected => "REJECTED",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_codes() {
        assert_eq!(Side::from_code("1"), Some(Side::Buy));
        assert_eq!(Side::from_code("2"), Some(Side::Sell));
        assert_eq!(Side::from_code("3"), None);
        assert_eq!(Side::from_code(""), None);
        assert_eq!(Side::Sell.code(), "2");
    }

    #[test]
    fn quantity_rejects_zero() {
        assert!(Quantity::new(0).is_none());
        assert!(Quantity::new(u64::MAX).is_none());
        assert_eq!(Quantity::new(5).map(|q| q.value()), Some(5));
    }

    #[test]
    fn signed_quantity_follows_side() {
        let q = Quantity::new(100).unwrap();
        assert_eq!(q.signed(Side::Buy), 100);
        assert_eq!(q.signed(Side::Sell), -100);
    }

    #[test]
    fn state_display_is_upper_case() {
        assert_eq!(OrderState::Acked.to_string(), "ACKED");
        assert_eq!(OrderState::Canceled.to_string(), "CANCELED");
    }
}
