//! Order type and lifecycle state machine.
//!
//! An order starts in `New` and moves only through `Order::transition`. A target
//! outside the allowed set is not an error: the state stays put and the caller
//! gets `TransitionOutcome::Ignored` to log or assert on.

use crate::decoder::FieldMap;
use crate::types::{tags, OrderState, Quantity, Side};
use serde::{Deserialize, Serialize};

impl OrderState {
    /// States reachable in one step from `self`.
    pub fn allowed_targets(&self) -> &'static [OrderState] {
        match self {
            OrderState::New => &[OrderState::Acked, OrderState::Rejected],
            OrderState::Acked => &[OrderState::Filled, OrderState::Canceled],
            OrderState::Filled | OrderState::Canceled | OrderState::Rejected => &[],
        }
    }

    pub fn can_transition_to(&self, target: OrderState) -> bool {
        self.allowed_targets().contains(&target)
    }

    /// Filled, Canceled and Rejected have no outgoing transitions.
    pub fn is_terminal(&self) -> bool {
        self.allowed_targets().is_empty()
    }
}

/// Result of a transition attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionOutcome {
    /// State changed to the target.
    Applied,
    /// Target not allowed from the current state. Nothing changed.
    Ignored,
}

impl TransitionOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, TransitionOutcome::Applied)
    }
}

/// Why a decoded message could not become an order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrderError {
    #[error("Invalid order quantity {raw:?}: must be a positive integer")]
    InvalidQuantity { raw: String },

    #[error("Unknown side code {raw:?}")]
    UnknownSide { raw: String },

    #[error("Missing field {tag}")]
    MissingField { tag: &'static str },
}

/// A single order moving through the lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub symbol: String,
    pub quantity: Quantity,
    pub side: Side,
    state: OrderState,
}

impl Order {
    pub fn new(symbol: impl Into<String>, quantity: Quantity, side: Side) -> Self {
        Self {
            symbol: symbol.into(),
            quantity,
            side,
            state: OrderState::New,
        }
    }

    /// Build an order from a decoded message.
    pub fn from_fields(fields: &FieldMap) -> Result<Self, OrderError> {
        let field = |tag: &'static str| fields.get(tag).ok_or(OrderError::MissingField { tag });

        let symbol = field(tags::SYMBOL)?;
        let raw_side = field(tags::SIDE)?;
        let raw_qty = field(tags::ORDER_QTY)?;

        let side = Side::from_code(raw_side).ok_or_else(|| OrderError::UnknownSide {
            raw: raw_side.to_string(),
        })?;
        let quantity = raw_qty
            .parse::<u64>()
            .ok()
            .and_then(Quantity::new)
            .ok_or_else(|| OrderError::InvalidQuantity {
                raw: raw_qty.to_string(),
            })?;

        Ok(Self::new(symbol, quantity, side))
    }

    pub fn state(&self) -> OrderState {
        self.state
    }

    /// Quantity signed by side, the amount this order moves the net position.
    pub fn signed_qty(&self) -> i64 {
        self.quantity.signed(self.side)
    }

    pub fn transition(&mut self, target: OrderState) -> TransitionOutcome {
        let from = self.state;
        if !from.can_transition_to(target) {
            tracing::warn!(symbol = %self.symbol, %from, to = %target, "transition not allowed");
            return TransitionOutcome::Ignored;
        }

        self.state = target;
        tracing::debug!(symbol = %self.symbol, %from, to = %target, "order transitioned");
        TransitionOutcome::Applied
    }
}
