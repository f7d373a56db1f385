// 8.0.2: result types and errors for pipeline operations.

use crate::decoder::DecodeError;
use crate::order::{Order, OrderError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Filled,
    Rejected { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderResult {
    pub order: Order,
    pub outcome: Outcome,
}

impl OrderResult {
    pub fn is_filled(&self) -> bool {
        self.outcome == Outcome::Filled
    }

    pub fn rejection_reason(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Rejected { reason } => Some(reason),
            Outcome::Filled => None,
        }
    }
}

// Failures that stop a message before an order exists. risk rejections are
// outcomes, not errors, and never show up here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PipelineError {
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("Order error: {0}")]
    Order(#[from] OrderError),
}
