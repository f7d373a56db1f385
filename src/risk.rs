//! Pre-trade risk checks and net position tracking.
//!
//! The engine gates every order against two absolute limits: the size of a
//! single order and the resulting net position for its symbol. `check` only
//! reads the book. `update_position` is the single writer and must only be
//! called once the order has been accepted for a fill.

use crate::config::ConfigError;
use crate::order::Order;
use parking_lot::{Mutex, MutexGuard};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// Limits applied by the risk engine. Fixed for the engine's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskLimits {
    /// Largest quantity a single order may carry.
    pub max_order_size: u64,
    /// Largest absolute net position allowed per symbol.
    pub max_position: u64,
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_order_size: 1000,
            max_position: 2000,
        }
    }
}

impl RiskLimits {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_order_size == 0 {
            return Err(ConfigError::InvalidRisk {
                reason: "max_order_size must be positive".to_string(),
            });
        }
        if self.max_position == 0 {
            return Err(ConfigError::InvalidRisk {
                reason: "max_position must be positive".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RiskError {
    #[error("Order size {size} exceeds max {limit}")]
    SizeExceeded { size: u64, limit: u64 },

    #[error("Position {value} exceeds limit {limit}")]
    PositionExceeded { value: i64, limit: u64 },
}

/// Signed net quantity per symbol. Buy positive, Sell negative.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PositionBook(HashMap<String, i64>);

impl PositionBook {
    /// Net position, `None` if the symbol never filled.
    pub fn get(&self, symbol: &str) -> Option<i64> {
        self.0.get(symbol).copied()
    }

    pub fn net(&self, symbol: &str) -> i64 {
        self.get(symbol).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    fn apply(&mut self, symbol: &str, delta: i64) -> i64 {
        let entry = self.0.entry(symbol.to_string()).or_insert(0);
        *entry = entry.saturating_add(delta);
        *entry
    }
}

#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    limits: RiskLimits,
    positions: PositionBook,
}

impl RiskEngine {
    pub fn new(limits: RiskLimits) -> Result<Self, ConfigError> {
        limits.validate()?;
        Ok(Self {
            limits,
            positions: PositionBook::default(),
        })
    }

    pub fn limits(&self) -> RiskLimits {
        self.limits
    }

    pub fn positions(&self) -> &PositionBook {
        &self.positions
    }

    pub fn position(&self, symbol: &str) -> i64 {
        self.positions.net(symbol)
    }

    /// Validate an order against size then position limits. Never mutates.
    pub fn check(&self, order: &Order) -> Result<(), RiskError> {
        let size = order.quantity.value();
        if size > self.limits.max_order_size {
            return Err(RiskError::SizeExceeded {
                size,
                limit: self.limits.max_order_size,
            });
        }

        let candidate = self
            .positions
            .net(&order.symbol)
            .saturating_add(order.signed_qty());
        if candidate.unsigned_abs() > self.limits.max_position {
            return Err(RiskError::PositionExceeded {
                value: candidate,
                limit: self.limits.max_position,
            });
        }

        Ok(())
    }

    /// Apply a confirmed fill. Does not re-check limits; callers run `check` first.
    pub fn update_position(&mut self, order: &Order) {
        let net = self.positions.apply(&order.symbol, order.signed_qty());
        tracing::debug!(symbol = %order.symbol, delta = order.signed_qty(), net, "position updated");
    }
}

/// Risk engine handle shared between threads.
///
/// All access goes through one mutex, so a check and the update that follows it
/// form a single critical section when done under the same guard.
#[derive(Debug, Clone, Default)]
pub struct SharedRiskEngine {
    inner: Arc<Mutex<RiskEngine>>,
}

impl SharedRiskEngine {
    pub fn new(engine: RiskEngine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    pub fn lock(&self) -> MutexGuard<'_, RiskEngine> {
        self.inner.lock()
    }

    /// Check and, if allowed, apply the order without releasing the lock in between.
    pub fn check_and_update(&self, order: &Order) -> Result<(), RiskError> {
        let mut engine = self.inner.lock();
        engine.check(order)?;
        engine.update_position(order);
        Ok(())
    }

    pub fn position(&self, symbol: &str) -> i64 {
        self.inner.lock().position(symbol)
    }

    /// Copy of the current book.
    pub fn snapshot(&self) -> PositionBook {
        self.inner.lock().positions().clone()
    }
}
