// 8.0 engine/core.rs: pipeline struct. holds the decoder and a handle to the risk engine.

use crate::config::{ConfigError, PipelineConfig};
use crate::decoder::Decoder;
use crate::risk::{PositionBook, RiskEngine, SharedRiskEngine};

/** 8.1: clones share one risk engine, so positions accumulate across all of them */
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub(super) decoder: Decoder,
    pub(super) risk: SharedRiskEngine,
}

impl Default for Pipeline {
    fn default() -> Self {
        Self {
            decoder: Decoder::default(),
            risk: SharedRiskEngine::default(),
        }
    }
}

impl Pipeline {
    pub fn new(config: &PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let engine = RiskEngine::new(config.risk)?;
        Ok(Self::with_risk(config.delimiter, SharedRiskEngine::new(engine)))
    }

    /// Build on an existing risk engine handle, e.g. one shared with another pipeline.
    pub fn with_risk(delimiter: char, risk: SharedRiskEngine) -> Self {
        Self {
            decoder: Decoder::new(delimiter),
            risk,
        }
    }

    pub fn risk(&self) -> &SharedRiskEngine {
        &self.risk
    }

    pub fn position(&self, symbol: &str) -> i64 {
        self.risk.position(symbol)
    }

    pub fn positions(&self) -> PositionBook {
        self.risk.snapshot()
    }
}
