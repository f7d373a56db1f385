// fixflow-core: order intake core.
// decodes tag=value messages, gates orders through position and size limits,
// and drives each order through a bounded lifecycle with an event per outcome.
// all computation is deterministic with no I/O outside the journal export.
//
// file map (search X.0 for structs, X.1+ for logic):
//   1.x  types.rs: primitives: Side, Quantity, OrderState, wire tags
//   2.x  decoder.rs: tag=value decoding, required-tag check
//   3.x  order.rs: order + lifecycle state machine
//   6.x  risk.rs: size/position limits, position book, shared handle
//   7.x  config.rs: delimiter, risk limits, journal settings, presets
//   8.x  engine/: pipeline: decode, check, transition, emit
//   11.x events.rs: events, sink trait, in-memory journal

pub mod config;
pub mod decoder;
pub mod engine;
pub mod events;
pub mod order;
pub mod risk;
pub mod types;

// re exports for convenience
pub use config::*;
pub use decoder::*;
pub use engine::*;
pub use events::*;
pub use order::*;
pub use risk::*;
pub use types::*;
