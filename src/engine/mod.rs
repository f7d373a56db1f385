// 8.0: message pipeline. decodes a raw message, builds the order, gates it
// through the risk engine and drives the lifecycle, reporting each step to an
// event sink supplied by the caller. synchronous, no I/O.

mod core;
mod orders;
mod results;

pub use core::Pipeline;
pub use results::{OrderResult, Outcome, PipelineError};
