//! Intake pipeline: discovery, per-archive state machine, promotion.
//!
//! Drives each discovered archive through
//! `Discovered -> Extracted -> TypeValidated -> MetadataParsed ->
//! SchemaValidated -> Promoted`, with `Failed` reachable from any
//! non-terminal state. Archives are processed strictly one at a time;
//! per-archive failures are logged and never abort the overall run.

mod error;
mod intake;
mod scan;
mod types;

pub use error::IntakeError;
pub use intake::IntakePipeline;
pub use types::{PromotedRecord, RunReport, Stage};
