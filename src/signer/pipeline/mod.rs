//! Build-and-sign pipeline.
//!
//! - [`run`] - source directory checks and artifact path derivation
//! - [`state`] - [`PipelineState`] machine
//! - [`report`] - [`PipelineReport`] and artifact checksum
//! - [`orchestrator`] - the [`Pipeline`] itself

mod orchestrator;
mod report;
pub mod run;
mod state;

pub use orchestrator::Pipeline;
pub use report::{PipelineReport, checksum_file};
pub use run::{PipelineRun, SIGNED_SUFFIX, UNSIGNED_SUFFIX};
pub use state::PipelineState;
