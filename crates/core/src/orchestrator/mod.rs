//! Analysis orchestrator.
//!
//! The orchestrator turns one upload event into a stored record and a
//! notification:
//! - **Detection**: labels, then text, from the detection service
//! - **Matching**: target label against the lower-cased detections
//! - **Sentiment**: joined text, skipped when there is none
//! - **Persistence**: one upsert, then one notification

mod config;
mod runner;
mod types;

pub use config::AnalysisConfig;
pub use runner::AnalysisOrchestrator;
pub use types::{
    AnalysisError, AnalysisOutcome, AnalysisStage, HandlerResponse, MatchStatus, SUCCESS_MESSAGE,
};
