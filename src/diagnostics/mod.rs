//! Diagnostics data model returned by the detector.
//!
//! `DetectionReport` is the main entry point: the accepted ships plus a trace
//! of every coarse candidate (crop window, initial guess, fitted parameters,
//! cost, or the error that stopped it) and stage timings.

pub mod candidates;
pub mod report;
pub mod timing;

pub use candidates::{CandidateTrace, FitSummary};
pub use report::{DetectionReport, InputDescriptor};
pub use timing::{elapsed_ms, StageTiming, TimingBreakdown};
