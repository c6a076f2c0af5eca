//! Business plan validation and scoring.
//!
//! The [`plan`] module holds the engine: a template model, the submission
//! values collected by the form layer, and the validator that scores them.
//! Configuration, telemetry, and the process-level error type live alongside
//! it so the API service can share them.

pub mod config;
pub mod error;
pub mod plan;
pub mod telemetry;
