//! Domain orchestration
//!
//! This module ties the pipeline together for each configured domain:
//! credentials, quota probe, state load, sitemap expansion, submission,
//! persistence and reporting.

mod orchestrator;

pub use orchestrator::{run_all, run_domain, PipelineContext};
