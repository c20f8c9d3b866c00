//! Orchestration for Diffmap: environment configuration, the sequential
//! analysis pipeline, and JSON export of finished bundles.
//!
//! [`Pipeline::run`] is the single entry point used by both the CLI and
//! the HTTP server.

pub mod config;
pub mod export;
pub mod pipeline;

pub use config::AppConfig;
pub use export::{default_export_path, write_bundle};
pub use pipeline::Pipeline;
