//! Pipeline agents for Diffmap.
//!
//! Each agent is a plain struct over the core capability traits, with no
//! dispatch hierarchy, matching the one-call-per-step shape of the
//! analysis:
//!
//! - [`CompetitorDiscoveryAgent`]: one search plus one model call, producing
//!   the competitor list
//! - [`FeatureMatrixBuilderAgent`]: one model call, producing the presence matrix
//! - [`DifferentiationStrategistAgent`]: one model call, producing the report
//! - [`VisualGapMapperAgent`]: local projection of the matrix into a chart

pub mod discovery;
pub mod gap_mapper;
pub mod json;
pub mod matrix;
pub mod prompts;
pub mod strategist;

pub use discovery::CompetitorDiscoveryAgent;
pub use gap_mapper::VisualGapMapperAgent;
pub use matrix::FeatureMatrixBuilderAgent;
pub use strategist::DifferentiationStrategistAgent;
