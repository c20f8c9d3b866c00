//! # diffmap-core
//!
//! Core types and traits for the Diffmap competitor differentiation mapper.
//!
//! ## Overview
//!
//! This crate provides the foundational abstractions shared by the pipeline:
//!
//! - [`Llm`] - the hosted generative-model capability
//! - [`SearchProvider`] - the hosted web-search capability
//! - [`Query`], [`Competitor`], [`FeatureMatrix`], [`DifferentiationReport`],
//!   [`FeatureGapChart`], [`AnalysisBundle`] - the analysis data model
//! - [`DiffmapError`] / [`Result`] - unified error handling
//! - [`RetryConfig`] / [`execute_with_retry`] - transient-failure policy for
//!   provider calls
//!
//! Data flows linearly: idea text → search hits → competitor list → feature
//! matrix → report + chart → exportable bundle. Every competitor key in a
//! [`FeatureMatrix`] must name a competitor from the same run (no orphans).

pub mod error;
pub mod model;
pub mod retry;
pub mod search;
pub mod types;

pub use error::{DiffmapError, Result};
pub use model::{
    Content, FinishReason, GenerateContentConfig, Llm, LlmRequest, LlmResponse, UsageMetadata,
};
pub use retry::{
    RetryConfig, execute_with_retry, is_retryable_error_message, is_retryable_status_code,
    is_transient_error,
};
pub use search::SearchProvider;
pub use types::{
    AnalysisBundle, ChartRow, Competitor, DifferentiationReport, FeatureGap, FeatureGapChart,
    FeatureMatrix, GapKind, MAX_SEARCH_RESULTS, Presence, Query, SearchHit,
};
