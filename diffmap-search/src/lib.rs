//! Search providers for Diffmap.
//!
//! [`TavilySearch`] implements [`diffmap_core::SearchProvider`] against the
//! Tavily REST API; [`MockSearch`] scripts hits for tests.

pub mod mock;
pub mod tavily;

pub use mock::MockSearch;
pub use tavily::TavilySearch;
