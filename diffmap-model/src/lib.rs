//! Model providers for Diffmap.
//!
//! [`GeminiModel`] implements [`diffmap_core::Llm`] against the Gemini
//! `generateContent` REST API; [`MockLlm`] scripts replies for tests.

pub mod gemini;
pub mod mock;

pub use gemini::{DEFAULT_MODEL, GeminiModel};
pub use mock::MockLlm;
