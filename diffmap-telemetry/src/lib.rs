//! Structured logging setup shared by the Diffmap binaries.
//!
//! Call [`init_telemetry`] once in `main`, then use the re-exported
//! `tracing` macros everywhere else.

pub mod init;

pub use init::init_telemetry;
pub use tracing::{Span, debug, error, info, instrument, trace, warn};
