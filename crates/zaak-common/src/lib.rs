//! Zaak Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared error handling and logging for the zaak-index workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`ZaakError`] and the [`Result`] alias used by every
//!   component of the dump indexer
//! - **Logging**: tracing subscriber setup driven by environment or builder
//!
//! # Example
//!
//! ```no_run
//! use zaak_common::{Result, ZaakError};
//!
//! fn check(path: &str) -> Result<()> {
//!     if path.is_empty() {
//!         return Err(ZaakError::dump_root_unreadable(path, "empty path"));
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod logging;

// Re-export commonly used types
pub use error::{Result, ZaakError};
