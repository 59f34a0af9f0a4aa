//! Caching lookup proxy behind the folp browser extension.
//!
//! Selected text is forwarded to dictionary, encyclopedia, translation,
//! code-search and Wolfram|Alpha services; normalized results are cached in
//! memory and returned as JSON.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod state;

#[cfg(any(test, feature = "testing"))]
#[doc(hidden)]
pub mod testing;

pub use domain::error::FolpError;
pub use infrastructure::config::Config;
pub use state::AppState;
