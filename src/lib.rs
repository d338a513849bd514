//! betscope — AI-assisted sports matchup analysis and odds aggregation.
//!
//! All analytical work (form analysis, odds averaging, statistical lookup)
//! is delegated to a hosted LLM; this crate's job is prompt construction,
//! defensive response decoding, time-based caching, and presentation.
//!
//! The flow for every query is the same: consult the [`cache::TtlCache`],
//! on a miss build a prompt ([`prompts`]), call the model
//! ([`providers::LlmProvider`]), decode the reply ([`decode`]), refresh the
//! cache, and hand back a typed domain object ([`domain`]). The
//! [`analyst::Analyst`] orchestrates that per operation.

pub mod analyst;
pub mod cache;
pub mod config;
pub mod decode;
pub mod domain;
pub mod error;
pub mod prompts;
pub mod providers;

pub use analyst::Analyst;
pub use config::Config;
pub use error::{BetscopeError, Result};
pub use prompts::SportFilter;
