//! Tallyplot Core
//!
//! Shared plumbing for the tallyplot chart engine: logging setup, profiling
//! scopes, hashed collections and math re-exports.

pub mod alloc;
pub mod logging;
pub mod math;
pub mod profiling;
