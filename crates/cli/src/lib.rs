//! Prediktor CLI Library
//!
//! Command definitions, session token storage and terminal rendering for the
//! `prediktor` binary.

pub mod commands;
pub mod context;
pub mod progress;
pub mod render;
pub mod session_store;

pub use commands::{Cli, Commands};
pub use context::CliContext;
pub use session_store::SessionStore;
