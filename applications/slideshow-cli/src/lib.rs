//! Keepsake Slideshow CLI Library
//!
//! Headless host for the memory slideshow: loads a memory collection from
//! JSON, runs a session against a simulated audio backend and reports what
//! would be on screen.
//!
//! This library exposes the host components for testing purposes.

pub mod backend;
pub mod config;
pub mod error;
pub mod input;
pub mod memories;
pub mod runner;

// Re-export commonly used types for convenience
pub use backend::SimulatedBackend;
pub use config::{AudioSettings, CliConfig};
pub use error::{CliError, Result};
pub use memories::load_memories;
pub use runner::{run_session, RunOptions, RunSummary};
