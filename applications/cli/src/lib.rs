//! Chorus CLI Library
//!
//! Operator command line for Chorus playlists. Acts as the upstream caller
//! of the playlist and collaboration services: it supplies the acting user
//! and already-parsed arguments.
//!
//! This library exposes the components for testing purposes.

pub mod commands;
pub mod config;

pub use commands::{App, Cli, Commands};
pub use config::ChorusConfig;
