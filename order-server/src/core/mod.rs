//! Core module - server configuration, state and lifecycle
//!
//! # Contents
//!
//! - [`Config`] - environment-driven configuration
//! - [`ServerState`] - shared handles (store, notifier)
//! - [`Server`] - HTTP server

pub mod config;
pub mod server;
pub mod state;

pub use config::Config;
pub use server::Server;
pub use state::ServerState;
