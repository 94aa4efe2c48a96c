//! Configuration module for fairshare
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User settings persistence
//! - Backend selection (local files or a REST service)

pub mod paths;
pub mod settings;

pub use paths::FairsharePaths;
pub use settings::{Backend, Settings};
