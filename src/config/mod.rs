//! Configuration module for the expense ledger
//!
//! This module provides configuration management including:
//! - `.env` loading
//! - XDG-compliant path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::ExpensePaths;
pub use settings::Settings;

/// Load variables from a `.env` file in the working directory, if present
///
/// Variables already set in the process environment are not overridden.
pub fn load_env_file() {
    match dotenv::dotenv() {
        Ok(path) => log::debug!("Loaded environment from {}", path.display()),
        Err(e) if e.not_found() => {}
        Err(e) => log::warn!("Ignoring unreadable .env file: {}", e),
    }
}
