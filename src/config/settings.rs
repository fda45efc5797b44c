//! User settings for the expense ledger
//!
//! Manages display preferences, the database location and the default export
//! format.

use std::fmt::Write;
use std::path::PathBuf;

use chrono::format::{Item, StrftimeItems};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::paths::ExpensePaths;
use crate::error::ExpenseError;
use crate::export::ExportFormat;

/// Environment variable overriding the database location
pub const DATABASE_PATH_ENV: &str = "EXPENSE_DB_PATH";

/// User settings for the expense ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Timestamp format for listings (strftime format)
    #[serde(default = "default_datetime_format")]
    pub datetime_format: String,

    /// Database file; defaults to `expenses.db` in the base directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<PathBuf>,

    /// Format used when an export path has no recognizable extension
    #[serde(default)]
    pub default_export_format: ExportFormat,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_datetime_format() -> String {
    "%Y-%m-%d %H:%M".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            datetime_format: default_datetime_format(),
            database_path: None,
            default_export_format: ExportFormat::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &ExpensePaths) -> Result<Self, ExpenseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                ExpenseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                ExpenseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - `init` decides when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &ExpensePaths) -> Result<(), ExpenseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            ExpenseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| ExpenseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Check values a hand-edited settings file may have broken
    pub fn validate(&self) -> Result<(), ExpenseError> {
        validate_datetime_format(&self.datetime_format)
    }

    /// Resolve the database file
    ///
    /// `EXPENSE_DB_PATH` wins over the settings file, which wins over the
    /// default location.
    pub fn database_file(&self, paths: &ExpensePaths) -> PathBuf {
        match std::env::var(DATABASE_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => PathBuf::from(path),
            _ => self
                .database_path
                .clone()
                .unwrap_or_else(|| paths.database_file()),
        }
    }
}

/// Reject strftime strings that cannot render a local timestamp
///
/// Unknown specifiers and offset or zone specifiers (a naive timestamp has
/// no zone) would otherwise fail only when a listing is printed.
fn validate_datetime_format(format: &str) -> Result<(), ExpenseError> {
    let invalid = || ExpenseError::Config(format!("Invalid datetime_format '{}'", format));

    let items: Vec<Item> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(invalid());
    }

    let mut rendered = String::new();
    write!(
        rendered,
        "{}",
        NaiveDateTime::default().format_with_items(items.into_iter())
    )
    .map_err(|_| invalid())
}
