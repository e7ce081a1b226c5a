//! # Core Configuration
//!
//! Settings are read from environment variables, with defaults for everything.
//!
//! ## Environment Variables
//!
//! - `SLOTBOOK_MIN_SLOT_MINUTES`: Shortest accepted slot in minutes (default: 1)
//! - `SLOTBOOK_LOG_LEVEL`: Logging level (default: "info")
//! - `SLOTBOOK_RECURRING_TAG`: Legacy tag that marks weekly lessons (default: "recurring")
//! - `SLOTBOOK_REFERENCE_TIME`: Fixed "now" as `YYYY-MM-DDTHH:MM` (default: local clock)

use std::env;

use chrono::{Duration, Local, NaiveDateTime};
use eyre::{Result, WrapErr, eyre};
use tracing::Level;

use crate::models::person::LEGACY_RECURRING_TAG;
use crate::models::time_slot::DEFAULT_MIN_DURATION_MINUTES;

const REFERENCE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    /// Shortest slot accepted when parsing user input
    pub min_slot_duration: Duration,

    /// Log level for the application
    pub log_level: Level,

    /// Tag honoured when migrating old records to typed recurrence
    pub recurring_tag: String,

    /// Pinned reference instant, mostly for demos and reproducible runs
    pub reference_time: Option<NaiveDateTime>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            min_slot_duration: Duration::minutes(DEFAULT_MIN_DURATION_MINUTES),
            log_level: Level::INFO,
            recurring_tag: LEGACY_RECURRING_TAG.to_string(),
            reference_time: None,
        }
    }
}

impl CoreConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails if `SLOTBOOK_MIN_SLOT_MINUTES` is not a positive integer or
    /// `SLOTBOOK_REFERENCE_TIME` is not a valid `YYYY-MM-DDTHH:MM` instant.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`CoreConfig::from_env`] but reads values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let min_minutes: i64 = lookup("SLOTBOOK_MIN_SLOT_MINUTES")
            .unwrap_or_else(|| DEFAULT_MIN_DURATION_MINUTES.to_string())
            .trim()
            .parse()
            .wrap_err("Invalid SLOTBOOK_MIN_SLOT_MINUTES value")?;
        if min_minutes < 1 {
            return Err(eyre!("SLOTBOOK_MIN_SLOT_MINUTES must be at least 1, got {}", min_minutes));
        }

        let log_level = match lookup("SLOTBOOK_LOG_LEVEL")
            .unwrap_or_else(|| "info".to_string())
            .to_lowercase()
            .as_str()
        {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "warn" => Level::WARN,
            "error" => Level::ERROR,
            _ => Level::INFO,
        };

        let recurring_tag = lookup("SLOTBOOK_RECURRING_TAG")
            .map(|tag| tag.trim().to_string())
            .filter(|tag| !tag.is_empty())
            .unwrap_or_else(|| LEGACY_RECURRING_TAG.to_string());

        let reference_time = lookup("SLOTBOOK_REFERENCE_TIME")
            .map(|raw| {
                NaiveDateTime::parse_from_str(raw.trim(), REFERENCE_TIME_FORMAT)
                    .wrap_err_with(|| format!("Invalid SLOTBOOK_REFERENCE_TIME value: {}", raw))
            })
            .transpose()?;

        Ok(Self {
            min_slot_duration: Duration::minutes(min_minutes),
            log_level,
            recurring_tag,
            reference_time,
        })
    }

    /// The pinned reference instant, or the current local wall-clock time.
    pub fn reference_time_or_now(&self) -> NaiveDateTime {
        self.reference_time
            .unwrap_or_else(|| Local::now().naive_local())
    }
}
