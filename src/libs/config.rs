//! Configuration management for the kintai client.
//!
//! Settings live in `config.json` inside the platform data directory
//! resolved by [`DataStorage`]. A missing file is not an error: every
//! section falls back to its defaults, so the client runs with nothing but
//! an API URL (which may also come from the `KINTAI_API_URL` environment
//! variable or a `.env` file).
//!
//! ## Sections
//!
//! - **server**: API base URL and request timeout
//! - **attendance**: edit window length, ticker interval, reconciliation
//!   delay, message lifetime and the break deduction rule
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kintai::libs::config::Config;
//!
//! let config = Config::read()?;
//! let attendance = config.attendance();
//! println!("edit window: {} min", attendance.edit_window_minutes);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::time::Duration;

pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable that overrides `server.api_url`.
pub const API_URL_ENV: &str = "KINTAI_API_URL";

/// A section offered by the interactive setup.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Connection settings for the attendance API.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    /// Base URL, e.g. `https://attendance.example.com`. Endpoint paths
    /// (`/api/...`) are appended to it.
    pub api_url: String,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            api_url: String::new(),
            timeout_secs: 10,
        }
    }
}

/// Timing and calculation settings for the attendance screen.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct AttendanceConfig {
    /// Minutes after clock-in during which the clock-in time may be corrected.
    pub edit_window_minutes: u64,
    /// How often the edit window is re-evaluated, in milliseconds.
    pub tick_interval_ms: u64,
    /// Pause between a mutating call and the follow-up refresh, in milliseconds.
    pub reconcile_delay_ms: u64,
    /// Lifetime of a success or error banner, in seconds.
    pub message_ttl_secs: u64,
    /// Shifts longer than this many minutes get the break deducted.
    pub break_threshold_minutes: u64,
    /// Length of the deducted break, in minutes.
    pub break_minutes: u64,
}

impl Default for AttendanceConfig {
    fn default() -> Self {
        Self {
            edit_window_minutes: 30,
            tick_interval_ms: 1000,
            reconcile_delay_ms: 500,
            message_ttl_secs: 5,
            break_threshold_minutes: 360,
            break_minutes: 60,
        }
    }
}

/// Upper bound for every minute setting: one day.
pub const MAX_SETTING_MINUTES: u64 = 24 * 60;

fn clamp_minutes(minutes: u64) -> i64 {
    // Lossless after the clamp.
    minutes.min(MAX_SETTING_MINUTES) as i64
}

impl AttendanceConfig {
    /// Edit window length in minutes, at most one day.
    pub fn window_minutes(&self) -> i64 {
        clamp_minutes(self.edit_window_minutes)
    }

    pub fn edit_window(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.window_minutes())
    }

    pub fn break_threshold(&self) -> i64 {
        clamp_minutes(self.break_threshold_minutes)
    }

    pub fn break_length(&self) -> i64 {
        clamp_minutes(self.break_minutes)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn reconcile_delay(&self) -> Duration {
        Duration::from_millis(self.reconcile_delay_ms)
    }

    pub fn message_ttl(&self) -> Duration {
        Duration::from_secs(self.message_ttl_secs)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub attendance: Option<AttendanceConfig>,
}

impl Config {
    /// Loads `config.json`, or the defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes `config.json`. Returns `false` when there was none.
    pub fn delete() -> Result<bool> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(config_file_path)?;
        Ok(true)
    }

    /// Effective API base URL: `KINTAI_API_URL` first, then `server.api_url`.
    /// Empty values count as unset. A trailing `/` is stripped.
    pub fn api_url(&self) -> Option<String> {
        env::var(API_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .or_else(|| self.server.as_ref().map(|server| server.api_url.clone()).filter(|url| !url.trim().is_empty()))
            .map(|url| url.trim().trim_end_matches('/').to_string())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.server.clone().unwrap_or_default().timeout_secs.max(1))
    }

    /// Attendance settings with defaults filled in.
    pub fn attendance(&self) -> AttendanceConfig {
        self.attendance.clone().unwrap_or_default()
    }

    /// Interactive setup: pick sections, then answer a prompt per field.
    /// Existing values are offered as defaults.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![
            ConfigModule {
                key: "server".to_string(),
                name: Message::ConfigModuleServer.to_string(),
            },
            ConfigModule {
                key: "attendance".to_string(),
                name: Message::ConfigModuleAttendance.to_string(),
            },
        ];

        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "server" => {
                    let default = config.server.clone().unwrap_or_default();
                    msg_print!(Message::ConfigModuleServer);
                    config.server = Some(ServerConfig {
                        api_url: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptApiUrl.to_string())
                            .default(default.api_url)
                            .interact_text()?,
                        timeout_secs: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTimeoutSecs.to_string())
                            .default(default.timeout_secs)
                            .interact_text()?,
                    });
                }
                "attendance" => {
                    let default = config.attendance();
                    msg_print!(Message::ConfigModuleAttendance);
                    config.attendance = Some(AttendanceConfig {
                        edit_window_minutes: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptEditWindowMinutes.to_string())
                            .default(default.edit_window_minutes)
                            .interact_text()?,
                        tick_interval_ms: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptTickIntervalMs.to_string())
                            .default(default.tick_interval_ms)
                            .interact_text()?,
                        reconcile_delay_ms: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptReconcileDelayMs.to_string())
                            .default(default.reconcile_delay_ms)
                            .interact_text()?,
                        message_ttl_secs: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptMessageTtlSecs.to_string())
                            .default(default.message_ttl_secs)
                            .interact_text()?,
                        break_threshold_minutes: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptBreakThresholdMinutes.to_string())
                            .default(default.break_threshold_minutes)
                            .interact_text()?,
                        break_minutes: Input::with_theme(&ColorfulTheme::default())
                            .with_prompt(Message::PromptBreakMinutes.to_string())
                            .default(default.break_minutes)
                            .interact_text()?,
                    });
                }
                _ => {}
            }
        }

        Ok(config)
    }
}
