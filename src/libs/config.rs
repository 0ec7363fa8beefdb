//! Configuration management for pmt.
//!
//! Settings live in `config.json` inside the platform data directory (see
//! [`DataStorage`]). A missing file is not an error: every setting has a
//! default, so pmt runs without any setup.
//!
//! ## Settings
//!
//! - **`reminder_days`**: day-ahead thresholds for reminder lists, default `[7, 14]`
//! - **`work_week`**: weekday indices counted as workdays (`0 = Sunday`), default Monday to Friday
//! - **`gantt_unit`**: `calendar` or `workday` units for Gantt layout
//! - **`store`**: record collection name and optional record limit
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pmt::libs::config::Config;
//!
//! let config = Config::read()?;
//! let week = config.work_week()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::calendar::{WorkWeek, DEFAULT_WORKDAYS};
use super::data_storage::DataStorage;
use super::error::TrackerResult;
use super::statistics::GanttUnit;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_REMINDER_DAYS: [u32; 2] = [7, 14];
pub const DEFAULT_COLLECTION: &str = "projects";

const WEEKDAY_NAMES: [&str; 7] = ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"];

/// Record store settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct StoreConfig {
    /// Namespace of project records inside the database.
    pub collection: String,

    /// Upper bound on stored records. `None` means unlimited.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_records: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig {
            collection: DEFAULT_COLLECTION.to_string(),
            max_records: None,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Day-ahead thresholds for reminder lists.
    pub reminder_days: Vec<u32>,

    /// Weekday indices (`0 = Sunday .. 6 = Saturday`) treated as workdays.
    pub work_week: Vec<u32>,

    /// Unit used for Gantt offsets and widths.
    pub gantt_unit: GanttUnit,

    pub store: StoreConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            reminder_days: DEFAULT_REMINDER_DAYS.to_vec(),
            work_week: DEFAULT_WORKDAYS.to_vec(),
            gantt_unit: GanttUnit::default(),
            store: StoreConfig::default(),
        }
    }
}

impl Config {
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new())
    }

    pub fn read_from(storage: &DataStorage) -> Result<Config> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        if !config_file_path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new())
    }

    pub fn save_to(&self, storage: &DataStorage) -> Result<()> {
        let config_file_path = storage.get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// The configured work week. Fails on an empty or out-of-range set.
    pub fn work_week(&self) -> TrackerResult<WorkWeek> {
        WorkWeek::new(&self.work_week)
    }

    /// Reminder thresholds, sorted and without duplicates or zeros.
    pub fn reminder_thresholds(&self) -> Vec<u32> {
        let mut days: Vec<u32> = self.reminder_days.iter().copied().filter(|d| *d > 0).collect();
        days.sort_unstable();
        days.dedup();
        if days.is_empty() {
            return DEFAULT_REMINDER_DAYS.to_vec();
        }
        days
    }

    /// Interactive setup wizard seeded with the current settings.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let theme = ColorfulTheme::default();

        msg_print!(Message::ConfigWizardHeader, true);

        let reminder_text: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptReminderDays.to_string())
            .default(config.reminder_days.iter().map(u32::to_string).collect::<Vec<_>>().join(","))
            .validate_with(|input: &String| parse_day_list(input).map(|_| ()))
            .interact_text()?;
        config.reminder_days = parse_day_list(&reminder_text).map_err(anyhow::Error::msg)?;

        let checked: Vec<bool> = (0..7u32).map(|day| config.work_week.contains(&day)).collect();
        let workdays = MultiSelect::with_theme(&theme)
            .with_prompt(Message::PromptWorkdays.to_string())
            .items(&WEEKDAY_NAMES)
            .defaults(&checked)
            .interact()?;
        config.work_week = workdays.into_iter().map(|i| i as u32).collect();
        config.work_week()?;

        let units = [GanttUnit::Calendar, GanttUnit::Workday];
        let unit_index = Select::with_theme(&theme)
            .with_prompt(Message::PromptGanttUnit.to_string())
            .items(&units.iter().map(|u| u.to_string()).collect::<Vec<_>>())
            .default(units.iter().position(|u| *u == config.gantt_unit).unwrap_or(0))
            .interact()?;
        config.gantt_unit = units[unit_index];

        let max_records: usize = Input::with_theme(&theme)
            .with_prompt(Message::PromptMaxRecords.to_string())
            .default(config.store.max_records.unwrap_or(0))
            .interact_text()?;
        config.store.max_records = (max_records > 0).then_some(max_records);

        Ok(config)
    }
}

/// Parses `"7, 14"` into `[7, 14]`.
pub fn parse_day_list(input: &str) -> std::result::Result<Vec<u32>, String> {
    let days = input
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<u32>().map_err(|_| format!("'{}' is not a number of days", part)))
        .collect::<std::result::Result<Vec<u32>, String>>()?;
    if days.is_empty() {
        return Err("at least one threshold is required".to_string());
    }
    Ok(days)
}
