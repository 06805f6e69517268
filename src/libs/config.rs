//! Configuration management for the LifeScope client.
//!
//! Settings are stored as pretty-printed JSON (`config.json`) in the platform
//! data directory resolved by [`DataStorage`]. Every module is optional so that
//! a fresh installation works with no file at all.
//!
//! ## Modules
//!
//! - **API**: base URL of the task service
//! - **Planner**: first day of the week used by the weekly planner
//!
//! ## Resolution order for the API URL
//!
//! 1. `LIFESCOPE_API_URL` (also read from a `.env` file)
//! 2. `api.api_url` from `config.json`
//! 3. [`DEFAULT_API_URL`]
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lifescope::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("API: {}", config.api_url());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::aggregation::WeekStart;
use super::data_storage::DataStorage;
use crate::api::DEFAULT_API_URL;
use crate::libs::messages::Message;
use crate::msg_print;
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::Path;

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Environment variable overriding the configured API URL.
pub const API_URL_ENV: &str = "LIFESCOPE_API_URL";

/// A module offered by the interactive setup.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    /// Unique identifier used to route the setup
    pub key: String,
    /// Display name shown during setup
    pub name: String,
}

/// Connection settings for the task service.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApiConfig {
    /// Base URL including the `/api` prefix, e.g. `https://lifescope.example.com/api`.
    pub api_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "api".to_string(),
            name: "API".to_string(),
        }
    }

    pub fn init(config: &Option<ApiConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleApi);
        Ok(Self {
            api_url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptApiUrl.to_string())
                .default(config.api_url)
                .interact_text()?,
        })
    }
}

/// Weekly planner settings.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct PlannerConfig {
    pub week_start: WeekStart,
}

impl PlannerConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "planner".to_string(),
            name: "Planner".to_string(),
        }
    }

    pub fn init(config: &Option<PlannerConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModulePlanner);
        let options = [WeekStart::Monday, WeekStart::Sunday];
        let labels = ["Monday", "Sunday"];
        let default = options.iter().position(|start| *start == config.week_start).unwrap_or(0);
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptWeekStart.to_string())
            .items(&labels)
            .default(default)
            .interact()?;
        Ok(Self {
            week_start: options[selection],
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub planner: Option<PlannerConfig>,
}

impl Config {
    /// Reads `config.json` from the data directory, or the defaults when it does not exist.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        Self::read_from(&config_file_path)
    }

    pub fn read_from(path: &Path) -> Result<Config> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let config_str = fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        self.save_to(&config_file_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config_file = File::create(path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Effective API base URL (environment, then file, then default).
    pub fn api_url(&self) -> String {
        match env::var(API_URL_ENV) {
            Ok(url) if !url.trim().is_empty() => url.trim().to_string(),
            _ => self.api.clone().unwrap_or_default().api_url,
        }
    }

    pub fn week_start(&self) -> WeekStart {
        self.planner.as_ref().map(|planner| planner.week_start).unwrap_or_default()
    }

    /// Interactive setup wizard, pre-filled from the current configuration.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let modules = vec![ApiConfig::module(), PlannerConfig::module()];
        let selected = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&modules.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected {
            match modules[selection].key.as_str() {
                "api" => config.api = Some(ApiConfig::init(&config.api)?),
                "planner" => config.planner = Some(PlannerConfig::init(&config.planner)?),
                _ => {}
            }
        }

        Ok(config)
    }
}
