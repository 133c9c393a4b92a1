//! User settings consumed by the engine and their JSON persistence.

use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use chrono::FixedOffset;
use dirs::config_dir;
use serde::{Deserialize, Serialize};

use crate::errors::{CoreError, Result};
use crate::time::{Period, WeekStart};

pub const HOME_ENV_VAR: &str = "EXPENSE_CORE_HOME";
const APP_DIR_NAME: &str = "expense_core";
const CONFIG_FILE_NAME: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";
const MAX_OFFSET_MINUTES: u32 = 18 * 60;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    pub week_start: WeekStart,
    pub default_currency_code: String,
    pub default_charts_period: Period,
    /// Whether tapping a leading or trailing day moves the grid to that month.
    pub auto_switch_month_on_out_of_month_tap: bool,
    /// Display zone as minutes east of UTC; the system zone when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utc_offset_minutes: Option<i32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            week_start: WeekStart::default(),
            default_currency_code: "EUR".into(),
            default_charts_period: Period::default(),
            auto_switch_month_on_out_of_month_tap: true,
            utc_offset_minutes: None,
        }
    }
}

impl Config {
    /// The configured fixed offset, if any.
    pub fn fixed_offset(&self) -> Result<Option<FixedOffset>> {
        let Some(minutes) = self.utc_offset_minutes else {
            return Ok(None);
        };
        if minutes.unsigned_abs() > MAX_OFFSET_MINUTES {
            return Err(CoreError::Config(format!(
                "utc_offset_minutes {minutes} is outside ±{MAX_OFFSET_MINUTES}"
            )));
        }
        minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .map(Some)
            .ok_or_else(|| CoreError::Config(format!("invalid utc offset {minutes}")))
    }

    pub fn validate(&self) -> Result<()> {
        let code = self.default_currency_code.trim();
        if code.len() != 3 || !code.chars().all(|ch| ch.is_ascii_alphabetic()) {
            return Err(CoreError::Config(format!(
                "default_currency_code `{}` is not a three-letter code",
                self.default_currency_code
            )));
        }
        self.fixed_offset().map(|_| ())
    }

    fn normalized(mut self) -> Self {
        self.default_currency_code = self.default_currency_code.trim().to_uppercase();
        self
    }
}

/// Loads and saves [`Config`] as pretty JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn with_base_dir(base: PathBuf) -> Self {
        Self::new(base.join(CONFIG_FILE_NAME))
    }

    /// `$EXPENSE_CORE_HOME/config.json`, else the platform config directory.
    pub fn default_location() -> Self {
        Self::with_base_dir(base_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the config, falling back to defaults when the file is missing.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: Config = serde_json::from_str(&data)
            .map_err(|err| CoreError::Config(format!("{}: {err}", self.path.display())))?;
        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        config.validate()?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_file(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::info!(path = %self.path.display(), "config saved");
        Ok(())
    }
}

fn base_dir() -> PathBuf {
    if let Some(custom) = env::var_os(HOME_ENV_VAR) {
        return PathBuf::from(custom);
    }
    config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_file(path: &Path, data: &str) -> Result<()> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
