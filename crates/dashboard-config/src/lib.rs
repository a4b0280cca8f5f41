use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Month names and Monday-first weekday headers shown by the calendar panes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelsConfig {
    pub months: Vec<String>,
    pub weekdays: Vec<String>,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        Self {
            months: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ]
            .map(String::from)
            .to_vec(),
            weekdays: ["Mo", "Tu", "We", "Th", "Fr", "Sa", "Su"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// One chart on the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    /// Metric name, used for loading data and the chart title
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Currency symbol to prefix the total with
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl ChartConfig {
    fn named(label: &str) -> Self {
        Self {
            label: label.to_string(),
            link: None,
            currency: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Rows the tallest bar of each chart is scaled to
    pub chart_height: u32,
    /// Longest range, in days, the metric source will answer for
    pub max_range_days: u64,
    /// Write logs here instead of stderr
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    pub labels: LabelsConfig,
    pub charts: Vec<ChartConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            chart_height: 50,
            max_range_days: 366,
            log_file: None,
            labels: LabelsConfig::default(),
            charts: vec![
                ChartConfig {
                    link: Some("#".to_string()),
                    ..ChartConfig::named("orders")
                },
                ChartConfig {
                    currency: Some("$".to_string()),
                    ..ChartConfig::named("sales")
                },
                ChartConfig::named("customers"),
            ],
        }
    }
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the log path
        config.log_file = config
            .log_file
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        config.validate()?;
        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/dashboard-range");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.labels.months.len() != 12 {
            return Err(ConfigError::Invalid(format!(
                "labels.months needs 12 entries, found {}",
                self.labels.months.len()
            )));
        }
        if self.labels.weekdays.len() != 7 {
            return Err(ConfigError::Invalid(format!(
                "labels.weekdays needs 7 entries, found {}",
                self.labels.weekdays.len()
            )));
        }
        if self.chart_height == 0 {
            return Err(ConfigError::Invalid(
                "chart_height must be greater than zero".to_string(),
            ));
        }
        if self.max_range_days == 0 {
            return Err(ConfigError::Invalid(
                "max_range_days must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
