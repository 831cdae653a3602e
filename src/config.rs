use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub ui: UiConfig,
    #[serde(default)]
    pub branding: BrandingConfig,
    /// Tariffs offered on the tariff stage, in display order
    #[serde(default = "default_tariffs")]
    pub tariffs: Vec<TariffOption>,
    #[serde(default)]
    pub logging: LoggingConfig,
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Event poll interval in milliseconds
    pub tick_rate_ms: u64,
    /// Percentage of the terminal width used by the wizard panel
    #[serde(default = "default_panel_width")]
    pub panel_width_percent: u16,
}

fn default_panel_width() -> u16 {
    70
}

/// Header text above the stepper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandingConfig {
    #[serde(default = "default_brand")]
    pub brand: String,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_brand() -> String {
    "Vodafone".to_string()
}

fn default_title() -> String {
    "Перенесення номера".to_string()
}

impl Default for BrandingConfig {
    fn default() -> Self {
        Self {
            brand: default_brand(),
            title: default_title(),
        }
    }
}

/// A tariff the subscriber can port onto
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TariffOption {
    /// Value submitted as the `tariff` key
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Monthly fee in hryvnias
    pub monthly_fee: u32,
}

impl TariffOption {
    fn new(id: &str, name: &str, description: &str, monthly_fee: u32) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            monthly_fee,
        }
    }

    /// Look up a tariff by the id a submission carries
    pub fn find<'a>(tariffs: &'a [TariffOption], id: &str) -> Option<&'a TariffOption> {
        tariffs.iter().find(|t| t.id == id)
    }
}

fn default_tariffs() -> Vec<TariffOption> {
    vec![
        TariffOption::new("red_s", "Red S", "10 GB, unlimited calls in network", 200),
        TariffOption::new("red_m", "Red M", "30 GB, 300 minutes to other networks", 300),
        TariffOption::new("red_l", "Red L", "Unlimited internet and calls", 450),
    ]
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to log to file in TUI mode (false = stderr for debugging)
    #[serde(default = "default_log_to_file")]
    pub to_file: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_to_file() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            to_file: default_log_to_file(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory for logs and other runtime files
    pub state: String,
}

impl Config {
    /// Load configuration, layering (lowest to highest priority):
    /// embedded defaults, `~/.config/numport/config.toml`, the explicit
    /// `config_path`, then `NUMPORT__*` environment variables.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        // Start with embedded defaults so numport works without config files
        let defaults = Config::default();
        let defaults_json =
            serde_json::to_string(&defaults).context("Failed to serialize default config")?;

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            &defaults_json,
            config::FileFormat::Json,
        ));

        if let Some(user_config) = Self::user_config_path() {
            if user_config.exists() {
                builder = builder.add_source(config::File::from(user_config));
            }
        }

        // Explicit config file (CLI override)
        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("NUMPORT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to load configuration")?;
        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Path of the per-user config file, if a config dir exists
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("numport").join("config.toml"))
    }

    /// Write config as TOML, creating parent directories as needed
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let toml_str = self.to_toml()?;
        std::fs::write(path, toml_str).context("Failed to write config file")?;

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config to TOML")
    }

    /// Get absolute path to state directory
    pub fn state_path(&self) -> PathBuf {
        let path = PathBuf::from(&self.paths.state);
        if path.is_absolute() {
            path
        } else {
            std::env::current_dir().unwrap_or_default().join(path)
        }
    }

    /// Get absolute path to logs directory
    pub fn logs_path(&self) -> PathBuf {
        self.state_path().join("logs")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ui: UiConfig {
                tick_rate_ms: 250,
                panel_width_percent: default_panel_width(),
            },
            branding: BrandingConfig::default(),
            tariffs: default_tariffs(),
            logging: LoggingConfig::default(),
            paths: PathsConfig {
                state: ".numport".to_string(),
            },
        }
    }
}
