//! birthday-notifs configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::{BirthdayError, BirthdayResult};
use crate::record::SchemaKeys;
use crate::retry::RetryPolicy;
use crate::store::StoreParams;

static DEFAULT_STORE_PATH: &str = "~/birthdays";
static DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";

/// Environment variables override file values, e.g.
/// `BIRTHDAY_NOTIFS__TELEGRAM__BOT_TOKEN`.
const ENV_PREFIX: &str = "BIRTHDAY_NOTIFS";

fn default_store_path() -> PathBuf {
    PathBuf::from(DEFAULT_STORE_PATH)
}

fn default_telegram_api() -> String {
    DEFAULT_TELEGRAM_API.to_string()
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_secs() -> u64 {
    2
}

/// Configuration at ~/.config/birthday-notifs/config.toml
#[derive(Debug, Deserialize, Clone, Default)]
pub struct BirthdayConfig {
    #[serde(default)]
    pub schema: SchemaKeys,

    #[serde(default)]
    pub store: StoreConfig,

    pub telegram: Option<TelegramConfig>,

    #[serde(default)]
    pub retry: RetryConfig,
}

/// Which month-document store to use.
#[derive(Debug, Deserialize, Clone)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreConfig {
    /// One JSON file per month in a local directory.
    Local {
        #[serde(default = "default_store_path")]
        path: PathBuf,
    },
    /// An external `birthday-store-<provider>` binary.
    Provider {
        provider: String,
        #[serde(flatten)]
        params: StoreParams,
    },
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Local {
            path: default_store_path(),
        }
    }
}

impl StoreConfig {
    /// Directory of a local store with `~` expanded.
    pub fn local_path(&self) -> PathBuf {
        match self {
            StoreConfig::Local { path } => {
                PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
            }
            StoreConfig::Provider { .. } => default_store_path(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,

    #[serde(default = "default_telegram_api")]
    pub api_base: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_base_delay_secs")]
    pub base_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        RetryConfig {
            max_attempts: default_max_attempts(),
            base_delay_secs: default_base_delay_secs(),
        }
    }
}

impl From<&RetryConfig> for RetryPolicy {
    fn from(config: &RetryConfig) -> Self {
        RetryPolicy {
            max_attempts: config.max_attempts,
            base_delay: Duration::from_secs(config.base_delay_secs),
            ..RetryPolicy::default()
        }
    }
}

impl BirthdayConfig {
    pub fn config_path() -> BirthdayResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| BirthdayError::Config("Could not determine config directory".into()))?
            .join("birthday-notifs");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from `path` (or the default location, which is created with
    /// commented-out defaults if missing), then apply environment overrides.
    pub fn load(path: Option<&Path>) -> BirthdayResult<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = Self::config_path()?;
                if !default.exists() {
                    Self::create_default_config(&default)?;
                }
                default
            }
        };

        Config::builder()
            .add_source(File::from(config_path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| BirthdayError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| BirthdayError::Config(e.to_string()))
    }

    /// The Telegram section, required for sending.
    pub fn telegram(&self) -> BirthdayResult<&TelegramConfig> {
        self.telegram.as_ref().ok_or_else(|| {
            BirthdayError::Config(
                "No [telegram] section configured (bot_token and chat_id are required)".into(),
            )
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::from(&self.retry)
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> BirthdayResult<()> {
        let contents = format!(
            "\
# birthday-notifs configuration

# Field names inside each month document:
# [schema]
# month_key = \"month_name\"
# day_key = \"days\"

# Where month documents live. Either a local directory ...
# [store]
# kind = \"local\"
# path = \"{}\"
#
# ... or a store provider binary (birthday-store-<provider>) on PATH.
# Any other keys are passed through to the provider.
# [store]
# kind = \"provider\"
# provider = \"cosmos\"

# Telegram bot used for the weekly message.
# [telegram]
# bot_token = \"<your bot token>\"
# chat_id = \"<your chat id>\"

# [retry]
# max_attempts = 3
# base_delay_secs = 2
",
            DEFAULT_STORE_PATH
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                BirthdayError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| BirthdayError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}
