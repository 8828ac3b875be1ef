//! Widget configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use cart_cache::{FileStore, KeyValueStore, MemoryStore};
use cart_observability::{LogFormat, LogLevel, StructuredLogger};
use serde::{Deserialize, Serialize};

/// Widget configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CartConfig {
    /// Persistence settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Add-to-cart acknowledgment.
    #[serde(default)]
    pub feedback: FeedbackConfig,

    /// User-facing texts.
    #[serde(default)]
    pub messages: MessagesConfig,

    /// Logging.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl CartConfig {
    /// Load config from a file.
    pub fn load(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path))?;

        if path.ends_with(".json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path))
        } else {
            Self::from_toml(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path))
        }
    }

    /// Parse TOML config text.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Save config to a file.
    pub fn save(&self, path: &str) -> Result<()> {
        let content = if path.ends_with(".json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path))
    }

    /// Build the root logger described by the logging section.
    pub fn logger(&self) -> StructuredLogger {
        let mut logger = StructuredLogger::new("cart-widget")
            .with_min_level(self.logging.level)
            .with_format(self.logging.format);
        if let Some(page_id) = &self.logging.page_id {
            logger = logger.with_page_id(page_id.clone());
        }
        logger
    }

    /// Open the key-value store described by the storage section.
    ///
    /// Without a path the cart lives in memory for the lifetime of the page.
    pub fn open_store(&self) -> Result<Box<dyn KeyValueStore>> {
        match &self.storage.path {
            Some(path) => {
                let store = FileStore::open(path)
                    .with_context(|| format!("Failed to open cart store at {}", path.display()))?;
                Ok(Box::new(store))
            }
            None => Ok(Box::new(MemoryStore::new())),
        }
    }
}

/// Persistence settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key holding the serialized cart.
    #[serde(default = "default_storage_key")]
    pub key: String,

    /// Directory for the file-backed store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            key: default_storage_key(),
            path: None,
        }
    }
}

fn default_storage_key() -> String {
    "cart".to_string()
}

/// Add-to-cart acknowledgment settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackConfig {
    /// How long the acknowledgment label stays, in milliseconds.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,

    /// Label shown on the add button while acknowledging.
    #[serde(default = "default_added_label")]
    pub added_label: String,
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            added_label: default_added_label(),
        }
    }
}

impl FeedbackConfig {
    /// Duration as a [`std::time::Duration`].
    pub fn duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.duration_ms)
    }
}

fn default_duration_ms() -> u64 {
    1000
}

fn default_added_label() -> String {
    "Added!".to_string()
}

/// User-facing texts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagesConfig {
    /// Placeholder row for an empty cart.
    #[serde(default = "default_empty_cart")]
    pub empty_cart: String,

    /// Confirmation shown after checkout.
    #[serde(default = "default_checkout")]
    pub checkout: String,
}

impl Default for MessagesConfig {
    fn default() -> Self {
        Self {
            empty_cart: default_empty_cart(),
            checkout: default_checkout(),
        }
    }
}

fn default_empty_cart() -> String {
    "Your cart is empty".to_string()
}

fn default_checkout() -> String {
    "Thank you for your purchase! This is where the checkout process would begin.".to_string()
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Minimum level.
    #[serde(default = "default_level")]
    pub level: LogLevel,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Page correlation ID attached to every entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            format: LogFormat::default(),
            page_id: None,
        }
    }
}

fn default_level() -> LogLevel {
    LogLevel::Info
}
