//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use impfic_clause::ClauseRules;
use impfic_parse::ParseConfig;
use impfic_resources::{Anonymiser, DEFAULT_COLLECTION_PREFIX};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Document conversion settings
    #[serde(default)]
    pub parse: ParseConfig,

    /// Clause extraction rules
    #[serde(default)]
    pub clauses: ClauseRules,

    /// Identifier anonymisation settings
    #[serde(default)]
    pub anonymise: AnonymiseSettings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Identifier anonymisation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnonymiseSettings {
    /// Salt appended before hashing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salt: Option<String>,

    /// Separator between identifier and collection
    #[serde(default = "default_collection_prefix")]
    pub collection_prefix: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".impfic").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the parse and clause sections.
    pub fn validate(&self) -> Result<()> {
        self.parse
            .validate()
            .map_err(|e| CliError::Config(format!("[parse] {}", e)))?;
        self.clauses
            .validate()
            .map_err(|e| CliError::Config(format!("[clauses] {}", e)))?;
        Ok(())
    }

    /// Build an anonymiser, preferring `salt` over the configured one.
    pub fn anonymiser(&self, salt: Option<&str>) -> Result<Anonymiser> {
        let salt = salt
            .or(self.anonymise.salt.as_deref())
            .ok_or_else(|| CliError::Config("No salt configured; set IMPFIC_SALT or [anonymise] salt".into()))?;
        Ok(Anonymiser::with_collection_prefix(
            salt,
            self.anonymise.collection_prefix.as_str(),
        )?)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

impl Default for AnonymiseSettings {
    fn default() -> Self {
        Self {
            salt: None,
            collection_prefix: default_collection_prefix(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_collection_prefix() -> String {
    DEFAULT_COLLECTION_PREFIX.to_string()
}
