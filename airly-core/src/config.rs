use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};

use crate::{AirlyError, Credential, FilterPolicy};

pub const DEFAULT_API_URL: &str = "https://airapi.airly.eu";
pub const DEFAULT_INSTALLATION: &str = "204";

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// first_run_complete = true
/// filter = "names"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    pub api_key: Option<String>,

    /// Set once onboarding has been offered; cleared by reset.
    #[serde(default)]
    pub first_run_complete: bool,

    pub api_url: Option<String>,
    pub default_installation: Option<String>,

    #[serde(default)]
    pub filter: FilterPolicy,
}

impl Config {
    pub fn api_url(&self) -> &str {
        self.api_url.as_deref().unwrap_or(DEFAULT_API_URL)
    }

    pub fn default_installation(&self) -> &str {
        self.default_installation.as_deref().unwrap_or(DEFAULT_INSTALLATION)
    }

    /// Load config from `path`, or return an empty default if it doesn't exist yet.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return empty.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to `path`, creating parent directories as needed.
    pub fn save_to(&self, path: &std::path::Path) -> Result<(), AirlyError> {
        let failed = |reason: String| AirlyError::StorageWriteFailed { path: path.to_path_buf(), reason };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| failed(e.to_string()))?;
        }

        let toml = toml::to_string_pretty(self).map_err(|e| failed(e.to_string()))?;
        fs::write(path, toml).map_err(|e| failed(e.to_string()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("eu", "airly", "airly-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Persisted credential plus first-run marker.
///
/// Mutations are written through immediately.
pub trait CredentialStore {
    fn credential(&self) -> Option<Credential>;

    fn set_credential(&mut self, credential: Credential) -> Result<(), AirlyError>;

    /// Removes both the credential and the first-run marker.
    fn clear(&mut self) -> Result<(), AirlyError>;

    fn is_first_run(&self) -> bool;

    fn complete_first_run(&mut self) -> Result<(), AirlyError>;

    /// Non-credential settings.
    fn config(&self) -> &Config;
}

fn clear_credential(cfg: &mut Config) {
    cfg.api_key = None;
    cfg.first_run_complete = false;
}

/// Store backed by the TOML config file.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
    config: Config,
}

impl FileCredentialStore {
    /// Open the store at the platform config location.
    pub fn open() -> Result<Self> {
        Self::open_at(Config::config_file_path()?)
    }

    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let config = Config::load_from(&path)?;
        Ok(Self { path, config })
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn credential(&self) -> Option<Credential> {
        self.config.api_key.clone().and_then(Credential::new)
    }

    fn set_credential(&mut self, credential: Credential) -> Result<(), AirlyError> {
        self.config.api_key = Some(credential.as_str().to_string());
        self.config.save_to(&self.path)
    }

    fn clear(&mut self) -> Result<(), AirlyError> {
        clear_credential(&mut self.config);
        self.config.save_to(&self.path)
    }

    fn is_first_run(&self) -> bool {
        !self.config.first_run_complete
    }

    fn complete_first_run(&mut self) -> Result<(), AirlyError> {
        self.config.first_run_complete = true;
        self.config.save_to(&self.path)
    }

    fn config(&self) -> &Config {
        &self.config
    }
}

/// Non-persistent store, for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct MemoryCredentialStore {
    config: Config,
}

impl MemoryCredentialStore {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// A store that has completed onboarding with `key`.
    pub fn with_key(key: &str) -> Self {
        Self::new(Config {
            api_key: Some(key.to_string()),
            first_run_complete: true,
            ..Config::default()
        })
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn credential(&self) -> Option<Credential> {
        self.config.api_key.clone().and_then(Credential::new)
    }

    fn set_credential(&mut self, credential: Credential) -> Result<(), AirlyError> {
        self.config.api_key = Some(credential.as_str().to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<(), AirlyError> {
        clear_credential(&mut self.config);
        Ok(())
    }

    fn is_first_run(&self) -> bool {
        !self.config.first_run_complete
    }

    fn complete_first_run(&mut self) -> Result<(), AirlyError> {
        self.config.first_run_complete = true;
        Ok(())
    }

    fn config(&self) -> &Config {
        &self.config
    }
}
