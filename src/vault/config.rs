//! # Configuration
//!
//! Vault reads `config.json` from its home directory and falls back to
//! built-in defaults for anything missing.
//!
//! ## Resolution Order
//!
//! 1. **Command-line flags**: `--backend`, `--data`, `--no-backup`
//! 2. **Environment variables**: `VAULT_BACKEND`, `VAULT_REMOTE_URL`, `VAULT_REMOTE_API_KEY`
//! 3. **Config file**: `$VAULT_HOME/config.json` (or `--config <path>`)
//! 4. **Defaults**
//!
//! The home directory is `$VAULT_HOME` when set, otherwise the platform data
//! directory (via the `directories` crate).
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `backend` | `file` | `file` or `remote` |
//! | `data_file` | `<home>/vault.json` | Data file for the file backend |
//! | `backups.enabled` | `true` | Write a snapshot after each change |
//! | `backups.dir` | `<home>/backups` | Where snapshots go |
//! | `export_file` | `export.txt` | Default export target |
//! | `remote.url` | none | Data API base URL |
//! | `remote.api_key` | none | Data API key |
//! | `remote.data_source` | `Cluster0` | Data source name |
//! | `remote.database` | `vault` | Database name |
//! | `remote.collection` | `records` | Collection name |
//! | `remote.timeout_secs` | `30` | Request timeout |

use crate::error::{Result, VaultError};
use crate::store::BackendKind;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILENAME: &str = "config.json";
const DATA_FILENAME: &str = "vault.json";
const BACKUP_DIRNAME: &str = "backups";
const DEFAULT_EXPORT_FILE: &str = "export.txt";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BackupConfig {
    pub enabled: bool,
    pub dir: Option<PathBuf>,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RemoteConfig {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub data_source: String,
    pub database: String,
    pub collection: String,
    pub timeout_secs: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            data_source: "Cluster0".to_string(),
            database: "vault".to_string(),
            collection: "records".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Configuration for vault, stored in `config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct VaultConfig {
    pub backend: BackendKind,
    pub data_file: Option<PathBuf>,
    pub backups: BackupConfig,
    pub export_file: PathBuf,
    pub remote: RemoteConfig,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::File,
            data_file: None,
            backups: BackupConfig::default(),
            export_file: PathBuf::from(DEFAULT_EXPORT_FILE),
            remote: RemoteConfig::default(),
        }
    }
}

impl VaultConfig {
    /// Load config from the given file, or return defaults if it does not exist.
    pub fn load<P: AsRef<Path>>(config_path: P) -> Result<Self> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path)?;
        serde_json::from_str(&content).map_err(|e| {
            VaultError::Config(format!("{}: {}", config_path.display(), e))
        })
    }

    /// Apply `VAULT_*` overrides from an environment lookup.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(backend) = lookup("VAULT_BACKEND") {
            self.backend = parse_backend(&backend)?;
        }
        if let Some(url) = lookup("VAULT_REMOTE_URL") {
            self.remote.url = Some(url);
        }
        if let Some(key) = lookup("VAULT_REMOTE_API_KEY") {
            self.remote.api_key = Some(key);
        }
        Ok(())
    }

    pub fn data_file(&self, home: &Path) -> PathBuf {
        self.data_file
            .clone()
            .unwrap_or_else(|| home.join(DATA_FILENAME))
    }

    pub fn backup_dir(&self, home: &Path) -> PathBuf {
        self.backups
            .dir
            .clone()
            .unwrap_or_else(|| home.join(BACKUP_DIRNAME))
    }
}

pub fn parse_backend(raw: &str) -> Result<BackendKind> {
    match raw.trim().to_lowercase().as_str() {
        "file" => Ok(BackendKind::File),
        "remote" => Ok(BackendKind::Remote),
        other => Err(VaultError::Config(format!(
            "Unknown backend: {} (expected file or remote)",
            other
        ))),
    }
}

/// The vault home: `$VAULT_HOME` if given, else the platform data directory.
pub fn vault_home(env_home: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(home) = env_home {
        return Ok(home);
    }
    ProjectDirs::from("com", "vault", "vault")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| VaultError::Config("Could not determine data directory".to_string()))
}
