//! Configuration service implementation.
//!
//! Loads `ChatConfig` from `config.toml` (by default
//! `~/.config/socchat/config.toml`) and caches it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use socchat_core::ChatConfig;
use socchat_core::error::{ChatError, Result};

use crate::paths::SocchatPaths;

/// Configuration service that loads and caches the pipeline configuration.
///
/// A missing file means "use defaults". A malformed file is reported by
/// [`load`](Self::load); [`get_config`](Self::get_config) logs it and falls
/// back to defaults so a bad edit never stops the chat from working.
#[derive(Debug, Clone)]
pub struct ConfigService {
    path: PathBuf,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<ChatConfig>>>,
}

impl ConfigService {
    /// Creates a service for the default config location.
    ///
    /// # Errors
    ///
    /// Returns `ChatError::Config` if the platform config directory is unknown.
    pub fn new() -> Result<Self> {
        let path = SocchatPaths::config_file().map_err(|e| ChatError::config(e.to_string()))?;
        Ok(Self::with_path(path))
    }

    /// Creates a service reading from an explicit path (used by tests).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            config: Arc::new(RwLock::new(None)),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> ChatConfig {
        if let Ok(read_lock) = self.config.read() {
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load().unwrap_or_else(|e| {
            tracing::warn!(
                "[ConfigService] Failed to load {}: {}; using defaults",
                self.path.display(),
                e
            );
            ChatConfig::default()
        });

        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        if let Ok(mut write_lock) = self.config.write() {
            *write_lock = None;
        }
    }

    /// Reads and parses the config file, bypassing the cache.
    ///
    /// # Errors
    ///
    /// IO errors other than "not found", and TOML parse errors.
    pub fn load(&self) -> Result<ChatConfig> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(
                    "[ConfigService] No config at {}, using defaults",
                    self.path.display()
                );
                return Ok(ChatConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        let config: ChatConfig = toml::from_str(&content)?;
        tracing::debug!("[ConfigService] Loaded config from {}", self.path.display());
        Ok(config)
    }

    /// Writes a config file with default values if none exists yet.
    ///
    /// Returns the path of the (existing or newly written) file.
    pub fn ensure_config_file(&self) -> Result<PathBuf> {
        if self.path.exists() {
            return Ok(self.path.clone());
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let template = toml::to_string_pretty(&ChatConfig::default())?;
        fs::write(&self.path, template)?;
        tracing::info!("[ConfigService] Wrote default config to {}", self.path.display());

        Ok(self.path.clone())
    }
}
