// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine and host settings.
//!
//! `EngineConfig` travels with every job to the worker; `Settings` is the
//! host-side view that also carries the rule policies used when building a
//! job. Both are loaded from a TOML file:
//!
//! ```toml
//! ignore_fixable_rules_while_typing = true
//! ignored_rules_when_modified = ["no-unused-vars"]
//!
//! [engine]
//! use_global_eslint = false
//! eslint_rules_dir = "$HOME/eslint-rules"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::watch;

/// Errors from loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid settings in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Options controlling engine resolution and invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct EngineConfig {
    /// Resolve the engine from the package manager's global prefix
    pub use_global_eslint: bool,
    /// Global prefix override; skips the `npm get prefix` query
    pub global_node_path: Option<String>,
    /// Extra rules directory (env-expanded, relative paths searched upward)
    pub eslint_rules_dir: Option<String>,
    /// Explicit config file, overriding any discovered project config
    pub eslintrc_path: Option<String>,
    /// Pass `--no-ignore` and skip `.eslintignore` lookup
    pub disable_eslint_ignore: bool,
    /// Skip files whose project has no engine config
    pub disable_when_no_eslint_config: bool,
    /// Executable used as the invocation entry (defaults to `node`)
    pub node_executable: Option<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            use_global_eslint: false,
            global_node_path: None,
            eslint_rules_dir: None,
            eslintrc_path: None,
            disable_eslint_ignore: false,
            disable_when_no_eslint_config: true,
            node_executable: None,
        }
    }
}

impl EngineConfig {
    /// Entry executable for engine invocations.
    pub fn node_executable(&self) -> &str {
        self.node_executable.as_deref().unwrap_or("node")
    }
}

/// Host settings snapshot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Settings {
    /// Run a fix job whenever a file is saved
    pub fix_on_save: bool,
    /// Rules suppressed while a buffer has unsaved changes
    pub ignored_rules_when_modified: Vec<String>,
    /// Rules suppressed during fix jobs
    pub ignored_rules_when_fixing: Vec<String>,
    /// Also suppress rules known to be auto-fixable while typing
    pub ignore_fixable_rules_while_typing: bool,
    /// Append the rule id to rendered diagnostics
    pub show_rule: bool,
    pub engine: EngineConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fix_on_save: false,
            ignored_rules_when_modified: Vec::new(),
            ignored_rules_when_fixing: Vec::new(),
            ignore_fixable_rules_while_typing: false,
            show_rule: true,
            engine: EngineConfig::default(),
        }
    }
}

impl Settings {
    /// Parse settings from TOML text.
    pub fn parse(content: &str, path: &Path) -> Result<Self, SettingsError> {
        toml::from_str(content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(SettingsError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Engine options sent along with each job.
    pub fn job_config(&self) -> EngineConfig {
        self.engine.clone()
    }
}

/// Default settings location: `$XDG_CONFIG_HOME/le/config.toml` or `~/.config/le/config.toml`.
pub fn default_settings_path() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg).join("le/config.toml"));
        }
    }
    dirs::home_dir().map(|home| home.join(".config/le/config.toml"))
}

/// Holds the current settings and notifies subscribers on change.
pub struct SettingsStore {
    path: Option<PathBuf>,
    tx: watch::Sender<Settings>,
}

impl SettingsStore {
    /// Load from `path` (or use defaults when `None`).
    pub fn open(path: Option<PathBuf>) -> Result<Self, SettingsError> {
        let settings = match &path {
            Some(p) => Settings::load(p)?,
            None => Settings::default(),
        };
        Ok(Self::with_settings(path, settings))
    }

    pub fn with_settings(path: Option<PathBuf>, settings: Settings) -> Self {
        let (tx, _rx) = watch::channel(settings);
        Self { path, tx }
    }

    /// Current snapshot.
    pub fn current(&self) -> Settings {
        self.tx.borrow().clone()
    }

    /// Receiver that observes every published change.
    pub fn subscribe(&self) -> watch::Receiver<Settings> {
        self.tx.subscribe()
    }

    /// Re-read the backing file. Returns `true` when the settings changed.
    pub fn reload(&self) -> Result<bool, SettingsError> {
        let Some(path) = &self.path else {
            return Ok(false);
        };
        let fresh = Settings::load(path)?;
        Ok(self.replace(fresh))
    }

    /// Publish `settings`; subscribers are only woken on an actual change.
    pub fn replace(&self, settings: Settings) -> bool {
        self.tx.send_if_modified(|current| {
            if *current == settings {
                false
            } else {
                *current = settings;
                true
            }
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
