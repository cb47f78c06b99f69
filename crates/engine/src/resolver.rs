// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine installation lookup
//!
//! A [`PathResolver`] answers "which engine should lint files in this
//! directory?". It keeps two caches: a single slot holding the last
//! directory → `node_modules` lookup, and the package manager's global
//! prefix, queried at most once per resolver.

use crate::error::{ResolveError, GLOBAL_NOT_FOUND};
use le_adapters::{CommandRunner, EngineHandle, EngineLoader, EngineSource, PathFinder};
use le_core::EngineConfig;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

const MODULES_DIR: &str = "node_modules";
const ENGINE_PACKAGE: &str = "eslint";

/// A loaded engine plus where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEngine {
    pub handle: EngineHandle,
    pub source: EngineSource,
    /// Nearest `node_modules` above the file, used as the module search path
    pub modules_dir: Option<PathBuf>,
}

#[derive(Default)]
struct ResolverCache {
    /// Last file directory and the `node_modules` found for it
    lookup: Option<(PathBuf, Option<PathBuf>)>,
    global_prefix: Option<String>,
    /// Module search path handed to engine processes
    active_modules: Option<PathBuf>,
}

/// Resolves engine installations for source directories.
pub struct PathResolver<F, C, L> {
    finder: F,
    commands: C,
    loader: L,
    bundled_dir: Option<PathBuf>,
    cache: Mutex<ResolverCache>,
}

impl<F, C, L> PathResolver<F, C, L>
where
    F: PathFinder,
    C: CommandRunner,
    L: EngineLoader,
{
    pub fn new(finder: F, commands: C, loader: L) -> Self {
        Self {
            finder,
            commands,
            loader,
            bundled_dir: None,
            cache: Mutex::new(ResolverCache::default()),
        }
    }

    /// Fallback engine package for projects whose own copy fails to load
    pub fn with_bundled(mut self, dir: Option<PathBuf>) -> Self {
        self.bundled_dir = dir;
        self
    }

    pub fn resolve(
        &self,
        file_dir: &Path,
        config: &EngineConfig,
    ) -> Result<ResolvedEngine, ResolveError> {
        let modules_dir = self.modules_dir(file_dir)?;
        self.refresh_modules_path(modules_dir.as_deref());

        if config.use_global_eslint {
            let prefix = match config.global_node_path.as_deref().filter(|p| !p.is_empty()) {
                Some(path) => path.to_string(),
                None => self.global_prefix()?,
            };
            let dir = global_engine_dir(Path::new(&prefix), cfg!(windows));
            return match self.loader.load(&dir) {
                Ok(handle) => Ok(ResolvedEngine {
                    handle,
                    source: EngineSource::Global,
                    modules_dir,
                }),
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), error = %e, "global engine not loadable");
                    Err(ResolveError::EngineNotFound(GLOBAL_NOT_FOUND.to_string()))
                }
            };
        }

        let Some(modules) = modules_dir.clone() else {
            return Err(ResolveError::EngineNotFound(format!(
                "Cannot find module `{ENGINE_PACKAGE}`"
            )));
        };
        let dir = modules.join(ENGINE_PACKAGE);
        match self.loader.load(&dir) {
            Ok(handle) => Ok(ResolvedEngine {
                handle,
                source: EngineSource::Local,
                modules_dir,
            }),
            Err(local_err) => {
                tracing::info!(dir = %dir.display(), error = %local_err, "falling back to bundled engine");
                let bundled = self
                    .bundled_dir
                    .as_deref()
                    .ok_or_else(|| ResolveError::EngineNotFound(local_err.to_string()))?;
                let handle = self
                    .loader
                    .load(bundled)
                    .map_err(|e| ResolveError::EngineNotFound(e.to_string()))?;
                Ok(ResolvedEngine {
                    handle,
                    source: EngineSource::Bundled,
                    modules_dir,
                })
            }
        }
    }

    /// Nearest `node_modules` at or above `file_dir`, served from the
    /// single-slot cache when the directory repeats.
    fn modules_dir(&self, file_dir: &Path) -> Result<Option<PathBuf>, ResolveError> {
        let mut cache = self.cache.lock();
        if let Some((dir, found)) = &cache.lookup {
            if dir == file_dir {
                return Ok(found.clone());
            }
        }
        let found = self
            .finder
            .find_nearest(file_dir, &[MODULES_DIR])
            .map_err(|source| ResolveError::Io {
                path: file_dir.to_path_buf(),
                source,
            })?;
        cache.lookup = Some((file_dir.to_path_buf(), found.clone()));
        Ok(found)
    }

    fn refresh_modules_path(&self, modules_dir: Option<&Path>) {
        let mut cache = self.cache.lock();
        if cache.active_modules.as_deref() != modules_dir {
            tracing::debug!(modules = ?modules_dir, "module search path changed");
            cache.active_modules = modules_dir.map(Path::to_path_buf);
        }
    }

    /// Global install prefix, queried once and memoized.
    pub fn global_prefix(&self) -> Result<String, ResolveError> {
        let mut cache = self.cache.lock();
        if let Some(prefix) = &cache.global_prefix {
            return Ok(prefix.clone());
        }

        let program = npm_command(cfg!(windows));
        let output = self
            .commands
            .run(program, &["get", "prefix"])
            .map_err(|e| ResolveError::PrefixQuery(e.to_string()))?;
        let prefix = output.stdout.trim();
        if !output.success() || prefix.is_empty() {
            return Err(ResolveError::PrefixQuery(format!(
                "`{program} get prefix` exited with {:?}: {}",
                output.status,
                output.stderr.trim()
            )));
        }

        tracing::info!(prefix, "global prefix resolved");
        cache.global_prefix = Some(prefix.to_string());
        Ok(prefix.to_string())
    }

    /// Cached global prefix, without querying
    pub fn cached_prefix(&self) -> Option<String> {
        self.cache.lock().global_prefix.clone()
    }

    /// Module search path for engine processes (`NODE_PATH`)
    pub fn active_modules_path(&self) -> Option<PathBuf> {
        self.cache.lock().active_modules.clone()
    }
}

/// `<prefix>/node_modules/eslint` on Windows, `<prefix>/lib/node_modules/eslint` elsewhere
pub fn global_engine_dir(prefix: &Path, windows: bool) -> PathBuf {
    if windows {
        prefix.join(MODULES_DIR).join(ENGINE_PACKAGE)
    } else {
        prefix.join("lib").join(MODULES_DIR).join(ENGINE_PACKAGE)
    }
}

fn npm_command(windows: bool) -> &'static str {
    if windows {
        "npm.cmd"
    } else {
        "npm"
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
