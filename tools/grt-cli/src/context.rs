//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use grt_cache::{Cache, FileStore, MemoryStore, SessionId};
use grt_cart::{CartHandle, CartStore, KvCartPersistence};

use crate::config::{Backend, GrtConfig};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: GrtConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory of the loaded config file; `cwd` when running on defaults.
    pub config_dir: PathBuf,
}

impl Context {
    /// Load context from config file.
    ///
    /// A config file that exists but cannot be read or parsed is an error,
    /// whether it was passed explicitly or found by walking up from `cwd`.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_dir) = if let Some(path) = config_path {
            let path = cwd.join(path);
            let config = GrtConfig::load(&path.to_string_lossy())?;
            (config, parent_dir(&path, &cwd))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd)? {
                Some((config, path)) => (config, parent_dir(&path, &cwd)),
                None => (GrtConfig::default(), cwd.clone()),
            }
        };

        Ok(Self {
            config,
            output,
            cwd,
            config_dir,
        })
    }

    /// Find config file in directory tree, returning it with its path.
    fn find_config(start: &Path) -> Result<Option<(GrtConfig, PathBuf)>> {
        let config_names = ["grt.toml", ".grt.toml", "grt.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    let config = GrtConfig::load(&config_path.to_string_lossy())?;
                    return Ok(Some((config, config_path)));
                }
            }

            if !current.pop() {
                break;
            }
        }

        Ok(None)
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Directory of the file backend. Relative `storage.dir` values are
    /// anchored at the config file, so every subdirectory sees one cart.
    pub fn storage_dir(&self) -> PathBuf {
        let dir = &self.config.storage.dir;
        if dir.is_absolute() {
            dir.clone()
        } else {
            self.config_dir.join(dir)
        }
    }

    /// Open the cart described by the storage config.
    ///
    /// `session` overrides `storage.session` from the config file.
    pub fn open_cart(&self, session: Option<&str>) -> Result<CartHandle> {
        let storage = &self.config.storage;

        let cache = match storage.backend {
            Backend::File => {
                let dir = self.storage_dir();
                Cache::new(FileStore::open(&dir).with_context(|| {
                    format!("Failed to open cart storage at {}", dir.display())
                })?)
            }
            Backend::Memory => Cache::new(MemoryStore::new()),
        };

        let persistence = match session.or(storage.session.as_deref()) {
            Some(id) => {
                KvCartPersistence::with_key(cache, SessionId::new(id).scoped_key(&storage.key))
            }
            None => KvCartPersistence::with_key(cache, storage.key.clone()),
        };
        tracing::debug!(key = persistence.key(), "using cart key");

        let store = CartStore::open(persistence).with_pricing(self.config.pricing)?;
        Ok(store.into_handle())
    }
}

fn parent_dir(path: &Path, fallback: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => fallback.to_path_buf(),
    }
}
