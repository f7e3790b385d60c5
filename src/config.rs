//! Configuration for docdex
//!
//! Centralized save/open options with sensible defaults.

use std::path::{Path, PathBuf};

use crate::index::default_index_path;

/// Options shared by the save and open paths.
///
/// The one invariant callers must uphold: whatever index path resolution is
/// used at save time must be used again at open time. The default
/// (`<storage>.index`) satisfies this automatically; an explicit override
/// must be supplied on both sides.
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Path Configuration
    // -------------------------------------------------------------------------
    /// Explicit index file path. When `None`, the index lives next to the
    /// storage file as `<storage>.index`.
    pub index_path: Option<PathBuf>,

    // -------------------------------------------------------------------------
    // Durability Configuration
    // -------------------------------------------------------------------------
    /// fsync the index file after a save
    pub sync_on_save: bool,

    // -------------------------------------------------------------------------
    // Integrity Configuration
    // -------------------------------------------------------------------------
    /// Validate the index file CRC when loading
    pub verify_checksum: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            index_path: None,
            sync_on_save: true,
            verify_checksum: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Resolve the index path for a given storage path
    pub fn resolve_index_path(&self, storage_path: &Path) -> PathBuf {
        match &self.index_path {
            Some(explicit) => explicit.clone(),
            None => default_index_path(storage_path),
        }
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set an explicit index file path (overrides the `.index` suffix default)
    pub fn index_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.index_path = Some(path.into());
        self
    }

    /// Set whether the index file is fsynced after a save
    pub fn sync_on_save(mut self, sync: bool) -> Self {
        self.config.sync_on_save = sync;
        self
    }

    /// Set whether the index CRC is validated at load time
    pub fn verify_checksum(mut self, verify: bool) -> Self {
        self.config.verify_checksum = verify;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
