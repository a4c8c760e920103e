// SPDX-License-Identifier: MPL-2.0
//! Process-wide owner of the user preferences.
//!
//! The store keeps the current [`Config`] in memory, writes it back to
//! `settings.toml` on every change, and publishes the secure-mode value on a
//! `tokio::sync::watch` channel. [`SecureModeSource`] turns that channel into
//! the latest-value-wins stream the secure-flag controller consumes.

use super::config::{self, Config};
use crate::error::Result;
use crate::window::SettingSource;
use futures_util::stream::BoxStream;
use futures_util::StreamExt;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, info};

#[derive(Debug)]
pub struct SettingsStore {
    config: RwLock<Config>,
    /// `None` for stores that never touch the disk.
    path: Option<PathBuf>,
    secure_mode_tx: watch::Sender<bool>,
}

impl SettingsStore {
    /// Opens the store backed by `settings.toml` in `base_dir`, or in the
    /// default config directory.
    ///
    /// Returns the store and an optional warning key from loading.
    pub fn open(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let path = config::config_path_with_override(base_dir.clone());
        let (config, warning) = config::load_with_override(base_dir);
        (Self::with_config(config, path), warning)
    }

    /// Creates a store that keeps everything in memory.
    #[must_use]
    pub fn in_memory(config: Config) -> Self {
        Self::with_config(config, None)
    }

    fn with_config(config: Config, path: Option<PathBuf>) -> Self {
        let (secure_mode_tx, _) = watch::channel(config.secure_mode());
        Self {
            config: RwLock::new(config),
            path,
            secure_mode_tx,
        }
    }

    /// Returns a copy of the current configuration.
    pub fn config(&self) -> Config {
        self.config.read().clone()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn secure_mode(&self) -> bool {
        *self.secure_mode_tx.borrow()
    }

    /// Turns secure mode on or off, persisting the change.
    pub fn set_secure_mode(&self, enabled: bool) -> Result<()> {
        self.update(|config| config.privacy.secure_mode = Some(enabled))
            .map(|_| ())
    }

    /// Applies `updater` to the configuration, saves it and notifies
    /// subscribers of any secure-mode change.
    ///
    /// Memory is only updated once the file has been written.
    pub fn update<F>(&self, updater: F) -> Result<Config>
    where
        F: FnOnce(&mut Config),
    {
        let mut guard = self.config.write();
        let mut next = guard.clone();
        updater(&mut next);
        if let Some(path) = &self.path {
            config::save_to_path(&next, path)?;
            debug!(path = %path.display(), "settings saved");
        }
        *guard = next.clone();
        // Publish under the write lock so broadcasts follow store order.
        self.publish(&guard);
        Ok(next)
    }

    /// Re-reads `settings.toml` and notifies subscribers of any change.
    ///
    /// In-memory stores have nothing to reload.
    pub fn reload(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let loaded = if path.exists() {
            config::load_from_path(path)?
        } else {
            Config::default()
        };
        let mut guard = self.config.write();
        *guard = loaded;
        self.publish(&guard);
        drop(guard);
        info!(path = %path.display(), "settings reloaded");
        Ok(())
    }

    fn publish(&self, config: &Config) {
        let secure = config.secure_mode();
        let changed = self.secure_mode_tx.send_if_modified(|current| {
            if *current == secure {
                false
            } else {
                *current = secure;
                true
            }
        });
        if changed {
            info!(secure, "secure mode changed");
        }
    }

    /// Stream source of the secure-mode value.
    pub fn secure_mode_source(&self) -> SecureModeSource {
        SecureModeSource {
            rx: self.secure_mode_tx.subscribe(),
        }
    }
}

/// Secure-mode setting as a [`SettingSource`].
///
/// Each subscription yields the current value immediately, then every change.
/// Changes made faster than a subscriber polls are coalesced.
#[derive(Debug, Clone)]
pub struct SecureModeSource {
    rx: watch::Receiver<bool>,
}

impl SettingSource for SecureModeSource {
    fn subscribe(&self) -> BoxStream<'static, bool> {
        WatchStream::new(self.rx.clone()).boxed()
    }
}
