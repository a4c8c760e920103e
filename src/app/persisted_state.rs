// SPDX-License-Identifier: MPL-2.0
//! Saveable screen state in CBOR format.
//!
//! This is UI state the user never edits directly (bar visibility, the
//! orientation asked for with the rotate button). It survives the screen being
//! destroyed and recreated, and is kept apart from the preferences in
//! `settings.toml`.

use super::config::{DEFAULT_BOTTOM_BAR_VISIBLE, DEFAULT_SYSTEM_BAR_FOLLOW_THEME};
use super::paths;
use crate::window::Orientation;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;

/// State file name within the app data directory.
const STATE_FILE: &str = "state.cbor";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScreenState {
    #[serde(default = "default_bottom_bar_visible")]
    pub bottom_bar_visible: bool,

    #[serde(default = "default_system_bar_follow_theme")]
    pub system_bar_follow_theme: bool,

    #[serde(default)]
    pub requested_orientation: Orientation,
}

impl Default for ScreenState {
    fn default() -> Self {
        Self {
            bottom_bar_visible: DEFAULT_BOTTOM_BAR_VISIBLE,
            system_bar_follow_theme: DEFAULT_SYSTEM_BAR_FOLLOW_THEME,
            requested_orientation: Orientation::default(),
        }
    }
}

fn default_bottom_bar_visible() -> bool {
    DEFAULT_BOTTOM_BAR_VISIBLE
}

fn default_system_bar_follow_theme() -> bool {
    DEFAULT_SYSTEM_BAR_FOLLOW_THEME
}

impl ScreenState {
    /// Loads the state from `base_dir`, or the default data directory.
    ///
    /// Returns the state and an optional warning key. A missing file silently
    /// yields the defaults.
    pub fn load_from(base_dir: Option<PathBuf>) -> (Self, Option<String>) {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return (Self::default(), None);
        };

        if !path.exists() {
            return (Self::default(), None);
        }

        match fs::File::open(&path) {
            Ok(file) => match ciborium::from_reader(BufReader::new(file)) {
                Ok(state) => (state, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "screen state is corrupt");
                    (
                        Self::default(),
                        Some("notification-state-parse-error".to_string()),
                    )
                }
            },
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "screen state is unreadable");
                (
                    Self::default(),
                    Some("notification-state-read-error".to_string()),
                )
            }
        }
    }

    /// Saves the state to `base_dir`, or the default data directory.
    ///
    /// Returns a warning key if the save failed.
    pub fn save_to(&self, base_dir: Option<PathBuf>) -> Option<String> {
        let Some(path) = Self::state_file_path_with_override(base_dir) else {
            return Some("notification-state-path-error".to_string());
        };

        if let Some(parent) = path.parent() {
            if fs::create_dir_all(parent).is_err() {
                return Some("notification-state-dir-error".to_string());
            }
        }

        match fs::File::create(&path) {
            Ok(file) => {
                if ciborium::into_writer(self, BufWriter::new(file)).is_err() {
                    return Some("notification-state-write-error".to_string());
                }
                None
            }
            Err(_) => Some("notification-state-create-error".to_string()),
        }
    }

    fn state_file_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
        paths::get_app_data_dir_with_override(base_dir).map(|mut path| {
            path.push(STATE_FILE);
            path
        })
    }
}
