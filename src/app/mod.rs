// SPDX-License-Identifier: MPL-2.0
//! Application root: preferences, saveable state and the main screen.
//!
//! [`run`] is what the binary calls. It opens the settings store, applies any
//! change requested on the command line, brings the [`MainScreen`] up on a
//! headless surface, waits until the surface reflects secure mode and tears
//! the screen down again, reporting what happened.

pub mod config;
pub mod paths;
pub mod persisted_state;
pub mod screen;
pub mod settings_store;

pub use screen::{MainScreen, ScreenOptions};
pub use settings_store::{SecureModeSource, SettingsStore};

use crate::error::{Error, Result};
use crate::ui::system_bars::SystemBarAppearance;
use crate::ui::window_size_class::WindowSizeClass;
use crate::window::{HeadlessSurface, Orientation, Rotatable, SecureFlagController, Surface};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// How long [`run`] waits for the surface to reflect secure mode.
pub const SETTLE_TIMEOUT: Duration = Duration::from_secs(2);

/// Warning key reported when the rotate button could not be honoured.
pub const ROTATE_FAILED_WARNING: &str = "notification-rotate-error";

/// Command-line options.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Config directory override (for settings.toml).
    /// Takes precedence over `GALLERY_SHELL_CONFIG_DIR`.
    pub config_dir: Option<String>,
    /// Data directory override (for state.cbor).
    /// Takes precedence over `GALLERY_SHELL_DATA_DIR`.
    pub data_dir: Option<String>,
    /// Persist a new secure mode before the screen comes up.
    pub secure: Option<bool>,
    /// Press the rotate button once.
    pub rotate: bool,
    /// Initial window size in logical pixels.
    pub size: Option<(f32, f32)>,
}

/// What a headless run observed.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub secure_mode: bool,
    pub surface_secure: bool,
    pub orientation: Orientation,
    pub size_class: WindowSizeClass,
    pub shows_bottom_bar: bool,
    pub system_bars: SystemBarAppearance,
    pub warnings: Vec<String>,
}

/// Parses `on`/`off` (and the usual boolean spellings).
pub fn parse_switch(raw: &str) -> Result<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => Err(Error::Config(format!("expected on or off, got {other}"))),
    }
}

/// Parses `WIDTHxHEIGHT`, e.g. `412x915`.
pub fn parse_size(raw: &str) -> Result<(f32, f32)> {
    let invalid = || Error::Config(format!("invalid window size: {raw}"));
    let (width, height) = raw.split_once(['x', 'X']).ok_or_else(invalid)?;
    let width: f32 = width.trim().parse().map_err(|_| invalid())?;
    let height: f32 = height.trim().parse().map_err(|_| invalid())?;
    Ok((width, height))
}

/// Toggles the orientation, turning a refusal into a warning key so the
/// screen can still be torn down and its state saved.
fn press_rotate<S: Surface + Rotatable>(screen: &mut MainScreen<S>) -> Option<String> {
    match screen.toggle_rotate() {
        Ok(_) => None,
        Err(err) => {
            warn!(error = %err, "rotation request failed");
            Some(ROTATE_FAILED_WARNING.to_string())
        }
    }
}

/// Runs the main screen once against a headless surface.
pub async fn run(flags: Flags) -> Result<Report> {
    let mut warnings = Vec::new();
    let (settings, warning) = SettingsStore::open(flags.config_dir.map(PathBuf::from));
    warnings.extend(warning);

    if let Some(secure) = flags.secure {
        settings.set_secure_mode(secure)?;
    }

    let controller = SecureFlagController::try_current()
        .ok_or_else(|| Error::Config("no async runtime available".to_string()))?;
    let (width, height) = flags
        .size
        .unwrap_or((config::DEFAULT_WINDOW_WIDTH, config::DEFAULT_WINDOW_HEIGHT));
    let surface = Arc::new(HeadlessSurface::new());

    let (mut screen, warning) = MainScreen::create(
        Arc::clone(&surface),
        &settings,
        &controller,
        ScreenOptions {
            state_dir: flags.data_dir.map(PathBuf::from),
            width,
            height,
        },
    );
    warnings.extend(warning);

    if flags.rotate {
        warnings.extend(press_rotate(&mut screen));
    }

    let secure_mode = settings.secure_mode();
    let settled = tokio::time::timeout(SETTLE_TIMEOUT, async {
        while surface.is_secure() != secure_mode {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await;
    if settled.is_err() {
        warn!(secure_mode, "surface did not reflect secure mode in time");
    }

    let theme = settings.config().general.theme_mode;
    let report = Report {
        secure_mode,
        surface_secure: surface.is_secure(),
        orientation: surface.requested_orientation(),
        size_class: screen.size_class(),
        shows_bottom_bar: screen.shows_bottom_bar(),
        system_bars: screen.system_bar_appearance(theme),
        warnings: Vec::new(),
    };
    warnings.extend(screen.destroy());

    Ok(Report { warnings, ..report })
}
