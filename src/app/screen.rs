// SPDX-License-Identifier: MPL-2.0
//! The gallery's main screen and its lifecycle.
//!
//! Creating a [`MainScreen`] restores the saved [`ScreenState`], re-requests
//! the saved orientation and starts enforcing secure mode on the surface.
//! Destroying it stops the enforcement and saves the state again. Secure mode
//! is scoped to this top-level screen; sub-screens never touch the flag.

use super::persisted_state::ScreenState;
use super::settings_store::SettingsStore;
use crate::error::Result;
use crate::ui::system_bars::SystemBarAppearance;
use crate::ui::theming::ThemeMode;
use crate::ui::window_size_class::WindowSizeClass;
use crate::window::orientation::toggle_orientation;
use crate::window::{Orientation, Rotatable, SecureFlagController, SubscriptionHandle, Surface};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// Where the screen keeps its state and how big it starts.
#[derive(Debug, Clone, Default)]
pub struct ScreenOptions {
    /// Directory holding `state.cbor`; `None` uses the default data directory.
    pub state_dir: Option<PathBuf>,
    pub width: f32,
    pub height: f32,
}

pub struct MainScreen<S: Surface + Rotatable> {
    surface: Arc<S>,
    secure_flag: SubscriptionHandle,
    state: ScreenState,
    state_dir: Option<PathBuf>,
    size_class: WindowSizeClass,
    destroyed: bool,
}

impl<S: Surface + Rotatable> fmt::Debug for MainScreen<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MainScreen")
            .field("subscription", &self.secure_flag.id())
            .field("state", &self.state)
            .field("size_class", &self.size_class)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}

impl<S: Surface + Rotatable> MainScreen<S> {
    /// Brings the screen up on `surface`.
    ///
    /// Returns the screen and an optional warning key from restoring state.
    pub fn create(
        surface: Arc<S>,
        settings: &SettingsStore,
        controller: &SecureFlagController,
        options: ScreenOptions,
    ) -> (Self, Option<String>) {
        let (state, warning) = ScreenState::load_from(options.state_dir.clone());

        // Content is drawn edge to edge; the screen pads itself for the bars.
        if let Err(err) = surface.set_fits_system_windows(false) {
            warn!(error = %err, "could not switch to edge-to-edge layout");
        }

        if state.requested_orientation.is_locked() {
            if let Err(err) = surface.request_orientation(state.requested_orientation) {
                warn!(error = %err, "could not restore requested orientation");
            }
        }

        let secure_flag = controller.start(&surface, &settings.secure_mode_source());
        let size_class = WindowSizeClass::from_size(options.width, options.height);
        info!(
            subscription = secure_flag.id(),
            ?size_class,
            "main screen created"
        );

        (
            Self {
                surface,
                secure_flag,
                state,
                state_dir: options.state_dir,
                size_class,
                destroyed: false,
            },
            warning,
        )
    }

    pub fn surface(&self) -> &Arc<S> {
        &self.surface
    }

    pub fn state(&self) -> ScreenState {
        self.state
    }

    pub fn size_class(&self) -> WindowSizeClass {
        self.size_class
    }

    /// Reclassifies the window after a resize.
    pub fn resize(&mut self, width: f32, height: f32) -> WindowSizeClass {
        self.size_class = WindowSizeClass::from_size(width, height);
        self.size_class
    }

    /// Flips between portrait and landscape.
    pub fn toggle_rotate(&mut self) -> Result<Orientation> {
        let next = toggle_orientation(self.surface.as_ref())?;
        self.state.requested_orientation = next;
        Ok(next)
    }

    pub fn set_bottom_bar_visible(&mut self, visible: bool) {
        self.state.bottom_bar_visible = visible;
    }

    /// Whether the bottom bar is drawn: it must be wanted and fit the window.
    pub fn shows_bottom_bar(&self) -> bool {
        self.state.bottom_bar_visible && self.size_class.uses_bottom_bar()
    }

    pub fn set_system_bar_follow_theme(&mut self, follow: bool) {
        self.state.system_bar_follow_theme = follow;
    }

    pub fn system_bar_appearance(&self, theme: ThemeMode) -> SystemBarAppearance {
        SystemBarAppearance::for_theme(self.state.system_bar_follow_theme, theme)
    }

    pub fn is_active(&self) -> bool {
        !self.destroyed
    }

    /// Tears the screen down: no flag change reaches the surface afterwards.
    ///
    /// Returns a warning key if the state could not be saved. Calling it again
    /// does nothing.
    pub fn destroy(&mut self) -> Option<String> {
        if self.destroyed {
            return None;
        }
        self.destroyed = true;
        self.secure_flag.stop();
        info!("main screen destroyed");
        self.state.save_to(self.state_dir.clone())
    }
}
