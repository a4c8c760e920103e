// SPDX-License-Identifier: MPL-2.0
//! Status/navigation bar appearance.
//!
//! While the bars follow the app theme their icons are drawn dark on a light
//! theme and light on a dark one. Screens that paint their own backdrop
//! (a full-screen photo, for instance) turn `follow_theme` off and always get
//! light icons.

use super::theming::ThemeMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemBarAppearance {
    /// Draw bar icons and text in a dark colour.
    pub dark_content: bool,
}

impl SystemBarAppearance {
    #[must_use]
    pub fn resolve(follow_theme: bool, theme_is_dark: bool) -> Self {
        Self {
            dark_content: follow_theme && !theme_is_dark,
        }
    }

    /// Same as [`resolve`](Self::resolve), querying the host for `System` mode.
    #[must_use]
    pub fn for_theme(follow_theme: bool, theme: ThemeMode) -> Self {
        Self::resolve(follow_theme, theme.is_dark())
    }
}
