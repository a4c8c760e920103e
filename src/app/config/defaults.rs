// SPDX-License-Identifier: MPL-2.0
//! Default values shared by the config file, the saveable screen state and
//! the CLI.

// ==========================================================================
// Privacy Defaults
// ==========================================================================

/// Secure mode is off until the user turns it on.
pub const DEFAULT_SECURE_MODE: bool = false;

// ==========================================================================
// Screen State Defaults
// ==========================================================================

/// The bottom navigation bar starts visible.
pub const DEFAULT_BOTTOM_BAR_VISIBLE: bool = true;

/// System bars follow the app theme unless a screen paints its own backdrop.
pub const DEFAULT_SYSTEM_BAR_FOLLOW_THEME: bool = true;

// ==========================================================================
// Headless Window Defaults
// ==========================================================================

/// Logical width of the headless surface created by the CLI.
pub const DEFAULT_WINDOW_WIDTH: f32 = 412.0;

/// Logical height of the headless surface created by the CLI.
pub const DEFAULT_WINDOW_HEIGHT: f32 = 915.0;
