// SPDX-License-Identifier: MPL-2.0
//! Coarse window size buckets.
//!
//! Screens pick their chrome from the bucket rather than from raw pixels:
//! a compact width gets a bottom bar, wider windows get a side rail.

/// Width below which a window is compact.
pub const COMPACT_MAX_WIDTH: f32 = 600.0;
/// Width below which a window is medium.
pub const MEDIUM_MAX_WIDTH: f32 = 840.0;
/// Height below which a window is compact.
pub const COMPACT_MAX_HEIGHT: f32 = 480.0;
/// Height below which a window is medium.
pub const MEDIUM_MAX_HEIGHT: f32 = 900.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SizeClass {
    Compact,
    Medium,
    Expanded,
}

impl SizeClass {
    fn classify(value: f32, compact_max: f32, medium_max: f32) -> Self {
        // NaN and negatives count as zero
        let value = if value.is_nan() { 0.0 } else { value.max(0.0) };
        if value < compact_max {
            SizeClass::Compact
        } else if value < medium_max {
            SizeClass::Medium
        } else {
            SizeClass::Expanded
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowSizeClass {
    pub width: SizeClass,
    pub height: SizeClass,
}

impl WindowSizeClass {
    /// Classifies a window size given in logical pixels.
    #[must_use]
    pub fn from_size(width: f32, height: f32) -> Self {
        Self {
            width: SizeClass::classify(width, COMPACT_MAX_WIDTH, MEDIUM_MAX_WIDTH),
            height: SizeClass::classify(height, COMPACT_MAX_HEIGHT, MEDIUM_MAX_HEIGHT),
        }
    }

    /// Whether the bottom navigation bar fits this window.
    #[must_use]
    pub fn uses_bottom_bar(self) -> bool {
        self.width == SizeClass::Compact
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_boundaries_are_exclusive_upper_bounds() {
        assert_eq!(WindowSizeClass::from_size(599.9, 800.0).width, SizeClass::Compact);
        assert_eq!(WindowSizeClass::from_size(600.0, 800.0).width, SizeClass::Medium);
        assert_eq!(WindowSizeClass::from_size(839.0, 800.0).width, SizeClass::Medium);
        assert_eq!(WindowSizeClass::from_size(840.0, 800.0).width, SizeClass::Expanded);
    }

    #[test]
    fn height_boundaries_are_exclusive_upper_bounds() {
        assert_eq!(WindowSizeClass::from_size(400.0, 479.0).height, SizeClass::Compact);
        assert_eq!(WindowSizeClass::from_size(400.0, 480.0).height, SizeClass::Medium);
        assert_eq!(WindowSizeClass::from_size(400.0, 900.0).height, SizeClass::Expanded);
    }

    #[test]
    fn invalid_sizes_are_compact() {
        let class = WindowSizeClass::from_size(f32::NAN, -10.0);
        assert_eq!(class.width, SizeClass::Compact);
        assert_eq!(class.height, SizeClass::Compact);
    }

    #[test]
    fn bottom_bar_only_on_compact_width() {
        assert!(WindowSizeClass::from_size(412.0, 915.0).uses_bottom_bar());
        assert!(!WindowSizeClass::from_size(1280.0, 800.0).uses_bottom_bar());
    }
}
