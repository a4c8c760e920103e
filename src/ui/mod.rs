// SPDX-License-Identifier: MPL-2.0
//! Toolkit-independent UI decisions.
//!
//! - [`theming`] - Light/Dark/System theme mode
//! - [`system_bars`] - Status/navigation bar icon colour
//! - [`window_size_class`] - Compact/Medium/Expanded window buckets

pub mod system_bars;
pub mod theming;
pub mod window_size_class;
