// SPDX-License-Identifier: MPL-2.0
//! Requested screen orientation and the rotate toggle.

use super::SurfaceError;
use serde::{Deserialize, Serialize};

/// Orientation the screen asks the host for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Let the host follow the device sensor.
    #[default]
    Unspecified,
    Portrait,
    Landscape,
}

impl Orientation {
    /// Landscape goes back to portrait; anything else is forced to landscape.
    ///
    /// ```
    /// use gallery_shell::window::Orientation;
    ///
    /// assert_eq!(Orientation::Unspecified.toggle(), Orientation::Landscape);
    /// assert_eq!(Orientation::Landscape.toggle(), Orientation::Portrait);
    /// assert_eq!(Orientation::Portrait.toggle(), Orientation::Landscape);
    /// ```
    #[must_use]
    pub fn toggle(self) -> Self {
        match self {
            Orientation::Landscape => Orientation::Portrait,
            Orientation::Portrait | Orientation::Unspecified => Orientation::Landscape,
        }
    }

    #[must_use]
    pub fn is_locked(self) -> bool {
        self != Orientation::Unspecified
    }
}

/// A surface that accepts orientation requests.
pub trait Rotatable: Send + Sync {
    fn requested_orientation(&self) -> Orientation;

    fn request_orientation(&self, orientation: Orientation) -> Result<(), SurfaceError>;
}

/// Flips the surface's requested orientation and returns the new value.
pub fn toggle_orientation<R: Rotatable + ?Sized>(target: &R) -> Result<Orientation, SurfaceError> {
    let next = target.requested_orientation().toggle();
    target.request_orientation(next)?;
    tracing::debug!(?next, "requested orientation toggled");
    Ok(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::HeadlessSurface;

    #[test]
    fn toggle_twice_from_unspecified_ends_in_portrait() {
        assert_eq!(
            Orientation::Unspecified.toggle().toggle(),
            Orientation::Portrait
        );
    }

    #[test]
    fn only_unspecified_is_unlocked() {
        assert!(!Orientation::Unspecified.is_locked());
        assert!(Orientation::Portrait.is_locked());
        assert!(Orientation::Landscape.is_locked());
    }

    #[test]
    fn toggle_orientation_updates_surface() {
        let surface = HeadlessSurface::new();
        assert_eq!(toggle_orientation(&surface), Ok(Orientation::Landscape));
        assert_eq!(surface.requested_orientation(), Orientation::Landscape);
        assert_eq!(toggle_orientation(&surface), Ok(Orientation::Portrait));
    }

    #[test]
    fn toggle_orientation_on_destroyed_surface_errors() {
        let surface = HeadlessSurface::new();
        surface.destroy();
        assert_eq!(toggle_orientation(&surface), Err(SurfaceError::Unavailable));
        assert_eq!(surface.requested_orientation(), Orientation::Unspecified);
    }

    #[test]
    fn orientation_serializes_lowercase() {
        let text = toml::to_string(&Wrapper {
            orientation: Orientation::Landscape,
        })
        .unwrap();
        assert!(text.contains("\"landscape\""));
    }

    #[derive(Serialize)]
    struct Wrapper {
        orientation: Orientation,
    }
}
