// SPDX-License-Identifier: MPL-2.0
//! Window-level plumbing: the surface contract, the secure-flag controller and
//! rotation requests.
//!
//! A [`Surface`] is whatever the host renders into. The shell never draws; it
//! only toggles the surface's "no capture" flag and asks for an orientation.
//! [`HeadlessSurface`] is an in-memory implementation used by the CLI and the
//! tests.

pub mod latest;
pub mod orientation;
pub mod secure_flag;

pub use latest::LatestSlot;
pub use orientation::{Orientation, Rotatable};
pub use secure_flag::{SecureFlagController, SettingSource, SubscriptionHandle};

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// Failures reported by a surface when asked to change its flags.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SurfaceError {
    /// The surface has been torn down.
    #[error("surface is no longer available")]
    Unavailable,
    /// The host refused the request.
    #[error("request rejected by host: {0}")]
    Rejected(String),
}

/// Capture-protection contract of a rendering surface.
///
/// Both calls are synchronous and idempotent.
pub trait Surface: Send + Sync + 'static {
    /// Forbids screenshots and screen recording of the surface.
    fn add_secure_flag(&self) -> Result<(), SurfaceError>;

    /// Allows capture again.
    fn remove_secure_flag(&self) -> Result<(), SurfaceError>;

    /// Chooses whether content is laid out inside the system bars (`true`) or
    /// drawn edge to edge behind them (`false`).
    ///
    /// Hosts without system decorations have nothing to do.
    fn set_fits_system_windows(&self, _fits: bool) -> Result<(), SurfaceError> {
        Ok(())
    }
}

/// One flag mutation observed on a [`HeadlessSurface`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagChange {
    Added,
    Removed,
}

/// In-memory surface that records every flag mutation.
#[derive(Debug)]
pub struct HeadlessSurface {
    secure: AtomicBool,
    destroyed: AtomicBool,
    fits_system_windows: AtomicBool,
    changes: Mutex<Vec<FlagChange>>,
    orientation: Mutex<Orientation>,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self {
            secure: AtomicBool::new(false),
            destroyed: AtomicBool::new(false),
            fits_system_windows: AtomicBool::new(true),
            changes: Mutex::default(),
            orientation: Mutex::default(),
        }
    }
}

impl HeadlessSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a surface whose flag is already set, as if a previous screen had
    /// left it on.
    #[must_use]
    pub fn with_secure_flag(secure: bool) -> Self {
        let surface = Self::default();
        surface.secure.store(secure, Ordering::SeqCst);
        surface
    }

    pub fn is_secure(&self) -> bool {
        self.secure.load(Ordering::SeqCst)
    }

    /// Marks the surface as torn down. Every later request fails with
    /// [`SurfaceError::Unavailable`].
    pub fn destroy(&self) {
        self.destroyed.store(true, Ordering::SeqCst);
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    /// `false` once the content has been switched to edge-to-edge.
    pub fn fits_system_windows(&self) -> bool {
        self.fits_system_windows.load(Ordering::SeqCst)
    }

    /// Flag mutations in the order they were applied.
    pub fn changes(&self) -> Vec<FlagChange> {
        self.changes.lock().clone()
    }

    fn ensure_alive(&self) -> Result<(), SurfaceError> {
        if self.is_destroyed() {
            Err(SurfaceError::Unavailable)
        } else {
            Ok(())
        }
    }

    fn set_secure(&self, secure: bool) -> Result<(), SurfaceError> {
        self.ensure_alive()?;
        self.secure.store(secure, Ordering::SeqCst);
        self.changes.lock().push(if secure {
            FlagChange::Added
        } else {
            FlagChange::Removed
        });
        Ok(())
    }
}

impl Surface for HeadlessSurface {
    fn add_secure_flag(&self) -> Result<(), SurfaceError> {
        self.set_secure(true)
    }

    fn remove_secure_flag(&self) -> Result<(), SurfaceError> {
        self.set_secure(false)
    }

    fn set_fits_system_windows(&self, fits: bool) -> Result<(), SurfaceError> {
        self.ensure_alive()?;
        self.fits_system_windows.store(fits, Ordering::SeqCst);
        Ok(())
    }
}

impl Rotatable for HeadlessSurface {
    fn requested_orientation(&self) -> Orientation {
        *self.orientation.lock()
    }

    fn request_orientation(&self, orientation: Orientation) -> Result<(), SurfaceError> {
        self.ensure_alive()?;
        *self.orientation.lock() = orientation;
        Ok(())
    }
}
