// SPDX-License-Identifier: MPL-2.0
//! `gallery_shell` is the headless main-screen shell of a photo gallery.
//!
//! It keeps a window's capture-protection flag in sync with the user's
//! secure-mode preference, restores saveable screen state, toggles the
//! requested orientation and decides system bar appearance. Rendering is left
//! to the host; the shell only talks to it through [`window::Surface`].
//!
//! The heart of the crate is [`window::SecureFlagController`]: it subscribes a
//! surface to a [`window::SettingSource`] with collect-latest semantics and
//! stops touching the surface as soon as the subscription is stopped.

#![doc(html_root_url = "https://docs.rs/gallery_shell/0.1.0")]

pub mod app;
pub mod error;
pub mod ui;
pub mod window;
