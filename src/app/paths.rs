// SPDX-License-Identifier: MPL-2.0
//! Where the shell keeps its files.
//!
//! Preferences (`settings.toml`) live in the config directory, saveable screen
//! state (`state.cbor`) lives in the data directory. Both are resolved with the
//! same priority:
//! 1. **Explicit override** passed to a `_with_override()` function (the CLI's
//!    `--config-dir`/`--data-dir`, or a temp dir in tests)
//! 2. **Environment variables** (`GALLERY_SHELL_CONFIG_DIR`, `GALLERY_SHELL_DATA_DIR`)
//! 3. **Platform default** from the `dirs` crate, with [`APP_NAME`] appended

use std::path::PathBuf;

/// Directory name appended to the platform config/data directories.
pub const APP_NAME: &str = "GalleryShell";

/// Environment variable overriding the data directory.
pub const ENV_DATA_DIR: &str = "GALLERY_SHELL_DATA_DIR";

/// Environment variable overriding the config directory.
pub const ENV_CONFIG_DIR: &str = "GALLERY_SHELL_CONFIG_DIR";

fn env_dir(var: &str) -> Option<PathBuf> {
    std::env::var(var)
        .ok()
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

fn resolve(
    override_path: Option<PathBuf>,
    env_var: &str,
    platform: Option<PathBuf>,
) -> Option<PathBuf> {
    override_path
        .or_else(|| env_dir(env_var))
        .or_else(|| {
            platform.map(|mut path| {
                path.push(APP_NAME);
                path
            })
        })
}

/// Returns the data directory used for `state.cbor`.
pub fn get_app_data_dir() -> Option<PathBuf> {
    get_app_data_dir_with_override(None)
}

/// Returns the data directory, preferring `override_path` when given.
pub fn get_app_data_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, ENV_DATA_DIR, dirs::data_dir())
}

/// Returns the config directory used for `settings.toml`.
pub fn get_app_config_dir() -> Option<PathBuf> {
    get_app_config_dir_with_override(None)
}

/// Returns the config directory, preferring `override_path` when given.
pub fn get_app_config_dir_with_override(override_path: Option<PathBuf>) -> Option<PathBuf> {
    resolve(override_path, ENV_CONFIG_DIR, dirs::config_dir())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Env vars are process-wide; serialize the tests touching them.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    #[test]
    fn default_config_dir_ends_with_app_name() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_CONFIG_DIR);

        if let Some(path) = get_app_config_dir() {
            assert!(path.ends_with(APP_NAME));
            assert!(path.is_absolute());
        }
    }

    #[test]
    fn default_data_dir_ends_with_app_name() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::remove_var(ENV_DATA_DIR);

        if let Some(path) = get_app_data_dir() {
            assert!(path.ends_with(APP_NAME));
        }
    }

    #[test]
    fn explicit_override_wins_over_env_var() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_CONFIG_DIR, "/env/config");

        let override_path = PathBuf::from("/override/config");
        assert_eq!(
            get_app_config_dir_with_override(Some(override_path.clone())),
            Some(override_path)
        );

        std::env::remove_var(ENV_CONFIG_DIR);
    }

    #[test]
    fn env_var_replaces_platform_default() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_DATA_DIR, "/env/data");

        assert_eq!(get_app_data_dir(), Some(PathBuf::from("/env/data")));

        std::env::remove_var(ENV_DATA_DIR);
    }

    #[test]
    fn empty_env_var_is_ignored() {
        let _lock = ENV_MUTEX.lock().unwrap();
        std::env::set_var(ENV_DATA_DIR, "");

        if let Some(path) = get_app_data_dir() {
            assert!(path.ends_with(APP_NAME));
        }

        std::env::remove_var(ENV_DATA_DIR);
    }
}
