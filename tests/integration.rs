// SPDX-License-Identifier: MPL-2.0
use gallery_shell::app::config::{self, Config, PrivacyConfig, CONFIG_FILE};
use gallery_shell::app::persisted_state::ScreenState;
use gallery_shell::app::{self, Flags, MainScreen, ScreenOptions, SettingsStore};
use gallery_shell::ui::window_size_class::SizeClass;
use gallery_shell::window::{HeadlessSurface, Orientation, Rotatable, SecureFlagController};
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

fn dir_flag(path: &std::path::Path) -> Option<String> {
    Some(path.to_string_lossy().into_owned())
}

#[tokio::test]
async fn run_persists_secure_mode_and_applies_it() {
    let config_dir = tempdir().expect("config dir");
    let data_dir = tempdir().expect("data dir");

    let report = app::run(Flags {
        config_dir: dir_flag(config_dir.path()),
        data_dir: dir_flag(data_dir.path()),
        secure: Some(true),
        ..Flags::default()
    })
    .await
    .expect("run succeeds");

    assert!(report.secure_mode);
    assert!(report.surface_secure);
    assert!(report.warnings.is_empty());

    let loaded = config::load_from_path(&config_dir.path().join(CONFIG_FILE)).expect("load");
    assert!(loaded.secure_mode());
}

#[tokio::test]
async fn run_rotation_is_remembered_between_runs() {
    let config_dir = tempdir().expect("config dir");
    let data_dir = tempdir().expect("data dir");
    let flags = Flags {
        config_dir: dir_flag(config_dir.path()),
        data_dir: dir_flag(data_dir.path()),
        ..Flags::default()
    };

    let first = app::run(Flags {
        rotate: true,
        ..flags.clone()
    })
    .await
    .expect("first run");
    assert_eq!(first.orientation, Orientation::Landscape);

    let second = app::run(flags).await.expect("second run");
    assert_eq!(second.orientation, Orientation::Landscape);
    assert!(!second.surface_secure);
}

#[tokio::test]
async fn run_reports_size_class_and_bars() {
    let config_dir = tempdir().expect("config dir");
    let data_dir = tempdir().expect("data dir");

    let report = app::run(Flags {
        config_dir: dir_flag(config_dir.path()),
        data_dir: dir_flag(data_dir.path()),
        size: Some((1280.0, 800.0)),
        ..Flags::default()
    })
    .await
    .expect("run succeeds");

    assert_eq!(report.size_class.width, SizeClass::Expanded);
    assert_eq!(report.size_class.height, SizeClass::Medium);
    assert!(!report.shows_bottom_bar);
}

#[tokio::test]
async fn run_with_corrupt_config_warns_and_uses_defaults() {
    let config_dir = tempdir().expect("config dir");
    let data_dir = tempdir().expect("data dir");
    std::fs::write(config_dir.path().join(CONFIG_FILE), "not = valid = toml").expect("write");

    let report = app::run(Flags {
        config_dir: dir_flag(config_dir.path()),
        data_dir: dir_flag(data_dir.path()),
        ..Flags::default()
    })
    .await
    .expect("run succeeds");

    assert!(!report.secure_mode);
    assert_eq!(report.warnings, vec![config::CONFIG_LOAD_WARNING.to_string()]);
}

#[tokio::test]
async fn preference_written_on_disk_reaches_a_live_screen() {
    let config_dir = tempdir().expect("config dir");
    let data_dir = tempdir().expect("data dir");
    let (store, _) = SettingsStore::open(Some(config_dir.path().to_path_buf()));
    let controller = SecureFlagController::try_current().expect("runtime");
    let surface = Arc::new(HeadlessSurface::new());

    let (mut screen, _) = MainScreen::create(
        Arc::clone(&surface),
        &store,
        &controller,
        ScreenOptions {
            state_dir: Some(data_dir.path().to_path_buf()),
            width: 412.0,
            height: 915.0,
        },
    );

    let edited = Config {
        privacy: PrivacyConfig {
            secure_mode: Some(true),
        },
        ..Config::default()
    };
    config::save_to_path(&edited, &config_dir.path().join(CONFIG_FILE)).expect("save");
    store.reload().expect("reload");

    tokio::time::timeout(Duration::from_secs(2), async {
        while !surface.is_secure() {
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
    })
    .await
    .expect("surface turned secure");

    assert!(screen.destroy().is_none());
    let (state, warning) = ScreenState::load_from(Some(data_dir.path().to_path_buf()));
    assert!(warning.is_none());
    assert_eq!(state, ScreenState::default());
    assert_eq!(surface.requested_orientation(), Orientation::Unspecified);
}
