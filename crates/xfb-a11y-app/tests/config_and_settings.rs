//! 설정 파일 로드 및 도움말 설정 영속화 통합 테스트.

mod common;

use common::*;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use xfb_a11y_core::config_manager::ConfigManager;
use xfb_a11y_core::models::announcement::Verbosity;
use xfb_a11y_core::models::guide::{HelpMode, HelpSettings};
use xfb_a11y_core::ports::settings::SettingsStore;

fn open(dir: &TempDir) -> ConfigManager {
    ConfigManager::with_path(dir.path().join("accessibility.json")).unwrap()
}

fn harness_for(manager: &ConfigManager) -> Harness {
    let store: Arc<dyn SettingsStore> = Arc::new(manager.clone());
    Harness::with_config(manager.get(), Some(store))
}

#[test]
fn help_settings_survive_restart() {
    let dir = TempDir::new().unwrap();
    {
        let manager = open(&dir);
        let mut h = harness_for(&manager);
        assert_eq!(h.coordinator.help_settings(), HelpSettings::default());

        h.coordinator.set_help_mode(HelpMode::Progressive);
        h.coordinator.shutdown().unwrap();
    }

    let manager = open(&dir);
    assert_eq!(manager.get().help.help_mode, HelpMode::Progressive);
    assert!(manager.get().help.auto_help_enabled);

    let h = harness_for(&manager);
    assert_eq!(
        h.coordinator.help_settings(),
        HelpSettings {
            help_mode: HelpMode::Progressive,
            auto_help_enabled: true,
        }
    );
}

#[test]
fn saved_auto_help_flag_beats_mode_default() {
    let dir = TempDir::new().unwrap();
    let manager = open(&dir);
    manager
        .update_with(|c| {
            c.help.help_mode = HelpMode::Automatic;
            c.help.auto_help_enabled = false;
        })
        .unwrap();

    let mut h = harness_for(&manager);
    assert_eq!(h.coordinator.help_settings().help_mode, HelpMode::Automatic);
    assert!(!h.coordinator.help_settings().auto_help_enabled);

    h.focus(LIBRARY);
    h.advance(8_000);
    assert_eq!(h.take_spoken(), vec!["Library, table"]);
}

#[test]
fn hand_written_config_applies_overrides() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("accessibility.json");
    fs::write(
        &path,
        r#"{
            "navigation": { "verbosity": "Terse", "announce_edges": true },
            "shortcuts": { "overrides": { "where_am_i": "F12" } }
        }"#,
    )
    .unwrap();

    let manager = ConfigManager::with_path(path).unwrap();
    let config = manager.get();
    assert_eq!(config.navigation.verbosity, Verbosity::Terse);
    assert_eq!(config.announcer.max_queue_size, 50);

    let mut h = harness_for(&manager);
    h.focus(LIBRARY);
    h.settle();
    assert_eq!(h.take_spoken(), vec!["Library"]);

    // 0행에서 위쪽: 경계 안내
    h.press("Down");
    h.press("Up");
    h.settle();
    assert_eq!(h.take_spoken(), vec!["Blue Monday", "First row"]);

    assert!(!h.press("Ctrl+?"));
    assert!(h.press("F12"));
}

#[test]
fn broken_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("accessibility.json");
    fs::write(&path, "{ not json").unwrap();
    assert!(ConfigManager::with_path(path).is_err());
}

#[test]
fn shutdown_without_store_is_fine() {
    let mut h = Harness::new();
    h.coordinator.announce("pending", xfb_a11y_core::models::announcement::Priority::Low);
    h.coordinator.shutdown().unwrap();
    assert_eq!(h.coordinator.scheduler().queue_len(), 0);
}
