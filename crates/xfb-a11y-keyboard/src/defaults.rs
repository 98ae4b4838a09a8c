//! 기본 단축키 표.
//!
//! 충돌하는 기본값은 경고 후 건너뛴다 (예: Playlist 의 Ctrl+Q 는 Global 의 quit 과 겹친다).

use crate::registry::{ShortcutBinding, ShortcutRegistry, ShortcutScope};
use tracing::{info, warn};
use xfb_a11y_core::error::CoreError;
use xfb_a11y_core::models::chord::KeyChord;

pub const SCOPE_PLAYER: &str = "Player";
pub const SCOPE_DATABASE: &str = "Database";
pub const SCOPE_PLAYLIST: &str = "Playlist";

/// (액션, 키 조합, 설명, 범위 None = Global)
type DefaultEntry = (&'static str, &'static str, &'static str, Option<&'static str>);

const DEFAULT_SHORTCUTS: &[DefaultEntry] = &[
    // 전역
    ("help", "F1", "Show help", None),
    ("quit", "Ctrl+Q", "Quit application", None),
    ("preferences", "Ctrl+Comma", "Open preferences", None),
    ("menu_bar", "Alt+M", "Access main menu bar", None),
    ("library", "Alt+L", "Jump to music library", None),
    ("playlist", "Alt+P", "Jump to playlist area", None),
    ("controls", "Alt+C", "Jump to player controls", None),
    ("status", "Alt+S", "Jump to status bar", None),
    // 플레이어
    ("play_pause", "Space", "Play/Pause", Some(SCOPE_PLAYER)),
    ("stop", "Ctrl+Space", "Stop playback", Some(SCOPE_PLAYER)),
    ("next_track", "Ctrl+Right", "Next track", Some(SCOPE_PLAYER)),
    ("previous_track", "Ctrl+Left", "Previous track", Some(SCOPE_PLAYER)),
    ("volume_up", "Ctrl+Up", "Volume up", Some(SCOPE_PLAYER)),
    ("volume_down", "Ctrl+Down", "Volume down", Some(SCOPE_PLAYER)),
    ("volume_up_fine", "Ctrl+Shift+Up", "Volume up (fine)", Some(SCOPE_PLAYER)),
    ("volume_down_fine", "Ctrl+Shift+Down", "Volume down (fine)", Some(SCOPE_PLAYER)),
    ("mute", "Ctrl+M", "Mute/Unmute", Some(SCOPE_PLAYER)),
    ("reset_volume", "Ctrl+0", "Reset volume to 100%", Some(SCOPE_PLAYER)),
    ("fast_forward", "Ctrl+Shift+Right", "Seek forward 10 seconds", Some(SCOPE_PLAYER)),
    ("rewind", "Ctrl+Shift+Left", "Seek backward 10 seconds", Some(SCOPE_PLAYER)),
    ("current_time", "Ctrl+T", "Announce current time", Some(SCOPE_PLAYER)),
    ("remaining_time", "Ctrl+Shift+T", "Announce remaining time", Some(SCOPE_PLAYER)),
    ("total_duration", "Ctrl+Alt+T", "Announce total duration", Some(SCOPE_PLAYER)),
    ("track_info", "Ctrl+D", "Announce track details", Some(SCOPE_PLAYER)),
    ("next_track_legacy", "N", "Next track (legacy)", Some(SCOPE_PLAYER)),
    ("previous_track_legacy", "P", "Previous track (legacy)", Some(SCOPE_PLAYER)),
    ("volume_up_legacy", "Plus", "Volume up (legacy)", Some(SCOPE_PLAYER)),
    ("volume_down_legacy", "Minus", "Volume down (legacy)", Some(SCOPE_PLAYER)),
    ("mute_legacy", "M", "Mute/Unmute (legacy)", Some(SCOPE_PLAYER)),
    // 데이터베이스
    ("refresh_database", "F5", "Refresh database", Some(SCOPE_DATABASE)),
    ("search", "Ctrl+F", "Search", Some(SCOPE_DATABASE)),
    ("find_next", "F3", "Find next", Some(SCOPE_DATABASE)),
    ("find_previous", "Shift+F3", "Find previous", Some(SCOPE_DATABASE)),
    ("advanced_search", "Ctrl+Shift+F", "Advanced search", Some(SCOPE_DATABASE)),
    ("clear_search", "Escape", "Clear search", Some(SCOPE_DATABASE)),
    ("add_to_playlist", "Enter", "Add to playlist", Some(SCOPE_DATABASE)),
    ("delete_item", "Delete", "Delete item", Some(SCOPE_DATABASE)),
    ("track_information", "Ctrl+I", "Track information", Some(SCOPE_DATABASE)),
    ("rename", "F2", "Rename", Some(SCOPE_DATABASE)),
    ("library_settings", "Ctrl+Shift+L", "Library settings", Some(SCOPE_DATABASE)),
    ("add_directory", "Ctrl+Shift+A", "Add directory", Some(SCOPE_DATABASE)),
    ("refresh_library", "Ctrl+Shift+R", "Refresh library", Some(SCOPE_DATABASE)),
    // 재생목록
    ("new_playlist", "Ctrl+N", "New playlist", Some(SCOPE_PLAYLIST)),
    ("new_smart_playlist", "Ctrl+Shift+N", "New smart playlist", Some(SCOPE_PLAYLIST)),
    ("save_playlist", "Ctrl+S", "Save playlist", Some(SCOPE_PLAYLIST)),
    ("save_as_playlist", "Ctrl+Shift+S", "Save playlist as", Some(SCOPE_PLAYLIST)),
    ("load_playlist", "Ctrl+O", "Load playlist", Some(SCOPE_PLAYLIST)),
    ("close_playlist", "Ctrl+W", "Close playlist", Some(SCOPE_PLAYLIST)),
    ("duplicate_playlist", "Ctrl+D", "Duplicate playlist", Some(SCOPE_PLAYLIST)),
    ("rename_playlist", "Ctrl+R", "Rename playlist", Some(SCOPE_PLAYLIST)),
    ("clear_playlist", "Ctrl+L", "Clear playlist", Some(SCOPE_PLAYLIST)),
    ("cut", "Ctrl+X", "Cut", Some(SCOPE_PLAYLIST)),
    ("copy", "Ctrl+C", "Copy", Some(SCOPE_PLAYLIST)),
    ("paste", "Ctrl+V", "Paste", Some(SCOPE_PLAYLIST)),
    ("select_all", "Ctrl+A", "Select all", Some(SCOPE_PLAYLIST)),
    ("undo", "Ctrl+Z", "Undo", Some(SCOPE_PLAYLIST)),
    ("redo", "Ctrl+Y", "Redo", Some(SCOPE_PLAYLIST)),
    ("add_to_queue", "Ctrl+Q", "Add to queue", Some(SCOPE_PLAYLIST)),
    ("clear_queue", "Ctrl+Shift+Q", "Clear queue", Some(SCOPE_PLAYLIST)),
    ("show_queue", "Ctrl+Alt+Q", "Show queue", Some(SCOPE_PLAYLIST)),
    // 접근성
    ("toggle_verbosity", "Ctrl+Shift+V", "Toggle verbosity", None),
    ("mute_announcements", "Ctrl+Shift+M", "Mute announcements", None),
    ("unmute_announcements", "Ctrl+Shift+U", "Unmute announcements", None),
    ("repeat_last", "Ctrl+Alt+A", "Repeat last announcement", None),
    ("where_am_i", "Ctrl+?", "Where am I", None),
    ("whats_this", "Ctrl+Shift+?", "What's this", None),
    ("help_context", "Ctrl+Alt+?", "Help context", None),
    ("context_help", "Shift+F1", "Context help for the focused control", None),
    ("start_workflow", "Ctrl+F1", "Start guided tutorial", None),
    ("cancel_workflow", "Ctrl+Shift+F1", "Cancel guided tutorial", None),
    ("accessibility_settings", "Ctrl+Alt+Comma", "Accessibility settings", None),
    ("keyboard_shortcuts", "Ctrl+Shift+Comma", "Keyboard shortcuts", None),
];

/// 기본 단축키 설치
///
/// 등록에 실패한 항목(충돌)은 건너뛰고 (액션, 에러) 목록으로 반환한다.
pub fn install_default_shortcuts(registry: &mut ShortcutRegistry) -> Vec<(String, CoreError)> {
    let mut skipped = Vec::new();
    for (action, chord, description, scope) in DEFAULT_SHORTCUTS {
        let result = KeyChord::parse(chord).and_then(|chord| {
            let scope = scope.map_or(ShortcutScope::Global, ShortcutScope::context);
            registry.register(ShortcutBinding::new(*action, chord, *description).in_scope(scope))
        });
        if let Err(e) = result {
            warn!("기본 단축키 건너뜀 {}: {}", action, e);
            skipped.push((action.to_string(), e));
        }
    }
    info!(
        "기본 단축키 설치: {}개 등록, {}개 건너뜀",
        registry.len(),
        skipped.len()
    );
    skipped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chord(s: &str) -> KeyChord {
        s.parse().unwrap()
    }

    #[test]
    fn defaults_install_with_expected_skips() {
        let mut registry = ShortcutRegistry::new();
        let skipped = install_default_shortcuts(&mut registry);

        let names: Vec<&str> = skipped.iter().map(|(a, _)| a.as_str()).collect();
        assert_eq!(names, vec!["add_to_queue"]);
        assert_eq!(registry.len(), DEFAULT_SHORTCUTS.len() - 1);
    }

    #[test]
    fn space_and_ctrl_space_in_player() {
        let mut registry = ShortcutRegistry::new();
        install_default_shortcuts(&mut registry);
        let player = vec![SCOPE_PLAYER.to_string()];

        assert_eq!(registry.resolve(&chord("Space"), &player).unwrap().action, "play_pause");
        assert_eq!(registry.resolve(&chord("Ctrl+Space"), &player).unwrap().action, "stop");
    }

    #[test]
    fn global_bindings_active_everywhere() {
        let mut registry = ShortcutRegistry::new();
        install_default_shortcuts(&mut registry);

        assert_eq!(registry.resolve(&chord("F1"), &[]).unwrap().action, "help");
        assert_eq!(
            registry
                .resolve(&chord("Ctrl+Q"), &[SCOPE_PLAYLIST.to_string()])
                .unwrap()
                .action,
            "quit"
        );
        assert_eq!(
            registry.resolve(&chord("Ctrl+Alt+A"), &[]).unwrap().action,
            "repeat_last"
        );
    }

    #[test]
    fn all_default_chords_parse() {
        for (action, chord, _, _) in DEFAULT_SHORTCUTS {
            assert!(KeyChord::parse(chord).is_ok(), "{action}: {chord}");
        }
    }
}
