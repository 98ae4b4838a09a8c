//! 단축키 → 내비게이션 → Tab 탈출 흐름 통합 테스트.

mod common;

use common::*;
use std::cell::RefCell;
use std::rc::Rc;
use xfb_a11y_core::config::AccessConfig;
use xfb_a11y_core::models::element::CellIndex;
use xfb_a11y_core::models::event::AccessEvent;
use xfb_a11y_core::ports::focus::FocusProvider;

#[test]
fn player_shortcut_only_inside_player_scope() {
    let mut h = Harness::new();
    let fired = Rc::new(RefCell::new(0));
    let counter = fired.clone();
    h.coordinator.on_action("play_pause", move |_| *counter.borrow_mut() += 1);

    h.focus(PLAY);
    assert!(h.press("Space"));
    h.focus(SEARCH);
    assert!(!h.press("Space"));

    assert_eq!(*fired.borrow(), 1);
    assert!(h.events.borrow().contains(&AccessEvent::ShortcutTriggered {
        action: "play_pause".to_string(),
        chord: "Space".parse().unwrap(),
        target: Some(PLAY),
    }));
}

#[test]
fn config_override_moves_shortcut() {
    let mut config = AccessConfig::default();
    config
        .shortcuts
        .overrides
        .insert("play_pause".to_string(), "Ctrl+P".parse().unwrap());
    let mut h = Harness::with_config(config, None);

    h.focus(PLAY);
    assert!(!h.press("Space"));
    assert!(h.press("Ctrl+P"));
    assert_eq!(
        h.coordinator.shortcuts().get("play_pause").unwrap().chord.to_string(),
        "Ctrl+P"
    );
}

#[test]
fn rebind_onto_global_chord_is_rejected() {
    let mut h = Harness::new();
    assert!(h
        .coordinator
        .rebind_shortcut("play_pause", "Ctrl+Q".parse().unwrap())
        .is_err());
    assert_eq!(
        h.coordinator.shortcuts().get("play_pause").unwrap().chord.to_string(),
        "Space"
    );
}

#[test]
fn database_grid_walk_then_tab_into_playlist() {
    let mut h = Harness::new();
    h.focus(LIBRARY);
    h.settle();
    assert_eq!(h.take_spoken(), vec!["Library, table"]);

    assert!(h.press("Down"));
    assert!(h.press("Down"));
    assert!(h.press("Right"));
    h.settle();
    assert_eq!(
        h.take_spoken(),
        vec!["Title: Blue Monday", "Title: Teardrop", "Artist: Massive Attack"]
    );
    let current = h.elements.snapshot(LIBRARY).unwrap().container.unwrap().current;
    assert_eq!(current, Some(CellIndex::new(1, 1)));

    assert!(h.press("Tab"));
    h.settle();
    assert_eq!(h.elements.focused(), Some(PLAYLISTS));
    assert_eq!(h.take_spoken(), vec!["Moved to Playlists"]);
    assert!(h.events.borrow().contains(&AccessEvent::TabEscaped {
        from: LIBRARY,
        to: PLAYLISTS,
    }));

    // 목록은 좌우 이동 없음
    assert!(!h.press("Right"));
    assert!(h.press("Down"));
    h.settle();
    assert_eq!(h.take_spoken(), vec!["Column 1: Morning Show"]);
}

#[test]
fn shift_tab_escapes_backwards() {
    let mut h = Harness::new();
    h.focus(LIBRARY);
    assert!(h.press("Shift+Tab"));
    assert_eq!(h.elements.focused(), Some(PLAY));
    assert_eq!(h.coordinator.guide().current_context().unwrap().element, PLAY);
}

#[test]
fn custom_tab_order_wins_over_focus_chain() {
    let mut h = Harness::new();
    h.coordinator.set_custom_tab_order(LIBRARY, SEARCH);
    h.focus(LIBRARY);
    assert!(h.press("Tab"));
    assert_eq!(h.elements.focused(), Some(SEARCH));
}

#[test]
fn custom_tab_order_applies_to_plain_widgets() {
    let mut h = Harness::new();
    h.coordinator.set_custom_tab_order(SEARCH, PLAY);
    h.focus(SEARCH);
    h.settle();
    h.take_spoken();

    assert!(h.press("Tab"));
    assert_eq!(h.elements.focused(), Some(PLAY));
    assert_eq!(h.coordinator.guide().current_context().unwrap().element, PLAY);
    h.settle();
    assert_eq!(h.take_spoken(), vec!["Play, button"]);

    // 순서가 없는 위젯의 Tab 은 호스트에 맡긴다
    assert!(!h.press("Tab"));
    // 역방향에는 사용자 순서를 쓰지 않는다
    h.focus(SEARCH);
    assert!(!h.press("Shift+Tab"));
    assert_eq!(h.elements.focused(), Some(SEARCH));
}

#[test]
fn shortcut_listing_follows_focus_scope() {
    let mut h = Harness::new();
    h.focus(LIBRARY);
    h.settle();
    h.take_spoken();

    assert!(h.press("Ctrl+Shift+Comma"));
    h.settle();
    let spoken = h.take_spoken();
    assert_eq!(spoken.len(), 1);
    assert!(spoken[0].starts_with("33 shortcuts available."));
    assert!(spoken[0].contains("F5 Refresh database"));
    assert!(!spoken[0].contains("Play/Pause"));
}

#[test]
fn unbound_keys_still_reach_the_guide() {
    let mut h = Harness::new();
    h.focus(SEARCH);
    h.press("Tab");
    h.press("F1");
    let recent = h.coordinator.guide().tracker().recent_actions();
    assert_eq!(recent, vec!["key:Tab".to_string(), "help".to_string()]);
}
