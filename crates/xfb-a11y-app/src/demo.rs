//! 데모 시나리오.
//!
//! 위젯 툴킷 없이 XFB 메인 창과 비슷한 요소 트리를 마운트하고,
//! 정해진 시각에 포커스 변경과 키 입력을 코디네이터로 흘려보낸다.

use anyhow::{Context, Result};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use xfb_a11y_core::models::chord::KeyChord;
use xfb_a11y_core::models::element::{CellIndex, ContainerInfo, ElementId, ElementSnapshot, Role};
use xfb_a11y_core::ports::focus::FocusProvider;
use xfb_a11y_engine::{AccessCoordinator, ElementRegistry};
use xfb_a11y_keyboard::defaults::{SCOPE_DATABASE, SCOPE_PLAYER, SCOPE_PLAYLIST};

/// 데모 트리의 주요 요소
#[derive(Debug, Clone, Copy)]
pub struct DemoUi {
    pub window: ElementId,
    pub player: ElementId,
    pub play: ElementId,
    pub stop: ElementId,
    pub library: ElementId,
    pub playlist: ElementId,
    pub search: ElementId,
}

const LIBRARY: &[(&str, &str)] = &[
    ("Blue Monday", "New Order"),
    ("Teardrop", "Massive Attack"),
    ("Windowlicker", "Aphex Twin"),
];

const PLAYLIST: &[&str] = &["Morning Show", "Drive Time", "Late Night Mix"];

impl DemoUi {
    /// 요소 트리 마운트
    pub fn mount(elements: &ElementRegistry) -> Result<Self> {
        let window = elements.allocate_id();
        elements.mount(
            ElementSnapshot::new(window, Role::Window, "QMainWindow")
                .with_object_name("main_window")
                .with_name("XFB"),
        )?;

        let player = elements.allocate_id();
        elements.mount(
            ElementSnapshot::new(player, Role::Pane, "QWidget")
                .with_object_name("player")
                .with_name("Player")
                .with_scope(SCOPE_PLAYER)
                .with_parent(window),
        )?;

        let play = elements.allocate_id();
        elements.mount(
            ElementSnapshot::new(play, Role::Button, "QPushButton")
                .with_name("Play")
                .with_description("Start or pause playback")
                .with_parent(player),
        )?;

        let stop = elements.allocate_id();
        elements.mount(
            ElementSnapshot::new(stop, Role::Button, "QPushButton")
                .with_name("Stop")
                .with_parent(player),
        )?;

        let library = elements.allocate_id();
        elements.mount(
            ElementSnapshot::new(library, Role::Grid, "QTableView")
                .with_object_name("music_library")
                .with_name("Music library")
                .with_scope(SCOPE_DATABASE)
                .with_parent(window)
                .with_container(
                    ContainerInfo::grid(LIBRARY.len(), 2)
                        .with_headers(vec!["Title".to_string(), "Artist".to_string()]),
                ),
        )?;
        for (row, (title, artist)) in LIBRARY.iter().enumerate() {
            elements.set_cell_text(library, CellIndex::new(row, 0), *title);
            elements.set_cell_text(library, CellIndex::new(row, 1), *artist);
        }

        let playlist = elements.allocate_id();
        elements.mount(
            ElementSnapshot::new(playlist, Role::List, "QListWidget")
                .with_name("Playlists")
                .with_scope(SCOPE_PLAYLIST)
                .with_parent(window)
                .with_container(ContainerInfo::list(PLAYLIST.len())),
        )?;
        for (row, name) in PLAYLIST.iter().enumerate() {
            elements.set_cell_text(playlist, CellIndex::new(row, 0), *name);
        }

        let search = elements.allocate_id();
        elements.mount(
            ElementSnapshot::new(search, Role::TextField, "QLineEdit")
                .with_name("Search")
                .with_parent(window),
        )?;

        info!("데모 요소 {}개 마운트", elements.len());
        Ok(Self {
            window,
            player,
            play,
            stop,
            library,
            playlist,
            search,
        })
    }
}

/// 시나리오 한 단계의 입력
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DemoAction {
    /// 툴킷이 포커스를 옮긴 것처럼 처리
    Focus(ElementId),
    Key(KeyChord),
}

#[derive(Debug, Clone)]
pub struct DemoStep {
    /// 시작 시각 기준 오프셋
    pub at: Duration,
    pub action: DemoAction,
}

/// 시나리오 진행기
pub struct DemoScript {
    steps: Vec<DemoStep>,
    next: usize,
    started: Option<Instant>,
}

impl DemoScript {
    pub fn new(steps: Vec<DemoStep>) -> Self {
        Self {
            steps,
            next: 0,
            started: None,
        }
    }

    /// 재생 → 튜토리얼 → 그리드 탐색 → Tab 탈출 → 도움말 순서의 기본 시나리오
    pub fn standard(ui: &DemoUi) -> Result<Self> {
        let mut steps = Vec::new();
        let mut focus = |ms: u64, id: ElementId| {
            steps.push(DemoStep {
                at: Duration::from_millis(ms),
                action: DemoAction::Focus(id),
            });
        };
        focus(0, ui.play);
        focus(2_000, ui.library);
        focus(11_000, ui.play);
        focus(17_000, ui.search);

        let keys: &[(u64, &str)] = &[
            (1_000, "Space"),
            (3_000, "Ctrl+F1"),
            (4_500, "Down"),
            (5_300, "Right"),
            (6_500, "Tab"),
            (8_000, "F1"),
            (9_500, "Shift+F1"),
            (12_000, "Ctrl+F1"),
            (13_000, "Ctrl+?"),
            (14_000, "Ctrl+Shift+V"),
            (15_000, "Ctrl+Alt+A"),
            (16_000, "Ctrl+Shift+F1"),
        ];
        for (ms, chord) in keys {
            let chord = KeyChord::parse(chord).with_context(|| format!("데모 키 파싱 실패: {chord}"))?;
            steps.push(DemoStep {
                at: Duration::from_millis(*ms),
                action: DemoAction::Key(chord),
            });
        }

        steps.sort_by_key(|s| s.at);
        Ok(Self::new(steps))
    }

    pub fn is_finished(&self) -> bool {
        self.next >= self.steps.len()
    }

    pub fn remaining(&self) -> usize {
        self.steps.len() - self.next
    }

    /// 시각이 된 단계를 모두 실행. 첫 호출 시각이 시작 시각이 된다
    pub fn poll(&mut self, now: Instant, coordinator: &mut AccessCoordinator, elements: &ElementRegistry) {
        let started = *self.started.get_or_insert(now);
        let elapsed = now.saturating_duration_since(started);
        while let Some(step) = self.steps.get(self.next) {
            if step.at > elapsed {
                break;
            }
            apply(&step.action, coordinator, elements);
            self.next += 1;
        }
    }
}

fn apply(action: &DemoAction, coordinator: &mut AccessCoordinator, elements: &ElementRegistry) {
    match action {
        DemoAction::Focus(id) => match elements.set_focus(*id) {
            Ok(()) => coordinator.on_focus_changed(Some(*id)),
            Err(e) => warn!("데모 포커스 실패 {}: {}", id, e),
        },
        DemoAction::Key(chord) => {
            let handled = coordinator.on_key_press(*chord);
            debug!("데모 키 {} (처리={})", chord, handled);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use xfb_a11y_core::config::AccessConfig;
    use xfb_a11y_core::ports::clock::{Clock, ManualClock};
    use xfb_a11y_engine::CoordinatorPorts;
    use xfb_a11y_guide::catalog::HelpCatalog;
    use xfb_a11y_speech::transcript::TranscriptSpeech;

    #[test]
    fn ui_tree_is_mounted_with_scopes() {
        let elements = ElementRegistry::new();
        let ui = DemoUi::mount(&elements).unwrap();
        assert_eq!(elements.len(), 7);
        assert_eq!(
            elements.snapshot(ui.player).unwrap().shortcut_scope.as_deref(),
            Some(SCOPE_PLAYER)
        );
        assert_eq!(
            elements.cell_text(ui.library, CellIndex::new(1, 1)).as_deref(),
            Some("Massive Attack")
        );
        assert_eq!(elements.snapshot(ui.stop).unwrap().parent, Some(ui.player));
    }

    #[test]
    fn standard_script_runs_to_completion() {
        let elements = Arc::new(ElementRegistry::new());
        let ui = DemoUi::mount(&elements).unwrap();
        let speech = Arc::new(TranscriptSpeech::new());
        let clock = Arc::new(ManualClock::new());
        let mut coordinator = AccessCoordinator::new(
            &AccessConfig::default(),
            CoordinatorPorts {
                focus: elements.clone(),
                speech: speech.clone(),
                clock: clock.clone(),
                help: Arc::new(HelpCatalog::with_defaults()),
                settings: None,
            },
        )
        .unwrap();

        let mut script = DemoScript::standard(&ui).unwrap();
        for _ in 0..300 {
            script.poll(clock.now(), &mut coordinator, &elements);
            coordinator.tick();
            clock.advance_ms(100);
        }

        assert!(script.is_finished());
        assert_eq!(script.remaining(), 0);
        let texts = speech.texts();
        assert!(texts.iter().any(|t| t == "Play, button"));
        assert!(texts.iter().any(|t| t.starts_with("Started guided workflow: First Time User Guide")));
        assert!(texts.iter().any(|t| t.starts_with("Moved to")));
        assert!(texts.iter().any(|t| t.starts_with("Congratulations!")));
        assert!(texts.iter().any(|t| t == "No guided workflow is running."));
        assert!(!coordinator.guide().workflows().is_active());
        assert_eq!(elements.focused(), Some(ui.search));
    }
}
