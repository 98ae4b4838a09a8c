//! 통합 테스트 공용 하네스.
//!
//! 요소 트리:
//! 1 main (QMainWindow)
//! ├─ 2 player (QWidget, Player)
//! │  └─ 3 Play (QPushButton)
//! ├─ 4 Library (QTableView, Database, 3x2)
//! ├─ 5 Playlists (QListWidget, Playlist, 3)
//! └─ 6 Search (QLineEdit)

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use xfb_a11y_core::config::AccessConfig;
use xfb_a11y_core::models::element::{CellIndex, ContainerInfo, ElementId, ElementSnapshot, Role};
use xfb_a11y_core::models::event::AccessEvent;
use xfb_a11y_core::ports::clock::ManualClock;
use xfb_a11y_core::ports::focus::FocusProvider;
use xfb_a11y_core::ports::settings::SettingsStore;
use xfb_a11y_engine::{AccessCoordinator, CoordinatorPorts, ElementRegistry};
use xfb_a11y_guide::catalog::HelpCatalog;
use xfb_a11y_speech::transcript::TranscriptSpeech;

pub const MAIN: ElementId = ElementId(1);
pub const PLAYER: ElementId = ElementId(2);
pub const PLAY: ElementId = ElementId(3);
pub const LIBRARY: ElementId = ElementId(4);
pub const PLAYLISTS: ElementId = ElementId(5);
pub const SEARCH: ElementId = ElementId(6);

pub struct Harness {
    pub coordinator: AccessCoordinator,
    pub elements: Arc<ElementRegistry>,
    pub speech: Arc<TranscriptSpeech>,
    pub clock: Arc<ManualClock>,
    pub events: Rc<RefCell<Vec<AccessEvent>>>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(AccessConfig::default(), None)
    }

    pub fn with_config(config: AccessConfig, settings: Option<Arc<dyn SettingsStore>>) -> Self {
        let elements = Arc::new(mount_tree());
        let speech = Arc::new(TranscriptSpeech::new());
        let clock = Arc::new(ManualClock::new());
        let mut coordinator = AccessCoordinator::new(
            &config,
            CoordinatorPorts {
                focus: elements.clone(),
                speech: speech.clone(),
                clock: clock.clone(),
                help: Arc::new(HelpCatalog::with_defaults()),
                settings,
            },
        )
        .expect("coordinator");

        let events = Rc::new(RefCell::new(Vec::new()));
        let log = events.clone();
        coordinator.subscribe(move |e| log.borrow_mut().push(e.clone()));

        Self {
            coordinator,
            elements,
            speech,
            clock,
            events,
        }
    }

    pub fn focus(&mut self, id: ElementId) {
        self.elements.set_focus(id).expect("focusable");
        self.coordinator.on_focus_changed(Some(id));
    }

    pub fn press(&mut self, chord: &str) -> bool {
        self.coordinator.on_key_press(chord.parse().expect("chord"))
    }

    /// 시간을 진행하며 주기 처리
    pub fn advance(&mut self, ms: u64) {
        let mut left = ms;
        while left > 0 {
            let step = left.min(100);
            self.clock.advance_ms(step);
            self.coordinator.tick();
            left -= step;
        }
    }

    /// 대기 안내가 모두 나갈 만큼 진행
    pub fn settle(&mut self) {
        self.advance(2_000);
    }

    /// 지금까지 나온 음성을 비우고 반환
    pub fn take_spoken(&mut self) -> Vec<String> {
        let texts = self.speech.texts();
        self.speech.clear();
        texts
    }

    pub fn event_names(&self) -> Vec<&'static str> {
        self.events.borrow().iter().map(|e| e.name()).collect()
    }
}

fn mount_tree() -> ElementRegistry {
    let elements = ElementRegistry::new();
    let snapshots = vec![
        ElementSnapshot::new(MAIN, Role::Window, "QMainWindow").with_object_name("main"),
        ElementSnapshot::new(PLAYER, Role::Pane, "QWidget")
            .with_object_name("player")
            .with_scope("Player")
            .with_parent(MAIN),
        ElementSnapshot::new(PLAY, Role::Button, "QPushButton")
            .with_name("Play")
            .with_parent(PLAYER),
        ElementSnapshot::new(LIBRARY, Role::Grid, "QTableView")
            .with_name("Library")
            .with_scope("Database")
            .with_parent(MAIN)
            .with_container(
                ContainerInfo::grid(3, 2).with_headers(vec!["Title".into(), "Artist".into()]),
            ),
        ElementSnapshot::new(PLAYLISTS, Role::List, "QListWidget")
            .with_name("Playlists")
            .with_scope("Playlist")
            .with_parent(MAIN)
            .with_container(ContainerInfo::list(3)),
        ElementSnapshot::new(SEARCH, Role::TextField, "QLineEdit")
            .with_name("Search")
            .with_parent(MAIN),
    ];
    for snapshot in snapshots {
        elements.mount(snapshot).expect("mount");
    }

    let cells = [
        (0, 0, "Blue Monday"),
        (0, 1, "New Order"),
        (1, 0, "Teardrop"),
        (1, 1, "Massive Attack"),
    ];
    for (row, column, text) in cells {
        elements.set_cell_text(LIBRARY, CellIndex::new(row, column), text);
    }
    for (row, text) in ["Morning Show", "Drive Time", "Late Night Mix"].iter().enumerate() {
        elements.set_cell_text(PLAYLISTS, CellIndex::new(row, 0), *text);
    }
    assert_eq!(elements.focus_chain_len(), 6);
    elements
}
