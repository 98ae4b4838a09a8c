//! 메모리 내 도움말 목록 (Help Content Provider 어댑터).

use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::debug;
use xfb_a11y_core::models::guide::HelpContent;
use xfb_a11y_core::ports::help::HelpContentProvider;

/// (ID, 제목, 본문)
const DEFAULT_CONTENT: &[(&str, &str, &str)] = &[
    (
        "getting_started_overview",
        "Getting Started with XFB",
        "Press F1 at any time to open help. Press Shift+F1 for help on the current control. \
         Press Ctrl+F1 to start a guided tutorial for the current area.",
    ),
    (
        "player_controls_overview",
        "Player Controls",
        "Space toggles play and pause. Ctrl+Space stops playback. Ctrl+Right and Ctrl+Left \
         move to the next or previous track. Ctrl+Up and Ctrl+Down change the volume. \
         Ctrl+T announces the current playback time.",
    ),
    (
        "database_management_overview",
        "Database Management",
        "Use the arrow keys to move between cells. F2 edits the current cell and Enter \
         confirms. Ctrl+F searches the library and F5 refreshes it. Tab leaves the grid.",
    ),
    (
        "playlist_management_overview",
        "Playlist Management",
        "Use Up and Down to move between tracks. Ctrl+C, Ctrl+X and Ctrl+V copy, cut and \
         paste tracks. Ctrl+S saves the playlist. Tab leaves the list.",
    ),
    (
        "general_controls_help",
        "Buttons",
        "Press Enter or Space to activate the focused button. Tab moves to the next control.",
    ),
    (
        "text_input_help",
        "Text Input",
        "Type to enter text. Tab moves to the next field and Shift+Tab to the previous one.",
    ),
    (
        "keyboard_shortcuts_reference",
        "Keyboard Shortcuts Reference",
        "F1 shows help, Shift+F1 gives context help, Ctrl+Q quits and Ctrl+Comma opens \
         preferences. Ctrl+Shift+Comma lists every shortcut for the current area.",
    ),
    (
        "accessibility_features_overview",
        "Accessibility Features",
        "Ctrl+Shift+V cycles verbosity between terse, normal and verbose. Ctrl+Shift+M mutes \
         announcements and Ctrl+Shift+U unmutes them. Ctrl+Alt+A repeats the last announcement.",
    ),
];

#[derive(Debug, Default)]
pub struct HelpCatalog {
    entries: RwLock<BTreeMap<String, HelpContent>>,
}

impl HelpCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 기본 도움말이 채워진 목록
    pub fn with_defaults() -> Self {
        let catalog = Self::new();
        for (id, title, body) in DEFAULT_CONTENT {
            catalog.insert(HelpContent {
                id: id.to_string(),
                title: title.to_string(),
                body: body.to_string(),
            });
        }
        catalog
    }

    /// 본문 추가/대체
    pub fn insert(&self, content: HelpContent) {
        debug!("도움말 등록: {}", content.id);
        self.entries.write().insert(content.id.clone(), content);
    }

    pub fn remove(&self, id: &str) -> Option<HelpContent> {
        self.entries.write().remove(id)
    }

    /// 제목/본문 검색 (대소문자 무시, 제목 일치 우선)
    pub fn search(&self, query: &str) -> Vec<HelpContent> {
        let query = query.trim().to_lowercase();
        if query.is_empty() {
            return Vec::new();
        }
        let entries = self.entries.read();
        let (mut by_title, by_body): (Vec<_>, Vec<_>) = entries
            .values()
            .filter(|c| {
                c.title.to_lowercase().contains(&query) || c.body.to_lowercase().contains(&query)
            })
            .cloned()
            .partition(|c| c.title.to_lowercase().contains(&query));
        by_title.extend(by_body);
        by_title
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl HelpContentProvider for HelpCatalog {
    fn resolve(&self, help_id: &str) -> Option<HelpContent> {
        self.entries.read().get(help_id).cloned()
    }
}
