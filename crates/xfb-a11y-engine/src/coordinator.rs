//! 접근성 코디네이터.
//!
//! 포커스 변경과 키 입력을 받아 단축키 디스패치, 그리드 내비게이션, Tab 탈출,
//! 컨텍스트 가이드, 안내 스케줄러로 흘려보내는 단일 진입점.
//!
//! ```text
//! Focus Provider ─▶ GuideEngine ─▶ AnnouncementScheduler ─▶ Speech Output
//! Key Input ─▶ ShortcutDispatcher ─▶ (없으면) GridNavigator / TabNavigator
//!                     └──────────────▶ GuideEngine::on_user_action
//! ```

use crate::event_bus::{EventBus, SubscriptionId};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn, Span};
use xfb_a11y_core::config::AccessConfig;
use xfb_a11y_core::error::CoreError;
use xfb_a11y_core::models::announcement::{Priority, Verbosity};
use xfb_a11y_core::models::chord::{Key, KeyChord, Modifiers};
use xfb_a11y_core::models::element::{ContainerKind, ElementId, ElementSnapshot};
use xfb_a11y_core::models::event::AccessEvent;
use xfb_a11y_core::models::guide::{HelpMode, HelpSettings};
use xfb_a11y_core::ports::announcer::Announcer;
use xfb_a11y_core::ports::clock::Clock;
use xfb_a11y_core::ports::focus::FocusProvider;
use xfb_a11y_core::ports::help::HelpContentProvider;
use xfb_a11y_core::ports::settings::SettingsStore;
use xfb_a11y_core::ports::speech::SpeechOutput;
use xfb_a11y_guide::context::ContextChange;
use xfb_a11y_guide::GuideEngine;
use xfb_a11y_keyboard::defaults::install_default_shortcuts;
use xfb_a11y_keyboard::dispatcher::ShortcutDispatcher;
use xfb_a11y_keyboard::navigation::{Direction, GridNavigator, Movement, NavigationOptions};
use xfb_a11y_keyboard::registry::{ShortcutBinding, ShortcutRegistry, ShortcutScope};
use xfb_a11y_keyboard::tab_escape::TabNavigator;
use xfb_a11y_speech::scheduler::AnnouncementScheduler;

/// 코디네이터가 사용하는 외부 포트 묶음
pub struct CoordinatorPorts {
    pub focus: Arc<dyn FocusProvider>,
    pub speech: Arc<dyn SpeechOutput>,
    pub clock: Arc<dyn Clock>,
    pub help: Arc<dyn HelpContentProvider>,
    /// 없으면 도움말 설정을 복원/저장하지 않는다
    pub settings: Option<Arc<dyn SettingsStore>>,
}

/// 포커스 설명 문구
pub fn describe_focus(element: &ElementSnapshot, verbosity: Verbosity) -> String {
    let name = element.display_name();
    match verbosity {
        Verbosity::Terse => name.to_string(),
        Verbosity::Normal => format!("{}, {}", name, element.role.label()),
        Verbosity::Verbose => {
            let mut text = format!("{}, {}", name, element.role.label());
            if !element.description.is_empty() {
                text.push_str(", ");
                text.push_str(&element.description);
            }
            if let Some(container) = &element.container {
                match container.kind {
                    ContainerKind::Grid => text.push_str(&format!(
                        ", {} rows, {} columns",
                        container.rows, container.columns
                    )),
                    ContainerKind::List => {
                        text.push_str(&format!(", {} items", container.rows))
                    }
                }
            }
            text
        }
    }
}

/// 요소와 조상이 선언한 단축키 범위 (안쪽부터)
pub fn active_scopes(focus: &dyn FocusProvider, element: Option<ElementId>) -> Vec<String> {
    let mut scopes = Vec::new();
    let mut cursor = element;
    let mut hops = 0;
    while let Some(id) = cursor {
        let Some(snapshot) = focus.snapshot(id) else {
            break;
        };
        if let Some(scope) = snapshot.shortcut_scope.filter(|s| !s.is_empty()) {
            if !scopes.contains(&scope) {
                scopes.push(scope);
            }
        }
        hops += 1;
        if hops > focus.focus_chain_len() {
            break;
        }
        cursor = snapshot.parent;
    }
    scopes
}

pub struct AccessCoordinator {
    focus: Arc<dyn FocusProvider>,
    dispatcher: ShortcutDispatcher,
    navigator: GridNavigator,
    tabs: TabNavigator,
    scheduler: AnnouncementScheduler,
    guide: GuideEngine,
    bus: EventBus,
    settings: Option<Arc<dyn SettingsStore>>,
    navigation: NavigationOptions,
    span: Span,
}

impl AccessCoordinator {
    pub fn new(config: &AccessConfig, ports: CoordinatorPorts) -> Result<Self, CoreError> {
        Self::with_span(config, ports, tracing::info_span!("a11y"))
    }

    /// 로그 span 지정. 각 구성 요소는 이 span 의 자식 span 을 받는다
    pub fn with_span(
        config: &AccessConfig,
        ports: CoordinatorPorts,
        span: Span,
    ) -> Result<Self, CoreError> {
        let mut registry = ShortcutRegistry::with_span(tracing::info_span!(parent: &span, "shortcuts"));
        if config.shortcuts.install_defaults {
            let skipped = install_default_shortcuts(&mut registry);
            for (action, e) in &skipped {
                debug!(parent: &span, "기본 단축키 충돌: {} ({})", action, e);
            }
        }
        registry.apply_overrides(&config.shortcuts.overrides);

        let scheduler = AnnouncementScheduler::with_span(
            config.announcer.clone(),
            ports.speech,
            ports.clock.clone(),
            tracing::info_span!(parent: &span, "announcer"),
        );

        let mut guide = GuideEngine::with_span(
            config.help.clone(),
            ports.help,
            ports.clock,
            tracing::info_span!(parent: &span, "guide"),
        );
        guide.install_defaults()?;

        if let Some(store) = &ports.settings {
            match store.load_help_settings() {
                Ok(Some(saved)) => {
                    info!(parent: &span, "도움말 설정 복원: {:?}", saved);
                    guide.apply_settings(&saved);
                }
                Ok(None) => {}
                Err(e) => warn!(parent: &span, "도움말 설정 복원 실패: {}", e),
            }
        }

        Ok(Self {
            focus: ports.focus,
            dispatcher: ShortcutDispatcher::with_span(
                registry,
                tracing::info_span!(parent: &span, "dispatcher"),
            ),
            navigator: GridNavigator::with_span(tracing::info_span!(parent: &span, "navigation")),
            tabs: TabNavigator::with_span(tracing::info_span!(parent: &span, "tab_order")),
            scheduler,
            guide,
            bus: EventBus::with_span(tracing::info_span!(parent: &span, "event_bus")),
            settings: ports.settings,
            navigation: NavigationOptions {
                verbosity: config.navigation.verbosity,
                announce_edges: config.navigation.announce_edges,
            },
            span,
        })
    }

    // ============================================================
    // 입력
    // ============================================================

    /// 포커스 변경 (None = 포커스 없음)
    pub fn on_focus_changed(&mut self, element: Option<ElementId>) {
        self.update_context(element, true);
    }

    fn update_context(&mut self, element: Option<ElementId>, describe: bool) {
        let change = self.guide.on_focus_changed(self.focus.as_ref(), element);
        if describe && matches!(change, ContextChange::Entered(_)) {
            if let Some(snapshot) = self.guide.current_context().map(|c| c.snapshot.clone()) {
                let text = describe_focus(&snapshot, self.navigation.verbosity);
                self.scheduler.announce_focus(&text);
            }
        }
        self.publish_guide_events();
    }

    /// 키 입력. 처리했으면 true
    ///
    /// 단축키 → 방향키 내비게이션 → Tab 탈출 순서로 시도한다.
    /// 처리 여부와 관계없이 사용자 액션 하나가 가이드 엔진으로 전달된다.
    pub fn on_key_press(&mut self, chord: KeyChord) -> bool {
        let focused = self.focus.focused();
        let scopes = active_scopes(self.focus.as_ref(), focused);

        let (handled, action) = match self.dispatcher.dispatch(&chord, &scopes, focused) {
            Some(event) => {
                self.bus.publish(&event);
                let action = match &event {
                    AccessEvent::ShortcutTriggered { action, .. } => action.clone(),
                    _ => chord.action_id(),
                };
                self.run_builtin(&action, &scopes);
                (true, action)
            }
            None => (self.handle_unbound_key(chord, focused), chord.action_id()),
        };

        self.guide.on_user_action(&action, &mut self.scheduler);
        self.publish_guide_events();
        handled
    }

    fn handle_unbound_key(&mut self, chord: KeyChord, focused: Option<ElementId>) -> bool {
        let container = focused.filter(|id| {
            self.focus
                .snapshot(*id)
                .is_some_and(|s| s.container.is_some())
        });

        if let (Some(element), Some(direction)) = (container, Direction::from_key(chord.key)) {
            if chord.modifiers.is_empty() {
                return self.navigate(element, direction);
            }
        }

        let backward = Modifiers::shift();
        if chord.key == Key::Tab && (chord.modifiers.is_empty() || chord.modifiers == backward) {
            let forward = chord.modifiers.is_empty();
            if let Some(element) = container {
                return self.escape_container(element, forward);
            }
            return match focused.filter(|_| forward) {
                Some(element) => self.follow_custom_tab(element),
                None => false,
            };
        }

        if chord.modifiers.is_empty() {
            match chord.key {
                Key::Enter => self.scheduler.enqueue("Activated", Priority::Normal),
                Key::Escape => self.scheduler.enqueue("Cancelled", Priority::Normal),
                _ => {}
            }
        }
        false
    }

    fn navigate(&mut self, element: ElementId, direction: Direction) -> bool {
        let result = self.navigator.navigate(
            self.focus.as_ref(),
            element,
            direction,
            self.navigation,
            &mut self.scheduler,
        );
        match result {
            Ok(Movement::Moved(index)) => {
                self.bus
                    .publish(&AccessEvent::SelectionMoved { element, index });
                true
            }
            Ok(movement) => movement.is_handled(),
            Err(e) => {
                warn!(parent: &self.span, "내비게이션 실패 {}: {}", element, e);
                false
            }
        }
    }

    fn escape_container(&mut self, element: ElementId, forward: bool) -> bool {
        match self
            .tabs
            .escape(self.focus.as_ref(), element, forward, &mut self.scheduler)
        {
            Ok(Some(target)) => {
                self.bus.publish(&AccessEvent::TabEscaped {
                    from: element,
                    to: target,
                });
                // "Moved to ..." 가 이미 안내되었으므로 포커스 설명은 생략
                self.update_context(Some(target), false);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!(parent: &self.span, "Tab 탈출 실패 {}: {}", element, e);
                false
            }
        }
    }

    fn follow_custom_tab(&mut self, element: ElementId) -> bool {
        match self.tabs.follow_custom_order(self.focus.as_ref(), element) {
            Ok(Some(target)) => {
                self.update_context(Some(target), true);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!(parent: &self.span, "사용자 Tab 순서 적용 실패 {}: {}", element, e);
                false
            }
        }
    }

    /// 내장 접근성 액션
    fn run_builtin(&mut self, action: &str, scopes: &[String]) {
        match action {
            "help_context" | "context_help" => {
                if let Err(e) = self.guide.show_context_help(&mut self.scheduler) {
                    debug!(parent: &self.span, "컨텍스트 도움말 없음: {}", e);
                }
            }
            "start_workflow" => {
                if let Err(e) = self.guide.start_workflow_for_context(&mut self.scheduler) {
                    debug!(parent: &self.span, "워크플로우 시작 안 됨: {}", e);
                }
            }
            "cancel_workflow" => {
                self.guide.cancel_workflow(&mut self.scheduler);
            }
            "repeat_last" => {
                if !self.scheduler.repeat_last() {
                    self.scheduler.enqueue("Nothing to repeat", Priority::Normal);
                }
            }
            "mute_announcements" => {
                self.scheduler.set_muted(true);
                self.scheduler.enqueue("Announcements muted", Priority::Critical);
            }
            "unmute_announcements" => {
                self.scheduler.set_muted(false);
                self.scheduler.enqueue("Announcements unmuted", Priority::High);
            }
            "toggle_verbosity" => {
                let next = self.navigation.verbosity.cycle();
                self.set_verbosity(next);
                self.scheduler
                    .enqueue(&format!("Verbosity: {}", next.label()), Priority::High);
            }
            "where_am_i" => {
                let text = self.where_am_i();
                self.scheduler.enqueue(&text, Priority::Normal);
            }
            "keyboard_shortcuts" => {
                let text = self.shortcut_summary(scopes);
                self.scheduler.enqueue(&text, Priority::Normal);
            }
            _ => {}
        }
    }

    fn where_am_i(&self) -> String {
        let Some(focused) = self.focus.focused().and_then(|id| self.focus.snapshot(id)) else {
            return "No control has focus".to_string();
        };
        let mut text = describe_focus(&focused, Verbosity::Verbose);
        if let Some(index) = focused.container.as_ref().and_then(|c| c.current) {
            text.push_str(&format!(", row {}, column {}", index.row + 1, index.column + 1));
        }

        let mut parent = focused.parent;
        let mut hops = 0;
        while let Some(snapshot) = parent.and_then(|p| self.focus.snapshot(p)) {
            text.push_str(&format!(", in {}", snapshot.display_name()));
            parent = snapshot.parent;
            hops += 1;
            if hops > self.focus.focus_chain_len() {
                break;
            }
        }

        if let Some((definition, step_index, _)) = self.guide.workflows().current_step() {
            text.push_str(&format!(
                ". {} step {} of {}",
                definition.title,
                step_index + 1,
                definition.steps.len()
            ));
        }
        text
    }

    fn shortcut_summary(&self, scopes: &[String]) -> String {
        let registry = self.dispatcher.registry();
        let active: Vec<&ShortcutBinding> = registry
            .listing()
            .into_iter()
            .filter(|b| match &b.scope {
                ShortcutScope::Global => true,
                ShortcutScope::Context(name) => scopes.contains(name),
            })
            .collect();
        let entries: Vec<String> = active
            .iter()
            .map(|b| format!("{} {}", b.chord, b.description))
            .collect();
        format!("{} shortcuts available. {}", active.len(), entries.join(", "))
    }

    /// 요소 언마운트 후 호출: 묶인 단축키/Tab 순서를 정리하고 컨텍스트를 다시 계산한다
    pub fn on_element_unmounted(&mut self, element: ElementId) {
        self.tabs.forget(element);
        let released = self.dispatcher.registry_mut().release_element(element);
        if released > 0 {
            debug!(parent: &self.span, "요소 {} 에 묶인 단축키 {}개 해제", element, released);
        }

        let stale = self
            .guide
            .current_context()
            .is_some_and(|c| self.focus.snapshot(c.element).is_none());
        if stale {
            self.update_context(self.focus.focused(), false);
        }
    }

    // ============================================================
    // 주기 처리
    // ============================================================

    /// 가이드 타이머 → 스케줄러 순으로 처리
    pub fn tick(&mut self) {
        self.guide.tick(&mut self.scheduler);
        self.publish_guide_events();
        self.scheduler.tick();
    }

    pub fn next_wakeup(&self) -> Option<Instant> {
        match (self.guide.next_wakeup(), self.scheduler.next_wakeup()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// 종료: 도움말 설정 저장
    pub fn shutdown(&mut self) -> Result<(), CoreError> {
        let settings = self.guide.settings();
        self.scheduler.clear();
        if let Some(store) = &self.settings {
            store.save_help_settings(&settings)?;
            info!(parent: &self.span, "도움말 설정 저장: {:?}", settings);
        }
        Ok(())
    }

    fn publish_guide_events(&mut self) {
        for event in self.guide.take_events() {
            self.bus.publish(&event);
        }
    }

    // ============================================================
    // 호스트 API
    // ============================================================

    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&AccessEvent) + 'static,
    {
        self.bus.subscribe(handler)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    /// 앱 액션 핸들러 등록 (예: "play_pause")
    pub fn on_action<F>(&mut self, action: impl Into<String>, handler: F)
    where
        F: FnMut(&ShortcutBinding) + 'static,
    {
        self.dispatcher.on_action(action, handler);
    }

    pub fn register_shortcut(&mut self, binding: ShortcutBinding) -> Result<(), CoreError> {
        self.dispatcher.registry_mut().register(binding)
    }

    pub fn rebind_shortcut(&mut self, action: &str, chord: KeyChord) -> Result<(), CoreError> {
        self.dispatcher.registry_mut().rebind(action, chord)
    }

    pub fn shortcuts(&self) -> &ShortcutRegistry {
        self.dispatcher.registry()
    }

    pub fn set_custom_tab_order(&mut self, first: ElementId, second: ElementId) {
        self.tabs.set_custom_tab_order(first, second);
    }

    /// 앱이 직접 요청하는 안내
    pub fn announce(&mut self, text: &str, priority: Priority) {
        self.scheduler.enqueue(text, priority);
    }

    pub fn verbosity(&self) -> Verbosity {
        self.navigation.verbosity
    }

    pub fn set_verbosity(&mut self, verbosity: Verbosity) {
        info!(parent: &self.span, "상세 수준: {}", verbosity.label());
        self.navigation.verbosity = verbosity;
    }

    pub fn set_help_mode(&mut self, mode: HelpMode) {
        self.guide.set_help_mode(mode);
    }

    pub fn help_settings(&self) -> HelpSettings {
        self.guide.settings()
    }

    pub fn scheduler(&self) -> &AnnouncementScheduler {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut AnnouncementScheduler {
        &mut self.scheduler
    }

    pub fn guide(&self) -> &GuideEngine {
        &self.guide
    }

    pub fn guide_mut(&mut self) -> &mut GuideEngine {
        &mut self.guide
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element_registry::ElementRegistry;
    use std::cell::RefCell;
    use std::rc::Rc;
    use xfb_a11y_core::models::element::{CellIndex, ContainerInfo, Role};
    use xfb_a11y_core::ports::clock::ManualClock;
    use xfb_a11y_guide::catalog::HelpCatalog;
    use xfb_a11y_speech::transcript::TranscriptSpeech;

    struct Harness {
        coordinator: AccessCoordinator,
        elements: Arc<ElementRegistry>,
        speech: Arc<TranscriptSpeech>,
        clock: Arc<ManualClock>,
    }

    impl Harness {
        /// 모든 대기 안내가 나올 때까지 시간 진행
        fn settle(&mut self) {
            for _ in 0..50 {
                self.clock.advance_ms(100);
                self.coordinator.tick();
            }
        }

        fn focus(&mut self, id: u64) {
            self.elements.set_focus(ElementId(id)).unwrap();
            self.coordinator.on_focus_changed(Some(ElementId(id)));
        }

        fn press(&mut self, chord: &str) -> bool {
            self.coordinator.on_key_press(chord.parse().unwrap())
        }
    }

    fn make_harness() -> Harness {
        let elements = Arc::new(ElementRegistry::new());
        elements
            .mount(ElementSnapshot::new(ElementId(1), Role::Window, "QMainWindow").with_object_name("main"))
            .unwrap();
        elements
            .mount(
                ElementSnapshot::new(ElementId(2), Role::Pane, "QWidget")
                    .with_object_name("player")
                    .with_scope("Player")
                    .with_parent(ElementId(1)),
            )
            .unwrap();
        elements
            .mount(
                ElementSnapshot::new(ElementId(3), Role::Button, "QPushButton")
                    .with_name("Play")
                    .with_parent(ElementId(2)),
            )
            .unwrap();
        elements
            .mount(
                ElementSnapshot::new(ElementId(4), Role::Grid, "QTableView")
                    .with_name("Library")
                    .with_scope("Database")
                    .with_parent(ElementId(1))
                    .with_container(
                        ContainerInfo::grid(3, 2).with_headers(vec!["Title".into(), "Artist".into()]),
                    ),
            )
            .unwrap();
        elements
            .mount(
                ElementSnapshot::new(ElementId(5), Role::TextField, "QLineEdit")
                    .with_name("Search")
                    .with_parent(ElementId(1)),
            )
            .unwrap();
        elements.set_cell_text(ElementId(4), CellIndex::new(0, 0), "Blue Monday");

        let speech = Arc::new(TranscriptSpeech::new());
        let clock = Arc::new(ManualClock::new());
        let coordinator = AccessCoordinator::new(
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

        Harness {
            coordinator,
            elements,
            speech,
            clock,
        }
    }

    #[test]
    fn focus_change_is_described_after_debounce() {
        let mut h = make_harness();
        h.focus(3);
        h.focus(5);
        h.settle();
        assert_eq!(h.speech.texts(), vec!["Search, edit text"]);
        assert_eq!(h.coordinator.scheduler().stats().superseded, 1);
    }

    #[test]
    fn scoped_shortcut_dispatches_from_descendant() {
        let mut h = make_harness();
        let fired = Rc::new(RefCell::new(Vec::new()));
        let log = fired.clone();
        h.coordinator
            .on_action("play_pause", move |b| log.borrow_mut().push(b.action.clone()));

        h.focus(3);
        assert!(h.press("Space"));
        assert_eq!(*fired.borrow(), vec!["play_pause"]);

        h.focus(5);
        assert!(!h.press("Space"));
        assert_eq!(fired.borrow().len(), 1);
    }

    #[test]
    fn arrows_move_grid_selection() {
        let mut h = make_harness();
        let events = Rc::new(RefCell::new(Vec::new()));
        let log = events.clone();
        h.coordinator.subscribe(move |e| log.borrow_mut().push(e.clone()));

        h.focus(4);
        h.settle();
        h.speech.clear();

        assert!(h.press("Down"));
        h.settle();
        assert_eq!(h.speech.texts(), vec!["Title: Blue Monday"]);
        assert!(events.borrow().contains(&AccessEvent::SelectionMoved {
            element: ElementId(4),
            index: CellIndex::new(0, 0),
        }));

        // 0행에서 위쪽: 처리됨, 이동 없음
        assert!(h.press("Up"));
        let current = h.elements.snapshot(ElementId(4)).unwrap().container.unwrap().current;
        assert_eq!(current, Some(CellIndex::new(0, 0)));
    }

    #[test]
    fn tab_escapes_grid_and_updates_context() {
        let mut h = make_harness();
        h.focus(4);
        h.settle();
        h.speech.clear();

        assert!(h.press("Tab"));
        h.settle();
        assert_eq!(h.elements.focused(), Some(ElementId(5)));
        assert_eq!(h.speech.texts(), vec!["Moved to Search"]);
        assert_eq!(
            h.coordinator.guide().current_context().unwrap().element,
            ElementId(5)
        );
    }

    #[test]
    fn tab_outside_container_is_unhandled() {
        let mut h = make_harness();
        h.focus(5);
        assert!(!h.press("Tab"));
    }

    #[test]
    fn enter_and_escape_feedback() {
        let mut h = make_harness();
        h.focus(5);
        h.settle();
        h.speech.clear();
        assert!(!h.press("Enter"));
        assert!(!h.press("Escape"));
        h.settle();
        assert_eq!(h.speech.texts(), vec!["Activated", "Cancelled"]);
    }

    #[test]
    fn verbosity_toggle_cycles_and_announces() {
        let mut h = make_harness();
        assert!(h.press("Ctrl+Shift+V"));
        h.settle();
        assert_eq!(h.coordinator.verbosity(), Verbosity::Verbose);
        assert_eq!(h.speech.texts(), vec!["Verbosity: verbose"]);
    }

    #[test]
    fn mute_speaks_confirmation_and_silences_rest() {
        let mut h = make_harness();
        h.press("Ctrl+Shift+M");
        h.coordinator.announce("hidden", Priority::High);
        h.settle();
        assert_eq!(h.speech.texts(), vec!["Announcements muted"]);

        h.press("Ctrl+Shift+U");
        h.settle();
        assert_eq!(h.speech.texts().last().unwrap(), "Announcements unmuted");
    }

    #[test]
    fn where_am_i_includes_ancestry() {
        let mut h = make_harness();
        h.focus(3);
        h.settle();
        h.speech.clear();
        h.press("Ctrl+?");
        h.settle();
        assert_eq!(h.speech.texts(), vec!["Play, button, in player, in main"]);
    }

    #[test]
    fn shortcut_summary_lists_active_scopes_only() {
        let mut h = make_harness();
        h.focus(3);
        let scopes = active_scopes(h.elements.as_ref(), Some(ElementId(3)));
        assert_eq!(scopes, vec!["Player"]);
        let summary = h.coordinator.shortcut_summary(&scopes);
        assert!(summary.contains("Space Play/Pause"));
        assert!(!summary.contains("Refresh database"));
    }

    #[test]
    fn unmount_clears_stale_context() {
        let mut h = make_harness();
        h.focus(3);
        h.elements.unmount(ElementId(2));
        h.coordinator.on_element_unmounted(ElementId(2));
        assert!(h.coordinator.guide().current_context().is_none());
    }

    #[test]
    fn element_bound_shortcut_released_on_unmount() {
        let mut h = make_harness();
        h.coordinator
            .register_shortcut(
                ShortcutBinding::new("jump_search", "Ctrl+E".parse().unwrap(), "Jump to search")
                    .bound_to(ElementId(5)),
            )
            .unwrap();
        h.elements.unmount(ElementId(5));
        h.coordinator.on_element_unmounted(ElementId(5));
        assert!(h.coordinator.shortcuts().get("jump_search").is_none());
    }
}
