//! 단축키 디스패처.
//!
//! 키 입력을 레지스트리로 해석하고, 등록된 핸들러를 호출한 뒤
//! "단축키 실행" 이벤트를 돌려준다. 모르는 조합은 처리하지 않은 것으로 남긴다.

use crate::registry::{ShortcutBinding, ShortcutRegistry};
use std::collections::HashMap;
use tracing::{debug, Span};
use xfb_a11y_core::models::chord::KeyChord;
use xfb_a11y_core::models::element::ElementId;
use xfb_a11y_core::models::event::AccessEvent;

/// 액션 핸들러
pub type ActionHandler = Box<dyn FnMut(&ShortcutBinding)>;

pub struct ShortcutDispatcher {
    registry: ShortcutRegistry,
    handlers: HashMap<String, ActionHandler>,
    span: Span,
}

impl ShortcutDispatcher {
    pub fn new(registry: ShortcutRegistry) -> Self {
        Self::with_span(registry, tracing::info_span!("dispatcher"))
    }

    pub fn with_span(registry: ShortcutRegistry, span: Span) -> Self {
        Self {
            registry,
            handlers: HashMap::new(),
            span,
        }
    }

    pub fn registry(&self) -> &ShortcutRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut ShortcutRegistry {
        &mut self.registry
    }

    /// 액션 핸들러 등록 (같은 액션의 기존 핸들러 대체)
    pub fn on_action<F>(&mut self, action: impl Into<String>, handler: F)
    where
        F: FnMut(&ShortcutBinding) + 'static,
    {
        self.handlers.insert(action.into(), Box::new(handler));
    }

    pub fn remove_handler(&mut self, action: &str) -> bool {
        self.handlers.remove(action).is_some()
    }

    /// 키 조합 디스패치
    ///
    /// 일치하면 핸들러를 실행하고 `ShortcutTriggered` 이벤트를 반환한다.
    pub fn dispatch(
        &mut self,
        chord: &KeyChord,
        active_contexts: &[String],
        target: Option<ElementId>,
    ) -> Option<AccessEvent> {
        let binding = self.registry.resolve(chord, active_contexts)?.clone();

        debug!(
            parent: &self.span,
            "단축키 실행: {} ({}, {})", binding.action, chord, binding.scope
        );
        if let Some(handler) = self.handlers.get_mut(&binding.action) {
            handler(&binding);
        }

        Some(AccessEvent::ShortcutTriggered {
            action: binding.action,
            chord: *chord,
            target: binding.bound_element.or(target),
        })
    }
}
