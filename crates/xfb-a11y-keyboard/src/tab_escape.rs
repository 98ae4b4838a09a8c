//! 복합 위젯 Tab 탈출.
//!
//! 그리드/목록 안에서 Tab 이 포커스를 가두지 않도록 포커스 체인을 따라
//! 다음(또는 이전) 이동 가능한 요소를 찾는다. 탐색은 체인 길이로 제한된다.

use std::collections::HashMap;
use tracing::{debug, info, Span};
use xfb_a11y_core::error::CoreError;
use xfb_a11y_core::models::announcement::Priority;
use xfb_a11y_core::models::element::ElementId;
use xfb_a11y_core::ports::announcer::Announcer;
use xfb_a11y_core::ports::focus::FocusProvider;

/// 포커스 체인에서 `current` 다음으로 보이고 활성화되고 포커스 가능한 요소
///
/// `current` 와 같은 요소는 건너뛴다. 체인 길이만큼 돌아도 없으면 None.
pub fn resolve_tab_escape(
    focus: &dyn FocusProvider,
    current: ElementId,
    forward: bool,
) -> Option<ElementId> {
    let limit = focus.focus_chain_len();
    let mut cursor = current;

    for _ in 0..limit {
        cursor = if forward {
            focus.next_in_focus_chain(cursor)?
        } else {
            focus.previous_in_focus_chain(cursor)?
        };
        if cursor == current {
            continue;
        }
        if focus.snapshot(cursor).is_some_and(|s| s.is_focusable()) {
            return Some(cursor);
        }
    }
    None
}

/// 사용자 지정 Tab 순서 + Tab 탈출
pub struct TabNavigator {
    /// 앞 요소 → 다음 요소 (정방향 Tab 에만 적용)
    custom_order: HashMap<ElementId, ElementId>,
    span: Span,
}

impl TabNavigator {
    pub fn new() -> Self {
        Self::with_span(tracing::info_span!("tab_order"))
    }

    pub fn with_span(span: Span) -> Self {
        Self {
            custom_order: HashMap::new(),
            span,
        }
    }

    /// `first` 에서 Tab 을 누르면 `second` 로 이동
    pub fn set_custom_tab_order(&mut self, first: ElementId, second: ElementId) {
        self.custom_order.insert(first, second);
        debug!(parent: &self.span, "사용자 Tab 순서: {} → {}", first, second);
    }

    /// 요소가 언마운트되면 관련 순서 제거
    pub fn forget(&mut self, element: ElementId) {
        self.custom_order
            .retain(|first, second| *first != element && *second != element);
    }

    pub fn custom_target(&self, element: ElementId) -> Option<ElementId> {
        self.custom_order.get(&element).copied()
    }

    /// 보이고 활성화된 사용자 지정 대상
    fn usable_custom_target(
        &self,
        focus: &dyn FocusProvider,
        current: ElementId,
    ) -> Option<ElementId> {
        self.custom_target(current)
            .filter(|target| focus.snapshot(*target).is_some_and(|s| s.visible && s.enabled))
    }

    /// 다음 Tab 대상
    ///
    /// 정방향이고 사용자 순서가 있으며 대상이 보이고 활성화되어 있으면 그것이 우선이다.
    pub fn next_target(
        &self,
        focus: &dyn FocusProvider,
        current: ElementId,
        forward: bool,
    ) -> Option<ElementId> {
        if forward {
            if let Some(target) = self.usable_custom_target(focus, current) {
                return Some(target);
            }
        }
        resolve_tab_escape(focus, current, forward)
    }

    /// 일반 위젯의 정방향 Tab: 사용자 순서가 있으면 그 대상으로 포커스를 옮긴다
    ///
    /// 순서가 없거나 대상을 쓸 수 없으면 Ok(None). 안내는 포커스 설명에 맡긴다.
    pub fn follow_custom_order(
        &self,
        focus: &dyn FocusProvider,
        current: ElementId,
    ) -> Result<Option<ElementId>, CoreError> {
        let Some(target) = self.usable_custom_target(focus, current) else {
            return Ok(None);
        };
        focus.set_focus(target)?;
        debug!(parent: &self.span, "사용자 Tab 순서 적용: {} → {}", current, target);
        Ok(Some(target))
    }

    /// 복합 위젯에서 빠져나가 포커스를 옮기고 "Moved to ..." 를 안내
    ///
    /// 대상이 없으면 Ok(None) (키 입력은 처리하지 않은 것으로 남는다).
    pub fn escape(
        &self,
        focus: &dyn FocusProvider,
        current: ElementId,
        forward: bool,
        announcer: &mut dyn Announcer,
    ) -> Result<Option<ElementId>, CoreError> {
        let Some(target) = self.next_target(focus, current, forward) else {
            debug!(parent: &self.span, "Tab 탈출 대상 없음: {}", current);
            return Ok(None);
        };

        focus.set_focus(target)?;
        let name = focus
            .snapshot(target)
            .map(|s| s.display_name().to_string())
            .unwrap_or_default();
        info!(parent: &self.span, "Tab 탈출: {} → {}", current, target);
        announcer.announce(&format!("Moved to {}", name), Priority::Normal);
        Ok(Some(target))
    }
}

impl Default for TabNavigator {
    fn default() -> Self {
        Self::new()
    }
}
