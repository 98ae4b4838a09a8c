//! 포커스 컨텍스트 추적.
//!
//! 포커스가 바뀔 때마다 컨텍스트 ID 를 다시 계산하고, 컨텍스트별 방문 횟수와
//! 첫/마지막 방문 시각, 최근 사용자 액션을 기록한다.

use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};
use xfb_a11y_core::models::context::{derive_context_id, FocusContext};
use xfb_a11y_core::models::element::ElementId;
use xfb_a11y_core::ports::focus::FocusProvider;

/// 컨텍스트별 방문 기록
#[derive(Debug, Clone, Copy)]
struct VisitRecord {
    count: u32,
    first: DateTime<Utc>,
    last: DateTime<Utc>,
}

/// 포커스 변경 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContextChange {
    /// 같은 요소 (변화 없음)
    Unchanged,
    /// 새 컨텍스트 진입
    Entered(String),
    /// 유효한 포커스 대상 없음
    Cleared,
}

pub struct ContextTracker {
    current: Option<FocusContext>,
    entered_at: Option<Instant>,
    visits: HashMap<String, VisitRecord>,
    recent_actions: VecDeque<String>,
    max_recent_actions: usize,
}

impl ContextTracker {
    pub fn new(max_recent_actions: usize) -> Self {
        Self {
            current: None,
            entered_at: None,
            visits: HashMap::new(),
            recent_actions: VecDeque::new(),
            max_recent_actions,
        }
    }

    /// 포커스 변경 반영
    ///
    /// 요소가 없거나 이미 언마운트되었으면 "컨텍스트 없음" 상태가 된다.
    pub fn update(
        &mut self,
        focus: &dyn FocusProvider,
        element: Option<ElementId>,
        now: Instant,
    ) -> ContextChange {
        let snapshot = element.and_then(|id| focus.snapshot(id));
        let Some(snapshot) = snapshot else {
            let was_some = self.current.take().is_some();
            self.entered_at = None;
            return if was_some {
                ContextChange::Cleared
            } else {
                ContextChange::Unchanged
            };
        };

        if self.current.as_ref().is_some_and(|c| c.element == snapshot.id) {
            return ContextChange::Unchanged;
        }

        let parent = snapshot.parent.and_then(|p| focus.snapshot(p));
        let context_id = derive_context_id(&snapshot, parent.as_ref());
        let parent_context_id = parent.as_ref().map(|p| {
            let grandparent = p.parent.and_then(|g| focus.snapshot(g));
            derive_context_id(p, grandparent.as_ref())
        });

        let stamp = Utc::now();
        let record = self
            .visits
            .entry(context_id.clone())
            .and_modify(|r| {
                r.count += 1;
                r.last = stamp;
            })
            .or_insert(VisitRecord {
                count: 1,
                first: stamp,
                last: stamp,
            });

        self.current = Some(FocusContext {
            context_id: context_id.clone(),
            element: snapshot.id,
            snapshot,
            parent_context_id,
            visit_count: record.count,
            first_visit: record.first,
            last_visit: record.last,
        });
        self.entered_at = Some(now);
        ContextChange::Entered(context_id)
    }

    pub fn current(&self) -> Option<&FocusContext> {
        self.current.as_ref()
    }

    pub fn current_id(&self) -> Option<&str> {
        self.current.as_ref().map(|c| c.context_id.as_str())
    }

    /// 컨텍스트 방문 횟수 (없으면 0)
    pub fn visit_count(&self, context_id: &str) -> u32 {
        self.visits.get(context_id).map_or(0, |r| r.count)
    }

    /// 현재 컨텍스트에 머문 시간
    pub fn time_in_context(&self, now: Instant) -> Option<Duration> {
        self.entered_at.map(|t| now.saturating_duration_since(t))
    }

    /// 사용자 액션 기록 (최근 N개 유지)
    pub fn record_action(&mut self, action: &str) {
        self.recent_actions.push_back(action.to_string());
        while self.recent_actions.len() > self.max_recent_actions {
            self.recent_actions.pop_front();
        }
    }

    pub fn recent_actions(&self) -> Vec<String> {
        self.recent_actions.iter().cloned().collect()
    }
}
