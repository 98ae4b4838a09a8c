//! 내부 이벤트 버스.
//!
//! 단일 UI 스레드에서 관찰자에게 등록 순서대로 동기 전달한다.

use tracing::{debug, Span};
use xfb_a11y_core::models::event::AccessEvent;

/// 이벤트 관찰자
pub type EventHandler = Box<dyn FnMut(&AccessEvent)>;

/// 구독 해제용 핸들
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct EventBus {
    subscribers: Vec<(SubscriptionId, EventHandler)>,
    next_id: u64,
    span: Span,
}

impl EventBus {
    pub fn new() -> Self {
        Self::with_span(tracing::info_span!("event_bus"))
    }

    pub fn with_span(span: Span) -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
            span,
        }
    }

    /// 관찰자 등록
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&AccessEvent) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// 이벤트 발행
    pub fn publish(&mut self, event: &AccessEvent) {
        debug!(parent: &self.span, "이벤트 발행: {}", event.name());
        for (_, handler) in self.subscribers.iter_mut() {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
