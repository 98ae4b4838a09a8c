//! 안내 스케줄러.
//!
//! 대기열 + 포커스 디바운스 + 드레인 간격으로 Speech Output 호출을 조절한다.
//! 모든 시간 판단은 주입된 [`Clock`] 기준이며, 호출 측이 주기적으로 [`tick`] 을 부른다.
//!
//! [`tick`]: AnnouncementScheduler::tick

use crate::queue::AnnouncementQueue;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn, Span};
use xfb_a11y_core::config::AnnouncerConfig;
use xfb_a11y_core::models::announcement::{Announcement, Priority};
use xfb_a11y_core::ports::announcer::Announcer;
use xfb_a11y_core::ports::clock::Clock;
use xfb_a11y_core::ports::speech::SpeechOutput;
use xfb_a11y_core::timer::TimerSet;

/// 스케줄러 타이머 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum SchedulerTimer {
    FocusDebounce,
}

/// 전달 통계
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    /// Speech Output 으로 전달된 안내 수
    pub delivered: u64,
    /// 대기열 초과로 버려진 안내 수
    pub dropped: u64,
    /// Speech Output 이 실패해 전달되지 못한 안내 수
    pub failed: u64,
    /// 더 새로운 포커스 안내로 대체된 수
    pub superseded: u64,
}

/// 안내 스케줄러
pub struct AnnouncementScheduler {
    queue: AnnouncementQueue,
    output: Arc<dyn SpeechOutput>,
    clock: Arc<dyn Clock>,
    config: AnnouncerConfig,
    /// 디바운스 대기 중인 포커스 안내
    pending_focus: Option<Announcement>,
    timers: TimerSet<SchedulerTimer>,
    last_delivery: Option<Instant>,
    last_spoken: Option<(String, Priority)>,
    muted: bool,
    stats: SchedulerStats,
    span: Span,
}

impl AnnouncementScheduler {
    pub fn new(config: AnnouncerConfig, output: Arc<dyn SpeechOutput>, clock: Arc<dyn Clock>) -> Self {
        Self::with_span(config, output, clock, tracing::info_span!("announcer"))
    }

    /// 로그 span 을 지정해 생성
    pub fn with_span(
        config: AnnouncerConfig,
        output: Arc<dyn SpeechOutput>,
        clock: Arc<dyn Clock>,
        span: Span,
    ) -> Self {
        Self {
            queue: AnnouncementQueue::new(config.max_queue_size),
            output,
            clock,
            muted: !config.enabled,
            config,
            pending_focus: None,
            timers: TimerSet::new(),
            last_delivery: None,
            last_spoken: None,
            stats: SchedulerStats::default(),
            span,
        }
    }

    /// 안내 요청
    ///
    /// Critical 은 대기열을 거치지 않고 즉시 전달된다 (음소거 중에도).
    pub fn enqueue(&mut self, text: &str, priority: Priority) {
        if text.trim().is_empty() {
            return;
        }

        if priority == Priority::Critical {
            debug!(parent: &self.span, "긴급 안내 즉시 전달: {}", text);
            self.deliver(text, priority);
            return;
        }

        if self.muted {
            debug!(parent: &self.span, "음소거 중 안내 무시: {}", text);
            return;
        }

        let announcement = Announcement::new(text, priority, self.clock.now());
        if let Some(dropped) = self.queue.push(announcement) {
            self.stats.dropped += 1;
            debug!(
                parent: &self.span,
                "대기열 초과로 안내 버림 ({:?}): {}", dropped.priority, dropped.text
            );
        }
    }

    /// 포커스 설명 안내 요청
    ///
    /// 디바운스 창 안에서 새 요청이 오면 이전 것을 대체하고 창을 다시 시작한다.
    pub fn announce_focus(&mut self, text: &str) {
        if self.muted || text.trim().is_empty() {
            return;
        }

        let now = self.clock.now();
        if self.pending_focus.replace(Announcement::focus(text, now)).is_some() {
            self.stats.superseded += 1;
        }
        self.timers
            .arm(SchedulerTimer::FocusDebounce, now + self.config.focus_debounce());
    }

    /// 주기적 처리: 디바운스 만료 처리 후 드레인 간격이 지났으면 한 건 전달
    pub fn tick(&mut self) {
        let now = self.clock.now();

        for timer in self.timers.take_due(now) {
            match timer {
                SchedulerTimer::FocusDebounce => self.flush_pending_focus(),
            }
        }

        let ready = self
            .last_delivery
            .map_or(true, |last| now.duration_since(last) >= self.config.drain_interval());
        if !ready {
            return;
        }

        if let Some(next) = self.queue.pop() {
            self.last_delivery = Some(now);
            self.deliver(&next.text, next.priority);
        }
    }

    fn flush_pending_focus(&mut self) {
        let Some(focus) = self.pending_focus.take() else {
            return;
        };
        // 아직 말하지 않은 이전 포커스 안내는 새 것으로 대체
        let removed = self.queue.remove_focus();
        self.stats.superseded += removed as u64;

        if let Some(dropped) = self.queue.push(focus) {
            self.stats.dropped += 1;
            debug!(parent: &self.span, "대기열 초과로 포커스 안내 버림: {}", dropped.text);
        }
    }

    fn deliver(&mut self, text: &str, priority: Priority) {
        match self.output.speak(text, priority) {
            Ok(()) => {
                self.stats.delivered += 1;
                self.last_spoken = Some((text.to_string(), priority));
                debug!(parent: &self.span, "안내 전달 ({:?}): {}", priority, text);
            }
            Err(e) => {
                self.stats.failed += 1;
                warn!(parent: &self.span, "음성 출력 실패 ({:?}): {}: {}", priority, text, e);
            }
        }
    }

    /// 마지막으로 전달된 안내를 다시 요청 (High). 없으면 false
    pub fn repeat_last(&mut self) -> bool {
        match self.last_spoken.clone() {
            Some((text, _)) => {
                self.enqueue(&text, Priority::High);
                true
            }
            None => false,
        }
    }

    /// 음소거 전환. 음소거하면 대기열과 대기 중인 포커스 안내를 비운다
    pub fn set_muted(&mut self, muted: bool) {
        if self.muted == muted {
            return;
        }
        self.muted = muted;
        if muted {
            self.clear();
        }
        info!(parent: &self.span, "음성 안내 {}", if muted { "음소거" } else { "재개" });
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    /// 대기열 및 디바운스 대기 비우기
    pub fn clear(&mut self) {
        self.queue.clear();
        self.pending_focus = None;
        self.timers.cancel(&SchedulerTimer::FocusDebounce);
    }

    /// 다음으로 처리할 일이 생기는 시각 (대기할 일이 없으면 None)
    pub fn next_wakeup(&self) -> Option<Instant> {
        let drain = if self.queue.is_empty() {
            None
        } else {
            Some(
                self.last_delivery
                    .map_or_else(|| self.clock.now(), |last| last + self.config.drain_interval()),
            )
        };
        match (drain, self.timers.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    pub fn has_pending_focus(&self) -> bool {
        self.pending_focus.is_some()
    }

    pub fn last_spoken(&self) -> Option<&str> {
        self.last_spoken.as_ref().map(|(text, _)| text.as_str())
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }
}

impl Announcer for AnnouncementScheduler {
    fn announce(&mut self, text: &str, priority: Priority) {
        self.enqueue(text, priority);
    }

    fn announce_focus(&mut self, text: &str) {
        AnnouncementScheduler::announce_focus(self, text);
    }
}
