//! 안내 우선순위 대기열.
//!
//! BTreeSet 기반 우선순위 큐. Critical > High > Normal > Low 순으로,
//! 같은 우선순위 안에서는 먼저 들어온 것이 먼저 나간다.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use xfb_a11y_core::models::announcement::{Announcement, Priority};

/// 우선순위 비교를 위한 래퍼
#[derive(Debug, Clone)]
struct PrioritizedAnnouncement {
    /// 삽입 순번 (FIFO 기준)
    seq: u64,
    announcement: Announcement,
}

impl PartialEq for PrioritizedAnnouncement {
    fn eq(&self, other: &Self) -> bool {
        self.seq == other.seq
    }
}

impl Eq for PrioritizedAnnouncement {}

impl PartialOrd for PrioritizedAnnouncement {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PrioritizedAnnouncement {
    fn cmp(&self, other: &Self) -> Ordering {
        // 높은 우선순위가 먼저 (역순), 같으면 먼저 들어온 것
        other
            .announcement
            .priority
            .cmp(&self.announcement.priority)
            .then_with(|| self.seq.cmp(&other.seq))
    }
}

/// 안내 대기열 (최대 용량 제한)
#[derive(Debug)]
pub struct AnnouncementQueue {
    items: BTreeSet<PrioritizedAnnouncement>,
    max_size: usize,
    next_seq: u64,
}

impl AnnouncementQueue {
    /// 새 대기열 생성 (최대 크기 지정)
    pub fn new(max_size: usize) -> Self {
        Self {
            items: BTreeSet::new(),
            max_size: max_size.max(1),
            next_seq: 0,
        }
    }

    /// 안내 추가
    ///
    /// 가득 차면 새 항목의 우선순위와 관계없이 가장 오래된 Low, 없으면 가장 오래된
    /// Normal 을 제거하고 새 항목을 넣는다. High/Critical 만 남았으면 새 항목이
    /// High 이상일 때만 가장 오래된 High 를 제거하고, 아니면 새 항목을 버린다.
    /// 버려진 항목(제거된 기존 항목 또는 새 항목)을 반환한다.
    pub fn push(&mut self, announcement: Announcement) -> Option<Announcement> {
        let mut dropped = None;

        if self.items.len() >= self.max_size {
            let victim = self
                .oldest_of(Priority::Low)
                .or_else(|| self.oldest_of(Priority::Normal))
                .or_else(|| {
                    (announcement.priority >= Priority::High)
                        .then(|| self.oldest_of(Priority::High))
                        .flatten()
                });
            let Some(victim) = victim else {
                return Some(announcement);
            };
            self.items.remove(&victim);
            dropped = Some(victim.announcement);
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.items.insert(PrioritizedAnnouncement { seq, announcement });
        dropped
    }

    fn oldest_of(&self, priority: Priority) -> Option<PrioritizedAnnouncement> {
        self.items
            .iter()
            .filter(|p| p.announcement.priority == priority)
            .min_by_key(|p| p.seq)
            .cloned()
    }

    /// 가장 높은 우선순위 안내 꺼내기
    pub fn pop(&mut self) -> Option<Announcement> {
        let first = self.items.iter().next()?.clone();
        self.items.remove(&first);
        Some(first.announcement)
    }

    /// 가장 높은 우선순위 안내 조회 (제거 안함)
    pub fn peek(&self) -> Option<&Announcement> {
        self.items.iter().next().map(|p| &p.announcement)
    }

    /// 대기 중인 포커스 안내 제거. 제거된 개수 반환
    pub fn remove_focus(&mut self) -> usize {
        let before = self.items.len();
        self.items.retain(|p| !p.announcement.is_focus());
        before - self.items.len()
    }

    /// 현재 대기열 크기
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// 모든 안내를 전달 순서대로 반환
    pub fn iter(&self) -> impl Iterator<Item = &Announcement> {
        self.items.iter().map(|p| &p.announcement)
    }

    /// 대기열 비우기
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
