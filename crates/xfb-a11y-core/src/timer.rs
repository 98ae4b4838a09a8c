//! 목적별 키를 가진 일회성 타이머 집합.
//!
//! 같은 키로 다시 걸면 대기 중인 타이머를 대체한다 (디바운스, 자동 도움말, 단계 타이머).
//! 만료 판정은 호출 측이 넘겨준 시각으로만 하므로 주기적 `tick` 에서 사용한다.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::Instant;

#[derive(Debug, Clone)]
pub struct TimerSet<K> {
    deadlines: HashMap<K, Instant>,
}

impl<K> TimerSet<K>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self {
            deadlines: HashMap::new(),
        }
    }

    /// 타이머 설정 (같은 키의 기존 타이머는 대체)
    pub fn arm(&mut self, key: K, deadline: Instant) {
        self.deadlines.insert(key, deadline);
    }

    /// 타이머 취소. 대기 중이었으면 true
    pub fn cancel(&mut self, key: &K) -> bool {
        self.deadlines.remove(key).is_some()
    }

    pub fn is_armed(&self, key: &K) -> bool {
        self.deadlines.contains_key(key)
    }

    pub fn deadline(&self, key: &K) -> Option<Instant> {
        self.deadlines.get(key).copied()
    }

    /// 가장 빠른 만료 시각
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.values().min().copied()
    }

    /// 만료된 타이머를 제거하고 만료 시각 순으로 반환
    pub fn take_due(&mut self, now: Instant) -> Vec<K> {
        let mut due: Vec<(K, Instant)> = self
            .deadlines
            .iter()
            .filter(|(_, deadline)| **deadline <= now)
            .map(|(k, d)| (k.clone(), *d))
            .collect();
        due.sort_by_key(|(_, d)| *d);
        for (key, _) in &due {
            self.deadlines.remove(key);
        }
        due.into_iter().map(|(k, _)| k).collect()
    }

    pub fn clear(&mut self) {
        self.deadlines.clear();
    }

    pub fn len(&self) -> usize {
        self.deadlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }
}

impl<K> Default for TimerSet<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
