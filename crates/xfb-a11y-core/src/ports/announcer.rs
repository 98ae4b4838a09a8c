//! 안내 요청 포트.
//!
//! 가이드/내비게이션 엔진은 스케줄러를 직접 알지 못하고 이 trait 로만 안내를 요청한다.
//! 구현: `xfb-a11y-speech::scheduler::AnnouncementScheduler`

use crate::models::announcement::Priority;

pub trait Announcer {
    /// 일반 안내 요청
    fn announce(&mut self, text: &str, priority: Priority);

    /// 포커스 설명 안내 요청 (디바운스되어 최신 것만 전달)
    fn announce_focus(&mut self, text: &str);
}

/// 요청된 안내를 순서대로 기록 (테스트/스크립트용)
impl Announcer for Vec<(String, Priority)> {
    fn announce(&mut self, text: &str, priority: Priority) {
        self.push((text.to_string(), priority));
    }

    fn announce_focus(&mut self, text: &str) {
        self.push((text.to_string(), Priority::Normal));
    }
}
