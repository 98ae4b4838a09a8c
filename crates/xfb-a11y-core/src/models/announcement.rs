//! 음성 안내 모델.

use serde::{Deserialize, Serialize};
use std::time::Instant;

/// 안내 우선순위
///
/// 전달 순서는 Critical > High > Normal > Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// 낮음 (자동 도움말 제안)
    Low,
    /// 보통 (포커스 설명, 선택 이동)
    Normal,
    /// 높음 (워크플로우 단계 지시)
    High,
    /// 긴급 (즉시 전달, 현재 음성 중단)
    Critical,
}

/// 안내 종류
///
/// `Focus` 안내는 디바운스 창 안에서 새 포커스 안내로 대체된다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnnouncementKind {
    /// 일반 안내
    General,
    /// 포커스 설명 안내
    Focus,
}

/// 안내 상세 수준
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verbosity {
    /// 값만
    Terse,
    /// 이름 + 값
    #[default]
    Normal,
    /// 컨테이너 이름 + 위치 + 이름 + 값
    Verbose,
}

impl Verbosity {
    /// 다음 수준 (Terse → Normal → Verbose → Terse)
    pub fn cycle(self) -> Self {
        match self {
            Self::Terse => Self::Normal,
            Self::Normal => Self::Verbose,
            Self::Verbose => Self::Terse,
        }
    }

    /// 표시 이름
    pub fn label(self) -> &'static str {
        match self {
            Self::Terse => "terse",
            Self::Normal => "normal",
            Self::Verbose => "verbose",
        }
    }
}

/// 대기열에 들어가는 단일 음성 안내
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    /// 읽을 텍스트
    pub text: String,
    /// 우선순위
    pub priority: Priority,
    /// 안내 종류
    pub kind: AnnouncementKind,
    /// 생성 시각
    pub created_at: Instant,
}

impl Announcement {
    /// 일반 안내 생성
    pub fn new(text: impl Into<String>, priority: Priority, created_at: Instant) -> Self {
        Self {
            text: text.into(),
            priority,
            kind: AnnouncementKind::General,
            created_at,
        }
    }

    /// 포커스 설명 안내 생성 (항상 Normal)
    pub fn focus(text: impl Into<String>, created_at: Instant) -> Self {
        Self {
            text: text.into(),
            priority: Priority::Normal,
            kind: AnnouncementKind::Focus,
            created_at,
        }
    }

    /// 포커스 안내 여부
    pub fn is_focus(&self) -> bool {
        self.kind == AnnouncementKind::Focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_cycles_through_all_levels() {
        let v = Verbosity::Terse;
        assert_eq!(v.cycle(), Verbosity::Normal);
        assert_eq!(v.cycle().cycle(), Verbosity::Verbose);
        assert_eq!(v.cycle().cycle().cycle(), Verbosity::Terse);
    }

    #[test]
    fn focus_announcement_is_normal() {
        let a = Announcement::focus("Play, button", Instant::now());
        assert_eq!(a.priority, Priority::Normal);
        assert!(a.is_focus());
    }
}
