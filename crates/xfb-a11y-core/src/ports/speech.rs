//! Speech Output 포트.
//!
//! 구현: `xfb-a11y-speech::channel` (백그라운드 음성 작업으로 채널 전달)

use crate::error::CoreError;
use crate::models::announcement::Priority;

/// 실제로 말하는 네이티브 접근성 브리지
///
/// `Priority::Critical` 은 현재 음성을 중단하고 즉시 말해야 한다.
pub trait SpeechOutput: Send + Sync {
    fn speak(&self, text: &str, priority: Priority) -> Result<(), CoreError>;
}
