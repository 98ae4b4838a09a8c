//! 메모리 기록용 Speech Output.
//!
//! 실제 음성 대신 전달된 안내를 순서대로 보관한다. 데모 실행의 결과 요약과
//! 테스트에서 "무엇이 어떤 순서로 말해졌는지" 확인하는 데 쓴다.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use xfb_a11y_core::error::CoreError;
use xfb_a11y_core::models::announcement::Priority;
use xfb_a11y_core::ports::speech::SpeechOutput;

/// 전달된 안내 한 줄
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpokenLine {
    pub text: String,
    pub priority: Priority,
}

#[derive(Debug, Default)]
pub struct TranscriptSpeech {
    lines: Mutex<Vec<SpokenLine>>,
    failing: AtomicBool,
}

impl TranscriptSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    /// true 이면 이후 speak 호출이 실패한다
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn lines(&self) -> Vec<SpokenLine> {
        self.lines.lock().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.lines.lock().iter().map(|l| l.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl SpeechOutput for TranscriptSpeech {
    fn speak(&self, text: &str, priority: Priority) -> Result<(), CoreError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(CoreError::Speech("음성 브리지 응답 없음".to_string()));
        }
        self.lines.lock().push(SpokenLine {
            text: text.to_string(),
            priority,
        });
        Ok(())
    }
}
