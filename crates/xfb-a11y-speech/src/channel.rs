//! 채널 기반 Speech Output.
//!
//! UI 스레드의 스케줄러가 `speak` 를 호출하면 요청을 tokio mpsc 채널로 넘기고,
//! 백그라운드 음성 작업이 받아서 실제 브리지로 전달한다.

use tokio::sync::mpsc;
use tracing::{debug, Span};
use xfb_a11y_core::error::CoreError;
use xfb_a11y_core::models::announcement::Priority;
use xfb_a11y_core::ports::speech::SpeechOutput;

/// 음성 작업으로 전달되는 요청
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechRequest {
    pub text: String,
    pub priority: Priority,
    /// 현재 음성을 중단해야 하는지 (Critical)
    pub interrupt: bool,
}

/// 채널 송신측 Speech Output 어댑터
#[derive(Debug, Clone)]
pub struct ChannelSpeechOutput {
    tx: mpsc::UnboundedSender<SpeechRequest>,
    span: Span,
}

impl ChannelSpeechOutput {
    /// 어댑터와 수신측 생성
    pub fn new() -> (Self, mpsc::UnboundedReceiver<SpeechRequest>) {
        Self::with_span(tracing::info_span!("speech_channel"))
    }

    pub fn with_span(span: Span) -> (Self, mpsc::UnboundedReceiver<SpeechRequest>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx, span }, rx)
    }
}

impl SpeechOutput for ChannelSpeechOutput {
    fn speak(&self, text: &str, priority: Priority) -> Result<(), CoreError> {
        let request = SpeechRequest {
            text: text.to_string(),
            priority,
            interrupt: priority == Priority::Critical,
        };
        self.tx
            .send(request)
            .map_err(|_| CoreError::Speech("음성 작업 채널 닫힘".to_string()))?;
        debug!(parent: &self.span, "음성 요청 전송 ({:?})", priority);
        Ok(())
    }
}
