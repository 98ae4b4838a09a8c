//! 컨텍스트 도움말 매핑과 가이드 워크플로우 정의.

use serde::{Deserialize, Serialize};

/// 워크플로우 단계 기본 타임아웃 (밀리초)
pub const DEFAULT_STEP_TIMEOUT_MS: u64 = 30_000;

/// 도움말 모드
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HelpMode {
    /// 사용자가 요청할 때만
    #[default]
    Manual,
    /// 매핑된 컨텍스트마다 자동 제안
    Automatic,
    /// 방문 횟수가 적은 컨텍스트에서만 자동 제안
    Progressive,
    /// 가이드 워크플로우 중심 (자동 제안 없음)
    Tutorial,
}

impl HelpMode {
    /// 이 모드로 전환할 때 자동 도움말 활성화 여부 (None = 유지)
    pub fn implied_auto_help(self) -> Option<bool> {
        match self {
            Self::Automatic | Self::Progressive => Some(true),
            Self::Manual => Some(false),
            Self::Tutorial => None,
        }
    }
}

/// 시작 시 복원되고 종료 시 저장되는 도움말 설정
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpSettings {
    pub help_mode: HelpMode,
    pub auto_help_enabled: bool,
}

/// 컨텍스트 → 도움말 매핑
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextHelpMapping {
    pub context_id: String,
    /// Help Content Provider 에 넘길 도움말 ID
    pub help_id: String,
    /// 짧은 음성 설명
    #[serde(default)]
    pub audio_description: Option<String>,
    /// 먼저 완료해야 하는 워크플로우 ID
    #[serde(default)]
    pub prerequisites: Vec<String>,
    /// 0..=100, 클수록 중요
    #[serde(default)]
    pub priority: u8,
    /// 자동 제안 여부
    #[serde(default)]
    pub auto_trigger: bool,
    /// 자동 제안 지연 (없으면 설정 기본값)
    #[serde(default)]
    pub auto_trigger_delay_ms: Option<u64>,
}

impl ContextHelpMapping {
    pub fn new(context_id: impl Into<String>, help_id: impl Into<String>) -> Self {
        Self {
            context_id: context_id.into(),
            help_id: help_id.into(),
            audio_description: None,
            prerequisites: Vec::new(),
            priority: 50,
            auto_trigger: false,
            auto_trigger_delay_ms: None,
        }
    }

    pub fn with_audio(mut self, text: impl Into<String>) -> Self {
        self.audio_description = Some(text.into());
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn auto_trigger(mut self, delay_ms: Option<u64>) -> Self {
        self.auto_trigger = true;
        self.auto_trigger_delay_ms = delay_ms;
        self
    }

    pub fn with_prerequisite(mut self, workflow_id: impl Into<String>) -> Self {
        self.prerequisites.push(workflow_id.into());
        self
    }
}

/// 가이드 워크플로우 단계
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub instruction: String,
    /// 있으면 지시문 대신 읽는다
    #[serde(default)]
    pub audio_description: Option<String>,
    pub expected_action: String,
    /// 이 단계를 완료로 인정하는 추가 액션
    #[serde(default)]
    pub validation_actions: Vec<String>,
    #[serde(default = "default_step_timeout_ms")]
    pub timeout_ms: u64,
    /// true 이면 단계 타이머를 건다
    #[serde(default = "default_true")]
    pub wait_for_completion: bool,
}

fn default_step_timeout_ms() -> u64 {
    DEFAULT_STEP_TIMEOUT_MS
}

fn default_true() -> bool {
    true
}

impl WorkflowStep {
    pub fn new(instruction: impl Into<String>, expected_action: impl Into<String>) -> Self {
        Self {
            instruction: instruction.into(),
            audio_description: None,
            expected_action: expected_action.into(),
            validation_actions: Vec::new(),
            timeout_ms: DEFAULT_STEP_TIMEOUT_MS,
            wait_for_completion: true,
        }
    }

    pub fn with_audio(mut self, text: impl Into<String>) -> Self {
        self.audio_description = Some(text.into());
        self
    }

    pub fn also_accepts(mut self, action: impl Into<String>) -> Self {
        self.validation_actions.push(action.into());
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn without_wait(mut self) -> Self {
        self.wait_for_completion = false;
        self
    }

    /// 음성으로 읽을 지시문
    pub fn spoken_text(&self) -> &str {
        self.audio_description
            .as_deref()
            .filter(|a| !a.is_empty())
            .unwrap_or(&self.instruction)
    }

    /// 액션이 이 단계를 완료하는지
    pub fn accepts(&self, action: &str) -> bool {
        self.expected_action == action || self.validation_actions.iter().any(|a| a == action)
    }

    /// 단계 타이머를 걸어야 하는지
    pub fn needs_timer(&self) -> bool {
        self.wait_for_completion && self.timeout_ms > 0
    }
}

/// 가이드 워크플로우 정의
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    pub id: String,
    pub title: String,
    pub steps: Vec<WorkflowStep>,
    /// 자동 선택 대상 컨텍스트 ID
    #[serde(default)]
    pub trigger_contexts: Vec<String>,
    #[serde(default)]
    pub completion_message: Option<String>,
}

impl WorkflowDefinition {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            steps: Vec::new(),
            trigger_contexts: Vec::new(),
            completion_message: None,
        }
    }

    pub fn step(mut self, step: WorkflowStep) -> Self {
        self.steps.push(step);
        self
    }

    pub fn triggered_by(mut self, context_id: impl Into<String>) -> Self {
        self.trigger_contexts.push(context_id.into());
        self
    }

    pub fn with_completion_message(mut self, message: impl Into<String>) -> Self {
        self.completion_message = Some(message.into());
        self
    }

    /// 완료 안내 문구
    pub fn completion_text(&self) -> String {
        self.completion_message
            .clone()
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Workflow completed: {}", self.title))
    }
}

/// 진행 중인 워크플로우 상태 (동시에 최대 하나)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowRunState {
    pub workflow_id: String,
    pub step_index: usize,
    pub active: bool,
}

/// 도움말 본문
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpContent {
    pub id: String,
    pub title: String,
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_accepts_expected_and_validation_actions() {
        let step = WorkflowStep::new("Press Space", "play_pause").also_accepts("key:Space");
        assert!(step.accepts("play_pause"));
        assert!(step.accepts("key:Space"));
        assert!(!step.accepts("stop"));
    }

    #[test]
    fn spoken_text_prefers_audio_description() {
        let step = WorkflowStep::new("Long instruction", "a");
        assert_eq!(step.spoken_text(), "Long instruction");
        let step = step.with_audio("Short");
        assert_eq!(step.spoken_text(), "Short");
    }

    #[test]
    fn timer_only_when_waiting_with_timeout() {
        let step = WorkflowStep::new("x", "a");
        assert!(step.needs_timer());
        assert!(!step.clone().without_wait().needs_timer());
        assert!(!step.with_timeout_ms(0).needs_timer());
    }

    #[test]
    fn completion_text_fallback() {
        let wf = WorkflowDefinition::new("tour", "Tour");
        assert_eq!(wf.completion_text(), "Workflow completed: Tour");
        let wf = wf.with_completion_message("Done!");
        assert_eq!(wf.completion_text(), "Done!");
    }

    #[test]
    fn help_mode_side_effects() {
        assert_eq!(HelpMode::Automatic.implied_auto_help(), Some(true));
        assert_eq!(HelpMode::Progressive.implied_auto_help(), Some(true));
        assert_eq!(HelpMode::Manual.implied_auto_help(), Some(false));
        assert_eq!(HelpMode::Tutorial.implied_auto_help(), None);
    }

    #[test]
    fn step_deserializes_with_defaults() {
        let json = r#"{"instruction":"Press Tab","expected_action":"key:Tab"}"#;
        let step: WorkflowStep = serde_json::from_str(json).unwrap();
        assert_eq!(step.timeout_ms, DEFAULT_STEP_TIMEOUT_MS);
        assert!(step.wait_for_completion);
        assert!(step.validation_actions.is_empty());
    }
}
