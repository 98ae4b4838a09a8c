//! 컨텍스트 & 워크플로우 엔진.
//!
//! 포커스 변경마다 컨텍스트를 다시 계산해 자동 도움말 타이머를 걸고,
//! 사용자 액션으로 가이드 워크플로우를 진행시킨다. 안내는 [`Announcer`] 로만 요청하고
//! 발생한 이벤트는 내부 outbox 에 쌓아 두었다가 [`GuideEngine::take_events`] 로 넘긴다.

use crate::context::{ContextChange, ContextTracker};
use crate::defaults::{default_mappings, default_workflows};
use crate::help::{lookup_keys, missing_prerequisite, HelpRegistry};
use crate::workflow::{WorkflowOutcome, WorkflowRunner};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn, Span};
use xfb_a11y_core::config::HelpConfig;
use xfb_a11y_core::error::CoreError;
use xfb_a11y_core::models::announcement::Priority;
use xfb_a11y_core::models::context::FocusContext;
use xfb_a11y_core::models::element::ElementId;
use xfb_a11y_core::models::event::AccessEvent;
use xfb_a11y_core::models::guide::{
    ContextHelpMapping, HelpContent, HelpMode, HelpSettings, WorkflowDefinition, WorkflowRunState,
};
use xfb_a11y_core::ports::announcer::Announcer;
use xfb_a11y_core::ports::clock::Clock;
use xfb_a11y_core::ports::focus::FocusProvider;
use xfb_a11y_core::ports::help::HelpContentProvider;
use xfb_a11y_core::timer::TimerSet;

const NO_CONTEXT_HELP: &str = "No context help available for this control.";
const NO_WORKFLOW: &str = "No guided workflow available for this context.";
const NO_ACTIVE_WORKFLOW: &str = "No guided workflow is running.";
const HELP_CONTENT_MISSING: &str = "Help content is not available.";
const AUTO_HELP_FALLBACK: &str =
    "Help is available for this control. Press Shift+F1 for context help.";
const STEP_TIMED_OUT: &str =
    "Workflow step timed out. You can continue at your own pace or ask for help.";

/// 엔진 타이머 용도
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum GuideTimer {
    AutoHelp,
    StepTimeout,
}

pub struct GuideEngine {
    config: HelpConfig,
    tracker: ContextTracker,
    help: HelpRegistry,
    workflows: WorkflowRunner,
    content: Arc<dyn HelpContentProvider>,
    clock: Arc<dyn Clock>,
    timers: TimerSet<GuideTimer>,
    /// 자동 도움말 타이머가 걸린 컨텍스트 ID
    pending_auto_help: Option<String>,
    events: Vec<AccessEvent>,
    span: Span,
}

impl GuideEngine {
    pub fn new(
        config: HelpConfig,
        content: Arc<dyn HelpContentProvider>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::with_span(config, content, clock, tracing::info_span!("guide"))
    }

    pub fn with_span(
        config: HelpConfig,
        content: Arc<dyn HelpContentProvider>,
        clock: Arc<dyn Clock>,
        span: Span,
    ) -> Self {
        Self {
            tracker: ContextTracker::new(config.max_recent_actions),
            config,
            help: HelpRegistry::new(),
            workflows: WorkflowRunner::new(),
            content,
            clock,
            timers: TimerSet::new(),
            pending_auto_help: None,
            events: Vec::new(),
            span,
        }
    }

    /// 기본 매핑과 워크플로우 등록
    pub fn install_defaults(&mut self) -> Result<(), CoreError> {
        for mapping in default_mappings() {
            self.help.register(mapping)?;
        }
        for workflow in default_workflows() {
            self.workflows.register(workflow)?;
        }
        info!(
            parent: &self.span,
            "기본 도움말 매핑 {}개, 워크플로우 {}개 등록",
            self.help.len(),
            self.workflows.definitions().len()
        );
        Ok(())
    }

    pub fn register_mapping(&mut self, mapping: ContextHelpMapping) -> Result<(), CoreError> {
        self.help.register(mapping)
    }

    pub fn register_workflow(&mut self, definition: WorkflowDefinition) -> Result<(), CoreError> {
        self.workflows.register(definition)
    }

    pub fn help(&self) -> &HelpRegistry {
        &self.help
    }

    pub fn workflows(&self) -> &WorkflowRunner {
        &self.workflows
    }

    pub fn workflows_mut(&mut self) -> &mut WorkflowRunner {
        &mut self.workflows
    }

    pub fn tracker(&self) -> &ContextTracker {
        &self.tracker
    }

    pub fn current_context(&self) -> Option<&FocusContext> {
        self.tracker.current()
    }

    pub fn run_state(&self) -> Option<&WorkflowRunState> {
        self.workflows.run_state()
    }

    pub fn config(&self) -> &HelpConfig {
        &self.config
    }

    // ============================================================
    // 포커스 / 사용자 액션
    // ============================================================

    /// 포커스 변경 처리
    ///
    /// 컨텍스트를 떠나면 대기 중인 자동 도움말은 취소된다.
    pub fn on_focus_changed(
        &mut self,
        focus: &dyn FocusProvider,
        element: Option<ElementId>,
    ) -> ContextChange {
        let now = self.clock.now();
        let change = self.tracker.update(focus, element, now);
        if change == ContextChange::Unchanged {
            return change;
        }

        self.cancel_auto_help();
        let context_id = match &change {
            ContextChange::Entered(id) => Some(id.clone()),
            _ => None,
        };
        debug!(parent: &self.span, "컨텍스트 변경: {:?}", context_id);
        self.events.push(AccessEvent::FocusContextChanged {
            context_id,
            element: self.tracker.current().map(|c| c.element),
        });

        if matches!(change, ContextChange::Entered(_)) {
            self.maybe_arm_auto_help(now);
        }
        change
    }

    fn maybe_arm_auto_help(&mut self, now: Instant) {
        if !self.config.auto_help_enabled {
            return;
        }
        let Some(context) = self.tracker.current() else {
            return;
        };
        let eligible = match self.config.help_mode {
            HelpMode::Automatic => true,
            HelpMode::Progressive => context.visit_count <= self.config.progressive_visit_limit,
            HelpMode::Manual | HelpMode::Tutorial => false,
        };
        if !eligible {
            return;
        }
        let Some(mapping) = self.help.find_for(context).filter(|m| m.auto_trigger) else {
            return;
        };

        let delay_ms = mapping
            .auto_trigger_delay_ms
            .unwrap_or(self.config.auto_help_delay_ms);
        let context_id = context.context_id.clone();
        debug!(
            parent: &self.span,
            "자동 도움말 예약: {} ({}ms)", context_id, delay_ms
        );
        self.timers
            .arm(GuideTimer::AutoHelp, now + Duration::from_millis(delay_ms));
        self.pending_auto_help = Some(context_id);
    }

    fn cancel_auto_help(&mut self) {
        if self.timers.cancel(&GuideTimer::AutoHelp) {
            debug!(parent: &self.span, "자동 도움말 취소: {:?}", self.pending_auto_help);
        }
        self.pending_auto_help = None;
    }

    /// 사용자 액션 (단축키 액션 ID 또는 `key:<조합>`)
    pub fn on_user_action(&mut self, action: &str, announcer: &mut dyn Announcer) -> WorkflowOutcome {
        self.tracker.record_action(action);
        let outcome = self.workflows.advance(action);
        match &outcome {
            WorkflowOutcome::Advanced { step_index } => {
                debug!(parent: &self.span, "워크플로우 단계 진행: {} → {}", action, step_index);
                self.timers.cancel(&GuideTimer::StepTimeout);
                self.announce_current_step(announcer);
                if let Some(run) = self.workflows.run_state() {
                    self.events.push(AccessEvent::WorkflowStepChanged {
                        workflow_id: run.workflow_id.clone(),
                        step_index: *step_index,
                    });
                }
            }
            WorkflowOutcome::Completed { workflow_id } => {
                self.timers.cancel(&GuideTimer::StepTimeout);
                let text = self
                    .workflows
                    .definition(workflow_id)
                    .map(|d| d.completion_text())
                    .unwrap_or_default();
                info!(parent: &self.span, "워크플로우 완료: {}", workflow_id);
                announcer.announce(&text, Priority::High);
                self.events.push(AccessEvent::WorkflowCompleted {
                    workflow_id: workflow_id.clone(),
                });
            }
            WorkflowOutcome::Ignored => {}
        }
        outcome
    }

    // ============================================================
    // 워크플로우
    // ============================================================

    /// 워크플로우 시작
    ///
    /// 모르는 ID 는 "not available" 을 안내하고 실패한다. 진행 중인 워크플로우는 취소된다.
    pub fn start_workflow(&mut self, id: &str, announcer: &mut dyn Announcer) -> Result<(), CoreError> {
        let replaced = match self.workflows.start(id) {
            Ok(replaced) => replaced,
            Err(e) => {
                match &e {
                    CoreError::NotFound { .. } => announcer.announce(NO_WORKFLOW, Priority::Normal),
                    _ => warn!(parent: &self.span, "워크플로우 시작 실패 {}: {}", id, e),
                }
                return Err(e);
            }
        };

        self.timers.cancel(&GuideTimer::StepTimeout);
        if let Some(previous) = replaced {
            info!(parent: &self.span, "진행 중 워크플로우 교체: {} → {}", previous, id);
            self.events.push(AccessEvent::WorkflowCancelled {
                workflow_id: previous,
            });
        }

        if let Some(definition) = self.workflows.definition(id) {
            let text = format!(
                "Started guided workflow: {}. {} steps total.",
                definition.title,
                definition.steps.len()
            );
            announcer.announce(&text, Priority::High);
        }
        info!(parent: &self.span, "워크플로우 시작: {}", id);
        self.announce_current_step(announcer);

        self.events.push(AccessEvent::WorkflowStarted {
            workflow_id: id.to_string(),
        });
        self.events.push(AccessEvent::WorkflowStepChanged {
            workflow_id: id.to_string(),
            step_index: 0,
        });
        Ok(())
    }

    /// 현재 컨텍스트에 맞는 워크플로우 시작. 시작한 ID 반환
    pub fn start_workflow_for_context(
        &mut self,
        announcer: &mut dyn Announcer,
    ) -> Result<String, CoreError> {
        let found = self.tracker.current().and_then(|ctx| {
            self.workflows
                .find_for_context(&lookup_keys(ctx))
                .map(|d| d.id.clone())
        });
        let Some(id) = found else {
            let context = self.tracker.current_id().unwrap_or("none").to_string();
            debug!(parent: &self.span, "컨텍스트에 맞는 워크플로우 없음: {}", context);
            announcer.announce(NO_WORKFLOW, Priority::Normal);
            return Err(CoreError::not_found("workflow", context));
        };
        self.start_workflow(&id, announcer)?;
        Ok(id)
    }

    /// 진행 중인 워크플로우 취소
    pub fn cancel_workflow(&mut self, announcer: &mut dyn Announcer) -> Option<String> {
        let Some(id) = self.workflows.cancel() else {
            announcer.announce(NO_ACTIVE_WORKFLOW, Priority::Normal);
            return None;
        };
        self.timers.cancel(&GuideTimer::StepTimeout);
        let title = self
            .workflows
            .definition(&id)
            .map_or_else(|| id.clone(), |d| d.title.clone());
        info!(parent: &self.span, "워크플로우 취소: {}", id);
        announcer.announce(&format!("Guided workflow cancelled: {}", title), Priority::Normal);
        self.events.push(AccessEvent::WorkflowCancelled {
            workflow_id: id.clone(),
        });
        Some(id)
    }

    /// 현재 단계 안내 (High) + 단계 타이머
    fn announce_current_step(&mut self, announcer: &mut dyn Announcer) {
        let Some((_, _, step)) = self.workflows.current_step() else {
            return;
        };
        announcer.announce(step.spoken_text(), Priority::High);
        if step.needs_timer() {
            let deadline = self.clock.now() + Duration::from_millis(step.timeout_ms);
            self.timers.arm(GuideTimer::StepTimeout, deadline);
        }
    }

    // ============================================================
    // 컨텍스트 도움말
    // ============================================================

    /// 현재 컨텍스트 도움말 표시
    ///
    /// 선행 워크플로우가 끝나지 않았으면 도움말 대신 선행 학습을 권한다.
    pub fn show_context_help(
        &mut self,
        announcer: &mut dyn Announcer,
    ) -> Result<HelpContent, CoreError> {
        let Some(context) = self.tracker.current() else {
            announcer.announce(NO_CONTEXT_HELP, Priority::Normal);
            return Err(CoreError::InvalidFocusTarget("컨텍스트 없음".to_string()));
        };
        let context_id = context.context_id.clone();
        let Some(mapping) = self.help.find_for(context) else {
            announcer.announce(NO_CONTEXT_HELP, Priority::Normal);
            return Err(CoreError::not_found("context_help", context_id));
        };

        if let Some(missing) = missing_prerequisite(mapping, self.workflows.completed()) {
            let text = format!(
                "This feature requires basic knowledge. \
                 Would you like to start the {} tutorial first?",
                missing
            );
            announcer.announce(&text, Priority::Normal);
            return Err(CoreError::Validation {
                field: "prerequisites".to_string(),
                message: format!("선행 워크플로우 미완료: {}", missing),
            });
        }

        let Some(content) = self.content.resolve(&mapping.help_id) else {
            warn!(parent: &self.span, "도움말 본문 없음: {}", mapping.help_id);
            announcer.announce(HELP_CONTENT_MISSING, Priority::Normal);
            return Err(CoreError::not_found("help_content", mapping.help_id.clone()));
        };

        let spoken = mapping
            .audio_description
            .clone()
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| content.title.clone());
        announcer.announce(&spoken, Priority::Normal);
        debug!(parent: &self.span, "컨텍스트 도움말: {} → {}", context_id, mapping.help_id);
        self.events.push(AccessEvent::ContextHelpShown {
            context_id,
            help_id: mapping.help_id.clone(),
        });
        Ok(content)
    }

    // ============================================================
    // 설정
    // ============================================================

    /// 도움말 모드 변경 (Automatic/Progressive 는 자동 도움말 켬, Manual 은 끔)
    pub fn set_help_mode(&mut self, mode: HelpMode) {
        info!(parent: &self.span, "도움말 모드: {:?} → {:?}", self.config.help_mode, mode);
        self.config.help_mode = mode;
        if let Some(enabled) = mode.implied_auto_help() {
            self.set_auto_help_enabled(enabled);
        }
    }

    pub fn set_auto_help_enabled(&mut self, enabled: bool) {
        self.config.auto_help_enabled = enabled;
        if !enabled {
            self.cancel_auto_help();
        }
    }

    pub fn settings(&self) -> HelpSettings {
        self.config.settings()
    }

    /// 저장된 설정 복원 (모드의 부수 효과보다 저장된 자동 도움말 값이 우선)
    pub fn apply_settings(&mut self, settings: &HelpSettings) {
        self.config.help_mode = settings.help_mode;
        self.set_auto_help_enabled(settings.auto_help_enabled);
    }

    // ============================================================
    // 타이머 / 이벤트
    // ============================================================

    /// 만료된 자동 도움말/단계 타이머 처리
    pub fn tick(&mut self, announcer: &mut dyn Announcer) {
        let now = self.clock.now();
        for timer in self.timers.take_due(now) {
            match timer {
                GuideTimer::AutoHelp => self.fire_auto_help(announcer),
                GuideTimer::StepTimeout => self.fire_step_timeout(announcer),
            }
        }
    }

    fn fire_auto_help(&mut self, announcer: &mut dyn Announcer) {
        let Some(pending) = self.pending_auto_help.take() else {
            return;
        };
        let Some(context) = self.tracker.current().filter(|c| c.context_id == pending) else {
            return;
        };
        let text = self
            .help
            .find_for(context)
            .and_then(|m| m.audio_description.clone())
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| AUTO_HELP_FALLBACK.to_string());

        debug!(parent: &self.span, "자동 도움말 제안: {}", pending);
        announcer.announce(&text, Priority::Low);
        self.events.push(AccessEvent::AutoHelpSuggested {
            context_id: pending,
            text,
        });
    }

    /// 단계 타임아웃: 다시 안내만 하고 진행/취소하지 않는다 (재무장 없음)
    fn fire_step_timeout(&mut self, announcer: &mut dyn Announcer) {
        let Some((definition, step_index, step)) = self.workflows.current_step() else {
            return;
        };
        let workflow_id = definition.id.clone();
        let text = step.spoken_text().to_string();

        info!(parent: &self.span, "워크플로우 단계 타임아웃: {} #{}", workflow_id, step_index);
        announcer.announce(STEP_TIMED_OUT, Priority::Normal);
        announcer.announce(&text, Priority::High);
        self.events.push(AccessEvent::WorkflowStepTimedOut {
            workflow_id,
            step_index,
        });
    }

    /// 가장 빠른 타이머 만료 시각
    pub fn next_wakeup(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    pub fn has_pending_auto_help(&self) -> bool {
        self.pending_auto_help.is_some()
    }

    /// 쌓인 이벤트를 꺼낸다 (발생 순서)
    pub fn take_events(&mut self) -> Vec<AccessEvent> {
        std::mem::take(&mut self.events)
    }
}
