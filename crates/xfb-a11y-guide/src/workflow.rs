//! 가이드 워크플로우 상태 기계.
//!
//! `Idle → Active(0) → … → Active(n-1) → Completed`, 옆길로 `Active → Cancelled`.
//! 동시에 최대 하나만 진행된다. 안내와 타이머는 [`crate::engine::GuideEngine`] 이 맡고
//! 이 모듈은 순수 상태 전이만 다룬다.

use std::collections::HashSet;
use xfb_a11y_core::error::CoreError;
use xfb_a11y_core::models::guide::{WorkflowDefinition, WorkflowRunState, WorkflowStep};

/// 사용자 액션 처리 결과
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkflowOutcome {
    /// 다음 단계로 진행
    Advanced { step_index: usize },
    /// 마지막 단계 완료
    Completed { workflow_id: String },
    /// 진행 중인 워크플로우가 없거나 기대 액션이 아님
    Ignored,
}

#[derive(Debug, Default)]
pub struct WorkflowRunner {
    /// 등록 순서 유지 (자동 선택은 먼저 등록된 것 우선)
    definitions: Vec<WorkflowDefinition>,
    run: Option<WorkflowRunState>,
    completed: HashSet<String>,
}

impl WorkflowRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// 정의 등록 (같은 ID 는 제자리에서 대체)
    pub fn register(&mut self, definition: WorkflowDefinition) -> Result<(), CoreError> {
        if definition.id.is_empty() {
            return Err(CoreError::Validation {
                field: "id".to_string(),
                message: "워크플로우 ID 가 비어 있음".to_string(),
            });
        }
        match self.definitions.iter_mut().find(|d| d.id == definition.id) {
            Some(existing) => *existing = definition,
            None => self.definitions.push(definition),
        }
        Ok(())
    }

    pub fn definition(&self, id: &str) -> Option<&WorkflowDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }

    pub fn definitions(&self) -> &[WorkflowDefinition] {
        &self.definitions
    }

    /// 워크플로우 시작
    ///
    /// 모르는 ID 나 단계가 없는 정의는 상태를 바꾸지 않고 실패한다.
    /// 이미 진행 중인 것이 있으면 교체되며, 교체된 ID 를 돌려준다.
    pub fn start(&mut self, id: &str) -> Result<Option<String>, CoreError> {
        let definition = self
            .definition(id)
            .ok_or_else(|| CoreError::not_found("workflow", id))?;
        if definition.steps.is_empty() {
            return Err(CoreError::Validation {
                field: "steps".to_string(),
                message: format!("워크플로우 {} 에 단계가 없음", id),
            });
        }

        let replaced = self.run.take().map(|r| r.workflow_id);
        self.run = Some(WorkflowRunState {
            workflow_id: id.to_string(),
            step_index: 0,
            active: true,
        });
        Ok(replaced)
    }

    /// 사용자 액션으로 진행 시도
    pub fn advance(&mut self, action: &str) -> WorkflowOutcome {
        let Some(run) = self.run.as_mut() else {
            return WorkflowOutcome::Ignored;
        };
        let Some(definition) = self.definitions.iter().find(|d| d.id == run.workflow_id) else {
            return WorkflowOutcome::Ignored;
        };
        let accepted = definition
            .steps
            .get(run.step_index)
            .is_some_and(|step| step.accepts(action));
        if !accepted {
            return WorkflowOutcome::Ignored;
        }

        if run.step_index + 1 < definition.steps.len() {
            run.step_index += 1;
            WorkflowOutcome::Advanced {
                step_index: run.step_index,
            }
        } else {
            let workflow_id = run.workflow_id.clone();
            self.run = None;
            self.completed.insert(workflow_id.clone());
            WorkflowOutcome::Completed { workflow_id }
        }
    }

    /// 진행 중인 워크플로우 취소. 취소된 ID 반환
    pub fn cancel(&mut self) -> Option<String> {
        self.run.take().map(|r| r.workflow_id)
    }

    pub fn run_state(&self) -> Option<&WorkflowRunState> {
        self.run.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.run.as_ref().is_some_and(|r| r.active)
    }

    /// 진행 중인 워크플로우와 현재 단계
    pub fn current_step(&self) -> Option<(&WorkflowDefinition, usize, &WorkflowStep)> {
        let run = self.run.as_ref()?;
        let definition = self.definition(&run.workflow_id)?;
        let step = definition.steps.get(run.step_index)?;
        Some((definition, run.step_index, step))
    }

    /// 컨텍스트에 맞는 첫 번째 미완료 워크플로우
    pub fn find_for_context(&self, context_keys: &[&str]) -> Option<&WorkflowDefinition> {
        self.definitions.iter().find(|d| {
            !self.completed.contains(&d.id)
                && d
                    .trigger_contexts
                    .iter()
                    .any(|t| context_keys.contains(&t.as_str()))
        })
    }

    pub fn is_completed(&self, id: &str) -> bool {
        self.completed.contains(id)
    }

    pub fn mark_completed(&mut self, id: impl Into<String>) {
        self.completed.insert(id.into());
    }

    pub fn completed(&self) -> &HashSet<String> {
        &self.completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_tour() -> WorkflowDefinition {
        WorkflowDefinition::new("tour", "Tour")
            .step(WorkflowStep::new("Press Tab", "key:Tab"))
            .step(WorkflowStep::new("Press F1", "help").also_accepts("key:F1"))
            .step(WorkflowStep::new("Press Shift+F1", "context_help"))
            .triggered_by("player")
    }

    fn make_runner() -> WorkflowRunner {
        let mut runner = WorkflowRunner::new();
        runner.register(make_tour()).unwrap();
        runner
    }

    #[test]
    fn unknown_workflow_fails_without_state() {
        let mut runner = make_runner();
        assert!(matches!(runner.start("nope"), Err(CoreError::NotFound { .. })));
        assert!(runner.run_state().is_none());
    }

    #[test]
    fn empty_workflow_fails_without_state() {
        let mut runner = make_runner();
        runner.register(WorkflowDefinition::new("empty", "Empty")).unwrap();
        assert!(matches!(runner.start("empty"), Err(CoreError::Validation { .. })));
        assert!(!runner.is_active());
    }

    #[test]
    fn validation_action_advances_exactly_one_step() {
        let mut runner = make_runner();
        runner.start("tour").unwrap();
        assert_eq!(runner.advance("key:Tab"), WorkflowOutcome::Advanced { step_index: 1 });
        assert_eq!(runner.advance("key:F1"), WorkflowOutcome::Advanced { step_index: 2 });
        assert_eq!(runner.current_step().unwrap().1, 2);
    }

    #[test]
    fn non_matching_actions_are_ignored() {
        let mut runner = make_runner();
        assert_eq!(runner.advance("key:Tab"), WorkflowOutcome::Ignored);
        runner.start("tour").unwrap();
        assert_eq!(runner.advance("help"), WorkflowOutcome::Ignored);
        assert_eq!(runner.current_step().unwrap().1, 0);
    }

    #[test]
    fn completion_happens_once_and_excludes_from_selection() {
        let mut runner = make_runner();
        assert_eq!(runner.find_for_context(&["player"]).unwrap().id, "tour");

        runner.start("tour").unwrap();
        runner.advance("key:Tab");
        runner.advance("help");
        assert_eq!(
            runner.advance("context_help"),
            WorkflowOutcome::Completed {
                workflow_id: "tour".to_string()
            }
        );
        assert_eq!(runner.advance("context_help"), WorkflowOutcome::Ignored);
        assert!(runner.is_completed("tour"));
        assert!(runner.find_for_context(&["player"]).is_none());
    }

    #[test]
    fn cancel_clears_run() {
        let mut runner = make_runner();
        assert_eq!(runner.cancel(), None);
        runner.start("tour").unwrap();
        assert_eq!(runner.cancel().as_deref(), Some("tour"));
        assert!(runner.run_state().is_none());
        assert!(!runner.is_completed("tour"));
    }

    #[test]
    fn starting_again_replaces_active_run() {
        let mut runner = make_runner();
        runner
            .register(
                WorkflowDefinition::new("other", "Other").step(WorkflowStep::new("x", "x")),
            )
            .unwrap();
        runner.start("tour").unwrap();
        assert_eq!(runner.start("other").unwrap().as_deref(), Some("tour"));
        assert_eq!(runner.run_state().unwrap().workflow_id, "other");
    }

    #[test]
    fn selection_follows_registration_order() {
        let mut runner = WorkflowRunner::new();
        for id in ["b", "a"] {
            runner
                .register(
                    WorkflowDefinition::new(id, id)
                        .step(WorkflowStep::new("x", "x"))
                        .triggered_by("grid"),
                )
                .unwrap();
        }
        assert_eq!(runner.find_for_context(&["grid"]).unwrap().id, "b");
        runner.mark_completed("b");
        assert_eq!(runner.find_for_context(&["grid"]).unwrap().id, "a");
    }
}
