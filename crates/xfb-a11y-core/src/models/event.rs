//! 접근성 엔진 이벤트.
//!
//! 관찰자(observer)에게 등록 순서대로 동기 전달된다.

use crate::models::chord::KeyChord;
use crate::models::element::{CellIndex, ElementId};

/// 엔진이 발행하는 이벤트
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessEvent {
    /// 포커스 컨텍스트 변경 (None = 컨텍스트 없음)
    FocusContextChanged {
        context_id: Option<String>,
        element: Option<ElementId>,
    },
    /// 단축키 디스패치
    ShortcutTriggered {
        action: String,
        chord: KeyChord,
        target: Option<ElementId>,
    },
    /// 그리드/목록 선택 이동
    SelectionMoved { element: ElementId, index: CellIndex },
    /// 복합 위젯에서 Tab 탈출
    TabEscaped { from: ElementId, to: ElementId },
    /// 컨텍스트 도움말 표시
    ContextHelpShown { context_id: String, help_id: String },
    /// 자동 도움말 제안
    AutoHelpSuggested { context_id: String, text: String },
    WorkflowStarted { workflow_id: String },
    WorkflowStepChanged { workflow_id: String, step_index: usize },
    /// 단계 타임아웃 (안내만, 진행/취소 없음)
    WorkflowStepTimedOut { workflow_id: String, step_index: usize },
    WorkflowCompleted { workflow_id: String },
    WorkflowCancelled { workflow_id: String },
}

impl AccessEvent {
    /// 로그용 이벤트 이름
    pub fn name(&self) -> &'static str {
        match self {
            Self::FocusContextChanged { .. } => "focus_context_changed",
            Self::ShortcutTriggered { .. } => "shortcut_triggered",
            Self::SelectionMoved { .. } => "selection_moved",
            Self::TabEscaped { .. } => "tab_escaped",
            Self::ContextHelpShown { .. } => "context_help_shown",
            Self::AutoHelpSuggested { .. } => "auto_help_suggested",
            Self::WorkflowStarted { .. } => "workflow_started",
            Self::WorkflowStepChanged { .. } => "workflow_step_changed",
            Self::WorkflowStepTimedOut { .. } => "workflow_step_timed_out",
            Self::WorkflowCompleted { .. } => "workflow_completed",
            Self::WorkflowCancelled { .. } => "workflow_cancelled",
        }
    }
}
