//! Focus Provider 포트.
//!
//! 구현: `xfb-a11y-engine::element_registry` (마운트/언마운트로 갱신되는 요소 레지스트리)

use crate::error::CoreError;
use crate::models::element::{CellIndex, ElementId, ElementSnapshot};

/// 위젯 트리와 능력 조회
pub trait FocusProvider: Send + Sync {
    /// 요소 스냅샷 (언마운트된 요소는 None)
    fn snapshot(&self, id: ElementId) -> Option<ElementSnapshot>;

    /// 현재 포커스 요소
    fn focused(&self) -> Option<ElementId>;

    /// 포커스 체인의 다음 요소 (끝에서 처음으로 순환)
    fn next_in_focus_chain(&self, id: ElementId) -> Option<ElementId>;

    /// 포커스 체인의 이전 요소 (처음에서 끝으로 순환)
    fn previous_in_focus_chain(&self, id: ElementId) -> Option<ElementId>;

    /// 포커스 체인 길이 (Tab 탈출 탐색 상한)
    fn focus_chain_len(&self) -> usize;

    /// 포커스 이동
    fn set_focus(&self, id: ElementId) -> Result<(), CoreError>;

    /// 그리드/목록 현재 선택 변경
    fn set_current_index(&self, id: ElementId, index: CellIndex) -> Result<(), CoreError>;

    /// 셀 표시 텍스트
    fn cell_text(&self, id: ElementId, index: CellIndex) -> Option<String>;
}
