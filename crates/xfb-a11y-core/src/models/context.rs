//! 포커스 컨텍스트 모델.

use crate::models::element::{ElementId, ElementSnapshot};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 요소에서 컨텍스트 ID 도출
///
/// 객체 이름이 있으면 그대로, 없으면 `{클래스}_in_{부모 이름 또는 부모 클래스}`,
/// 부모도 없으면 클래스 이름.
pub fn derive_context_id(element: &ElementSnapshot, parent: Option<&ElementSnapshot>) -> String {
    if let Some(name) = element.object_name.as_deref().filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    match parent {
        Some(p) => {
            let parent_name = p
                .object_name
                .as_deref()
                .filter(|n| !n.is_empty())
                .unwrap_or(&p.class_name);
            format!("{}_in_{}", element.class_name, parent_name)
        }
        None => element.class_name.clone(),
    }
}

/// 현재 포커스 컨텍스트 (엔진 소유)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FocusContext {
    pub context_id: String,
    pub element: ElementId,
    /// 포커스 시점의 능력 스냅샷
    pub snapshot: ElementSnapshot,
    pub parent_context_id: Option<String>,
    /// 이 컨텍스트 방문 횟수 (이번 방문 포함)
    pub visit_count: u32,
    pub first_visit: DateTime<Utc>,
    pub last_visit: DateTime<Utc>,
}

impl FocusContext {
    /// 첫 방문 여부
    pub fn is_first_visit(&self) -> bool {
        self.visit_count <= 1
    }
}
