//! 컨텍스트 도움말 매핑 레지스트리.

use std::collections::{HashMap, HashSet};
use xfb_a11y_core::error::CoreError;
use xfb_a11y_core::models::context::FocusContext;
use xfb_a11y_core::models::guide::ContextHelpMapping;

/// 컨텍스트에서 매핑을 찾을 때 시도하는 키 (정확한 컨텍스트 ID → 객체 이름 → 클래스 이름)
pub fn lookup_keys(context: &FocusContext) -> Vec<&str> {
    let mut keys = vec![context.context_id.as_str()];
    let snapshot = &context.snapshot;
    if let Some(name) = snapshot.object_name.as_deref().filter(|n| !n.is_empty()) {
        keys.push(name);
    }
    keys.push(snapshot.class_name.as_str());
    keys.dedup();
    keys
}

#[derive(Debug, Default)]
pub struct HelpRegistry {
    mappings: HashMap<String, ContextHelpMapping>,
}

impl HelpRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 매핑 등록 (같은 컨텍스트의 기존 매핑 대체)
    pub fn register(&mut self, mapping: ContextHelpMapping) -> Result<(), CoreError> {
        if mapping.context_id.is_empty() {
            return Err(CoreError::Validation {
                field: "context_id".to_string(),
                message: "컨텍스트 ID 가 비어 있음".to_string(),
            });
        }
        if mapping.help_id.is_empty() {
            return Err(CoreError::Validation {
                field: "help_id".to_string(),
                message: "도움말 ID 가 비어 있음".to_string(),
            });
        }
        self.mappings.insert(mapping.context_id.clone(), mapping);
        Ok(())
    }

    pub fn unregister(&mut self, context_id: &str) -> Option<ContextHelpMapping> {
        self.mappings.remove(context_id)
    }

    pub fn get(&self, context_id: &str) -> Option<&ContextHelpMapping> {
        self.mappings.get(context_id)
    }

    /// 포커스 컨텍스트에 해당하는 매핑
    pub fn find_for(&self, context: &FocusContext) -> Option<&ContextHelpMapping> {
        lookup_keys(context)
            .into_iter()
            .find_map(|key| self.mappings.get(key))
    }

    pub fn has_help(&self, context_id: &str) -> bool {
        self.mappings.contains_key(context_id)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }
}

/// 완료되지 않은 첫 번째 선행 워크플로우
pub fn missing_prerequisite<'a>(
    mapping: &'a ContextHelpMapping,
    completed: &HashSet<String>,
) -> Option<&'a str> {
    mapping
        .prerequisites
        .iter()
        .find(|p| !completed.contains(p.as_str()))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use xfb_a11y_core::models::element::{ElementId, ElementSnapshot, Role};

    fn make_context(context_id: &str, class: &str) -> FocusContext {
        let now = Utc::now();
        FocusContext {
            context_id: context_id.to_string(),
            element: ElementId(1),
            snapshot: ElementSnapshot::new(ElementId(1), Role::Grid, class),
            parent_context_id: None,
            visit_count: 1,
            first_visit: now,
            last_visit: now,
        }
    }

    #[test]
    fn empty_ids_are_rejected() {
        let mut registry = HelpRegistry::new();
        assert!(registry.register(ContextHelpMapping::new("", "x")).is_err());
        assert!(registry.register(ContextHelpMapping::new("x", "")).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn exact_context_wins_over_class() {
        let mut registry = HelpRegistry::new();
        registry
            .register(ContextHelpMapping::new("QTableView", "grid_help"))
            .unwrap();
        registry
            .register(ContextHelpMapping::new("QTableView_in_library", "library_help"))
            .unwrap();

        let ctx = make_context("QTableView_in_library", "QTableView");
        assert_eq!(registry.find_for(&ctx).unwrap().help_id, "library_help");

        registry.unregister("QTableView_in_library");
        assert_eq!(registry.find_for(&ctx).unwrap().help_id, "grid_help");
    }

    #[test]
    fn unmapped_context_has_no_help() {
        let registry = HelpRegistry::new();
        assert!(registry.find_for(&make_context("foo", "QLabel")).is_none());
        assert!(!registry.has_help("foo"));
    }

    #[test]
    fn reports_first_missing_prerequisite() {
        let mapping = ContextHelpMapping::new("ctx", "h")
            .with_prerequisite("first_time_user")
            .with_prerequisite("player_operation");
        let mut completed = HashSet::new();
        assert_eq!(missing_prerequisite(&mapping, &completed), Some("first_time_user"));

        completed.insert("first_time_user".to_string());
        assert_eq!(missing_prerequisite(&mapping, &completed), Some("player_operation"));

        completed.insert("player_operation".to_string());
        assert_eq!(missing_prerequisite(&mapping, &completed), None);
    }
}
