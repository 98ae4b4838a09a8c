//! 단축키 레지스트리.
//!
//! 액션 ↔ 키 조합 ↔ 범위 표를 소유한다. 같은 키 조합을 동시에 받을 수 있는
//! 범위 쌍(같은 컨텍스트, 또는 어느 한쪽이 Global)에서는 한 액션만 그 조합을 가진다.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use tracing::{debug, info, warn, Span};
use xfb_a11y_core::error::CoreError;
use xfb_a11y_core::models::chord::KeyChord;
use xfb_a11y_core::models::element::ElementId;

/// 단축키 범위
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ShortcutScope {
    /// 항상 활성
    Global,
    /// 이름 붙은 컨텍스트 (예: "Player")
    Context(String),
}

impl ShortcutScope {
    pub fn context(name: impl Into<String>) -> Self {
        Self::Context(name.into())
    }

    /// 두 범위가 같은 키 입력을 동시에 받을 수 있는지
    pub fn overlaps(&self, other: &ShortcutScope) -> bool {
        match (self, other) {
            (Self::Global, _) | (_, Self::Global) => true,
            (Self::Context(a), Self::Context(b)) => a == b,
        }
    }
}

impl fmt::Display for ShortcutScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("Global"),
            Self::Context(name) => f.write_str(name),
        }
    }
}

/// 단축키 바인딩
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutBinding {
    pub action: String,
    pub chord: KeyChord,
    pub description: String,
    pub scope: ShortcutScope,
    /// 사용자가 다시 지정할 수 있는지
    pub customizable: bool,
    /// 특정 요소에 묶인 바인딩 (요소 언마운트 시 해제)
    pub bound_element: Option<ElementId>,
}

impl ShortcutBinding {
    /// Global, 변경 가능 바인딩
    pub fn new(action: impl Into<String>, chord: KeyChord, description: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            chord,
            description: description.into(),
            scope: ShortcutScope::Global,
            customizable: true,
            bound_element: None,
        }
    }

    pub fn in_scope(mut self, scope: ShortcutScope) -> Self {
        self.scope = scope;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.customizable = false;
        self
    }

    pub fn bound_to(mut self, element: ElementId) -> Self {
        self.bound_element = Some(element);
        self
    }
}

/// 단축키 레지스트리
pub struct ShortcutRegistry {
    bindings: HashMap<String, ShortcutBinding>,
    /// 키 조합 → 그 조합을 가진 액션들 (서로 다른 비겹침 범위)
    chord_index: HashMap<KeyChord, Vec<String>>,
    span: Span,
}

impl ShortcutRegistry {
    pub fn new() -> Self {
        Self::with_span(tracing::info_span!("shortcuts"))
    }

    pub fn with_span(span: Span) -> Self {
        Self {
            bindings: HashMap::new(),
            chord_index: HashMap::new(),
            span,
        }
    }

    /// 바인딩 등록
    ///
    /// 겹치는 범위에서 다른 액션이 같은 조합을 가지면 아무것도 바꾸지 않고 실패한다.
    /// 성공하면 같은 액션의 이전 바인딩을 대체한다.
    pub fn register(&mut self, binding: ShortcutBinding) -> Result<(), CoreError> {
        if binding.action.is_empty() {
            return Err(CoreError::Validation {
                field: "action".to_string(),
                message: "빈 액션 ID".to_string(),
            });
        }

        if let Some(existing) = self.conflicting_action(&binding) {
            warn!(
                parent: &self.span,
                "단축키 충돌: {} ({}) ↔ {}", binding.chord, binding.action, existing
            );
            return Err(CoreError::ShortcutConflict {
                chord: binding.chord.to_string(),
                existing_action: existing,
            });
        }

        self.unregister(&binding.action);
        debug!(
            parent: &self.span,
            "단축키 등록: {} ({}, {}) - {}",
            binding.action,
            binding.chord,
            binding.scope,
            binding.description
        );
        self.chord_index
            .entry(binding.chord)
            .or_default()
            .push(binding.action.clone());
        self.bindings.insert(binding.action.clone(), binding);
        Ok(())
    }

    fn conflicting_action(&self, binding: &ShortcutBinding) -> Option<String> {
        self.chord_index
            .get(&binding.chord)?
            .iter()
            .filter(|action| **action != binding.action)
            .filter_map(|action| self.bindings.get(action))
            .find(|other| other.scope.overlaps(&binding.scope))
            .map(|other| other.action.clone())
    }

    /// 바인딩 제거
    pub fn unregister(&mut self, action: &str) -> Option<ShortcutBinding> {
        let binding = self.bindings.remove(action)?;
        if let Some(actions) = self.chord_index.get_mut(&binding.chord) {
            actions.retain(|a| a != action);
            if actions.is_empty() {
                self.chord_index.remove(&binding.chord);
            }
        }
        debug!(parent: &self.span, "단축키 해제: {}", action);
        Some(binding)
    }

    pub fn get(&self, action: &str) -> Option<&ShortcutBinding> {
        self.bindings.get(action)
    }

    /// 키 조합 해석
    ///
    /// `active_contexts` 는 안쪽 범위부터. 가장 안쪽 컨텍스트의 바인딩이 우선이고,
    /// Global 은 항상 활성이다. 수식키 집합까지 정확히 일치해야 한다.
    pub fn resolve(&self, chord: &KeyChord, active_contexts: &[String]) -> Option<&ShortcutBinding> {
        let candidates: Vec<&ShortcutBinding> = self
            .chord_index
            .get(chord)?
            .iter()
            .filter_map(|action| self.bindings.get(action))
            .collect();

        active_contexts
            .iter()
            .find_map(|ctx| {
                candidates
                    .iter()
                    .find(|b| matches!(&b.scope, ShortcutScope::Context(name) if name == ctx))
            })
            .or_else(|| candidates.iter().find(|b| b.scope == ShortcutScope::Global))
            .copied()
    }

    /// 사용자 재지정
    pub fn rebind(&mut self, action: &str, chord: KeyChord) -> Result<(), CoreError> {
        let current = self
            .bindings
            .get(action)
            .ok_or_else(|| CoreError::not_found("Shortcut", action))?;
        if !current.customizable {
            return Err(CoreError::NotCustomizable(action.to_string()));
        }
        let rebound = ShortcutBinding {
            chord,
            ..current.clone()
        };
        self.register(rebound)?;
        info!(parent: &self.span, "단축키 재지정: {} → {}", action, chord);
        Ok(())
    }

    /// 설정의 재정의 적용. 실패한 항목은 건너뛰고 반환
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, KeyChord>) -> Vec<(String, CoreError)> {
        let mut failures = Vec::new();
        for (action, chord) in overrides {
            if let Err(e) = self.rebind(action, *chord) {
                warn!(parent: &self.span, "단축키 재정의 실패 {}: {}", action, e);
                failures.push((action.clone(), e));
            }
        }
        failures
    }

    /// 요소에 묶인 바인딩 해제. 해제한 개수 반환
    pub fn release_element(&mut self, element: ElementId) -> usize {
        let actions: Vec<String> = self
            .bindings
            .values()
            .filter(|b| b.bound_element == Some(element))
            .map(|b| b.action.clone())
            .collect();
        for action in &actions {
            self.unregister(action);
        }
        actions.len()
    }

    /// 범위의 바인딩 (액션 ID 순)
    pub fn bindings_in_scope(&self, scope: &ShortcutScope) -> Vec<&ShortcutBinding> {
        let mut found: Vec<&ShortcutBinding> =
            self.bindings.values().filter(|b| &b.scope == scope).collect();
        found.sort_by(|a, b| a.action.cmp(&b.action));
        found
    }

    /// 전체 목록 (범위, 액션 ID 순)
    pub fn listing(&self) -> Vec<&ShortcutBinding> {
        let mut all: Vec<&ShortcutBinding> = self.bindings.values().collect();
        all.sort_by(|a, b| a.scope.cmp(&b.scope).then_with(|| a.action.cmp(&b.action)));
        all
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
