//! 요소 레지스트리 (Focus Provider 어댑터).
//!
//! 위젯 툴킷 어댑터가 요소를 마운트/언마운트할 때마다 능력 스냅샷을 갱신한다.
//! 포커스 체인은 마운트 순서이며 끝에서 처음으로 순환한다.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, Span};
use xfb_a11y_core::error::CoreError;
use xfb_a11y_core::models::element::{CellIndex, ElementId, ElementSnapshot};
use xfb_a11y_core::ports::focus::FocusProvider;

#[derive(Debug, Default)]
struct Inner {
    elements: HashMap<ElementId, ElementSnapshot>,
    /// 포커스 체인 (마운트 순서)
    chain: Vec<ElementId>,
    focused: Option<ElementId>,
    cells: HashMap<(ElementId, CellIndex), String>,
}

impl Inner {
    fn position(&self, id: ElementId) -> Option<usize> {
        self.chain.iter().position(|e| *e == id)
    }
}

#[derive(Debug)]
pub struct ElementRegistry {
    inner: RwLock<Inner>,
    next_id: AtomicU64,
    span: Span,
}

impl ElementRegistry {
    pub fn new() -> Self {
        Self::with_span(tracing::info_span!("elements"))
    }

    pub fn with_span(span: Span) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            next_id: AtomicU64::new(1),
            span,
        }
    }

    /// 새 요소 ID 발급
    pub fn allocate_id(&self) -> ElementId {
        ElementId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    /// 요소 마운트 (이미 있으면 스냅샷만 교체, 체인 위치 유지)
    pub fn mount(&self, snapshot: ElementSnapshot) -> Result<(), CoreError> {
        let mut inner = self.inner.write();
        if let Some(parent) = snapshot.parent {
            if !inner.elements.contains_key(&parent) {
                return Err(CoreError::InvalidFocusTarget(format!(
                    "{} 의 부모 {} 가 마운트되지 않음",
                    snapshot.id, parent
                )));
            }
        }
        let id = snapshot.id;
        self.next_id.fetch_max(id.0 + 1, Ordering::Relaxed);
        if inner.elements.insert(id, snapshot).is_none() {
            inner.chain.push(id);
            debug!(parent: &self.span, "요소 마운트: {}", id);
        }
        Ok(())
    }

    /// 요소와 모든 자손 언마운트. 제거된 ID 반환 (부모 먼저)
    pub fn unmount(&self, id: ElementId) -> Vec<ElementId> {
        let mut inner = self.inner.write();
        if !inner.elements.contains_key(&id) {
            return Vec::new();
        }

        let mut removed = vec![id];
        let mut cursor = 0;
        while cursor < removed.len() {
            let parent = removed[cursor];
            let children: Vec<ElementId> = inner
                .chain
                .iter()
                .filter(|c| inner.elements.get(*c).is_some_and(|e| e.parent == Some(parent)))
                .copied()
                .collect();
            removed.extend(children);
            cursor += 1;
        }

        for gone in &removed {
            inner.elements.remove(gone);
        }
        inner.chain.retain(|e| !removed.contains(e));
        inner.cells.retain(|(e, _), _| !removed.contains(e));
        if inner.focused.is_some_and(|f| removed.contains(&f)) {
            inner.focused = None;
        }
        debug!(parent: &self.span, "요소 언마운트: {} (자손 포함 {}개)", id, removed.len());
        removed
    }

    /// 스냅샷 수정
    pub fn update<F>(&self, id: ElementId, updater: F) -> Result<(), CoreError>
    where
        F: FnOnce(&mut ElementSnapshot),
    {
        let mut inner = self.inner.write();
        let snapshot = inner
            .elements
            .get_mut(&id)
            .ok_or_else(|| CoreError::not_found("element", id.to_string()))?;
        updater(snapshot);
        Ok(())
    }

    pub fn set_cell_text(&self, id: ElementId, index: CellIndex, text: impl Into<String>) {
        self.inner.write().cells.insert((id, index), text.into());
    }

    /// 요소와 조상 (안쪽부터)
    pub fn ancestry(&self, id: ElementId) -> Vec<ElementSnapshot> {
        let inner = self.inner.read();
        let mut chain = Vec::new();
        let mut cursor = inner.elements.get(&id);
        while let Some(element) = cursor {
            chain.push(element.clone());
            // 순환 방지
            if chain.len() > inner.elements.len() {
                break;
            }
            cursor = element.parent.and_then(|p| inner.elements.get(&p));
        }
        chain
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.inner.read().elements.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.inner.read().elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().elements.is_empty()
    }
}

impl Default for ElementRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FocusProvider for ElementRegistry {
    fn snapshot(&self, id: ElementId) -> Option<ElementSnapshot> {
        self.inner.read().elements.get(&id).cloned()
    }

    fn focused(&self) -> Option<ElementId> {
        self.inner.read().focused
    }

    fn next_in_focus_chain(&self, id: ElementId) -> Option<ElementId> {
        let inner = self.inner.read();
        let pos = inner.position(id)?;
        Some(inner.chain[(pos + 1) % inner.chain.len()])
    }

    fn previous_in_focus_chain(&self, id: ElementId) -> Option<ElementId> {
        let inner = self.inner.read();
        let pos = inner.position(id)?;
        let len = inner.chain.len();
        Some(inner.chain[(pos + len - 1) % len])
    }

    fn focus_chain_len(&self) -> usize {
        self.inner.read().chain.len()
    }

    fn set_focus(&self, id: ElementId) -> Result<(), CoreError> {
        let mut inner = self.inner.write();
        let focusable = inner.elements.get(&id).is_some_and(|e| e.is_focusable());
        if !focusable {
            return Err(CoreError::InvalidFocusTarget(id.to_string()));
        }
        inner.focused = Some(id);
        Ok(())
    }

    fn set_current_index(&self, id: ElementId, index: CellIndex) -> Result<(), CoreError> {
        let mut inner = self.inner.write();
        let container = inner
            .elements
            .get_mut(&id)
            .and_then(|e| e.container.as_mut())
            .ok_or_else(|| CoreError::InvalidFocusTarget(id.to_string()))?;
        if index.row >= container.rows || index.column >= container.columns {
            return Err(CoreError::Validation {
                field: "index".to_string(),
                message: format!("({}, {}) 범위 밖", index.row, index.column),
            });
        }
        container.current = Some(index);
        Ok(())
    }

    fn cell_text(&self, id: ElementId, index: CellIndex) -> Option<String> {
        self.inner.read().cells.get(&(id, index)).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xfb_a11y_core::models::element::{ContainerInfo, Role};
    use xfb_a11y_core::test_support::LogCapture;

    fn make_registry() -> ElementRegistry {
        let registry = ElementRegistry::new();
        registry
            .mount(ElementSnapshot::new(ElementId(1), Role::Window, "QMainWindow"))
            .unwrap();
        registry
            .mount(
                ElementSnapshot::new(ElementId(2), Role::Pane, "QWidget")
                    .with_parent(ElementId(1))
                    .with_scope("Player"),
            )
            .unwrap();
        registry
            .mount(ElementSnapshot::new(ElementId(3), Role::Button, "QPushButton").with_parent(ElementId(2)))
            .unwrap();
        registry
            .mount(
                ElementSnapshot::new(ElementId(4), Role::Grid, "QTableView")
                    .with_parent(ElementId(1))
                    .with_container(ContainerInfo::grid(2, 2)),
            )
            .unwrap();
        registry
    }

    #[test]
    fn chain_wraps_in_mount_order() {
        let registry = make_registry();
        assert_eq!(registry.next_in_focus_chain(ElementId(4)), Some(ElementId(1)));
        assert_eq!(registry.previous_in_focus_chain(ElementId(1)), Some(ElementId(4)));
        assert_eq!(registry.focus_chain_len(), 4);
        assert_eq!(registry.next_in_focus_chain(ElementId(99)), None);
    }

    #[test]
    fn mount_requires_known_parent() {
        let registry = ElementRegistry::new();
        let orphan = ElementSnapshot::new(ElementId(5), Role::Button, "QPushButton").with_parent(ElementId(9));
        assert!(registry.mount(orphan).is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn remount_keeps_chain_position() {
        let registry = make_registry();
        registry
            .mount(ElementSnapshot::new(ElementId(1), Role::Window, "QMainWindow").with_name("Main"))
            .unwrap();
        assert_eq!(registry.focus_chain_len(), 4);
        assert_eq!(registry.snapshot(ElementId(1)).unwrap().display_name(), "Main");
    }

    #[test]
    fn unmount_removes_descendants_and_focus() {
        let registry = make_registry();
        registry.set_focus(ElementId(3)).unwrap();
        let removed = registry.unmount(ElementId(2));
        assert_eq!(removed, vec![ElementId(2), ElementId(3)]);
        assert_eq!(registry.focused(), None);
        assert!(registry.snapshot(ElementId(3)).is_none());
        assert_eq!(registry.focus_chain_len(), 2);
    }

    #[test]
    fn ancestry_is_innermost_first() {
        let registry = make_registry();
        let ids: Vec<ElementId> = registry.ancestry(ElementId(3)).iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![ElementId(3), ElementId(2), ElementId(1)]);
    }

    #[test]
    fn selection_is_bounds_checked() {
        let registry = make_registry();
        registry.set_current_index(ElementId(4), CellIndex::new(1, 1)).unwrap();
        assert!(registry.set_current_index(ElementId(4), CellIndex::new(2, 0)).is_err());
        assert!(registry.set_current_index(ElementId(3), CellIndex::new(0, 0)).is_err());
    }

    #[test]
    fn focus_rejects_unfocusable() {
        let registry = make_registry();
        registry.update(ElementId(3), |e| e.enabled = false).unwrap();
        assert!(registry.set_focus(ElementId(3)).is_err());
        assert!(registry.set_focus(ElementId(42)).is_err());
    }

    #[test]
    fn allocated_ids_skip_mounted_ones() {
        let registry = make_registry();
        assert_eq!(registry.allocate_id(), ElementId(5));
    }

    #[test]
    fn mount_logs_under_injected_span() {
        let capture = LogCapture::new();
        capture.run(|| {
            let registry = ElementRegistry::with_span(tracing::info_span!("ui_tree"));
            registry
                .mount(ElementSnapshot::new(ElementId(1), Role::Window, "QMainWindow"))
                .unwrap();
            registry.unmount(ElementId(1));
        });

        let output = capture.output();
        let lines: Vec<&str> = output.lines().filter(|l| l.contains("요소")).collect();
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|l| l.contains("ui_tree")));
    }

    #[test]
    fn cell_text_is_dropped_on_unmount() {
        let registry = make_registry();
        registry.set_cell_text(ElementId(4), CellIndex::new(0, 0), "Song");
        assert_eq!(registry.cell_text(ElementId(4), CellIndex::new(0, 0)).as_deref(), Some("Song"));
        registry.unmount(ElementId(4));
        assert_eq!(registry.cell_text(ElementId(4), CellIndex::new(0, 0)), None);
    }
}
