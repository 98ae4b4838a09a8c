//! UI 요소 능력 스냅샷.
//!
//! 위젯 트리를 직접 참조하지 않고, Focus Provider 가 돌려주는
//! 읽기 전용 스냅샷으로 요소의 역할/이름/상태/컨테이너 정보를 다룬다.

use serde::{Deserialize, Serialize};
use std::fmt;

/// 요소 식별자 (위젯 트리 내 고유)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// 접근성 역할
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Window,
    Pane,
    Button,
    TextField,
    Grid,
    List,
    ListItem,
    Cell,
    Slider,
    CheckBox,
    ComboBox,
    Menu,
    MenuItem,
    Label,
    Other,
}

impl Role {
    /// 음성 안내용 역할 이름
    pub fn label(&self) -> &'static str {
        match self {
            Self::Window => "window",
            Self::Pane => "pane",
            Self::Button => "button",
            Self::TextField => "edit text",
            Self::Grid => "table",
            Self::List => "list",
            Self::ListItem => "list item",
            Self::Cell => "cell",
            Self::Slider => "slider",
            Self::CheckBox => "check box",
            Self::ComboBox => "combo box",
            Self::Menu => "menu",
            Self::MenuItem => "menu item",
            Self::Label => "label",
            Self::Other => "control",
        }
    }
}

/// 포커스 정책
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FocusPolicy {
    /// 포커스 받지 않음
    NoFocus,
    /// Tab 으로만
    TabFocus,
    /// 클릭으로만
    ClickFocus,
    /// Tab + 클릭
    #[default]
    StrongFocus,
}

/// 복합 위젯 종류
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerKind {
    /// 행 × 열 표
    Grid,
    /// 단일 열 목록
    List,
}

/// 그리드/목록 셀 위치 (0 기반)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellIndex {
    pub row: usize,
    pub column: usize,
}

impl CellIndex {
    pub fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

/// 복합 위젯의 범위와 현재 선택
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerInfo {
    pub kind: ContainerKind,
    pub rows: usize,
    /// 목록은 항상 1
    pub columns: usize,
    /// 현재 선택 위치 (선택 없음이면 None)
    pub current: Option<CellIndex>,
    /// 열 머리글 (없으면 "Column N" 으로 대체)
    #[serde(default)]
    pub column_headers: Vec<String>,
}

impl ContainerInfo {
    pub fn grid(rows: usize, columns: usize) -> Self {
        Self {
            kind: ContainerKind::Grid,
            rows,
            columns,
            current: None,
            column_headers: Vec::new(),
        }
    }

    pub fn list(rows: usize) -> Self {
        Self {
            kind: ContainerKind::List,
            rows,
            columns: 1,
            current: None,
            column_headers: Vec::new(),
        }
    }

    pub fn with_current(mut self, index: CellIndex) -> Self {
        self.current = Some(index);
        self
    }

    pub fn with_headers(mut self, headers: Vec<String>) -> Self {
        self.column_headers = headers;
        self
    }

    /// 열 이름 (머리글 없으면 1 기반 "Column N")
    pub fn column_name(&self, column: usize) -> String {
        self.column_headers
            .get(column)
            .filter(|h| !h.is_empty())
            .cloned()
            .unwrap_or_else(|| format!("Column {}", column + 1))
    }
}

/// 요소 능력 스냅샷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementSnapshot {
    pub id: ElementId,
    /// 부모 요소
    pub parent: Option<ElementId>,
    pub role: Role,
    /// 위젯 클래스 이름 (예: "QTableView")
    pub class_name: String,
    /// 개발자가 지정한 객체 이름
    pub object_name: Option<String>,
    /// 접근성 이름
    #[serde(default)]
    pub accessible_name: String,
    /// 접근성 설명
    #[serde(default)]
    pub description: String,
    pub enabled: bool,
    pub visible: bool,
    #[serde(default)]
    pub focus_policy: FocusPolicy,
    /// 이 요소와 하위 요소에서 활성화되는 단축키 컨텍스트
    pub shortcut_scope: Option<String>,
    /// 그리드/목록 정보
    pub container: Option<ContainerInfo>,
}

impl ElementSnapshot {
    /// 보이고 활성화된 기본 요소
    pub fn new(id: ElementId, role: Role, class_name: impl Into<String>) -> Self {
        Self {
            id,
            parent: None,
            role,
            class_name: class_name.into(),
            object_name: None,
            accessible_name: String::new(),
            description: String::new(),
            enabled: true,
            visible: true,
            focus_policy: FocusPolicy::StrongFocus,
            shortcut_scope: None,
            container: None,
        }
    }

    pub fn with_parent(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_object_name(mut self, name: impl Into<String>) -> Self {
        self.object_name = Some(name.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name = name.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_focus_policy(mut self, policy: FocusPolicy) -> Self {
        self.focus_policy = policy;
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.shortcut_scope = Some(scope.into());
        self
    }

    pub fn with_container(mut self, container: ContainerInfo) -> Self {
        self.container = Some(container);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Tab 이동 대상이 될 수 있는지 (보임 + 활성 + 포커스 정책 있음)
    pub fn is_focusable(&self) -> bool {
        self.visible && self.enabled && self.focus_policy != FocusPolicy::NoFocus
    }

    /// 안내용 이름: 접근성 이름 → 객체 이름 → 클래스 이름
    pub fn display_name(&self) -> &str {
        if !self.accessible_name.is_empty() {
            &self.accessible_name
        } else if let Some(name) = self.object_name.as_deref().filter(|n| !n.is_empty()) {
            name
        } else {
            &self.class_name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focusable_requires_visible_enabled_and_policy() {
        let base = ElementSnapshot::new(ElementId(1), Role::Button, "QPushButton");
        assert!(base.is_focusable());
        assert!(!base.clone().hidden().is_focusable());
        assert!(!base.clone().disabled().is_focusable());
        assert!(!base.with_focus_policy(FocusPolicy::NoFocus).is_focusable());
    }

    #[test]
    fn display_name_fallbacks() {
        let e = ElementSnapshot::new(ElementId(1), Role::Button, "QPushButton");
        assert_eq!(e.display_name(), "QPushButton");
        let e = e.with_object_name("playButton");
        assert_eq!(e.display_name(), "playButton");
        let e = e.with_name("Play");
        assert_eq!(e.display_name(), "Play");
    }

    #[test]
    fn column_name_falls_back_to_number() {
        let grid = ContainerInfo::grid(3, 3).with_headers(vec!["Title".into(), String::new()]);
        assert_eq!(grid.column_name(0), "Title");
        assert_eq!(grid.column_name(1), "Column 2");
        assert_eq!(grid.column_name(2), "Column 3");
    }
}
