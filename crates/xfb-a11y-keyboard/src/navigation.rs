//! 그리드/목록 방향키 내비게이션.
//!
//! 이동 계산([`move_index`])은 상태 없는 순수 함수이고, [`GridNavigator`] 가
//! Focus Provider 로 선택을 갱신한 뒤 상세 수준에 맞춰 안내를 요청한다.

use tracing::{debug, Span};
use xfb_a11y_core::error::CoreError;
use xfb_a11y_core::models::announcement::{Priority, Verbosity};
use xfb_a11y_core::models::chord::Key;
use xfb_a11y_core::models::element::{CellIndex, ContainerInfo, ContainerKind, ElementId};
use xfb_a11y_core::ports::announcer::Announcer;
use xfb_a11y_core::ports::focus::FocusProvider;

/// 방향
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// 방향키 → 방향
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::Up => Some(Self::Up),
            Key::Down => Some(Self::Down),
            Key::Left => Some(Self::Left),
            Key::Right => Some(Self::Right),
            _ => None,
        }
    }
}

/// 이동 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Movement {
    /// 새 위치로 이동
    Moved(CellIndex),
    /// 경계에 막힘 (처리했지만 위치 변화 없음)
    Blocked,
    /// 이 컨테이너에 해당 없는 방향 (목록의 좌우)
    NotApplicable,
}

impl Movement {
    /// 키 입력을 소비했는지
    pub fn is_handled(&self) -> bool {
        !matches!(self, Self::NotApplicable)
    }
}

/// 현재 위치에서 한 칸 이동
///
/// 그리드: 상하 = 행 ±1, 좌우 = 열 ±1. 목록: 상하만.
/// `[0, 범위)` 를 벗어나면 `Blocked`. 선택이 없으면 첫 칸을 선택한다.
pub fn move_index(container: &ContainerInfo, direction: Direction) -> Movement {
    if container.kind == ContainerKind::List
        && matches!(direction, Direction::Left | Direction::Right)
    {
        return Movement::NotApplicable;
    }
    if container.rows == 0 || container.columns == 0 {
        return Movement::Blocked;
    }

    let Some(current) = container.current else {
        return Movement::Moved(CellIndex::new(0, 0));
    };

    let (rows, columns) = (container.rows, container.columns);
    let next = match direction {
        Direction::Up if current.row > 0 => CellIndex::new(current.row - 1, current.column),
        Direction::Down if current.row + 1 < rows => CellIndex::new(current.row + 1, current.column),
        Direction::Left if current.column > 0 => CellIndex::new(current.row, current.column - 1),
        Direction::Right if current.column + 1 < columns => {
            CellIndex::new(current.row, current.column + 1)
        }
        _ => return Movement::Blocked,
    };
    Movement::Moved(next)
}

/// 선택 이동 안내 문구
pub fn describe_cell(
    name: &str,
    container: &ContainerInfo,
    index: CellIndex,
    value: &str,
    verbosity: Verbosity,
) -> String {
    let value = if value.is_empty() { "blank" } else { value };
    let column = container.column_name(index.column);
    match verbosity {
        Verbosity::Terse => value.to_string(),
        Verbosity::Normal => format!("{}: {}", column, value),
        Verbosity::Verbose => {
            let unit = match container.kind {
                ContainerKind::Grid => "Row",
                ContainerKind::List => "Item",
            };
            format!(
                "{}, {} {} of {}, {}: {}",
                name,
                unit,
                index.row + 1,
                container.rows,
                column,
                value
            )
        }
    }
}

fn edge_text(kind: ContainerKind, direction: Direction) -> &'static str {
    match (kind, direction) {
        (ContainerKind::List, Direction::Up) => "First item",
        (ContainerKind::List, _) => "Last item",
        (ContainerKind::Grid, Direction::Up) => "First row",
        (ContainerKind::Grid, Direction::Down) => "Last row",
        (ContainerKind::Grid, Direction::Left) => "First column",
        (ContainerKind::Grid, Direction::Right) => "Last column",
    }
}

/// 내비게이션 옵션
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationOptions {
    pub verbosity: Verbosity,
    /// 경계에서 막힐 때 안내
    pub announce_edges: bool,
}

/// Focus Provider 위에서 이동을 적용하는 내비게이터
pub struct GridNavigator {
    span: Span,
}

impl GridNavigator {
    pub fn new() -> Self {
        Self::with_span(tracing::info_span!("navigation"))
    }

    pub fn with_span(span: Span) -> Self {
        Self { span }
    }

    /// 요소의 컨테이너에서 한 칸 이동
    ///
    /// 이동하면 선택을 갱신하고 Normal 우선순위로 셀을 안내한다.
    pub fn navigate(
        &self,
        focus: &dyn FocusProvider,
        element: ElementId,
        direction: Direction,
        options: NavigationOptions,
        announcer: &mut dyn Announcer,
    ) -> Result<Movement, CoreError> {
        let snapshot = focus
            .snapshot(element)
            .ok_or_else(|| CoreError::InvalidFocusTarget(element.to_string()))?;
        let container = snapshot.container.as_ref().ok_or_else(|| {
            CoreError::InvalidFocusTarget(format!("{} 는 그리드/목록이 아님", element))
        })?;

        let movement = move_index(container, direction);
        match movement {
            Movement::Moved(index) => {
                focus.set_current_index(element, index)?;
                let value = focus.cell_text(element, index).unwrap_or_default();
                let text = describe_cell(
                    snapshot.display_name(),
                    container,
                    index,
                    &value,
                    options.verbosity,
                );
                debug!(
                    parent: &self.span,
                    "선택 이동 {} → ({}, {})", element, index.row, index.column
                );
                announcer.announce(&text, Priority::Normal);
            }
            Movement::Blocked => {
                debug!(parent: &self.span, "경계에서 이동 막힘: {} {:?}", element, direction);
                if options.announce_edges {
                    announcer.announce(edge_text(container.kind, direction), Priority::Normal);
                }
            }
            Movement::NotApplicable => {}
        }
        Ok(movement)
    }
}

impl Default for GridNavigator {
    fn default() -> Self {
        Self::new()
    }
}
