//! # xfb-a11y-keyboard
//!
//! 키보드 조작성.
//!
//! - [`registry`]: 액션 ↔ 키 조합 ↔ 범위 표, 충돌 검사
//! - [`dispatcher`]: 키 입력 → 액션 실행 + 이벤트
//! - [`defaults`]: 기본 단축키 표
//! - [`navigation`]: 그리드/목록 방향키 이동
//! - [`tab_escape`]: 포커스를 가두지 않는 Tab 탈출 + 사용자 Tab 순서

pub mod defaults;
pub mod dispatcher;
pub mod navigation;
pub mod registry;
pub mod tab_escape;

