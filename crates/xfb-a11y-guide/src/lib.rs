//! # xfb-a11y-guide
//!
//! 컨텍스트 인식 안내.
//!
//! - [`context`]: 포커스 컨텍스트, 방문 횟수, 최근 액션 추적
//! - [`help`]: 컨텍스트 → 도움말 매핑, 선행 조건 검사
//! - [`catalog`]: 메모리 내 도움말 본문 (Help Content Provider 어댑터)
//! - [`workflow`]: 가이드 워크플로우 상태 기계
//! - [`engine`]: 자동 도움말 타이머, 단계 타임아웃, 안내를 묶는 엔진
//! - [`defaults`]: 기본 매핑과 워크플로우

pub mod catalog;
pub mod context;
pub mod defaults;
pub mod engine;
pub mod help;
pub mod workflow;

pub use engine::GuideEngine;

