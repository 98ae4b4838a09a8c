//! # xfb-a11y-core
//!
//! XFB 접근성 엔진의 도메인 모델, 포트(trait) 정의, 에러 타입, 설정.
//! 모든 크레이트가 공유하는 핵심 타입과 인터페이스를 제공한다.
//!
//! ## 구조
//!
//! - [`models`]: 도메인 데이터 구조체 (단축키, 요소 스냅샷, 안내, 워크플로우)
//! - [`ports`]: Hexagonal Architecture 포트 인터페이스 (Focus Provider, Speech Output 등)
//! - [`error`]: 핵심 에러 타입 (thiserror)
//! - [`config`]: 접근성 설정 구조체
//! - [`config_manager`]: 설정 파일 관리 (로드/저장, Settings Store 어댑터)
//! - [`timer`]: 목적별 키를 가진 일회성 타이머 집합
//! - `test_support`: 테스트용 Focus Provider, 로그 수집기 (`test-support` 기능)

pub mod config;
pub mod config_manager;
pub mod error;
pub mod models;
pub mod ports;
pub mod timer;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
