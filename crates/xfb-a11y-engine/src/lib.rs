//! # xfb-a11y-engine
//!
//! 접근성 엔진 조립.
//!
//! - [`element_registry`]: 마운트/언마운트로 갱신되는 요소 레지스트리 (Focus Provider 어댑터)
//! - [`event_bus`]: 동기 관찰자 등록/전달
//! - [`coordinator`]: 포커스/키 입력을 각 구성 요소로 라우팅

pub mod coordinator;
pub mod element_registry;
pub mod event_bus;

pub use coordinator::{AccessCoordinator, CoordinatorPorts};
pub use element_registry::ElementRegistry;
