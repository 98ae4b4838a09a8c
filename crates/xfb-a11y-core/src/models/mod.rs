//! 도메인 모델 모듈.
//!
//! 단축키 조합, 요소 스냅샷, 포커스 컨텍스트, 음성 안내, 도움말/워크플로우 정의,
//! 엔진 이벤트 등 크레이트 간 공유되는 데이터 구조체를 정의한다.

pub mod announcement;
pub mod chord;
pub mod context;
pub mod element;
pub mod event;
pub mod guide;
