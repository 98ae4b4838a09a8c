//! 포트 인터페이스 (trait).
//!
//! Hexagonal Architecture의 포트 레이어.
//! 위젯 툴킷, 음성 브리지, 설정 저장소, 도움말 본문은 모두 이 trait 뒤에 숨는다.
//! 엔진은 단일 UI 스레드에서 동작하므로 포트는 동기 메서드만 가진다.

pub mod announcer;
pub mod clock;
pub mod focus;
pub mod help;
pub mod settings;
pub mod speech;
