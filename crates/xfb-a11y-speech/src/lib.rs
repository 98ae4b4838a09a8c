//! # xfb-a11y-speech
//!
//! 음성 안내 파이프라인.
//! 안내 요청을 우선순위 대기열에 쌓고, 포커스 안내를 디바운스하며,
//! 주기적 `tick` 마다 한 건씩 Speech Output 으로 넘긴다.
//! Critical 안내는 대기열을 거치지 않고 즉시 전달된다.

pub mod channel;
pub mod queue;
pub mod scheduler;
pub mod transcript;
