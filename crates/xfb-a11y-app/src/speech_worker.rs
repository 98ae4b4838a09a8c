//! 음성 출력 작업.
//!
//! 스케줄러가 채널로 넘긴 요청을 받아 로그로 낭독한다.
//! 실제 스크린 리더 브리지가 붙으면 이 자리에서 넘긴다.

use tokio::sync::{mpsc, watch};
use tracing::{debug, info};
use xfb_a11y_speech::channel::SpeechRequest;

use crate::lifecycle::ShutdownReason;

/// 종료 신호가 오거나 송신측이 모두 닫힐 때까지 요청을 처리한다. 처리 건수 반환
pub async fn run_speech_worker(
    mut requests: mpsc::UnboundedReceiver<SpeechRequest>,
    mut shutdown: watch::Receiver<Option<ShutdownReason>>,
) -> u64 {
    let mut spoken = 0u64;
    loop {
        tokio::select! {
            request = requests.recv() => {
                let Some(request) = request else {
                    debug!("음성 채널 닫힘");
                    break;
                };
                speak(&request);
                spoken += 1;
            }
            changed = shutdown.changed() => {
                if changed.is_err() || shutdown.borrow().is_some() {
                    // 이미 도착한 요청은 마저 낭독
                    while let Ok(request) = requests.try_recv() {
                        speak(&request);
                        spoken += 1;
                    }
                    break;
                }
            }
        }
    }
    info!("음성 작업 종료: {}건 낭독", spoken);
    spoken
}

fn speak(request: &SpeechRequest) {
    if request.interrupt {
        info!(priority = ?request.priority, "🔊 (중단) {}", request.text);
    } else {
        info!(priority = ?request.priority, "🔊 {}", request.text);
    }
}
