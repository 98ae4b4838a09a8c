//! 라이프사이클 관리.
//!
//! OS 시그널 또는 데모 종료를 하나의 종료 신호로 모은다.

use std::fmt;
use tokio::sync::watch;
use tracing::{info, warn};

/// 종료 사유
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// SIGINT / SIGTERM / Ctrl+C
    Signal,
    /// `--once` 데모 스크립트 완료
    DemoFinished,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Signal => write!(f, "시그널"),
            Self::DemoFinished => write!(f, "데모 완료"),
        }
    }
}

/// 라이프사이클 관리자
pub struct LifecycleManager {
    shutdown_tx: watch::Sender<Option<ShutdownReason>>,
    shutdown_rx: watch::Receiver<Option<ShutdownReason>>,
}

impl LifecycleManager {
    pub fn new() -> Self {
        let (tx, rx) = watch::channel(None);
        Self {
            shutdown_tx: tx,
            shutdown_rx: rx,
        }
    }

    /// 종료 수신기 복제
    pub fn subscribe(&self) -> watch::Receiver<Option<ShutdownReason>> {
        self.shutdown_rx.clone()
    }

    /// 종료 신호 발송. 먼저 도착한 사유만 남는다
    pub fn shutdown(&self, reason: ShutdownReason) {
        let first = self.shutdown_tx.send_if_modified(|current| {
            if current.is_some() {
                return false;
            }
            *current = Some(reason);
            true
        });
        if first {
            info!("종료 신호 발송: {}", reason);
        }
    }

    pub fn reason(&self) -> Option<ShutdownReason> {
        *self.shutdown_rx.borrow()
    }

    /// OS 시그널 대기 (SIGINT, SIGTERM)
    ///
    /// 핸들러 등록에 실패하면 경고만 남기고 영원히 대기한다.
    pub async fn wait_for_signal(&self) {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let handlers = signal(SignalKind::interrupt())
                .and_then(|int| signal(SignalKind::terminate()).map(|term| (int, term)));
            match handlers {
                Ok((mut sigint, mut sigterm)) => {
                    tokio::select! {
                        _ = sigint.recv() => info!("SIGINT 수신"),
                        _ = sigterm.recv() => info!("SIGTERM 수신"),
                    }
                }
                Err(e) => {
                    warn!("시그널 핸들러 등록 실패: {}", e);
                    std::future::pending::<()>().await;
                }
            }
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Ctrl+C 핸들러 등록 실패: {}", e);
                std::future::pending::<()>().await;
            }
            info!("Ctrl+C 수신");
        }

        self.shutdown(ShutdownReason::Signal);
    }
}

impl Default for LifecycleManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_reason() {
        let lm = LifecycleManager::new();
        let rx = lm.subscribe();
        assert!(rx.borrow().is_none());
        assert_eq!(lm.reason(), None);
    }

    #[test]
    fn first_reason_wins() {
        let lm = LifecycleManager::new();
        let rx = lm.subscribe();
        lm.shutdown(ShutdownReason::DemoFinished);
        lm.shutdown(ShutdownReason::Signal);
        assert_eq!(*rx.borrow(), Some(ShutdownReason::DemoFinished));
    }

    #[tokio::test]
    async fn subscriber_wakes_on_shutdown() {
        let lm = LifecycleManager::new();
        let mut rx = lm.subscribe();
        lm.shutdown(ShutdownReason::Signal);
        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow(), Some(ShutdownReason::Signal));
    }
}
