//! # xfb-a11y
//!
//! XFB 접근성 엔진 실행 파일.
//! 설정 로드, 구성 요소 조립, 주기 루프, 종료 시 도움말 설정 저장을 담당한다.
//! 위젯 툴킷 없이 데모 시나리오로 포커스/키 입력을 흘려보낸다.

mod demo;
mod lifecycle;
mod speech_worker;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::info;
use tracing_subscriber::EnvFilter;
use xfb_a11y_core::config_manager::ConfigManager;
use xfb_a11y_core::models::announcement::Verbosity;
use xfb_a11y_core::models::guide::HelpMode;
use xfb_a11y_core::ports::clock::{Clock, SystemClock};
use xfb_a11y_engine::{AccessCoordinator, CoordinatorPorts, ElementRegistry};
use xfb_a11y_guide::catalog::HelpCatalog;
use xfb_a11y_speech::channel::ChannelSpeechOutput;

use crate::demo::{DemoScript, DemoUi};
use crate::lifecycle::{LifecycleManager, ShutdownReason};

/// 앱이 직접 처리하는 플레이어 액션 (로그만 남긴다)
const PLAYER_ACTIONS: &[&str] = &["play_pause", "stop", "volume_up", "volume_down", "mute"];

/// CLI 인자
#[derive(Parser, Debug)]
#[command(name = "xfb-a11y")]
#[command(author, version, about = "XFB 접근성 이벤트 조정 엔진", long_about = None)]
struct Args {
    /// 설정 파일 경로 (미지정 시 플랫폼 설정 디렉토리)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 로그 레벨 (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// 안내 상세 수준 (설정 파일 값보다 우선)
    #[arg(long, value_enum)]
    verbosity: Option<VerbosityArg>,

    /// 도움말 모드 (저장된 설정보다 우선)
    #[arg(long, value_enum)]
    help_mode: Option<HelpModeArg>,

    /// 주기 처리 간격 (밀리초)
    #[arg(long, default_value_t = 50)]
    tick_ms: u64,

    /// 데모 시나리오가 끝나고 안내가 모두 나가면 종료
    #[arg(long)]
    once: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum VerbosityArg {
    Terse,
    Normal,
    Verbose,
}

impl From<VerbosityArg> for Verbosity {
    fn from(arg: VerbosityArg) -> Self {
        match arg {
            VerbosityArg::Terse => Verbosity::Terse,
            VerbosityArg::Normal => Verbosity::Normal,
            VerbosityArg::Verbose => Verbosity::Verbose,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum HelpModeArg {
    Manual,
    Automatic,
    Progressive,
    Tutorial,
}

impl From<HelpModeArg> for HelpMode {
    fn from(arg: HelpModeArg) -> Self {
        match arg {
            HelpModeArg::Manual => HelpMode::Manual,
            HelpModeArg::Automatic => HelpMode::Automatic,
            HelpModeArg::Progressive => HelpMode::Progressive,
            HelpModeArg::Tutorial => HelpMode::Tutorial,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!(
        "xfb_a11y={level},xfb_a11y_core={level},xfb_a11y_speech={level},\
         xfb_a11y_keyboard={level},xfb_a11y_guide={level},xfb_a11y_engine={level},\
         xfb_a11y_app={level}",
        level = args.log_level
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log_filter)),
        )
        .init();

    info!("XFB 접근성 엔진 v{} 시작", env!("CARGO_PKG_VERSION"));

    let config_manager = Arc::new(match &args.config {
        Some(path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    }
    .context("설정 로드 실패")?);
    info!("설정 파일: {}", config_manager.config_path().display());

    let mut config = config_manager.get();
    if let Some(verbosity) = args.verbosity {
        config.navigation.verbosity = verbosity.into();
    }

    let lifecycle = Arc::new(LifecycleManager::new());
    let root_span = tracing::info_span!("a11y");
    let (speech, speech_rx) =
        ChannelSpeechOutput::with_span(tracing::info_span!(parent: &root_span, "speech_channel"));
    let speech_task = tokio::spawn(speech_worker::run_speech_worker(
        speech_rx,
        lifecycle.subscribe(),
    ));

    let elements = Arc::new(ElementRegistry::with_span(tracing::info_span!(
        parent: &root_span,
        "elements"
    )));
    let clock = Arc::new(SystemClock);
    let mut coordinator = AccessCoordinator::with_span(
        &config,
        CoordinatorPorts {
            focus: elements.clone(),
            speech: Arc::new(speech),
            clock: clock.clone(),
            help: Arc::new(HelpCatalog::with_defaults()),
            settings: Some(config_manager.clone()),
        },
        root_span,
    )
    .context("접근성 엔진 초기화 실패")?;

    if let Some(mode) = args.help_mode {
        coordinator.set_help_mode(mode.into());
    }
    for action in PLAYER_ACTIONS {
        coordinator.on_action(*action, |binding| {
            info!("플레이어 액션: {} ({})", binding.action, binding.chord);
        });
    }
    coordinator.subscribe(|event| info!("이벤트: {} {:?}", event.name(), event));

    let ui = DemoUi::mount(&elements)?;
    let mut script = DemoScript::standard(&ui)?;
    info!(
        "데모 시작: 요소 {}개, 단축키 {}개, 도움말 {:?}",
        elements.len(),
        coordinator.shortcuts().len(),
        coordinator.help_settings()
    );

    {
        let lifecycle = lifecycle.clone();
        tokio::spawn(async move { lifecycle.wait_for_signal().await });
    }

    let mut shutdown_rx = lifecycle.subscribe();
    let mut interval = tokio::time::interval(Duration::from_millis(args.tick_ms.max(1)));
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                script.poll(clock.now(), &mut coordinator, &elements);
                coordinator.tick();

                let scheduler = coordinator.scheduler();
                if args.once
                    && script.is_finished()
                    && scheduler.queue_len() == 0
                    && !scheduler.has_pending_focus()
                {
                    lifecycle.shutdown(ShutdownReason::DemoFinished);
                }
            }
            _ = shutdown_rx.changed() => {
                break;
            }
        }
    }

    let reason = lifecycle.reason().unwrap_or(ShutdownReason::Signal);
    info!("종료 중... ({})", reason);
    coordinator.shutdown().context("도움말 설정 저장 실패")?;
    let stats = coordinator.scheduler().stats();
    drop(coordinator);

    let spoken = speech_task.await.context("음성 작업 종료 대기 실패")?;
    info!("안내 통계: {:?}, 낭독 {}건", stats, spoken);
    info!("XFB 접근성 엔진 종료");
    Ok(())
}
