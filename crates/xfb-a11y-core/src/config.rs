//! 접근성 엔진 설정 구조체.
//!
//! 안내 대기열 크기, 드레인 간격, 포커스 디바운스, 내비게이션 상세 수준,
//! 도움말 모드, 단축키 재정의 등 런타임 설정을 정의한다.

use crate::models::announcement::Verbosity;
use crate::models::chord::KeyChord;
use crate::models::guide::{HelpMode, HelpSettings};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// 최상위 접근성 설정
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessConfig {
    /// 음성 안내 스케줄러 설정
    #[serde(default)]
    pub announcer: AnnouncerConfig,
    /// 그리드/목록 내비게이션 설정
    #[serde(default)]
    pub navigation: NavigationConfig,
    /// 컨텍스트 도움말 설정
    #[serde(default)]
    pub help: HelpConfig,
    /// 단축키 설정
    #[serde(default)]
    pub shortcuts: ShortcutConfig,
}

impl AccessConfig {
    /// 기본 설정
    pub fn default_config() -> Self {
        Self {
            announcer: AnnouncerConfig::default(),
            navigation: NavigationConfig::default(),
            help: HelpConfig::default(),
            shortcuts: ShortcutConfig::default(),
        }
    }
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self::default_config()
    }
}

// ============================================================
// 안내 스케줄러 설정
// ============================================================

/// 음성 안내 스케줄러 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncerConfig {
    /// 음성 안내 활성화 (false = 음소거 상태로 시작)
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// 대기열 최대 길이
    #[serde(default = "default_max_queue_size")]
    pub max_queue_size: usize,
    /// 대기열 드레인 간격 (밀리초)
    #[serde(default = "default_drain_interval_ms")]
    pub drain_interval_ms: u64,
    /// 포커스 안내 디바운스 창 (밀리초)
    #[serde(default = "default_focus_debounce_ms")]
    pub focus_debounce_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_max_queue_size() -> usize {
    50
}

fn default_drain_interval_ms() -> u64 {
    100
}

fn default_focus_debounce_ms() -> u64 {
    150
}

impl AnnouncerConfig {
    pub fn drain_interval(&self) -> Duration {
        Duration::from_millis(self.drain_interval_ms)
    }

    pub fn focus_debounce(&self) -> Duration {
        Duration::from_millis(self.focus_debounce_ms)
    }
}

impl Default for AnnouncerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_queue_size: default_max_queue_size(),
            drain_interval_ms: default_drain_interval_ms(),
            focus_debounce_ms: default_focus_debounce_ms(),
        }
    }
}

// ============================================================
// 내비게이션 설정
// ============================================================

/// 그리드/목록 내비게이션 설정
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// 안내 상세 수준
    #[serde(default)]
    pub verbosity: Verbosity,
    /// 경계에서 이동이 막히면 "Top of table" 등을 안내
    #[serde(default)]
    pub announce_edges: bool,
}

// ============================================================
// 도움말 설정
// ============================================================

/// 컨텍스트 도움말 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelpConfig {
    /// 도움말 모드
    #[serde(default)]
    pub help_mode: HelpMode,
    /// 자동 도움말 제안 활성화
    #[serde(default)]
    pub auto_help_enabled: bool,
    /// 매핑에 지연이 없을 때 자동 제안 지연 (밀리초)
    #[serde(default = "default_auto_help_delay_ms")]
    pub auto_help_delay_ms: u64,
    /// Progressive 모드에서 자동 제안하는 최대 방문 횟수
    #[serde(default = "default_progressive_visit_limit")]
    pub progressive_visit_limit: u32,
    /// 최근 사용자 액션 보관 개수
    #[serde(default = "default_max_recent_actions")]
    pub max_recent_actions: usize,
}

fn default_auto_help_delay_ms() -> u64 {
    5_000
}

fn default_progressive_visit_limit() -> u32 {
    2
}

fn default_max_recent_actions() -> usize {
    10
}

impl HelpConfig {
    /// 영속화 대상 부분
    pub fn settings(&self) -> HelpSettings {
        HelpSettings {
            help_mode: self.help_mode,
            auto_help_enabled: self.auto_help_enabled,
        }
    }

    pub fn apply_settings(&mut self, settings: &HelpSettings) {
        self.help_mode = settings.help_mode;
        self.auto_help_enabled = settings.auto_help_enabled;
    }
}

impl Default for HelpConfig {
    fn default() -> Self {
        Self {
            help_mode: HelpMode::default(),
            auto_help_enabled: false,
            auto_help_delay_ms: default_auto_help_delay_ms(),
            progressive_visit_limit: default_progressive_visit_limit(),
            max_recent_actions: default_max_recent_actions(),
        }
    }
}

// ============================================================
// 단축키 설정
// ============================================================

/// 단축키 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortcutConfig {
    /// 기본 단축키 표 설치
    #[serde(default = "default_true")]
    pub install_defaults: bool,
    /// 액션 ID → 사용자 지정 키 조합
    #[serde(default)]
    pub overrides: BTreeMap<String, KeyChord>,
}

impl Default for ShortcutConfig {
    fn default() -> Self {
        Self {
            install_defaults: true,
            overrides: BTreeMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_uses_defaults() {
        let config: AccessConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, AccessConfig::default_config());
        assert!(config.announcer.enabled);
        assert!(config.shortcuts.install_defaults);
        assert_eq!(config.help.help_mode, HelpMode::Manual);
        assert!(!config.help.auto_help_enabled);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let json = r#"{"announcer":{"max_queue_size":10},"navigation":{"verbosity":"Verbose"}}"#;
        let config: AccessConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.announcer.max_queue_size, 10);
        assert_eq!(config.announcer.drain_interval_ms, 100);
        assert_eq!(config.navigation.verbosity, Verbosity::Verbose);
        assert!(!config.navigation.announce_edges);
    }

    #[test]
    fn shortcut_overrides_parse_chords() {
        let json = r#"{"shortcuts":{"overrides":{"play_pause":"Ctrl+P"}}}"#;
        let config: AccessConfig = serde_json::from_str(json).unwrap();
        let chord = config.shortcuts.overrides.get("play_pause").unwrap();
        assert_eq!(chord.to_string(), "Ctrl+P");
    }

    #[test]
    fn help_settings_roundtrip_through_section() {
        let mut help = HelpConfig::default();
        help.apply_settings(&HelpSettings {
            help_mode: HelpMode::Progressive,
            auto_help_enabled: true,
        });
        assert_eq!(help.settings().help_mode, HelpMode::Progressive);
        assert!(help.settings().auto_help_enabled);
        assert_eq!(help.auto_help_delay_ms, 5_000);
    }
}
