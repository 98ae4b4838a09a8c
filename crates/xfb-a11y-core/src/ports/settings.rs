//! Settings Store 포트.
//!
//! 구현: `config_manager::ConfigManager` (JSON 설정 파일의 `help` 섹션)

use crate::error::CoreError;
use crate::models::guide::HelpSettings;

/// 도움말 설정 영속화 (시작 시 복원, 종료 시 저장)
pub trait SettingsStore: Send + Sync {
    /// 저장된 설정 (없으면 None)
    fn load_help_settings(&self) -> Result<Option<HelpSettings>, CoreError>;

    fn save_help_settings(&self, settings: &HelpSettings) -> Result<(), CoreError>;
}
