//! Help Content Provider 포트.
//!
//! 구현: `xfb-a11y-guide::catalog::HelpCatalog` (메모리 내 도움말 목록)

use crate::models::guide::HelpContent;

/// 도움말 ID → 본문
pub trait HelpContentProvider: Send + Sync {
    fn resolve(&self, help_id: &str) -> Option<HelpContent>;
}
