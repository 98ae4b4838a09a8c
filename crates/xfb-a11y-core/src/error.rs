//! XFB 접근성 핵심 에러 타입.
//!
//! 모든 서비스 crate는 실패를 `Result<_, CoreError>` 반환값으로 전달한다.
//! 사용자에게 보이는 실패는 호출 측에서 음성으로 안내한다.

use thiserror::Error;

/// 코어 레이어 에러.
/// 직렬화, 설정, 유효성 검증, 단축키 충돌 등 도메인 공통 에러를 정의한다.
#[derive(Debug, Error)]
pub enum CoreError {
    /// JSON 직렬화/역직렬화 실패
    #[error("직렬화 에러: {0}")]
    Serialization(#[from] serde_json::Error),

    /// 설정값 오류
    #[error("설정 에러: {0}")]
    Config(String),

    /// 필드 유효성 검증 실패
    #[error("유효성 검증 실패 ({field}): {message}")]
    Validation {
        /// 검증 실패한 필드명
        field: String,
        /// 실패 사유
        message: String,
    },

    /// 리소스를 찾을 수 없음
    #[error("{resource_type} 미발견: {id}")]
    NotFound {
        /// 리소스 종류 (예: "Workflow", "HelpMapping")
        resource_type: String,
        /// 리소스 식별자
        id: String,
    },

    /// 겹치는 범위에서 다른 액션이 이미 같은 키 조합을 소유함
    #[error("단축키 충돌: {chord} 는 이미 '{existing_action}' 에 할당됨")]
    ShortcutConflict {
        /// 충돌한 키 조합 (표시 문자열)
        chord: String,
        /// 기존 소유 액션 ID
        existing_action: String,
    },

    /// 사용자 변경이 허용되지 않은 단축키
    #[error("변경 불가 단축키: {0}")]
    NotCustomizable(String),

    /// 키 조합 문자열 파싱 실패
    #[error("잘못된 키 조합: {0}")]
    InvalidChord(String),

    /// 포커스 대상이 없거나 유효하지 않음
    #[error("유효하지 않은 포커스 대상: {0}")]
    InvalidFocusTarget(String),

    /// 음성 출력 실패 (브리지 종료 등)
    #[error("음성 출력 에러: {0}")]
    Speech(String),

    /// I/O 에러
    #[error("I/O 에러: {0}")]
    Io(#[from] std::io::Error),

    /// 내부 에러 (예상치 못한 상황)
    #[error("내부 에러: {0}")]
    Internal(String),
}

impl CoreError {
    /// `NotFound` 생성 헬퍼
    pub fn not_found(resource_type: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.to_string(),
            id: id.into(),
        }
    }
}
