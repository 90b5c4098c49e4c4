use thiserror::Error;
use axum::{http::StatusCode, Json};
use serde_json::json;
use uuid::Uuid;

/// 지갑 관련 에러
/// Wallet-related errors
#[derive(Error, Debug)]
pub enum WalletError {
    /// 지갑을 찾을 수 없음
    /// Wallet not found
    #[error("Wallet not found")]
    NotFound { id: Uuid },

    /// 지원하지 않는 연산 종류
    /// Operation type is neither DEPOSIT nor WITHDRAW
    #[error("Invalid operation type")]
    InvalidOperationType { operation_type: String },

    /// 잔액 부족
    /// Not enough balance for a withdrawal
    #[error("Not enough balance")]
    InsufficientFunds { balance: f64, requested: f64 },

    /// 잘못된 요청 (UUID/금액 파싱 실패, 잘못된 JSON 등)
    /// Malformed request
    #[error("{0}")]
    MalformedRequest(String),

    /// 재시도 횟수를 모두 소진한 동시 수정 충돌
    /// Version conflicts persisted after all retries
    #[error("Wallet was modified concurrently, please retry: id={id}")]
    ConcurrentModification { id: Uuid },

    /// 데이터베이스 에러
    /// Database error
    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl WalletError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            WalletError::NotFound { .. } => StatusCode::NOT_FOUND,
            WalletError::InvalidOperationType { .. }
            | WalletError::InsufficientFunds { .. }
            | WalletError::MalformedRequest(_) => StatusCode::BAD_REQUEST,
            WalletError::ConcurrentModification { .. }
            | WalletError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// WalletError를 HTTP 응답으로 변환
impl From<WalletError> for (StatusCode, Json<serde_json::Value>) {
    fn from(err: WalletError) -> Self {
        (err.status_code(), Json(json!({ "error": err.to_string() })))
    }
}
