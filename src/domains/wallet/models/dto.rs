use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use crate::domains::wallet::models::OperationType;
use crate::shared::errors::WalletError;

/// 잔액 변경 요청
/// Balance operation request
///
/// 필드는 문자열로 받은 뒤 서비스 호출 전에 검증합니다.
/// (잘못된 UUID / 금액도 400 + {"error"} 형식으로 응답하기 위해)
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = OperationRequest)]
pub struct OperationRequest {
    /// Wallet ID (UUID string)
    /// 지갑 ID
    #[schema(example = "0b6f3c1e-8d2a-4c55-9a3e-2f4b7c1d9e10")]
    pub wallet_id: String,

    /// DEPOSIT or WITHDRAW (case-insensitive)
    /// 연산 종류 (대소문자 무관)
    #[schema(example = "DEPOSIT")]
    pub operation_type: String,

    /// Amount (number or numeric string, must be > 0)
    /// 금액 (숫자 또는 숫자 문자열)
    #[schema(value_type = f64, example = 1000.0)]
    pub amount: AmountInput,
}

/// 금액 입력값: JSON 숫자 또는 숫자 문자열 ("1000", "1000.5")
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    Number(f64),
    Text(String),
}

impl AmountInput {
    /// f64로 변환 (문자열이면 파싱)
    pub fn to_f64(&self) -> Result<f64, WalletError> {
        match self {
            AmountInput::Number(value) => Ok(*value),
            AmountInput::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                WalletError::MalformedRequest(format!("Invalid amount: {}", text))
            }),
        }
    }
}

/// 잔액 조회 응답
/// Wallet balance response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = WalletBalanceResponse)]
pub struct WalletBalanceResponse {
    pub wallet_id: Uuid,

    #[schema(example = 5000.0)]
    pub balance: f64,
}

/// 잔액 변경 응답
/// Balance operation response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[schema(as = OperationResponse)]
pub struct OperationResponse {
    pub wallet_id: Uuid,

    /// 정규화된 연산 종류 (DEPOSIT / WITHDRAW)
    pub operation: OperationType,

    #[schema(example = 500.0)]
    pub amount: f64,

    /// 연산 적용 후 잔액
    /// Balance after the operation
    #[schema(example = 1500.0)]
    pub balance: f64,
}

/// 에러 응답
/// Error response body
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(as = ErrorResponse)]
pub struct ErrorResponse {
    #[schema(example = "Wallet not found")]
    pub error: String,
}
