use crate::domains::wallet::models::{
    Amount, OperationRequest, OperationResponse, WalletBalanceResponse,
};
use crate::shared::services::AppState;
use crate::shared::errors::WalletError;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use uuid::Uuid;

type ApiError = (StatusCode, Json<serde_json::Value>);

/// 경로/본문의 지갑 ID 파싱
/// Parse a wallet id, mapping failures to MalformedRequest
fn parse_wallet_id(raw: &str) -> Result<Uuid, WalletError> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| WalletError::MalformedRequest(format!("Invalid wallet id: {}", raw)))
}

/// 잔액 조회 핸들러
/// Get balance handler
#[utoipa::path(
    get,
    path = "/api/v1/wallets/{walletId}",
    params(
        ("walletId" = String, Path, description = "Wallet ID (UUID)")
    ),
    responses(
        (status = 200, description = "Balance retrieved successfully", body = WalletBalanceResponse),
        (status = 400, description = "Invalid wallet id", body = ErrorResponse),
        (status = 404, description = "Wallet not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Wallets"
)]
pub async fn get_balance(
    State(app_state): State<AppState>,
    Path(wallet_id): Path<String>,
) -> Result<Json<WalletBalanceResponse>, ApiError> {
    let wallet_id = parse_wallet_id(&wallet_id).map_err(ApiError::from)?;

    let balance = app_state
        .wallet_state
        .wallet_service
        .get_balance(wallet_id)
        .await
        .map_err(|e: WalletError| -> ApiError { e.into() })?;

    Ok(Json(WalletBalanceResponse { wallet_id, balance }))
}

/// 입금/출금 핸들러
/// Deposit / withdraw handler
///
/// 요청 본문 검증 순서:
/// 1. JSON 형식 (필드 누락, 타입 오류 → 400)
/// 2. walletId UUID 형식 → 400
/// 3. amount: 유한한 양수 → 400
/// 4. 나머지 (지갑 존재, 연산 종류, 잔액)는 서비스에서 검증
///
/// 존재하지 않는 지갑은 요청 오류로 보고 400을 반환합니다 (조회는 404).
#[utoipa::path(
    post,
    path = "/api/v1/wallets",
    request_body = OperationRequest,
    responses(
        (status = 200, description = "Operation applied", body = OperationResponse),
        (status = 400, description = "Unknown wallet, invalid wallet id, amount or operation type, or not enough balance", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "Wallets"
)]
pub async fn perform_operation(
    State(app_state): State<AppState>,
    payload: Result<Json<OperationRequest>, JsonRejection>,
) -> Result<Json<OperationResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| -> ApiError {
        WalletError::MalformedRequest(rejection.body_text()).into()
    })?;

    let wallet_id = parse_wallet_id(&request.wallet_id).map_err(ApiError::from)?;
    let amount = request
        .amount
        .to_f64()
        .and_then(Amount::new)
        .map_err(ApiError::from)?;

    let applied = app_state
        .wallet_state
        .wallet_service
        .apply_operation(wallet_id, &request.operation_type, amount)
        .await
        .map_err(|e: WalletError| -> ApiError {
            match e {
                WalletError::NotFound { .. } => (
                    StatusCode::BAD_REQUEST,
                    Json(json!({ "error": e.to_string() })),
                ),
                other => other.into(),
            }
        })?;

    Ok(Json(OperationResponse {
        wallet_id,
        operation: applied.operation,
        amount: applied.amount.value(),
        balance: applied.wallet.balance,
    }))
}
