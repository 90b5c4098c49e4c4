// 라우팅 설정: 모든 도메인의 라우터를 조합
// Routes module: combines all domain routers

use axum::Router;
use axum::http::{HeaderValue, Method};
use anyhow::{Context, Result};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use crate::shared::services::AppState;

// 각 도메인의 routes import
use crate::domains::wallet::routes::create_wallet_router;
use crate::domains::wallet::models::*;

// OpenAPI 스키마 정의: Swagger 문서 자동 생성
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::domains::wallet::handlers::wallet_handler::get_balance,
        crate::domains::wallet::handlers::wallet_handler::perform_operation
    ),
    components(schemas(
        OperationRequest,
        OperationResponse,
        OperationType,
        WalletBalanceResponse,
        ErrorResponse
    )),
    tags(
        (name = "Wallets", description = "Wallet balance and deposit/withdraw endpoints")
    ),
    info(
        title = "Wallet API",
        description = "Wallet ledger: balance lookup and deposit/withdraw operations",
        version = "1.0.0"
    )
)]
pub struct ApiDoc;

/// Create main router (combines all domain routers)
/// 메인 라우터 생성 (모든 도메인 라우터 조합)
pub fn create_router() -> Router<AppState> {
    Router::new()
        .nest("/api/v1/wallets", create_wallet_router())
}

/// 전체 애플리케이션 생성 (라우터 + Swagger + CORS + 요청 로깅)
/// Build the full application
///
/// cors_allowed_origin 이 없으면 모든 Origin 허용
pub fn create_app(app_state: AppState, cors_allowed_origin: Option<&str>) -> Result<Router> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            axum::http::header::ACCEPT,
        ]);
    let cors = match cors_allowed_origin {
        Some(origin) => cors.allow_origin(
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS_ALLOWED_ORIGIN: {}", origin))?,
        ),
        None => cors.allow_origin(Any),
    };

    Ok(Router::new()
        .merge(create_router())
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", ApiDoc::openapi())
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
