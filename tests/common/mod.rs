// =====================================================
// 통합 테스트 공통 헬퍼
// =====================================================
// 목적: 모든 통합 테스트에서 공통으로 사용하는 셋업 함수 제공
//
// 사용법:
// ```rust
// mod common;
// use common::*;
//
// #[tokio::test]
// async fn test_something() {
//     let (app, store) = setup_app(vec![Wallet::new(id, 1000.0)]);
//     let (status, body) = get_json(&app, &format!("/api/v1/wallets/{}", id)).await;
// }
// ```
// =====================================================
#![allow(dead_code)]

use std::sync::Arc;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;
use wallet_api::domains::wallet::models::Wallet;
use wallet_api::routes::create_app;
use wallet_api::shared::config::AppConfig;
use wallet_api::shared::database::InMemoryWalletStore;
use wallet_api::shared::services::AppState;

pub const WALLETS_PATH: &str = "/api/v1/wallets";

/// 기본 설정 (환경 변수 무시)
pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|_| None).expect("default config")
}

/// 메모리 저장소 기반 앱 생성
pub fn setup_app(wallets: Vec<Wallet>) -> (Router, Arc<InMemoryWalletStore>) {
    let store = Arc::new(InMemoryWalletStore::with_wallets(wallets));
    let app_state = AppState::new(store.clone(), &test_config());
    let app = create_app(app_state, None).expect("Failed to build app");
    (app, store)
}

/// 응답 본문을 JSON으로 읽기 (비어 있거나 JSON이 아니면 Null)
pub async fn read_json(response: axum::response::Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_json(response).await
}

/// 원본 문자열 본문으로 POST (잘못된 JSON 테스트용)
pub async fn post_raw(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::post(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_json(response).await
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, &body.to_string()).await
}
