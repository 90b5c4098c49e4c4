use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use wallet_api::routes::create_app;
use wallet_api::shared::config::AppConfig;
use wallet_api::shared::services::AppState;

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };
    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::warn!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. 로깅
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,wallet_api=debug,tower_http=debug")))
        .with(tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_level(true))
        .init();

    // 2. 설정 (환경 변수)
    let config = AppConfig::from_env()?;

    // 3. AppState 생성 (저장소 → 서비스)
    let app_state = AppState::from_config(&config).await?;

    // 4. Router 생성
    let app = create_app(app_state, config.cors_allowed_origin.as_deref())?;

    // 5. 서버 시작
    let listener = TcpListener::bind(config.server_addr).await?;

    tracing::info!("Server running on http://{}", config.server_addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", config.server_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
