use std::sync::Arc;
use anyhow::{Context, Result};
use crate::domains::wallet::models::Wallet;
use crate::domains::wallet::services::state::WalletState;
use crate::shared::config::{AppConfig, SeedWallet, StoreKind};
use crate::shared::database::{Database, InMemoryWalletStore, PgWalletRepository, WalletStore};

/// Application state (combines all domain states)
/// 애플리케이션 상태 (모든 도메인 상태를 조합)
///
/// 시작 시 한 번 생성해서 Router에 주입합니다.
/// 저장소 → 서비스 → 핸들러 순서로 명시적으로 연결 (DI 컨테이너 없음)
#[derive(Clone)]
pub struct AppState {
    pub wallet_state: WalletState,
}

impl AppState {
    /// Create AppState with a wallet store
    pub fn new(store: Arc<dyn WalletStore>, config: &AppConfig) -> Self {
        Self {
            wallet_state: WalletState::new(store, config.max_operation_retries),
        }
    }

    /// 설정에 따라 저장소를 만들고 시드 지갑을 넣은 뒤 AppState 생성
    /// Build the configured store, seed it and wire the services
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let store = build_store(config).await?;
        let seeded = seed_wallets(store.as_ref(), &config.seed_wallets).await?;
        if seeded > 0 {
            tracing::info!(seeded, "Seed wallets inserted");
        }
        Ok(Self::new(store, config))
    }
}

/// 저장소 생성
/// - postgres: 연결 + 마이그레이션
/// - memory: 빈 메모리 저장소
pub async fn build_store(config: &AppConfig) -> Result<Arc<dyn WalletStore>> {
    match config.store {
        StoreKind::Postgres => {
            let db = Database::new(&config.database_url, config.db_max_connections).await?;
            db.initialize().await?;
            tracing::info!("Wallet store: PostgreSQL");
            Ok(Arc::new(PgWalletRepository::new(db.pool().clone())))
        }
        StoreKind::Memory => {
            tracing::warn!("Wallet store: in-memory (data is lost on restart)");
            Ok(Arc::new(InMemoryWalletStore::new()))
        }
    }
}

/// 시드 지갑 생성 (이미 있는 지갑은 건너뜀). 새로 만든 개수 반환
/// Insert seed wallets that don't exist yet; returns how many were created
pub async fn seed_wallets(store: &dyn WalletStore, seeds: &[SeedWallet]) -> Result<usize> {
    let mut created = 0;
    for seed in seeds {
        let inserted = store
            .insert(&Wallet::new(seed.id, seed.balance))
            .await
            .with_context(|| format!("Failed to seed wallet {}", seed.id))?;
        if inserted {
            created += 1;
        } else {
            tracing::debug!(wallet_id = %seed.id, "Seed wallet already exists, skipped");
        }
    }
    Ok(created)
}
