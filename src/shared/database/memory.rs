use super::{SaveOutcome, WalletStore};
use crate::domains::wallet::models::Wallet;
use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use std::collections::HashMap;
use uuid::Uuid;

/// 메모리 기반 지갑 저장소
/// In-memory wallet store
///
/// WALLET_STORE=memory 로 실행할 때와 테스트에서 사용합니다.
/// version 확인과 저장이 하나의 write lock 안에서 일어나므로
/// PostgreSQL 구현과 같은 충돌 규칙을 따릅니다.
#[derive(Default)]
pub struct InMemoryWalletStore {
    wallets: RwLock<HashMap<Uuid, Wallet>>,
}

impl InMemoryWalletStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 초기 지갑 목록으로 생성
    pub fn with_wallets(wallets: impl IntoIterator<Item = Wallet>) -> Self {
        let wallets = wallets.into_iter().map(|w| (w.id, w)).collect();
        Self {
            wallets: RwLock::new(wallets),
        }
    }

    pub fn len(&self) -> usize {
        self.wallets.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.wallets.read().is_empty()
    }
}

#[async_trait]
impl WalletStore for InMemoryWalletStore {
    async fn get(&self, id: Uuid) -> Result<Option<Wallet>> {
        Ok(self.wallets.read().get(&id).cloned())
    }

    async fn save(&self, wallet: &Wallet) -> Result<SaveOutcome> {
        let mut wallets = self.wallets.write();

        let stored = match wallets.get_mut(&wallet.id) {
            Some(stored) => stored,
            // 삭제 기능이 없으므로 조회 후 사라질 일은 없지만, 충돌로 처리
            None => return Ok(SaveOutcome::VersionConflict),
        };

        if stored.version != wallet.version {
            return Ok(SaveOutcome::VersionConflict);
        }

        stored.balance = wallet.balance;
        stored.version += 1;
        stored.updated_at = Utc::now();

        Ok(SaveOutcome::Saved(stored.clone()))
    }

    async fn insert(&self, wallet: &Wallet) -> Result<bool> {
        let mut wallets = self.wallets.write();
        if wallets.contains_key(&wallet.id) {
            return Ok(false);
        }
        wallets.insert(wallet.id, wallet.clone());
        Ok(true)
    }
}
