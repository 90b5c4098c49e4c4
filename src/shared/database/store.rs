// =====================================================
// WalletStore Trait (지갑 저장소 인터페이스)
// =====================================================
// 서비스 계층은 이 trait만 사용하여 저장소와 통신합니다.
//
// 구현체:
// - PgWalletRepository: PostgreSQL (운영)
// - InMemoryWalletStore: 메모리 (로컬 개발, 테스트)
//
// 저장 규칙 (낙관적 동시성 제어):
// - save()는 wallet.version이 저장소의 현재 version과 같을 때만 성공
// - 성공하면 version + 1 된 지갑을 돌려줌
// - 다르면 VersionConflict (그 사이 다른 요청이 먼저 저장함)
// =====================================================

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;
use crate::domains::wallet::models::Wallet;

/// save() 결과
/// Outcome of a conditional save
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// 저장 성공 (version이 증가한 지갑)
    Saved(Wallet),
    /// 읽은 이후 다른 요청이 먼저 저장함 → 다시 읽고 재시도해야 함
    VersionConflict,
}

/// 지갑 저장소 인터페이스
/// Wallet store interface
#[async_trait]
pub trait WalletStore: Send + Sync {
    /// 지갑 조회 (없으면 None)
    /// Get wallet by ID
    async fn get(&self, id: Uuid) -> Result<Option<Wallet>>;

    /// 지갑 저장 (version 일치 시에만)
    /// Save wallet if its version still matches the stored one
    async fn save(&self, wallet: &Wallet) -> Result<SaveOutcome>;

    /// 지갑 생성 (시드 데이터용). 이미 있으면 false
    /// Insert a new wallet; returns false if the id already exists
    async fn insert(&self, wallet: &Wallet) -> Result<bool>;
}
