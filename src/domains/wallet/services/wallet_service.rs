use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;
use crate::domains::wallet::models::{Amount, OperationType, Wallet};
use crate::shared::database::{SaveOutcome, WalletStore};
use crate::shared::errors::WalletError;

/// 충돌 후 재시도 전 대기 시간 (시도 횟수만큼 선형 증가)
const RETRY_BACKOFF: Duration = Duration::from_millis(5);

/// 적용된 연산 결과
/// Result of a successfully applied operation
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedOperation {
    pub operation: OperationType,
    pub amount: Amount,
    /// 저장된 지갑 (새 잔액, 새 version)
    pub wallet: Wallet,
}

/// 지갑 서비스 (잔액 연산 엔진)
/// WalletService: validates and applies balance operations
///
/// 처리 순서 (applyOperation):
/// 1. 지갑 조회 (없으면 NotFound)
/// 2. 연산 종류 정규화 (대소문자 무관, 모르는 값이면 InvalidOperationType)
/// 3. WITHDRAW: balance < amount 이면 InsufficientFunds, 아니면 차감
/// 4. DEPOSIT: 가산
/// 5. version 조건부 저장
///
/// 5번에서 VersionConflict가 나면 1번부터 다시 수행합니다 (최대 max_retries 회).
/// 비즈니스 규칙 실패(2, 3번)는 재시도하지 않고, 저장 에러 시 메모리상의 변경은 버립니다.
#[derive(Clone)]
pub struct WalletService {
    store: Arc<dyn WalletStore>,
    max_retries: u32,
}

impl WalletService {
    /// 생성자
    /// Constructor
    pub fn new(store: Arc<dyn WalletStore>, max_retries: u32) -> Self {
        Self {
            store,
            max_retries: max_retries.max(1),
        }
    }

    /// 지갑 조회 (ID로)
    /// Get wallet by ID
    pub async fn get_wallet(&self, wallet_id: Uuid) -> Result<Wallet, WalletError> {
        let wallet = self
            .store
            .get(wallet_id)
            .await
            .map_err(|e| {
                tracing::error!(%wallet_id, "Failed to fetch wallet: {:#}", e);
                WalletError::DatabaseError(format!("Failed to fetch wallet: {}", e))
            })?;

        wallet.ok_or(WalletError::NotFound { id: wallet_id })
    }

    /// 지갑 잔액 조회
    /// Get wallet balance
    pub async fn get_balance(&self, wallet_id: Uuid) -> Result<f64, WalletError> {
        Ok(self.get_wallet(wallet_id).await?.balance)
    }

    /// 잔액 변경 연산 수행
    /// Apply a DEPOSIT / WITHDRAW operation
    pub async fn apply_operation(
        &self,
        wallet_id: Uuid,
        operation_type: &str,
        amount: Amount,
    ) -> Result<AppliedOperation, WalletError> {
        for attempt in 1..=self.max_retries {
            // 1. 지갑 조회
            let mut wallet = self.get_wallet(wallet_id).await?;

            // 2. 연산 종류 정규화
            let operation: OperationType = operation_type.parse()?;

            // 3~4. 메모리상 잔액 변경 (실패 시 저장하지 않음)
            if let Err(e) = wallet.apply(operation, amount) {
                tracing::debug!(%wallet_id, %operation, amount = amount.value(), "Operation rejected: {}", e);
                return Err(e);
            }

            // 5. 조건부 저장
            let outcome = self.store.save(&wallet).await.map_err(|e| {
                tracing::error!(%wallet_id, %operation, "Failed to save wallet: {:#}", e);
                WalletError::DatabaseError(format!("Failed to save wallet: {}", e))
            })?;

            match outcome {
                SaveOutcome::Saved(saved) => {
                    tracing::info!(
                        %wallet_id,
                        %operation,
                        amount = amount.value(),
                        balance = saved.balance,
                        version = saved.version,
                        "Operation applied"
                    );
                    return Ok(AppliedOperation {
                        operation,
                        amount,
                        wallet: saved,
                    });
                }
                SaveOutcome::VersionConflict => {
                    tracing::warn!(
                        %wallet_id,
                        attempt,
                        max_retries = self.max_retries,
                        "Version conflict while saving wallet, retrying"
                    );
                    if attempt < self.max_retries {
                        tokio::time::sleep(RETRY_BACKOFF * attempt).await;
                    }
                }
            }
        }

        tracing::error!(%wallet_id, "Giving up after {} version conflicts", self.max_retries);
        Err(WalletError::ConcurrentModification { id: wallet_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::database::InMemoryWalletStore;
    use anyhow::{anyhow, Result};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// save 호출 횟수를 세고, 앞의 N번은 충돌 또는 에러를 돌려주는 테스트용 저장소
    struct TestStore {
        inner: InMemoryWalletStore,
        saves: AtomicUsize,
        conflicts_left: AtomicUsize,
        fail_saves: bool,
    }

    impl TestStore {
        fn new(wallets: Vec<Wallet>) -> Self {
            Self {
                inner: InMemoryWalletStore::with_wallets(wallets),
                saves: AtomicUsize::new(0),
                conflicts_left: AtomicUsize::new(0),
                fail_saves: false,
            }
        }

        fn with_conflicts(mut self, n: usize) -> Self {
            self.conflicts_left = AtomicUsize::new(n);
            self
        }

        fn failing(mut self) -> Self {
            self.fail_saves = true;
            self
        }

        fn save_count(&self) -> usize {
            self.saves.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl WalletStore for TestStore {
        async fn get(&self, id: Uuid) -> Result<Option<Wallet>> {
            self.inner.get(id).await
        }

        async fn save(&self, wallet: &Wallet) -> Result<SaveOutcome> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            if self.fail_saves {
                return Err(anyhow!("connection reset"));
            }
            let left = self.conflicts_left.load(Ordering::SeqCst);
            if left > 0 {
                self.conflicts_left.store(left - 1, Ordering::SeqCst);
                return Ok(SaveOutcome::VersionConflict);
            }
            self.inner.save(wallet).await
        }

        async fn insert(&self, wallet: &Wallet) -> Result<bool> {
            self.inner.insert(wallet).await
        }
    }

    fn setup(balance: f64) -> (Arc<TestStore>, WalletService, Uuid) {
        let wallet = Wallet::new(Uuid::new_v4(), balance);
        let id = wallet.id;
        let store = Arc::new(TestStore::new(vec![wallet]));
        let service = WalletService::new(store.clone(), 5);
        (store, service, id)
    }

    fn amount(value: f64) -> Amount {
        Amount::new(value).unwrap()
    }

    #[tokio::test]
    async fn test_get_balance() {
        let (_, service, id) = setup(5000.0);
        assert_eq!(service.get_balance(id).await.unwrap(), 5000.0);
    }

    #[tokio::test]
    async fn test_unknown_wallet_not_found() {
        let (store, service, _) = setup(100.0);
        let unknown = Uuid::new_v4();

        assert!(matches!(
            service.get_balance(unknown).await,
            Err(WalletError::NotFound { id }) if id == unknown
        ));
        assert!(matches!(
            service.apply_operation(unknown, "DEPOSIT", amount(1.0)).await,
            Err(WalletError::NotFound { .. })
        ));
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_deposit_saves_once() {
        for (balance, deposit) in [(1000.0, 500.0), (0.0, 0.25), (42.5, 7.5)] {
            let (store, service, id) = setup(balance);

            let applied = service.apply_operation(id, "DEPOSIT", amount(deposit)).await.unwrap();

            assert_eq!(applied.operation, OperationType::Deposit);
            assert_eq!(applied.wallet.balance, balance + deposit);
            assert_eq!(service.get_balance(id).await.unwrap(), balance + deposit);
            assert_eq!(store.save_count(), 1);
        }
    }

    #[tokio::test]
    async fn test_withdraw_within_balance() {
        for (balance, withdraw) in [(1000.0, 400.0), (300.0, 300.0)] {
            let (store, service, id) = setup(balance);

            let applied = service.apply_operation(id, "withdraw", amount(withdraw)).await.unwrap();

            assert_eq!(applied.operation, OperationType::Withdraw);
            assert_eq!(service.get_balance(id).await.unwrap(), balance - withdraw);
            assert_eq!(store.save_count(), 1);
        }
    }

    #[tokio::test]
    async fn test_deposit_overflow_not_saved() {
        let (store, service, id) = setup(f64::MAX);

        let err = service.apply_operation(id, "DEPOSIT", amount(f64::MAX)).await.unwrap_err();

        assert!(matches!(err, WalletError::MalformedRequest(_)));
        assert_eq!(service.get_balance(id).await.unwrap(), f64::MAX);
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_withdraw_over_balance_rejected() {
        let (store, service, id) = setup(300.0);

        let err = service.apply_operation(id, "WITHDRAW", amount(500.0)).await.unwrap_err();

        assert!(matches!(err, WalletError::InsufficientFunds { .. }));
        assert_eq!(err.to_string(), "Not enough balance");
        assert_eq!(service.get_balance(id).await.unwrap(), 300.0);
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_operation_type_rejected() {
        let (store, service, id) = setup(300.0);

        for op in ["TRANSFER", "", "deposit!"] {
            let err = service.apply_operation(id, op, amount(1.0)).await.unwrap_err();
            assert!(matches!(err, WalletError::InvalidOperationType { .. }));
        }
        assert_eq!(service.get_balance(id).await.unwrap(), 300.0);
        assert_eq!(store.save_count(), 0);
    }

    #[tokio::test]
    async fn test_retries_after_version_conflict() {
        let wallet = Wallet::new(Uuid::new_v4(), 100.0);
        let id = wallet.id;
        let store = Arc::new(TestStore::new(vec![wallet]).with_conflicts(2));
        let service = WalletService::new(store.clone(), 5);

        let applied = service.apply_operation(id, "DEPOSIT", amount(50.0)).await.unwrap();

        assert_eq!(applied.wallet.balance, 150.0);
        assert_eq!(applied.wallet.version, 1);
        assert_eq!(store.save_count(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let wallet = Wallet::new(Uuid::new_v4(), 100.0);
        let id = wallet.id;
        let store = Arc::new(TestStore::new(vec![wallet]).with_conflicts(10));
        let service = WalletService::new(store.clone(), 3);

        let err = service.apply_operation(id, "DEPOSIT", amount(50.0)).await.unwrap_err();

        assert!(matches!(err, WalletError::ConcurrentModification { .. }));
        assert_eq!(store.save_count(), 3);
        assert_eq!(service.get_balance(id).await.unwrap(), 100.0);
    }

    #[tokio::test]
    async fn test_save_failure_discards_change() {
        let wallet = Wallet::new(Uuid::new_v4(), 100.0);
        let id = wallet.id;
        let store = Arc::new(TestStore::new(vec![wallet]).failing());
        let service = WalletService::new(store.clone(), 5);

        let err = service.apply_operation(id, "DEPOSIT", amount(50.0)).await.unwrap_err();

        assert!(matches!(err, WalletError::DatabaseError(_)));
        // 저장 에러는 재시도하지 않음
        assert_eq!(store.save_count(), 1);
        assert_eq!(service.get_balance(id).await.unwrap(), 100.0);
    }
}
