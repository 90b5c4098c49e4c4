// Wallet domain state
// 지갑 도메인 상태
use std::sync::Arc;
use crate::domains::wallet::services::WalletService;
use crate::shared::database::WalletStore;

/// Wallet domain state
/// 지갑 도메인에서 필요한 서비스들을 포함하는 상태
#[derive(Clone)]
pub struct WalletState {
    pub wallet_service: WalletService,
}

impl WalletState {
    /// Create WalletState with a wallet store
    /// WalletState 생성 (저장소 필요)
    pub fn new(store: Arc<dyn WalletStore>, max_operation_retries: u32) -> Self {
        Self {
            wallet_service: WalletService::new(store, max_operation_retries),
        }
    }
}
