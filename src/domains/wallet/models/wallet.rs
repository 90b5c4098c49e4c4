use chrono::{DateTime, Utc};
use uuid::Uuid;
use crate::domains::wallet::models::{Amount, OperationType};
use crate::shared::errors::WalletError;

// =====================================================
// Wallet 모델
// =====================================================
// 역할: 지갑 하나의 잔액을 나타내는 데이터 모델
// 설명: 지갑은 외부에서 생성되며 이 서비스는 조회/입금/출금만 수행
//
// version:
// - 저장할 때마다 1씩 증가
// - 저장 시 읽었던 version과 DB의 version이 다르면 충돌 (다른 요청이 먼저 저장함)
// =====================================================

/// 지갑 정보 (데이터베이스에서 조회한 지갑)
/// Wallet information (wallet retrieved from the store)
#[derive(Debug, Clone, PartialEq)]
pub struct Wallet {
    /// Wallet ID (UUID, immutable)
    /// 지갑 ID (생성 후 변경 불가)
    pub id: Uuid,

    /// Current balance
    /// 현재 잔액
    pub balance: f64,

    /// Optimistic concurrency version
    /// 낙관적 동시성 제어용 버전
    pub version: i64,

    /// Last update timestamp
    /// 마지막 잔액 변경 시간
    pub updated_at: DateTime<Utc>,
}

impl Wallet {
    /// 새 지갑 생성 (version 0)
    /// Create a new wallet with the given opening balance
    pub fn new(id: Uuid, balance: f64) -> Self {
        Self {
            id,
            balance,
            version: 0,
            updated_at: Utc::now(),
        }
    }

    /// 연산을 메모리상의 잔액에 적용 (저장은 호출자가 수행)
    /// Apply an operation to the in-memory balance; persisting is the caller's job
    ///
    /// 실패하면 잔액은 변경되지 않습니다.
    pub fn apply(&mut self, operation: OperationType, amount: Amount) -> Result<(), WalletError> {
        match operation {
            OperationType::Withdraw => {
                if self.balance < amount.value() {
                    return Err(WalletError::InsufficientFunds {
                        balance: self.balance,
                        requested: amount.value(),
                    });
                }
                self.balance -= amount.value();
            }
            OperationType::Deposit => {
                // f64 덧셈이 무한대로 넘치면 저장하지 않고 거부
                let next = self.balance + amount.value();
                if !next.is_finite() {
                    return Err(WalletError::MalformedRequest(
                        "Resulting balance out of range".to_string(),
                    ));
                }
                self.balance = next;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(value: f64) -> Amount {
        Amount::new(value).unwrap()
    }

    #[test]
    fn test_deposit_adds() {
        let mut wallet = Wallet::new(Uuid::new_v4(), 1000.0);
        wallet.apply(OperationType::Deposit, amount(500.0)).unwrap();
        assert_eq!(wallet.balance, 1500.0);
    }

    #[test]
    fn test_withdraw_whole_balance() {
        let mut wallet = Wallet::new(Uuid::new_v4(), 300.0);
        wallet.apply(OperationType::Withdraw, amount(300.0)).unwrap();
        assert_eq!(wallet.balance, 0.0);
    }

    #[test]
    fn test_withdraw_over_balance_leaves_balance() {
        let mut wallet = Wallet::new(Uuid::new_v4(), 300.0);
        let err = wallet.apply(OperationType::Withdraw, amount(500.0)).unwrap_err();
        assert!(matches!(err, WalletError::InsufficientFunds { .. }));
        assert_eq!(wallet.balance, 300.0);
    }

    #[test]
    fn test_deposit_overflow_leaves_balance() {
        let mut wallet = Wallet::new(Uuid::new_v4(), 1e308);
        let err = wallet.apply(OperationType::Deposit, amount(1e308)).unwrap_err();
        assert!(matches!(err, WalletError::MalformedRequest(_)));
        assert_eq!(err.to_string(), "Resulting balance out of range");
        assert_eq!(wallet.balance, 1e308);
    }
}
