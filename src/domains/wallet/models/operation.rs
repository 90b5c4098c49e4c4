use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use crate::shared::errors::WalletError;

// =====================================================
// 잔액 변경 연산
// Balance operation types
// =====================================================
// DEPOSIT  → balance += amount
// WITHDRAW → balance -= amount (balance >= amount 일 때만)
// =====================================================

/// 연산 종류
/// Operation type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationType {
    Deposit,
    Withdraw,
}

impl OperationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationType::Deposit => "DEPOSIT",
            OperationType::Withdraw => "WITHDRAW",
        }
    }
}

impl fmt::Display for OperationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 대소문자 구분 없이 파싱 ("deposit", "Deposit", "DEPOSIT" 모두 허용)
/// Case-insensitive parsing
impl FromStr for OperationType {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEPOSIT" => Ok(OperationType::Deposit),
            "WITHDRAW" => Ok(OperationType::Withdraw),
            _ => Err(WalletError::InvalidOperationType {
                operation_type: s.to_string(),
            }),
        }
    }
}

/// 연산 금액 (항상 유한한 양수)
/// Operation amount, always finite and strictly positive
///
/// 0, 음수, NaN, 무한대는 생성 단계에서 거부되므로
/// 엔진은 금액 검증을 다시 할 필요가 없습니다.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Amount(f64);

impl Amount {
    pub fn new(value: f64) -> Result<Self, WalletError> {
        if !value.is_finite() {
            return Err(WalletError::MalformedRequest(format!(
                "Amount must be a finite number: {}",
                value
            )));
        }
        if value <= 0.0 {
            return Err(WalletError::MalformedRequest(format!(
                "Amount must be greater than zero: {}",
                value
            )));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}
