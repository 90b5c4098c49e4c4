use sqlx::{PgPool, Row};
use sqlx::postgres::PgRow;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;
use crate::domains::wallet::models::Wallet;
use crate::shared::database::{SaveOutcome, WalletStore};

// 지갑 레포지토리
// PgWalletRepository: handles all database operations for wallets

pub struct PgWalletRepository {
    pool: PgPool,
}

impl PgWalletRepository {
    // 레포지토리 생성
    // Create repository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn map_row(row: &PgRow) -> Wallet {
        Wallet {
            id: row.get("id"),
            balance: row.get("balance"),
            version: row.get("version"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[async_trait]
impl WalletStore for PgWalletRepository {
    // 지갑 조회 (ID로)
    // Get wallet by ID
    async fn get(&self, id: Uuid) -> Result<Option<Wallet>> {
        let row = sqlx::query(
            r#"
            SELECT id, balance, version, updated_at
            FROM wallet
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to fetch wallet by id")?;

        Ok(row.as_ref().map(Self::map_row))
    }

    // 잔액 저장 (version 일치 시에만)
    // Conditional save: the WHERE clause on version makes check-and-increment atomic
    async fn save(&self, wallet: &Wallet) -> Result<SaveOutcome> {
        let row = sqlx::query(
            r#"
            UPDATE wallet
            SET balance = $1, version = version + 1, updated_at = $2
            WHERE id = $3 AND version = $4
            RETURNING id, balance, version, updated_at
            "#,
        )
        .bind(wallet.balance)
        .bind(Utc::now())
        .bind(wallet.id)
        .bind(wallet.version)
        .fetch_optional(&self.pool)
        .await
        .context("Failed to save wallet")?;

        Ok(match row {
            Some(row) => SaveOutcome::Saved(Self::map_row(&row)),
            None => SaveOutcome::VersionConflict,
        })
    }

    // 지갑 생성 (이미 있으면 아무것도 하지 않음)
    // Insert wallet (no-op if it already exists)
    async fn insert(&self, wallet: &Wallet) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO wallet (id, balance, version, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(wallet.id)
        .bind(wallet.balance)
        .bind(wallet.version)
        .bind(wallet.updated_at)
        .execute(&self.pool)
        .await
        .context("Failed to insert wallet")?;

        Ok(result.rows_affected() == 1)
    }
}
