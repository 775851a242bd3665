use std::future::Future;
use std::time::Duration;

use sqlx::PgPool;
use uuid::Uuid;

use crate::db::queries;
use crate::db::source::{ContractSource, PaymentStore};
use crate::error::DataAccessError;
use crate::models::{Contract, Payment};

/// PostgreSQL 实现, 每次查询带超时
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
    timeout: Duration,
}

impl PgStore {
    pub fn new(pool: PgPool, timeout: Duration) -> Self {
        Self { pool, timeout }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn with_timeout<T, F>(&self, what: &str, fut: F) -> Result<T, DataAccessError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        let start = std::time::Instant::now();
        match tokio::time::timeout(self.timeout, fut).await {
            Ok(Ok(value)) => {
                tracing::debug!("{} 完成, 耗时: {:?}", what, start.elapsed());
                Ok(value)
            }
            Ok(Err(e)) => {
                tracing::error!("✗ {} 失败, 耗时: {:?}, 错误: {:?}", what, start.elapsed(), e);
                Err(e.into())
            }
            Err(_) => {
                tracing::error!("✗ {} 超时 (>{}秒)!", what, self.timeout.as_secs());
                Err(DataAccessError::Timeout { secs: self.timeout.as_secs() })
            }
        }
    }
}

impl ContractSource for PgStore {
    async fn active_contracts(&self, company_id: Uuid) -> Result<Vec<Contract>, DataAccessError> {
        self.with_timeout(
            "查询生效合同",
            queries::list_active_contracts(&self.pool, company_id),
        )
        .await
    }
}

impl PaymentStore for PgStore {
    async fn get_payment(&self, payment_id: Uuid) -> Result<Option<Payment>, DataAccessError> {
        self.with_timeout("查询收款", queries::get_payment(&self.pool, payment_id))
            .await
    }

    async fn unlinked_payments(&self, company_id: Uuid) -> Result<Vec<Payment>, DataAccessError> {
        self.with_timeout(
            "查询未关联收款",
            queries::list_unlinked_payments(&self.pool, company_id),
        )
        .await
    }

    async fn link_to_contract(
        &self,
        payment_id: Uuid,
        contract_id: Uuid,
        confidence: f64,
    ) -> Result<bool, DataAccessError> {
        let rows = self
            .with_timeout(
                "写入收款关联",
                queries::link_payment_to_contract(&self.pool, payment_id, contract_id, confidence),
            )
            .await?;
        Ok(rows > 0)
    }
}
