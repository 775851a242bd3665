use std::future::Future;

use uuid::Uuid;

use crate::error::DataAccessError;
use crate::models::{Contract, Payment};

/// 生效合同读取通道: "取公司 X 的全部生效合同"
pub trait ContractSource: Send + Sync {
    fn active_contracts(
        &self,
        company_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Contract>, DataAccessError>> + Send;
}

/// 收款读写
pub trait PaymentStore: Send + Sync {
    fn get_payment(
        &self,
        payment_id: Uuid,
    ) -> impl Future<Output = Result<Option<Payment>, DataAccessError>> + Send;

    fn unlinked_payments(
        &self,
        company_id: Uuid,
    ) -> impl Future<Output = Result<Vec<Payment>, DataAccessError>> + Send;

    /// 返回是否实际写入 (已关联的收款返回 false)
    fn link_to_contract(
        &self,
        payment_id: Uuid,
        contract_id: Uuid,
        confidence: f64,
    ) -> impl Future<Output = Result<bool, DataAccessError>> + Send;
}
