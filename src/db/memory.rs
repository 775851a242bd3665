use std::sync::RwLock;

use indexmap::IndexMap;
use uuid::Uuid;

use crate::db::source::{ContractSource, PaymentStore};
use crate::error::DataAccessError;
use crate::models::{Contract, Payment};

#[derive(Debug, Clone)]
struct StoredPayment {
    payment: Payment,
    link: Option<(Uuid, f64)>,
}

/// 内存快照实现: 合同按公司分组 (仅生效合同), 收款保持插入顺序
#[derive(Debug, Default)]
pub struct MemoryStore {
    contracts: RwLock<IndexMap<Uuid, Vec<Contract>>>,
    payments: RwLock<IndexMap<Uuid, StoredPayment>>,
}

fn poisoned() -> DataAccessError {
    DataAccessError::Unavailable("memory store lock poisoned".to_string())
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_contract(&self, contract: Contract) -> Result<(), DataAccessError> {
        let mut contracts = self.contracts.write().map_err(|_| poisoned())?;
        contracts.entry(contract.company_id).or_default().push(contract);
        Ok(())
    }

    pub fn insert_payment(&self, payment: Payment) -> Result<(), DataAccessError> {
        let mut payments = self.payments.write().map_err(|_| poisoned())?;
        payments.insert(payment.id, StoredPayment { payment, link: None });
        Ok(())
    }

    /// 收款当前关联的合同及置信度
    pub fn link_of(&self, payment_id: Uuid) -> Result<Option<(Uuid, f64)>, DataAccessError> {
        let payments = self.payments.read().map_err(|_| poisoned())?;
        Ok(payments.get(&payment_id).and_then(|p| p.link))
    }
}

impl ContractSource for MemoryStore {
    async fn active_contracts(&self, company_id: Uuid) -> Result<Vec<Contract>, DataAccessError> {
        let contracts = self.contracts.read().map_err(|_| poisoned())?;
        Ok(contracts.get(&company_id).cloned().unwrap_or_default())
    }
}

impl PaymentStore for MemoryStore {
    async fn get_payment(&self, payment_id: Uuid) -> Result<Option<Payment>, DataAccessError> {
        let payments = self.payments.read().map_err(|_| poisoned())?;
        Ok(payments.get(&payment_id).map(|p| p.payment.clone()))
    }

    async fn unlinked_payments(&self, company_id: Uuid) -> Result<Vec<Payment>, DataAccessError> {
        let payments = self.payments.read().map_err(|_| poisoned())?;
        Ok(payments
            .values()
            .filter(|p| p.link.is_none() && p.payment.company_id == company_id)
            .map(|p| p.payment.clone())
            .collect())
    }

    async fn link_to_contract(
        &self,
        payment_id: Uuid,
        contract_id: Uuid,
        confidence: f64,
    ) -> Result<bool, DataAccessError> {
        let mut payments = self.payments.write().map_err(|_| poisoned())?;
        match payments.get_mut(&payment_id) {
            Some(stored) if stored.link.is_none() => {
                stored.link = Some((contract_id, confidence));
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
