#![allow(dead_code)]

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use payment_linker::db::{ContractSource, PaymentStore};
use payment_linker::models::{Contract, Payment};
use payment_linker::{DataAccessError, MemoryStore};
use std::str::FromStr;
use uuid::Uuid;

pub fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub fn payment(company_id: Uuid, amount: &str) -> Payment {
    Payment {
        id: Uuid::new_v4(),
        company_id,
        customer_id: None,
        amount: dec(amount),
        payment_date: date("2024-05-10"),
        agreement_number: None,
        reference_number: None,
    }
}

pub fn contract(company_id: Uuid, number: &str, monthly: &str) -> Contract {
    Contract {
        id: Uuid::new_v4(),
        contract_number: number.to_string(),
        company_id,
        customer_id: None,
        monthly_amount: dec(monthly),
        start_date: date("2022-01-01"),
        reference_number: None,
    }
}

pub fn store_with(contracts: Vec<Contract>, payments: Vec<Payment>) -> MemoryStore {
    let store = MemoryStore::new();
    for c in contracts {
        store.insert_contract(c).unwrap();
    }
    for p in payments {
        store.insert_payment(p).unwrap();
    }
    store
}

/// 合同读取始终失败的数据源
pub struct UnavailableStore;

impl ContractSource for UnavailableStore {
    async fn active_contracts(&self, _company_id: Uuid) -> Result<Vec<Contract>, DataAccessError> {
        Err(DataAccessError::Unavailable("connection refused".to_string()))
    }
}

impl PaymentStore for UnavailableStore {
    async fn get_payment(&self, _payment_id: Uuid) -> Result<Option<Payment>, DataAccessError> {
        Err(DataAccessError::Unavailable("connection refused".to_string()))
    }

    async fn unlinked_payments(&self, _company_id: Uuid) -> Result<Vec<Payment>, DataAccessError> {
        Err(DataAccessError::Unavailable("connection refused".to_string()))
    }

    async fn link_to_contract(
        &self,
        _payment_id: Uuid,
        _contract_id: Uuid,
        _confidence: f64,
    ) -> Result<bool, DataAccessError> {
        Err(DataAccessError::Unavailable("connection refused".to_string()))
    }
}

/// 读取正常, 写入关联始终失败
pub struct ReadOnlyStore(pub MemoryStore);

impl ContractSource for ReadOnlyStore {
    async fn active_contracts(&self, company_id: Uuid) -> Result<Vec<Contract>, DataAccessError> {
        self.0.active_contracts(company_id).await
    }
}

impl PaymentStore for ReadOnlyStore {
    async fn get_payment(&self, payment_id: Uuid) -> Result<Option<Payment>, DataAccessError> {
        self.0.get_payment(payment_id).await
    }

    async fn unlinked_payments(&self, company_id: Uuid) -> Result<Vec<Payment>, DataAccessError> {
        self.0.unlinked_payments(company_id).await
    }

    async fn link_to_contract(
        &self,
        _payment_id: Uuid,
        _contract_id: Uuid,
        _confidence: f64,
    ) -> Result<bool, DataAccessError> {
        Err(DataAccessError::Unavailable("read-only replica".to_string()))
    }
}
