use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// 生效合同快照 (contracts, status = 'active')
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Contract {
    pub id: Uuid,
    pub contract_number: String,
    pub company_id: Uuid,
    #[serde(default)]
    pub customer_id: Option<Uuid>,
    pub monthly_amount: BigDecimal,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub reference_number: Option<String>,
}
