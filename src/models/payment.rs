use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// 待归属的收款记录 (payments)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub company_id: Uuid,
    #[serde(default)]
    pub customer_id: Option<Uuid>,
    pub amount: BigDecimal,
    pub payment_date: NaiveDate,
    #[serde(default)]
    pub agreement_number: Option<String>,
    #[serde(default)]
    pub reference_number: Option<String>,
}
