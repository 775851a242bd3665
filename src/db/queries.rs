use crate::models::{Contract, Payment};
use sqlx::PgPool;
use uuid::Uuid;

/// 查询租户下全部生效合同
pub async fn list_active_contracts(
    pool: &PgPool,
    company_id: Uuid,
) -> Result<Vec<Contract>, sqlx::Error> {
    sqlx::query_as::<_, Contract>(
        r#"
        SELECT id, contract_number, company_id, customer_id,
               monthly_amount, start_date, reference_number
        FROM contracts
        WHERE company_id = $1
          AND status = 'active'
        ORDER BY start_date DESC, contract_number
        "#
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}

/// 查询单笔收款
pub async fn get_payment(
    pool: &PgPool,
    payment_id: Uuid,
) -> Result<Option<Payment>, sqlx::Error> {
    sqlx::query_as::<_, Payment>(
        r#"
        SELECT id, company_id, customer_id, amount, payment_date,
               agreement_number, reference_number
        FROM payments
        WHERE id = $1
        "#
    )
    .bind(payment_id)
    .fetch_optional(pool)
    .await
}

/// 查询租户下尚未关联合同的收款
pub async fn list_unlinked_payments(
    pool: &PgPool,
    company_id: Uuid,
) -> Result<Vec<Payment>, sqlx::Error> {
    sqlx::query_as::<_, Payment>(
        r#"
        SELECT id, company_id, customer_id, amount, payment_date,
               agreement_number, reference_number
        FROM payments
        WHERE company_id = $1
          AND contract_id IS NULL
        ORDER BY payment_date, id
        "#
    )
    .bind(company_id)
    .fetch_all(pool)
    .await
}

/// 写入收款-合同关联; 已关联的收款不覆盖
pub async fn link_payment_to_contract(
    pool: &PgPool,
    payment_id: Uuid,
    contract_id: Uuid,
    confidence: f64,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        UPDATE payments
        SET contract_id = $2,
            linking_confidence = $3
        WHERE id = $1
          AND contract_id IS NULL
        "#
    )
    .bind(payment_id)
    .bind(contract_id)
    .bind(confidence)
    .execute(pool)
    .await?;

    Ok(result.rows_affected())
}
