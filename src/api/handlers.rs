use crate::db::{ContractSource, PaymentStore};
use crate::error::LinkerResult;
use crate::models::{LinkingDecision, LinkingOutcome, Payment, ReconcileStats};
use crate::service::{ReconcileReport, SmartPaymentLinker};
use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

/// 请求体: 收款ID列表
#[derive(Debug, Deserialize)]
pub struct BatchLinkRequest {
    pub payment_ids: Vec<Uuid>,
}

#[derive(Debug, Serialize)]
pub struct BatchLinkedPayment {
    pub payment_id: Uuid,
    pub outcome: LinkingOutcome,
}

/// 批量关联响应体
#[derive(Debug, Serialize)]
pub struct BatchLinkResponse {
    pub success: bool,
    pub message: String,
    pub outcomes: Option<Vec<BatchLinkedPayment>>,
}

/// 对账请求体
#[derive(Debug, Deserialize)]
pub struct ReconcileRequest {
    pub company_id: Uuid,
    #[serde(default)]
    pub auto_link: bool,
    #[serde(default)]
    pub export_path: Option<PathBuf>,
}

/// 对账响应体（含统计信息）
#[derive(Debug, Serialize)]
pub struct ReconcileResponse {
    pub success: bool,
    pub message: String,
    pub stats: Option<ReconcileStats>,
}

/// 健康检查
pub async fn health_check() -> &'static str {
    "OK"
}

/// 单笔收款寻找最佳合同; 数据源故障也返回 200 + success=false
pub async fn find_best_contract<S: ContractSource + 'static>(
    State(linker): State<Arc<SmartPaymentLinker<S>>>,
    Json(payment): Json<Payment>,
) -> Json<LinkingOutcome> {
    Json(linker.find_best_contract(&payment).await)
}

/// 批量关联接口
pub async fn batch_link<S: ContractSource + PaymentStore + 'static>(
    State(linker): State<Arc<SmartPaymentLinker<S>>>,
    Json(req): Json<BatchLinkRequest>,
) -> Response {
    match linker.link_payments(&req.payment_ids).await {
        Ok(outcomes) => {
            let matched = outcomes.iter().filter(|(_, o)| o.success).count();
            let response = BatchLinkResponse {
                success: true,
                message: format!(
                    "Processed {} payments, {} with a suggested contract",
                    outcomes.len(), matched
                ),
                outcomes: Some(
                    outcomes
                        .into_iter()
                        .map(|(payment_id, outcome)| BatchLinkedPayment { payment_id, outcome })
                        .collect(),
                ),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("Batch linking failed: {}", e);
            let response = BatchLinkResponse {
                success: false,
                message: format!("Error: {}", e),
                outcomes: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

async fn run_reconcile<S: ContractSource + PaymentStore>(
    linker: &SmartPaymentLinker<S>,
    req: &ReconcileRequest,
) -> LinkerResult<ReconcileReport> {
    let report = linker.reconcile_company(req.company_id, req.auto_link).await?;
    if let Some(path) = &req.export_path {
        crate::db::export_outcomes_csv(&report.rows, path)?;
        tracing::info!("对账结果已导出: {}", path.display());
    }
    Ok(report)
}

/// 公司级对账接口
pub async fn reconcile<S: ContractSource + PaymentStore + 'static>(
    State(linker): State<Arc<SmartPaymentLinker<S>>>,
    Json(req): Json<ReconcileRequest>,
) -> Response {
    match run_reconcile(linker.as_ref(), &req).await {
        Ok(report) => {
            let stats = report.stats;
            let response = ReconcileResponse {
                success: true,
                message: format!(
                    "Reconciled {} payments, {} suggested, {} auto-linked",
                    stats.payments_scanned, stats.suggested, stats.auto_linked
                ),
                stats: Some(stats),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("Reconcile for company {} failed: {}", req.company_id, e);
            let response = ReconcileResponse {
                success: false,
                message: format!("Error: {}", e),
                stats: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}

/// 收款的关联决策日志
pub async fn linking_history<S: Send + Sync + 'static>(
    State(linker): State<Arc<SmartPaymentLinker<S>>>,
    Path(payment_id): Path<Uuid>,
) -> Json<Vec<LinkingDecision>> {
    Json(linker.history(payment_id))
}

/// 清空决策日志
pub async fn clear_history<S: Send + Sync + 'static>(
    State(linker): State<Arc<SmartPaymentLinker<S>>>,
) -> StatusCode {
    linker.clear_history();
    tracing::info!("Linking history cleared");
    StatusCode::NO_CONTENT
}
