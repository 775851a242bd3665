use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 决策类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionKind {
    Suggested,
    LowConfidence,
    NoCandidates,
    FetchFailed,
    Linked,
}

/// 关联决策记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkingDecision {
    pub payment_id: Uuid,
    pub kind: DecisionKind,
    pub contract_id: Option<Uuid>,
    #[serde(serialize_with = "crate::models::outcome::serialize_confidence")]
    pub confidence: f64,
    pub reason: String,
    pub decided_at: DateTime<Utc>,
}

/// 批量对账统计
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReconcileStats {
    pub company_id: Uuid,
    pub payments_scanned: usize,
    pub contracts_considered: usize,
    pub suggested: usize,
    pub auto_linked: usize,
    /// 自动关联写库失败的笔数 (该行记录日志后继续)
    pub link_failures: usize,
    pub unmatched: usize,
}
