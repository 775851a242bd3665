use std::collections::VecDeque;

use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use crate::models::{DecisionKind, LinkingDecision};

/// 每笔收款保留的决策条数上限, 超出时丢弃最早的
pub const MAX_DECISIONS_PER_PAYMENT: usize = 50;

/// 关联决策日志 (按收款ID), 进程内保存
#[derive(Debug)]
pub struct DecisionHistory {
    entries: DashMap<Uuid, VecDeque<LinkingDecision>>,
    per_payment_limit: usize,
}

impl Default for DecisionHistory {
    fn default() -> Self {
        Self::with_limit(MAX_DECISIONS_PER_PAYMENT)
    }
}

impl DecisionHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(per_payment_limit: usize) -> Self {
        Self {
            entries: DashMap::new(),
            per_payment_limit: per_payment_limit.max(1),
        }
    }

    pub fn record(
        &self,
        payment_id: Uuid,
        kind: DecisionKind,
        contract_id: Option<Uuid>,
        confidence: f64,
        reason: impl Into<String>,
    ) {
        let decision = LinkingDecision {
            payment_id,
            kind,
            contract_id,
            confidence,
            reason: reason.into(),
            decided_at: Utc::now(),
        };

        tracing::debug!(
            "Linking decision recorded: payment {} -> {:?} ({:.2})",
            payment_id, kind, confidence
        );
        let mut entry = self.entries.entry(payment_id).or_default();
        if entry.len() >= self.per_payment_limit {
            entry.pop_front();
        }
        entry.push_back(decision);
    }

    /// 某笔收款的全部决策, 按记录顺序
    pub fn for_payment(&self, payment_id: Uuid) -> Vec<LinkingDecision> {
        self.entries
            .get(&payment_id)
            .map(|entry| entry.value().iter().cloned().collect())
            .unwrap_or_default()
    }

    #[cfg(test)]
    fn payment_count(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}
