use futures::stream::{self, StreamExt, TryStreamExt};
use indexmap::IndexSet;
use uuid::Uuid;

use crate::db::{ContractSource, PaymentStore};
use crate::error::LinkerResult;
use crate::models::{DecisionKind, LinkingDecision, LinkingOutcome, Payment};
use crate::service::history::DecisionHistory;
use crate::service::ranker;

/// 收款-合同智能关联服务
///
/// 持有数据源与决策日志, 作为显式的应用上下文在请求间共享.
/// 关联结果只作为建议返回; 写库由调用方 (或批量对账) 决定.
pub struct SmartPaymentLinker<S> {
    store: S,
    history: DecisionHistory,
    batch_concurrency: usize,
}

impl<S> SmartPaymentLinker<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            history: DecisionHistory::new(),
            batch_concurrency: 1,
        }
    }

    pub fn with_batch_concurrency(mut self, batch_concurrency: usize) -> Self {
        self.batch_concurrency = batch_concurrency.max(1);
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// 某笔收款的决策日志
    pub fn history(&self, payment_id: Uuid) -> Vec<LinkingDecision> {
        self.history.for_payment(payment_id)
    }

    pub fn clear_history(&self) {
        self.history.clear();
    }

    pub(crate) fn record_outcome(&self, payment_id: Uuid, outcome: &LinkingOutcome) {
        let Some(best) = outcome.best() else {
            self.history.record(
                payment_id,
                DecisionKind::NoCandidates,
                None,
                0.0,
                "لا توجد عقود نشطة",
            );
            return;
        };

        let kind = if outcome.success {
            DecisionKind::Suggested
        } else {
            DecisionKind::LowConfidence
        };
        self.history.record(
            payment_id,
            kind,
            Some(best.contract_id),
            best.confidence,
            best.reason.clone(),
        );
    }

    pub(crate) fn record_link(&self, payment_id: Uuid, contract_id: Uuid, confidence: f64, reason: &str) {
        self.history
            .record(payment_id, DecisionKind::Linked, Some(contract_id), confidence, reason);
    }
}

impl<S: ContractSource> SmartPaymentLinker<S> {
    /// 为一笔收款寻找最可能的合同
    ///
    /// 单次查询, 不重试. 查询失败只记录日志, 返回置信度为 0 的失败结果.
    pub async fn find_best_contract(&self, payment: &Payment) -> LinkingOutcome {
        let contracts = match self.store.active_contracts(payment.company_id).await {
            Ok(contracts) => contracts,
            Err(e) => {
                tracing::error!(
                    "Payment {}: 查询公司 {} 生效合同失败: {}",
                    payment.id, payment.company_id, e
                );
                self.history.record(
                    payment.id,
                    DecisionKind::FetchFailed,
                    None,
                    0.0,
                    e.to_string(),
                );
                return LinkingOutcome::empty();
            }
        };

        if contracts.is_empty() {
            tracing::info!("Payment {}: 公司 {} 无生效合同", payment.id, payment.company_id);
            let outcome = LinkingOutcome::empty();
            self.record_outcome(payment.id, &outcome);
            return outcome;
        }

        let outcome = LinkingOutcome::from_ranked(ranker::rank(payment, &contracts));

        tracing::info!(
            "Payment {}: {} 个候选合同, 最高置信度 {:.2}, success={}",
            payment.id,
            contracts.len(),
            outcome.confidence,
            outcome.success
        );
        self.record_outcome(payment.id, &outcome);
        outcome
    }
}

impl<S: ContractSource + PaymentStore> SmartPaymentLinker<S> {
    /// 按收款ID批量关联 (去重保序, 并发度受 batch_concurrency 限制); 不存在的ID跳过
    pub async fn link_payments(&self, payment_ids: &[Uuid]) -> LinkerResult<Vec<(Uuid, LinkingOutcome)>> {
        let unique: IndexSet<Uuid> = payment_ids.iter().copied().collect();
        let total = unique.len();

        let results: Vec<Option<(Uuid, LinkingOutcome)>> = stream::iter(unique)
            .map(|payment_id| self.link_one(payment_id))
            .buffered(self.batch_concurrency)
            .try_collect()
            .await?;

        let outcomes: Vec<(Uuid, LinkingOutcome)> = results.into_iter().flatten().collect();
        tracing::info!(
            "批量关联完成: 请求 {} 笔, 处理 {} 笔, 成功 {} 笔",
            total,
            outcomes.len(),
            outcomes.iter().filter(|(_, o)| o.success).count()
        );
        Ok(outcomes)
    }

    async fn link_one(&self, payment_id: Uuid) -> LinkerResult<Option<(Uuid, LinkingOutcome)>> {
        let Some(payment) = self.store.get_payment(payment_id).await? else {
            tracing::warn!("Payment {} not found, skipping", payment_id);
            return Ok(None);
        };
        let outcome = self.find_best_contract(&payment).await;
        Ok(Some((payment_id, outcome)))
    }
}
