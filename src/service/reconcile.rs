use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::{ContractSource, PaymentStore};
use crate::error::LinkerResult;
use crate::models::{Contract, LinkingOutcome, Payment, Recommendation, ReconcileStats};
use crate::service::linker::SmartPaymentLinker;
use crate::service::ranker;

/// 单笔收款的对账结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileRow {
    pub payment_id: Uuid,
    pub outcome: LinkingOutcome,
    pub linked: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileReport {
    pub stats: ReconcileStats,
    pub rows: Vec<ReconcileRow>,
}

/// 在同一份合同快照上并行评分
fn score_snapshot(payments: Vec<Payment>, contracts: &[Contract]) -> Vec<(Uuid, LinkingOutcome)> {
    payments
        .into_par_iter()
        .map(|payment| {
            let outcome = if contracts.is_empty() {
                LinkingOutcome::empty()
            } else {
                LinkingOutcome::from_ranked(ranker::rank(&payment, contracts))
            };
            (payment.id, outcome)
        })
        .collect()
}

impl<S: ContractSource + PaymentStore> SmartPaymentLinker<S> {
    /// 对公司全部未关联收款做一次对账
    ///
    /// 合同快照只取一次. auto_link 时仅写入建议为 AutoLink 的结果;
    /// 单行写入失败记入 link_failures 后继续处理其余收款.
    pub async fn reconcile_company(&self, company_id: Uuid, auto_link: bool) -> LinkerResult<ReconcileReport> {
        let payments = self.store().unlinked_payments(company_id).await?;
        let contracts = self.store().active_contracts(company_id).await?;

        let mut stats = ReconcileStats {
            company_id,
            payments_scanned: payments.len(),
            contracts_considered: contracts.len(),
            ..Default::default()
        };

        tracing::info!(
            "[Reconcile] 公司 {}: {} 笔未关联收款, {} 个生效合同",
            company_id, stats.payments_scanned, stats.contracts_considered
        );

        let scored = tokio::task::spawn_blocking(move || score_snapshot(payments, &contracts)).await?;

        let mut rows = Vec::with_capacity(scored.len());
        for (idx, (payment_id, outcome)) in scored.into_iter().enumerate() {
            self.record_outcome(payment_id, &outcome);

            let mut linked = false;
            if outcome.success {
                stats.suggested += 1;
            } else {
                stats.unmatched += 1;
            }

            if auto_link && outcome.recommendation == Recommendation::AutoLink {
                if let Some(best) = outcome.best() {
                    match self
                        .store()
                        .link_to_contract(payment_id, best.contract_id, best.confidence)
                        .await
                    {
                        Ok(true) => {
                            linked = true;
                            stats.auto_linked += 1;
                            self.record_link(payment_id, best.contract_id, best.confidence, &best.reason);
                        }
                        Ok(false) => {
                            tracing::warn!("Payment {} 已被关联, 跳过写入", payment_id);
                        }
                        Err(e) => {
                            stats.link_failures += 1;
                            tracing::error!(
                                "✗ Payment {} 关联合同 {} 写入失败: {}",
                                payment_id, best.contract_id, e
                            );
                        }
                    }
                }
            }

            let current = idx + 1;
            if current % 100 == 0 || current == 1 {
                tracing::info!(
                    "[Reconcile] 进度: {}/{}, 建议: {}, 已关联: {}",
                    current, stats.payments_scanned, stats.suggested, stats.auto_linked
                );
            }

            rows.push(ReconcileRow { payment_id, outcome, linked });
        }

        tracing::info!(
            "[Reconcile] 公司 {} 完成 - 扫描: {}, 建议: {}, 自动关联: {}, 写入失败: {}, 未匹配: {}",
            company_id,
            stats.payments_scanned,
            stats.suggested,
            stats.auto_linked,
            stats.link_failures,
            stats.unmatched
        );

        Ok(ReconcileReport { stats, rows })
    }
}
