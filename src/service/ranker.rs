use crate::models::{Contract, MatchResult, Payment, MAX_SUGGESTIONS};
use crate::service::scorer;

/// 对合同快照逐一评分, 按置信度降序 (同分保持快照顺序), 保留前 5 个
pub fn rank(payment: &Payment, contracts: &[Contract]) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = contracts
        .iter()
        .map(|contract| {
            let signals = scorer::evaluate(payment, contract);
            MatchResult {
                contract_id: contract.id,
                contract_number: contract.contract_number.clone(),
                confidence: signals.confidence(),
                reason: signals.reason(),
            }
        })
        .collect();

    results.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
    results.truncate(MAX_SUGGESTIONS);
    results
}
