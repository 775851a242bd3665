use bigdecimal::{BigDecimal, Zero};
use crate::models::{Contract, Payment};

/// 基础分: 每个生效合同都是名义候选
pub const BASE_CONFIDENCE: f64 = 0.30;
/// 协议号与合同号互相包含
pub const AGREEMENT_BONUS: f64 = 0.40;
/// 同一客户
pub const CUSTOMER_BONUS: f64 = 0.20;
/// 参考号完全一致
pub const REFERENCE_BONUS: f64 = 0.15;

/// 金额相对差 (百分比上限, 加分), 按从严到宽排列
const AMOUNT_TIERS: [(u32, f64); 4] = [(2, 0.30), (5, 0.25), (10, 0.15), (20, 0.08)];
/// 收款日与合同起始日相差天数 (上限, 加分)
const DATE_TIERS: [(i64, f64); 3] = [(3, 0.10), (7, 0.08), (30, 0.05)];

const REASON_AGREEMENT: &str = "تطابق رقم الاتفاقية";
const REASON_AMOUNT: &str = "تطابق المبلغ";
const REASON_CUSTOMER: &str = "نفس العميل";
const REASON_REFERENCE: &str = "تطابق الرقم المرجعي";
const REASON_DATE: &str = "تاريخ قريب";
const REASON_GENERIC: &str = "مطابقة عامة";

/// 单次评分中各启发式的命中情况
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchSignals {
    pub agreement: bool,
    pub amount_bonus: f64,
    pub customer: bool,
    pub date_bonus: f64,
    pub reference: bool,
}

impl MatchSignals {
    /// 基础分 + 各项加分, 截断到 [0, 1]
    pub fn confidence(&self) -> f64 {
        let mut confidence = BASE_CONFIDENCE;
        if self.agreement {
            confidence += AGREEMENT_BONUS;
        }
        confidence += self.amount_bonus;
        if self.customer {
            confidence += CUSTOMER_BONUS;
        }
        confidence += self.date_bonus;
        if self.reference {
            confidence += REFERENCE_BONUS;
        }
        // 去掉浮点累加噪声, 使 0.30 + 0.40 恰好等于 0.70
        (confidence.clamp(0.0, 1.0) * 1e10).round() / 1e10
    }

    pub fn reason(&self) -> String {
        let mut reasons = Vec::new();
        if self.agreement {
            reasons.push(REASON_AGREEMENT);
        }
        if self.amount_bonus > 0.0 {
            reasons.push(REASON_AMOUNT);
        }
        if self.customer {
            reasons.push(REASON_CUSTOMER);
        }
        if self.reference {
            reasons.push(REASON_REFERENCE);
        }
        if self.date_bonus > 0.0 {
            reasons.push(REASON_DATE);
        }

        if reasons.is_empty() {
            REASON_GENERIC.to_string()
        } else {
            reasons.join(" + ")
        }
    }
}

/// 计算一笔收款与一个合同的各项命中
pub fn evaluate(payment: &Payment, contract: &Contract) -> MatchSignals {
    let agreement = payment
        .agreement_number
        .as_deref()
        .is_some_and(|agreement| numbers_overlap(agreement, &contract.contract_number));

    let customer = matches!(
        (payment.customer_id, contract.customer_id),
        (Some(a), Some(b)) if a == b
    );

    let reference = match (payment.reference_number.as_deref(), contract.reference_number.as_deref()) {
        (Some(a), Some(b)) => {
            let a = a.trim();
            !a.is_empty() && a == b.trim()
        }
        _ => false,
    };

    let days = (payment.payment_date - contract.start_date).num_days().abs();

    MatchSignals {
        agreement,
        amount_bonus: amount_bonus(&payment.amount, &contract.monthly_amount),
        customer,
        date_bonus: date_bonus(days),
        reference,
    }
}

/// 置信度 ∈ [0, 1]
pub fn score(payment: &Payment, contract: &Contract) -> f64 {
    evaluate(payment, contract).confidence()
}

/// 命中启发式的可读说明
pub fn match_reasons(payment: &Payment, contract: &Contract) -> String {
    evaluate(payment, contract).reason()
}

/// 双向子串匹配, 忽略大小写与首尾空白
fn numbers_overlap(agreement: &str, contract_number: &str) -> bool {
    let agreement = agreement.trim().to_uppercase();
    let contract_number = contract_number.trim().to_uppercase();
    if agreement.is_empty() || contract_number.is_empty() {
        return false;
    }
    agreement.contains(&contract_number) || contract_number.contains(&agreement)
}

/// |amount - monthly| / monthly, 用十进制精确比较: diff * 100 <= monthly * pct
fn amount_bonus(amount: &BigDecimal, monthly_amount: &BigDecimal) -> f64 {
    if *monthly_amount <= BigDecimal::zero() {
        return 0.0;
    }

    let scaled_diff = (amount - monthly_amount).abs() * BigDecimal::from(100);
    AMOUNT_TIERS
        .iter()
        .find(|(pct, _)| scaled_diff <= monthly_amount * BigDecimal::from(*pct))
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0.0)
}

fn date_bonus(days: i64) -> f64 {
    DATE_TIERS
        .iter()
        .find(|(limit, _)| days <= *limit)
        .map(|(_, bonus)| *bonus)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn payment(amount: &str) -> Payment {
        Payment {
            id: Uuid::new_v4(),
            company_id: Uuid::nil(),
            customer_id: None,
            amount: dec(amount),
            payment_date: date(2024, 6, 1),
            agreement_number: None,
            reference_number: None,
        }
    }

    fn contract(number: &str, monthly: &str) -> Contract {
        Contract {
            id: Uuid::new_v4(),
            contract_number: number.to_string(),
            company_id: Uuid::nil(),
            customer_id: None,
            monthly_amount: dec(monthly),
            // 远离收款日, 默认不触发日期加分
            start_date: date(2023, 1, 1),
            reference_number: None,
        }
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn no_overlap_scores_exactly_base() {
        let p = payment("500");
        let c = contract("C-100", "1000");
        assert_eq!(score(&p, &c), BASE_CONFIDENCE);
        assert_eq!(match_reasons(&p, &c), REASON_GENERIC);
    }

    #[test]
    fn agreement_and_amount_cap_at_one() {
        let mut p = payment("1000");
        p.agreement_number = Some("C-100".to_string());
        let c = contract("C-100", "1000");
        assert!(approx(score(&p, &c), 1.0));
        assert_eq!(match_reasons(&p, &c), "تطابق رقم الاتفاقية + تطابق المبلغ");
    }

    #[test]
    fn full_overlap_is_capped() {
        let customer = Uuid::new_v4();
        let mut p = payment("1000");
        p.agreement_number = Some("C-100".to_string());
        p.customer_id = Some(customer);
        p.reference_number = Some("REF-1".to_string());
        let mut c = contract("C-100", "1000");
        c.customer_id = Some(customer);
        c.reference_number = Some("REF-1".to_string());
        c.start_date = p.payment_date;
        assert_eq!(score(&p, &c), 1.0);
    }

    #[test]
    fn amount_tiers() {
        let c = contract("X", "1000");
        let cases = [
            ("1000", 0.30),
            ("1020", 0.30),
            ("980", 0.30),
            ("1021", 0.25),
            ("1050", 0.25),
            ("1100", 0.15),
            ("900", 0.15),
            ("1200", 0.08),
            ("800", 0.08),
            ("1201", 0.0),
            ("500", 0.0),
        ];
        for (amount, bonus) in cases {
            let signals = evaluate(&payment(amount), &c);
            assert!(approx(signals.amount_bonus, bonus), "amount {amount}: {}", signals.amount_bonus);
        }
    }

    #[test]
    fn zero_monthly_amount_never_matches_amount() {
        let c = contract("X", "0");
        assert_eq!(evaluate(&payment("0"), &c).amount_bonus, 0.0);
    }

    #[test]
    fn agreement_substring_is_bidirectional_and_case_insensitive() {
        let c = contract("CNT-2024-0042", "1");
        let mut p = payment("9999");

        p.agreement_number = Some("2024-0042".to_string());
        assert!(evaluate(&p, &c).agreement);

        p.agreement_number = Some("cnt-2024-0042/a".to_string());
        assert!(evaluate(&p, &c).agreement);

        p.agreement_number = Some("  ".to_string());
        assert!(!evaluate(&p, &c).agreement);

        p.agreement_number = Some("CNT-2025".to_string());
        assert!(!evaluate(&p, &c).agreement);
    }

    #[test]
    fn customer_requires_both_sides() {
        let id = Uuid::new_v4();
        let mut p = payment("1");
        let mut c = contract("X", "1000");
        c.customer_id = Some(id);
        assert!(!evaluate(&p, &c).customer);

        p.customer_id = Some(id);
        assert!(evaluate(&p, &c).customer);
        assert!(approx(score(&p, &c), 0.50));
        assert_eq!(match_reasons(&p, &c), "نفس العميل");
    }

    #[test]
    fn date_tiers() {
        let mut c = contract("X", "1000");
        let p = payment("1");
        let cases = [(0, 0.10), (3, 0.10), (4, 0.08), (7, 0.08), (8, 0.05), (30, 0.05), (31, 0.0)];
        for (days, bonus) in cases {
            c.start_date = p.payment_date - chrono::Duration::days(days);
            assert!(approx(evaluate(&p, &c).date_bonus, bonus), "days {days}");
            c.start_date = p.payment_date + chrono::Duration::days(days);
            assert!(approx(evaluate(&p, &c).date_bonus, bonus), "days -{days}");
        }
    }

    #[test]
    fn reference_must_match_exactly() {
        let mut p = payment("1");
        let mut c = contract("X", "1000");
        p.reference_number = Some("TRX-77".to_string());
        c.reference_number = Some("TRX-778".to_string());
        assert!(!evaluate(&p, &c).reference);

        c.reference_number = Some("TRX-77".to_string());
        assert!(evaluate(&p, &c).reference);
        assert!(approx(score(&p, &c), 0.45));
    }

    #[test]
    fn tier_sums_land_exactly_on_thresholds() {
        let mut p = payment("10");
        p.agreement_number = Some("C-100".to_string());
        let c = contract("C-100", "9000");
        assert_eq!(score(&p, &c), 0.70);

        let p = payment("10");
        let mut c = contract("X", "9000");
        c.start_date = p.payment_date;
        assert_eq!(score(&p, &c), 0.40);
    }

    #[test]
    fn score_is_deterministic_and_bounded() {
        let mut p = payment("1010");
        p.agreement_number = Some("100".to_string());
        let c = contract("C-100", "1000");
        let first = score(&p, &c);
        for _ in 0..10 {
            assert_eq!(score(&p, &c), first);
        }
        assert!((0.0..=1.0).contains(&first));
    }
}
