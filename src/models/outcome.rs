use serde::{Deserialize, Serialize, Serializer};
use uuid::Uuid;

/// 成功阈值: 最高分必须严格大于该值
pub const SUCCESS_THRESHOLD: f64 = 0.40;
/// 自动关联阈值
pub const AUTO_LINK_THRESHOLD: f64 = 0.70;
/// 建议列表长度上限
pub const MAX_SUGGESTIONS: usize = 5;

/// 输出时保留 4 位小数, 避免 0.7000000000000001 这类浮点累加噪声
pub fn serialize_confidence<S: Serializer>(confidence: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_f64((confidence * 10_000.0).round() / 10_000.0)
}

/// 单个合同的评分结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub contract_id: Uuid,
    pub contract_number: String,
    #[serde(serialize_with = "serialize_confidence")]
    pub confidence: f64,
    pub reason: String,
}

/// 处理建议
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Recommendation {
    AutoLink,
    ManualReview,
    NoMatch,
}

impl Recommendation {
    pub fn for_confidence(confidence: f64) -> Self {
        if confidence >= AUTO_LINK_THRESHOLD {
            Recommendation::AutoLink
        } else if confidence > SUCCESS_THRESHOLD {
            Recommendation::ManualReview
        } else {
            Recommendation::NoMatch
        }
    }
}

/// 关联结果, 由调用方决定是否落库
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinkingOutcome {
    pub success: bool,
    pub suggested_contract_id: Option<Uuid>,
    #[serde(serialize_with = "serialize_confidence")]
    pub confidence: f64,
    pub suggestions: Vec<MatchResult>,
    pub recommendation: Recommendation,
}

impl LinkingOutcome {
    /// 无候选 / 查询失败
    pub fn empty() -> Self {
        Self {
            success: false,
            suggested_contract_id: None,
            confidence: 0.0,
            suggestions: Vec::new(),
            recommendation: Recommendation::NoMatch,
        }
    }

    /// 由已排序的建议列表构建
    pub fn from_ranked(suggestions: Vec<MatchResult>) -> Self {
        let Some(top) = suggestions.first() else {
            return Self::empty();
        };

        let confidence = top.confidence;
        let success = confidence > SUCCESS_THRESHOLD;
        let suggested_contract_id = success.then_some(top.contract_id);

        Self {
            success,
            suggested_contract_id,
            confidence,
            recommendation: Recommendation::for_confidence(confidence),
            suggestions,
        }
    }

    pub fn best(&self) -> Option<&MatchResult> {
        self.suggestions.first()
    }
}
