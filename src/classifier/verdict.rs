//! 判定结果结构
//! 每次分类调用新建一份，不可变、无持久身份

use serde::{Deserialize, Serialize};

use crate::feature::FeatureVector;
use crate::policy::{PolicyId, ScoreBreakdown};

/// 判定标签（二分类）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    Suspicious, // 分数达到阈值
    Benign,     // 分数低于阈值
}

impl Label {
    #[inline(always)]
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Suspicious => "Suspicious",
            Label::Benign => "Benign",
        }
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 判定结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub url: String,
    /// 最终分数，恒在 [0,1]
    pub score: f64,
    pub label: Label,
    pub policy_id: PolicyId,
}

impl Verdict {
    #[inline(always)]
    pub fn is_suspicious(&self) -> bool {
        self.label == Label::Suspicious
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} → {} (分数: {:.4}, 策略: {})",
            self.url, self.label, self.score, self.policy_id
        )
    }
}

/// 详细分类报告（判定 + 特征 + 评分明细，供审计/调试输出）
#[derive(Debug, Clone, Serialize)]
pub struct RiskReport {
    pub verdict: Verdict,
    pub features: FeatureVector,
    pub breakdown: ScoreBreakdown,
}
