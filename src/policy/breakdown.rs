//! 评分明细结构
//! 记录一次策略求值的原始累加值、归一后总分与逐规则贡献（可审计）

use serde::Serialize;

use super::table::PolicyId;

/// 单条规则贡献（规则名 + 贡献值）
#[derive(Debug, Clone, Serialize)]
pub struct RuleContribution {
    pub name: &'static str,
    pub amount: f64,
}

/// 评分明细
/// raw_score 为策略口径下的累加值（截断/归一之前），score 恒在 [0,1]；
/// contributions 按规则表顺序只收录已触发规则，合计恒等于 raw_score
#[derive(Debug, Clone, Serialize)]
pub struct ScoreBreakdown {
    pub policy_id: PolicyId,
    pub raw_score: f64,
    pub score: f64,
    pub contributions: Vec<RuleContribution>,
}

impl ScoreBreakdown {
    /// 触发规则数量
    #[inline(always)]
    pub fn fired_rules(&self) -> usize {
        self.contributions.len()
    }

    /// 贡献最大的规则（无触发时为 None）
    pub fn top_contribution(&self) -> Option<&RuleContribution> {
        self.contributions
            .iter()
            .max_by(|a, b| a.amount.total_cmp(&b.amount))
    }
}

impl std::fmt::Display for ScoreBreakdown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "策略: {} | 总分: {:.4} | 原始: {:.4} | 命中规则: {}",
            self.policy_id,
            self.score,
            self.raw_score,
            self.fired_rules()
        )
    }
}
