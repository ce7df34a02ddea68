//! 评分策略表定义与求值
//! 两套命名策略作为不可变静态数据一次载入，规则即数据、全局复用

use std::str::FromStr;

use log::debug;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::UrlRiskError;
use crate::feature::{Feature, FeatureVector};

use super::breakdown::{RuleContribution, ScoreBreakdown};
use super::trigger::Trigger;

/// 策略标识（封闭集合，未知标识在解析期快速失败）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PolicyId {
    /// 独立加分、总分截断到 [0,1]
    #[serde(rename = "additive-capped")]
    AdditiveCapped,
    /// 加权归一化：总分 = Σ(权重×触发比例) / Σ权重
    #[serde(rename = "weighted-normalized")]
    WeightedNormalized,
}

impl PolicyId {
    /// 全部已注册策略
    pub const ALL: [PolicyId; 2] = [PolicyId::AdditiveCapped, PolicyId::WeightedNormalized];

    /// 稳定策略名（与序列化格式一致）
    #[inline(always)]
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyId::AdditiveCapped => "additive-capped",
            PolicyId::WeightedNormalized => "weighted-normalized",
        }
    }

    /// 策略配套的默认判定阈值
    #[inline(always)]
    pub fn default_threshold(&self) -> f64 {
        match self {
            PolicyId::AdditiveCapped => 0.4,
            PolicyId::WeightedNormalized => 0.6,
        }
    }
}

impl std::fmt::Display for PolicyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyId {
    type Err = UrlRiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "additive-capped" => Ok(PolicyId::AdditiveCapped),
            "weighted-normalized" => Ok(PolicyId::WeightedNormalized),
            other => Err(UrlRiskError::UnknownPolicy(other.to_string())),
        }
    }
}

/// 聚合口径
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Aggregation {
    /// 触发规则贡献直接累加，最终 min(sum, 1.0)
    CappedSum,
    /// 最终 = 累加值 / 权重总和（权重总和名义上为 1.0，按实际合计归一）
    WeightNormalized,
}

/// 单条风险规则（名称 + 权重 + 触发条件）
#[derive(Debug, Clone)]
pub struct RiskRule {
    pub name: &'static str,
    pub weight: f64,
    pub trigger: Trigger,
}

/// 评分策略（不可变规则表）
#[derive(Debug)]
pub struct ScoringPolicy {
    pub id: PolicyId,
    pub aggregation: Aggregation,
    pub rules: Vec<RiskRule>,
}

/// 独立加分策略表
/// 规则权重与原始检测器逐项对齐；关键词三档为叠加关系（最高 0.70）
static ADDITIVE_CAPPED: Lazy<ScoringPolicy> = Lazy::new(|| ScoringPolicy {
    id: PolicyId::AdditiveCapped,
    aggregation: Aggregation::CappedSum,
    rules: vec![
        RiskRule {
            name: "long-url",
            weight: 0.15,
            trigger: Trigger::FeatureAbove(Feature::UrlLength, 50.0),
        },
        RiskRule {
            name: "special-char-flood",
            weight: 0.20,
            trigger: Trigger::SpecialCharsAbove(4),
        },
        RiskRule {
            name: "keyword-hit",
            weight: 0.30,
            trigger: Trigger::KeywordAtLeast(1),
        },
        RiskRule {
            name: "keyword-stack-2",
            weight: 0.20,
            trigger: Trigger::KeywordAtLeast(2),
        },
        RiskRule {
            name: "keyword-stack-3",
            weight: 0.20,
            trigger: Trigger::KeywordAtLeast(3),
        },
        RiskRule {
            name: "ip-literal-host",
            weight: 0.40,
            trigger: Trigger::FlagSet(Feature::HasIp),
        },
        RiskRule {
            name: "no-https",
            weight: 0.25,
            trigger: Trigger::FlagClear(Feature::HasHttps),
        },
        RiskRule {
            name: "long-domain",
            weight: 0.15,
            trigger: Trigger::FeatureAbove(Feature::DomainLength, 25.0),
        },
        RiskRule {
            name: "deep-subdomains",
            weight: 0.15,
            trigger: Trigger::FeatureAbove(Feature::NumSubdomains, 2.0),
        },
        RiskRule {
            name: "paypal-off-domain",
            weight: 0.30,
            trigger: Trigger::BrandOffDomain {
                brand: "paypal",
                official: "paypal.com",
            },
        },
        RiskRule {
            name: "amazon-off-domain",
            weight: 0.30,
            trigger: Trigger::BrandOffDomain {
                brand: "amazon",
                official: "amazon.com",
            },
        },
        RiskRule {
            name: "secure-update-pair",
            weight: 0.25,
            trigger: Trigger::KeywordPair("secure", "update"),
        },
    ],
});

/// 加权归一化策略表（权重合计名义 1.0）
static WEIGHTED_NORMALIZED: Lazy<ScoringPolicy> = Lazy::new(|| ScoringPolicy {
    id: PolicyId::WeightedNormalized,
    aggregation: Aggregation::WeightNormalized,
    rules: vec![
        RiskRule {
            name: "very-long-url",
            weight: 0.10,
            trigger: Trigger::FeatureAbove(Feature::UrlLength, 75.0),
        },
        RiskRule {
            name: "special-char-flood",
            weight: 0.10,
            trigger: Trigger::SpecialCharsAbove(5),
        },
        RiskRule {
            name: "keyword-density",
            weight: 0.20,
            trigger: Trigger::KeywordScaled { divisor: 3.0 },
        },
        RiskRule {
            name: "ip-literal-host",
            weight: 0.30,
            trigger: Trigger::FlagSet(Feature::HasIp),
        },
        RiskRule {
            name: "no-https",
            weight: 0.15,
            trigger: Trigger::FlagClear(Feature::HasHttps),
        },
        RiskRule {
            name: "odd-domain-length",
            weight: 0.05,
            trigger: Trigger::OutsideRange {
                feature: Feature::DomainLength,
                min: 5.0,
                max: 30.0,
            },
        },
        RiskRule {
            name: "deep-subdomains",
            weight: 0.10,
            trigger: Trigger::FeatureAbove(Feature::NumSubdomains, 3.0),
        },
    ],
});

impl ScoringPolicy {
    /// 按标识取策略表（静态引用，载入一次全局复用）
    #[inline(always)]
    pub fn get(id: PolicyId) -> &'static ScoringPolicy {
        match id {
            PolicyId::AdditiveCapped => &ADDITIVE_CAPPED,
            PolicyId::WeightedNormalized => &WEIGHTED_NORMALIZED,
        }
    }

    /// 策略配套的默认判定阈值
    #[inline(always)]
    pub fn default_threshold(&self) -> f64 {
        self.id.default_threshold()
    }

    /// 对特征向量求值（纯函数，线程安全）
    ///
    /// 核心逻辑：
    /// 1. 顺序遍历规则表，逐条求触发比例
    /// 2. 触发规则按 权重×比例 记入贡献并累加原始分
    /// 3. 按聚合口径收尾：截断 或 除以权重总和
    ///
    /// 参数：features - 待评分的特征向量
    /// 返回：评分明细（总分恒在 [0,1]）
    pub fn score(&self, features: &FeatureVector) -> ScoreBreakdown {
        let mut raw_score = 0.0;
        let mut total_weight = 0.0;
        let mut contributions = Vec::new();

        for rule in &self.rules {
            total_weight += rule.weight;
            let fraction = rule.trigger.fraction(features);
            if fraction > 0.0 {
                let amount = rule.weight * fraction;
                raw_score += amount;
                debug!(
                    "[{}]规则命中 | 规则: {} | 条件: {} | 贡献: {:.4}",
                    self.id,
                    rule.name,
                    rule.trigger.describe(),
                    amount
                );
                contributions.push(RuleContribution {
                    name: rule.name,
                    amount,
                });
            }
        }

        let score = match self.aggregation {
            Aggregation::CappedSum => raw_score.min(1.0),
            // 规则表非空且权重全为正，无除零
            Aggregation::WeightNormalized => raw_score / total_weight,
        };

        ScoreBreakdown {
            policy_id: self.id,
            raw_score,
            score,
            contributions,
        }
    }
}
