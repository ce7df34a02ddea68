//! 评分策略组件
//! 规则即数据：触发条件 + 权重构成不可变策略表，载入一次全局复用

pub mod breakdown;
pub mod table;
pub mod trigger;

pub use breakdown::{RuleContribution, ScoreBreakdown};
pub use table::{Aggregation, PolicyId, RiskRule, ScoringPolicy};
pub use trigger::Trigger;
