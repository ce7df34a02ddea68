//! rsurlrisk - 基于规则的 URL 风险评分引擎
//! 特征提取 → 策略求值 → 阈值判定；两套命名策略可切换，支持离线阈值校准

pub mod classifier;
pub mod config;
pub mod corpus;
pub mod error;
pub mod feature;
pub mod policy;

// 导出全局错误类型
pub use self::error::{RiskResult, UrlRiskError};

// 导出配置模块核心结构体与构建器
pub use self::config::{ClassifierBuilder, ClassifierConfig};

// 导出特征模块核心接口
pub use self::feature::{Feature, FeatureVector, UrlFeatureExtractor};

// 导出策略模块核心接口与数据结构
pub use self::policy::{
    Aggregation, PolicyId, RiskRule, RuleContribution, ScoreBreakdown, ScoringPolicy, Trigger,
};

// 导出分类模块核心接口（含自由函数形式的简化调用面）
pub use self::classifier::{
    Label, RiskReport, UrlClassifier, Verdict, classify, classify_with_threshold,
    extract_features, score,
};

// 导出校准语料与离线评估接口
pub use self::corpus::{
    CalibrationCorpus, CalibrationStats, CorpusSummary, LabeledUrl, ThresholdSweep, evaluate,
    sweep_thresholds,
};
