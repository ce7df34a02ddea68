//! 分类器组件
//! 阈值判定 + 对外调用面（提取 → 评分 → 判定 的聚合入口）

pub mod classifier;
pub mod verdict;

pub use classifier::{
    UrlClassifier, classify, classify_with_threshold, extract_features, score,
};
pub use verdict::{Label, RiskReport, Verdict};
