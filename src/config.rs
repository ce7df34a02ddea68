//! 分类器配置管理,存储所有可配置项

use std::str::FromStr;

use crate::classifier::UrlClassifier;
use crate::error::RiskResult;
use crate::policy::PolicyId;

/// 分类器配置
#[derive(Debug, Clone)]
pub struct ClassifierConfig {
    // 评分策略
    pub policy_id: PolicyId,
    // 阈值覆盖（None 时用策略默认阈值）
    pub threshold: Option<f64>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            policy_id: PolicyId::AdditiveCapped,
            threshold: None,
        }
    }
}

impl ClassifierConfig {
    /// 生效阈值（覆盖值优先，否则取策略默认值）
    #[inline(always)]
    pub fn effective_threshold(&self) -> f64 {
        self.threshold.unwrap_or_else(|| self.policy_id.default_threshold())
    }
}

/// 配置构建器（链式 API）
/// 校验集中在 build()：阈值越界、未知策略名均在此快速失败
#[derive(Debug, Clone)]
pub struct ClassifierBuilder {
    config: ClassifierConfig,
    policy_name: Option<String>,
}

impl ClassifierBuilder {
    pub fn new() -> Self {
        Self {
            config: ClassifierConfig::default(),
            policy_name: None,
        }
    }

    /// 指定策略（枚举形式）
    pub fn policy(mut self, policy_id: PolicyId) -> Self {
        self.config.policy_id = policy_id;
        self.policy_name = None;
        self
    }

    /// 指定策略（名称字符串形式，build() 时解析）
    pub fn policy_name(mut self, name: impl Into<String>) -> Self {
        self.policy_name = Some(name.into());
        self
    }

    /// 覆盖判定阈值
    pub fn threshold(mut self, threshold: f64) -> Self {
        self.config.threshold = Some(threshold);
        self
    }

    /// 构建分类器（集中校验，配置错误快速失败）
    pub fn build(mut self) -> RiskResult<UrlClassifier> {
        if let Some(name) = self.policy_name.take() {
            self.config.policy_id = PolicyId::from_str(&name)?;
        }
        match self.config.threshold {
            Some(threshold) => UrlClassifier::with_threshold(self.config.policy_id, threshold),
            None => Ok(UrlClassifier::new(self.config.policy_id)),
        }
    }
}

impl Default for ClassifierBuilder {
    fn default() -> Self {
        Self::new()
    }
}
