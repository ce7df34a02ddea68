//! URL risk classifier core module
//! URL 风险分类器核心
//! 核心职责：
//! 1. 串联特征提取与策略求值（提取 → 评分 → 判定）
//! 2. 阈值管理（策略默认值 / 构造期校验的自定义值）
//! 3. 提供基础判定/带明细报告两个版本接口

use log::debug;

use crate::error::{RiskResult, UrlRiskError};
use crate::feature::{FeatureVector, UrlFeatureExtractor};
use crate::policy::{PolicyId, ScoreBreakdown, ScoringPolicy};

use super::verdict::{Label, RiskReport, Verdict};

/// URL 风险分类器
/// 设计说明：
/// - policy: 静态策略表引用（载入一次全局复用，Clone 零成本）
/// - threshold: 判定阈值（构造期校验，调用期不再失败）
/// - 分类路径为纯函数，跨线程共享无需加锁
#[derive(Debug, Clone, Copy)]
pub struct UrlClassifier {
    policy: &'static ScoringPolicy,
    threshold: f64,
}

impl UrlClassifier {
    /// 创建分类器（策略默认阈值，不会失败）
    /// 参数：policy_id - 策略标识
    /// 返回：分类器实例
    pub fn new(policy_id: PolicyId) -> Self {
        Self {
            policy: ScoringPolicy::get(policy_id),
            threshold: policy_id.default_threshold(),
        }
    }

    /// 创建分类器（自定义阈值）
    /// 阈值越界（含 NaN）在此快速失败，调用期不再校验
    /// 参数：
    /// - policy_id: 策略标识
    /// - threshold: 判定阈值，闭区间 [0,1]
    /// 返回：分类器实例 | 配置错误
    pub fn with_threshold(policy_id: PolicyId, threshold: f64) -> RiskResult<Self> {
        // contains 对 NaN 为 false，一并拒绝
        if !(0.0..=1.0).contains(&threshold) {
            return Err(UrlRiskError::InvalidThreshold(threshold));
        }
        Ok(Self {
            policy: ScoringPolicy::get(policy_id),
            threshold,
        })
    }

    /// 当前策略标识
    #[inline(always)]
    pub fn policy_id(&self) -> PolicyId {
        self.policy.id
    }

    /// 当前判定阈值
    #[inline(always)]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// 核心分类方法（高性能版）
    /// 流程：特征提取 → 策略求值 → 阈值判定（分数达到阈值即判可疑）
    /// 参数：url - 任意输入字符串
    /// 返回：判定结果（无失败模式）
    #[inline(always)]
    pub fn classify(&self, url: &str) -> Verdict {
        let features = UrlFeatureExtractor::extract(url);
        let breakdown = self.policy.score(&features);
        self.verdict_for(url, breakdown.score)
    }

    /// 核心分类方法（带明细报告版）
    /// 与 classify 判定逻辑完全一致，额外返回特征向量与逐规则明细
    /// 参数：url - 任意输入字符串
    /// 返回：详细分类报告
    pub fn classify_detailed(&self, url: &str) -> RiskReport {
        let features = UrlFeatureExtractor::extract(url);
        let breakdown = self.policy.score(&features);
        let verdict = self.verdict_for(url, breakdown.score);
        RiskReport {
            verdict,
            features,
            breakdown,
        }
    }

    fn verdict_for(&self, url: &str, score: f64) -> Verdict {
        let label = if score >= self.threshold {
            Label::Suspicious
        } else {
            Label::Benign
        };
        debug!(
            "[判定完成] 结论: {} | 分数: {:.4} | 阈值: {:.2} | 策略: {} | URL: {}",
            label, score, self.threshold, self.policy.id, url
        );
        Verdict {
            url: url.to_string(),
            score,
            label,
            policy_id: self.policy.id,
        }
    }
}

/// 便捷接口：提取特征向量
#[inline(always)]
pub fn extract_features(url: &str) -> FeatureVector {
    UrlFeatureExtractor::extract(url)
}

/// 便捷接口：按策略对已有特征向量评分
#[inline(always)]
pub fn score(features: &FeatureVector, policy_id: PolicyId) -> ScoreBreakdown {
    ScoringPolicy::get(policy_id).score(features)
}

/// 便捷接口：默认阈值下分类
#[inline(always)]
pub fn classify(url: &str, policy_id: PolicyId) -> Verdict {
    UrlClassifier::new(policy_id).classify(url)
}

/// 便捷接口：自定义阈值分类（阈值越界快速失败）
pub fn classify_with_threshold(
    url: &str,
    policy_id: PolicyId,
    threshold: f64,
) -> RiskResult<Verdict> {
    Ok(UrlClassifier::with_threshold(policy_id, threshold)?.classify(url))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_https_url_is_benign() {
        // 测试场景：干净 HTTPS 域名在默认阈值下判良性
        let verdict = classify("https://www.google.com", PolicyId::AdditiveCapped);
        assert_eq!(verdict.label, Label::Benign);
        assert_eq!(verdict.score, 0.0);
        assert_eq!(verdict.policy_id, PolicyId::AdditiveCapped);
    }

    #[test]
    fn test_ip_login_url_diverges_across_policies() {
        // 测试场景：同一 URL 两策略分道扬镳（加分策略可疑 / 加权策略良性）
        let url = "http://192.168.1.1/bank-login";
        let additive = classify(url, PolicyId::AdditiveCapped);
        assert_eq!(additive.label, Label::Suspicious);
        assert_eq!(additive.score, 1.0);

        let weighted = classify(url, PolicyId::WeightedNormalized);
        assert_eq!(weighted.label, Label::Benign);
        assert!(weighted.score < 0.6 && weighted.score > 0.5);
    }

    #[test]
    fn test_brand_phishing_url_saturates() {
        // 测试场景：品牌仿冒 URL 在加分策略下封顶判可疑
        let verdict = classify("https://secure-paypal-update.com/login", PolicyId::AdditiveCapped);
        assert_eq!(verdict.label, Label::Suspicious);
        assert_eq!(verdict.score, 1.0);
    }

    #[test]
    fn test_malformed_input_yields_verdict() {
        // 测试场景：畸形输入不报错，仍产出判定（保守默认值参与评分）
        let verdict = classify("not a url", PolicyId::AdditiveCapped);
        assert_eq!(verdict.label, Label::Benign); // 0.25 < 0.4
        assert!((verdict.score - 0.25).abs() < 1e-9);
        assert!(!verdict.is_suspicious());
    }

    #[test]
    fn test_threshold_boundary_inclusive() {
        // 测试场景：分数等于阈值判可疑（达到即判）
        let classifier = UrlClassifier::with_threshold(PolicyId::AdditiveCapped, 0.25)
            .expect("threshold in range");
        let verdict = classifier.classify("not a url"); // 恰为 0.25
        assert_eq!(verdict.label, Label::Suspicious);
    }

    #[test]
    fn test_threshold_validation_fails_fast() {
        // 测试场景：越界阈值（含 NaN）构造期报错，边界值合法
        assert!(matches!(
            UrlClassifier::with_threshold(PolicyId::AdditiveCapped, 1.5),
            Err(UrlRiskError::InvalidThreshold(_))
        ));
        assert!(matches!(
            UrlClassifier::with_threshold(PolicyId::AdditiveCapped, -0.1),
            Err(UrlRiskError::InvalidThreshold(_))
        ));
        assert!(matches!(
            UrlClassifier::with_threshold(PolicyId::AdditiveCapped, f64::NAN),
            Err(UrlRiskError::InvalidThreshold(_))
        ));
        assert!(UrlClassifier::with_threshold(PolicyId::AdditiveCapped, 0.0).is_ok());
        assert!(UrlClassifier::with_threshold(PolicyId::AdditiveCapped, 1.0).is_ok());
    }

    #[test]
    fn test_classify_idempotent() {
        // 测试场景：同 URL/策略/阈值下重复判定结果一致
        let classifier = UrlClassifier::new(PolicyId::WeightedNormalized);
        let url = "https://secure-login-ebay.malicious.com";
        assert_eq!(classifier.classify(url), classifier.classify(url));
    }

    #[test]
    fn test_detailed_report_consistent_with_verdict() {
        // 测试场景：明细报告与基础判定同分同结论，明细合计等于原始分
        let classifier = UrlClassifier::new(PolicyId::AdditiveCapped);
        let url = "http://bank-account-update.fake-site.org";
        let report = classifier.classify_detailed(url);
        assert_eq!(report.verdict, classifier.classify(url));
        let sum: f64 = report.breakdown.contributions.iter().map(|c| c.amount).sum();
        assert!((sum - report.breakdown.raw_score).abs() < 1e-9);
        assert_eq!(report.features.suspicious_keyword_count, 3);
    }

    #[test]
    fn test_appending_ip_never_lowers_score() {
        // 测试场景：HTTPS URL 追加 IP 段后分数单调不降（两策略）
        let bases = [
            "https://www.example.com",
            "https://secure.example.com/login",
            "https://a.b.c.d.example.com/path-with_many.chars",
        ];
        for policy_id in PolicyId::ALL {
            for base in bases {
                let with_ip = format!("{}/192.168.1.1", base);
                let before = classify(base, policy_id).score;
                let after = classify(&with_ip, policy_id).score;
                assert!(
                    after >= before,
                    "{} / {}: {} → {}",
                    policy_id,
                    base,
                    before,
                    after
                );
            }
        }
    }

    #[test]
    fn test_free_function_surface_agrees() {
        // 测试场景：自由函数与分类器实例走同一条路径
        let url = "https://amazon-security-alert.net/confirm";
        let features = extract_features(url);
        let breakdown = score(&features, PolicyId::AdditiveCapped);
        let verdict = classify(url, PolicyId::AdditiveCapped);
        assert_eq!(breakdown.score, verdict.score);

        let custom = classify_with_threshold(url, PolicyId::AdditiveCapped, 0.75)
            .expect("threshold in range");
        assert_eq!(custom.label, Label::Suspicious); // 0.80 ≥ 0.75
    }

    #[test]
    fn test_concurrent_classification_is_consistent() {
        // 测试场景：多线程共享分类器，结果与单线程一致（无锁纯函数路径）
        let classifier = UrlClassifier::new(PolicyId::AdditiveCapped);
        let urls = [
            "https://www.google.com",
            "http://192.168.1.1/bank-login",
            "https://secure-paypal-update.com/login",
            "not a url",
        ];
        let expected: Vec<Verdict> = urls.iter().map(|u| classifier.classify(u)).collect();

        let handles: Vec<_> = (0..4)
            .map(|_| {
                std::thread::spawn(move || {
                    urls.iter().map(|u| classifier.classify(u)).collect::<Vec<_>>()
                })
            })
            .collect();
        for handle in handles {
            let got = handle.join().expect("classification thread panicked");
            assert_eq!(got, expected);
        }
    }
}
