//! 校准语料定义与内置样本集
//! 语料只进离线评估路径，分类路径从不消费

use serde::{Deserialize, Serialize};

use crate::classifier::Label;

/// 带标注样本（URL + 预期标签）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabeledUrl {
    pub url: String,
    pub label: Label,
}

/// 内置正规样本（15 条知名站点首页）
static BUILTIN_BENIGN: [&str; 15] = [
    "https://www.google.com",
    "https://www.github.com",
    "https://www.stackoverflow.com",
    "https://www.wikipedia.org",
    "https://www.microsoft.com",
    "https://www.apple.com",
    "https://www.amazon.com",
    "https://www.facebook.com",
    "https://www.twitter.com",
    "https://www.linkedin.com",
    "https://www.youtube.com",
    "https://www.netflix.com",
    "https://www.reddit.com",
    "https://www.instagram.com",
    "https://www.pinterest.com",
];

/// 内置可疑样本（15 条仿真钓鱼 URL，非真实站点）
static BUILTIN_SUSPICIOUS: [&str; 15] = [
    "http://secure-paypal-update.com/login",
    "https://amazon-security-alert.net/confirm",
    "http://192.168.1.1/bank-login",
    "https://paypal-verification.suspicious-domain.com",
    "http://bank-account-update.fake-site.org",
    "https://secure-login-ebay.malicious.com",
    "http://confirm-account-amazon.phishing.net",
    "https://update-paypal-security.fake.org",
    "http://bank-alert-signin.suspicious.com",
    "https://account-verification-paypal.malware.net",
    "http://secure-bank-login.phishing-site.com",
    "https://paypal-account-limited.fake.org",
    "http://amazon-account-suspended.malicious.net",
    "https://ebay-security-notice.suspicious.com",
    "http://bank-verification-required.phishing.org",
];

/// 校准语料（带标注 URL 集合）
#[derive(Debug, Clone, Default)]
pub struct CalibrationCorpus {
    samples: Vec<LabeledUrl>,
}

impl CalibrationCorpus {
    /// 内置样本集（15 正规 + 15 仿真钓鱼）
    pub fn builtin_sample() -> Self {
        let mut samples = Vec::with_capacity(BUILTIN_BENIGN.len() + BUILTIN_SUSPICIOUS.len());
        for url in BUILTIN_BENIGN {
            samples.push(LabeledUrl {
                url: url.to_string(),
                label: Label::Benign,
            });
        }
        for url in BUILTIN_SUSPICIOUS {
            samples.push(LabeledUrl {
                url: url.to_string(),
                label: Label::Suspicious,
            });
        }
        Self { samples }
    }

    /// 从外部条目构建语料
    pub fn from_entries<S, I>(entries: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Label)>,
    {
        let samples = entries
            .into_iter()
            .map(|(url, label)| LabeledUrl {
                url: url.into(),
                label,
            })
            .collect();
        Self { samples }
    }

    /// 追加一条带标注样本
    pub fn push(&mut self, url: impl Into<String>, label: Label) {
        self.samples.push(LabeledUrl {
            url: url.into(),
            label,
        });
    }

    #[inline(always)]
    pub fn samples(&self) -> &[LabeledUrl] {
        &self.samples
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// 语料概要（总数/正规/可疑计数）
    pub fn summary(&self) -> CorpusSummary {
        let suspicious = self
            .samples
            .iter()
            .filter(|s| s.label == Label::Suspicious)
            .count();
        CorpusSummary {
            total: self.samples.len(),
            benign: self.samples.len() - suspicious,
            suspicious,
        }
    }
}

/// 语料概要
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CorpusSummary {
    pub total: usize,
    pub benign: usize,
    pub suspicious: usize,
}

impl std::fmt::Display for CorpusSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "样本总数: {} | 正规: {} | 可疑: {}",
            self.total, self.benign, self.suspicious
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_sample_composition() {
        // 测试场景：内置样本集规模与标签分布
        let corpus = CalibrationCorpus::builtin_sample();
        assert_eq!(corpus.len(), 30);
        let summary = corpus.summary();
        assert_eq!(summary.benign, 15);
        assert_eq!(summary.suspicious, 15);
        assert_eq!(summary.total, 30);
    }

    #[test]
    fn test_from_entries_and_push() {
        // 测试场景：外部构建 + 追加样本
        let mut corpus = CalibrationCorpus::from_entries([
            ("https://example.com", Label::Benign),
            ("http://10.0.0.1/login", Label::Suspicious),
        ]);
        corpus.push("https://another.example.org", Label::Benign);
        assert_eq!(corpus.len(), 3);
        assert_eq!(corpus.summary().benign, 2);
        assert!(!corpus.is_empty());
    }

    #[test]
    fn test_summary_display() {
        // 测试场景：概要输出包含三项计数
        let text = CalibrationCorpus::builtin_sample().summary().to_string();
        assert!(text.contains("30"));
        assert!(text.contains("15"));
    }

    #[test]
    fn test_empty_corpus_default() {
        let corpus = CalibrationCorpus::default();
        assert!(corpus.is_empty());
        assert_eq!(corpus.summary().total, 0);
    }
}
