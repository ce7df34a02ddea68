//! 特征向量结构与特征键定义
//! 固定键集的 URL 结构/词法特征，所有取值非负且有限

use rustc_hash::FxHashMap;
use serde::Serialize;

/// 特征键（固定枚举集，15 项）
/// as_str() 返回对外稳定的特征名，作为映射视图的键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    UrlLength,
    NumDots,
    NumHyphens,
    NumUnderscores,
    NumSlashes,
    NumQuestionMarks,
    NumEqualSigns,
    NumAtSymbols,
    NumAmpersands,
    NumExclamation,
    SuspiciousKeywordCount,
    HasIp,
    HasHttps,
    DomainLength,
    NumSubdomains,
}

impl Feature {
    /// 全部特征键（顺序与特征表一致）
    pub const ALL: [Feature; 15] = [
        Feature::UrlLength,
        Feature::NumDots,
        Feature::NumHyphens,
        Feature::NumUnderscores,
        Feature::NumSlashes,
        Feature::NumQuestionMarks,
        Feature::NumEqualSigns,
        Feature::NumAtSymbols,
        Feature::NumAmpersands,
        Feature::NumExclamation,
        Feature::SuspiciousKeywordCount,
        Feature::HasIp,
        Feature::HasHttps,
        Feature::DomainLength,
        Feature::NumSubdomains,
    ];

    /// 稳定特征名
    #[inline(always)]
    pub fn as_str(&self) -> &'static str {
        match self {
            Feature::UrlLength => "url_length",
            Feature::NumDots => "num_dots",
            Feature::NumHyphens => "num_hyphens",
            Feature::NumUnderscores => "num_underscores",
            Feature::NumSlashes => "num_slashes",
            Feature::NumQuestionMarks => "num_question_marks",
            Feature::NumEqualSigns => "num_equal_signs",
            Feature::NumAtSymbols => "num_at_symbols",
            Feature::NumAmpersands => "num_ampersands",
            Feature::NumExclamation => "num_exclamation",
            Feature::SuspiciousKeywordCount => "suspicious_keyword_count",
            Feature::HasIp => "has_ip",
            Feature::HasHttps => "has_https",
            Feature::DomainLength => "domain_length",
            Feature::NumSubdomains => "num_subdomains",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 特征向量
/// 由 UrlFeatureExtractor 一次性构建，之后不可变。
/// 同时保留推导自的小写 URL 文本（供文本型规则使用，不参与序列化）。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeatureVector {
    pub url_length: u32,
    pub num_dots: u32,
    pub num_hyphens: u32,
    pub num_underscores: u32,
    pub num_slashes: u32,
    pub num_question_marks: u32,
    pub num_equal_signs: u32,
    pub num_at_symbols: u32,
    pub num_ampersands: u32,
    pub num_exclamation: u32,
    pub suspicious_keyword_count: u32,
    pub has_ip: bool,
    pub has_https: bool,
    pub domain_length: u32,
    pub num_subdomains: u32,

    #[serde(skip)]
    pub(crate) lowered: String,
}

impl FeatureVector {
    /// 数值视图：任意特征键 → f64（布尔特征映射为 0/1）
    #[inline(always)]
    pub fn get(&self, feature: Feature) -> f64 {
        match feature {
            Feature::UrlLength => f64::from(self.url_length),
            Feature::NumDots => f64::from(self.num_dots),
            Feature::NumHyphens => f64::from(self.num_hyphens),
            Feature::NumUnderscores => f64::from(self.num_underscores),
            Feature::NumSlashes => f64::from(self.num_slashes),
            Feature::NumQuestionMarks => f64::from(self.num_question_marks),
            Feature::NumEqualSigns => f64::from(self.num_equal_signs),
            Feature::NumAtSymbols => f64::from(self.num_at_symbols),
            Feature::NumAmpersands => f64::from(self.num_ampersands),
            Feature::NumExclamation => f64::from(self.num_exclamation),
            Feature::SuspiciousKeywordCount => f64::from(self.suspicious_keyword_count),
            Feature::HasIp => f64::from(u8::from(self.has_ip)),
            Feature::HasHttps => f64::from(u8::from(self.has_https)),
            Feature::DomainLength => f64::from(self.domain_length),
            Feature::NumSubdomains => f64::from(self.num_subdomains),
        }
    }

    /// 映射视图：特征名 → 数值（15 项恒在）
    pub fn to_map(&self) -> FxHashMap<&'static str, f64> {
        let mut map = FxHashMap::default();
        for feature in Feature::ALL {
            map.insert(feature.as_str(), self.get(feature));
        }
        map
    }

    /// 特殊字符合计（点 + 连字符 + 下划线 + @）
    #[inline(always)]
    pub fn special_char_sum(&self) -> u32 {
        self.num_dots + self.num_hyphens + self.num_underscores + self.num_at_symbols
    }

    /// 推导此向量的小写 URL 文本
    #[inline(always)]
    pub(crate) fn lowered_url(&self) -> &str {
        &self.lowered
    }
}

impl std::fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "len={} special={} kw={} ip={} https={} host_len={} subs={}",
            self.url_length,
            self.special_char_sum(),
            self.suspicious_keyword_count,
            u8::from(self.has_ip),
            u8::from(self.has_https),
            self.domain_length,
            self.num_subdomains,
        )
    }
}
