//! 规则触发条件（数据驱动）
//! 策略表中的每条规则由一个触发条件描述，求值产物为触发比例 [0,1]

use crate::feature::{Feature, FeatureVector};

/// 触发条件
/// fraction() 返回 0.0（未触发）或 (0,1] 的触发比例，
/// 乘以规则权重即为该规则对原始分的贡献
#[derive(Debug, Clone, Copy)]
pub enum Trigger {
    /// 数值特征严格大于阈值
    FeatureAbove(Feature, f64),
    /// 布尔特征为真
    FlagSet(Feature),
    /// 布尔特征为假
    FlagClear(Feature),
    /// 特殊字符合计（点+连字符+下划线+@）严格大于上限
    SpecialCharsAbove(u32),
    /// 关键词计数达到下限（达到即全额触发）
    KeywordAtLeast(u32),
    /// 关键词按 min(count/divisor, 1) 的比例触发
    KeywordScaled {
        divisor: f64,
    },
    /// 小写文本含品牌词但不含官方域
    BrandOffDomain {
        brand: &'static str,
        official: &'static str,
    },
    /// 小写文本同时包含两个关键词
    KeywordPair(&'static str, &'static str),
    /// 数值特征落在闭区间之外（严格小于 min 或严格大于 max）
    OutsideRange {
        feature: Feature,
        min: f64,
        max: f64,
    },
}

impl Trigger {
    /// 求触发比例（核心求值逻辑）
    /// 参数：features - 待评估的特征向量
    /// 返回：0.0 未触发；全额触发 1.0；KeywordScaled 为部分比例
    #[inline(always)]
    pub fn fraction(&self, features: &FeatureVector) -> f64 {
        match self {
            Trigger::FeatureAbove(feature, limit) => full(features.get(*feature) > *limit),
            Trigger::FlagSet(feature) => full(features.get(*feature) > 0.0),
            Trigger::FlagClear(feature) => full(features.get(*feature) == 0.0),
            Trigger::SpecialCharsAbove(limit) => full(features.special_char_sum() > *limit),
            Trigger::KeywordAtLeast(min) => full(features.suspicious_keyword_count >= *min),
            Trigger::KeywordScaled { divisor } => {
                if features.suspicious_keyword_count == 0 {
                    0.0
                } else {
                    (f64::from(features.suspicious_keyword_count) / divisor).min(1.0)
                }
            }
            Trigger::BrandOffDomain { brand, official } => {
                let text = features.lowered_url();
                full(text.contains(brand) && !text.contains(official))
            }
            Trigger::KeywordPair(first, second) => {
                let text = features.lowered_url();
                full(text.contains(first) && text.contains(second))
            }
            Trigger::OutsideRange { feature, min, max } => {
                let value = features.get(*feature);
                full(value < *min || value > *max)
            }
        }
    }

    /// 描述触发条件（用于日志/调试输出）
    pub fn describe(&self) -> String {
        match self {
            Trigger::FeatureAbove(feature, limit) => format!("{} > {}", feature, limit),
            Trigger::FlagSet(feature) => format!("{} = 1", feature),
            Trigger::FlagClear(feature) => format!("{} = 0", feature),
            Trigger::SpecialCharsAbove(limit) => format!("special_chars > {}", limit),
            Trigger::KeywordAtLeast(min) => format!("keywords >= {}", min),
            Trigger::KeywordScaled { divisor } => format!("keywords / {} (cap 1)", divisor),
            Trigger::BrandOffDomain { brand, official } => {
                format!("contains '{}' without '{}'", brand, official)
            }
            Trigger::KeywordPair(first, second) => format!("contains '{}' and '{}'", first, second),
            Trigger::OutsideRange { feature, min, max } => {
                format!("{} outside [{}, {}]", feature, min, max)
            }
        }
    }
}

#[inline(always)]
fn full(hit: bool) -> f64 {
    if hit { 1.0 } else { 0.0 }
}
