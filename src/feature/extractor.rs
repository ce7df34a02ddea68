//! URL 特征提取器
//! 单趟字符扫描 + 一次性小写 + 预编译 IPv4 正则；对任意输入永不失败

use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::FeatureVector;

/// 可疑关键词表（固定、不可变）
/// 按小写包含匹配计数，每个关键词最多计 1 次（重复出现不累加）
static SUSPICIOUS_KEYWORDS: [&str; 10] = [
    "secure", "account", "update", "confirm", "login", "signin", "bank", "paypal", "ebay",
    "amazon",
];

/// 预编译 IPv4 点分四段模式（全局复用，仅编译一次）
/// 刻意宽松：不校验八位组取值范围（999.999.999.999 同样命中），
/// 路径中形如 /1.2.3.4 的版本串也会命中，已知误报来源
static IPV4_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b").unwrap());

/// URL 特征提取器
pub struct UrlFeatureExtractor;

impl UrlFeatureExtractor {
    /// 提取特征向量（纯函数，线程安全）
    ///
    /// 核心职责：
    /// 1. 单趟字符扫描统计长度与 9 类字符计数
    /// 2. 一次性 ASCII 小写后做关键词包含计数
    /// 3. IPv4 模式检测与 https:// 字面前缀检测
    /// 4. 主机名解析（失败降级为保守默认值，不报错）
    ///
    /// 参数：url - 任意输入字符串（无长度/编码前置条件）
    /// 返回：15 项特征恒在的特征向量
    pub fn extract(url: &str) -> FeatureVector {
        let mut url_length: u32 = 0;
        let mut num_dots: u32 = 0;
        let mut num_hyphens: u32 = 0;
        let mut num_underscores: u32 = 0;
        let mut num_slashes: u32 = 0;
        let mut num_question_marks: u32 = 0;
        let mut num_equal_signs: u32 = 0;
        let mut num_at_symbols: u32 = 0;
        let mut num_ampersands: u32 = 0;
        let mut num_exclamation: u32 = 0;

        for ch in url.chars() {
            url_length += 1;
            match ch {
                '.' => num_dots += 1,
                '-' => num_hyphens += 1,
                '_' => num_underscores += 1,
                '/' => num_slashes += 1,
                '?' => num_question_marks += 1,
                '=' => num_equal_signs += 1,
                '@' => num_at_symbols += 1,
                '&' => num_ampersands += 1,
                '!' => num_exclamation += 1,
                _ => {}
            }
        }

        let lowered = safe_lowercase(url);
        let suspicious_keyword_count = SUSPICIOUS_KEYWORDS
            .iter()
            .filter(|kw| lowered.contains(*kw))
            .count() as u32;

        let has_ip = IPV4_RE.is_match(url);
        // 字面前缀判断，大小写敏感
        let has_https = url.starts_with("https://");

        let (domain_length, num_subdomains) = Self::host_shape(url);

        let vector = FeatureVector {
            url_length,
            num_dots,
            num_hyphens,
            num_underscores,
            num_slashes,
            num_question_marks,
            num_equal_signs,
            num_at_symbols,
            num_ampersands,
            num_exclamation,
            suspicious_keyword_count,
            has_ip,
            has_https,
            domain_length,
            num_subdomains,
            lowered,
        };
        debug!("[提取完成] {} | 输入长度: {}", vector, url.len());
        vector
    }

    /// 解析主机名形态（域名长度 + 子域数量）
    /// 解析失败或无主机时双双降级为 0（畸形输入是数据情形，不是错误）
    fn host_shape(url: &str) -> (u32, u32) {
        match Url::parse(url) {
            Ok(parsed) => match parsed.host_str() {
                Some(host) => {
                    let domain_length = host.chars().count() as u32;
                    // 子域数量 = 点分段数 - 2（注册域 + 顶级域），下限 0
                    let labels = host.split('.').count() as u32;
                    (domain_length, labels.saturating_sub(2))
                }
                None => (0, 0),
            },
            Err(e) => {
                warn!("[提取降级] 主机解析失败，按无主机处理 | 原因: {}", e);
                (0, 0)
            }
        }
    }
}

/// 安全转小写，仅转换ASCII字符
#[inline(always)]
fn safe_lowercase(s: &str) -> String {
    s.chars().map(|c| c.to_ascii_lowercase()).collect()
}
