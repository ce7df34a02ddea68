//! URL risk classification demonstration for rsurlrisk
//! rsurlrisk URL 风险分类演示程序
//! 功能说明：
//! 1. 演示两套评分策略对同一批 URL 的判定差异
//! 2. 展示完整分类流程（特征提取 → 策略求值 → 阈值判定）
//! 3. 包含性能耗时统计与结构化JSON结果输出
//!
//! 运行命令：
//! cargo run --example classify_demo

use std::error::Error;
use std::time::Instant;

use env_logger::{Builder, Env, Target};
use rsurlrisk::{PolicyId, UrlClassifier};
use serde_json::to_string_pretty;

/// URL 风险分类演示主函数
/// 执行流程：
/// 1. 初始化结构化日志系统
/// 2. 构建两套策略的分类器
/// 3. 逐 URL 输出双策略判定（含性能统计）
/// 4. 对代表性样本输出完整明细报告
fn main() -> Result<(), Box<dyn Error>> {
    // ========== 1. 日志系统初始化 ==========
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .init();

    // ========== 2. 构建分类器（策略默认阈值） ==========
    let additive = UrlClassifier::new(PolicyId::AdditiveCapped);
    let weighted = UrlClassifier::new(PolicyId::WeightedNormalized);
    println!(
        "✅ 分类器初始化完成 | {} (阈值 {:.2}) | {} (阈值 {:.2})",
        additive.policy_id(),
        additive.threshold(),
        weighted.policy_id(),
        weighted.threshold()
    );

    // ========== 3. 双策略批量判定 ==========
    let sample_urls = [
        "https://www.google.com",
        "https://www.amazon.com",
        "http://192.168.1.1/bank-login",
        "https://secure-paypal-update.com/login",
        "http://bank-account-update.fake-site.org",
        "not a url",
    ];

    let start_instant = Instant::now();
    println!("\n==================================== 判定结果 ====================================");
    for url in sample_urls {
        let a = additive.classify(url);
        let w = weighted.classify(url);
        println!(
            "{:<45} | {}: {:.4} {} | {}: {:.4} {}",
            url,
            a.policy_id,
            a.score,
            a.label,
            w.policy_id,
            w.score,
            w.label
        );
    }
    let batch_duration_ms = start_instant.elapsed().as_secs_f64() * 1000.0;
    println!("==================================================================================");
    println!("✅ 批量判定完成 | URL 数: {} | 总耗时: {:.3} 毫秒", sample_urls.len(), batch_duration_ms);

    // ========== 4. 代表性样本的完整明细报告 ==========
    let report = additive.classify_detailed("https://secure-paypal-update.com/login");
    let report_json = to_string_pretty(&report)?;
    println!("\n📊 明细报告（结构化JSON）:\n{}", report_json);

    Ok(())
}
