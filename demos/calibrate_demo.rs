//! Offline threshold calibration demonstration for rsurlrisk
//! rsurlrisk 离线阈值校准演示程序
//! 功能说明：
//! 1. 演示内置校准语料的构成概要
//! 2. 对两套策略在默认阈值下做批量评估（混淆计数 + 质量比率）
//! 3. 以 0.05 粒度扫描阈值并输出各策略的准确率最优点
//!
//! 运行命令：
//! cargo run --example calibrate_demo

use std::error::Error;

use env_logger::{Builder, Env, Target};
use rsurlrisk::{CalibrationCorpus, PolicyId, evaluate, sweep_thresholds};

/// 离线阈值校准演示主函数
/// 执行流程：
/// 1. 初始化结构化日志系统
/// 2. 加载内置语料并输出概要
/// 3. 双策略默认阈值批量评估
/// 4. 双策略阈值扫描并输出最优点对比
fn main() -> Result<(), Box<dyn Error>> {
    // ========== 1. 日志系统初始化 ==========
    Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Stdout)
        .init();

    // ========== 2. 加载内置语料 ==========
    let corpus = CalibrationCorpus::builtin_sample();
    println!("✅ 语料加载完成 | {}", corpus.summary());

    // ========== 3. 默认阈值批量评估 ==========
    println!("\n================================== 默认阈值评估 ==================================");
    for policy_id in PolicyId::ALL {
        let stats = evaluate(&corpus, policy_id, policy_id.default_threshold())?;
        println!(
            "{:<20} | 阈值 {:.2} | 准确率 {:.4} | 正规放行率 {:.4} | 可疑捕获率 {:.4}",
            policy_id.as_str(),
            stats.threshold,
            stats.accuracy(),
            stats.benign_pass_rate(),
            stats.suspicious_catch_rate()
        );
    }

    // ========== 4. 阈值扫描（0.05 粒度） ==========
    println!("\n==================================== 阈值扫描 ====================================");
    for policy_id in PolicyId::ALL {
        let sweep = sweep_thresholds(&corpus, policy_id, 20)?;
        println!(
            "{:<20} | 候选 {} 个 | 最优阈值 {:.2} | 最优准确率 {:.4}",
            policy_id.as_str(),
            sweep.points.len(),
            sweep.best_threshold,
            sweep.best_accuracy
        );
    }
    println!("==================================================================================");

    Ok(())
}
