//! 离线阈值校准
//! 批量评估语料得到混淆计数与质量比率；阈值扫描取准确率最优

use std::time::Instant;

use log::info;
use serde::Serialize;

use crate::classifier::{Label, UrlClassifier};
use crate::error::{RiskResult, UrlRiskError};
use crate::feature::UrlFeatureExtractor;
use crate::policy::{PolicyId, ScoringPolicy};

use super::sample::CalibrationCorpus;

/// 校准统计信息
/// 记录一次批量评估的混淆计数与派生比率：
/// 1. 命中/误判/放行/漏放四象限计数
/// 2. 准确率、正规放行率、可疑捕获率
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CalibrationStats {
    // ========== 评估参数 ==========
    pub policy_id: PolicyId,
    pub threshold: f64,

    // ========== 混淆计数 ==========
    /// 命中的可疑样本数
    pub true_positives: u32,
    /// 误判为可疑的正规样本数
    pub false_positives: u32,
    /// 放行的正规样本数
    pub true_negatives: u32,
    /// 漏放的可疑样本数
    pub false_negatives: u32,
}

impl CalibrationStats {
    fn new(policy_id: PolicyId, threshold: f64) -> Self {
        Self {
            policy_id,
            threshold,
            true_positives: 0,
            false_positives: 0,
            true_negatives: 0,
            false_negatives: 0,
        }
    }

    /// 按预期/实际标签更新四象限计数
    fn record(&mut self, expected: Label, got: Label) {
        match (expected, got) {
            (Label::Suspicious, Label::Suspicious) => self.true_positives += 1,
            (Label::Benign, Label::Suspicious) => self.false_positives += 1,
            (Label::Benign, Label::Benign) => self.true_negatives += 1,
            (Label::Suspicious, Label::Benign) => self.false_negatives += 1,
        }
    }

    /// 评估样本总数
    #[inline(always)]
    pub fn total(&self) -> u32 {
        self.true_positives + self.false_positives + self.true_negatives + self.false_negatives
    }

    /// 准确率 = 判定正确数 / 总数
    pub fn accuracy(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        f64::from(self.true_positives + self.true_negatives) / f64::from(total)
    }

    /// 正规放行率 = 放行数 / 正规样本数（无正规样本时记 1.0）
    pub fn benign_pass_rate(&self) -> f64 {
        let benign = self.true_negatives + self.false_positives;
        if benign == 0 {
            return 1.0;
        }
        f64::from(self.true_negatives) / f64::from(benign)
    }

    /// 可疑捕获率 = 命中数 / 可疑样本数（无可疑样本时记 1.0）
    pub fn suspicious_catch_rate(&self) -> f64 {
        let suspicious = self.true_positives + self.false_negatives;
        if suspicious == 0 {
            return 1.0;
        }
        f64::from(self.true_positives) / f64::from(suspicious)
    }

    /// 格式化输出统计信息（结构化日志）
    /// 参数：total_time - 批量评估总耗时
    pub fn print_stats(&self, total_time: std::time::Duration) {
        info!(
            "Calibration batch completed | Time: {:?} | Policy: {} | Threshold: {:.2} | Samples: {}",
            total_time,
            self.policy_id,
            self.threshold,
            self.total()
        );
        info!(
            "Confusion stats: TP {} | FP {} | TN {} | FN {}",
            self.true_positives, self.false_positives, self.true_negatives, self.false_negatives
        );
        info!(
            "Quality stats: Accuracy {:.4} | Benign pass rate {:.4} | Suspicious catch rate {:.4}",
            self.accuracy(),
            self.benign_pass_rate(),
            self.suspicious_catch_rate()
        );
    }
}

/// 阈值扫描结果
#[derive(Debug, Clone, Serialize)]
pub struct ThresholdSweep {
    pub policy_id: PolicyId,
    /// 准确率最高的候选阈值（并列取最低）
    pub best_threshold: f64,
    pub best_accuracy: f64,
    /// 逐候选阈值统计（按阈值升序）
    pub points: Vec<CalibrationStats>,
}

/// 批量评估语料（离线单写者批处理，不属于分类并发契约）
///
/// 核心逻辑：
/// 1. 构造期校验阈值（越界快速失败）
/// 2. 逐样本分类并更新四象限计数
/// 3. 结构化日志输出统计与耗时
///
/// 参数：
/// - corpus: 带标注语料（空语料快速失败）
/// - policy_id: 评估选用的策略
/// - threshold: 判定阈值，闭区间 [0,1]
/// 返回：校准统计 | 配置错误
pub fn evaluate(
    corpus: &CalibrationCorpus,
    policy_id: PolicyId,
    threshold: f64,
) -> RiskResult<CalibrationStats> {
    if corpus.is_empty() {
        return Err(UrlRiskError::EmptyCorpus);
    }
    let classifier = UrlClassifier::with_threshold(policy_id, threshold)?;

    let start = Instant::now();
    let mut stats = CalibrationStats::new(policy_id, threshold);
    for sample in corpus.samples() {
        let verdict = classifier.classify(&sample.url);
        stats.record(sample.label, verdict.label);
    }
    stats.print_stats(start.elapsed());
    Ok(stats)
}

/// 阈值扫描：在 [0,1] 上取 steps+1 个等距候选，返回准确率最优阈值
/// 语料只评分一次，扫描阶段仅做阈值比较；并列时取最低阈值
///
/// 参数：
/// - corpus: 带标注语料（空语料快速失败）
/// - policy_id: 扫描选用的策略
/// - steps: 等分步数（0 步快速失败；20 步即 0.05 粒度）
/// 返回：扫描结果 | 配置错误
pub fn sweep_thresholds(
    corpus: &CalibrationCorpus,
    policy_id: PolicyId,
    steps: usize,
) -> RiskResult<ThresholdSweep> {
    if corpus.is_empty() {
        return Err(UrlRiskError::EmptyCorpus);
    }
    if steps == 0 {
        return Err(UrlRiskError::InvalidSweepSteps(steps));
    }

    // [Stage 1] 语料一次性评分
    let policy = ScoringPolicy::get(policy_id);
    let score_start = Instant::now();
    let scored: Vec<(f64, Label)> = corpus
        .samples()
        .iter()
        .map(|sample| {
            let features = UrlFeatureExtractor::extract(&sample.url);
            (policy.score(&features).score, sample.label)
        })
        .collect();
    info!(
        "[Stage 1] Corpus scored | Time: {}ms | Policy: {} | Samples: {}",
        score_start.elapsed().as_millis(),
        policy_id,
        scored.len()
    );

    // [Stage 2] 逐候选阈值过一遍分数
    let sweep_start = Instant::now();
    let mut points = Vec::with_capacity(steps + 1);
    for i in 0..=steps {
        let threshold = i as f64 / steps as f64;
        let mut stats = CalibrationStats::new(policy_id, threshold);
        for (score, expected) in &scored {
            let got = if *score >= threshold {
                Label::Suspicious
            } else {
                Label::Benign
            };
            stats.record(*expected, got);
        }
        points.push(stats);
    }

    // 并列只在严格更优时替换，保证取最低阈值
    let mut best_threshold = points[0].threshold;
    let mut best_accuracy = points[0].accuracy();
    for point in &points[1..] {
        let accuracy = point.accuracy();
        if accuracy > best_accuracy {
            best_accuracy = accuracy;
            best_threshold = point.threshold;
        }
    }
    info!(
        "[Stage 2] Threshold sweep completed | Time: {}ms | Candidates: {} | Best threshold: {:.2} | Best accuracy: {:.4}",
        sweep_start.elapsed().as_millis(),
        points.len(),
        best_threshold,
        best_accuracy
    );

    Ok(ThresholdSweep {
        policy_id,
        best_threshold,
        best_accuracy,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_evaluate_additive_on_builtin_corpus() {
        // 测试场景：加分策略在默认阈值下对内置语料全对
        let corpus = CalibrationCorpus::builtin_sample();
        let stats = evaluate(&corpus, PolicyId::AdditiveCapped, 0.4).expect("corpus not empty");
        assert_eq!(stats.true_positives, 15);
        assert_eq!(stats.false_positives, 0);
        assert_eq!(stats.true_negatives, 15);
        assert_eq!(stats.false_negatives, 0);
        assert_eq!(stats.accuracy(), 1.0);
        assert_eq!(stats.benign_pass_rate(), 1.0);
        assert_eq!(stats.suspicious_catch_rate(), 1.0);
    }

    #[test]
    fn test_evaluate_weighted_on_builtin_corpus() {
        // 测试场景：加权策略默认阈值 0.6 偏保守，内置可疑样本全部漏放
        let corpus = CalibrationCorpus::builtin_sample();
        let stats =
            evaluate(&corpus, PolicyId::WeightedNormalized, 0.6).expect("corpus not empty");
        assert_eq!(stats.true_positives, 0);
        assert_eq!(stats.false_positives, 0);
        assert_eq!(stats.true_negatives, 15);
        assert_eq!(stats.false_negatives, 15);
        assert_eq!(stats.accuracy(), 0.5);
        assert_eq!(stats.benign_pass_rate(), 1.0);
        assert_eq!(stats.suspicious_catch_rate(), 0.0);
    }

    #[test]
    fn test_benign_pass_rate_guard() {
        // 测试场景：两策略默认阈值下正规样本放行率不低于 0.8
        let corpus = CalibrationCorpus::builtin_sample();
        for policy_id in PolicyId::ALL {
            let stats = evaluate(&corpus, policy_id, policy_id.default_threshold())
                .expect("corpus not empty");
            assert!(
                stats.benign_pass_rate() >= 0.8,
                "{}: {}",
                policy_id,
                stats.benign_pass_rate()
            );
        }
    }

    #[test]
    fn test_confusion_counts_consistent() {
        // 测试场景：四象限合计恒等于样本总数，比率有界
        let corpus = CalibrationCorpus::builtin_sample();
        for policy_id in PolicyId::ALL {
            for threshold in [0.0, 0.4, 0.6, 1.0] {
                let stats = evaluate(&corpus, policy_id, threshold).expect("corpus not empty");
                assert_eq!(stats.total(), 30);
                assert!((0.0..=1.0).contains(&stats.accuracy()));
                assert!((0.0..=1.0).contains(&stats.benign_pass_rate()));
                assert!((0.0..=1.0).contains(&stats.suspicious_catch_rate()));
            }
        }
    }

    #[test]
    fn test_sweep_finds_divergent_optima() {
        // 测试场景：0.05 粒度扫描下两策略各自找到准确率 1.0 的最优阈值
        let corpus = CalibrationCorpus::builtin_sample();

        let additive = sweep_thresholds(&corpus, PolicyId::AdditiveCapped, 20)
            .expect("corpus not empty");
        assert_eq!(additive.points.len(), 21);
        assert_eq!(additive.best_accuracy, 1.0);
        assert!(approx(additive.best_threshold, 0.35));

        let weighted = sweep_thresholds(&corpus, PolicyId::WeightedNormalized, 20)
            .expect("corpus not empty");
        assert_eq!(weighted.best_accuracy, 1.0);
        assert!(approx(weighted.best_threshold, 0.10));
    }

    #[test]
    fn test_sweep_tie_prefers_lowest_threshold() {
        // 测试场景：并列准确率时取最低候选阈值
        let corpus = CalibrationCorpus::from_entries([
            ("https://www.google.com", Label::Benign),
            ("http://192.168.1.1/bank-login", Label::Suspicious),
        ]);
        // 加分策略下分数为 0.0 与 1.0，0.1 起所有候选并列全对
        let sweep = sweep_thresholds(&corpus, PolicyId::AdditiveCapped, 10)
            .expect("corpus not empty");
        assert_eq!(sweep.best_accuracy, 1.0);
        assert!(approx(sweep.best_threshold, 0.1));
    }

    #[test]
    fn test_empty_corpus_fails_fast() {
        // 测试场景：空语料在评估与扫描两条路径都快速失败
        let empty = CalibrationCorpus::default();
        assert!(matches!(
            evaluate(&empty, PolicyId::AdditiveCapped, 0.4),
            Err(UrlRiskError::EmptyCorpus)
        ));
        assert!(matches!(
            sweep_thresholds(&empty, PolicyId::AdditiveCapped, 10),
            Err(UrlRiskError::EmptyCorpus)
        ));
    }

    #[test]
    fn test_invalid_parameters_fail_fast() {
        // 测试场景：越界阈值与 0 步扫描均为配置错误
        let corpus = CalibrationCorpus::builtin_sample();
        assert!(matches!(
            evaluate(&corpus, PolicyId::AdditiveCapped, 1.5),
            Err(UrlRiskError::InvalidThreshold(_))
        ));
        assert!(matches!(
            sweep_thresholds(&corpus, PolicyId::AdditiveCapped, 0),
            Err(UrlRiskError::InvalidSweepSteps(0))
        ));
    }
}
