//! 校准语料与离线评估组件
//! 带标注样本集 + 批量评估/阈值扫描（只在离线路径使用）

pub mod calibration;
pub mod sample;

pub use calibration::{CalibrationStats, ThresholdSweep, evaluate, sweep_thresholds};
pub use sample::{CalibrationCorpus, CorpusSummary, LabeledUrl};
