//! rsurlrisk 错误定义
//! 封装评分引擎所有配置/校准错误，基于thiserror实现类型安全处理。
//! 注意：URL 解析失败不是错误（特征提取对畸形输入降级为保守默认值）。
use thiserror::Error;

/// 引擎错误枚举
/// 仅覆盖快速失败的配置类错误；分类路径本身无失败模式
#[derive(Error, Debug)]
pub enum UrlRiskError {
    // ===================== 配置相关错误 =====================
    /// 未知策略标识（不在已注册策略表中）
    #[error("Unknown policy id: {0}")]
    UnknownPolicy(String),

    /// 阈值越界（合法区间为闭区间 [0, 1]，NaN 同样拒绝）
    #[error("Invalid threshold: {0} (expected a value in [0, 1])")]
    InvalidThreshold(f64),

    // ===================== 校准相关错误 =====================
    /// 校准语料为空（评估/阈值扫描要求至少一条带标注样本）
    #[error("Calibration corpus is empty")]
    EmptyCorpus,

    /// 阈值扫描步数非法（至少需要 1 步）
    #[error("Invalid sweep step count: {0} (expected at least 1)")]
    InvalidSweepSteps(usize),
}

/// 引擎全局Result类型别名
/// 统一使用UrlRiskError作为错误类型
pub type RiskResult<T> = Result<T, UrlRiskError>;
