use thiserror::Error;

/// 分段规划错误，均属于调用方违约，直接失败不做兜底。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("分段数必须大于 0")]
    ZeroSegments,

    #[error("资源长度为 0，无法按范围切分")]
    EmptyResource,

    #[error("资源长度 {size} 小于分段数 {segments}")]
    TooManySegments { size: u64, segments: usize },
}
