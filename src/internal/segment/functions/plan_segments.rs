use crate::internal::segment::structs::{PlanError, Segment};

/// 把长度为 `size` 的资源切成 `n` 个连续、不重叠的闭区间分段，覆盖 `[0, size-1]`。
///
/// 前 `n-1` 段长度均为 `size / n`，最后一段吸收余数，最多比其他段长 `n-1` 字节。
/// 纯函数，无 I/O，同样的输入总得到同样的输出。
pub fn plan_segments(size: u64, n: usize) -> Result<Vec<Segment>, PlanError> {
    if n == 0 {
        return Err(PlanError::ZeroSegments);
    }
    if size == 0 {
        return Err(PlanError::EmptyResource);
    }
    let count = n as u64;
    if size < count {
        return Err(PlanError::TooManySegments { size, segments: n });
    }

    let base = size / count;
    let mut segments = Vec::with_capacity(n);
    let mut start = 0u64;

    for i in 0..n {
        let end = if i + 1 < n { start + base - 1 } else { size - 1 };
        segments.push(Segment::new(start, end));
        start = end + 1;
    }

    Ok(segments)
}
