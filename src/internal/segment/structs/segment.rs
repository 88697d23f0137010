use std::fmt;

/// 单个字节分段：起止偏移均为闭区间。
///
/// 分段在 `Vec<Segment>` 中的下标即为合并顺序，与下载完成的先后无关。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment {
    /// 起始偏移（含）
    pub start: u64,
    /// 结束偏移（含），不小于 start
    pub end: u64,
}

impl Segment {
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(end >= start, "分段结束偏移不能小于起始偏移");
        Self { start, end }
    }

    /// 分段字节数：`end - start + 1`
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// 生成 Range 请求头：`bytes=start-end`，两端均含。
    pub fn range_header(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
