//! 分段临时产物存储：每个分段下载完成后落到这里，合并时按下标取出并删除。
//!
//! 提供磁盘与内存两种实现，均以「任务 id + 分段下标」为键，互不冲突。

pub mod impl_traits;
pub mod structs;
pub mod traits;
