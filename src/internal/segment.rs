//! 分段领域模块：分段结构体与纯函数规划器。

pub mod functions;
pub mod structs;
