//! 能力探测领域模块：HEAD 请求获取资源长度与 Range 支持情况。

pub mod functions;
pub mod structs;
