//! 下载器领域模块：由下载请求创建下载器，探测、切分、并发拉取分段后按序合并。
//!
//! 使用方式：`request.build_downloader().max_concurrent(4).send().await`
//! 对外导出以 [`crate::downloader`] 与 [`crate::request`] 为准，此处仅做模块划分。

pub mod structs;
