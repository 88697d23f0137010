use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::RwLock;

/// 磁盘分段存储：每个分段一个临时文件。
///
/// 文件名形如 `.{name}.{job_id}.seg{index}.part`，job_id 每次下载唯一，
/// 同时跑两个下载到同一目录也不会互相覆盖。
#[derive(Debug, Clone)]
pub struct DiskSegmentStore {
    pub(crate) dir: PathBuf,
    pub(crate) prefix: String,
    /// 创建产物时持读锁，删除时取写锁
    pub(crate) create_gate: Arc<RwLock<()>>,
}

impl DiskSegmentStore {
    /// `dir` 为临时文件目录，`name` 一般取目标文件名，`job_id` 为本次下载的唯一标识。
    pub fn new(dir: impl AsRef<Path>, name: &str, job_id: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            prefix: format!(".{}.{}", name, job_id),
            create_gate: Arc::new(RwLock::new(())),
        }
    }

    /// 分段 `index` 对应的临时文件路径。
    pub fn artifact_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("{}.seg{}.part", self.prefix, index))
    }
}
