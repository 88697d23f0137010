/// 能力探测结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capability {
    /// 资源总长度（字节），来自 Content-Length
    pub total_size: u64,
    /// 服务器是否声明支持 Range 请求（Accept-Ranges）
    pub range_supported: bool,
}
