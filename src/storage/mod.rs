pub mod local;

use std::io;
use std::path::PathBuf;

pub use local::LocalStorage;

/// 输出存储接口
pub trait Storage: Send + Sync {
    /// 写入整个文件（覆盖已有内容），返回最终路径
    fn write(&self, name: &str, data: &[u8]) -> io::Result<PathBuf>;

    /// 文件的完整路径（用于日志和错误信息）
    fn resolve(&self, name: &str) -> PathBuf;

    /// 获取存储名称（用于日志）
    fn name(&self) -> &str;
}
