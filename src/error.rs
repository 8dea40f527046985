//! 错误类型

use std::io;
use std::path::PathBuf;

/// 图标生成过程中可能出现的错误
#[derive(Debug, thiserror::Error)]
pub enum IconError {
    /// 尺寸不合法（<= 0，或超出 PNG 数据块长度字段的范围）
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimension { width: i64, height: i64 },

    /// 写入输出文件失败
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// 内部不变量被破坏（程序缺陷，不可恢复）
    #[error("encoding invariant violated: {0}")]
    EncodingInvariant(String),

    /// 配置本身不合法
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl IconError {
    pub fn invalid_dimension(width: i64, height: i64) -> Self {
        IconError::InvalidDimension { width, height }
    }

    /// 是否为致命错误（整个批次应当失败）
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            IconError::EncodingInvariant(_) | IconError::InvalidConfig(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, IconError>;
