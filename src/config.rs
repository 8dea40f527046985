//! 图标生成配置（编译期固定）

use crate::error::{IconError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 输出的图标尺寸
pub const ICON_SIZES: [i64; 4] = [16, 32, 48, 128];

/// 额外复制一份的默认尺寸
pub const DEFAULT_ICON_SIZE: i64 = 128;

/// 产品名，用作默认尺寸副本的文件名
pub const PRODUCT_NAME: &str = "orbit";

pub const OUTPUT_DIR: &str = "icons";

const EXTENSION: &str = "png";

/// 图标生成配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconConfig {
    pub output_dir: PathBuf,
    pub sizes: Vec<i64>,
    pub default_size: i64,
    pub product_name: String,
    /// 是否并行处理各尺寸
    pub parallel: bool,
    /// zlib 压缩级别 0-9
    pub compression_level: u32,
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(OUTPUT_DIR),
            sizes: ICON_SIZES.to_vec(),
            default_size: DEFAULT_ICON_SIZE,
            product_name: PRODUCT_NAME.to_string(),
            parallel: true,
            compression_level: 9,
        }
    }
}

impl IconConfig {
    /// 按尺寸命名的输出文件
    pub fn file_name_for(&self, size: i64) -> String {
        format!("icon{}.{}", size, EXTENSION)
    }

    /// 默认尺寸副本的文件名
    pub fn alias_file_name(&self) -> String {
        format!("{}.{}", self.product_name, EXTENSION)
    }

    /// 校验配置本身（不校验单个尺寸是否合法，那是逐尺寸的错误）
    pub fn validate(&self) -> Result<()> {
        if self.sizes.is_empty() {
            return Err(IconError::InvalidConfig("no icon sizes configured".into()));
        }
        if !self.sizes.contains(&self.default_size) {
            return Err(IconError::InvalidConfig(format!(
                "default size {} is not in {:?}",
                self.default_size, self.sizes
            )));
        }
        if self.product_name.trim().is_empty() {
            return Err(IconError::InvalidConfig("product name is empty".into()));
        }
        if self.alias_file_name() == self.file_name_for(self.default_size)
            || self.sizes.iter().any(|&s| self.file_name_for(s) == self.alias_file_name())
        {
            return Err(IconError::InvalidConfig(format!(
                "alias {} collides with a size-keyed file",
                self.alias_file_name()
            )));
        }
        Ok(())
    }
}
