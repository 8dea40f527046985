//! 图标生成流水线：渲染 -> 编码 -> 写入，外加默认尺寸的副本

use super::checksum::CRC_TABLE;
use super::encoder::PngEncoder;
use super::raster::BadgeRenderer;
use crate::config::IconConfig;
use crate::error::{IconError, Result};
use crate::storage::Storage;
use once_cell::sync::Lazy;
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};

/// 成功写入的图标
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenIcon {
    pub size: i64,
    pub path: PathBuf,
    /// 默认尺寸额外写入的副本
    pub alias: Option<PathBuf>,
    pub bytes: usize,
}

/// 单个尺寸的失败
#[derive(Debug)]
pub struct SizeFailure {
    pub size: i64,
    pub error: IconError,
}

/// 批次报告
#[derive(Debug, Default)]
pub struct BatchReport {
    pub written: Vec<WrittenIcon>,
    pub failures: Vec<SizeFailure>,
    pub duration: Duration,
}

impl BatchReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// 图标生成流水线
pub struct IconPipeline {
    config: IconConfig,
    renderer: BadgeRenderer,
    encoder: PngEncoder,
    storage: Arc<dyn Storage>,
}

impl IconPipeline {
    pub fn new(config: IconConfig, storage: Arc<dyn Storage>) -> Self {
        let encoder = PngEncoder::new(config.compression_level);
        Self {
            config,
            renderer: BadgeRenderer::default(),
            encoder,
            storage,
        }
    }

    pub fn with_renderer(mut self, renderer: BadgeRenderer) -> Self {
        self.renderer = renderer;
        self
    }

    pub fn config(&self) -> &IconConfig {
        &self.config
    }

    /// 渲染并编码单个尺寸，不写盘
    pub fn render_size(&self, size: i64) -> Result<Vec<u8>> {
        let buf = self.renderer.render(size)?;
        self.encoder.encode(&buf)
    }

    /// 生成所有配置的尺寸。单个尺寸的失败记录在报告里，不影响其他尺寸；
    /// 内部不变量被破坏时返回 Err。
    pub fn run(&self) -> Result<BatchReport> {
        self.config.validate()?;

        // 并行开始前先构建好校验表
        Lazy::force(&CRC_TABLE);

        let start = Instant::now();
        info!(
            "开始生成图标: sizes={:?}, 输出到 {}",
            self.config.sizes,
            self.storage.name()
        );

        let results: Vec<(i64, Result<WrittenIcon>)> = if self.config.parallel {
            self.config
                .sizes
                .par_iter()
                .map(|&size| (size, self.process_size(size)))
                .collect()
        } else {
            self.config
                .sizes
                .iter()
                .map(|&size| (size, self.process_size(size)))
                .collect()
        };

        let mut report = BatchReport::default();
        let mut fatal = None;
        for (size, result) in results {
            match result {
                Ok(icon) => report.written.push(icon),
                Err(e) if e.is_fatal() => {
                    error!("尺寸 {} 出现内部错误: {}", size, e);
                    fatal.get_or_insert(e);
                }
                Err(e) => {
                    warn!("尺寸 {} 生成失败: {}", size, e);
                    report.failures.push(SizeFailure { size, error: e });
                }
            }
        }

        if let Some(e) = fatal {
            return Err(e);
        }

        report.duration = start.elapsed();
        info!(
            "图标生成完成: {} 个成功, {} 个失败, 耗时 {:?}",
            report.written.len(),
            report.failures.len(),
            report.duration
        );

        Ok(report)
    }

    fn process_size(&self, size: i64) -> Result<WrittenIcon> {
        let bytes = self.render_size(size)?;

        let path = self.write(&self.config.file_name_for(size), &bytes)?;
        info!("已写入 {:?} ({} 字节)", path, bytes.len());

        let alias = if size == self.config.default_size {
            let alias = self.write(&self.config.alias_file_name(), &bytes)?;
            debug!("默认尺寸副本: {:?}", alias);
            Some(alias)
        } else {
            None
        };

        Ok(WrittenIcon {
            size,
            path,
            alias,
            bytes: bytes.len(),
        })
    }

    fn write(&self, name: &str, data: &[u8]) -> Result<PathBuf> {
        self.storage.write(name, data).map_err(|source| IconError::Io {
            path: self.storage.resolve(name),
            source,
        })
    }
}
