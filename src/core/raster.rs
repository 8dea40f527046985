//! 超采样光栅化：按图层统计覆盖率，再按顺序做 alpha 合成

use super::encoder::validate_dimensions;
use super::pixel::PixelBuffer;
use super::shape::{Footprint, Rgb, Shape, BADGE_LAYERS, LAYER_COUNT};
use crate::error::Result;
use tracing::debug;

/// 每个像素在每个方向上的采样数（4x4 = 16 个采样点）
pub const SUBSAMPLES: u32 = 4;

/// 单个像素上每个图层的命中数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayerCoverage {
    hits: [u32; LAYER_COUNT],
    samples: u32,
}

impl LayerCoverage {
    pub fn hits(&self, layer: usize) -> u32 {
        self.hits[layer]
    }

    /// 覆盖率 = 命中数 / 采样数，范围 [0, 1]
    pub fn fraction(&self, layer: usize) -> f32 {
        self.hits[layer] as f32 / self.samples as f32
    }

    pub fn background(&self) -> f32 {
        self.fraction(0)
    }
}

/// 某个尺寸下已换算为像素单位的图层
#[derive(Debug, Clone)]
pub struct BadgeLayout {
    footprints: [Footprint; LAYER_COUNT],
    colors: [Rgb; LAYER_COUNT],
    subsamples: u32,
}

impl BadgeLayout {
    pub fn new(layers: &[Shape; LAYER_COUNT], size: u32, subsamples: u32) -> Self {
        Self {
            footprints: std::array::from_fn(|i| layers[i].resolve(size)),
            colors: std::array::from_fn(|i| layers[i].color),
            subsamples: subsamples.max(1),
        }
    }

    /// 默认徽标在指定尺寸下的布局
    pub fn for_size(size: u32) -> Self {
        Self::new(&BADGE_LAYERS, size, SUBSAMPLES)
    }

    pub fn footprint(&self, layer: usize) -> &Footprint {
        &self.footprints[layer]
    }

    fn samples(&self) -> u32 {
        self.subsamples * self.subsamples
    }

    /// 像素 (x, y) 内落在某个图层里的采样点数
    fn layer_hits(&self, layer: usize, x: u32, y: u32) -> u32 {
        let footprint = &self.footprints[layer];
        if footprint.is_empty() {
            return 0;
        }

        let m = self.subsamples;
        let step = 1.0 / m as f32;
        let mut hits = 0;
        for sy in 0..m {
            let py = y as f32 + (sy as f32 + 0.5) * step;
            for sx in 0..m {
                let px = x as f32 + (sx as f32 + 0.5) * step;
                if footprint.contains(px, py) {
                    hits += 1;
                }
            }
        }
        hits
    }

    /// 所有图层的覆盖率
    pub fn coverage(&self, x: u32, y: u32) -> LayerCoverage {
        let mut hits = [0u32; LAYER_COUNT];
        for (layer, h) in hits.iter_mut().enumerate() {
            *h = self.layer_hits(layer, x, y);
        }
        LayerCoverage {
            hits,
            samples: self.samples(),
        }
    }

    /// 计算单个像素的 RGBA
    pub fn shade(&self, x: u32, y: u32) -> [u8; 4] {
        // 背景未覆盖的像素完全透明，其余图层不参与
        let bg_hits = self.layer_hits(0, x, y);
        if bg_hits == 0 {
            return [0, 0, 0, 0];
        }

        let samples = self.samples() as f32;
        let alpha = bg_hits as f32 / samples * 255.0;

        let rgb = (1..LAYER_COUNT).fold(self.colors[0].to_f32(), |acc, layer| {
            let coverage = self.layer_hits(layer, x, y) as f32 / samples;
            blend(acc, self.colors[layer], coverage)
        });

        [
            to_channel(rgb[0]),
            to_channel(rgb[1]),
            to_channel(rgb[2]),
            to_channel(alpha),
        ]
    }
}

/// 按覆盖率把当前颜色线性插值到图层颜色
fn blend(current: [f32; 3], color: Rgb, coverage: f32) -> [f32; 3] {
    if coverage <= 0.0 {
        return current;
    }
    let target = color.to_f32();
    [
        current[0] + (target[0] - current[0]) * coverage,
        current[1] + (target[1] - current[1]) * coverage,
        current[2] + (target[2] - current[2]) * coverage,
    ]
}

#[inline]
fn to_channel(v: f32) -> u8 {
    v.round().clamp(0.0, 255.0) as u8
}

/// 徽标渲染器
#[derive(Debug, Clone)]
pub struct BadgeRenderer {
    layers: [Shape; LAYER_COUNT],
    subsamples: u32,
}

impl BadgeRenderer {
    pub fn new(layers: [Shape; LAYER_COUNT], subsamples: u32) -> Self {
        Self { layers, subsamples }
    }

    /// 渲染 size x size 的徽标
    pub fn render(&self, size: i64) -> Result<PixelBuffer> {
        let (side, _) = validate_dimensions(size, size)?;
        let layout = BadgeLayout::new(&self.layers, side, self.subsamples);

        let mut buf = PixelBuffer::new(side, side);
        for y in 0..side {
            for x in 0..side {
                buf.put_pixel(x, y, layout.shade(x, y))?;
            }
        }

        debug!("渲染完成: {}x{}", side, side);
        Ok(buf)
    }
}

impl Default for BadgeRenderer {
    fn default() -> Self {
        Self::new(BADGE_LAYERS, SUBSAMPLES)
    }
}
