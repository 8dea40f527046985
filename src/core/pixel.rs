//! RGBA8 像素缓冲区

use crate::error::{IconError, Result};

/// 每个像素的字节数
pub const CHANNELS: usize = 4;

/// 行优先的 RGBA8 像素缓冲区
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// 创建全透明缓冲区
    pub fn new(width: u32, height: u32) -> Self {
        let len = width as usize * height as usize * CHANNELS;
        Self {
            width,
            height,
            data: vec![0u8; len],
        }
    }

    /// 从现有数据构建，长度必须恰好等于 width * height * 4
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * CHANNELS;
        if data.len() != expected {
            return Err(IconError::EncodingInvariant(format!(
                "buffer of {} bytes does not match {}x{} RGBA ({} bytes)",
                data.len(),
                width,
                height,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 一行的字节数
    pub fn stride(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// 像素 (x, y) 在数据中的起始偏移，越界返回 None
    pub fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.index(x, y)?;
        let mut px = [0u8; 4];
        px.copy_from_slice(&self.data[i..i + CHANNELS]);
        Some(px)
    }

    pub(crate) fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> Result<()> {
        let i = self.index(x, y).ok_or_else(|| {
            IconError::EncodingInvariant(format!(
                "pixel ({}, {}) outside {}x{} buffer",
                x, y, self.width, self.height
            ))
        })?;
        self.data[i..i + CHANNELS].copy_from_slice(&rgba);
        Ok(())
    }

    /// 按行迭代
    pub fn rows(&self) -> std::slice::ChunksExact<'_, u8> {
        self.data.chunks_exact(self.stride().max(1))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }
}
