//! PNG 编码：8 位 RGBA，无隔行，单个 IDAT

use super::chunk::{frame_chunk, ChunkTag};
use super::pixel::{PixelBuffer, CHANNELS};
use crate::error::{IconError, Result};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::io::Write;
use tracing::debug;

/// PNG 文件签名
pub const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// PNG 规范允许的最大宽高
pub const MAX_DIMENSION: i64 = i32::MAX as i64;

const BIT_DEPTH: u8 = 8;
/// 真彩色 + alpha
const COLOR_TYPE_RGBA: u8 = 6;
const FILTER_NONE: u8 = 0;

/// 校验宽高：必须 >= 1，且过滤后的扫描行数据能放进 32 位长度字段
pub fn validate_dimensions(width: i64, height: i64) -> Result<(u32, u32)> {
    if width <= 0 || height <= 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(IconError::invalid_dimension(width, height));
    }

    // 每行 1 字节过滤标记 + 4 字节/像素
    let raw_len = (1 + CHANNELS as u64 * width as u64).checked_mul(height as u64);
    match raw_len {
        Some(len) if len <= u32::MAX as u64 => Ok((width as u32, height as u32)),
        _ => Err(IconError::invalid_dimension(width, height)),
    }
}

/// IHDR 数据（固定 13 字节）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
}

impl ImageHeader {
    pub fn to_bytes(&self) -> [u8; 13] {
        let mut out = [0u8; 13];
        out[0..4].copy_from_slice(&self.width.to_be_bytes());
        out[4..8].copy_from_slice(&self.height.to_be_bytes());
        out[8] = BIT_DEPTH;
        out[9] = COLOR_TYPE_RGBA;
        out[10] = 0; // 压缩方法
        out[11] = 0; // 过滤方法
        out[12] = 0; // 隔行
        out
    }
}

/// PNG 编码器
#[derive(Debug, Clone, Copy)]
pub struct PngEncoder {
    level: Compression,
}

impl PngEncoder {
    /// level: 0-9，超出范围按 9 处理
    pub fn new(level: u32) -> Self {
        Self {
            level: Compression::new(level.min(9)),
        }
    }

    pub fn encode(&self, buf: &PixelBuffer) -> Result<Vec<u8>> {
        let (width, height) = validate_dimensions(buf.width() as i64, buf.height() as i64)?;

        let header = ImageHeader { width, height };
        let scanlines = filter_scanlines(buf);
        let compressed = self.compress(&scanlines)?;

        debug!(
            "编码 {}x{}: 原始 {} 字节, 压缩后 {} 字节",
            width,
            height,
            scanlines.len(),
            compressed.len()
        );

        let ihdr = frame_chunk(ChunkTag::IHDR, &header.to_bytes())?;
        let idat = frame_chunk(ChunkTag::IDAT, &compressed)?;
        let iend = frame_chunk(ChunkTag::IEND, &[])?;

        let mut out =
            Vec::with_capacity(PNG_SIGNATURE.len() + ihdr.len() + idat.len() + iend.len());
        out.extend_from_slice(&PNG_SIGNATURE);
        out.extend_from_slice(&ihdr);
        out.extend_from_slice(&idat);
        out.extend_from_slice(&iend);
        Ok(out)
    }

    fn compress(&self, data: &[u8]) -> Result<Vec<u8>> {
        let zlib_err = |e: std::io::Error| IconError::EncodingInvariant(format!("zlib stream: {}", e));

        let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len() / 2), self.level);
        encoder.write_all(data).map_err(zlib_err)?;
        encoder.finish().map_err(zlib_err)
    }
}

impl Default for PngEncoder {
    fn default() -> Self {
        Self {
            level: Compression::best(),
        }
    }
}

/// 每行前加 "无过滤" 标记
fn filter_scanlines(buf: &PixelBuffer) -> Vec<u8> {
    let mut out = Vec::with_capacity(buf.height() as usize * (buf.stride() + 1));
    for row in buf.rows() {
        out.push(FILTER_NONE);
        out.extend_from_slice(row);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::checksum::crc32;

    #[test]
    fn test_validate_dimensions() {
        assert_eq!(validate_dimensions(1, 1).unwrap(), (1, 1));
        assert_eq!(validate_dimensions(128, 64).unwrap(), (128, 64));

        for (w, h) in [(0, 1), (1, 0), (-1, 16), (16, -1)] {
            assert!(matches!(
                validate_dimensions(w, h),
                Err(IconError::InvalidDimension { .. })
            ));
        }

        // 32768 * (1 + 4 * 32768) 超过 u32::MAX
        assert!(validate_dimensions(32768, 32768).is_err());
        assert!(validate_dimensions(MAX_DIMENSION + 1, 1).is_err());
        assert!(validate_dimensions(1, MAX_DIMENSION + 1).is_err());
    }

    #[test]
    fn test_header_bytes() {
        let header = ImageHeader {
            width: 16,
            height: 0x0102_0304,
        };
        assert_eq!(
            header.to_bytes(),
            [0, 0, 0, 16, 1, 2, 3, 4, 8, 6, 0, 0, 0]
        );
    }

    #[test]
    fn test_filter_scanlines() {
        let buf = PixelBuffer::from_raw(1, 2, vec![1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
        assert_eq!(filter_scanlines(&buf), vec![0, 1, 2, 3, 4, 0, 5, 6, 7, 8]);
    }

    #[test]
    fn test_file_structure() {
        let buf = PixelBuffer::from_raw(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128]).unwrap();
        let png = PngEncoder::default().encode(&buf).unwrap();

        assert_eq!(&png[..8], &PNG_SIGNATURE);

        // IHDR
        assert_eq!(&png[8..12], &13u32.to_be_bytes());
        assert_eq!(&png[12..16], b"IHDR");
        assert_eq!(&png[16..29], &ImageHeader { width: 2, height: 1 }.to_bytes());
        assert_eq!(&png[29..33], &crc32(&png[12..29]).to_be_bytes());

        // IDAT
        let idat_len = u32::from_be_bytes([png[33], png[34], png[35], png[36]]) as usize;
        assert_eq!(&png[37..41], b"IDAT");
        let idat_end = 41 + idat_len;
        assert_eq!(
            &png[idat_end..idat_end + 4],
            &crc32(&png[37..idat_end]).to_be_bytes()
        );

        // IEND 结尾
        let tail = &png[idat_end + 4..];
        assert_eq!(tail, &[0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]);
    }

    #[test]
    fn test_idat_inflates_to_scanlines() {
        use flate2::read::ZlibDecoder;
        use std::io::Read;

        let buf = PixelBuffer::from_raw(2, 2, (0u8..16).collect()).unwrap();
        let png = PngEncoder::new(6).encode(&buf).unwrap();

        let idat_len = u32::from_be_bytes([png[33], png[34], png[35], png[36]]) as usize;
        let mut inflated = Vec::new();
        ZlibDecoder::new(&png[41..41 + idat_len])
            .read_to_end(&mut inflated)
            .unwrap();
        assert_eq!(inflated, filter_scanlines(&buf));
    }

    #[test]
    fn test_rejects_empty_buffer() {
        let buf = PixelBuffer::new(0, 0);
        assert!(matches!(
            PngEncoder::default().encode(&buf),
            Err(IconError::InvalidDimension { width: 0, height: 0 })
        ));
    }
}
