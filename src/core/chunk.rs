//! PNG 数据块封装：长度 + 类型 + 数据 + CRC

use super::checksum::Crc32;
use crate::error::{IconError, Result};

/// 数据块类型（4 个 ASCII 字母）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkTag([u8; 4]);

impl ChunkTag {
    pub const IHDR: ChunkTag = ChunkTag(*b"IHDR");
    pub const IDAT: ChunkTag = ChunkTag(*b"IDAT");
    pub const IEND: ChunkTag = ChunkTag(*b"IEND");

    /// 只接受 ASCII 字母
    pub fn new(tag: [u8; 4]) -> Option<Self> {
        tag.iter()
            .all(|b| b.is_ascii_alphabetic())
            .then_some(ChunkTag(tag))
    }

    pub fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl std::fmt::Display for ChunkTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", String::from_utf8_lossy(&self.0))
    }
}

/// 长度(4) + 类型(4) + CRC(4)
pub const CHUNK_OVERHEAD: usize = 12;

/// 把数据封装成一个完整的数据块
pub fn frame_chunk(tag: ChunkTag, payload: &[u8]) -> Result<Vec<u8>> {
    let length = u32::try_from(payload.len()).map_err(|_| {
        IconError::EncodingInvariant(format!(
            "{} payload of {} bytes exceeds chunk length field",
            tag,
            payload.len()
        ))
    })?;

    // CRC 覆盖类型 + 数据，不含长度
    let mut crc = Crc32::new();
    crc.update(tag.as_bytes());
    crc.update(payload);

    let mut out = Vec::with_capacity(payload.len() + CHUNK_OVERHEAD);
    out.extend_from_slice(&length.to_be_bytes());
    out.extend_from_slice(tag.as_bytes());
    out.extend_from_slice(payload);
    out.extend_from_slice(&crc.finalize().to_be_bytes());
    Ok(out)
}
