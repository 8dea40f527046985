//! CRC32 校验（IEEE 802.3 / zlib 多项式）
//!
//! 查找表在首次使用时构建一次，之后只读，可被任意线程并发访问。

use once_cell::sync::Lazy;

/// 反射形式的 IEEE 多项式
const POLYNOMIAL: u32 = 0xEDB8_8320;

/// 256 项查找表
pub static CRC_TABLE: Lazy<[u32; 256]> = Lazy::new(build_table);

fn build_table() -> [u32; 256] {
    let mut table = [0u32; 256];
    for (n, entry) in table.iter_mut().enumerate() {
        let mut c = n as u32;
        for _ in 0..8 {
            c = if c & 1 != 0 {
                POLYNOMIAL ^ (c >> 1)
            } else {
                c >> 1
            };
        }
        *entry = c;
    }
    table
}

/// 流式 CRC32 计算器
#[derive(Debug, Clone, Copy)]
pub struct Crc32 {
    state: u32,
}

impl Crc32 {
    pub fn new() -> Self {
        Self { state: 0xFFFF_FFFF }
    }

    pub fn update(&mut self, bytes: &[u8]) {
        let table = &*CRC_TABLE;
        for &b in bytes {
            self.state = table[((self.state ^ b as u32) & 0xFF) as usize] ^ (self.state >> 8);
        }
    }

    pub fn finalize(self) -> u32 {
        self.state ^ 0xFFFF_FFFF
    }
}

impl Default for Crc32 {
    fn default() -> Self {
        Self::new()
    }
}

/// 一次性计算整段数据的 CRC32
pub fn crc32(bytes: &[u8]) -> u32 {
    let mut hasher = Crc32::new();
    hasher.update(bytes);
    hasher.finalize()
}
