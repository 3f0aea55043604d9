// ==========================================
// 物料管理助手 - 文件编码检测
// ==========================================
// 规则:
// 1. 前 4 字节匹配 BOM: EF BB BF → UTF-8, FF FE → UTF-16LE, FE FF → UTF-16BE
// 2. 无 BOM 时取前 1024 字节做 UTF-8 合法性扫描，通过 → UTF-8
// 3. 否则按 GBK 处理（不再做其它推断）
// ==========================================

use encoding_rs::Encoding;
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// UTF-8 扫描的采样长度
pub const SAMPLE_LEN: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextEncoding {
    Utf8,
    Utf16Le,
    Utf16Be,
    Gbk,
}

impl TextEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Utf16Le => "UTF-16LE",
            TextEncoding::Utf16Be => "UTF-16BE",
            TextEncoding::Gbk => "GBK",
        }
    }

    pub(crate) fn as_encoding_rs(&self) -> &'static Encoding {
        match self {
            TextEncoding::Utf8 => encoding_rs::UTF_8,
            TextEncoding::Utf16Le => encoding_rs::UTF_16LE,
            TextEncoding::Utf16Be => encoding_rs::UTF_16BE,
            TextEncoding::Gbk => encoding_rs::GBK,
        }
    }
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 根据内容判定编码（不会失败，无法判定时返回 GBK）
pub fn detect_encoding(bytes: &[u8]) -> TextEncoding {
    if bytes.starts_with(&[0xEF, 0xBB, 0xBF]) {
        return TextEncoding::Utf8;
    }
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return TextEncoding::Utf16Le;
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return TextEncoding::Utf16Be;
    }

    let truncated = bytes.len() > SAMPLE_LEN;
    let sample = &bytes[..bytes.len().min(SAMPLE_LEN)];
    if looks_like_utf8(sample, truncated) {
        TextEncoding::Utf8
    } else {
        TextEncoding::Gbk
    }
}

/// 读取文件头部并判定编码
pub fn detect_file_encoding(path: &Path) -> std::io::Result<TextEncoding> {
    let mut head = Vec::with_capacity(SAMPLE_LEN + 1);
    File::open(path)?
        .take(SAMPLE_LEN as u64 + 1)
        .read_to_end(&mut head)?;
    Ok(detect_encoding(&head))
}

/// UTF-8 结构扫描
///
/// 首字节高位为 1 时，前导 1 的个数减一即后续字节数，后续字节必须形如 10xxxxxx。
/// 采样被截断时，末尾不完整的多字节序列视为合法。
fn looks_like_utf8(sample: &[u8], truncated: bool) -> bool {
    let mut pending = 0u32;
    for &byte in sample {
        if pending > 0 {
            if byte & 0xC0 != 0x80 {
                return false;
            }
            pending -= 1;
        } else if byte & 0x80 != 0 {
            pending = byte.leading_ones() - 1;
            if pending == 0 {
                return false;
            }
        }
    }
    pending == 0 || truncated
}
