// ==========================================
// 物料管理助手 - CSV 文件解析器
// ==========================================
// 流程: 编码检测 → 转码为 UTF-8 文本 → CSV 解析为二维字符串表
// 容错: 引号不严格配对时按字面接受；行长度可不一致（由校验阶段判定）
// ==========================================

use crate::importer::encoding::{detect_encoding, TextEncoding};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::component_importer_trait::FileParser;
use csv::{ReaderBuilder, Trim};
use std::borrow::Cow;
use std::path::Path;
use tracing::{debug, info, warn};

/// 解码后的表格（第 0 行为表头）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedTable {
    pub encoding: TextEncoding,
    pub rows: Vec<Vec<String>>,
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<DecodedTable> {
        if !file_path.exists() {
            return Err(ImportError::FileReadError(format!(
                "文件不存在: {}",
                file_path.display()
            )));
        }

        let bytes = std::fs::read(file_path)?;
        let encoding = detect_encoding(&bytes);
        info!(file_path = %file_path.display(), encoding = %encoding, "检测到文件编码");

        let table = parse_bytes(&bytes, encoding)?;
        debug!(encoding = %table.encoding, rows = table.rows.len(), "CSV 解析完成");
        Ok(table)
    }
}

/// 按给定编码解码并解析 CSV
///
/// 返回表中的 encoding 为实际使用的编码（UTF-8 回退 GBK 时为 GBK）。
pub fn parse_bytes(bytes: &[u8], encoding: TextEncoding) -> ImportResult<DecodedTable> {
    let (encoding, text) = decode_text(bytes, encoding)?;

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| decode_error(encoding, e))?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(DecodedTable { encoding, rows })
}

/// 转码为 UTF-8 文本并去掉 BOM
///
/// 采样只覆盖文件头部，无 BOM 的文件在采样之后出现非法 UTF-8 时改按 GBK 转码；
/// 带 UTF-8 BOM 的文件出现非法字节直接报错。GBK/UTF-16 的非法序列以替换字符保留。
fn decode_text(
    bytes: &[u8],
    encoding: TextEncoding,
) -> ImportResult<(TextEncoding, Cow<'_, str>)> {
    match encoding {
        TextEncoding::Utf8 => match bytes.strip_prefix(&[0xEF, 0xBB, 0xBF]) {
            Some(body) => std::str::from_utf8(body)
                .map(|text| (encoding, Cow::Borrowed(text)))
                .map_err(|e| decode_error(encoding, e)),
            None => match std::str::from_utf8(bytes) {
                Ok(text) => Ok((encoding, Cow::Borrowed(text))),
                Err(e) => {
                    warn!(
                        valid_up_to = e.valid_up_to(),
                        "UTF-8 解码失败，改按 GBK 转码"
                    );
                    decode_text(bytes, TextEncoding::Gbk)
                }
            },
        },
        TextEncoding::Utf16Le | TextEncoding::Utf16Be => {
            let (text, _) = encoding.as_encoding_rs().decode_with_bom_removal(bytes);
            Ok((encoding, text))
        }
        TextEncoding::Gbk => {
            let (text, had_errors) = encoding.as_encoding_rs().decode_without_bom_handling(bytes);
            if had_errors {
                debug!("GBK 转码存在无法识别的字节，已替换");
            }
            Ok((encoding, text))
        }
    }
}

fn decode_error(encoding: TextEncoding, err: impl std::fmt::Display) -> ImportError {
    ImportError::DecodeError {
        encoding: encoding.name().to_string(),
        message: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::encoding::SAMPLE_LEN;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(bytes: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(bytes).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_utf8_with_bom() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice("外径,壁厚,材质,物料码\nφ22*5,5,304,81383220\n".as_bytes());
        let file = write_temp(&bytes);

        let table = CsvParser.parse_to_table(file.path()).unwrap();
        assert_eq!(table.encoding, TextEncoding::Utf8);
        assert_eq!(table.rows[0][0], "外径");
        assert_eq!(table.rows[1], vec!["φ22*5", "5", "304", "81383220"]);
    }

    #[test]
    fn test_gbk_is_transcoded() {
        let (bytes, _, _) = encoding_rs::GBK.encode("外径,壁厚,材质,物料码\n φ45*8, 8,304,81349147\n");
        let file = write_temp(&bytes);

        let table = CsvParser.parse_to_table(file.path()).unwrap();
        assert_eq!(table.encoding, TextEncoding::Gbk);
        assert_eq!(table.rows[0], vec!["外径", "壁厚", "材质", "物料码"]);
        assert_eq!(table.rows[1], vec!["φ45*8", "8", "304", "81349147"]);
    }

    #[test]
    fn test_utf16le_is_transcoded() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "外径,物料码\nA,1\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let file = write_temp(&bytes);

        let table = CsvParser.parse_to_table(file.path()).unwrap();
        assert_eq!(table.encoding, TextEncoding::Utf16Le);
        assert_eq!(table.rows, vec![vec!["外径", "物料码"], vec!["A", "1"]]);
    }

    #[test]
    fn test_loose_quotes_and_ragged_rows() {
        let text = "a,b,c\n1,2\"x,3\n\"quoted, comma\",y\n";
        let rows = parse_bytes(text.as_bytes(), TextEncoding::Utf8).unwrap().rows;
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], vec!["1", "2\"x", "3"]);
        assert_eq!(rows[2], vec!["quoted, comma", "y"]);
    }

    #[test]
    fn test_utf16be_is_transcoded() {
        let mut bytes = vec![0xFE, 0xFF];
        for unit in "外径,壁厚,材质,物料码\nφ22*5,5,304,81383220\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_be_bytes());
        }
        let file = write_temp(&bytes);

        let table = CsvParser.parse_to_table(file.path()).unwrap();
        assert_eq!(table.encoding, TextEncoding::Utf16Be);
        assert_eq!(
            table.rows,
            vec![
                vec!["外径", "壁厚", "材质", "物料码"],
                vec!["φ22*5", "5", "304", "81383220"],
            ]
        );
    }

    #[test]
    fn test_gbk_lead_byte_at_sample_boundary_falls_back_to_gbk() {
        // 采样的最后一个字节是 GBK 双字节字符“外”(CD E2) 的首字节
        let mut bytes = vec![b'a'; SAMPLE_LEN - 1];
        bytes.extend_from_slice(&[0xCD, 0xE2, b'\n']);
        assert_eq!(detect_encoding(&bytes), TextEncoding::Utf8);

        let file = write_temp(&bytes);
        let table = CsvParser.parse_to_table(file.path()).unwrap();
        assert_eq!(table.encoding, TextEncoding::Gbk);
        assert!(table.rows[0][0].ends_with("a外"));
    }

    #[test]
    fn test_invalid_utf8_after_sample_falls_back_to_gbk() {
        let mut bytes = "a,b\n".repeat(300).into_bytes();
        let (gbk, _, _) = encoding_rs::GBK.encode("外径,物料码\n");
        bytes.extend_from_slice(&gbk);

        let table = parse_bytes(&bytes, TextEncoding::Utf8).unwrap();
        assert_eq!(table.encoding, TextEncoding::Gbk);
        assert_eq!(table.rows.len(), 301);
        assert_eq!(table.rows[300], vec!["外径", "物料码"]);
    }

    #[test]
    fn test_invalid_utf8_with_bom_is_decode_error() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(&[b'a', b',', 0xCD, 0xE2, b'\n']);

        let err = parse_bytes(&bytes, TextEncoding::Utf8).unwrap_err();
        match err {
            ImportError::DecodeError { encoding, .. } => assert_eq!(encoding, "UTF-8"),
            other => panic!("Expected DecodeError, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file() {
        let result = CsvParser.parse_to_table(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileReadError(_))));
    }
}
