// ==========================================
// 物料管理助手 - 导入层
// ==========================================
// 职责: CSV 物料批量导入
// 流程: 编码检测 → CSV 解码 → 表头映射/行校验 → 逐行落库 → 汇总
// ==========================================

pub mod component_importer_impl;
pub mod component_importer_trait;
pub mod encoding;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use component_importer_impl::ComponentImporterImpl;
pub use component_importer_trait::{ComponentImporter, FileParser};
pub use encoding::{detect_encoding, detect_file_encoding, TextEncoding};
pub use error::{ImportError, ImportResult};
pub use field_mapper::{FieldMapper, DEFAULT_REQUIRED_HEADERS};
pub use file_parser::{CsvParser, DecodedTable};
