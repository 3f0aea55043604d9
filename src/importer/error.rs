// ==========================================
// 物料管理助手 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 范围: 仅文件级错误（会中断整个导入）；行级错误见 RowRejection
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("{encoding}解码失败: {message}")]
    DecodeError { encoding: String, message: String },

    #[error("CSV文件为空或只有表头")]
    EmptyFile,

    // ===== 表头错误 =====
    #[error("CSV文件缺少必需字段: [{}]", .0.join(", "))]
    MissingFields(Vec<String>),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
