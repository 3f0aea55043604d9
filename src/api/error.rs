// ==========================================
// 物料管理助手 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换 Repository 错误为调用方可分支的错误
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("唯一约束违反: {0}")]
    UniqueViolation(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    // ==========================================
    // 文件错误
    // ==========================================
    #[error("文件上传失败: {0}")]
    UploadError(String),
}

impl ApiError {
    /// 稳定的错误代码（供前端分支）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::UniqueViolation(_) => "UNIQUE_VIOLATION",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
            ApiError::UploadError(_) => "UPLOAD_ERROR",
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, key } => {
                ApiError::NotFound(format!("{}({})不存在", entity, key))
            }
            RepositoryError::UniqueViolation(msg) => ApiError::UniqueViolation(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::ValidationError(msg) => ApiError::InvalidInput(msg),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
