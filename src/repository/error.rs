// ==========================================
// 物料管理助手 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约束: 约束冲突按 SQLite 扩展错误码分类，不解析错误文本
// ==========================================

use rusqlite::ffi;
use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据库错误 =====
    #[error("记录未找到: {entity} ({key})")]
    NotFound { entity: String, key: String },

    #[error("唯一约束违反: {0}")]
    UniqueViolation(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    // ===== 数据质量错误 =====
    #[error("数据验证失败: {0}")]
    ValidationError(String),
}

impl RepositoryError {
    pub fn not_found(entity: &str, key: impl Into<String>) -> Self {
        RepositoryError::NotFound {
            entity: entity.to_string(),
            key: key.into(),
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        matches!(self, RepositoryError::UniqueViolation(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, RepositoryError::NotFound { .. })
    }
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(ref e, ref msg)
                if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE
                    || e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                RepositoryError::UniqueViolation(
                    msg.clone().unwrap_or_else(|| e.to_string()),
                )
            }
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                key: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_unique_violation_classified_by_code() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (code TEXT NOT NULL UNIQUE)")
            .unwrap();
        conn.execute("INSERT INTO t (code) VALUES ('A')", []).unwrap();

        let err: RepositoryError = conn
            .execute("INSERT INTO t (code) VALUES ('A')", [])
            .unwrap_err()
            .into();
        assert!(err.is_unique_violation());
    }

    #[test]
    fn test_not_null_is_not_unique_violation() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch("CREATE TABLE t (code TEXT NOT NULL)").unwrap();

        let err: RepositoryError = conn
            .execute("INSERT INTO t (code) VALUES (NULL)", [])
            .unwrap_err()
            .into();
        assert!(matches!(err, RepositoryError::DatabaseQueryError(_)));
    }
}
