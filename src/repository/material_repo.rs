// ==========================================
// 物料管理助手 - 材质编码仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::component::Material;
use crate::domain::import::MaterialRegistration;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row_time::parse_timestamp;
use chrono::Utc;
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, warn};

/// 职责: 管理 materials 表
pub struct MaterialRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MaterialRepository {
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新增材质编码
    ///
    /// # 返回
    /// - Err(ValidationError): 编码为空
    /// - Err(UniqueViolation): 编码已存在
    pub fn insert(&self, code: &str, remark: &str) -> RepositoryResult<i64> {
        if code.trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "材质编码不能为空".to_string(),
            ));
        }
        let conn = self.get_conn()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            "INSERT INTO materials (code, remark, created_at, updated_at) VALUES (?1, ?2, ?3, ?3)",
            params![code, remark, now],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 查询全部材质（按 id 升序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Material>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, code, remark, created_at, updated_at FROM materials ORDER BY id",
        )?;
        let materials = stmt
            .query_map([], |row| {
                Ok(Material {
                    id: row.get(0)?,
                    code: row.get(1)?,
                    remark: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    created_at: parse_timestamp(row.get(3)?),
                    updated_at: parse_timestamp(row.get(4)?),
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(materials)
    }

    /// 尽力登记材质编码（备注留空）
    ///
    /// 重复编码计入 skipped_duplicates，其它失败计入 failed 并记录日志，均不中断。
    pub fn register_materials<'a, I>(&self, codes: I) -> MaterialRegistration
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut registration = MaterialRegistration::default();
        for code in codes {
            match self.insert(code, "") {
                Ok(_) => registration.inserted += 1,
                Err(e) if e.is_unique_violation() => {
                    debug!(code = %code, "材质已存在，跳过");
                    registration.skipped_duplicates += 1;
                }
                Err(e) => {
                    warn!(code = %code, error = %e, "登记材质失败");
                    registration.failed += 1;
                }
            }
        }
        registration
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;

    fn setup() -> MaterialRepository {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        MaterialRepository::from_connection(Arc::new(Mutex::new(conn)))
    }

    #[test]
    fn test_insert_and_list() {
        let repo = setup();
        repo.insert("304", "不锈钢").unwrap();
        repo.insert("16Mn", "").unwrap();

        let all = repo.list_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].code, "304");
        assert_eq!(all[0].remark, "不锈钢");
    }

    #[test]
    fn test_duplicate_code_is_unique_violation() {
        let repo = setup();
        repo.insert("304", "").unwrap();
        assert!(repo.insert("304", "again").unwrap_err().is_unique_violation());
    }

    #[test]
    fn test_empty_code_is_validation_error() {
        let repo = setup();
        let err = repo.insert("  ", "").unwrap_err();
        assert!(matches!(err, RepositoryError::ValidationError(_)));

        let registration = repo.register_materials(["", "304"]);
        assert_eq!(registration.inserted, 1);
        assert_eq!(registration.failed, 1);
        assert_eq!(repo.list_all().unwrap().len(), 1);
    }

    #[test]
    fn test_register_materials_counts_duplicates() {
        let repo = setup();
        repo.insert("304", "已有").unwrap();

        let registration = repo.register_materials(["304", "16Mn", "20#"]);
        assert_eq!(registration.inserted, 2);
        assert_eq!(registration.skipped_duplicates, 1);
        assert_eq!(registration.failed, 0);

        // 已有备注不被覆盖
        let all = repo.list_all().unwrap();
        assert_eq!(all[0].remark, "已有");
        assert_eq!(all.len(), 3);
    }
}
