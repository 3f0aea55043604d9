// ==========================================
// 物料管理助手 - 物料仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化，动态条件只拼接固定列名
// ==========================================

use crate::domain::component::{Component, ComponentQuery, NewComponent};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row_time::parse_timestamp;
use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

const SELECT_COLUMNS: &str =
    "id, outer_diameter, wall_thickness, material, code, created_at, updated_at";

// ==========================================
// ComponentRepository - 物料仓储
// ==========================================
/// 职责: 管理 components 表的 CRUD 操作
pub struct ComponentRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ComponentRepository {
    /// 从已有连接创建仓储实例（schema 由 db::open_and_init 保证）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    fn map_row(row: &Row<'_>) -> rusqlite::Result<Component> {
        Ok(Component {
            id: row.get(0)?,
            outer_diameter: row.get(1)?,
            wall_thickness: row.get(2)?,
            material: row.get(3)?,
            code: row.get(4)?,
            created_at: parse_timestamp(row.get::<_, Option<String>>(5)?),
            updated_at: parse_timestamp(row.get::<_, Option<String>>(6)?),
        })
    }

    /// 新增物料
    ///
    /// # 返回
    /// - Ok(i64): 新记录 id
    /// - Err(ValidationError): 存在空字段
    /// - Err(UniqueViolation): 物料码已存在
    pub fn insert(&self, component: &NewComponent) -> RepositoryResult<i64> {
        ensure_complete(component)?;
        let conn = self.get_conn()?;
        let now = Utc::now().to_rfc3339();
        conn.execute(
            r#"
            INSERT INTO components (
                outer_diameter, wall_thickness, material, code, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            "#,
            params![
                component.outer_diameter,
                component.wall_thickness,
                component.material,
                component.code,
                now,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 按物料码查询
    pub fn find_by_code(&self, code: &str) -> RepositoryResult<Option<Component>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM components WHERE code = ?1", SELECT_COLUMNS);
        let component = conn
            .query_row(&sql, params![code], Self::map_row)
            .optional()?;
        Ok(component)
    }

    /// 按主键查询
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Component>> {
        let conn = self.get_conn()?;
        let sql = format!("SELECT {} FROM components WHERE id = ?1", SELECT_COLUMNS);
        let component = conn
            .query_row(&sql, params![id], Self::map_row)
            .optional()?;
        Ok(component)
    }

    /// 查询全部物料（按 id 升序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Component>> {
        self.search(&ComponentQuery::default())
    }

    /// 组合查询
    ///
    /// # 规则
    /// - 物料码非空: 精确查询该物料，不存在返回 NotFound，忽略其余条件
    /// - 否则按非空的 外径/壁厚/材质 做 AND 过滤
    /// - 无任何条件: 返回全部
    pub fn search(&self, query: &ComponentQuery) -> RepositoryResult<Vec<Component>> {
        if let Some(code) = query.code() {
            return match self.find_by_code(code)? {
                Some(component) => Ok(vec![component]),
                None => Err(RepositoryError::not_found("Component", format!("code={}", code))),
            };
        }

        let filters = query.filters();
        let mut sql = format!("SELECT {} FROM components", SELECT_COLUMNS);
        if !filters.is_empty() {
            let clause = filters
                .iter()
                .enumerate()
                .map(|(i, (column, _))| format!("{} = ?{}", column, i + 1))
                .collect::<Vec<_>>()
                .join(" AND ");
            sql.push_str(" WHERE ");
            sql.push_str(&clause);
        }
        sql.push_str(" ORDER BY id");
        debug!(sql = %sql, filters = filters.len(), "查询物料");

        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&sql)?;
        let components = stmt
            .query_map(
                params_from_iter(filters.iter().map(|(_, value)| *value)),
                Self::map_row,
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(components)
    }

    /// 按主键覆盖 外径/壁厚/材质/物料码
    ///
    /// # 返回
    /// - Err(NotFound): id 不存在
    /// - Err(ValidationError): 存在空字段
    /// - Err(UniqueViolation): 新物料码与其它物料冲突
    pub fn update(&self, id: i64, component: &NewComponent) -> RepositoryResult<()> {
        ensure_complete(component)?;
        let conn = self.get_conn()?;
        let affected = conn.execute(
            r#"
            UPDATE components
            SET outer_diameter = ?1, wall_thickness = ?2, material = ?3, code = ?4, updated_at = ?5
            WHERE id = ?6
            "#,
            params![
                component.outer_diameter,
                component.wall_thickness,
                component.material,
                component.code,
                Utc::now().to_rfc3339(),
                id,
            ],
        )?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Component", format!("id={}", id)));
        }
        Ok(())
    }

    /// 按物料码删除（不存在也视为成功）
    ///
    /// # 返回
    /// - Ok(usize): 实际删除的行数（0 或 1）
    pub fn delete_by_code(&self, code: &str) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM components WHERE code = ?1", params![code])?;
        Ok(affected)
    }

    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM components", [], |row| row.get(0))?;
        Ok(count)
    }
}

/// 四个字段均不能为空（trim 后）
fn ensure_complete(component: &NewComponent) -> RepositoryResult<()> {
    let empty = component.empty_fields();
    if empty.is_empty() {
        return Ok(());
    }
    Err(RepositoryError::ValidationError(format!(
        "字段不能为空: {}",
        empty.join(", ")
    )))
}
