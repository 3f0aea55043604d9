// ==========================================
// 物料管理助手 - SQLite 连接与建表
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 启动时自动建表，并以“只增列”的方式补齐旧库缺失的列
// ==========================================

use rusqlite::Connection;
use std::time::Duration;
use tracing::info;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 旧版本遗留的 (外径, 壁厚, 材质) 唯一索引名
const LEGACY_SPEC_UNIQUE_INDEX: &str = "idx_outer_diameter_wall_thickness_material";

/// 表定义: (表名, 建表语句, 需保证存在的列 (列名, 列定义))
///
/// 列定义用于 ALTER TABLE ADD COLUMN，必须带默认值（SQLite 要求 NOT NULL 列有默认值）。
const TABLES: &[(&str, &str, &[(&str, &str)])] = &[
    (
        "materials",
        r#"
        CREATE TABLE IF NOT EXISTS materials (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            code TEXT NOT NULL UNIQUE,
            remark TEXT NOT NULL DEFAULT '',
            created_at TEXT NOT NULL DEFAULT '',
            updated_at TEXT NOT NULL DEFAULT ''
        )
        "#,
        &[
            ("remark", "TEXT NOT NULL DEFAULT ''"),
            ("created_at", "TEXT NOT NULL DEFAULT ''"),
            ("updated_at", "TEXT NOT NULL DEFAULT ''"),
        ],
    ),
    (
        "components",
        r#"
        CREATE TABLE IF NOT EXISTS components (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            outer_diameter TEXT NOT NULL,
            wall_thickness TEXT NOT NULL,
            material TEXT NOT NULL,
            code TEXT NOT NULL UNIQUE,
            created_at TEXT NOT NULL DEFAULT '',
            updated_at TEXT NOT NULL DEFAULT ''
        )
        "#,
        &[
            ("created_at", "TEXT NOT NULL DEFAULT ''"),
            ("updated_at", "TEXT NOT NULL DEFAULT ''"),
        ],
    ),
];

/// 配置 SQLite 连接的统一 PRAGMA
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 建表 / 补列 / 索引（幂等）
///
/// 说明：
/// - 只做增量演进（新增表、新增列），不删除列
/// - code 在两张表中均唯一；(外径, 壁厚, 材质) 仅建普通索引
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    for (table, create_sql, columns) in TABLES {
        conn.execute_batch(create_sql)?;

        let existing = table_columns(conn, table)?;
        for (column, definition) in columns.iter() {
            if !existing.iter().any(|c| c == column) {
                info!(table = %table, column = %column, "补齐缺失列");
                conn.execute_batch(&format!(
                    "ALTER TABLE {} ADD COLUMN {} {}",
                    table, column, definition
                ))?;
            }
        }
    }

    conn.execute_batch(&format!(
        r#"
        DROP INDEX IF EXISTS {legacy};
        CREATE UNIQUE INDEX IF NOT EXISTS idx_components_code ON components(code);
        CREATE INDEX IF NOT EXISTS idx_components_spec
            ON components(outer_diameter, wall_thickness, material);
        CREATE UNIQUE INDEX IF NOT EXISTS idx_materials_code ON materials(code);
        "#,
        legacy = LEGACY_SPEC_UNIQUE_INDEX
    ))?;

    Ok(())
}

/// 打开连接并确保 schema 就绪
pub fn open_and_init(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = open_sqlite_connection(db_path)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// 读取表的列名列表
fn table_columns(conn: &Connection, table: &str) -> rusqlite::Result<Vec<String>> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let columns = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(columns)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let columns = table_columns(&conn, "components").unwrap();
        assert!(columns.contains(&"code".to_string()));
        assert!(columns.contains(&"updated_at".to_string()));
    }

    #[test]
    fn test_init_schema_extends_legacy_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            r#"
            CREATE TABLE materials (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                code TEXT NOT NULL UNIQUE
            );
            INSERT INTO materials (code) VALUES ('304');
            "#,
        )
        .unwrap();

        init_schema(&conn).unwrap();

        let remark: String = conn
            .query_row("SELECT remark FROM materials WHERE code = '304'", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(remark, "");
    }

    #[test]
    fn test_legacy_composite_unique_index_is_dropped() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        conn.execute_batch(&format!(
            "CREATE UNIQUE INDEX {} ON components(outer_diameter, wall_thickness, material)",
            LEGACY_SPEC_UNIQUE_INDEX
        ))
        .unwrap();

        init_schema(&conn).unwrap();

        conn.execute(
            "INSERT INTO components (outer_diameter, wall_thickness, material, code) VALUES ('φ22*5', '5', '304', 'A')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO components (outer_diameter, wall_thickness, material, code) VALUES ('φ22*5', '5', '304', 'B')",
            [],
        )
        .unwrap();
    }
}
