// ==========================================
// 物料管理助手 - 应用配置
// ==========================================
// 来源（优先级由低到高）:
// 1. 内置默认值
// 2. MATERIAL_ASSISTANT_CONFIG 指定的 JSON 文件
// 3. 环境变量覆写
// ==========================================

use crate::importer::field_mapper::DEFAULT_REQUIRED_HEADERS;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub mod env_keys {
    pub const CONFIG_FILE: &str = "MATERIAL_ASSISTANT_CONFIG";
    pub const DB_PATH: &str = "MATERIAL_ASSISTANT_DB_PATH";
    pub const LOG_DIR: &str = "MATERIAL_ASSISTANT_LOG_DIR";
    pub const LOG_JSON: &str = "MATERIAL_ASSISTANT_LOG_JSON";
}

/// 默认数据库文件名
pub const DEFAULT_DB_FILE: &str = "material-database.db";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// SQLite 数据库文件路径
    pub db_path: String,
    /// 前端上传文件的落盘目录
    pub upload_dir: PathBuf,
    pub log: LogConfig,
    pub import: ImportConfig,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// 默认级别（RUST_LOG 优先）
    pub level: String,
    /// 日志目录；None 时只输出到控制台
    pub dir: Option<PathBuf>,
    pub file_name: String,
    /// 是否输出 JSON 格式
    pub json: bool,
}

/// 导入配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// 必需表头标签，顺序: 外径, 壁厚, 材质, 物料码
    pub required_headers: [String; 4],
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            upload_dir: std::env::temp_dir(),
            log: LogConfig::default(),
            import: ImportConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
            file_name: "log.log".to_string(),
            json: false,
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            required_headers: DEFAULT_REQUIRED_HEADERS.map(str::to_string),
        }
    }
}

impl AppConfig {
    /// 加载配置: 默认值 → JSON 文件（若指定）→ 环境变量
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match non_empty_env(env_keys::CONFIG_FILE) {
            Some(path) => Self::from_json_file(Path::new(&path))?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// 从 JSON 文件读取（缺省字段取默认值）
    pub fn from_json_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&text).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    fn apply_env_overrides(&mut self) {
        if let Some(path) = non_empty_env(env_keys::DB_PATH) {
            self.db_path = path;
        }
        if let Some(dir) = non_empty_env(env_keys::LOG_DIR) {
            self.log.dir = Some(PathBuf::from(dir));
        }
        if let Some(flag) = non_empty_env(env_keys::LOG_JSON) {
            self.log.json = is_true(&flag);
        }
    }
}

/// 获取默认数据库路径
///
/// 优先使用用户数据目录，不可用时回退到当前目录。只计算路径，不创建目录。
pub fn default_db_path() -> String {
    let path = match dirs::data_dir() {
        Some(data_dir) => data_dir.join("material-assistant").join(DEFAULT_DB_FILE),
        None => PathBuf::from(DEFAULT_DB_FILE),
    };
    path.to_string_lossy().to_string()
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_required_headers() {
        let config = ImportConfig::default();
        assert_eq!(config.required_headers, ["外径", "壁厚", "材质", "物料码"]);
    }

    #[test]
    fn test_json_file_with_partial_fields() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{ "db_path": "/tmp/test.db", "log": {{ "json": true }} }}"#
        )
        .unwrap();

        let config = AppConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.db_path, "/tmp/test.db");
        assert!(config.log.json);
        assert_eq!(config.log.level, "info");
        assert_eq!(config.import, ImportConfig::default());
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "not json").unwrap();
        assert!(matches!(
            AppConfig::from_json_file(file.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_default_db_path_names_database_file() {
        let path = PathBuf::from(default_db_path());
        assert_eq!(
            path.file_name().and_then(|n| n.to_str()),
            Some(DEFAULT_DB_FILE)
        );
    }

    #[test]
    fn test_is_true() {
        assert!(is_true(" YES "));
        assert!(!is_true("0"));
    }
}
