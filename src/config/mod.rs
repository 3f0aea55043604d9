// ==========================================
// 物料管理助手 - 配置层
// ==========================================
// 职责: 数据库路径、上传目录、日志、导入表头配置
// ==========================================

pub mod app_config;

pub use app_config::{
    default_db_path, env_keys, AppConfig, ConfigError, ImportConfig, LogConfig, DEFAULT_DB_FILE,
};
