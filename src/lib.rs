// ==========================================
// 物料管理助手 - 核心库
// ==========================================
// 技术栈: Tauri + Rust + SQLite
// 职责: 管材物料（外径/壁厚/材质/物料码）与材质编码的维护及 CSV 批量导入
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 导入层 - CSV 批量导入
pub mod importer;

// 配置层 - 应用配置
pub mod config;

// 数据库基础设施（连接初始化/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - Tauri 集成
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    Component, ComponentQuery, ImportReport, Material, MaterialRegistration, NewComponent,
    RowRejection,
};

// API
pub use api::{ApiError, ApiResult, ComponentApi, ImportApi, MaterialApi};

// 应用状态
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "物料管理助手";
