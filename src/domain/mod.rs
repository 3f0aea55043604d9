// ==========================================
// 物料管理助手 - 领域层
// ==========================================
// 职责: 实体与值对象，不含数据访问
// ==========================================

pub mod component;
pub mod import;

pub use component::{Component, ComponentQuery, Material, NewComponent};
pub use import::{ImportReport, MaterialRegistration, RowRejection};
