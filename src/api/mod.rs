// ==========================================
// 物料管理助手 - API 层
// ==========================================
// 职责: 供前端调用的业务接口（查询/增删改/导入/上传）
// ==========================================

pub mod component_api;
pub mod error;
pub mod import_api;
pub mod material_api;

pub use component_api::ComponentApi;
pub use error::{ApiError, ApiResult};
pub use import_api::ImportApi;
pub use material_api::MaterialApi;
