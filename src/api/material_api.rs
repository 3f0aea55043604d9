// ==========================================
// 物料管理助手 - 材质编码 API
// ==========================================

use std::sync::Arc;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::component::Material;
use crate::repository::MaterialRepository;

/// 材质API
pub struct MaterialApi {
    material_repo: Arc<MaterialRepository>,
}

impl MaterialApi {
    pub fn new(material_repo: Arc<MaterialRepository>) -> Self {
        Self { material_repo }
    }

    /// 新增材质编码
    ///
    /// # 返回
    /// - Err(InvalidInput): 编码为空
    /// - Err(UniqueViolation): 编码已存在
    pub fn add_material(&self, code: &str, remark: &str) -> ApiResult<i64> {
        info!(code = %code, remark = %remark, "添加材质");
        let code = code.trim();

        self.material_repo.insert(code, remark.trim()).map_err(|e| {
            warn!(error = %e, code = %code, "添加材质失败");
            ApiError::from(e)
        })
    }

    /// 查询所有材质
    pub fn get_all_materials(&self) -> ApiResult<Vec<Material>> {
        info!("查询所有材质");
        self.material_repo.list_all().map_err(|e| {
            warn!(error = %e, "查询材质失败");
            ApiError::from(e)
        })
    }
}
