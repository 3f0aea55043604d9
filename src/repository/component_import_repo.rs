// ==========================================
// 物料管理助手 - 物料导入 Repository Trait
// ==========================================
// 职责: 定义导入流程所需的数据访问接口（不包含业务逻辑）
// 实现者: ComponentImportRepositoryImpl（委托给物料/材质仓储）
// ==========================================

use crate::domain::component::NewComponent;
use crate::domain::import::MaterialRegistration;
use crate::repository::component_repo::ComponentRepository;
use crate::repository::error::RepositoryResult;
use crate::repository::material_repo::MaterialRepository;
use std::sync::Arc;

// ==========================================
// ComponentImportRepository Trait
// ==========================================
pub trait ComponentImportRepository: Send + Sync {
    /// 插入单个物料（每行独立提交，失败不影响其它行）
    ///
    /// # 返回
    /// - Err(UniqueViolation): 物料码重复
    fn insert_component(&self, component: &NewComponent) -> RepositoryResult<i64>;

    /// 尽力登记材质编码，重复编码只计数
    fn register_materials(&self, codes: &[&str]) -> MaterialRegistration;
}

// ==========================================
// ComponentImportRepositoryImpl
// ==========================================
pub struct ComponentImportRepositoryImpl {
    component_repo: Arc<ComponentRepository>,
    material_repo: Arc<MaterialRepository>,
}

impl ComponentImportRepositoryImpl {
    pub fn new(
        component_repo: Arc<ComponentRepository>,
        material_repo: Arc<MaterialRepository>,
    ) -> Self {
        Self {
            component_repo,
            material_repo,
        }
    }
}

impl ComponentImportRepository for ComponentImportRepositoryImpl {
    fn insert_component(&self, component: &NewComponent) -> RepositoryResult<i64> {
        self.component_repo.insert(component)
    }

    fn register_materials(&self, codes: &[&str]) -> MaterialRegistration {
        self.material_repo.register_materials(codes.iter().copied())
    }
}
