// ==========================================
// 物料管理助手 - 物料 API
// ==========================================
// 职责: 物料查询、新增、编辑、删除
// 约束: 错误在检测处带上下文记录日志，再原样上抛（不重试）
// ==========================================

use std::sync::Arc;
use tracing::{info, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::component::{Component, ComponentQuery, NewComponent};
use crate::repository::ComponentRepository;

/// 物料API
pub struct ComponentApi {
    component_repo: Arc<ComponentRepository>,
}

impl ComponentApi {
    pub fn new(component_repo: Arc<ComponentRepository>) -> Self {
        Self { component_repo }
    }

    /// 查询物料
    ///
    /// # 规则
    /// - 物料码非空: 仅按物料码精确查询，不存在返回 NotFound
    /// - 否则按非空的 外径/壁厚/材质 组合过滤；全空返回全部
    pub fn search_components(&self, query: &ComponentQuery) -> ApiResult<Vec<Component>> {
        info!(
            outer_diameter = ?query.outer_diameter,
            wall_thickness = ?query.wall_thickness,
            material = ?query.material,
            code = ?query.code,
            "查询物料"
        );
        self.component_repo.search(query).map_err(|e| {
            warn!(error = %e, code = ?query.code, "查询物料失败");
            ApiError::from(e)
        })
    }

    /// 新增物料
    ///
    /// # 返回
    /// - Err(InvalidInput): 存在空字段（由仓储校验）
    /// - Err(UniqueViolation): 物料码已存在
    pub fn add_component(&self, component: &NewComponent) -> ApiResult<i64> {
        let component = component.trimmed();
        info!(
            outer_diameter = %component.outer_diameter,
            wall_thickness = %component.wall_thickness,
            material = %component.material,
            code = %component.code,
            "添加物料"
        );

        self.component_repo.insert(&component).map_err(|e| {
            warn!(error = %e, code = %component.code, "添加物料失败");
            ApiError::from(e)
        })
    }

    /// 按主键编辑物料（覆盖 外径/壁厚/材质/物料码）
    pub fn edit_component(&self, id: i64, component: &NewComponent) -> ApiResult<()> {
        let component = component.trimmed();
        info!(id, code = %component.code, "编辑物料");

        self.component_repo.update(id, &component).map_err(|e| {
            warn!(error = %e, id, code = %component.code, "编辑物料失败");
            ApiError::from(e)
        })
    }

    /// 按物料码删除（不存在也返回成功）
    pub fn delete_component(&self, code: &str) -> ApiResult<()> {
        info!(code = %code, "删除物料");
        let deleted = self.component_repo.delete_by_code(code.trim()).map_err(|e| {
            warn!(error = %e, code = %code, "删除物料失败");
            ApiError::from(e)
        })?;
        if deleted == 0 {
            info!(code = %code, "物料不存在，无需删除");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;
    use rusqlite::Connection;
    use std::sync::Mutex;

    fn api() -> ComponentApi {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        let repo = ComponentRepository::from_connection(Arc::new(Mutex::new(conn)));
        ComponentApi::new(Arc::new(repo))
    }

    #[test]
    fn test_add_trims_and_rejects_empty_fields() {
        let api = api();
        api.add_component(&NewComponent::new(" φ22*5 ", "5", "304", " 81383220 "))
            .unwrap();
        let found = api
            .search_components(&ComponentQuery::by_code("81383220"))
            .unwrap();
        assert_eq!(found[0].outer_diameter, "φ22*5");

        let err = api
            .add_component(&NewComponent::new("φ22*5", "5", "304", "  "))
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidInput(_)));
    }

    #[test]
    fn test_edit_rejects_empty_fields() {
        let api = api();
        let id = api
            .add_component(&NewComponent::new("φ22*5", "5", "304", "81383220"))
            .unwrap();

        let err = api
            .edit_component(id, &NewComponent::new("φ22*5", "", "304", "81383220"))
            .unwrap_err();
        assert_eq!(err.code(), "INVALID_INPUT");
        assert!(err.to_string().contains("壁厚"));
    }

    #[test]
    fn test_add_duplicate_code() {
        let api = api();
        let component = NewComponent::new("φ22*5", "5", "304", "81383220");
        api.add_component(&component).unwrap();
        let err = api.add_component(&component).unwrap_err();
        assert_eq!(err.code(), "UNIQUE_VIOLATION");
    }

    #[test]
    fn test_edit_and_delete() {
        let api = api();
        let id = api
            .add_component(&NewComponent::new("φ22*5", "5", "304", "81383220"))
            .unwrap();

        api.edit_component(id, &NewComponent::new("φ22*5", "5", "316L", "81383220"))
            .unwrap();
        let found = api
            .search_components(&ComponentQuery::by_code("81383220"))
            .unwrap();
        assert_eq!(found[0].material, "316L");

        api.delete_component("81383220").unwrap();
        api.delete_component("81383220").unwrap();
        let err = api
            .search_components(&ComponentQuery::by_code("81383220"))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
