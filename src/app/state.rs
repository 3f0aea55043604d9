// ==========================================
// 物料管理助手 - 应用状态
// ==========================================
// 职责: 启动时显式构建共享连接、仓储与 API；关闭时显式释放
// ==========================================

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::api::{ComponentApi, ImportApi, MaterialApi};
use crate::config::AppConfig;
use crate::db::open_and_init;
use crate::importer::{ComponentImporterImpl, CsvParser};
use crate::repository::{ComponentImportRepositoryImpl, ComponentRepository, MaterialRepository};

/// 应用状态
///
/// 包含所有API实例和共享资源
/// 在Tauri应用中作为全局状态管理
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 物料API
    pub component_api: Arc<ComponentApi>,

    /// 材质API
    pub material_api: Arc<MaterialApi>,

    /// 物料导入API
    pub import_api: Arc<ImportApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 创建数据库目录（如不存在），打开数据库并建表/补列
    /// 2. 基于共享连接初始化所有Repository
    /// 3. 创建所有API实例
    pub fn new(config: &AppConfig) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", config.db_path);

        // 数据库目录在首次打开时创建
        if let Some(parent) = Path::new(&config.db_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("无法创建数据库目录 {}: {}", parent.display(), e))?;
            }
        }

        let conn = open_and_init(&config.db_path)
            .map_err(|e| format!("无法初始化数据库: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let component_repo = Arc::new(ComponentRepository::from_connection(conn.clone()));
        let material_repo = Arc::new(MaterialRepository::from_connection(conn));

        // ==========================================
        // 初始化API层
        // ==========================================
        let importer = ComponentImporterImpl::new(
            ComponentImportRepositoryImpl::new(component_repo.clone(), material_repo.clone()),
            config.import.clone(),
            Box::new(CsvParser),
        );

        Ok(Self {
            db_path: config.db_path.clone(),
            component_api: Arc::new(ComponentApi::new(component_repo)),
            material_api: Arc::new(MaterialApi::new(material_repo)),
            import_api: Arc::new(ImportApi::new(importer, config.upload_dir.clone())),
        })
    }

    /// 关闭应用状态（释放连接）
    pub fn shutdown(self) {
        tracing::info!("关闭AppState，数据库路径: {}", self.db_path);
        drop(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ImportConfig, LogConfig};
    use crate::domain::component::{ComponentQuery, NewComponent};
    use tempfile::TempDir;

    fn test_config(dir: &TempDir, db_file: &str) -> AppConfig {
        AppConfig {
            db_path: dir.path().join(db_file).to_string_lossy().to_string(),
            upload_dir: dir.path().to_path_buf(),
            log: LogConfig::default(),
            import: ImportConfig::default(),
        }
    }

    #[test]
    fn test_state_creates_missing_db_directory() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, "nested/data/test.db");

        let state = AppState::new(&config).unwrap();
        assert!(dir.path().join("nested/data/test.db").exists());
        state
            .component_api
            .add_component(&NewComponent::new("φ22*5", "5", "304", "81383220"))
            .unwrap();
    }

    #[test]
    fn test_state_shares_one_store() {
        let dir = TempDir::new().unwrap();
        let config = test_config(&dir, "test.db");

        let state = AppState::new(&config).unwrap();
        state
            .component_api
            .add_component(&NewComponent::new("φ22*5", "5", "304", "81383220"))
            .unwrap();
        state.material_api.add_material("304", "").unwrap();
        assert_eq!(
            state
                .component_api
                .search_components(&ComponentQuery::default())
                .unwrap()
                .len(),
            1
        );
        state.shutdown();

        // 重新打开后数据仍在
        let state = AppState::new(&config).unwrap();
        assert_eq!(state.material_api.get_all_materials().unwrap().len(), 1);
    }
}
