// ==========================================
// 物料导入API
// ==========================================
// 职责: 封装 CSV 物料导入与前端文件上传
// 约束: 导入结果始终以汇总文本返回；只有文件级问题返回简短错误文本
// ==========================================

use base64::Engine;
use std::path::PathBuf;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::importer::{ComponentImporter, ComponentImporterImpl, ImportError};
use crate::repository::ComponentImportRepositoryImpl;

/// 导入API
pub struct ImportApi {
    importer: ComponentImporterImpl<ComponentImportRepositoryImpl>,
    upload_dir: PathBuf,
}

impl ImportApi {
    pub fn new(
        importer: ComponentImporterImpl<ComponentImportRepositoryImpl>,
        upload_dir: PathBuf,
    ) -> Self {
        Self {
            importer,
            upload_dir,
        }
    }

    /// 导入物料，返回面向用户的多行汇总
    ///
    /// 行级失败体现在汇总中；读取/解码失败、缺少表头等文件级问题返回简短说明。
    pub async fn import_components(&self, file_path: &str) -> String {
        info!(file_path = %file_path, "导入物料");
        match self.importer.import_from_csv(file_path).await {
            Ok(report) => {
                let summary = report.to_string();
                warn!(file_path = %file_path, summary = %summary, "导入物料情况汇总");
                summary
            }
            Err(e) => {
                warn!(file_path = %file_path, error = %e, "导入物料失败");
                file_level_message(&e)
            }
        }
    }

    /// 保存前端上传的 Base64 文件内容，返回落盘路径
    pub async fn upload_file(&self, file_content: &str) -> ApiResult<String> {
        let data = base64::engine::general_purpose::STANDARD
            .decode(file_content.trim())
            .map_err(|e| {
                error!(error = %e, "解码文件内容失败");
                ApiError::UploadError(format!("Base64 解码失败: {}", e))
            })?;

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| {
                error!(error = %e, dir = %self.upload_dir.display(), "创建上传目录失败");
                ApiError::UploadError(e.to_string())
            })?;

        let path = self.upload_dir.join(format!("import-{}.csv", Uuid::new_v4()));
        tokio::fs::write(&path, &data).await.map_err(|e| {
            error!(error = %e, path = %path.display(), "写入文件失败");
            ApiError::UploadError(format!("写入文件失败: {}", e))
        })?;

        info!(path = %path.display(), bytes = data.len(), "文件上传完成");
        Ok(path.to_string_lossy().to_string())
    }
}

/// 文件级错误的简短提示
fn file_level_message(err: &ImportError) -> String {
    match err {
        ImportError::FileReadError(_) | ImportError::DecodeError { .. } => {
            format!("读取文件失败: {}", err)
        }
        _ => err.to_string(),
    }
}
