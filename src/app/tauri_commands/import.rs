use crate::app::state::AppState;

use super::common::{emit_frontend_event, map_api_error};

// ==========================================
// 物料导入相关命令
// ==========================================

/// 导入物料（始终返回汇总文本）
#[tauri::command(rename_all = "snake_case")]
pub async fn import_components(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    file_path: String,
) -> Result<String, String> {
    let summary = state.import_api.import_components(&file_path).await;

    emit_frontend_event(
        &app,
        "components_changed",
        serde_json::json!({ "file_path": file_path }),
    );
    Ok(summary)
}

/// 保存前端上传的 Base64 文件，返回临时文件路径
#[tauri::command(rename_all = "snake_case")]
pub async fn upload_file(
    state: tauri::State<'_, AppState>,
    file_content: String,
) -> Result<String, String> {
    state
        .import_api
        .upload_file(&file_content)
        .await
        .map_err(map_api_error)
}
