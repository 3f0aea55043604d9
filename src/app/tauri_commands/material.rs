use crate::app::state::AppState;

use super::common::{run_blocking, to_json};

// ==========================================
// 材质编码相关命令
// ==========================================

/// 添加材质编码
#[tauri::command(rename_all = "snake_case")]
pub async fn add_material(
    state: tauri::State<'_, AppState>,
    code: String,
    remark: Option<String>,
) -> Result<(), String> {
    let material_api = state.material_api.clone();
    run_blocking(move || {
        material_api.add_material(&code, remark.as_deref().unwrap_or(""))
    })
    .await?;
    Ok(())
}

/// 查询所有材质
#[tauri::command(rename_all = "snake_case")]
pub async fn get_all_materials(state: tauri::State<'_, AppState>) -> Result<String, String> {
    let material_api = state.material_api.clone();
    let result = run_blocking(move || material_api.get_all_materials()).await?;

    to_json(&result)
}
