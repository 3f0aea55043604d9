use crate::app::state::AppState;
use crate::domain::component::{ComponentQuery, NewComponent};

use super::common::{emit_frontend_event, run_blocking, to_json};

// ==========================================
// 物料相关命令
// ==========================================

/// 查询物料（物料码优先，其余条件为空则不过滤）
#[tauri::command(rename_all = "snake_case")]
pub async fn search_components(
    state: tauri::State<'_, AppState>,
    outer_diameter: Option<String>,
    wall_thickness: Option<String>,
    material: Option<String>,
    code: Option<String>,
) -> Result<String, String> {
    let query = ComponentQuery {
        outer_diameter,
        wall_thickness,
        material,
        code,
    };
    let component_api = state.component_api.clone();
    let result = run_blocking(move || component_api.search_components(&query)).await?;

    to_json(&result)
}

/// 添加物料
#[tauri::command(rename_all = "snake_case")]
pub async fn add_component(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    outer_diameter: String,
    wall_thickness: String,
    material: String,
    code: String,
) -> Result<String, String> {
    let component = NewComponent::new(outer_diameter, wall_thickness, material, code);
    let component_api = state.component_api.clone();
    let id = run_blocking(move || component_api.add_component(&component)).await?;

    emit_frontend_event(&app, "components_changed", serde_json::json!({ "id": id }));
    to_json(&serde_json::json!({ "id": id }))
}

/// 删除物料（不存在也返回成功）
#[tauri::command(rename_all = "snake_case")]
pub async fn delete_component(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    code: String,
) -> Result<(), String> {
    let component_api = state.component_api.clone();
    let target = code.clone();
    run_blocking(move || component_api.delete_component(&target)).await?;

    emit_frontend_event(&app, "components_changed", serde_json::json!({ "code": code }));
    Ok(())
}

/// 编辑物料
#[tauri::command(rename_all = "snake_case")]
pub async fn edit_component(
    app: tauri::AppHandle,
    state: tauri::State<'_, AppState>,
    id: i64,
    code: String,
    outer_diameter: String,
    wall_thickness: String,
    material: String,
) -> Result<(), String> {
    let component = NewComponent::new(outer_diameter, wall_thickness, material, code);
    let component_api = state.component_api.clone();
    run_blocking(move || component_api.edit_component(id, &component)).await?;

    emit_frontend_event(&app, "components_changed", serde_json::json!({ "id": id }));
    Ok(())
}
