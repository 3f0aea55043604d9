use crate::api::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use tauri::Manager;

// ==========================================
// 公共工具：错误映射、事件发送
// ==========================================

/// 错误响应（返回给前端）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(super) struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,
}

/// 将ApiError转换为JSON字符串（Tauri要求）
pub(super) fn map_api_error(err: ApiError) -> String {
    let error_response = ErrorResponse {
        code: err.code().to_string(),
        message: err.to_string(),
    };

    serde_json::to_string(&error_response).unwrap_or_else(|_| err.to_string())
}

/// 在阻塞线程池中执行 API 调用（SQLite 访问为同步阻塞）
pub(super) async fn run_blocking<T, F>(task: F) -> Result<T, String>
where
    F: FnOnce() -> ApiResult<T> + Send + 'static,
    T: Send + 'static,
{
    tauri::async_runtime::spawn_blocking(task)
        .await
        .map_err(|e| format!("任务执行失败: {}", e))?
        .map_err(map_api_error)
}

/// 序列化命令结果
pub(super) fn to_json<T: Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("序列化失败: {}", e))
}

/// 尽力发送前端事件；发送失败不影响命令结果
pub(super) fn emit_frontend_event(app: &tauri::AppHandle, event: &str, payload: serde_json::Value) {
    if let Err(e) = app.emit_all(event, payload) {
        tracing::warn!(event = %event, error = %e, "前端事件发送失败");
    }
}
