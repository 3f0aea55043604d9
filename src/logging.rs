// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 支持环境变量配置日志级别，可选写入日志文件 / JSON 格式
// ==========================================

use crate::config::LogConfig;
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认取 LogConfig.level）
///   例如: RUST_LOG=debug 或 RUST_LOG=material_assistant=trace
///
/// # 返回
/// - Err: 日志目录/文件无法创建，或已初始化过
///
/// # 示例
/// ```no_run
/// use material_assistant::{config::LogConfig, logging};
/// logging::init(&LogConfig::default()).unwrap();
/// ```
pub fn init(config: &LogConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.as_str()));

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    let result = match &config.dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(&config.file_name))?;
            let builder = builder.with_ansi(false).with_writer(Mutex::new(file));
            if config.json {
                builder.json().try_init()
            } else {
                builder.try_init()
            }
        }
        None => {
            if config.json {
                builder.json().try_init()
            } else {
                builder.try_init()
            }
        }
    };
    result.map_err(|e| anyhow::anyhow!("日志系统初始化失败: {}", e))
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
