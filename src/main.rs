// ==========================================
// 物料管理助手 - Tauri 主入口
// ==========================================
// 技术栈: Tauri + Rust + SQLite
// ==========================================

// 禁止控制台窗口 (Windows)
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use material_assistant::config::AppConfig;
use material_assistant::{logging, AppState};

#[cfg(feature = "tauri-app")]
fn main() {
    use material_assistant::app::tauri_commands::*;

    let config = AppConfig::load().expect("无法加载配置");

    // 初始化日志系统
    if let Err(e) = logging::init(&config.log) {
        eprintln!("{}", e);
    }

    tracing::info!("==================================================");
    tracing::info!("{}", material_assistant::APP_NAME);
    tracing::info!("系统版本: {}", material_assistant::VERSION);
    tracing::info!("==================================================");
    tracing::info!("使用数据库: {}", config.db_path);

    let app_state = AppState::new(&config).expect("无法初始化AppState");
    tracing::info!("AppState初始化成功，启动Tauri应用...");

    tauri::Builder::default()
        .manage(app_state)
        .invoke_handler(tauri::generate_handler![
            // 物料
            search_components,
            add_component,
            delete_component,
            edit_component,
            // 材质
            add_material,
            get_all_materials,
            // 导入
            import_components,
            upload_file,
        ])
        .run(tauri::generate_context!())
        .expect("启动Tauri应用失败");

    tracing::info!("应用程序关闭");
}

#[cfg(not(feature = "tauri-app"))]
fn main() {
    println!("==================================================");
    println!("{}", material_assistant::APP_NAME);
    println!("系统版本: {}", material_assistant::VERSION);
    println!("==================================================");

    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    if let Err(e) = logging::init(&config.log) {
        eprintln!("{}", e);
    }

    // 无窗口模式: 仅初始化数据库，可选导入命令行给出的 CSV 文件
    let state = match AppState::new(&config) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    };
    println!("数据库: {}", state.db_path);

    let files: Vec<String> = std::env::args().skip(1).collect();
    if files.is_empty() {
        println!();
        println!("此可执行文件的窗口界面需要启用 tauri-app 特性");
        println!("使用: cargo run --features tauri-app");
        println!("或: material-assistant <file.csv>... 直接导入");
    } else {
        let runtime = match tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
        {
            Ok(rt) => rt,
            Err(e) => {
                eprintln!("无法创建运行时: {}", e);
                std::process::exit(1);
            }
        };
        for file in files {
            let summary = runtime.block_on(state.import_api.import_components(&file));
            println!("{}:\n{}\n", file, summary);
        }
    }

    state.shutdown();
}
