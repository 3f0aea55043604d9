// ==========================================
// 物料管理助手 - Tauri 命令（按域拆分）
// ==========================================
// 职责: Tauri 命令定义，连接前端与后端 API
// ==========================================

#![cfg(feature = "tauri-app")]

mod common;
mod component;
mod import;
mod material;

pub use component::*;
pub use import::*;
pub use material::*;
