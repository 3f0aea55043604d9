// ==========================================
// 物料管理助手 - 物料导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::import::ImportReport;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::DecodedTable;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// ComponentImporter Trait
// ==========================================
// 用途: 物料导入主接口
// 实现者: ComponentImporterImpl
#[async_trait]
pub trait ComponentImporter: Send + Sync {
    /// 从 CSV 文件导入物料
    ///
    /// # 返回
    /// - Ok(ImportReport): 逐行结果与汇总（部分行失败仍返回 Ok）
    /// - Err: 文件级错误（读取/解码失败、空文件、缺少必需表头）
    ///
    /// # 导入流程
    /// 1. 编码检测与 CSV 解码
    /// 2. 表头映射与必需字段校验
    /// 3. 逐行校验并落库（每行独立提交）
    /// 4. 登记成功行出现的材质
    async fn import_from_csv<P: AsRef<Path> + Send>(&self, file_path: P)
        -> ImportResult<ImportReport>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser
pub trait FileParser: Send + Sync {
    /// 解析文件为二维字符串表（第 0 行为表头）
    fn parse_to_table(&self, file_path: &Path) -> ImportResult<DecodedTable>;
}
