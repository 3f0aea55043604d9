// ==========================================
// 物料管理助手 - 物料导入器实现
// ==========================================
// 流程: 解析 → 表头映射 → 逐行校验/落库 → 材质登记 → 汇总
// 约束: 行按顺序逐条处理，每行独立提交；单行失败不影响后续行
// ==========================================

use crate::config::ImportConfig;
use crate::domain::import::{ImportReport, RowRejection};
use crate::importer::component_importer_trait::{ComponentImporter, FileParser};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::DecodedTable;
use crate::repository::ComponentImportRepository;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

// ==========================================
// ComponentImporterImpl - 物料导入器实现
// ==========================================
pub struct ComponentImporterImpl<R>
where
    R: ComponentImportRepository,
{
    // 数据访问层
    import_repo: R,

    // 导入配置（必需表头）
    config: ImportConfig,

    // 文件解析器
    file_parser: Box<dyn FileParser>,
}

impl<R> ComponentImporterImpl<R>
where
    R: ComponentImportRepository,
{
    pub fn new(import_repo: R, config: ImportConfig, file_parser: Box<dyn FileParser>) -> Self {
        Self {
            import_repo,
            config,
            file_parser,
        }
    }

    /// 处理已解码的表格（第 0 行为表头）
    pub fn import_table(&self, table: DecodedTable) -> ImportResult<ImportReport> {
        let start = Instant::now();
        let required = &self.config.required_headers;

        let mut rows = table.rows.into_iter();
        let headers = rows.next().ok_or(ImportError::EmptyFile)?;
        let data_rows: Vec<Vec<String>> = rows.collect();
        if data_rows.is_empty() {
            return Err(ImportError::EmptyFile);
        }

        info!(headers = ?headers, "解析表头");
        let mapper = FieldMapper::from_headers(&headers, required)?;

        let mut report = ImportReport::new(table.encoding.name(), data_rows.len());
        for (idx, row) in data_rows.iter().enumerate() {
            let row_number = idx + 1;
            let component = match mapper.map_row(row, required) {
                Ok(component) => component,
                Err(rejection) => {
                    debug!(row = row_number, reason = %rejection, "行校验失败");
                    report.record_failure(row_number, rejection);
                    continue;
                }
            };

            match self.import_repo.insert_component(&component) {
                Ok(_) => report.record_success(&component.material),
                Err(e) => {
                    warn!(row = row_number, code = %component.code, error = %e, "物料落库失败");
                    report.record_failure(
                        row_number,
                        RowRejection::Persistence {
                            message: e.to_string(),
                        },
                    );
                }
            }
        }

        let codes: Vec<&str> = report.materials.iter().map(String::as_str).collect();
        let registration = self.import_repo.register_materials(&codes);
        debug!(
            inserted = registration.inserted,
            skipped_duplicates = registration.skipped_duplicates,
            failed = registration.failed,
            "材质登记完成"
        );
        report.material_registration = registration;
        report.elapsed = start.elapsed();

        Ok(report)
    }
}

#[async_trait::async_trait]
impl<R> ComponentImporter for ComponentImporterImpl<R>
where
    R: ComponentImportRepository,
{
    #[instrument(skip(self, file_path))]
    async fn import_from_csv<P: AsRef<Path> + Send>(
        &self,
        file_path: P,
    ) -> ImportResult<ImportReport> {
        let path = file_path.as_ref();
        info!(file_path = %path.display(), "开始导入物料");

        let table = self.file_parser.parse_to_table(path)?;
        let report = self.import_table(table)?;

        info!(
            file_path = %path.display(),
            total = report.total_rows,
            succeeded = report.succeeded,
            failed = report.failed(),
            elapsed_ms = report.elapsed.as_millis() as u64,
            "物料导入完成"
        );
        Ok(report)
    }
}
