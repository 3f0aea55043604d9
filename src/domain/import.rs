// ==========================================
// 物料管理助手 - 导入结果模型
// ==========================================
// 职责: 描述一次 CSV 导入的逐行结果与汇总
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::time::Duration;

/// 被拒绝行的原因
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RowRejection {
    /// 列数少于表头列数
    ColumnCountMismatch { expected: usize, actual: usize },
    /// 必需字段为空（值为字段标签）
    EmptyField { fields: Vec<String> },
    /// 落库失败（如物料码重复）
    Persistence { message: String },
}

impl fmt::Display for RowRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowRejection::ColumnCountMismatch { expected, actual } => {
                write!(f, "格式错误: 列数不正确 (期望 {}, 实际 {})", expected, actual)
            }
            RowRejection::EmptyField { fields } => {
                write!(f, "存在空字段: {}", fields.join(", "))
            }
            RowRejection::Persistence { message } => write!(f, "{}", message),
        }
    }
}

/// 材质登记结果（尽力而为，重复编码计数而不报错）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialRegistration {
    pub inserted: usize,
    pub skipped_duplicates: usize,
    pub failed: usize,
}

/// 单次导入报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    /// 检测到的文件编码
    pub encoding: String,
    /// 数据行数（不含表头）
    pub total_rows: usize,
    pub succeeded: usize,
    /// 失败行（行号从 1 开始，按行号有序）
    pub failures: BTreeMap<usize, RowRejection>,
    /// 成功行中出现过的材质
    pub materials: BTreeSet<String>,
    pub material_registration: MaterialRegistration,
    #[serde(skip)]
    pub elapsed: Duration,
}

impl ImportReport {
    pub fn new(encoding: impl Into<String>, total_rows: usize) -> Self {
        Self {
            encoding: encoding.into(),
            total_rows,
            succeeded: 0,
            failures: BTreeMap::new(),
            materials: BTreeSet::new(),
            material_registration: MaterialRegistration::default(),
            elapsed: Duration::ZERO,
        }
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    pub fn record_success(&mut self, material: &str) {
        self.succeeded += 1;
        self.materials.insert(material.to_string());
    }

    pub fn record_failure(&mut self, row: usize, reason: RowRejection) {
        self.failures.insert(row, reason);
    }
}

/// 面向用户的多行汇总文本
impl fmt::Display for ImportReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "导入完成\n总行数: {}\n成功: {}\n失败: {}",
            self.total_rows,
            self.succeeded,
            self.failed()
        )?;
        if !self.failures.is_empty() {
            writeln!(f, "\n\n失败行详情:")?;
            for (row, reason) in &self.failures {
                writeln!(f, "第 {} 行: {}", row, reason)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_without_failures() {
        let mut report = ImportReport::new("UTF-8", 2);
        report.record_success("304");
        report.record_success("304");

        assert_eq!(report.to_string(), "导入完成\n总行数: 2\n成功: 2\n失败: 0");
        assert_eq!(report.materials.len(), 1);
    }

    #[test]
    fn test_summary_lists_failures_in_row_order() {
        let mut report = ImportReport::new("GBK", 3);
        report.record_failure(
            3,
            RowRejection::Persistence {
                message: "唯一约束违反".to_string(),
            },
        );
        report.record_failure(
            1,
            RowRejection::EmptyField {
                fields: vec!["物料码".to_string()],
            },
        );
        report.record_success("16Mn");

        let text = report.to_string();
        assert!(text.starts_with("导入完成\n总行数: 3\n成功: 1\n失败: 2"));
        let first = text.find("第 1 行").unwrap();
        let third = text.find("第 3 行").unwrap();
        assert!(first < third);
        assert!(text.contains("存在空字段: 物料码"));
    }
}
