// ==========================================
// 物料管理助手 - 表头映射与行校验
// ==========================================
// 职责: 表头标签 → 列号映射；数据行 → NewComponent 或拒绝原因
// 约束: 按标签文本匹配，与列顺序无关；多余列忽略
// ==========================================

use crate::domain::component::NewComponent;
use crate::domain::import::RowRejection;
use crate::importer::error::{ImportError, ImportResult};
use std::collections::HashMap;

/// 必需表头标签（顺序固定: 外径, 壁厚, 材质, 物料码）
pub const DEFAULT_REQUIRED_HEADERS: [&str; 4] = ["外径", "壁厚", "材质", "物料码"];

/// 单次导入内构建一次的列映射
#[derive(Debug, Clone)]
pub struct FieldMapper {
    /// 表头列数
    width: usize,
    /// 必需字段对应的列号，顺序同 required_headers
    columns: [usize; 4],
}

impl FieldMapper {
    /// 根据表头行构建映射
    ///
    /// # 规则
    /// - 表头单元格先 trim；重复标签以最后一次出现为准
    /// - 任一必需标签缺失 → MissingFields（文件级错误）
    pub fn from_headers(headers: &[String], required: &[String; 4]) -> ImportResult<Self> {
        let index: HashMap<&str, usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| (h.trim(), i))
            .collect();

        let missing: Vec<String> = required
            .iter()
            .filter(|label| !index.contains_key(label.as_str()))
            .cloned()
            .collect();
        if !missing.is_empty() {
            return Err(ImportError::MissingFields(missing));
        }

        let mut columns = [0usize; 4];
        for (slot, label) in columns.iter_mut().zip(required.iter()) {
            *slot = index[label.as_str()];
        }

        Ok(Self {
            width: headers.len(),
            columns,
        })
    }

    /// 校验并映射一行数据
    ///
    /// # 返回
    /// - Err(ColumnCountMismatch): 列数少于表头
    /// - Err(EmptyField): 任一必需字段 trim 后为空
    pub fn map_row(
        &self,
        row: &[String],
        required: &[String; 4],
    ) -> Result<NewComponent, RowRejection> {
        if row.len() < self.width {
            return Err(RowRejection::ColumnCountMismatch {
                expected: self.width,
                actual: row.len(),
            });
        }

        let [outer_diameter, wall_thickness, material, code] =
            self.columns.map(|col| row[col].trim().to_string());

        let empty: Vec<String> = [&outer_diameter, &wall_thickness, &material, &code]
            .iter()
            .zip(required.iter())
            .filter(|(value, _)| value.is_empty())
            .map(|(_, label)| label.clone())
            .collect();
        if !empty.is_empty() {
            return Err(RowRejection::EmptyField { fields: empty });
        }

        Ok(NewComponent {
            outer_diameter,
            wall_thickness,
            material,
            code,
        })
    }
}
