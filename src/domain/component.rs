// ==========================================
// 物料管理助手 - 物料/材质领域模型
// ==========================================
// 对齐: components / materials 表
// 约束: code 全局唯一且非空；(外径, 壁厚, 材质) 仅为普通索引
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// Component - 物料（管材部件）
// ==========================================
// 示例: φ22*5 / 5 / 304 / 81383220
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    pub id: i64,
    pub outer_diameter: String, // 外径（如 "φ22*5"）
    pub wall_thickness: String, // 壁厚
    pub material: String,       // 材质（如 304），与 Material.code 按字符串关联
    pub code: String,           // 物料码（唯一）

    // ===== 审计字段 =====
    #[serde(rename = "created_at")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updated_at")]
    pub updated_at: DateTime<Utc>,
}

/// 新增/编辑物料时的输入（不含主键与审计字段）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComponent {
    pub outer_diameter: String,
    pub wall_thickness: String,
    pub material: String,
    pub code: String,
}

impl NewComponent {
    pub fn new(
        outer_diameter: impl Into<String>,
        wall_thickness: impl Into<String>,
        material: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self {
            outer_diameter: outer_diameter.into(),
            wall_thickness: wall_thickness.into(),
            material: material.into(),
            code: code.into(),
        }
    }

    /// 去除各字段首尾空白
    pub fn trimmed(&self) -> Self {
        Self {
            outer_diameter: self.outer_diameter.trim().to_string(),
            wall_thickness: self.wall_thickness.trim().to_string(),
            material: self.material.trim().to_string(),
            code: self.code.trim().to_string(),
        }
    }

    /// 返回为空的字段名（中文标签）
    pub fn empty_fields(&self) -> Vec<&'static str> {
        [
            ("外径", &self.outer_diameter),
            ("壁厚", &self.wall_thickness),
            ("材质", &self.material),
            ("物料码", &self.code),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(label, _)| label)
        .collect()
    }
}

// ==========================================
// ComponentQuery - 物料查询条件
// ==========================================
// 规则:
// - code 非空时优先，忽略其余条件
// - 其余字段为空串视为“不过滤”，而非匹配空串
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentQuery {
    #[serde(default)]
    pub outer_diameter: Option<String>,
    #[serde(default)]
    pub wall_thickness: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl ComponentQuery {
    pub fn by_code(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }

    /// 非空的物料码（已 trim）
    pub fn code(&self) -> Option<&str> {
        non_empty(&self.code)
    }

    /// 组合过滤条件: (列名, 值)，仅包含非空字段
    pub fn filters(&self) -> Vec<(&'static str, &str)> {
        let mut filters = Vec::new();
        if let Some(v) = non_empty(&self.outer_diameter) {
            filters.push(("outer_diameter", v));
        }
        if let Some(v) = non_empty(&self.wall_thickness) {
            filters.push(("wall_thickness", v));
        }
        if let Some(v) = non_empty(&self.material) {
            filters.push(("material", v));
        }
        filters
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// ==========================================
// Material - 材质编码
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Material {
    pub id: i64,
    pub code: String,   // 材质编码（唯一）
    pub remark: String, // 备注（可为空串）
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_code_takes_priority() {
        let query = ComponentQuery {
            outer_diameter: Some("φ22*5".to_string()),
            code: Some("  81383220 ".to_string()),
            ..ComponentQuery::default()
        };
        assert_eq!(query.code(), Some("81383220"));
    }

    #[test]
    fn test_query_filters_skip_empty_fields() {
        let query = ComponentQuery {
            outer_diameter: Some("".to_string()),
            wall_thickness: Some("5".to_string()),
            material: Some("  ".to_string()),
            code: None,
        };
        assert_eq!(query.code(), None);
        assert_eq!(query.filters(), vec![("wall_thickness", "5")]);
        assert!(ComponentQuery::default().filters().is_empty());
    }

    #[test]
    fn test_new_component_empty_fields() {
        let c = NewComponent::new("φ22*5", " ", "304", "");
        assert_eq!(c.empty_fields(), vec!["壁厚", "物料码"]);
        assert!(NewComponent::new("a", "b", "c", "d").empty_fields().is_empty());
    }
}
