//! 列验证报告

use crate::profile::DatasetProfile;
use chrono::{DateTime, Utc};
use config_abstractions::ColumnType;
use serde::Serialize;
use std::collections::BTreeMap;

/// 列类型不一致
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeMismatch {
    pub column: String,
    pub expected: ColumnType,
    pub actual: ColumnType,
}

/// 列验证报告
#[derive(Debug, Clone, Serialize)]
pub struct ColumnValidationReport {
    /// 验证是否通过
    pub status: bool,
    /// 数据中存在但未在数据结构中声明的列
    pub unknown_columns: Vec<String>,
    /// 数据结构中声明但数据中缺失的列（仅警告）
    pub missing_columns: Vec<String>,
    /// 类型不一致的列
    pub type_mismatches: Vec<TypeMismatch>,
    /// 目标列是否存在，未配置目标列时为 `None`
    pub target_column_present: Option<bool>,
    /// 数据行数
    pub row_count: usize,
    /// 验证时间
    pub validated_at: DateTime<Utc>,
}

impl ColumnValidationReport {
    /// 将数据集画像与数据结构比对
    pub fn evaluate(
        profile: &DatasetProfile,
        schema: &BTreeMap<String, ColumnType>,
        target_column: Option<&str>,
    ) -> Self {
        let mut unknown_columns = Vec::new();
        let mut type_mismatches = Vec::new();

        for column in &profile.columns {
            match schema.get(&column.name) {
                None => unknown_columns.push(column.name.clone()),
                Some(expected) if !expected.accepts(column.inferred_type) => {
                    type_mismatches.push(TypeMismatch {
                        column: column.name.clone(),
                        expected: *expected,
                        actual: column.inferred_type,
                    });
                }
                Some(_) => {}
            }
        }

        let missing_columns = schema
            .keys()
            .filter(|name| profile.column(name).is_none())
            .cloned()
            .collect();

        let target_column_present = target_column.map(|name| profile.column(name).is_some());

        let status = unknown_columns.is_empty()
            && type_mismatches.is_empty()
            && target_column_present != Some(false);

        Self {
            status,
            unknown_columns,
            missing_columns,
            type_mismatches,
            target_column_present,
            row_count: profile.row_count,
            validated_at: Utc::now(),
        }
    }

    /// 状态文件内容，下游阶段按此格式读取
    pub fn status_line(&self) -> String {
        format!(
            "Validation status: {}",
            if self.status { "True" } else { "False" }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> BTreeMap<String, ColumnType> {
        BTreeMap::from([
            ("alcohol".to_string(), ColumnType::Float64),
            ("pH".to_string(), ColumnType::Float64),
            ("quality".to_string(), ColumnType::Int64),
        ])
    }

    fn evaluate(csv: &str, target: Option<&str>) -> ColumnValidationReport {
        let profile = DatasetProfile::from_csv(csv.as_bytes()).unwrap();
        ColumnValidationReport::evaluate(&profile, &schema(), target)
    }

    #[test]
    fn test_matching_dataset_passes() {
        let report = evaluate("alcohol,pH,quality\n9.4,3.51,5\n", Some("quality"));
        assert!(report.status);
        assert_eq!(report.target_column_present, Some(true));
        assert_eq!(report.row_count, 1);
        assert_eq!(report.status_line(), "Validation status: True");
    }

    #[test]
    fn test_unknown_column_fails_regardless_of_position() {
        let report = evaluate("colour,alcohol,pH,quality\nred,9.4,3.51,5\n", None);
        assert!(!report.status);
        assert_eq!(report.unknown_columns, vec!["colour"]);
        assert_eq!(report.status_line(), "Validation status: False");
    }

    #[test]
    fn test_missing_column_is_only_reported() {
        let report = evaluate("alcohol,quality\n9.4,5\n", None);
        assert!(report.status);
        assert_eq!(report.missing_columns, vec!["pH"]);
    }

    #[test]
    fn test_type_mismatch_fails() {
        let report = evaluate("alcohol,pH,quality\n9.4,3.51,5.5\n", None);
        assert!(!report.status);
        assert_eq!(
            report.type_mismatches,
            vec![TypeMismatch {
                column: "quality".to_string(),
                expected: ColumnType::Int64,
                actual: ColumnType::Float64,
            }]
        );
    }

    #[test]
    fn test_blank_cell_in_integer_column_fails() {
        let report = evaluate("alcohol,pH,quality\n9.4,3.51,5\n9.8,3.2,\n", None);
        assert!(!report.status);
        assert_eq!(report.type_mismatches[0].column, "quality");
        assert_eq!(report.type_mismatches[0].actual, ColumnType::Float64);
    }

    #[test]
    fn test_integer_data_in_float_column() {
        let report = evaluate("alcohol,pH,quality\n9,3,5\n", None);
        assert!(report.status, "{:?}", report.type_mismatches);
    }

    #[test]
    fn test_missing_target_column_fails() {
        let report = evaluate("alcohol,pH\n9.4,3.51\n", Some("quality"));
        assert!(!report.status);
        assert_eq!(report.target_column_present, Some(false));
    }
}
