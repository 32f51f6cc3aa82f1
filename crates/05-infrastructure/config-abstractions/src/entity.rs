//! 流水线配置实体

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// 数据列类型
///
/// 沿用 `schema.yaml` 中的 pandas dtype 名称
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 浮点数列
    Float64,
    /// 整数列
    Int64,
    /// 布尔列
    Bool,
    /// 任意文本列
    Object,
}

impl ColumnType {
    /// dtype 名称
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Float64 => "float64",
            Self::Int64 => "int64",
            Self::Bool => "bool",
            Self::Object => "object",
        }
    }

    /// 声明为 `self` 的列能否容纳推断类型为 `actual` 的数据
    pub fn accepts(&self, actual: ColumnType) -> bool {
        match (self, actual) {
            (Self::Object, _) => true,
            (Self::Float64, Self::Float64 | Self::Int64) => true,
            (expected, actual) => *expected == actual,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 数据验证阶段配置
///
/// 由配置提供者在每次运行时构建一次，原样交给验证组件
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataValidationConfig {
    /// 阶段产物根目录
    pub root_dir: PathBuf,
    /// 验证状态文件
    pub status_file: PathBuf,
    /// 待验证的数据集文件
    pub unzip_data_dir: PathBuf,
    /// 详细验证报告文件（可选）
    pub report_file: Option<PathBuf>,
    /// 列名 -> 列类型
    pub all_schema: BTreeMap<String, ColumnType>,
    /// 目标列名（可选）
    pub target_column: Option<String>,
}
