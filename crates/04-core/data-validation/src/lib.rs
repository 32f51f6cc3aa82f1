//! # Data Validation
//!
//! 数据验证组件：按 `schema.yaml` 中声明的列结构检查数据集，
//! 并记录下游阶段读取的验证状态文件。
//!
//! ## 核心接口
//!
//! - [`ColumnValidator`] - 列验证接口
//! - [`DataValidation`] - 基于 CSV 数据集的验证组件
//! - [`ColumnValidationReport`] - 验证报告

pub mod error;
pub mod profile;
pub mod report;
pub mod validator;

pub use error::*;
pub use profile::*;
pub use report::*;
pub use validator::*;
