//! # Wine Rater Pipeline
//!
//! 流水线阶段定义与阶段运行器。
//!
//! ## 核心接口
//!
//! - [`PipelineStage`] / [`run_stage`] - 阶段接口与统一的日志包装
//! - [`DataValidationPipeline`] - 数据验证阶段
//! - [`init_logging`] - 进程级日志初始化

pub mod data_validation;
pub mod logging;
pub mod stage;

pub use data_validation::*;
pub use logging::*;
pub use stage::*;

#[cfg(test)]
mod tests;
