//! # Infrastructure Common
//!
//! 这个 crate 提供了 Wine Rater 流水线基础设施层的公共类型。
//!
//! ## 核心组件
//!
//! - [`Component`] - 组件基础 trait
//! - [`ConfigSection`] - 配置节
//! - [`ConfigError`] / [`ValidationError`] - 错误类型

pub mod component;
pub mod configuration;
pub mod errors;

pub use component::*;
pub use configuration::*;
pub use errors::*;
