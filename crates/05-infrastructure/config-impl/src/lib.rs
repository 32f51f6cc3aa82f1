//! # Configuration Implementation
//!
//! 配置管理的具体实现，提供各种配置源和管理功能。
//!
//! ## 主要组件
//!
//! - [`ConfigurationManager`] - 流水线配置管理器
//! - [`LayeredConfigManager`] - 按优先级合并多个配置源
//! - [`StructuredFileConfigProvider`] - YAML / JSON / TOML 配置提供者
//! - [`EnvironmentConfigProviderImpl`] - 环境变量配置提供者

pub mod configuration;
pub mod directories;
pub mod manager;
pub mod providers;

pub use configuration::*;
pub use directories::*;
pub use manager::*;
pub use providers::*;

#[cfg(test)]
mod tests;
