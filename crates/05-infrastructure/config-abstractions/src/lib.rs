//! # Configuration Abstractions
//!
//! 配置管理抽象层，定义配置管理的核心接口和约定。
//!
//! ## 核心接口
//!
//! - [`ConfigProvider`] - 配置提供者接口
//! - [`ConfigManager`] - 配置管理器接口
//! - [`DataValidationConfigProvider`] - 数据验证阶段配置来源
//! - [`GenericConfigValidator`] - 配置节验证

pub mod entity;
pub mod manager;
pub mod provider;
pub mod validator;

pub use entity::*;
pub use manager::*;
pub use provider::*;
pub use validator::*;
