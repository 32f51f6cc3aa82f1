//! 配置管理器抽象接口

use crate::entity::DataValidationConfig;
use crate::provider::ConfigProvider;
use async_trait::async_trait;
use infrastructure_common::{ConfigError, ConfigSection};
use serde::Deserialize;
use serde_json::Value;

/// 配置管理器 trait
///
/// 提供配置的统一管理接口，支持多个配置源
#[async_trait]
pub trait ConfigManager: Send + Sync {
    /// 注册配置提供者
    async fn register_provider(&mut self, provider: Box<dyn ConfigProvider>) -> Result<(), ConfigError>;

    /// 移除配置提供者
    async fn unregister_provider(&mut self, provider_name: &str) -> Result<(), ConfigError>;

    /// 获取配置值
    async fn get_configuration(&self, key: &str) -> Result<Value, ConfigError>;

    /// 获取配置节
    async fn get_section(&self, section_name: &str) -> Result<ConfigSection, ConfigError>;

    /// 绑定配置到指定类型
    async fn bind_configuration<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: for<'de> Deserialize<'de> + Send + 'static;

    /// 重新加载所有配置
    async fn reload_all(&mut self) -> Result<(), ConfigError>;

    /// 已注册提供者名称（按优先级排序）
    fn provider_names(&self) -> Vec<String>;
}

/// 数据验证配置提供者 trait
///
/// 流水线阶段通过它获取 "data validation" 范围的配置对象
#[async_trait]
pub trait DataValidationConfigProvider: Send + Sync {
    /// 错误类型
    type Error: std::error::Error + Send + Sync + 'static;

    /// 获取数据验证配置
    async fn get_data_validation_config(&self) -> Result<DataValidationConfig, Self::Error>;
}
