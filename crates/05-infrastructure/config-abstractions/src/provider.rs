//! 配置提供者抽象接口

use async_trait::async_trait;
use infrastructure_common::{ConfigError, ConfigSection};
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// 文件配置提供者默认优先级
pub const FILE_PROVIDER_PRIORITY: i32 = 100;

/// 环境变量配置提供者默认优先级
pub const ENVIRONMENT_PROVIDER_PRIORITY: i32 = 200;

/// 配置提供者 trait
///
/// 定义从不同数据源获取配置的统一接口，键使用 `.` 分隔的嵌套路径
#[async_trait]
pub trait ConfigProvider: Send + Sync {
    /// 获取配置值
    async fn get_configuration(&self, key: &str) -> Result<Value, ConfigError>;

    /// 获取配置节
    async fn get_section(&self, section_name: &str) -> Result<ConfigSection, ConfigError>;

    /// 重新加载配置
    async fn reload(&mut self) -> Result<(), ConfigError>;

    /// 检查配置键是否存在
    async fn contains_key(&self, key: &str) -> Result<bool, ConfigError>;

    /// 获取所有配置键
    async fn get_all_keys(&self) -> Result<Vec<String>, ConfigError>;

    /// 获取提供者名称
    fn name(&self) -> &str;

    /// 获取提供者优先级，数值越高优先级越高
    fn priority(&self) -> i32 {
        0
    }
}

/// 文件配置提供者 trait
#[async_trait]
pub trait FileConfigProvider: ConfigProvider {
    /// 获取文件路径
    fn file_path(&self) -> &Path;

    /// 检查文件是否存在
    async fn file_exists(&self) -> bool;

    /// 获取文件最后修改时间
    async fn last_modified(&self) -> Result<std::time::SystemTime, ConfigError>;
}

/// 环境变量配置提供者 trait
#[async_trait]
pub trait EnvironmentConfigProvider: ConfigProvider {
    /// 获取环境变量前缀
    fn prefix(&self) -> &str;

    /// 获取分隔符
    fn separator(&self) -> &str;

    /// 获取所有匹配的环境变量
    async fn get_matching_env_vars(&self) -> Result<HashMap<String, String>, ConfigError>;
}
