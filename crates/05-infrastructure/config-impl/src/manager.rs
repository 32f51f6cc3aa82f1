//! 分层配置管理器实现

use async_trait::async_trait;
use config_abstractions::{ConfigManager, ConfigProvider};
use infrastructure_common::{ConfigError, ConfigSection};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// 分层配置管理器
///
/// 多个配置源按优先级叠加：同一个键以优先级最高的配置源为准，
/// 配置节按键合并。单键查找结果会被缓存，配置源变化时整体失效。
pub struct LayeredConfigManager {
    name: String,
    /// 按优先级从高到低排列，同优先级按注册顺序
    layers: Vec<Box<dyn ConfigProvider>>,
    lookups: RwLock<HashMap<String, Value>>,
    cache_enabled: bool,
}

impl std::fmt::Debug for LayeredConfigManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayeredConfigManager")
            .field("name", &self.name)
            .field("layers", &self.provider_names())
            .field("cache_enabled", &self.cache_enabled)
            .finish()
    }
}

impl LayeredConfigManager {
    /// 创建空的配置管理器
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            layers: Vec::new(),
            lookups: RwLock::new(HashMap::new()),
            cache_enabled: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// 开启或关闭单键查找缓存
    pub fn set_cache_enabled(&mut self, enabled: bool) {
        self.cache_enabled = enabled;
    }

    /// 使全部缓存失效
    pub async fn clear_cache(&self) {
        self.lookups.write().await.clear();
        debug!("[{}] 查找缓存已失效", self.name);
    }

    /// 已缓存的键数量
    pub async fn cached_key_count(&self) -> usize {
        self.lookups.read().await.len()
    }

    pub fn provider_count(&self) -> usize {
        self.layers.len()
    }

    /// 读取可缺省的配置值
    pub async fn get_optional(&self, key: &str) -> Result<Option<Value>, ConfigError> {
        match self.get_configuration(key).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.is_key_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn cached(&self, key: &str) -> Option<Value> {
        if !self.cache_enabled {
            return None;
        }
        self.lookups.read().await.get(key).cloned()
    }

    async fn remember(&self, key: &str, value: &Value) {
        if self.cache_enabled {
            self.lookups
                .write()
                .await
                .insert(key.to_string(), value.clone());
        }
    }
}

#[async_trait]
impl ConfigManager for LayeredConfigManager {
    async fn register_provider(
        &mut self,
        provider: Box<dyn ConfigProvider>,
    ) -> Result<(), ConfigError> {
        let priority = provider.priority();
        let index = self
            .layers
            .partition_point(|layer| layer.priority() >= priority);
        info!(
            "[{}] 注册配置源 {} (优先级 {}, 位置 {})",
            self.name,
            provider.name(),
            priority,
            index
        );

        self.layers.insert(index, provider);
        self.clear_cache().await;
        Ok(())
    }

    async fn unregister_provider(&mut self, provider_name: &str) -> Result<(), ConfigError> {
        let Some(index) = self
            .layers
            .iter()
            .position(|layer| layer.name() == provider_name)
        else {
            warn!("[{}] 未注册的配置源: {}", self.name, provider_name);
            return Err(ConfigError::key_not_found(provider_name));
        };

        self.layers.remove(index);
        info!("[{}] 已移除配置源: {}", self.name, provider_name);
        self.clear_cache().await;
        Ok(())
    }

    async fn get_configuration(&self, key: &str) -> Result<Value, ConfigError> {
        if let Some(value) = self.cached(key).await {
            debug!("[{}] 缓存命中: {}", self.name, key);
            return Ok(value);
        }

        for layer in &self.layers {
            match layer.get_configuration(key).await {
                Ok(value) => {
                    debug!("[{}] {} 由 {} 提供", self.name, key, layer.name());
                    self.remember(key, &value).await;
                    return Ok(value);
                }
                Err(e) if e.is_key_not_found() => {}
                Err(e) => warn!("[{}] 配置源 {} 读取 {} 失败: {}", self.name, layer.name(), key, e),
            }
        }

        Err(ConfigError::key_not_found(key))
    }

    async fn get_section(&self, section_name: &str) -> Result<ConfigSection, ConfigError> {
        let mut merged = ConfigSection::new();

        for layer in &self.layers {
            let section = match layer.get_section(section_name).await {
                Ok(section) => section,
                Err(e) if e.is_key_not_found() => continue,
                Err(e) => {
                    warn!("[{}] 配置源 {} 读取配置节 {} 失败: {}", self.name, layer.name(), section_name, e);
                    continue;
                }
            };

            // 高优先级的键已存在时（忽略大小写）保留高优先级的值
            for (key, value) in section.data {
                if !merged.contains_key_ignore_case(&key) {
                    merged.insert(key, value);
                }
            }
        }

        if merged.is_empty() {
            return Err(ConfigError::key_not_found(section_name));
        }
        Ok(merged)
    }

    async fn bind_configuration<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: for<'de> Deserialize<'de> + Send + 'static,
    {
        let value = self.get_configuration(key).await?;
        serde_json::from_value(value).map_err(|source| {
            warn!(
                "[{}] {} 无法绑定为 {}: {}",
                self.name,
                key,
                std::any::type_name::<T>(),
                source
            );
            ConfigError::SerializationError { source }
        })
    }

    async fn reload_all(&mut self) -> Result<(), ConfigError> {
        let mut failures = Vec::new();
        for layer in &mut self.layers {
            if let Err(e) = layer.reload().await {
                failures.push(format!("{}: {}", layer.name(), e));
            }
        }
        self.clear_cache().await;

        if failures.is_empty() {
            info!("[{}] {} 个配置源已重新加载", self.name, self.layers.len());
            return Ok(());
        }

        warn!("[{}] 重新加载失败: {}", self.name, failures.join("; "));
        Err(ConfigError::ReloadError {
            message: failures.join("; "),
        })
    }

    fn provider_names(&self) -> Vec<String> {
        self.layers
            .iter()
            .map(|layer| layer.name().to_string())
            .collect()
    }
}
