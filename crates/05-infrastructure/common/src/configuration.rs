//! 配置节定义

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// 配置节
///
/// 一个配置路径下的扁平键值集合，键保持原始大小写。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigSection {
    /// 配置数据
    pub data: BTreeMap<String, Value>,
}

impl ConfigSection {
    /// 创建新的配置节
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 对象创建配置节
    pub fn from_object(object: &Map<String, Value>) -> Self {
        Self {
            data: object
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    /// 插入配置项
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.data.insert(key.into(), value);
    }

    /// 获取配置项
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// 忽略 ASCII 大小写获取配置项
    pub fn get_ignore_case(&self, key: &str) -> Option<&Value> {
        self.data.get(key).or_else(|| {
            self.data
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v)
        })
    }

    /// 忽略 ASCII 大小写检查键是否存在
    pub fn contains_key_ignore_case(&self, key: &str) -> bool {
        self.get_ignore_case(key).is_some()
    }

    /// 配置项数量
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// 是否为空
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// 所有键名转为小写后的新配置节
    ///
    /// 大小写冲突时保留先出现的键（按键名排序）。
    pub fn with_lowercase_keys(&self) -> Self {
        let mut normalized = BTreeMap::new();
        for (key, value) in &self.data {
            normalized
                .entry(key.to_ascii_lowercase())
                .or_insert_with(|| value.clone());
        }
        Self { data: normalized }
    }

    /// 绑定到具体类型
    pub fn bind<T>(&self) -> Result<T, ConfigError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let value = Value::Object(
            self.data
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        );

        serde_json::from_value(value).map_err(|e| ConfigError::SerializationError { source: e })
    }
}
