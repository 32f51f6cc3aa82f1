//! 配置提供者实现

use async_trait::async_trait;
use config_abstractions::{
    ConfigProvider, EnvironmentConfigProvider as EnvironmentConfigProviderTrait,
    FileConfigProvider, ENVIRONMENT_PROVIDER_PRIORITY, FILE_PROVIDER_PRIORITY,
};
use infrastructure_common::{ConfigError, ConfigSection};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, warn};

/// 环境变量默认前缀
pub const DEFAULT_ENV_PREFIX: &str = "WINE_RATER";

/// 环境变量默认分隔符
pub const DEFAULT_ENV_SEPARATOR: &str = "__";

/// 配置文件格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
    Toml,
}

impl FileFormat {
    /// 根据扩展名判断格式
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            _ => Err(ConfigError::TypeConversionError {
                message: format!("无法识别的配置文件格式: {}", path.display()),
            }),
        }
    }

    /// 内容是否只有空白或注释
    fn is_blank(self, content: &str) -> bool {
        content.lines().map(str::trim).all(|line| {
            line.is_empty() || (self != Self::Json && line.starts_with('#'))
        })
    }

    fn parse(self, path: &Path, content: &str) -> Result<Value, ConfigError> {
        let parsed = match self {
            Self::Yaml => serde_yaml::from_str::<Value>(content)
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
            Self::Json => serde_json::from_str::<Value>(content)
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
            Self::Toml => toml::from_str::<Value>(content)
                .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>),
        };

        parsed.map_err(|source| ConfigError::ParseError {
            path: path.display().to_string(),
            source,
        })
    }
}

/// 结构化文件配置提供者
///
/// 支持 YAML、JSON、TOML 三种格式，统一转换为 JSON 值树
#[derive(Debug)]
pub struct StructuredFileConfigProvider {
    name: String,
    file_path: PathBuf,
    format: FileFormat,
    config: Option<Value>,
    last_modified: Option<SystemTime>,
    priority: i32,
}

impl StructuredFileConfigProvider {
    /// 创建新的文件配置提供者，格式由扩展名决定
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file_path = path.as_ref().to_path_buf();
        let format = FileFormat::from_path(&file_path)?;
        let name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| file_path.display().to_string());

        let mut provider = Self {
            name,
            file_path,
            format,
            config: None,
            last_modified: None,
            priority: FILE_PROVIDER_PRIORITY,
        };

        provider.load_config()?;
        Ok(provider)
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// 文件格式
    pub fn format(&self) -> FileFormat {
        self.format
    }

    /// 加载配置文件
    fn load_config(&mut self) -> Result<(), ConfigError> {
        debug!("加载配置文件: {}", self.file_path.display());

        let path_str = self.file_path.display().to_string();
        if !self.file_path.exists() {
            return Err(ConfigError::FileNotFound { path: path_str });
        }

        let content = std::fs::read_to_string(&self.file_path).map_err(|e| {
            ConfigError::FileReadError {
                path: path_str.clone(),
                source: e,
            }
        })?;

        if self.format.is_blank(&content) {
            return Err(ConfigError::EmptyFile { path: path_str });
        }

        let value = self.format.parse(&self.file_path, &content)?;
        if value.is_null() {
            return Err(ConfigError::EmptyFile { path: path_str });
        }
        self.config = Some(value);

        self.last_modified = Some(
            std::fs::metadata(&self.file_path)
                .and_then(|m| m.modified())
                .map_err(|e| ConfigError::FileReadError {
                    path: path_str,
                    source: e,
                })?,
        );

        debug!("配置文件加载完成: {}", self.file_path.display());
        Ok(())
    }

    /// 从嵌套路径获取值
    fn get_nested_value(&self, path: &str) -> Option<&Value> {
        let mut current = self.config.as_ref()?;
        for part in path.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    /// 递归收集所有键
    fn collect_keys(obj: &serde_json::Map<String, Value>, prefix: &str, keys: &mut Vec<String>) {
        for (key, value) in obj {
            let full_key = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };

            keys.push(full_key.clone());

            if let Value::Object(nested) = value {
                Self::collect_keys(nested, &full_key, keys);
            }
        }
    }
}

#[async_trait]
impl ConfigProvider for StructuredFileConfigProvider {
    async fn get_configuration(&self, key: &str) -> Result<Value, ConfigError> {
        self.get_nested_value(key)
            .cloned()
            .ok_or_else(|| ConfigError::key_not_found(key))
    }

    async fn get_section(&self, section_name: &str) -> Result<ConfigSection, ConfigError> {
        match self.get_nested_value(section_name) {
            Some(Value::Object(obj)) => Ok(ConfigSection::from_object(obj)),
            Some(_) => Err(ConfigError::TypeConversionError {
                message: format!("配置节 {} 不是映射类型", section_name),
            }),
            None => Err(ConfigError::key_not_found(section_name)),
        }
    }

    async fn reload(&mut self) -> Result<(), ConfigError> {
        self.load_config()
    }

    async fn contains_key(&self, key: &str) -> Result<bool, ConfigError> {
        Ok(self.get_nested_value(key).is_some())
    }

    async fn get_all_keys(&self) -> Result<Vec<String>, ConfigError> {
        let mut keys = Vec::new();
        if let Some(Value::Object(obj)) = &self.config {
            Self::collect_keys(obj, "", &mut keys);
        }
        Ok(keys)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

#[async_trait]
impl FileConfigProvider for StructuredFileConfigProvider {
    fn file_path(&self) -> &Path {
        &self.file_path
    }

    async fn file_exists(&self) -> bool {
        tokio::fs::metadata(&self.file_path).await.is_ok()
    }

    async fn last_modified(&self) -> Result<SystemTime, ConfigError> {
        self.last_modified.ok_or_else(|| ConfigError::ReloadError {
            message: format!("文件尚未加载: {}", self.file_path.display()),
        })
    }
}

/// 环境变量配置提供者
///
/// `PREFIX__DATA_VALIDATION__ROOT_DIR` 映射为 `data_validation.root_dir`，值一律按字符串处理
#[derive(Debug)]
pub struct EnvironmentConfigProviderImpl {
    prefix: String,
    separator: String,
    priority: i32,
    env_vars: BTreeMap<String, String>,
    snapshot: Option<Vec<(String, String)>>,
}

impl EnvironmentConfigProviderImpl {
    /// 从当前进程环境变量创建
    pub fn new(prefix: impl Into<String>) -> Self {
        let mut provider = Self::empty(prefix.into(), None);
        provider.load_env_vars();
        provider
    }

    /// 从给定变量集合创建，不读取进程环境
    pub fn from_vars<I, K, V>(prefix: impl Into<String>, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let snapshot = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let mut provider = Self::empty(prefix.into(), Some(snapshot));
        provider.load_env_vars();
        provider
    }

    fn empty(prefix: String, snapshot: Option<Vec<(String, String)>>) -> Self {
        Self {
            prefix,
            separator: DEFAULT_ENV_SEPARATOR.to_string(),
            priority: ENVIRONMENT_PROVIDER_PRIORITY,
            env_vars: BTreeMap::new(),
            snapshot,
        }
    }

    /// 设置分隔符
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self.load_env_vars();
        self
    }

    /// 设置优先级
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// 加载环境变量
    fn load_env_vars(&mut self) {
        debug!("加载环境变量，前缀: {}", self.prefix);

        let vars: Vec<(String, String)> = match &self.snapshot {
            Some(snapshot) => snapshot.clone(),
            None => utf8_env_vars(std::env::vars_os()),
        };

        self.env_vars = vars
            .into_iter()
            .filter_map(|(key, value)| self.env_key_to_config_key(&key).map(|k| (k, value)))
            .collect();

        debug!("加载了 {} 个环境变量", self.env_vars.len());
    }

    /// 将环境变量键转换为配置键，不匹配前缀时返回 `None`
    fn env_key_to_config_key(&self, env_key: &str) -> Option<String> {
        let rest = env_key
            .strip_prefix(&self.prefix)?
            .strip_prefix(&self.separator)?;
        if rest.is_empty() {
            return None;
        }

        Some(
            rest.split(self.separator.as_str())
                .map(str::to_ascii_lowercase)
                .collect::<Vec<_>>()
                .join("."),
        )
    }
}

/// 保留键和值都是合法 UTF-8 的环境变量
pub(crate) fn utf8_env_vars<I>(vars: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (Ok(key), Err(_)) => {
                warn!("跳过值不是 UTF-8 的环境变量: {}", key);
                None
            }
            (Err(key), _) => {
                warn!("跳过键不是 UTF-8 的环境变量: {}", key.to_string_lossy());
                None
            }
        })
        .collect()
}

#[async_trait]
impl ConfigProvider for EnvironmentConfigProviderImpl {
    async fn get_configuration(&self, key: &str) -> Result<Value, ConfigError> {
        self.env_vars
            .get(&key.to_ascii_lowercase())
            .map(|value| Value::String(value.clone()))
            .ok_or_else(|| ConfigError::key_not_found(key))
    }

    async fn get_section(&self, section_name: &str) -> Result<ConfigSection, ConfigError> {
        let section_prefix = format!("{}.", section_name.to_ascii_lowercase());
        let mut section = ConfigSection::new();

        for (key, value) in &self.env_vars {
            if let Some(sub_key) = key.strip_prefix(&section_prefix) {
                section.insert(sub_key, Value::String(value.clone()));
            }
        }

        if section.is_empty() {
            Err(ConfigError::key_not_found(section_name))
        } else {
            Ok(section)
        }
    }

    async fn reload(&mut self) -> Result<(), ConfigError> {
        self.load_env_vars();
        Ok(())
    }

    async fn contains_key(&self, key: &str) -> Result<bool, ConfigError> {
        Ok(self.env_vars.contains_key(&key.to_ascii_lowercase()))
    }

    async fn get_all_keys(&self) -> Result<Vec<String>, ConfigError> {
        Ok(self.env_vars.keys().cloned().collect())
    }

    fn name(&self) -> &str {
        "EnvironmentConfigProvider"
    }

    fn priority(&self) -> i32 {
        self.priority
    }
}

#[async_trait]
impl EnvironmentConfigProviderTrait for EnvironmentConfigProviderImpl {
    fn prefix(&self) -> &str {
        &self.prefix
    }

    fn separator(&self) -> &str {
        &self.separator
    }

    async fn get_matching_env_vars(&self) -> Result<HashMap<String, String>, ConfigError> {
        Ok(self
            .env_vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}
