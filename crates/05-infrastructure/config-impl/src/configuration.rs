//! 流水线配置管理器
//!
//! 读取 `config/config.yaml`、`params.yaml`、`schema.yaml` 三个配置文件，
//! 为各流水线阶段构建强类型配置实体。

use crate::directories::create_directories;
use crate::manager::LayeredConfigManager;
use crate::providers::{EnvironmentConfigProviderImpl, StructuredFileConfigProvider, DEFAULT_ENV_PREFIX};
use async_trait::async_trait;
use config_abstractions::{
    ColumnType, ConfigManager, DataValidationConfig, DataValidationConfigProvider,
    FileConfigProvider, GenericConfigValidator, ValidationRule, ValueKind,
};
use infrastructure_common::ConfigError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 默认主配置文件
pub const CONFIG_FILE_PATH: &str = "config/config.yaml";
/// 默认参数文件
pub const PARAMS_FILE_PATH: &str = "params.yaml";
/// 默认数据结构文件
pub const SCHEMA_FILE_PATH: &str = "schema.yaml";

const ARTIFACTS_ROOT_KEY: &str = "artifacts_root";
const DATA_VALIDATION_SECTION: &str = "data_validation";
const SCHEMA_COLUMNS_SECTION: &str = "COLUMNS";
const TARGET_COLUMN_KEY: &str = "TARGET_COLUMN.name";

/// 配置文件路径
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    pub config_file: PathBuf,
    pub params_file: PathBuf,
    pub schema_file: PathBuf,
}

impl ConfigPaths {
    /// 以 `root` 为项目根目录的默认路径
    pub fn under(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            config_file: root.join(CONFIG_FILE_PATH),
            params_file: root.join(PARAMS_FILE_PATH),
            schema_file: root.join(SCHEMA_FILE_PATH),
        }
    }
}

impl Default for ConfigPaths {
    fn default() -> Self {
        Self {
            config_file: PathBuf::from(CONFIG_FILE_PATH),
            params_file: PathBuf::from(PARAMS_FILE_PATH),
            schema_file: PathBuf::from(SCHEMA_FILE_PATH),
        }
    }
}

/// `data_validation` 配置节绑定结构（键名已转为小写）
#[derive(Debug, Deserialize)]
struct DataValidationSettings {
    root_dir: PathBuf,
    status_file: PathBuf,
    unzip_data_dir: PathBuf,
    #[serde(default)]
    report_file: Option<PathBuf>,
}

/// 流水线配置管理器
///
/// 构建时加载全部配置文件并创建 `artifacts_root` 目录
#[derive(Debug)]
pub struct ConfigurationManager {
    paths: ConfigPaths,
    config: LayeredConfigManager,
    params: LayeredConfigManager,
    schema: LayeredConfigManager,
    artifacts_root: PathBuf,
}

impl ConfigurationManager {
    /// 使用默认路径并叠加进程环境变量创建
    pub async fn new() -> Result<Self, ConfigError> {
        Self::builder()
            .with_env_prefix(DEFAULT_ENV_PREFIX)
            .build()
            .await
    }

    /// 创建构建器
    pub fn builder() -> ConfigurationManagerBuilder {
        ConfigurationManagerBuilder::new()
    }

    /// 配置文件路径
    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }

    /// 产物根目录
    pub fn artifacts_root(&self) -> &Path {
        &self.artifacts_root
    }

    /// 主配置
    pub fn config(&self) -> &LayeredConfigManager {
        &self.config
    }

    /// 训练参数
    pub fn params(&self) -> &LayeredConfigManager {
        &self.params
    }

    /// 数据结构定义
    pub fn schema(&self) -> &LayeredConfigManager {
        &self.schema
    }

    fn data_validation_rules() -> GenericConfigValidator {
        let required_path = || {
            ValidationRule::new()
                .required()
                .with_kind(ValueKind::String)
                .with_min_length(1)
        };

        GenericConfigValidator::new(DATA_VALIDATION_SECTION)
            .with_rule("root_dir", required_path())
            .with_rule("STATUS_FILE", required_path())
            .with_rule("unzip_data_dir", required_path())
            .with_rule(
                "report_file",
                ValidationRule::new().with_kind(ValueKind::String).with_min_length(1),
            )
    }

    async fn target_column(&self) -> Result<Option<String>, ConfigError> {
        match self.schema.get_optional(TARGET_COLUMN_KEY).await? {
            None => Ok(None),
            Some(Value::String(name)) => Ok(Some(name)),
            Some(other) => Err(ConfigError::TypeConversionError {
                message: format!("{} 必须是字符串，实际为: {}", TARGET_COLUMN_KEY, other),
            }),
        }
    }
}

#[async_trait]
impl DataValidationConfigProvider for ConfigurationManager {
    type Error = ConfigError;

    async fn get_data_validation_config(&self) -> Result<DataValidationConfig, ConfigError> {
        let section = self.config.get_section(DATA_VALIDATION_SECTION).await?;

        let validator = Self::data_validation_rules();
        let result = validator.validate_section(&section);
        for warning in &result.warnings {
            warn!("{}.{}: {}", validator.name(), warning.field, warning.message);
        }
        if !result.is_valid {
            return Err(ConfigError::ValidationFailed {
                section: validator.name().to_string(),
                errors: result.error_messages(),
            });
        }

        let settings: DataValidationSettings = section.with_lowercase_keys().bind()?;

        let all_schema: BTreeMap<String, ColumnType> = self
            .schema
            .get_section(SCHEMA_COLUMNS_SECTION)
            .await?
            .bind()?;
        debug!("数据结构包含 {} 列", all_schema.len());

        let target_column = self.target_column().await?;

        create_directories(&[&settings.root_dir]).await?;

        info!(
            "数据验证配置已构建: dataset={}, status_file={}",
            settings.unzip_data_dir.display(),
            settings.status_file.display()
        );

        Ok(DataValidationConfig {
            root_dir: settings.root_dir,
            status_file: settings.status_file,
            unzip_data_dir: settings.unzip_data_dir,
            report_file: settings.report_file,
            all_schema,
            target_column,
        })
    }
}

/// 配置管理器构建器
#[derive(Debug, Default)]
pub struct ConfigurationManagerBuilder {
    paths: ConfigPaths,
    env_provider: Option<EnvironmentConfigProviderImpl>,
}

impl ConfigurationManagerBuilder {
    /// 创建新的构建器
    pub fn new() -> Self {
        Self::default()
    }

    /// 设置全部配置文件路径
    pub fn with_paths(mut self, paths: ConfigPaths) -> Self {
        self.paths = paths;
        self
    }

    /// 设置主配置文件
    pub fn with_config_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.config_file = path.into();
        self
    }

    /// 设置参数文件
    pub fn with_params_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.params_file = path.into();
        self
    }

    /// 设置数据结构文件
    pub fn with_schema_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.schema_file = path.into();
        self
    }

    /// 以进程环境变量覆盖主配置
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_provider = Some(EnvironmentConfigProviderImpl::new(prefix));
        self
    }

    /// 使用给定的环境变量提供者覆盖主配置
    pub fn with_environment(mut self, provider: EnvironmentConfigProviderImpl) -> Self {
        self.env_provider = Some(provider);
        self
    }

    /// 加载配置文件并创建配置管理器
    pub async fn build(self) -> Result<ConfigurationManager, ConfigError> {
        let mut config = LayeredConfigManager::new("config");
        config
            .register_provider(Box::new(load_file(&self.paths.config_file)?))
            .await?;
        if let Some(env_provider) = self.env_provider {
            config.register_provider(Box::new(env_provider)).await?;
        }

        let mut params = LayeredConfigManager::new("params");
        params
            .register_provider(Box::new(load_file(&self.paths.params_file)?))
            .await?;

        let mut schema = LayeredConfigManager::new("schema");
        schema
            .register_provider(Box::new(load_file(&self.paths.schema_file)?))
            .await?;

        let artifacts_root: PathBuf = config.bind_configuration(ARTIFACTS_ROOT_KEY).await?;
        create_directories(&[&artifacts_root]).await?;

        Ok(ConfigurationManager {
            paths: self.paths,
            config,
            params,
            schema,
            artifacts_root,
        })
    }
}

fn load_file(path: &Path) -> Result<StructuredFileConfigProvider, ConfigError> {
    let provider = StructuredFileConfigProvider::new(path)?;
    info!("配置文件加载成功: {}", provider.file_path().display());
    Ok(provider)
}
