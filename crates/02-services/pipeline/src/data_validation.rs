//! 数据验证阶段

use crate::stage::{run_stage, PipelineStage};
use async_trait::async_trait;
use config_abstractions::{DataValidationConfig, DataValidationConfigProvider};
use config_impl::{ConfigPaths, ConfigurationManager, DEFAULT_ENV_PREFIX};
use data_validation::{ColumnValidator, DataValidation};
use infrastructure_common::Component;
use tracing::{debug, info};

/// 阶段名称
pub const STAGE_NAME: &str = "Data Validation Stage";

/// 阶段协作组件工厂
///
/// 每次执行阶段都会重新创建配置来源和验证组件
#[async_trait]
pub trait StageComponents: Send + Sync {
    /// 配置来源
    type ConfigProvider: DataValidationConfigProvider;
    /// 验证组件
    type Validator: ColumnValidator + Component;

    /// 创建配置来源
    async fn create_config_provider(&self) -> anyhow::Result<Self::ConfigProvider>;

    /// 使用给定配置创建验证组件
    fn create_validator(&self, config: DataValidationConfig) -> Self::Validator;
}

/// 默认组件：从配置文件构建 [`ConfigurationManager`]，以 [`DataValidation`] 执行验证
#[derive(Debug, Clone)]
pub struct DefaultStageComponents {
    paths: ConfigPaths,
    env_prefix: Option<String>,
}

impl DefaultStageComponents {
    /// 使用给定配置文件路径创建，环境变量前缀为 `WINE_RATER`
    pub fn new(paths: ConfigPaths) -> Self {
        Self {
            paths,
            env_prefix: Some(DEFAULT_ENV_PREFIX.to_string()),
        }
    }

    /// 设置环境变量前缀，`None` 表示不读取环境变量
    pub fn with_env_prefix(mut self, prefix: Option<String>) -> Self {
        self.env_prefix = prefix;
        self
    }

    /// 配置文件路径
    pub fn paths(&self) -> &ConfigPaths {
        &self.paths
    }
}

impl Default for DefaultStageComponents {
    fn default() -> Self {
        Self::new(ConfigPaths::default())
    }
}

#[async_trait]
impl StageComponents for DefaultStageComponents {
    type ConfigProvider = ConfigurationManager;
    type Validator = DataValidation;

    async fn create_config_provider(&self) -> anyhow::Result<ConfigurationManager> {
        let mut builder = ConfigurationManager::builder().with_paths(self.paths.clone());
        if let Some(prefix) = &self.env_prefix {
            builder = builder.with_env_prefix(prefix.clone());
        }
        Ok(builder.build().await?)
    }

    fn create_validator(&self, config: DataValidationConfig) -> DataValidation {
        DataValidation::new(config)
    }
}

/// 数据验证阶段
#[derive(Debug, Clone, Default)]
pub struct DataValidationPipeline<C = DefaultStageComponents> {
    components: C,
}

impl<C: StageComponents> DataValidationPipeline<C> {
    /// 使用给定组件工厂创建
    pub fn new(components: C) -> Self {
        Self { components }
    }

    /// 组件工厂
    pub fn components(&self) -> &C {
        &self.components
    }

    /// 带日志地执行一次阶段
    pub async fn run(&self) -> anyhow::Result<()> {
        run_stage(self).await
    }
}

#[async_trait]
impl<C: StageComponents> PipelineStage for DataValidationPipeline<C> {
    type Error = anyhow::Error;

    fn name(&self) -> &str {
        STAGE_NAME
    }

    async fn main(&self) -> anyhow::Result<()> {
        let config_provider = self.components.create_config_provider().await?;
        let config = config_provider.get_data_validation_config().await?;
        let validator = self.components.create_validator(config);
        info!("验证组件已创建: {}", validator.name());
        let status = validator.validate_all_columns().await?;
        debug!("验证状态: {}", status);
        Ok(())
    }
}
