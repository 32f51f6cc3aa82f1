//! 列验证组件

use crate::error::DataValidationError;
use crate::profile::DatasetProfile;
use crate::report::ColumnValidationReport;
use async_trait::async_trait;
use config_abstractions::DataValidationConfig;
use infrastructure_common::Component;
use std::path::Path;
use tracing::{debug, info, warn};

/// 列验证接口
#[async_trait]
pub trait ColumnValidator: Send + Sync {
    /// 错误类型
    type Error: std::error::Error + Send + Sync + 'static;

    /// 验证数据集的全部列，返回验证是否通过
    async fn validate_all_columns(&self) -> Result<bool, Self::Error>;
}

/// 数据验证组件
///
/// 读取 `unzip_data_dir` 指向的 CSV 数据集，与配置中的列结构比对，
/// 并把结果写入状态文件
#[derive(Debug, Clone)]
pub struct DataValidation {
    config: DataValidationConfig,
}

impl DataValidation {
    /// 使用阶段配置创建组件
    pub fn new(config: DataValidationConfig) -> Self {
        Self { config }
    }

    /// 阶段配置
    pub fn config(&self) -> &DataValidationConfig {
        &self.config
    }

    /// 读取并分析数据集
    pub async fn profile_dataset(&self) -> Result<DatasetProfile, DataValidationError> {
        let path = &self.config.unzip_data_dir;
        debug!("读取数据集: {}", path.display());

        let bytes = tokio::fs::read(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DataValidationError::DatasetNotFound {
                    path: path.display().to_string(),
                }
            } else {
                DataValidationError::io(path, e)
            }
        })?;

        let profile =
            DatasetProfile::from_csv(bytes.as_slice()).map_err(|source| DataValidationError::Csv {
                path: path.display().to_string(),
                source,
            })?;

        if profile.columns.is_empty() {
            return Err(DataValidationError::EmptyDataset {
                path: path.display().to_string(),
            });
        }

        debug!(
            "数据集包含 {} 列, {} 行",
            profile.columns.len(),
            profile.row_count
        );
        Ok(profile)
    }

    /// 执行验证并写出状态文件与报告
    pub async fn validate(&self) -> Result<ColumnValidationReport, DataValidationError> {
        let profile = self.profile_dataset().await?;
        let report = ColumnValidationReport::evaluate(
            &profile,
            &self.config.all_schema,
            self.config.target_column.as_deref(),
        );

        for column in &report.unknown_columns {
            warn!("列 {} 未在数据结构中声明", column);
        }
        for column in &report.missing_columns {
            warn!("数据集缺少数据结构中的列: {}", column);
        }
        for mismatch in &report.type_mismatches {
            warn!(
                "列 {} 类型不一致: 期望 {}, 实际 {}",
                mismatch.column, mismatch.expected, mismatch.actual
            );
        }
        if report.target_column_present == Some(false) {
            if let Some(target) = &self.config.target_column {
                warn!("数据集缺少目标列: {}", target);
            }
        }

        self.write_status(&report).await?;
        if let Some(report_file) = &self.config.report_file {
            write_file(report_file, serde_json::to_vec_pretty(&report)?).await?;
            info!("验证报告已写入: {}", report_file.display());
        }

        Ok(report)
    }

    async fn write_status(&self, report: &ColumnValidationReport) -> Result<(), DataValidationError> {
        let line = report.status_line();
        write_file(&self.config.status_file, line.as_bytes()).await?;
        info!("{} -> {}", line, self.config.status_file.display());
        Ok(())
    }
}

impl Component for DataValidation {
    fn name(&self) -> &'static str {
        "DataValidation"
    }
}

#[async_trait]
impl ColumnValidator for DataValidation {
    type Error = DataValidationError;

    async fn validate_all_columns(&self) -> Result<bool, DataValidationError> {
        Ok(self.validate().await?.status)
    }
}

async fn write_file(path: &Path, contents: impl AsRef<[u8]>) -> Result<(), DataValidationError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| DataValidationError::io(parent, e))?;
    }
    tokio::fs::write(path, contents)
        .await
        .map_err(|e| DataValidationError::io(path, e))
}
