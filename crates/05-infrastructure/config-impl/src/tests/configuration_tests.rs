//! 流水线配置管理器测试

use super::write_file;
use crate::configuration::{ConfigPaths, ConfigurationManager};
use crate::providers::EnvironmentConfigProviderImpl;
use config_abstractions::{ColumnType, ConfigManager, DataValidationConfigProvider};
use infrastructure_common::ConfigError;
use serde_json::json;
use std::path::Path;

const SCHEMA_YAML: &str = r#"
COLUMNS:
  fixed acidity: float64
  volatile acidity: float64
  alcohol: float64
  quality: int64

TARGET_COLUMN:
  name: quality
"#;

const PARAMS_YAML: &str = r#"
ElasticNet:
  alpha: 0.2
  l1_ratio: 0.1
"#;

fn config_yaml(root: &Path) -> String {
    let root = root.display();
    format!(
        r#"
artifacts_root: {root}/artifacts

data_validation:
  root_dir: {root}/artifacts/data_validation
  unzip_data_dir: {root}/artifacts/data_ingestion/winequality-red.csv
  STATUS_FILE: {root}/artifacts/data_validation/status.txt
"#
    )
}

fn write_project(root: &Path, config: &str) -> ConfigPaths {
    write_file(root, "config/config.yaml", config);
    write_file(root, "params.yaml", PARAMS_YAML);
    write_file(root, "schema.yaml", SCHEMA_YAML);
    ConfigPaths::under(root)
}

/// 测试从三个配置文件构建数据验证配置
#[tokio::test]
async fn test_get_data_validation_config() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    let paths = write_project(root, &config_yaml(root));

    let manager = ConfigurationManager::builder()
        .with_paths(paths.clone())
        .build()
        .await
        .unwrap();
    assert_eq!(manager.paths(), &paths);
    assert!(manager.artifacts_root().is_dir(), "应创建 artifacts_root");

    let config = manager.get_data_validation_config().await.unwrap();
    assert_eq!(config.root_dir, root.join("artifacts/data_validation"));
    assert_eq!(
        config.status_file,
        root.join("artifacts/data_validation/status.txt")
    );
    assert_eq!(
        config.unzip_data_dir,
        root.join("artifacts/data_ingestion/winequality-red.csv")
    );
    assert_eq!(config.report_file, None);
    assert_eq!(config.all_schema.len(), 4);
    assert_eq!(config.all_schema.get("fixed acidity"), Some(&ColumnType::Float64));
    assert_eq!(config.all_schema.get("quality"), Some(&ColumnType::Int64));
    assert_eq!(config.target_column.as_deref(), Some("quality"));
    assert!(config.root_dir.is_dir(), "应创建 root_dir");
}

/// 测试参数文件可访问
#[tokio::test]
async fn test_params_are_loaded() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    let paths = write_project(root, &config_yaml(root));

    let manager = ConfigurationManager::builder()
        .with_paths(paths)
        .build()
        .await
        .unwrap();

    let alpha = manager
        .params()
        .get_configuration("ElasticNet.alpha")
        .await
        .unwrap();
    assert_eq!(alpha, json!(0.2));
}

/// 测试缺失必需配置项时报告全部问题
#[tokio::test]
async fn test_missing_required_keys_are_all_reported() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    let config = format!(
        "artifacts_root: {}/artifacts\ndata_validation:\n  root_dir: {}/dv\n",
        root.display(),
        root.display()
    );
    let paths = write_project(root, &config);

    let manager = ConfigurationManager::builder()
        .with_paths(paths)
        .build()
        .await
        .unwrap();

    let err = manager.get_data_validation_config().await.unwrap_err();
    match err {
        ConfigError::ValidationFailed { section, errors } => {
            assert_eq!(section, "data_validation");
            assert_eq!(errors.len(), 2, "{errors:?}");
            assert!(errors.iter().any(|e| e.contains("STATUS_FILE")));
            assert!(errors.iter().any(|e| e.contains("unzip_data_dir")));
        }
        other => panic!("期望 ValidationFailed，实际为: {other}"),
    }
}

/// 测试环境变量覆盖数据集路径
#[tokio::test]
async fn test_environment_overrides_dataset_path() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    let paths = write_project(root, &config_yaml(root));
    let custom = root.join("data/custom.csv");

    let env = EnvironmentConfigProviderImpl::from_vars(
        "WINE_RATER",
        [(
            "WINE_RATER__DATA_VALIDATION__UNZIP_DATA_DIR".to_string(),
            custom.display().to_string(),
        )],
    );
    let manager = ConfigurationManager::builder()
        .with_paths(paths)
        .with_environment(env)
        .build()
        .await
        .unwrap();

    assert_eq!(
        manager.config().provider_names(),
        vec!["EnvironmentConfigProvider", "config.yaml"]
    );
    let config = manager.get_data_validation_config().await.unwrap();
    assert_eq!(config.unzip_data_dir, custom);
}

/// 测试未知列类型
#[tokio::test]
async fn test_unknown_column_type_is_rejected() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    let paths = write_project(root, &config_yaml(root));
    write_file(root, "schema.yaml", "COLUMNS:\n  alcohol: float32\n");

    let manager = ConfigurationManager::builder()
        .with_paths(paths)
        .build()
        .await
        .unwrap();

    let err = manager.get_data_validation_config().await.unwrap_err();
    assert!(matches!(err, ConfigError::SerializationError { .. }), "{err}");
}

/// 测试缺少目标列定义时目标列为空
#[tokio::test]
async fn test_target_column_is_optional() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    let paths = write_project(root, &config_yaml(root));
    write_file(root, "schema.yaml", "COLUMNS:\n  alcohol: float64\n");

    let manager = ConfigurationManager::builder()
        .with_paths(paths)
        .build()
        .await
        .unwrap();

    let config = manager.get_data_validation_config().await.unwrap();
    assert_eq!(config.target_column, None);
}

/// 测试空参数文件导致构建失败
#[tokio::test]
async fn test_empty_params_file_fails() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    let paths = write_project(root, &config_yaml(root));
    write_file(root, "params.yaml", "");

    let err = ConfigurationManager::builder()
        .with_paths(paths)
        .build()
        .await
        .unwrap_err();
    assert!(matches!(err, ConfigError::EmptyFile { .. }));
}

/// 测试缺少 artifacts_root
#[tokio::test]
async fn test_missing_artifacts_root_fails() {
    let temp = tempfile::tempdir().unwrap();
    let root = temp.path();
    let paths = write_project(root, "data_validation:\n  root_dir: x\n");

    let err = ConfigurationManager::builder()
        .with_paths(paths)
        .build()
        .await
        .unwrap_err();
    assert!(err.is_key_not_found());
}
