//! 数据验证阶段端到端测试
use config_impl::ConfigPaths;
use data_validation::DataValidationError;
use infrastructure_common::ConfigError;
use std::path::{Path, PathBuf};
use wine_rater_pipeline::{DataValidationPipeline, DefaultStageComponents};

const SCHEMA_YAML: &str = r#"
COLUMNS:
  fixed acidity: float64
  volatile acidity: float64
  citric acid: float64
  residual sugar: float64
  chlorides: float64
  free sulfur dioxide: float64
  total sulfur dioxide: float64
  density: float64
  pH: float64
  sulphates: float64
  alcohol: float64
  quality: int64

TARGET_COLUMN:
  name: quality
"#;

const WINE_CSV: &str = "fixed acidity,volatile acidity,citric acid,residual sugar,chlorides,\
free sulfur dioxide,total sulfur dioxide,density,pH,sulphates,alcohol,quality
7.4,0.7,0,1.9,0.076,11,34,0.9978,3.51,0.56,9.4,5
7.8,0.88,0,2.6,0.098,25,67,0.9968,3.2,0.68,9.8,5
11.2,0.28,0.56,1.9,0.075,17,60,0.998,3.16,0.58,9.8,6
";

/// 临时项目目录
struct Project {
    _temp: tempfile::TempDir,
    root: PathBuf,
}

impl Project {
    fn new(dataset: &str) -> Self {
        let temp = tempfile::tempdir().unwrap();
        let root = temp.path().to_path_buf();
        let display = root.display();

        write(
            &root.join("config/config.yaml"),
            &format!(
                "artifacts_root: {display}/artifacts\n\
                 data_validation:\n  \
                   root_dir: {display}/artifacts/data_validation\n  \
                   unzip_data_dir: {display}/artifacts/data_ingestion/winequality-red.csv\n  \
                   STATUS_FILE: {display}/artifacts/data_validation/status.txt\n  \
                   report_file: {display}/artifacts/data_validation/report.json\n"
            ),
        );
        write(&root.join("params.yaml"), "ElasticNet:\n  alpha: 0.2\n  l1_ratio: 0.1\n");
        write(&root.join("schema.yaml"), SCHEMA_YAML);
        write(
            &root.join("artifacts/data_ingestion/winequality-red.csv"),
            dataset,
        );

        Self { _temp: temp, root }
    }

    fn pipeline(&self) -> DataValidationPipeline {
        DataValidationPipeline::new(
            DefaultStageComponents::new(ConfigPaths::under(&self.root)).with_env_prefix(None),
        )
    }

    fn status(&self) -> String {
        std::fs::read_to_string(self.root.join("artifacts/data_validation/status.txt")).unwrap()
    }
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[tokio::test]
async fn test_valid_dataset_writes_true_status() {
    let project = Project::new(WINE_CSV);

    project.pipeline().run().await.unwrap();

    assert_eq!(project.status(), "Validation status: True");
    let report = std::fs::read_to_string(
        project.root.join("artifacts/data_validation/report.json"),
    )
    .unwrap();
    assert!(report.contains("\"row_count\": 3"));
}

#[tokio::test]
async fn test_unknown_column_writes_false_status() {
    let dataset = WINE_CSV.replacen("fixed acidity", "colour", 1);
    let project = Project::new(&dataset);

    project.pipeline().run().await.unwrap();

    assert_eq!(project.status(), "Validation status: False");
}

#[tokio::test]
async fn test_missing_dataset_error_reaches_caller() {
    let project = Project::new(WINE_CSV);
    std::fs::remove_file(project.root.join("artifacts/data_ingestion/winequality-red.csv"))
        .unwrap();

    let err = project.pipeline().run().await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<DataValidationError>(),
        Some(DataValidationError::DatasetNotFound { .. })
    ));
    assert!(!project.root.join("artifacts/data_validation/status.txt").exists());
}

#[tokio::test]
async fn test_missing_config_file_error_reaches_caller() {
    let project = Project::new(WINE_CSV);
    std::fs::remove_file(project.root.join("config/config.yaml")).unwrap();

    let err = project.pipeline().run().await.unwrap_err();

    assert!(matches!(
        err.downcast_ref::<ConfigError>(),
        Some(ConfigError::FileNotFound { .. })
    ));
}

#[tokio::test]
async fn test_repeated_runs_rebuild_configuration() {
    let project = Project::new(WINE_CSV);
    let pipeline = project.pipeline();

    pipeline.run().await.unwrap();
    assert_eq!(project.status(), "Validation status: True");

    // 第二次运行应重新读取配置和数据集
    write(
        &project.root.join("schema.yaml"),
        "COLUMNS:\n  alcohol: float64\n",
    );
    pipeline.run().await.unwrap();
    assert_eq!(project.status(), "Validation status: False");
}
