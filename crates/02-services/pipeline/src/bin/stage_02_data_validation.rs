//! 数据验证阶段入口

use clap::{Parser, ValueEnum};
use config_impl::{ConfigPaths, CONFIG_FILE_PATH, DEFAULT_ENV_PREFIX, PARAMS_FILE_PATH, SCHEMA_FILE_PATH};
use std::path::PathBuf;
use wine_rater_pipeline::{
    init_logging, DataValidationPipeline, DefaultStageComponents, LoggingConfig,
};

/// 日志格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "stage-02-data-validation")]
#[command(about = "Wine Rater 数据验证阶段")]
struct Args {
    /// 主配置文件路径
    #[arg(long, default_value = CONFIG_FILE_PATH)]
    config: PathBuf,

    /// 参数文件路径
    #[arg(long, default_value = PARAMS_FILE_PATH)]
    params: PathBuf,

    /// 数据结构文件路径
    #[arg(long, default_value = SCHEMA_FILE_PATH)]
    schema: PathBuf,

    /// 环境变量前缀
    #[arg(long, default_value = DEFAULT_ENV_PREFIX)]
    env_prefix: String,

    /// 日志级别
    #[arg(long, default_value = "info")]
    log_level: String,

    /// 日志目录
    #[arg(long, default_value = "logs")]
    log_dir: PathBuf,

    /// 日志格式
    #[arg(long, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(&LoggingConfig {
        level: args.log_level,
        log_dir: Some(args.log_dir),
        json_format: args.log_format == LogFormat::Json,
        ..LoggingConfig::default()
    })?;

    let components = DefaultStageComponents::new(ConfigPaths {
        config_file: args.config,
        params_file: args.params,
        schema_file: args.schema,
    })
    .with_env_prefix(Some(args.env_prefix));

    DataValidationPipeline::new(components).run().await
}
