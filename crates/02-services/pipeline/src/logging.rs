//! 日志初始化
//!
//! 同时输出到标准输出和 `<log_dir>/running_logs.log`。
//! 只应由可执行程序调用一次，库代码只使用 `tracing` 宏。

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;
use tracing::info;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// 日志文件名
pub const LOG_FILE_NAME: &str = "running_logs.log";

/// 日志初始化错误
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("无效的日志级别: {level}, 原因: {source}")]
    InvalidLevel {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("日志文件打开失败: {path}, 原因: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("日志初始化失败: {message}")]
    InitFailed { message: String },
}

/// 日志配置
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// 日志级别（`RUST_LOG` 未设置时生效）
    pub level: String,
    /// 日志目录，`None` 时只输出到标准输出
    pub log_dir: Option<PathBuf>,
    /// 是否显示目标
    pub show_target: bool,
    /// 是否显示线程ID
    pub show_thread_ids: bool,
    /// 是否显示文件名和行号
    pub show_location: bool,
    /// 是否使用 JSON 格式
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            log_dir: Some(PathBuf::from("logs")),
            show_target: true,
            show_thread_ids: false,
            show_location: false,
            json_format: false,
        }
    }
}

impl LoggingConfig {
    /// 日志文件路径
    pub fn log_file(&self) -> Option<PathBuf> {
        self.log_dir.as_ref().map(|dir| dir.join(LOG_FILE_NAME))
    }

    /// 构建过滤器，`RUST_LOG` 优先
    pub fn env_filter(&self) -> Result<EnvFilter, LoggingError> {
        self.filter_with(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref())
    }

    /// `directives` 可解析时使用它，否则回退到 `level`
    fn filter_with(&self, directives: Option<&str>) -> Result<EnvFilter, LoggingError> {
        if let Some(filter) = directives.and_then(|d| EnvFilter::try_new(d).ok()) {
            return Ok(filter);
        }
        EnvFilter::try_new(&self.level).map_err(|source| LoggingError::InvalidLevel {
            level: self.level.clone(),
            source,
        })
    }

    fn format_layer<W>(&self, writer: W, ansi: bool) -> Box<dyn Layer<Registry> + Send + Sync>
    where
        W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    {
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(self.show_target)
            .with_thread_ids(self.show_thread_ids)
            .with_file(self.show_location)
            .with_line_number(self.show_location);

        if self.json_format {
            layer.json().boxed()
        } else {
            layer.boxed()
        }
    }
}

/// 初始化全局日志
pub fn init_logging(config: &LoggingConfig) -> Result<(), LoggingError> {
    let filter = config.env_filter()?;

    tracing_subscriber::registry()
        .with(output_layers(config, std::io::stdout)?)
        .with(filter)
        .try_init()
        .map_err(|e| LoggingError::InitFailed {
            message: e.to_string(),
        })?;

    info!("日志系统初始化完成");
    Ok(())
}

/// 控制台输出层和（可选的）日志文件输出层
fn output_layers<W>(
    config: &LoggingConfig,
    console: W,
) -> Result<Vec<Box<dyn Layer<Registry> + Send + Sync>>, LoggingError>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let mut layers = vec![config.format_layer(console, true)];
    if let Some(log_file) = config.log_file() {
        let file = open_log_file(&log_file)?;
        layers.push(config.format_layer(Arc::new(file), false));
    }
    Ok(layers)
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    let to_error = |source| LoggingError::LogFile {
        path: path.display().to_string(),
        source,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(to_error)?;
    }
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)
}
