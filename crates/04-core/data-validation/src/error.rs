//! 数据验证错误类型

use thiserror::Error;

/// 数据验证错误
#[derive(Error, Debug)]
pub enum DataValidationError {
    #[error("数据集不存在: {path}")]
    DatasetNotFound { path: String },

    #[error("文件读写失败: {path}, 原因: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV 解析失败: {path}, 原因: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },

    #[error("数据集缺少表头: {path}")]
    EmptyDataset { path: String },

    #[error("验证报告序列化失败: {source}")]
    Report {
        #[from]
        source: serde_json::Error,
    },
}

impl DataValidationError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
