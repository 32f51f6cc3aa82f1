//! 产物目录工具

use infrastructure_common::ConfigError;
use std::path::Path;
use tracing::info;

/// 依次创建目录（包括父目录），已存在时不报错
pub async fn create_directories<P: AsRef<Path>>(paths: &[P]) -> Result<(), ConfigError> {
    for path in paths {
        let path = path.as_ref();
        tokio::fs::create_dir_all(path)
            .await
            .map_err(|e| ConfigError::DirectoryCreationFailed {
                path: path.display().to_string(),
                source: e,
            })?;
        info!("创建目录: {}", path.display());
    }
    Ok(())
}
