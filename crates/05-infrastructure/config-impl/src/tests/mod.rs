//! config-impl 单元测试

mod configuration_tests;

use std::path::{Path, PathBuf};

/// 辅助函数：写入测试文件并返回路径
pub(crate) fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(&path, content).unwrap();
    path
}
