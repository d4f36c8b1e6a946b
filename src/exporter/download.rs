//! 下载触发：把打包好的 blob 交给一个目标。

use std::fs;
use std::path::{Path, PathBuf};

use crate::image_handler::ImageError;

/// 导出结果的接收方。
pub trait DownloadTarget {
    /// 以 `file_name` 保存 `blob`，返回最终位置。
    fn deliver(&self, file_name: &str, blob: &[u8]) -> Result<PathBuf, ImageError>;
}

/// 写入本地目录，目录不存在时自动创建。
///
/// 先写临时文件再重命名，避免留下半个压缩包。
#[derive(Debug, Clone)]
pub struct DirectoryDownload {
    dir: PathBuf,
}

impl DirectoryDownload {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DownloadTarget for DirectoryDownload {
    fn deliver(&self, file_name: &str, blob: &[u8]) -> Result<PathBuf, ImageError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| {
                ImageError::FileSystem(format!("创建输出目录 '{}' 失败：{}", self.dir.display(), e))
            })?;
        }

        let target = self.dir.join(file_name);
        let partial = self.dir.join(format!("{file_name}.part"));

        fs::write(&partial, blob)
            .map_err(|e| ImageError::FileSystem(format!("写入 '{}' 失败：{}", partial.display(), e)))?;
        fs::rename(&partial, &target).map_err(|e| {
            let _ = fs::remove_file(&partial);
            ImageError::FileSystem(format!("重命名到 '{}' 失败：{}", target.display(), e))
        })?;

        log::info!("💾 已保存 {}（{} 字节）", target.display(), blob.len());
        Ok(target)
    }
}
