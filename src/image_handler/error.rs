//! # 错误模型模块
//!
//! ## 设计思路
//!
//! 使用单一错误枚举承载“加载 → 解码 → 裁剪 → 导出 → 打包”链路中的所有错误来源。
//! 通过 `thiserror` 保持人类可读错误，同时让调用侧可按分支匹配。
//! `code()` / `stage()` 经 `AppError` 进入 CLI `--json` 的失败输出。

/// 图片处理统一错误类型。
///
/// 该类型会在应用层被上转为 `AppError`。
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    #[error("解码错误：{0}")]
    Decode(String),

    #[error("格式错误：{0}")]
    InvalidFormat(String),

    #[error("文件错误：{0}")]
    FileSystem(String),

    #[error("资源限制：{0}")]
    ResourceLimit(String),

    #[error("裁剪错误：{0}")]
    InvalidCrop(String),

    #[error("编码错误：{0}")]
    Encode(String),

    #[error("打包错误：{0}")]
    Archive(String),

    #[error("已有导出任务进行中")]
    ExportInProgress,
}

impl ImageError {
    /// 稳定错误码。
    pub fn code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "E_DECODE",
            Self::InvalidFormat(_) => "E_INVALID_FORMAT",
            Self::FileSystem(_) => "E_FILE_SYSTEM",
            Self::ResourceLimit(_) => "E_RESOURCE_LIMIT",
            Self::InvalidCrop(_) => "E_INVALID_CROP",
            Self::Encode(_) => "E_ENCODE",
            Self::Archive(_) => "E_ARCHIVE",
            Self::ExportInProgress => "E_EXPORT_IN_PROGRESS",
        }
    }

    /// 出错所在阶段。
    pub fn stage(&self) -> &'static str {
        match self {
            Self::FileSystem(_) | Self::InvalidFormat(_) => "load",
            Self::Decode(_) | Self::ResourceLimit(_) => "decode",
            Self::InvalidCrop(_) => "crop",
            Self::Encode(_) | Self::ExportInProgress => "export",
            Self::Archive(_) => "archive",
        }
    }
}
