//! 统一错误类型模块
//!
//! # 设计思路
//!
//! 流水线内部使用 `ImageError`，应用层（CLI、设置文件）统一收敛到 `AppError`，
//! 避免在入口处散落 `.map_err(|e| e.to_string())`、`expect()` 等不一致模式。
//!
//! # 实现思路
//!
//! - 使用 `thiserror` 派生可读错误消息。
//! - 为 `ImageError` / `ColorParseError` / `io::Error` 提供 `From` 转换，`?` 直接传播。
//! - 实现 `Serialize` 将错误序列化为字符串，`--json` 输出时与成功结果格式一致。

use serde::Serialize;

use crate::background::ColorParseError;
use crate::image_handler::ImageError;

/// 应用级统一错误类型
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 图片处理流水线错误（加载 / 解码 / 裁剪 / 导出）
    #[error("{0}")]
    Image(#[from] ImageError),

    /// 背景色文本无法解析
    #[error("背景色无效: {0}")]
    Color(#[from] ColorParseError),

    /// 文件系统 I/O 错误
    #[error("文件系统错误: {0}")]
    Io(#[from] std::io::Error),

    /// 设置文件读写失败
    #[error("设置文件错误: {0}")]
    Settings(String),

    /// 命令行参数不合法
    #[error("参数错误: {0}")]
    Argument(String),
}

impl AppError {
    /// 机器可读的错误码。
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Image(err) => err.code(),
            AppError::Color(_) => "E_COLOR",
            AppError::Io(_) => "E_IO",
            AppError::Settings(_) => "E_SETTINGS",
            AppError::Argument(_) => "E_ARGUMENT",
        }
    }

    /// 流水线错误所在阶段；应用层错误没有阶段。
    pub fn stage(&self) -> Option<&'static str> {
        match self {
            AppError::Image(err) => Some(err.stage()),
            _ => None,
        }
    }
}

/// 将错误序列化为人类可读的字符串。
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_error_keeps_its_code() {
        let err: AppError = ImageError::ExportInProgress.into();
        assert_eq!(err.code(), "E_EXPORT_IN_PROGRESS");
    }

    #[test]
    fn stage_only_for_pipeline_errors() {
        let decode: AppError = ImageError::Decode("bad".to_string()).into();
        let io: AppError = std::io::Error::other("disk").into();

        assert_eq!(decode.stage(), Some("decode"));
        assert_eq!(io.stage(), None);
        assert_eq!(io.code(), "E_IO");
    }

    #[test]
    fn serializes_as_message_string() {
        let err = AppError::Argument("--crop 需要三个数字".to_string());
        let json = serde_json::to_string(&err).expect("serialize");
        assert_eq!(json, "\"参数错误: --crop 需要三个数字\"");
    }
}
