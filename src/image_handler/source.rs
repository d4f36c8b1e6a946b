//! # 数据源与中间模型
//!
//! ## 设计思路
//!
//! 将“外部输入类型”和“流水线中间结果”解耦：
//! - `ImageSource` 表示用户选择的文件来源
//! - `RawImageData` 表示已加载但未解码的字节
//! - `SourceImage` 表示已解码、可交给裁剪器的位图

use image::RgbaImage;

/// 图片输入来源。
#[derive(Debug, Clone)]
pub enum ImageSource {
    /// 本地文件路径来源。
    FilePath(String),
    /// 内存中的原始文件字节。
    Bytes(Vec<u8>),
    /// Base64（支持 Data URL 与纯 Base64 字符串）。
    Base64(String),
}

impl ImageSource {
    /// 来源提示（用于日志与诊断）。
    pub(crate) fn hint(&self) -> &'static str {
        match self {
            Self::FilePath(_) => "file",
            Self::Bytes(_) => "bytes",
            Self::Base64(_) => "base64",
        }
    }
}

/// 加载阶段输出：原始字节与来源标识。
pub(crate) struct RawImageData {
    /// 原始图片字节。
    pub(crate) bytes: Vec<u8>,
    /// 来源提示（用于日志与诊断）。
    pub(crate) source_hint: &'static str,
}

/// 解码阶段输出：完整分辨率的 RGBA 位图。
///
/// 每次成功加载新文件时整体替换，不做增量更新。
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub(crate) bitmap: RgbaImage,
    pub(crate) source_hint: &'static str,
}

impl SourceImage {
    pub fn new(bitmap: RgbaImage) -> Self {
        Self {
            bitmap,
            source_hint: "memory",
        }
    }

    pub fn width(&self) -> u32 {
        self.bitmap.width()
    }

    pub fn height(&self) -> u32 {
        self.bitmap.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.bitmap.dimensions()
    }

    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }

    pub fn source_hint(&self) -> &'static str {
        self.source_hint
    }
}
