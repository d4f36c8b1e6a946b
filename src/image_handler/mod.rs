//! # 图片加载模块（image_handler）
//!
//! ## 设计思路
//!
//! 该模块将“图片来源识别 → 加载校验 → 解码 → 缩放”按职责拆分为多个子模块，
//! 避免单文件膨胀与耦合。裁剪、导出等上层模块只依赖这里暴露的少量类型。
//!
//! - `handler`：编排整条加载流水线 + 配置管理
//! - `loader`：负责文件/字节/Base64 加载与签名校验
//! - `pipeline`：负责解码、像素限制与高质量缩放
//! - `config/error/source`：配置、错误、中间数据模型
//!
//! ## 调用链
//!
//! ```text
//! IconSession::load_files
//!    ↓ (spawn_blocking)
//! handler.rs（配置快照 + 阶段耗时日志）
//!    ├─ loader.rs（来源加载 + 体积/签名校验）
//!    └─ pipeline.rs（header 尺寸检查 + 解码 + RGBA）
//!    ↓
//! SourceImage → ImageCropper
//! ```

mod config;
mod error;
mod handler;
mod loader;
mod pipeline;
mod source;

pub use config::{ExportProfile, ImageConfig};
pub use error::ImageError;
pub use handler::ImageHandler;
pub use source::{ImageSource, SourceImage};

#[cfg(test)]
pub(crate) mod test_support {
    use image::{DynamicImage, ImageBuffer, ImageFormat, Rgba};
    use std::io::Cursor;

    pub(crate) fn create_png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = ImageBuffer::from_fn(width, height, |x, y| {
            let r = (x % 255) as u8;
            let g = (y % 255) as u8;
            let b = ((x + y) % 255) as u8;
            Rgba([r, g, b, 255])
        });

        let dyn_img = DynamicImage::ImageRgba8(img);
        let mut cursor = Cursor::new(Vec::new());
        dyn_img
            .write_to(&mut cursor, ImageFormat::Png)
            .expect("failed to encode test image");
        cursor.into_inner()
    }
}
