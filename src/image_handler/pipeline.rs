//! # 解码与缩放流水线模块
//!
//! ## 设计思路
//!
//! 将“字节 → 图像 → RGBA”的过程集中管理，并在关键节点增加资源上限控制。
//! 优先做尺寸检查，再进行完整解码，降低异常输入触发高内存开销的风险。
//! 缩放能力也放在这里，供导出阶段复用。
//!
//! ## 实现思路
//!
//! 1. 猜测格式并读取 header 尺寸
//! 2. 按像素/内存上限快速拒绝
//! 3. 完整解码并转换 RGBA，校验字节长度一致性
//! 4. 缩放优先走 `fast_image_resize`（卷积 + alpha 预乘），失败时回退 `image::imageops::resize`

use fast_image_resize as fr;
use image::imageops::FilterType;
use image::{GenericImageView, ImageBuffer, ImageFormat, RgbaImage};
use std::io::Cursor;

use super::source::{RawImageData, SourceImage};
use super::{ImageConfig, ImageError, ImageHandler};

impl ImageHandler {
    /// 将原始字节解码为可交给裁剪器的 RGBA 位图。
    pub(crate) fn decode_source_image(
        &self,
        raw: RawImageData,
        config: &ImageConfig,
    ) -> Result<SourceImage, ImageError> {
        let _format: ImageFormat = image::guess_format(&raw.bytes)
            .map_err(|e| ImageError::InvalidFormat(format!("不支持的图片格式：{}", e)))?;

        let (header_width, header_height) = Self::inspect_dimensions_from_memory(&raw.bytes)?;
        Self::validate_pixel_limits(config, header_width, header_height)?;
        Self::validate_decoded_memory_limits(config, header_width, header_height)?;

        let decoded = image::load_from_memory(&raw.bytes)
            .map_err(|e| ImageError::Decode(format!("图片解码失败：{}", e)))?;

        let (width, height) = decoded.dimensions();
        if width == 0 || height == 0 {
            return Err(ImageError::Decode("图片尺寸为 0".to_string()));
        }
        Self::validate_pixel_limits(config, width, height)?;
        Self::validate_decoded_memory_limits(config, width, height)?;

        let rgba = decoded.to_rgba8();

        let expected_len = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| ImageError::ResourceLimit("图片尺寸导致内存溢出风险".to_string()))?;

        if rgba.as_raw().len() != expected_len {
            return Err(ImageError::Decode("解码后像素数据长度异常".to_string()));
        }

        log::info!(
            "✅ 图片解码成功 - 来源: {} 尺寸: {}x{}",
            raw.source_hint,
            width,
            height
        );

        Ok(SourceImage {
            bitmap: rgba,
            source_hint: raw.source_hint,
        })
    }

    /// 仅通过内存中的图片头信息读取宽高。
    ///
    /// 用于在完整解码前做像素限制检查。
    fn inspect_dimensions_from_memory(bytes: &[u8]) -> Result<(u32, u32), ImageError> {
        let cursor = Cursor::new(bytes);
        let reader = image::ImageReader::new(cursor)
            .with_guessed_format()
            .map_err(|e| ImageError::InvalidFormat(format!("无法识别图片格式：{}", e)))?;

        reader
            .into_dimensions()
            .map_err(|e| ImageError::InvalidFormat(format!("无法读取图片尺寸：{}", e)))
    }

    /// 校验像素数量是否超过配置上限。
    fn validate_pixel_limits(
        config: &ImageConfig,
        width: u32,
        height: u32,
    ) -> Result<(), ImageError> {
        let pixels = (width as u64)
            .checked_mul(height as u64)
            .ok_or_else(|| ImageError::ResourceLimit("图片像素数溢出".to_string()))?;

        if pixels > config.max_decoded_pixels {
            return Err(ImageError::ResourceLimit(format!(
                "图片像素过大：{} 像素（限制：{} 像素）",
                pixels, config.max_decoded_pixels
            )));
        }

        Ok(())
    }

    fn validate_decoded_memory_limits(
        config: &ImageConfig,
        width: u32,
        height: u32,
    ) -> Result<(), ImageError> {
        let estimated = (width as u64)
            .checked_mul(height as u64)
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or_else(|| ImageError::ResourceLimit("图片解码内存估算溢出".to_string()))?;

        if estimated > config.max_decoded_bytes {
            return Err(ImageError::ResourceLimit(format!(
                "图片解码预计内存过大：{:.2} MB（限制：{:.2} MB）",
                estimated as f64 / 1024.0 / 1024.0,
                config.max_decoded_bytes as f64 / 1024.0 / 1024.0
            )));
        }

        Ok(())
    }

    /// 高质量缩放到精确尺寸。
    ///
    /// `fast_image_resize` 失败时回退到 `image::imageops::resize`，保证导出不中断。
    pub(crate) fn resize_exact(
        image: &RgbaImage,
        target_width: u32,
        target_height: u32,
        filter: FilterType,
    ) -> RgbaImage {
        if image.dimensions() == (target_width, target_height) {
            return image.clone();
        }

        match Self::resize_with_fast_image_resize(image, target_width, target_height, filter) {
            Ok(resized) => resized,
            Err(err) => {
                log::warn!(
                    "⚠️ fast_image_resize 缩放失败，回退 image::imageops::resize：{}",
                    err
                );
                image::imageops::resize(image, target_width, target_height, filter)
            }
        }
    }

    fn resize_with_fast_image_resize(
        image: &RgbaImage,
        target_width: u32,
        target_height: u32,
        filter: FilterType,
    ) -> Result<RgbaImage, ImageError> {
        let (src_width, src_height) = image.dimensions();

        let src_image = fr::images::ImageRef::new(
            src_width,
            src_height,
            image.as_raw(),
            fr::PixelType::U8x4,
        )
        .map_err(|e| ImageError::Encode(format!("构建源图像缓冲失败：{}", e)))?;

        let mut dst_image = fr::images::Image::new(target_width, target_height, fr::PixelType::U8x4);

        let mut resizer = fr::Resizer::new();
        let options = fr::ResizeOptions::new().resize_alg(Self::to_fast_alg(filter));

        resizer
            .resize(&src_image, &mut dst_image, Some(&options))
            .map_err(|e| ImageError::Encode(format!("fast_image_resize 执行失败：{}", e)))?;

        ImageBuffer::from_raw(target_width, target_height, dst_image.into_vec())
            .ok_or_else(|| ImageError::Encode("fast_image_resize 输出缓冲长度异常".to_string()))
    }

    fn to_fast_alg(filter: FilterType) -> fr::ResizeAlg {
        match filter {
            FilterType::Nearest => fr::ResizeAlg::Nearest,
            FilterType::Triangle => fr::ResizeAlg::Convolution(fr::FilterType::Bilinear),
            FilterType::CatmullRom => fr::ResizeAlg::Convolution(fr::FilterType::CatmullRom),
            FilterType::Gaussian => fr::ResizeAlg::Convolution(fr::FilterType::Mitchell),
            FilterType::Lanczos3 => fr::ResizeAlg::Convolution(fr::FilterType::Lanczos3),
        }
    }
}
