//! # 加载与校验模块
//!
//! ## 设计思路
//!
//! 统一处理不同来源（本地文件 / 内存字节 / Base64）的原始字节加载，并在“尽可能早”的阶段执行输入校验。
//! 目标是尽快失败，减少不必要内存与 CPU 消耗。
//!
//! ## 实现思路
//!
//! - 文件：存在性 + metadata 体积限制 + 读取。
//! - 字节：体积限制。
//! - Base64：格式解析 + 解码前体积估算 + 解码后体积限制。
//! - 三种来源最后都经过文件签名（magic bytes）校验，等价于文件选择框的 `image/*` 过滤。

use base64::{Engine as _, engine::general_purpose};
use std::path::Path;

use super::source::RawImageData;
use super::{ImageConfig, ImageError, ImageHandler, ImageSource};

const DATA_URL_IMAGE_PREFIX: &str = "data:image/";
const DATA_URL_BASE64_MARKER: &str = ";base64,";

impl ImageHandler {
    /// 按来源加载原始字节。
    pub(super) fn load_source(
        &self,
        source: ImageSource,
        config: &ImageConfig,
    ) -> Result<RawImageData, ImageError> {
        match source {
            ImageSource::FilePath(path) => self.load_from_file(&path, config),
            ImageSource::Bytes(bytes) => self.load_from_bytes(bytes, config),
            ImageSource::Base64(data) => self.load_from_base64(&data, config),
        }
    }

    /// 从 Base64 字符串加载图片原始字节。
    pub(super) fn load_from_base64(
        &self,
        data: &str,
        config: &ImageConfig,
    ) -> Result<RawImageData, ImageError> {
        log::info!("📝 开始处理 base64 图片");

        let bytes = Self::parse_base64_with_limit(data, config.max_file_size)?;

        if bytes.len() as u64 > config.max_file_size {
            return Err(ImageError::ResourceLimit(format!(
                "Base64 解码后体积过大：{:.2} MB（限制：{:.2} MB）",
                bytes.len() as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: "base64",
        })
    }

    /// 直接接收内存中的文件字节。
    pub(super) fn load_from_bytes(
        &self,
        bytes: Vec<u8>,
        config: &ImageConfig,
    ) -> Result<RawImageData, ImageError> {
        log::info!("📦 开始处理内存图片 - {} 字节", bytes.len());

        if bytes.len() as u64 > config.max_file_size {
            return Err(ImageError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                bytes.len() as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: "bytes",
        })
    }

    /// 从本地路径加载图片原始字节。
    pub(super) fn load_from_file(
        &self,
        path: &str,
        config: &ImageConfig,
    ) -> Result<RawImageData, ImageError> {
        log::info!("📁 开始读取本地图片 - 路径: {}", path);

        let file_path = Path::new(path);
        if !file_path.exists() {
            return Err(ImageError::FileSystem(format!("文件不存在：{}", path)));
        }

        let metadata = std::fs::metadata(file_path)
            .map_err(|e| ImageError::FileSystem(format!("无法读取文件信息：{}", e)))?;

        if !metadata.is_file() {
            return Err(ImageError::FileSystem(format!("不是普通文件：{}", path)));
        }

        if metadata.len() > config.max_file_size {
            return Err(ImageError::ResourceLimit(format!(
                "文件过大：{:.2} MB（限制：{:.2} MB）",
                metadata.len() as f64 / 1024.0 / 1024.0,
                config.max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        let bytes = std::fs::read(file_path)
            .map_err(|e| ImageError::FileSystem(format!("无法读取图片文件：{}", e)))?;
        Self::validate_image_signature(&bytes)?;

        Ok(RawImageData {
            bytes,
            source_hint: "file",
        })
    }

    fn estimate_base64_decoded_upper_bound_len(base64_data: &str) -> Result<u64, ImageError> {
        let len = base64_data.trim().len() as u64;
        let groups = len
            .checked_add(3)
            .ok_or_else(|| ImageError::ResourceLimit("Base64 输入长度溢出".to_string()))?
            / 4;

        groups
            .checked_mul(3)
            .ok_or_else(|| ImageError::ResourceLimit("Base64 解码体积估算溢出".to_string()))
    }

    /// 解析 Base64 输入（支持 Data URL / 纯 Base64），解码前先按估算体积拒绝超限输入。
    pub(crate) fn parse_base64_with_limit(
        data: &str,
        max_file_size: u64,
    ) -> Result<Vec<u8>, ImageError> {
        let normalized = data.trim();

        let payload = if normalized.starts_with(DATA_URL_IMAGE_PREFIX) {
            let base64_start = normalized
                .find(DATA_URL_BASE64_MARKER)
                .ok_or_else(|| ImageError::InvalidFormat("缺少 base64 标记".to_string()))?;
            &normalized[base64_start + DATA_URL_BASE64_MARKER.len()..]
        } else if normalized.starts_with("data:") {
            return Err(ImageError::InvalidFormat("Data URL 不是图片类型".to_string()));
        } else {
            normalized
        };

        let estimated_len = Self::estimate_base64_decoded_upper_bound_len(payload)?;
        if estimated_len > max_file_size {
            return Err(ImageError::ResourceLimit(format!(
                "Base64 预计解码体积过大：{:.2} MB（限制：{:.2} MB）",
                estimated_len as f64 / 1024.0 / 1024.0,
                max_file_size as f64 / 1024.0 / 1024.0
            )));
        }

        general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| ImageError::Decode(format!("Base64 解码失败：{}", e)))
    }

    /// 通过文件签名（magic bytes）校验输入是否为图片。
    fn validate_image_signature(bytes: &[u8]) -> Result<(), ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::InvalidFormat("图片内容为空".to_string()));
        }

        let kind = infer::get(bytes)
            .ok_or_else(|| ImageError::InvalidFormat("无法识别图片类型".to_string()))?;

        if kind.matcher_type() != infer::MatcherType::Image {
            return Err(ImageError::InvalidFormat(format!(
                "文件签名不是图片类型：{}",
                kind.mime_type()
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_handler::test_support::create_png_bytes;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_dir() -> std::path::PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock error")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("icon-cropper-loader-test-{nanos}"));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    #[test]
    fn load_from_base64_rejects_non_image_payload() {
        let handler = ImageHandler::new(ImageConfig::default());
        let config = ImageConfig::default();

        let result = handler.load_from_base64("SGVsbG8=", &config);

        assert!(matches!(result, Err(ImageError::InvalidFormat(_))));
    }

    #[test]
    fn load_from_base64_accepts_data_url() {
        let handler = ImageHandler::new(ImageConfig::default());
        let config = ImageConfig::default();
        let png = create_png_bytes(8, 8);
        let data_url = format!(
            "data:image/png;base64,{}",
            general_purpose::STANDARD.encode(&png)
        );

        let raw = handler
            .load_from_base64(&data_url, &config)
            .expect("data url should load");

        assert_eq!(raw.bytes, png);
        assert_eq!(raw.source_hint, "base64");
    }

    #[test]
    fn parse_base64_with_limit_rejects_large_payload_before_decode() {
        let huge = "A".repeat(1024 * 1024);
        let result = ImageHandler::parse_base64_with_limit(&huge, 32);

        assert!(matches!(result, Err(ImageError::ResourceLimit(_))));
    }

    #[test]
    fn parse_base64_rejects_non_image_data_url() {
        let result = ImageHandler::parse_base64_with_limit("data:text/plain;base64,SGVsbG8=", 1024);

        assert!(matches!(result, Err(ImageError::InvalidFormat(_))));
    }

    #[test]
    fn load_from_bytes_enforces_file_size_limit() {
        let handler = ImageHandler::new(ImageConfig::default());
        let mut config = ImageConfig::default();
        config.max_file_size = 16;

        let result = handler.load_from_bytes(create_png_bytes(32, 32), &config);

        assert!(matches!(result, Err(ImageError::ResourceLimit(_))));
    }

    #[test]
    fn load_from_file_reports_missing_file() {
        let handler = ImageHandler::new(ImageConfig::default());
        let dir = unique_temp_dir();
        let missing = dir.join("missing.png");

        let result = handler.load_from_file(&missing.to_string_lossy(), &ImageConfig::default());

        assert!(matches!(result, Err(ImageError::FileSystem(_))));
        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn load_from_file_reads_png_from_disk() {
        let handler = ImageHandler::new(ImageConfig::default());
        let dir = unique_temp_dir();
        let path = dir.join("logo.png");
        std::fs::write(&path, create_png_bytes(10, 6)).expect("write test png");

        let raw = handler
            .load_from_file(&path.to_string_lossy(), &ImageConfig::default())
            .expect("png on disk should load");

        assert_eq!(raw.source_hint, "file");
        assert!(!raw.bytes.is_empty());
        let _ = std::fs::remove_dir_all(dir);
    }
}
