//! # 核心编排模块
//!
//! ## 设计思路
//!
//! `ImageHandler` 只负责加载流程编排与配置管理，不持有任何会话状态。
//! 处理链路固定为：
//! 1. 读取配置快照
//! 2. 按来源加载原始字节
//! 3. 解码并准备 RGBA 位图
//!
//! ## 实现思路
//!
//! - 配置通过 `Arc<RwLock<ImageConfig>>` 支持运行时动态切档。
//! - 单次请求内使用“同一配置快照”，避免处理中途配置漂移。
//! - 记录 `load/decode/total` 阶段耗时，便于性能诊断。

use std::sync::{Arc, RwLock};
use std::time::Instant;

use super::{ExportProfile, ImageConfig, ImageError, ImageSource, SourceImage};

/// 图片处理器。
///
/// 封装了配置状态，并编排加载与解码子模块。
pub struct ImageHandler {
    pub(super) config: Arc<RwLock<ImageConfig>>,
}

impl ImageHandler {
    /// 根据初始配置创建处理器。
    ///
    /// # 示例
    /// ```rust
    /// use icon_cropper::image_handler::{ImageConfig, ImageHandler};
    ///
    /// let handler = ImageHandler::new(ImageConfig::default());
    /// assert!(handler.config_snapshot().is_ok());
    /// ```
    pub fn new(config: ImageConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
        }
    }

    /// 获取配置快照。
    ///
    /// 作用：保证单次请求链路使用一致参数。
    pub fn config_snapshot(&self) -> Result<ImageConfig, ImageError> {
        self.config
            .read()
            .map(|cfg| cfg.clone())
            .map_err(|_| ImageError::ResourceLimit("配置读取锁已中毒".to_string()))
    }

    /// 设置导出档位。
    pub fn set_profile(&self, profile: ExportProfile) -> Result<(), ImageError> {
        let mut config = self
            .config
            .write()
            .map_err(|_| ImageError::ResourceLimit("配置写入锁已中毒".to_string()))?;
        config.apply_profile(profile);

        log::info!(
            "⚙️ 已切换导出档位：{}（filter={:?}, png={:?}）",
            profile,
            config.resize_filter,
            config.png_compression
        );

        Ok(())
    }

    /// 获取当前生效档位。
    pub fn profile(&self) -> Result<ExportProfile, ImageError> {
        let config = self
            .config
            .read()
            .map_err(|_| ImageError::ResourceLimit("配置读取锁已中毒".to_string()))?;
        Ok(config.infer_profile())
    }

    /// 设置读取与解码的资源上限。
    pub fn set_limits(
        &self,
        max_file_size: u64,
        max_decoded_pixels: u64,
        max_decoded_bytes: u64,
    ) -> Result<(), ImageError> {
        if max_file_size < 1024 {
            return Err(ImageError::InvalidFormat("max_file_size 不能小于 1KB".to_string()));
        }
        if max_decoded_pixels < 512 * 512 {
            return Err(ImageError::InvalidFormat(
                "max_decoded_pixels 不能小于 512x512".to_string(),
            ));
        }
        if max_decoded_bytes < max_decoded_pixels.saturating_mul(4) {
            return Err(ImageError::InvalidFormat(
                "max_decoded_bytes 不能小于 max_decoded_pixels * 4".to_string(),
            ));
        }

        let mut config = self
            .config
            .write()
            .map_err(|_| ImageError::ResourceLimit("配置写入锁已中毒".to_string()))?;

        config.max_file_size = max_file_size;
        config.max_decoded_pixels = max_decoded_pixels;
        config.max_decoded_bytes = max_decoded_bytes;

        Ok(())
    }

    /// 处理主入口：从任意来源加载并解码图片。
    ///
    /// 同步执行，调用方负责放到阻塞线程池中。
    pub fn load_and_decode(&self, source: ImageSource) -> Result<SourceImage, ImageError> {
        let config = self.config_snapshot()?;
        let total_start = Instant::now();

        let load_start = Instant::now();
        let raw = self.load_source(source, &config)?;
        let load_elapsed = load_start.elapsed();

        let decode_start = Instant::now();
        let image = self.decode_source_image(raw, &config)?;
        let decode_elapsed = decode_start.elapsed();

        log::info!(
            "✅ 图片加载完成 - load={}ms decode={}ms total={}ms",
            load_elapsed.as_millis(),
            decode_elapsed.as_millis(),
            total_start.elapsed().as_millis()
        );

        Ok(image)
    }
}
