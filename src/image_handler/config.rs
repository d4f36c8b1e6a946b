//! # 配置模块
//!
//! ## 设计思路
//!
//! 将所有“可调策略”集中到 `ImageConfig`，保证运行时行为可观测、可调整、可测试。
//! 其中导出档位（quality / balanced / speed）作为高层语义，映射到底层参数组合。
//!
//! ## 实现思路
//!
//! - `Default` 提供最高画质配置（图标缩小到 16px 时细节最敏感）。
//! - `ExportProfile` 负责档位字符串解析与反向输出。
//! - `apply_profile` 将档位转换为具体参数。
//! - `infer_profile` 用于从当前配置反推档位（给调用方展示状态）。

use std::fmt;
use std::str::FromStr;

use image::codecs::png::CompressionType;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

use super::ImageError;

/// 图片处理配置。
///
/// 字段覆盖了读取、解码、缩放与 PNG 编码四个阶段。
#[derive(Debug, Clone)]
pub struct ImageConfig {
    /// 读取原始字节时允许的最大文件体积（字节）。
    pub max_file_size: u64,
    /// 解码后的像素上限（`width * height`）。
    pub max_decoded_pixels: u64,
    /// 解码阶段允许的预计内存上限（按 RGBA 估算，字节）。
    pub max_decoded_bytes: u64,
    /// 缩放滤镜策略。
    pub resize_filter: FilterType,
    /// PNG 压缩级别。
    pub png_compression: CompressionType,
}

impl Default for ImageConfig {
    fn default() -> Self {
        let mut config = Self {
            max_file_size: 50 * 1024 * 1024,
            max_decoded_pixels: 40_000_000,
            max_decoded_bytes: 160 * 1024 * 1024,
            resize_filter: FilterType::Lanczos3,
            png_compression: CompressionType::Best,
        };
        config.apply_profile(ExportProfile::Quality);
        config
    }
}

/// 导出档位（面向用户语义）。
///
/// - `Quality`：尽量保真
/// - `Balanced`：质量与速度平衡
/// - `Speed`：优先导出速度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportProfile {
    #[default]
    Quality,
    Balanced,
    Speed,
}

impl ExportProfile {
    /// 将档位输出为稳定字符串，供展示与持久化。
    ///
    /// # 示例
    /// ```rust
    /// use icon_cropper::image_handler::ExportProfile;
    ///
    /// assert_eq!(ExportProfile::Speed.as_str(), "speed");
    /// ```
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quality => "quality",
            Self::Balanced => "balanced",
            Self::Speed => "speed",
        }
    }
}

impl FromStr for ExportProfile {
    type Err = ImageError;

    /// 从外部字符串解析档位。
    ///
    /// # 示例
    /// ```rust
    /// use icon_cropper::image_handler::ExportProfile;
    ///
    /// let p: ExportProfile = "Balanced".parse()?;
    /// assert_eq!(p.as_str(), "balanced");
    /// # Ok::<(), icon_cropper::image_handler::ImageError>(())
    /// ```
    fn from_str(profile: &str) -> Result<Self, Self::Err> {
        match profile.trim().to_lowercase().as_str() {
            "quality" => Ok(Self::Quality),
            "balanced" => Ok(Self::Balanced),
            "speed" => Ok(Self::Speed),
            other => Err(ImageError::InvalidFormat(format!(
                "未知导出档位：{}（可选：quality / balanced / speed）",
                other
            ))),
        }
    }
}

impl fmt::Display for ExportProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ImageConfig {
    /// 基于当前参数反推导出档位。
    pub fn infer_profile(&self) -> ExportProfile {
        match self.resize_filter {
            FilterType::Lanczos3 => ExportProfile::Quality,
            FilterType::CatmullRom | FilterType::Gaussian => ExportProfile::Balanced,
            FilterType::Triangle | FilterType::Nearest => ExportProfile::Speed,
        }
    }

    /// 应用指定档位到实际参数。
    ///
    /// 体积与像素上限不随档位变化，只影响缩放与编码。
    pub fn apply_profile(&mut self, profile: ExportProfile) {
        match profile {
            ExportProfile::Quality => {
                self.resize_filter = FilterType::Lanczos3;
                self.png_compression = CompressionType::Best;
            }
            ExportProfile::Balanced => {
                self.resize_filter = FilterType::CatmullRom;
                self.png_compression = CompressionType::Default;
            }
            ExportProfile::Speed => {
                self.resize_filter = FilterType::Triangle;
                self.png_compression = CompressionType::Fast;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_quality_profile() {
        let config = ImageConfig::default();
        assert_eq!(config.infer_profile(), ExportProfile::Quality);
        assert_eq!(config.resize_filter, FilterType::Lanczos3);
    }

    #[test]
    fn apply_then_infer_profile_is_stable() {
        let mut config = ImageConfig::default();
        for profile in [ExportProfile::Speed, ExportProfile::Balanced, ExportProfile::Quality] {
            config.apply_profile(profile);
            assert_eq!(config.infer_profile(), profile);
        }
    }

    #[test]
    fn profile_parse_rejects_unknown_value() {
        let result = "ultra".parse::<ExportProfile>();
        assert!(matches!(result, Err(ImageError::InvalidFormat(_))));
        assert_eq!(" SPEED ".parse::<ExportProfile>().ok(), Some(ExportProfile::Speed));
    }
}
