//! # 图标导出模块
//!
//! ## 设计思路
//!
//! 导出器是纯函数式的：输入“当前裁剪位图 + 背景色”，输出七个 PNG 与一个压缩包，
//! 不修改背景色、源图或选区。裁剪能力通过 [`CroppedBitmapSource`] 注入。
//!
//! ## 实现思路
//!
//! 1. 读取裁剪位图（拿不到时直接返回错误，由会话层决定是否跳过）
//! 2. 对清单中每个尺寸：铺底色 → 等比缩放 → 居中合成 → PNG 编码（`render`）
//! 3. 七个尺寸全部完成后再打包（`archive`）
//! 4. 打包结果交给下载目标（`download`），文件名固定为 `icons.zip`

pub mod archive;
pub mod download;
pub mod manifest;
pub mod render;

use std::time::Instant;

use bytes::Bytes;
use chrono::{DateTime, Local};
use image::RgbaImage;
use image::codecs::png::CompressionType;
use image::imageops::FilterType;
use serde::Serialize;

use crate::background::BackgroundColor;
use crate::cropper::CroppedBitmapSource;
use crate::image_handler::{ExportProfile, ImageConfig, ImageError};

pub use archive::IconEntry;
pub use download::{DirectoryDownload, DownloadTarget};
pub use manifest::{ARCHIVE_FILE_NAME, EXPORT_SIZES, entry_name};

/// 单个条目的导出摘要。
#[derive(Debug, Clone, Serialize)]
pub struct EntryReport {
    pub name: String,
    pub size: u32,
    pub bytes: usize,
}

/// 一次导出的摘要，CLI `--json` 直接序列化输出。
#[derive(Debug, Clone, Serialize)]
pub struct ExportReport {
    pub archive_name: &'static str,
    pub archive_bytes: usize,
    pub source_width: u32,
    pub source_height: u32,
    pub background: String,
    pub profile: ExportProfile,
    pub entries: Vec<EntryReport>,
    pub render_ms: u128,
    pub archive_ms: u128,
    pub finished_at: DateTime<Local>,
}

/// 导出产物：压缩包 blob + 摘要。
#[derive(Debug, Clone)]
pub struct ExportBundle {
    pub archive: Bytes,
    pub report: ExportReport,
}

/// 图标导出器，持有一次导出所用的缩放/编码参数。
#[derive(Debug, Clone)]
pub struct IconExporter {
    filter: FilterType,
    compression: CompressionType,
    profile: ExportProfile,
}

impl Default for IconExporter {
    fn default() -> Self {
        Self::from_config(&ImageConfig::default())
    }
}

impl IconExporter {
    pub fn from_config(config: &ImageConfig) -> Self {
        Self {
            filter: config.resize_filter,
            compression: config.png_compression,
            profile: config.infer_profile(),
        }
    }

    /// 按清单渲染并编码全部尺寸。
    pub fn render_all(
        &self,
        bitmap: &RgbaImage,
        background: BackgroundColor,
    ) -> Result<Vec<IconEntry>, ImageError> {
        if bitmap.width() == 0 || bitmap.height() == 0 {
            return Err(ImageError::InvalidCrop("裁剪位图尺寸为 0".to_string()));
        }

        EXPORT_SIZES
            .iter()
            .map(|&size| {
                let icon = render::render_icon(bitmap, size, background, self.filter);
                let png = render::encode_png(&icon, self.compression)?;
                log::debug!("🖼️ {} 渲染完成（{} 字节）", entry_name(size), png.len());
                Ok(IconEntry {
                    size,
                    name: entry_name(size),
                    png,
                })
            })
            .collect()
    }

    /// 完整导出：读取裁剪 → 渲染七个尺寸 → 打包。
    pub fn export(
        &self,
        source: &dyn CroppedBitmapSource,
        background: BackgroundColor,
    ) -> Result<ExportBundle, ImageError> {
        let bitmap = source.cropped_bitmap()?;
        let (source_width, source_height) = bitmap.dimensions();

        let render_start = Instant::now();
        let entries = self.render_all(&bitmap, background)?;
        let render_elapsed = render_start.elapsed();

        let archive_start = Instant::now();
        let archive = archive::pack_archive(&entries)?;
        let archive_elapsed = archive_start.elapsed();

        log::info!(
            "✅ 图标导出完成 - 源 {}x{} 背景 {} render={}ms archive={}ms size={}KB",
            source_width,
            source_height,
            background,
            render_elapsed.as_millis(),
            archive_elapsed.as_millis(),
            archive.len() / 1024
        );

        let report = ExportReport {
            archive_name: ARCHIVE_FILE_NAME,
            archive_bytes: archive.len(),
            source_width,
            source_height,
            background: background.to_string(),
            profile: self.profile,
            entries: entries
                .iter()
                .map(|entry| EntryReport {
                    name: entry.name.clone(),
                    size: entry.size,
                    bytes: entry.png.len(),
                })
                .collect(),
            render_ms: render_elapsed.as_millis(),
            archive_ms: archive_elapsed.as_millis(),
            finished_at: Local::now(),
        };

        Ok(ExportBundle { archive, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use std::io::Cursor;

    struct FailingCropper;

    impl CroppedBitmapSource for FailingCropper {
        fn cropped_bitmap(&self) -> Result<RgbaImage, ImageError> {
            Err(ImageError::InvalidCrop("not ready".to_string()))
        }
    }

    #[test]
    fn export_produces_all_manifest_entries() {
        let bitmap = RgbaImage::from_pixel(40, 40, Rgba([9, 9, 9, 255]));
        let exporter = IconExporter::default();

        let bundle = exporter
            .export(&bitmap, BackgroundColor::Transparent)
            .expect("export should succeed");

        let names: Vec<&str> = bundle.report.entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "icon_16x16.png",
                "icon_32x32.png",
                "icon_48x48.png",
                "icon_64x64.png",
                "icon_128x128.png",
                "icon_256x256.png",
                "icon_512x512.png",
            ]
        );
        assert_eq!(bundle.report.archive_bytes, bundle.archive.len());

        let archive = zip::ZipArchive::new(Cursor::new(bundle.archive.to_vec())).expect("valid zip");
        assert_eq!(archive.len(), EXPORT_SIZES.len());
    }

    #[test]
    fn export_surfaces_cropper_failure() {
        let result = IconExporter::default().export(&FailingCropper, BackgroundColor::Transparent);

        assert!(matches!(result, Err(ImageError::InvalidCrop(_))));
    }

    #[test]
    fn export_does_not_touch_input_bitmap() {
        let bitmap = RgbaImage::from_pixel(3, 7, Rgba([1, 2, 3, 4]));
        let before = bitmap.clone();

        IconExporter::default()
            .export(&bitmap, BackgroundColor::rgb(0, 0, 0))
            .expect("export should succeed");

        assert_eq!(bitmap, before);
    }
}
