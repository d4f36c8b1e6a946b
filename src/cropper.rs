//! # 裁剪器模块
//!
//! ## 设计思路
//!
//! 裁剪器以能力接口 [`CroppedBitmapSource`] 的形式注入导出器，
//! 导出器只关心“拿到当前裁剪结果的位图”，不依赖具体的交互控件。
//!
//! ## 实现思路
//!
//! - `ImageCropper` 持有源图（`Arc` 共享，避免每次导出复制整张原图）与正方形选区。
//! - `cropped_bitmap()` 按选区从源图中截取原始分辨率的位图。
//! - `RgbaImage` 本身也实现该接口，便于测试直接注入任意宽高比的位图。

pub mod selection;

use std::sync::Arc;

use image::RgbaImage;

use crate::image_handler::{ImageError, SourceImage};

pub use selection::{CropRegion, SquareSelection};

/// 提供“当前裁剪结果”的能力接口。
pub trait CroppedBitmapSource {
    fn cropped_bitmap(&self) -> Result<RgbaImage, ImageError>;
}

impl CroppedBitmapSource for RgbaImage {
    fn cropped_bitmap(&self) -> Result<RgbaImage, ImageError> {
        if self.width() == 0 || self.height() == 0 {
            return Err(ImageError::InvalidCrop("裁剪位图尺寸为 0".to_string()));
        }
        Ok(self.clone())
    }
}

/// 源图 + 1:1 选区。
#[derive(Debug, Clone)]
pub struct ImageCropper {
    image: Arc<SourceImage>,
    selection: SquareSelection,
}

impl ImageCropper {
    /// 以居中的默认选区创建裁剪器。
    pub fn new(image: Arc<SourceImage>) -> Self {
        let (width, height) = image.dimensions();
        Self {
            selection: SquareSelection::centered(width, height),
            image,
        }
    }

    pub fn source(&self) -> &SourceImage {
        &self.image
    }

    pub fn selection(&self) -> CropRegion {
        self.selection.region()
    }

    /// 设置选区（左上角 + 边长），越界部分会被夹紧。
    pub fn set_selection(&mut self, x: u32, y: u32, size: u32) -> CropRegion {
        self.selection.set(x, y, size);
        log::debug!("✂️ 裁剪选区更新：{:?}", self.selection.region());
        self.selection.region()
    }

    pub fn move_selection(&mut self, dx: i64, dy: i64) -> CropRegion {
        self.selection.move_by(dx, dy);
        self.selection.region()
    }

    pub fn resize_selection(&mut self, size: u32) -> CropRegion {
        self.selection.resize(size);
        self.selection.region()
    }

    pub fn reset_selection(&mut self) -> CropRegion {
        self.selection.reset();
        self.selection.region()
    }
}

impl CroppedBitmapSource for ImageCropper {
    fn cropped_bitmap(&self) -> Result<RgbaImage, ImageError> {
        let region = self.selection.region();
        if !region.is_valid() || !region.fits_within(self.image.dimensions()) {
            return Err(ImageError::InvalidCrop(format!(
                "选区 {:?} 超出源图 {:?}",
                region.as_tuple(),
                self.image.dimensions()
            )));
        }

        let (x, y, width, height) = region.as_tuple();
        Ok(image::imageops::crop_imm(self.image.bitmap(), x, y, width, height).to_image())
    }
}
