//! 单尺寸渲染：铺底色 → 等比缩放 → 居中合成 → PNG 编码。

use image::codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder};
use image::imageops::FilterType;
use image::{ExtendedColorType, ImageEncoder, Rgba, RgbaImage};

use crate::background::BackgroundColor;
use crate::image_handler::{ImageError, ImageHandler};

const TRANSPARENT_PIXEL: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// 缩放后内容在 S×S 画布中的位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Placement {
    /// `(x, y)` 是否落在内容区域内。
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// 等比缩放到 `size` 以内并居中。
///
/// 奇数余量时多出的 1px 落在右/下侧。
pub fn compute_placement(source_width: u32, source_height: u32, size: u32) -> Placement {
    let scale = (size as f64 / source_width as f64).min(size as f64 / source_height as f64);
    let width = ((source_width as f64 * scale).round() as u32).clamp(1, size);
    let height = ((source_height as f64 * scale).round() as u32).clamp(1, size);

    Placement {
        x: (size - width) / 2,
        y: (size - height) / 2,
        width,
        height,
    }
}

/// 渲染一个 `size`×`size` 图标。
pub fn render_icon(
    bitmap: &RgbaImage,
    size: u32,
    background: BackgroundColor,
    filter: FilterType,
) -> RgbaImage {
    let fill = background.fill_pixel().unwrap_or(TRANSPARENT_PIXEL);
    let mut canvas = RgbaImage::from_pixel(size, size, fill);

    let placement = compute_placement(bitmap.width(), bitmap.height(), size);
    let scaled = ImageHandler::resize_exact(bitmap, placement.width, placement.height, filter);

    image::imageops::overlay(&mut canvas, &scaled, placement.x as i64, placement.y as i64);
    canvas
}

pub fn encode_png(image: &RgbaImage, compression: CompressionType) -> Result<Vec<u8>, ImageError> {
    let mut buf = Vec::new();
    let encoder = PngEncoder::new_with_quality(&mut buf, compression, PngFilterType::Adaptive);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| ImageError::Encode(format!("PNG 编码失败：{}", e)))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exporter::manifest::EXPORT_SIZES;
    use proptest::prelude::*;

    fn opaque(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([0, 128, 255, 255]))
    }

    #[test]
    fn square_source_fills_whole_canvas() {
        for size in EXPORT_SIZES {
            assert_eq!(
                compute_placement(600, 600, size),
                Placement { x: 0, y: 0, width: size, height: size }
            );
        }
    }

    #[test]
    fn wide_source_is_letterboxed() {
        let placement = compute_placement(1000, 800, 16);

        assert_eq!(placement.width, 16);
        assert_eq!(placement.height, 13);
        assert_eq!((placement.x, placement.y), (0, 1));
    }

    #[test]
    fn transparent_margins_have_zero_alpha() {
        let icon = render_icon(&opaque(200, 100), 64, BackgroundColor::Transparent, FilterType::Lanczos3);
        let placement = compute_placement(200, 100, 64);

        assert_eq!(icon.dimensions(), (64, 64));
        for (x, y, pixel) in icon.enumerate_pixels() {
            if !placement.contains(x, y) {
                assert_eq!(pixel[3], 0, "pixel ({x}, {y}) should be transparent");
            }
        }
        assert!(icon.get_pixel(32, 32)[3] >= 254);
    }

    #[test]
    fn solid_margins_equal_background() {
        let red = BackgroundColor::rgb(255, 0, 0);
        let icon = render_icon(&opaque(100, 300), 48, red, FilterType::CatmullRom);
        let placement = compute_placement(100, 300, 48);

        for (x, y, pixel) in icon.enumerate_pixels() {
            if !placement.contains(x, y) {
                assert_eq!(pixel, &Rgba([255, 0, 0, 255]));
            }
        }
    }

    #[test]
    fn encoded_png_decodes_to_same_size() {
        let icon = render_icon(&opaque(10, 10), 32, BackgroundColor::Transparent, FilterType::Triangle);
        let png = encode_png(&icon, CompressionType::Fast).expect("encode should succeed");

        let decoded = image::load_from_memory(&png).expect("png should decode");
        assert_eq!((decoded.width(), decoded.height()), (32, 32));
    }

    proptest! {
        #[test]
        fn placement_is_centered_and_within_canvas(
            width in 1u32..4000,
            height in 1u32..4000,
            size_index in 0usize..EXPORT_SIZES.len(),
        ) {
            let size = EXPORT_SIZES[size_index];
            let placement = compute_placement(width, height, size);

            prop_assert!(placement.width >= 1 && placement.width <= size);
            prop_assert!(placement.height >= 1 && placement.height <= size);
            prop_assert!(placement.width == size || placement.height == size);

            let right = size - placement.x - placement.width;
            let bottom = size - placement.y - placement.height;
            prop_assert!(right.abs_diff(placement.x) <= 1);
            prop_assert!(bottom.abs_diff(placement.y) <= 1);
        }
    }
}
