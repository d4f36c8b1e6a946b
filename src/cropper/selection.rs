//! 正方形裁剪选区。
//!
//! 选区始终保持 1:1，且完全落在源图范围内；所有修改入口都会重新夹紧。

/// 裁剪区域（源图像素坐标）。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    pub fn as_tuple(&self) -> (u32, u32, u32, u32) {
        (self.x, self.y, self.width, self.height)
    }

    /// 宽高均大于 0。
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn is_square(&self) -> bool {
        self.width == self.height
    }

    /// 区域是否完全落在 `bounds` 尺寸的图像内。
    pub fn fits_within(&self, bounds: (u32, u32)) -> bool {
        let right = self.x as u64 + self.width as u64;
        let bottom = self.y as u64 + self.height as u64;
        right <= bounds.0 as u64 && bottom <= bounds.1 as u64
    }
}

/// 初始选区占短边的比例。
pub const INITIAL_CROP_AREA: f64 = 0.8;

/// 选区最小边长（像素）。
pub const MIN_SELECTION_SIZE: u32 = 1;

/// 受 1:1 约束的选区状态。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SquareSelection {
    bounds: (u32, u32),
    region: CropRegion,
}

impl SquareSelection {
    /// 在图像中央放置占短边 [`INITIAL_CROP_AREA`] 的正方形选区。
    pub fn centered(image_width: u32, image_height: u32) -> Self {
        let short_side = image_width.min(image_height);
        let size = ((short_side as f64 * INITIAL_CROP_AREA).round() as u32)
            .clamp(MIN_SELECTION_SIZE.min(short_side), short_side);
        let x = (image_width - size) / 2;
        let y = (image_height - size) / 2;

        Self {
            bounds: (image_width, image_height),
            region: CropRegion::new(x, y, size, size),
        }
    }

    pub fn region(&self) -> CropRegion {
        self.region
    }

    pub fn bounds(&self) -> (u32, u32) {
        self.bounds
    }

    fn max_size(&self) -> u32 {
        self.bounds.0.min(self.bounds.1)
    }

    /// 设置选区左上角与边长，超出范围时夹紧到图像内。
    pub fn set(&mut self, x: u32, y: u32, size: u32) {
        let size = size.max(MIN_SELECTION_SIZE).min(self.max_size());
        let x = x.min(self.bounds.0 - size);
        let y = y.min(self.bounds.1 - size);
        self.region = CropRegion::new(x, y, size, size);
    }

    /// 平移选区，边长不变。
    pub fn move_by(&mut self, dx: i64, dy: i64) {
        let size = self.region.width;
        let max_x = (self.bounds.0 - size) as i64;
        let max_y = (self.bounds.1 - size) as i64;
        let x = (self.region.x as i64 + dx).clamp(0, max_x) as u32;
        let y = (self.region.y as i64 + dy).clamp(0, max_y) as u32;
        self.region = CropRegion::new(x, y, size, size);
    }

    /// 以当前中心为锚点改变边长。
    pub fn resize(&mut self, size: u32) {
        let size = size.max(MIN_SELECTION_SIZE).min(self.max_size());
        let center_x = self.region.x as i64 + self.region.width as i64 / 2;
        let center_y = self.region.y as i64 + self.region.height as i64 / 2;
        let half = size as i64 / 2;
        let x = (center_x - half).clamp(0, (self.bounds.0 - size) as i64) as u32;
        let y = (center_y - half).clamp(0, (self.bounds.1 - size) as i64) as u32;
        self.region = CropRegion::new(x, y, size, size);
    }

    pub fn reset(&mut self) {
        *self = Self::centered(self.bounds.0, self.bounds.1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_selection_is_square_and_inside() {
        let selection = SquareSelection::centered(1000, 800);
        let region = selection.region();

        assert!(region.is_square());
        assert_eq!(region.width, 640);
        assert_eq!((region.x, region.y), (180, 80));
        assert!(region.fits_within((1000, 800)));
    }

    #[test]
    fn set_clamps_oversized_selection() {
        let mut selection = SquareSelection::centered(300, 200);
        selection.set(250, 150, 500);

        assert_eq!(selection.region(), CropRegion::new(100, 0, 200, 200));
    }

    #[test]
    fn move_by_stops_at_edges() {
        let mut selection = SquareSelection::centered(100, 100);
        selection.move_by(-1_000, 1_000);
        let region = selection.region();

        assert_eq!(region.x, 0);
        assert_eq!(region.y + region.height, 100);
    }

    #[test]
    fn resize_keeps_center_when_possible() {
        let mut selection = SquareSelection::centered(1000, 1000);
        selection.set(400, 400, 200);
        selection.resize(100);

        assert_eq!(selection.region(), CropRegion::new(450, 450, 100, 100));
    }

    #[test]
    fn zero_size_request_becomes_minimum() {
        let mut selection = SquareSelection::centered(10, 10);
        selection.set(3, 3, 0);

        assert_eq!(selection.region().width, MIN_SELECTION_SIZE);
    }

    #[test]
    fn tiny_image_still_yields_valid_region() {
        let selection = SquareSelection::centered(1, 5);

        assert_eq!(selection.region(), CropRegion::new(0, 2, 1, 1));
        assert!(selection.region().is_valid());
    }
}
