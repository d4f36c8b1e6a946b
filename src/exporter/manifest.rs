//! 固定导出清单：尺寸顺序与条目命名都不对外开放配置。

/// 导出的目标尺寸（像素），按打包顺序排列。
pub const EXPORT_SIZES: [u32; 7] = [16, 32, 48, 64, 128, 256, 512];

/// 下载文件名。
pub const ARCHIVE_FILE_NAME: &str = "icons.zip";

/// 压缩包内的条目名：`icon_{S}x{S}.png`。
pub fn entry_name(size: u32) -> String {
    format!("icon_{size}x{size}.png")
}
