//! # 背景色模块
//!
//! - `color`：`BackgroundColor` 值类型与 hex / rgb 文本表示互转
//! - `selector`：带取色弹层与模式切换的选择器状态，导出时只读取其中的颜色

pub mod color;
pub mod selector;

pub use color::{BackgroundColor, ColorParseError};
pub use selector::{BackgroundColorSelector, PickerMode, SelectorSnapshot};
