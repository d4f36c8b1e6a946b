//! 背景色选择器状态。
//!
//! 所有修改只能经由下列入口：
//! - `set_color`：取色器手势给出的绝对颜色
//! - `set_hex_input`：hex 文本框输入（文本总是保留，合法时才应用）
//! - `set_channel`：R/G/B 单通道输入（非法值忽略）
//! - `set_transparent`：透明开关
//!
//! 以及两个纯界面入口 `toggle_popover` / `switch_picker_mode`。
//! 视图层通过 `subscribe()` 拿到只读快照。

use image::Rgba;
use serde::Serialize;
use tokio::sync::watch;

use super::color::BackgroundColor;

/// 关闭透明时恢复的默认颜色。
pub const DEFAULT_HEX_INPUT: &str = "#ffffff";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerMode {
    #[default]
    Hex,
    Rgb,
}

/// 视图层可见的只读快照。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectorSnapshot {
    pub color: String,
    pub label: String,
    pub hex_input: String,
    pub mode: PickerMode,
    pub popover_open: bool,
    pub transparent: bool,
}

pub struct BackgroundColorSelector {
    color: BackgroundColor,
    hex_input: String,
    mode: PickerMode,
    popover_open: bool,
    notifier: watch::Sender<SelectorSnapshot>,
}

impl Default for BackgroundColorSelector {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundColorSelector {
    /// 初始状态：透明、hex 模式、弹层关闭。
    pub fn new() -> Self {
        Self::with_color(BackgroundColor::Transparent)
    }

    pub fn with_color(color: BackgroundColor) -> Self {
        let hex_input = color
            .to_hex()
            .unwrap_or_else(|| DEFAULT_HEX_INPUT.to_string());
        let initial = SelectorSnapshot {
            color: color.to_string(),
            label: String::new(),
            hex_input: hex_input.clone(),
            mode: PickerMode::Hex,
            popover_open: false,
            transparent: color.is_transparent(),
        };
        let (notifier, _) = watch::channel(initial);

        let selector = Self {
            color,
            hex_input,
            mode: PickerMode::Hex,
            popover_open: false,
            notifier,
        };
        selector.publish();
        selector
    }

    pub fn color(&self) -> BackgroundColor {
        self.color
    }

    pub fn hex_input(&self) -> &str {
        &self.hex_input
    }

    pub fn mode(&self) -> PickerMode {
        self.mode
    }

    pub fn is_popover_open(&self) -> bool {
        self.popover_open
    }

    /// RGB 模式下三个输入框显示的值。
    pub fn channel_inputs(&self) -> Option<[u8; 3]> {
        self.color.channels()
    }

    /// 色块旁的文字：`Transparent` 或当前颜色的大写表示。
    pub fn display_label(&self) -> String {
        match self.color {
            BackgroundColor::Transparent => "Transparent".to_string(),
            color => match self.mode {
                PickerMode::Hex => color.to_string().to_uppercase(),
                PickerMode::Rgb => color.to_rgb_string().unwrap_or_default().to_uppercase(),
            },
        }
    }

    pub fn snapshot(&self) -> SelectorSnapshot {
        SelectorSnapshot {
            color: self.color.to_string(),
            label: self.display_label(),
            hex_input: self.hex_input.clone(),
            mode: self.mode,
            popover_open: self.popover_open,
            transparent: self.color.is_transparent(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<SelectorSnapshot> {
        self.notifier.subscribe()
    }

    fn publish(&self) {
        self.notifier.send_replace(self.snapshot());
    }

    /// 取色器手势：直接设置颜色，并同步 hex 文本框。
    pub fn set_color(&mut self, color: BackgroundColor) {
        if color.is_transparent() {
            self.set_transparent(true);
            return;
        }

        self.color = color;
        self.hex_input = match self.mode {
            PickerMode::Hex => color.to_hex(),
            PickerMode::Rgb => color.to_rgb_string(),
        }
        .unwrap_or_default();
        self.publish();
    }

    /// hex 文本输入。返回是否应用到了当前颜色。
    pub fn set_hex_input(&mut self, text: &str) -> bool {
        self.hex_input = text.to_string();

        let applied = match BackgroundColor::from_hex(text) {
            Ok(color) => {
                self.color = color;
                true
            }
            Err(_) => {
                log::debug!("🎨 hex 输入未完成或非法，保留原颜色：{:?}", text);
                false
            }
        };

        self.publish();
        applied
    }

    /// 单通道输入（0 = R, 1 = G, 2 = B）。非法输入被忽略，返回是否生效。
    pub fn set_channel(&mut self, index: usize, text: &str) -> bool {
        let BackgroundColor::Solid(Rgba(mut pixel)) = self.color else {
            return false;
        };
        if index > 2 {
            return false;
        }

        let Ok(value) = text.trim().parse::<i64>() else {
            log::debug!("🎨 通道输入不是整数，忽略：{:?}", text);
            return false;
        };
        let Ok(value) = u8::try_from(value) else {
            log::debug!("🎨 通道输入超出 0~255，忽略：{}", value);
            return false;
        };

        pixel[index] = value;
        self.color = BackgroundColor::Solid(Rgba(pixel));
        self.publish();
        true
    }

    /// 透明开关。打开时颜色变为透明；关闭时恢复白色。两种情况都会关闭弹层。
    pub fn set_transparent(&mut self, transparent: bool) {
        self.color = if transparent {
            BackgroundColor::Transparent
        } else {
            BackgroundColor::WHITE
        };
        self.popover_open = false;
        self.publish();
    }

    /// 切换取色弹层；透明状态下不可打开。
    pub fn toggle_popover(&mut self) -> bool {
        if self.color.is_transparent() {
            return false;
        }
        self.popover_open = !self.popover_open;
        self.publish();
        true
    }

    /// 在 hex / rgb 两种取色模式间切换，切回 hex 时用当前颜色刷新文本框。
    pub fn switch_picker_mode(&mut self) -> PickerMode {
        self.mode = match self.mode {
            PickerMode::Hex => PickerMode::Rgb,
            PickerMode::Rgb => {
                if let Some(hex) = self.color.to_hex() {
                    self.hex_input = hex;
                }
                PickerMode::Hex
            }
        };
        self.publish();
        self.mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_transparent_with_white_hex_input() {
        let selector = BackgroundColorSelector::new();

        assert!(selector.color().is_transparent());
        assert_eq!(selector.hex_input(), DEFAULT_HEX_INPUT);
        assert_eq!(selector.display_label(), "Transparent");
        assert_eq!(selector.mode(), PickerMode::Hex);
    }

    #[test]
    fn partial_hex_is_kept_in_field_but_not_applied() {
        let mut selector = BackgroundColorSelector::with_color(BackgroundColor::rgb(1, 2, 3));

        assert!(!selector.set_hex_input("#ab"));
        assert_eq!(selector.hex_input(), "#ab");
        assert_eq!(selector.color(), BackgroundColor::rgb(1, 2, 3));

        assert!(selector.set_hex_input("#AbCdEf"));
        assert_eq!(selector.color(), BackgroundColor::rgb(0xab, 0xcd, 0xef));
    }

    #[test]
    fn invalid_channel_edits_are_ignored() {
        let mut selector = BackgroundColorSelector::with_color(BackgroundColor::rgb(10, 20, 30));

        for bad in ["256", "-1", "abc", "", "1.5"] {
            assert!(!selector.set_channel(1, bad));
        }
        assert!(!selector.set_channel(3, "5"));
        assert_eq!(selector.color(), BackgroundColor::rgb(10, 20, 30));

        assert!(selector.set_channel(1, " 200 "));
        assert_eq!(selector.color(), BackgroundColor::rgb(10, 200, 30));
    }

    #[test]
    fn channel_edit_is_ignored_while_transparent() {
        let mut selector = BackgroundColorSelector::new();

        assert!(!selector.set_channel(0, "10"));
        assert!(selector.color().is_transparent());
    }

    #[test]
    fn transparent_closes_and_locks_popover() {
        let mut selector = BackgroundColorSelector::with_color(BackgroundColor::rgb(0, 0, 0));
        assert!(selector.toggle_popover());
        assert!(selector.is_popover_open());

        selector.set_transparent(true);
        assert!(!selector.is_popover_open());
        assert!(!selector.toggle_popover());
        assert!(!selector.is_popover_open());

        selector.set_transparent(false);
        assert_eq!(selector.color(), BackgroundColor::WHITE);
        assert!(selector.toggle_popover());
    }

    #[test]
    fn mode_switch_roundtrip_preserves_hex() {
        let mut selector = BackgroundColorSelector::new();
        selector.set_transparent(false);
        assert!(selector.set_hex_input("#00ff00"));

        assert_eq!(selector.switch_picker_mode(), PickerMode::Rgb);
        assert_eq!(selector.channel_inputs(), Some([0, 255, 0]));
        assert_eq!(selector.display_label(), "RGB(0, 255, 0)");

        assert_eq!(selector.switch_picker_mode(), PickerMode::Hex);
        assert_eq!(selector.hex_input(), "#00ff00");
        assert_eq!(selector.color().to_hex().as_deref(), Some("#00ff00"));
    }

    #[test]
    fn picker_gesture_in_rgb_mode_writes_rgb_text() {
        let mut selector = BackgroundColorSelector::with_color(BackgroundColor::WHITE);
        selector.switch_picker_mode();

        selector.set_color(BackgroundColor::rgb(1, 2, 3));

        assert_eq!(selector.hex_input(), "rgb(1, 2, 3)");
        assert_eq!(selector.switch_picker_mode(), PickerMode::Hex);
        assert_eq!(selector.hex_input(), "#010203");
    }

    #[test]
    fn subscribers_see_latest_snapshot() {
        let mut selector = BackgroundColorSelector::new();
        let receiver = selector.subscribe();

        selector.set_transparent(false);
        selector.set_hex_input("#123456");

        let snapshot = receiver.borrow().clone();
        assert_eq!(snapshot.color, "#123456");
        assert_eq!(snapshot.label, "#123456");
        assert!(!snapshot.transparent);
    }
}
