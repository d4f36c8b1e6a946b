//! 背景色值与文本表示（hex / rgb() / rgba()）之间的转换。

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use once_cell::sync::Lazy;
use regex::Regex;

/// 严格的 6 位 hex 格式，只有完全匹配才会被应用到当前颜色。
static HEX_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").expect("hex pattern is valid"));

static RGB_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^rgba?\(\s*(\d{1,3})\s*,\s*(\d{1,3})\s*,\s*(\d{1,3})\s*(?:,\s*([0-9]*\.?[0-9]+)\s*)?\)$",
    )
    .expect("rgb pattern is valid")
});

pub const TRANSPARENT_KEYWORD: &str = "transparent";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorParseError {
    #[error("无效的颜色值：{0}")]
    Invalid(String),

    #[error("通道值超出 0~255：{0}")]
    ChannelOutOfRange(String),

    #[error("透明度超出 0~1：{0}")]
    AlphaOutOfRange(String),
}

/// 背景填充：透明或一个具体颜色。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackgroundColor {
    #[default]
    Transparent,
    Solid(Rgba<u8>),
}

impl BackgroundColor {
    pub const WHITE: Self = Self::Solid(Rgba([255, 255, 255, 255]));

    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::Solid(Rgba([r, g, b, 255]))
    }

    pub fn is_transparent(&self) -> bool {
        matches!(self, Self::Transparent)
    }

    /// 是否是严格的 `#rrggbb` 文本。
    pub fn is_valid_hex(text: &str) -> bool {
        HEX_PATTERN.is_match(text)
    }

    /// 解析严格的 `#rrggbb`。
    pub fn from_hex(text: &str) -> Result<Self, ColorParseError> {
        if !Self::is_valid_hex(text) {
            return Err(ColorParseError::Invalid(text.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&text[range], 16)
                .map_err(|_| ColorParseError::Invalid(text.to_string()))
        };
        Ok(Self::rgb(channel(1..3)?, channel(3..5)?, channel(5..7)?))
    }

    /// 解析 `rgb(r, g, b)` / `rgba(r, g, b, a)`，`a` 取值 0~1。
    pub fn from_rgb_string(text: &str) -> Result<Self, ColorParseError> {
        let captures = RGB_PATTERN
            .captures(text.trim())
            .ok_or_else(|| ColorParseError::Invalid(text.to_string()))?;

        let mut channels = [0u8; 3];
        for (index, slot) in channels.iter_mut().enumerate() {
            let raw = &captures[index + 1];
            *slot = raw
                .parse::<u8>()
                .map_err(|_| ColorParseError::ChannelOutOfRange(raw.to_string()))?;
        }

        let alpha = match captures.get(4) {
            Some(raw) => {
                let value: f64 = raw
                    .as_str()
                    .parse()
                    .map_err(|_| ColorParseError::Invalid(text.to_string()))?;
                if !(0.0..=1.0).contains(&value) {
                    return Err(ColorParseError::AlphaOutOfRange(raw.as_str().to_string()));
                }
                (value * 255.0).round() as u8
            }
            None => 255,
        };

        let [r, g, b] = channels;
        Ok(Self::Solid(Rgba([r, g, b, alpha])))
    }

    /// `#rrggbb`（小写）；透明时为 `None`。alpha 不参与 hex 表示。
    pub fn to_hex(&self) -> Option<String> {
        match self {
            Self::Transparent => None,
            Self::Solid(Rgba([r, g, b, _])) => Some(format!("#{:02x}{:02x}{:02x}", r, g, b)),
        }
    }

    /// `rgb(r, g, b)`，非不透明时为 `rgba(r, g, b, a)`，`a` 保留三位小数以便无损读回。
    pub fn to_rgb_string(&self) -> Option<String> {
        match self {
            Self::Transparent => None,
            Self::Solid(Rgba([r, g, b, 255])) => Some(format!("rgb({}, {}, {})", r, g, b)),
            Self::Solid(Rgba([r, g, b, a])) => {
                let alpha = format!("{:.3}", *a as f64 / 255.0);
                let alpha = alpha.trim_end_matches('0').trim_end_matches('.');
                Some(format!("rgba({}, {}, {}, {})", r, g, b, alpha))
            }
        }
    }

    pub fn channels(&self) -> Option<[u8; 3]> {
        match self {
            Self::Transparent => None,
            Self::Solid(Rgba([r, g, b, _])) => Some([*r, *g, *b]),
        }
    }

    /// 用于填充画布的像素；透明时不填充。
    pub fn fill_pixel(&self) -> Option<Rgba<u8>> {
        match self {
            Self::Transparent => None,
            Self::Solid(pixel) => Some(*pixel),
        }
    }
}

impl FromStr for BackgroundColor {
    type Err = ColorParseError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case(TRANSPARENT_KEYWORD) {
            return Ok(Self::Transparent);
        }
        if trimmed.starts_with('#') {
            return Self::from_hex(trimmed);
        }
        Self::from_rgb_string(trimmed)
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transparent => f.write_str(TRANSPARENT_KEYWORD),
            Self::Solid(Rgba([_, _, _, 255])) => {
                f.write_str(&self.to_hex().unwrap_or_default())
            }
            Self::Solid(_) => f.write_str(&self.to_rgb_string().unwrap_or_default()),
        }
    }
}
