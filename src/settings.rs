//! 应用设置：JSON 文件持久化的导出档位、默认背景色与输出目录。
//!
//! 文件缺失或内容损坏时回退到默认值，不阻断导出。

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::background::BackgroundColor;
use crate::error::AppError;
use crate::image_handler::ExportProfile;

pub const DEFAULT_OUTPUT_DIR: &str = ".";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default)]
    pub profile: ExportProfile,
    /// `#rrggbb` / `rgb(...)` / `transparent`
    #[serde(default)]
    pub default_background: Option<String>,
    #[serde(default)]
    pub output_dir: Option<String>,
}

impl AppSettings {
    /// 默认背景色；未配置时为透明。
    pub fn background(&self) -> Result<BackgroundColor, AppError> {
        match self.default_background.as_deref() {
            Some(text) if !text.trim().is_empty() => Ok(text.parse()?),
            _ => Ok(BackgroundColor::Transparent),
        }
    }

    pub fn output_dir(&self) -> PathBuf {
        match self.output_dir.as_deref() {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

pub fn load_settings_from_path(settings_path: &Path) -> AppSettings {
    if settings_path.exists() {
        match fs::read_to_string(settings_path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(settings) => return settings,
                Err(e) => log::warn!("⚠️ 设置文件解析失败，使用默认设置: {}", e),
            },
            Err(e) => log::warn!("⚠️ 读取设置文件失败，使用默认设置: {}", e),
        }
    }
    AppSettings::default()
}

pub fn save_settings_to_path(settings_path: &Path, settings: &AppSettings) -> Result<(), AppError> {
    if let Some(parent) = settings_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let content = serde_json::to_string_pretty(settings)
        .map_err(|e| AppError::Settings(format!("序列化设置失败: {}", e)))?;
    fs::write(settings_path, content)?;
    Ok(())
}
