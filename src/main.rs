//! # 图标裁剪工具：命令行入口
//!
//! 本文件仅负责参数解析、日志初始化与结果输出。
//! 业务逻辑分布在各子模块中，详见 `lib.rs` 架构文档。

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use icon_cropper::background::BackgroundColor;
use icon_cropper::error::AppError;
use icon_cropper::exporter::{DirectoryDownload, ExportReport};
use icon_cropper::image_handler::{ExportProfile, ImageConfig, ImageError, ImageSource};
use icon_cropper::session::IconSession;
use icon_cropper::settings::{AppSettings, load_settings_from_path};

/// 把一张图片裁成正方形，导出 16~512 七个尺寸的 PNG 图标并打包为 icons.zip。
#[derive(Debug, Parser)]
#[command(name = "icon-cropper", version, about)]
struct Cli {
    /// 源图片路径
    input: PathBuf,

    /// 正方形选区 `X,Y,SIZE`（源图像素）；缺省为居中 80% 短边
    #[arg(long, value_name = "X,Y,SIZE")]
    crop: Option<String>,

    /// 背景色：`#rrggbb`、`rgb(r, g, b)`、`rgba(r, g, b, a)` 或 `transparent`
    #[arg(long, value_name = "COLOR")]
    background: Option<String>,

    /// icons.zip 的保存目录
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,

    /// 导出档位：quality / balanced / speed
    #[arg(long)]
    profile: Option<String>,

    /// JSON 设置文件
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// 以 JSON 输出导出摘要或错误
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct CliOutput {
    path: PathBuf,
    report: ExportReport,
}

#[derive(Debug, Serialize)]
struct CliFailure<'a> {
    code: &'static str,
    stage: Option<&'static str>,
    error: &'a AppError,
}

impl<'a> CliFailure<'a> {
    fn new(error: &'a AppError) -> Self {
        Self {
            code: error.code(),
            stage: error.stage(),
            error,
        }
    }
}

fn parse_crop(text: &str) -> Result<(u32, u32, u32), AppError> {
    let parts = text
        .split(',')
        .map(|part| part.trim().parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| AppError::Argument(format!("--crop 含有非法数字 '{}': {}", text, e)))?;

    match parts.as_slice() {
        [x, y, size] => Ok((*x, *y, *size)),
        _ => Err(AppError::Argument(format!(
            "--crop 需要 X,Y,SIZE 三个数字，实际为 '{}'",
            text
        ))),
    }
}

async fn run(cli: &Cli) -> Result<CliOutput, AppError> {
    let settings = cli
        .settings
        .as_deref()
        .map(load_settings_from_path)
        .unwrap_or_else(AppSettings::default);

    let profile = match cli.profile.as_deref() {
        Some(text) => text.parse::<ExportProfile>()?,
        None => settings.profile,
    };
    let background = match cli.background.as_deref() {
        Some(text) => text.parse::<BackgroundColor>()?,
        None => settings.background()?,
    };
    let out_dir = cli.out_dir.clone().unwrap_or_else(|| settings.output_dir());

    let mut config = ImageConfig::default();
    config.apply_profile(profile);
    let session = IconSession::new(config);

    let input = cli.input.to_string_lossy().into_owned();
    session.load_files(vec![ImageSource::FilePath(input)]).await?;

    if let Some(text) = cli.crop.as_deref() {
        let (x, y, size) = parse_crop(text)?;
        if let Some(region) = session.set_selection(x, y, size)? {
            if region.as_tuple() != (x, y, size, size) {
                log::warn!("⚠️ 选区超出源图，已收缩为 {:?}", region.as_tuple());
            }
        }
    }

    session.with_selector(|selector| selector.set_color(background))?;

    let target = DirectoryDownload::new(out_dir);
    let (path, bundle) = session
        .export_to(&target)
        .await?
        .ok_or_else(|| ImageError::InvalidCrop("尚未加载图片".to_string()))?;

    Ok(CliOutput {
        path,
        report: bundle.report,
    })
}

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{text}"),
        Err(e) => log::error!("❌ JSON 序列化失败: {e}"),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(output) => {
            if cli.json {
                print_json(&output);
            } else {
                println!("{}", output.path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            if cli.json {
                print_json(&CliFailure::new(&err));
            } else {
                eprintln!("{err}");
            }
            ExitCode::FAILURE
        }
    }
}
