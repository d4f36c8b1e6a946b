//! # 会话层（视图模型）
//!
//! ## 设计思路
//!
//! 单个编辑会话的全部可变状态都由 `IconSession` 持有：源图、裁剪器、背景色选择器、导出中标志。
//! 视图层只通过下列入口修改状态，并通过 `subscribe()` / `subscribe_background()` 只读订阅：
//! 1. `load_files`：选择文件（只取第一个；空选择为 no-op）
//! 2. `with_cropper`：调整选区
//! 3. `with_selector`：背景色的四个修改入口
//! 4. `export` / `export_to`：导出并交付 `icons.zip`
//!
//! ## 实现思路
//!
//! - 解码与导出都放进 `spawn_blocking`，等待顺序固定：解码完成才有裁剪器，七个尺寸全部完成才打包。
//! - 导出串行化：`ExportGuard` 以 `AtomicBool` 标记导出中，重复触发直接返回 `ExportInProgress`；
//!   守卫在 `Drop` 时释放，出错或 future 被丢弃也不会卡死。
//! - 解码失败时保留上一张图与选区，错误写入快照的 `last_error`。
//! - 未加载图片时导出被跳过（返回 `Ok(None)`）。

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tokio::sync::watch;

use crate::background::{BackgroundColor, BackgroundColorSelector, SelectorSnapshot};
use crate::cropper::{CropRegion, ImageCropper};
use crate::exporter::{ARCHIVE_FILE_NAME, DownloadTarget, ExportBundle, IconExporter};
use crate::image_handler::{ImageConfig, ImageError, ImageHandler, ImageSource};

/// 视图层可见的会话快照。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionSnapshot {
    pub has_image: bool,
    pub image_width: u32,
    pub image_height: u32,
    pub selection: Option<(u32, u32, u32, u32)>,
    pub export_in_flight: bool,
    pub last_error: Option<String>,
}

/// 导出中标志的 RAII 守卫。
struct ExportGuard {
    flag: Arc<AtomicBool>,
}

impl ExportGuard {
    fn acquire(flag: &Arc<AtomicBool>) -> Result<Self, ImageError> {
        flag.compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .map_err(|_| ImageError::ExportInProgress)?;
        Ok(Self {
            flag: Arc::clone(flag),
        })
    }
}

impl Drop for ExportGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

fn lock<'a, T>(mutex: &'a Mutex<T>, what: &str) -> Result<MutexGuard<'a, T>, ImageError> {
    mutex
        .lock()
        .map_err(|_| ImageError::ResourceLimit(format!("{what}锁已中毒")))
}

pub struct IconSession {
    handler: Arc<ImageHandler>,
    cropper: Mutex<Option<ImageCropper>>,
    selector: Mutex<BackgroundColorSelector>,
    export_in_flight: Arc<AtomicBool>,
    last_error: Mutex<Option<String>>,
    notifier: watch::Sender<SessionSnapshot>,
}

impl Default for IconSession {
    fn default() -> Self {
        Self::new(ImageConfig::default())
    }
}

impl IconSession {
    /// 使用指定配置创建会话。
    ///
    /// # 示例
    /// ```rust
    /// use icon_cropper::image_handler::ImageConfig;
    /// use icon_cropper::session::IconSession;
    ///
    /// let session = IconSession::new(ImageConfig::default());
    /// assert!(!session.snapshot().has_image);
    /// ```
    pub fn new(config: ImageConfig) -> Self {
        Self::with_handler(Arc::new(ImageHandler::new(config)))
    }

    pub fn with_handler(handler: Arc<ImageHandler>) -> Self {
        let (notifier, _) = watch::channel(SessionSnapshot::default());
        Self {
            handler,
            cropper: Mutex::new(None),
            selector: Mutex::new(BackgroundColorSelector::new()),
            export_in_flight: Arc::new(AtomicBool::new(false)),
            last_error: Mutex::new(None),
            notifier,
        }
    }

    pub fn handler(&self) -> &ImageHandler {
        &self.handler
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.notifier.subscribe()
    }

    pub fn subscribe_background(&self) -> Result<watch::Receiver<SelectorSnapshot>, ImageError> {
        Ok(lock(&self.selector, "背景色")?.subscribe())
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let (has_image, image_width, image_height, selection) = match self.cropper.lock() {
            Ok(guard) => match guard.as_ref() {
                Some(cropper) => {
                    let (width, height) = cropper.source().dimensions();
                    (true, width, height, Some(cropper.selection().as_tuple()))
                }
                None => (false, 0, 0, None),
            },
            Err(_) => (false, 0, 0, None),
        };
        let last_error = self.last_error.lock().ok().and_then(|guard| guard.clone());

        SessionSnapshot {
            has_image,
            image_width,
            image_height,
            selection,
            export_in_flight: self.is_export_in_flight(),
            last_error,
        }
    }

    fn publish(&self) {
        self.notifier.send_replace(self.snapshot());
    }

    pub fn is_export_in_flight(&self) -> bool {
        self.export_in_flight.load(Ordering::SeqCst)
    }

    /// 处理一次文件选择。只取第一个文件；空选择返回 `Ok(false)`。
    pub async fn load_files(&self, files: Vec<ImageSource>) -> Result<bool, ImageError> {
        let Some(source) = files.into_iter().next() else {
            log::debug!("📭 未选择文件，忽略");
            return Ok(false);
        };

        let hint = source.hint();
        let handler = Arc::clone(&self.handler);
        let decoded = tokio::task::spawn_blocking(move || handler.load_and_decode(source))
            .await
            .map_err(|e| ImageError::Decode(format!("解码任务异常中止：{}", e)))
            .and_then(|result| result);

        match decoded {
            Ok(image) => {
                *lock(&self.cropper, "裁剪器")? = Some(ImageCropper::new(Arc::new(image)));
                *lock(&self.last_error, "错误状态")? = None;
                self.publish();
                Ok(true)
            }
            Err(err) => {
                log::error!("❌ 图片加载失败（来源: {}），保留当前图片：{}", hint, err);
                *lock(&self.last_error, "错误状态")? = Some(err.to_string());
                self.publish();
                Err(err)
            }
        }
    }

    /// 调整裁剪器；未加载图片时返回 `None`。
    pub fn with_cropper<R>(
        &self,
        f: impl FnOnce(&mut ImageCropper) -> R,
    ) -> Result<Option<R>, ImageError> {
        let result = lock(&self.cropper, "裁剪器")?.as_mut().map(f);
        self.publish();
        Ok(result)
    }

    pub fn set_selection(&self, x: u32, y: u32, size: u32) -> Result<Option<CropRegion>, ImageError> {
        self.with_cropper(|cropper| cropper.set_selection(x, y, size))
    }

    /// 修改背景色选择器。
    pub fn with_selector<R>(
        &self,
        f: impl FnOnce(&mut BackgroundColorSelector) -> R,
    ) -> Result<R, ImageError> {
        Ok(f(&mut *lock(&self.selector, "背景色")?))
    }

    pub fn background(&self) -> Result<BackgroundColor, ImageError> {
        Ok(lock(&self.selector, "背景色")?.color())
    }

    /// 导出当前裁剪结果。未加载图片时跳过并返回 `Ok(None)`。
    pub async fn export(&self) -> Result<Option<ExportBundle>, ImageError> {
        let guard = ExportGuard::acquire(&self.export_in_flight)?;
        self.publish();

        let result = self.run_export().await;

        drop(guard);
        self.publish();
        result
    }

    async fn run_export(&self) -> Result<Option<ExportBundle>, ImageError> {
        let Some(cropper) = lock(&self.cropper, "裁剪器")?.clone() else {
            log::warn!("⚠️ 尚未加载图片，跳过导出");
            return Ok(None);
        };
        let background = self.background()?;
        let exporter = IconExporter::from_config(&self.handler.config_snapshot()?);

        let bundle = tokio::task::spawn_blocking(move || exporter.export(&cropper, background))
            .await
            .map_err(|e| ImageError::Encode(format!("导出任务异常中止：{}", e)))??;

        Ok(Some(bundle))
    }

    /// 导出并交付给下载目标，返回保存位置。
    pub async fn export_to(
        &self,
        target: &dyn DownloadTarget,
    ) -> Result<Option<(PathBuf, ExportBundle)>, ImageError> {
        let Some(bundle) = self.export().await? else {
            return Ok(None);
        };
        let path = target.deliver(ARCHIVE_FILE_NAME, &bundle.archive)?;
        Ok(Some((path, bundle)))
    }
}
