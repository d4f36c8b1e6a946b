//! # 图标裁剪工具：库入口
//!
//! ## 架构总览
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                视图层 (CLI / 任意前端)                    │
//! │   只通过 IconSession 的入口修改状态，订阅 watch 快照      │
//! └───────┬──────────────────────────────────────────────────┘
//!         ↕ Result<T, AppError>
//! ┌───────┼──────────────────────────────────────────────────┐
//! │       ↕                                                  │
//! │  ┌─ session ─────── IconSession (视图模型 + 导出串行化)   │
//! │  │                                                       │
//! │  ├─ image_handler ─ 文件/字节/Base64 加载·校验·解码       │
//! │  ├─ cropper ─────── 正方形选区 + CroppedBitmapSource      │
//! │  ├─ background ──── 背景色值类型 + 选择器状态             │
//! │  ├─ exporter ────── 七尺寸渲染 · PNG · zip · 下载目标     │
//! │  │                                                       │
//! │  ├─ settings ────── JSON 设置文件                          │
//! │  └─ error ───────── AppError (统一错误类型)               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! ## 模块职责
//!
//! | 模块 | 职责 |
//! |------|------|
//! | [`error`] | 统一错误类型 `AppError`，CLI 的返回类型 |
//! | [`image_handler`] | 图片加载、体积/签名/像素限制、解码与缩放、导出档位 |
//! | [`cropper`] | 源图上的正方形选区，输出裁剪位图 |
//! | [`background`] | `BackgroundColor` 与 `BackgroundColorSelector` |
//! | [`exporter`] | 16~512 七个尺寸的图标渲染、打包 `icons.zip` 与交付 |
//! | [`session`] | 单个编辑会话的状态与异步编排 |
//! | [`settings`] | 导出档位、默认背景色、输出目录的持久化 |

pub mod background;
pub mod cropper;
pub mod error;
pub mod exporter;
pub mod image_handler;
pub mod session;
pub mod settings;
