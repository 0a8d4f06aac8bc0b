//! 日志初始化
//!
//! 控制台（stderr）输出 + 追加写入 `<root>/<code>/log.txt`

use crate::error::{AppError, AppResult};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 初始化全局日志
///
/// `RUST_LOG` 优先；否则 verbose 时为 debug，默认 info。
/// 已有全局订阅者时不再安装（测试中多次调用是安全的），返回 `false`，
/// 此时 `log_file` 不会被挂接。
pub fn init(log_file: Option<&Path>, verbose: bool) -> AppResult<bool> {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_layer = match log_file {
        Some(path) => {
            let file = open_log_file(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    match tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
    {
        Ok(()) => Ok(true),
        Err(e) => {
            debug!(
                "日志已初始化，本次未挂接日志文件 {:?}: {}",
                log_file.map(|p| p.display().to_string()),
                e
            );
            Ok(false)
        }
    }
}

/// 打开运行日志并写入本次运行的分隔头
fn open_log_file(path: &Path) -> AppResult<File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| AppError::io(path, e))?;

    let header = format!(
        "{}\n运行日志 - {}\n{}\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    file.write_all(header.as_bytes())
        .map_err(|e| AppError::io(path, e))?;

    Ok(file)
}
