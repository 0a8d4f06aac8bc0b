//! 记录写入服务 - 业务能力层
//!
//! 只负责把整批记录一次性写成 JSON 文件

use crate::error::{AppError, AppResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// 记录写入服务
pub struct RecordWriter {
    output_path: PathBuf,
}

impl RecordWriter {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: path.into(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.output_path
    }

    /// 写入（覆盖）输出文件，4 空格缩进
    pub fn write<T: Serialize + ?Sized>(&self, value: &T) -> AppResult<()> {
        let path = &self.output_path;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
        }

        let file = File::create(path).map_err(|e| AppError::io(path, e))?;
        let mut writer = BufWriter::new(file);
        write_pretty(&mut writer, value).map_err(|e| AppError::io(path, e))?;
        writer.flush().map_err(|e| AppError::io(path, e))?;

        debug!("已写入: {}", path.display());
        Ok(())
    }
}

/// 以 4 空格缩进序列化
pub fn write_pretty<W: Write, T: Serialize + ?Sized>(
    writer: W,
    value: &T,
) -> std::io::Result<()> {
    let mut serializer =
        serde_json::Serializer::with_formatter(writer, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer).map_err(std::io::Error::from)
}
