//! 压缩包去重解压服务 - 业务能力层
//!
//! 把各检索词的压缩包解压到同一个文档目录，同名文档只保留一份（后解压的覆盖先解压的），
//! 并记录见过的文档名用于统计去重后的总数。

use crate::error::{AppError, AppResult, ArchiveError};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{self, BufReader, Read};
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};
use zip::ZipArchive;

/// 单个压缩包的处理结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// 压缩包文件不存在（下载失败）
    Missing,
    /// 压缩包为 0 字节（无检索结果）
    Empty,
    /// 已解压
    Extracted {
        /// 本压缩包内的文档数（含已见过的同名文档）
        entries: usize,
        /// 其中首次出现的文档数
        new: usize,
    },
}

impl ExtractOutcome {
    /// 本压缩包计入的文档数
    pub fn entries(&self) -> usize {
        match self {
            ExtractOutcome::Extracted { entries, .. } => *entries,
            _ => 0,
        }
    }
}

/// 去重解压服务
pub struct ArchiveDeduplicator {
    document_dir: PathBuf,
    seen: HashSet<String>,
}

impl ArchiveDeduplicator {
    /// 创建服务，文档目录不存在时自动创建
    pub fn new(document_dir: impl Into<PathBuf>) -> AppResult<Self> {
        let document_dir = document_dir.into();
        fs::create_dir_all(&document_dir).map_err(|e| AppError::io(&document_dir, e))?;
        Ok(Self {
            document_dir,
            seen: HashSet::new(),
        })
    }

    pub fn document_dir(&self) -> &Path {
        &self.document_dir
    }

    /// 去重后的文档总数（不同文件名的数量）
    pub fn unique_count(&self) -> usize {
        self.seen.len()
    }

    /// 解压一个压缩包
    ///
    /// 缺失或 0 字节的压缩包不报错，只返回对应状态。
    /// 无法作为 zip 打开时返回 `ArchiveError::InvalidArchive`，此时没有任何文档被解压。
    /// 单个条目损坏（校验和错误、无法解压）只记警告并跳过该条目；写文档目录失败返回 `AppError::Io`。
    pub fn extract(&mut self, archive_path: &Path) -> AppResult<ExtractOutcome> {
        let metadata = match fs::metadata(archive_path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(ExtractOutcome::Missing),
            Err(e) => return Err(AppError::io(archive_path, e)),
        };
        if metadata.len() == 0 {
            return Ok(ExtractOutcome::Empty);
        }

        let file = File::open(archive_path).map_err(|e| AppError::io(archive_path, e))?;
        let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|source| {
            ArchiveError::InvalidArchive {
                path: archive_path.to_path_buf(),
                source,
            }
        })?;

        let mut entries = 0;
        let mut new = 0;

        for index in 0..archive.len() {
            let mut entry = match archive.by_index(index) {
                Ok(entry) => entry,
                Err(source) => {
                    warn!(
                        "{}",
                        ArchiveError::EntryFailed {
                            path: archive_path.to_path_buf(),
                            index,
                            source,
                        }
                    );
                    continue;
                }
            };

            if entry.is_dir() {
                continue;
            }

            let Some(relative) = entry.enclosed_name() else {
                warn!("跳过不安全的条目名: {}", entry.name());
                continue;
            };
            let name = document_key(&relative);
            if name.is_empty() {
                warn!("跳过不安全的条目名: {}", entry.name());
                continue;
            }

            // 先完整读出再落盘，损坏的条目不会在文档目录留下残缺文件
            let mut content = Vec::new();
            if let Err(source) = entry.read_to_end(&mut content) {
                warn!(
                    "{}",
                    ArchiveError::EntryUnreadable {
                        path: archive_path.to_path_buf(),
                        name,
                        source,
                    }
                );
                continue;
            }

            let dest = self.document_dir.join(&name);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent).map_err(|e| AppError::io(parent, e))?;
            }
            fs::write(&dest, &content).map_err(|e| AppError::io(&dest, e))?;

            entries += 1;
            if self.seen.insert(name) {
                new += 1;
            } else {
                debug!("重复文档，已覆盖: {}", dest.display());
            }
        }

        Ok(ExtractOutcome::Extracted { entries, new })
    }
}

/// 条目在文档目录中的规范化相对路径，`./a.xml` 与 `a.xml` 视为同一文档
fn document_key(relative: &Path) -> String {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            }
            _ => {}
        }
    }
    parts.join("/")
}
