//! 下载与去重处理器 - 编排层
//!
//! 遍历检索词列表：逐个下载压缩包，再逐个解压到共享文档目录。
//! 单个检索词失败只记日志，不中断批处理。

use crate::config::RunPaths;
use crate::error::{AppError, AppResult};
use crate::services::{ArchiveDeduplicator, ArchiveFetcher, ExtractOutcome, FetchOutcome};
use crate::utils::logging;
use std::path::PathBuf;
use tracing::{info, warn};

/// 下载阶段统计
#[derive(Debug, Default, Clone)]
pub struct FetchReport {
    pub downloaded: Vec<String>,
    pub skipped: Vec<String>,
    pub failed: Vec<String>,
}

/// 去重阶段统计
#[derive(Debug, Clone)]
pub struct DedupReport {
    /// 每个检索词的文档数（按检索词顺序）
    pub per_term: Vec<(String, usize)>,
    /// 不同文件名的文档总数
    pub unique: usize,
    pub document_dir: PathBuf,
}

impl DedupReport {
    pub fn count_for(&self, term: &str) -> Option<usize> {
        self.per_term
            .iter()
            .find(|(t, _)| t == term)
            .map(|(_, count)| *count)
    }
}

/// 逐个检索词下载压缩包
pub async fn fetch_all(fetcher: &ArchiveFetcher, terms: &[String], paths: &RunPaths) -> FetchReport {
    info!("📥 开始下载 ...");
    let mut report = FetchReport::default();

    for term in terms {
        let target = paths.archive_path(term);
        match fetcher.fetch(term, &target).await {
            Ok(FetchOutcome::Downloaded(bytes)) => {
                info!(
                    "[检索词]: {}, [保存路径]: {} ({} 字节)",
                    term,
                    target.display(),
                    bytes
                );
                report.downloaded.push(term.clone());
            }
            Ok(FetchOutcome::Skipped) => {
                info!("[检索词]: {}, [保存路径]: {} (已存在)", term, target.display());
                report.skipped.push(term.clone());
            }
            Err(e) => {
                warn!("[检索词]: {}, 下载失败: {}", term, e);
                report.failed.push(term.clone());
            }
        }
    }

    logging::log_fetch_summary(
        report.downloaded.len(),
        report.skipped.len(),
        report.failed.len(),
    );
    report
}

/// 逐个检索词解压到共享文档目录并统计
///
/// 缺失、为空或损坏的压缩包都按 0 个文档处理；写文档目录失败是致命错误。
pub fn deduplicate_all(terms: &[String], paths: &RunPaths) -> AppResult<DedupReport> {
    info!("📦 开始去重解压 ...");
    let mut dedup = ArchiveDeduplicator::new(paths.xml_dir.clone())?;
    let mut per_term = Vec::with_capacity(terms.len());

    for term in terms {
        let archive = paths.archive_path(term);
        let count = match dedup.extract(&archive) {
            Ok(ExtractOutcome::Missing) => {
                warn!("[检索词]: {}, 压缩包不存在: {}", term, archive.display());
                0
            }
            Ok(outcome) => outcome.entries(),
            Err(AppError::Archive(e)) => {
                warn!("[检索词]: {}, 跳过压缩包: {}", term, e);
                0
            }
            Err(e) => return Err(e),
        };

        info!("[检索词]: {}, [文档数]: {}", term, count);
        per_term.push((term.clone(), count));
    }

    logging::log_dedup_summary(dedup.unique_count(), dedup.document_dir());

    Ok(DedupReport {
        per_term,
        unique: dedup.unique_count(),
        document_dir: dedup.document_dir().to_path_buf(),
    })
}
