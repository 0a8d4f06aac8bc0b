//! 字段抽取处理器 - 编排层
//!
//! 按文件名排序遍历文档目录下的 `.xml` 文件，逐个抽取，最后一次性写出整批记录。

use crate::config::RunPaths;
use crate::error::{AppError, AppResult};
use crate::models::TrialRecord;
use crate::services::{RecordExtractor, RecordWriter};
use crate::utils::logging;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, warn};

/// 文档扩展名
const DOCUMENT_EXTENSION: &str = ".xml";

/// 抽取阶段统计
#[derive(Debug, Clone)]
pub struct ExtractReport {
    pub records: usize,
    pub output_file: PathBuf,
}

/// 列出文档目录下的所有文档（按文件名排序）
pub async fn list_documents(document_dir: &Path) -> AppResult<Vec<PathBuf>> {
    let mut entries = fs::read_dir(document_dir)
        .await
        .map_err(|e| AppError::io(document_dir, e))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::io(document_dir, e))?
    {
        let file_type = entry
            .file_type()
            .await
            .map_err(|e| AppError::io(entry.path(), e))?;
        if !file_type.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.ends_with(DOCUMENT_EXTENSION) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names.into_iter().map(|name| document_dir.join(name)).collect())
}

/// 抽取整个文档目录并写出 `<code>.json`
pub async fn extract_all(paths: &RunPaths) -> AppResult<ExtractReport> {
    info!("🔍 开始抽取 ...");
    let documents = list_documents(&paths.xml_dir).await?;
    info!("✓ 找到 {} 个文档", documents.len());

    let extractor = RecordExtractor::new();
    let mut records: Vec<TrialRecord> = Vec::with_capacity(documents.len());

    for (index, path) in documents.iter().enumerate() {
        debug!("[{}/{}] {}", index + 1, documents.len(), path.display());
        let record = match extractor.extract_file(path) {
            Ok(record) => record,
            Err(e) => {
                warn!("无法读取文档，使用默认记录: {}", e);
                TrialRecord::default()
            }
        };
        records.push(record);
    }

    let writer = RecordWriter::with_path(paths.output_file.clone());
    writer.write(&records)?;

    logging::log_extract_summary(&paths.code, records.len(), writer.path());

    Ok(ExtractReport {
        records: records.len(),
        output_file: writer.path().to_path_buf(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_list_documents_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["NCT03.xml", "NCT01.xml", "notes.txt", "NCT02.xml"] {
            std::fs::write(dir.path().join(name), "<a/>").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.xml")).unwrap();

        let documents = list_documents(dir.path()).await.unwrap();
        let names: Vec<_> = documents
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["NCT01.xml", "NCT02.xml", "NCT03.xml"]);
    }

    #[tokio::test]
    async fn test_missing_document_dir_is_fatal() {
        let dir = tempfile::tempdir().unwrap();

        let err = list_documents(&dir.path().join("xml")).await.unwrap_err();

        assert!(matches!(err, AppError::Io { .. }));
    }

    #[tokio::test]
    async fn test_extract_all_keeps_sorted_order() {
        let dir = tempfile::tempdir().unwrap();
        let paths = RunPaths::new(dir.path(), "D000001");
        std::fs::create_dir_all(&paths.xml_dir).unwrap();
        std::fs::write(
            paths.xml_dir.join("NCT02.xml"),
            "<clinical_study><nct_id>NCT02</nct_id></clinical_study>",
        )
        .unwrap();
        std::fs::write(
            paths.xml_dir.join("NCT01.xml"),
            "<clinical_study><nct_id>NCT01</nct_id></clinical_study>",
        )
        .unwrap();
        std::fs::write(paths.xml_dir.join("NCT03.xml"), "<broken").unwrap();

        let report = extract_all(&paths).await.unwrap();
        assert_eq!(report.records, 3);

        let text = std::fs::read_to_string(&paths.output_file).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value[0]["nct_id"], "NCT01");
        assert_eq!(value[1]["nct_id"], "NCT02");
        assert_eq!(value[2]["nct_id"], "");
    }
}
