#![allow(dead_code)]

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use ctgov_harvest::{Config, RunPaths};
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use zip::write::SimpleFileOptions;

/// 桩注册库：按 cond 返回预置压缩包，未知检索词返回空响应体
#[derive(Clone, Default)]
pub struct StubRegistry {
    archives: Arc<HashMap<String, Vec<u8>>>,
    hits: Arc<AtomicUsize>,
    /// 前 N 次请求返回 503
    failures_left: Arc<AtomicUsize>,
}

impl StubRegistry {
    pub fn new(archives: HashMap<String, Vec<u8>>) -> Self {
        Self {
            archives: Arc::new(archives),
            ..Self::default()
        }
    }

    pub fn failing_first(self, n: usize) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        self
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }

    /// 启动服务，返回下载地址
    pub async fn spawn(&self) -> String {
        let app = Router::new()
            .route("/download_studies", get(download))
            .with_state(self.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}/download_studies", addr)
    }
}

async fn download(
    State(registry): State<StubRegistry>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Vec<u8>, StatusCode> {
    registry.hits.fetch_add(1, Ordering::SeqCst);

    let pending = registry.failures_left.load(Ordering::SeqCst);
    if pending > 0 {
        registry.failures_left.store(pending - 1, Ordering::SeqCst);
        return Err(StatusCode::SERVICE_UNAVAILABLE);
    }

    Ok(params
        .get("cond")
        .and_then(|term| registry.archives.get(term))
        .cloned()
        .unwrap_or_default())
}

/// 一个肯定无法连接的地址
pub async fn closed_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/download_studies", addr)
}

pub fn zip_bytes(files: &[(&str, String)]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in files {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// 单条目、不压缩的压缩包，条目内容被改动一个字节（校验和不符）
pub fn corrupt_zip_bytes(name: &str, content: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    writer.start_file(name, options).unwrap();
    writer.write_all(content.as_bytes()).unwrap();
    let mut bytes = writer.finish().unwrap().into_inner();

    let at = bytes
        .windows(content.len())
        .position(|w| w == content.as_bytes())
        .unwrap();
    bytes[at + content.len() / 2] ^= 0xFF;
    bytes
}

pub fn study(nct_id: &str, status: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<clinical_study>
  <required_header><url>https://clinicaltrials.gov/show/{nct_id}</url></required_header>
  <id_info><nct_id>{nct_id}</nct_id></id_info>
  <brief_title>Study {nct_id}</brief_title>
  <overall_status>{status}</overall_status>
  <condition>Breast Cancer</condition>
  <primary_outcome>
    <measure>Overall survival</measure>
    <time_frame>5 years</time_frame>
  </primary_outcome>
</clinical_study>
"#
    )
}

/// 写入 `<conf>/<code>.toml`
pub fn write_condition(conf_dir: &Path, code: &str, name: &str, entry_terms: &[&str]) {
    std::fs::create_dir_all(conf_dir).unwrap();
    let terms = entry_terms
        .iter()
        .map(|t| format!("\"{}\"", t))
        .collect::<Vec<_>>()
        .join(", ");
    std::fs::write(
        conf_dir.join(format!("{}.toml", code)),
        format!("name = \"{}\"\nentry_terms = [{}]\n", name, terms),
    )
    .unwrap();
}

pub fn test_config(conf_dir: &Path, base_url: String) -> Config {
    Config {
        registry_base_url: base_url,
        conf_dir: conf_dir.to_string_lossy().into_owned(),
        request_timeout_secs: 5,
        max_retries: 0,
        retry_backoff_ms: 10,
        verbose_logging: false,
    }
}

pub fn test_paths(root: &Path, code: &str) -> RunPaths {
    RunPaths::new(root.join("data"), code)
}
