//! 批处理入口 - 编排层
//!
//! ## 职责
//!
//! `App` 持有配置和本次运行的目录布局，按顺序驱动三个阶段：
//!
//! 1. **下载**：读取疾病配置 → 逐个检索词下载压缩包
//! 2. **去重**：逐个压缩包解压到共享文档目录，统计不重复文档数
//! 3. **抽取**：逐个文档抽取字段，整批写出 `<code>.json`
//!
//! 阶段之间只通过磁盘上的文件交互，可以分开运行。

use crate::clients::RegistryClient;
use crate::config::{Config, RunPaths};
use crate::models::load_condition_config;
use crate::orchestrator::download_processor::{self, DedupReport, FetchReport};
use crate::orchestrator::extract_processor::{self, ExtractReport};
use crate::services::{record_writer, ArchiveFetcher, RecordExtractor};
use crate::utils::logging;
use anyhow::{Context, Result};
use std::path::Path;

/// 应用主结构
pub struct App {
    config: Config,
    paths: RunPaths,
}

impl App {
    pub fn new(config: Config, paths: RunPaths) -> Self {
        Self { config, paths }
    }

    pub fn paths(&self) -> &RunPaths {
        &self.paths
    }

    /// 读取检索词列表，配置错误在任何网络请求之前终止
    async fn load_terms(&self) -> Result<Vec<String>> {
        let path = self.config.condition_file(&self.paths.code);
        let condition = load_condition_config(&path)
            .await
            .with_context(|| format!("无法加载 MeSH {} 的配置", self.paths.code))?;

        let terms = condition.terms();
        logging::log_terms_loaded(&condition.name, terms.len());
        Ok(terms)
    }

    /// 下载并去重
    pub async fn download(&self) -> Result<(FetchReport, DedupReport)> {
        logging::log_stage_start("下载", &self.paths.code);

        let terms = self.load_terms().await?;

        let client = RegistryClient::new(&self.config)?;
        let fetcher = ArchiveFetcher::new(client);
        let fetch_report = download_processor::fetch_all(&fetcher, &terms, &self.paths).await;

        let dedup_report = download_processor::deduplicate_all(&terms, &self.paths)
            .context("去重解压失败")?;

        Ok((fetch_report, dedup_report))
    }

    /// 抽取字段并写出整批记录
    pub async fn extract(&self) -> Result<ExtractReport> {
        logging::log_stage_start("抽取", &self.paths.code);

        let report = extract_processor::extract_all(&self.paths)
            .await
            .context("字段抽取失败")?;

        Ok(report)
    }

    /// 依次运行下载、去重、抽取
    pub async fn run(&self) -> Result<()> {
        self.download().await?;
        self.extract().await?;
        Ok(())
    }
}

/// 抽取单个文档，输出到 `out`，未指定时打印到标准输出
pub fn inspect_document(document: &Path, out: Option<&Path>) -> Result<()> {
    let record = RecordExtractor::new().extract_file(document)?;

    match out {
        Some(path) => {
            record_writer::RecordWriter::with_path(path).write(&record)?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            record_writer::write_pretty(&mut handle, &record)?;
            println!();
        }
    }

    Ok(())
}
