//! # ctgov_harvest
//!
//! 按疾病检索词从 ClinicalTrials.gov 下载注册记录，去重解压后抽取为结构化 JSON
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 唯一与注册库通信的组件
//! - `RegistryClient` - 按检索词下载 zip（超时 + 可选重试）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个检索词 / 单个文档
//! - `ArchiveFetcher` - 一个检索词 → 一个压缩包
//! - `ArchiveDeduplicator` - 压缩包 → 共享文档目录
//! - `RecordExtractor` - 一份 XML → 一条 `TrialRecord`
//! - `RecordWriter` - 整批记录 → JSON 文件
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/` - 遍历列表、容错、统计
//!
//! ## 目录布局
//!
//! ```text
//! <root>/<code>/zip/<term>.zip
//! <root>/<code>/xml/<NCT...>.xml
//! <root>/<code>/log.txt
//! <root>/<code>/<code>.json
//! ```

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::{Config, RunPaths};
pub use error::{AppError, AppResult};
pub use models::{ConditionConfig, FieldValue, OutcomeMeasure, TrialRecord};
pub use orchestrator::{inspect_document, App};
