//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批处理入口
//! - 持有配置和目录布局
//! - 按顺序驱动下载 / 去重 / 抽取
//!
//! ### `download_processor` - 下载与去重
//! - 遍历检索词列表（Vec<String>）
//! - 单个检索词失败只记日志
//!
//! ### `extract_processor` - 字段抽取
//! - 遍历文档目录（按文件名排序）
//! - 整批记录一次性写出
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor
//!     ↓
//! download_processor / extract_processor (处理列表)
//!     ↓
//! services (能力层：fetch / dedup / extract / write)
//!     ↓
//! clients (RegistryClient)
//! ```

pub mod batch_processor;
pub mod download_processor;
pub mod extract_processor;

pub use batch_processor::{inspect_document, App};
pub use download_processor::{DedupReport, FetchReport};
pub use extract_processor::ExtractReport;
