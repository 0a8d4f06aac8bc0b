use std::path::{Path, PathBuf};
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 下载错误
    #[error("下载错误: {0}")]
    Fetch(#[from] FetchError),
    /// 压缩包错误
    #[error("压缩包错误: {0}")]
    Archive(#[from] ArchiveError),
    /// 文件操作错误
    #[error("文件错误 ({}): {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置文件不存在或无法读取
    #[error("无法读取配置文件 {}: {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败（含缺少必填字段）
    #[error("无法解析配置文件 {}: {source}", .path.display())]
    TomlParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    /// 检索词为空
    #[error("配置文件 {} 中的 name 为空", .path.display())]
    EmptyName { path: PathBuf },
}

/// 下载错误
#[derive(Debug, Error)]
pub enum FetchError {
    /// 网络请求失败
    #[error("请求失败 ({url}): {source}")]
    RequestFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    /// 服务端错误响应
    #[error("服务端返回错误状态 ({url}): {status}")]
    BadStatus {
        url: String,
        status: reqwest::StatusCode,
    },
    /// 构建 HTTP 客户端失败
    #[error("无法创建 HTTP 客户端: {0}")]
    ClientBuildFailed(#[source] reqwest::Error),
}

/// 压缩包错误
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// 不是有效的 zip 文件
    #[error("无法打开压缩包 {}: {source}", .path.display())]
    InvalidArchive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    /// 读取条目失败
    #[error("无法读取压缩包 {} 中的条目 #{index}: {source}", .path.display())]
    EntryFailed {
        path: PathBuf,
        index: usize,
        #[source]
        source: zip::result::ZipError,
    },
    /// 条目内容损坏（校验和错误、无法解压）
    #[error("压缩包 {} 中的 {name} 已损坏: {source}", .path.display())]
    EntryUnreadable {
        path: PathBuf,
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// 文档解析错误（只记日志，不中断抽取）
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML 格式错误
    #[error("XML 格式错误 ({}): {source}", .path.display())]
    MalformedXml {
        path: PathBuf,
        #[source]
        source: roxmltree::Error,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件操作错误
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        AppError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
