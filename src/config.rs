use std::path::{Path, PathBuf};

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 注册库下载地址（不含查询参数）
    pub registry_base_url: String,
    /// 疾病配置文件目录（`<conf_dir>/<code>.toml`）
    pub conf_dir: String,
    /// 单次请求超时（秒）
    pub request_timeout_secs: u64,
    /// 传输失败后的最大重试次数，0 表示不重试
    pub max_retries: usize,
    /// 首次重试前的等待时间（毫秒），之后每次翻倍
    pub retry_backoff_ms: u64,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            registry_base_url: "https://clinicaltrials.gov/ct2/download_studies".to_string(),
            conf_dir: "conf".to_string(),
            request_timeout_secs: 120,
            max_retries: 3,
            retry_backoff_ms: 1000,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            registry_base_url: std::env::var("CTGOV_BASE_URL").unwrap_or(default.registry_base_url),
            conf_dir: std::env::var("CTGOV_CONF_DIR").unwrap_or(default.conf_dir),
            request_timeout_secs: std::env::var("CTGOV_REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            max_retries: std::env::var("CTGOV_MAX_RETRIES").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_retries),
            retry_backoff_ms: std::env::var("CTGOV_RETRY_BACKOFF_MS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.retry_backoff_ms),
            verbose_logging: std::env::var("CTGOV_VERBOSE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }

    /// 疾病配置文件路径
    pub fn condition_file(&self, code: &str) -> PathBuf {
        Path::new(&self.conf_dir).join(format!("{}.toml", code))
    }
}

/// 单次运行的目录布局
///
/// ```text
/// <root>/<code>/zip/<term>.zip
/// <root>/<code>/xml/<document>
/// <root>/<code>/log.txt
/// <root>/<code>/<code>.json
/// ```
#[derive(Clone, Debug)]
pub struct RunPaths {
    pub code: String,
    pub base_dir: PathBuf,
    pub zip_dir: PathBuf,
    pub xml_dir: PathBuf,
    pub log_file: PathBuf,
    pub output_file: PathBuf,
}

impl RunPaths {
    pub fn new(root: impl AsRef<Path>, code: &str) -> Self {
        let base_dir = root.as_ref().join(code);
        Self {
            code: code.to_string(),
            zip_dir: base_dir.join("zip"),
            xml_dir: base_dir.join("xml"),
            log_file: base_dir.join("log.txt"),
            output_file: base_dir.join(format!("{}.json", code)),
            base_dir,
        }
    }

    /// 检索词对应的压缩包路径
    ///
    /// 检索词中的路径分隔符替换为 `_`，保证每个词只落在 `zip/` 下的一个文件
    pub fn archive_path(&self, term: &str) -> PathBuf {
        let file_name: String = term
            .chars()
            .map(|c| if c == '/' || c == '\\' { '_' } else { c })
            .collect();
        self.zip_dir.join(format!("{}.zip", file_name))
    }
}
