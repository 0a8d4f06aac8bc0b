/// 注册库 HTTP 客户端
///
/// 唯一与注册库通信的组件：按检索词下载 zip 压缩包
use crate::config::Config;
use crate::error::{AppError, AppResult, FetchError};
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

/// 注册库客户端
pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: usize,
    retry_backoff: Duration,
}

impl RegistryClient {
    /// 创建新的注册库客户端
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(FetchError::ClientBuildFailed)?;

        Ok(Self {
            http,
            base_url: config.registry_base_url.trim_end_matches('?').to_string(),
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        })
    }

    /// 检索词对应的下载地址
    ///
    /// 检索词按表单编码写入 `cond`：空格为 `+`，其余保留字符百分号编码。
    pub fn download_url(&self, term: &str) -> Result<reqwest::Url, FetchError> {
        let request = self
            .http
            .get(&self.base_url)
            .query(&[("cond", term)])
            .build()
            .map_err(|source| FetchError::RequestFailed {
                url: self.base_url.clone(),
                source,
            })?;
        Ok(request.url().clone())
    }

    /// 下载检索词对应的压缩包
    ///
    /// 传输错误与 5xx 响应按配置重试（指数退避），其余响应体原样返回（可能为空）。
    pub async fn download(&self, term: &str) -> AppResult<Vec<u8>> {
        let url = self.download_url(term)?;
        let mut attempt = 0usize;

        loop {
            match self.try_download(&url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.max_retries => {
                    let wait = self
                        .retry_backoff
                        .saturating_mul(2u32.saturating_pow(attempt as u32));
                    warn!(
                        "下载失败 (尝试 {}/{}), {} 毫秒后重试: {}",
                        attempt + 1,
                        self.max_retries + 1,
                        wait.as_millis(),
                        e
                    );
                    sleep(wait).await;
                    attempt += 1;
                }
                Err(e) => return Err(AppError::Fetch(e)),
            }
        }
    }

    async fn try_download(&self, url: &reqwest::Url) -> Result<Vec<u8>, FetchError> {
        debug!("GET {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|source| FetchError::RequestFailed {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if status.is_server_error() {
            return Err(FetchError::BadStatus {
                url: url.to_string(),
                status,
            });
        }

        let body = response
            .bytes()
            .await
            .map_err(|source| FetchError::RequestFailed {
                url: url.to_string(),
                source,
            })?;

        debug!("响应状态: {}, 长度: {} 字节", status, body.len());

        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_url_replaces_spaces() {
        let client = RegistryClient::new(&Config::default()).unwrap();

        assert_eq!(
            client.download_url("Breast Cancer").unwrap().as_str(),
            "https://clinicaltrials.gov/ct2/download_studies?cond=Breast+Cancer"
        );
    }

    #[test]
    fn test_download_url_tolerates_trailing_question_mark() {
        let config = Config {
            registry_base_url: "http://127.0.0.1:9/download?".to_string(),
            ..Config::default()
        };
        let client = RegistryClient::new(&config).unwrap();

        assert_eq!(
            client.download_url("Obesity").unwrap().as_str(),
            "http://127.0.0.1:9/download?cond=Obesity"
        );
    }

    #[test]
    fn test_download_url_encodes_reserved_characters() {
        let client = RegistryClient::new(&Config::default()).unwrap();

        for term in ["Breast & Ovarian Cancer", "C# Syndrome", "HER2+ Cancer"] {
            let url = client.download_url(term).unwrap();
            let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

            assert_eq!(pairs, vec![("cond".to_string(), term.to_string())]);
            assert_eq!(url.fragment(), None);
        }
    }
}
