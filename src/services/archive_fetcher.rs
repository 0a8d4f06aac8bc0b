//! 压缩包下载服务 - 业务能力层
//!
//! 只负责"一个检索词 → 一个压缩包文件"，不关心批量流程

use crate::clients::RegistryClient;
use crate::error::{AppError, AppResult};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// 单个检索词的下载结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 新下载，附带写入的字节数
    Downloaded(usize),
    /// 文件已存在（任意大小），跳过
    Skipped,
}

/// 压缩包下载服务
pub struct ArchiveFetcher {
    client: RegistryClient,
}

impl ArchiveFetcher {
    pub fn new(client: RegistryClient) -> Self {
        Self { client }
    }

    /// 下载检索词对应的压缩包到 `target`
    ///
    /// 目标文件已存在时直接跳过（包括 0 字节文件），重复运行不会再发请求。
    /// 请求失败时不创建文件，下次运行会重新尝试。
    pub async fn fetch(&self, term: &str, target: &Path) -> AppResult<FetchOutcome> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| AppError::io(parent, e))?;
        }

        if fs::try_exists(target)
            .await
            .map_err(|e| AppError::io(target, e))?
        {
            debug!("已存在，跳过: {}", target.display());
            return Ok(FetchOutcome::Skipped);
        }

        let body = self.client.download(term).await?;

        // 先写临时文件再改名，写入中断不会留下被当作已下载的残缺压缩包
        let partial = partial_path(target);
        if let Err(e) = fs::write(&partial, &body).await {
            let _ = fs::remove_file(&partial).await;
            return Err(AppError::io(&partial, e));
        }
        fs::rename(&partial, target)
            .await
            .map_err(|e| AppError::io(target, e))?;

        Ok(FetchOutcome::Downloaded(body.len()))
    }
}

/// 下载中的临时文件：`<target>.part`
pub fn partial_path(target: &Path) -> PathBuf {
    let mut name = target.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}
