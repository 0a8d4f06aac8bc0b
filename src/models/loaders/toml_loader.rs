use crate::error::{AppResult, ConfigError};
use crate::models::condition::ConditionConfig;
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载疾病配置
///
/// 文件缺失、格式错误或缺少 `name` / `entry_terms` 都是致命错误。
pub async fn load_condition_config(path: &Path) -> AppResult<ConditionConfig> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;

    let condition: ConditionConfig =
        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_path_buf(),
            source,
        })?;

    if condition.name.trim().is_empty() {
        return Err(ConfigError::EmptyName {
            path: path.to_path_buf(),
        }
        .into());
    }

    tracing::info!(
        "加载配置: {} ({} 个同义词)",
        condition.name,
        condition.entry_terms.len()
    );

    Ok(condition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[tokio::test]
    async fn test_load_condition_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("D001943.toml");
        std::fs::write(
            &path,
            "name = \"Breast Cancer\"\nentry_terms = [\"Breast Carcinoma\", \"Breast Tumor\"]\n",
        )
        .unwrap();

        let condition = load_condition_config(&path).await.unwrap();

        assert_eq!(condition.name, "Breast Cancer");
        assert_eq!(condition.entry_terms, vec!["Breast Carcinoma", "Breast Tumor"]);
    }

    #[tokio::test]
    async fn test_missing_entry_terms_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("D001943.toml");
        std::fs::write(&path, "name = \"Breast Cancer\"\n").unwrap();

        let err = load_condition_config(&path).await.unwrap_err();

        assert!(matches!(
            err,
            AppError::Config(ConfigError::TomlParseFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();

        let err = load_condition_config(&dir.path().join("nope.toml"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Config(ConfigError::ReadFailed { .. })));
    }

    #[tokio::test]
    async fn test_blank_name_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("D001943.toml");
        std::fs::write(&path, "name = \"  \"\nentry_terms = []\n").unwrap();

        let err = load_condition_config(&path).await.unwrap_err();

        assert!(matches!(err, AppError::Config(ConfigError::EmptyName { .. })));
    }
}
