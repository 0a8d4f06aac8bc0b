use serde::{Deserialize, Serialize};

/// 疾病配置：一个标准名称 + 若干同义检索词
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConditionConfig {
    pub name: String,
    pub entry_terms: Vec<String>,
}

impl ConditionConfig {
    /// 检索词列表：`[name] ++ entry_terms`，保持顺序，重复项只保留第一次出现
    pub fn terms(&self) -> Vec<String> {
        let mut terms: Vec<String> = Vec::with_capacity(self.entry_terms.len() + 1);
        for term in std::iter::once(&self.name).chain(self.entry_terms.iter()) {
            if !terms.contains(term) {
                terms.push(term.clone());
            }
        }
        terms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terms_puts_name_first() {
        let condition = ConditionConfig {
            name: "Breast Cancer".to_string(),
            entry_terms: vec!["Breast Carcinoma".to_string(), "Breast Tumor".to_string()],
        };

        assert_eq!(
            condition.terms(),
            vec!["Breast Cancer", "Breast Carcinoma", "Breast Tumor"]
        );
    }

    #[test]
    fn test_terms_drops_repeats() {
        let condition = ConditionConfig {
            name: "Obesity".to_string(),
            entry_terms: vec!["Obesity".to_string(), "Adiposity".to_string(), "Adiposity".to_string()],
        };

        assert_eq!(condition.terms(), vec!["Obesity", "Adiposity"]);
    }
}
