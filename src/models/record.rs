use serde::{Deserialize, Serialize};

/// 单个字段的抽取结果
///
/// 0 次出现为 `Empty`（序列化为 `""`），1 次为 `Scalar`，多次为 `List`（按文档顺序）。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    #[default]
    Empty,
    Scalar(String),
    List(Vec<String>),
}

impl FieldValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, FieldValue::Empty)
    }

    /// 以列表形式取出全部值
    pub fn values(&self) -> Vec<&str> {
        match self {
            FieldValue::Empty => Vec::new(),
            FieldValue::Scalar(s) => vec![s.as_str()],
            FieldValue::List(items) => items.iter().map(String::as_str).collect(),
        }
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(mut values: Vec<String>) -> Self {
        match values.len() {
            0 => FieldValue::Empty,
            1 => FieldValue::Scalar(values.remove(0)),
            _ => FieldValue::List(values),
        }
    }
}

impl Serialize for FieldValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            FieldValue::Empty => serializer.serialize_str(""),
            FieldValue::Scalar(s) => serializer.serialize_str(s),
            FieldValue::List(items) => items.serialize(serializer),
        }
    }
}

// 字符串或字符串数组
impl<'de> Deserialize<'de> for FieldValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::{SeqAccess, Visitor};
        use std::fmt;

        struct FieldValueVisitor;

        impl<'de> Visitor<'de> for FieldValueVisitor {
            type Value = FieldValue;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a string or a list of strings")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                if value.is_empty() {
                    Ok(FieldValue::Empty)
                } else {
                    Ok(FieldValue::Scalar(value.to_string()))
                }
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut items = Vec::new();
                while let Some(item) = seq.next_element::<String>()? {
                    items.push(item);
                }
                Ok(FieldValue::List(items))
            }
        }

        deserializer.deserialize_any(FieldValueVisitor)
    }
}

/// 结局指标
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeMeasure {
    pub measure: String,
    pub time_frame: String,
    pub description: String,
}

/// 结局指标类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeCategory {
    Primary,
    Secondary,
    Other,
}

impl OutcomeCategory {
    /// 对应的 XML 标签名
    pub fn tag(self) -> &'static str {
        match self {
            OutcomeCategory::Primary => "primary_outcome",
            OutcomeCategory::Secondary => "secondary_outcome",
            OutcomeCategory::Other => "other_outcome",
        }
    }
}

/// 一份注册文档的结构化结果
///
/// 字段顺序即输出 JSON 的键顺序。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrialRecord {
    pub nct_id: FieldValue,
    pub brief_title: FieldValue,
    pub official_title: FieldValue,
    pub overall_status: FieldValue,

    pub start_date: FieldValue,
    pub completion_date: FieldValue,
    pub study_first_posted: FieldValue,
    pub study_first_submitted: FieldValue,
    pub last_update_submitted: FieldValue,
    pub verification_date: FieldValue,

    pub phase: FieldValue,
    pub study_type: FieldValue,
    pub primary_purpose: FieldValue,
    pub condition: FieldValue,
    pub enrollment: FieldValue,
    pub gender: FieldValue,
    pub minimum_age: FieldValue,
    pub maximum_age: FieldValue,

    #[serde(rename = "PMID")]
    pub pmid: Vec<String>,

    pub primary_outcome: Vec<OutcomeMeasure>,
    pub secondary_outcome: Vec<OutcomeMeasure>,
    pub other_outcome: Vec<OutcomeMeasure>,
    pub url: FieldValue,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_field_value_collapse() {
        assert_eq!(FieldValue::from(Vec::new()), FieldValue::Empty);
        assert_eq!(
            FieldValue::from(vec!["Recruiting".to_string()]),
            FieldValue::Scalar("Recruiting".to_string())
        );
        assert_eq!(
            FieldValue::from(vec!["a".to_string(), "b".to_string()]),
            FieldValue::List(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_field_value_json_shape() {
        assert_eq!(serde_json::to_value(FieldValue::Empty).unwrap(), json!(""));
        assert_eq!(
            serde_json::to_value(FieldValue::Scalar("Phase 2".to_string())).unwrap(),
            json!("Phase 2")
        );
        assert_eq!(
            serde_json::to_value(FieldValue::List(vec!["x".to_string(), "y".to_string()])).unwrap(),
            json!(["x", "y"])
        );
    }

    #[test]
    fn test_default_record_has_no_nulls() {
        let value = serde_json::to_value(TrialRecord::default()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 23);
        assert!(object.values().all(|v| !v.is_null()));
        assert_eq!(object["PMID"], json!([]));
        assert_eq!(object["primary_outcome"], json!([]));
        assert_eq!(object["nct_id"], json!(""));
    }

    #[test]
    fn test_record_key_order() {
        let text = serde_json::to_string(&TrialRecord::default()).unwrap();
        let nct = text.find("\"nct_id\"").unwrap();
        let pmid = text.find("\"PMID\"").unwrap();
        let url = text.find("\"url\"").unwrap();

        assert!(nct < pmid && pmid < url);
    }

    #[test]
    fn test_field_value_reads_back() {
        let value: FieldValue = serde_json::from_value(json!("")).unwrap();
        assert!(value.is_empty());

        let value: FieldValue = serde_json::from_value(json!(["Recruiting", "Completed"])).unwrap();
        assert_eq!(value.values(), vec!["Recruiting", "Completed"]);
    }
}
