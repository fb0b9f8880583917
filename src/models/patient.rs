use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 患者根文档属性
///
/// 已知字段为强类型，其余键保留在 `extra` 中。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientAttributes {
    /// 患者姓名
    #[serde(default)]
    pub patient_name: Option<String>,

    /// 评估日期
    #[serde(default)]
    pub evaluation_date: Option<String>,

    /// 未知属性
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl PatientAttributes {
    pub fn new(patient_name: &str, evaluation_date: &str) -> Self {
        Self {
            patient_name: Some(patient_name.to_string()),
            evaluation_date: Some(evaluation_date.to_string()),
            extra: BTreeMap::new(),
        }
    }

    /// 患者姓名，缺失时为空字符串
    pub fn patient_name(&self) -> &str {
        self.patient_name.as_deref().unwrap_or_default()
    }

    /// 评估日期，缺失时为空字符串
    pub fn evaluation_date(&self) -> &str {
        self.evaluation_date.as_deref().unwrap_or_default()
    }
}

/// 存储中的测量结果文档，所有字段均可缺失
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResultDocument {
    /// 创建时间的文本形式
    pub created: Option<String>,
    /// 测量项目
    pub name: Option<String>,
    /// 测量值
    pub value: Option<String>,
}

impl ResultDocument {
    pub fn new(created: &str, name: &str, value: &str) -> Self {
        Self {
            created: Some(created.to_string()),
            name: Some(name.to_string()),
            value: Some(value.to_string()),
        }
    }
}

/// 单条测量结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub created: String,
    pub name: String,
    pub value: String,
}

impl From<ResultDocument> for ResultEntry {
    fn from(doc: ResultDocument) -> Self {
        Self {
            created: doc.created.unwrap_or_default(),
            name: doc.name.unwrap_or_default(),
            value: doc.value.unwrap_or_default(),
        }
    }
}

/// 合并后的患者记录
///
/// 仅在根文档存在时构造；`results` 保持存储返回的顺序。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PatientRecord {
    pub attributes: PatientAttributes,
    pub results: Vec<ResultEntry>,
}

impl PatientRecord {
    pub fn new(attributes: PatientAttributes, results: Vec<ResultEntry>) -> Self {
        Self {
            attributes,
            results,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_attributes_known_and_unknown_keys() {
        let attributes: PatientAttributes = serde_json::from_value(json!({
            "patientName": "Alice",
            "evaluationDate": "2024-01-01",
            "clinic": "Centro",
            "results": ["stale"],
        }))
        .unwrap();

        assert_eq!(attributes.patient_name(), "Alice");
        assert_eq!(attributes.evaluation_date(), "2024-01-01");
        assert_eq!(attributes.extra.get("clinic"), Some(&json!("Centro")));
        assert_eq!(attributes.extra.get("results"), Some(&json!(["stale"])));
    }

    #[test]
    fn test_missing_attributes_default_to_empty() {
        let attributes: PatientAttributes = serde_json::from_value(json!({})).unwrap();
        assert_eq!(attributes.patient_name(), "");
        assert_eq!(attributes.evaluation_date(), "");
    }

    #[test]
    fn test_result_entry_defaults_missing_fields() {
        let doc: ResultDocument = serde_json::from_value(json!({ "name": "Knee" })).unwrap();
        let entry = ResultEntry::from(doc);

        assert_eq!(entry.created, "");
        assert_eq!(entry.name, "Knee");
        assert_eq!(entry.value, "");
    }
}
