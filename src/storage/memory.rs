//! 进程内患者存储
//!
//! 用于开发环境和测试；不做持久化。

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::{PatientAttributes, ResultDocument};
use crate::storage::repository::PatientStore;

#[derive(Debug, Default)]
struct StoredPatient {
    attributes: Option<PatientAttributes>,
    results: Vec<ResultDocument>,
}

/// 内存患者仓储
///
/// 结果集合可以独立于根文档存在，与层级文档数据库的行为一致。
#[derive(Debug, Default)]
pub struct InMemoryPatientStore {
    patients: RwLock<HashMap<String, StoredPatient>>,
}

impl InMemoryPatientStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn document_path(user_id: &str, patient_id: &str) -> String {
        format!("users/{}/patients/{}", user_id, patient_id)
    }

    /// 写入或替换根文档
    pub async fn put_patient(
        &self,
        user_id: &str,
        patient_id: &str,
        attributes: PatientAttributes,
    ) {
        let mut patients = self.patients.write().await;
        patients
            .entry(Self::document_path(user_id, patient_id))
            .or_default()
            .attributes = Some(attributes);
    }

    /// 在根文档路径下追加一条测量结果
    pub async fn push_result(&self, user_id: &str, patient_id: &str, result: ResultDocument) {
        let mut patients = self.patients.write().await;
        patients
            .entry(Self::document_path(user_id, patient_id))
            .or_default()
            .results
            .push(result);
    }
}

#[async_trait]
impl PatientStore for InMemoryPatientStore {
    async fn get_patient(
        &self,
        user_id: &str,
        patient_id: &str,
    ) -> Result<Option<PatientAttributes>> {
        let patients = self.patients.read().await;
        Ok(patients
            .get(&Self::document_path(user_id, patient_id))
            .and_then(|p| p.attributes.clone()))
    }

    async fn list_results(&self, user_id: &str, patient_id: &str) -> Result<Vec<ResultDocument>> {
        let patients = self.patients.read().await;
        Ok(patients
            .get(&Self::document_path(user_id, patient_id))
            .map(|p| p.results.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_results_keep_insertion_order() {
        let store = InMemoryPatientStore::new();
        store
            .put_patient("u1", "p1", PatientAttributes::new("Alice", "2024-01-01"))
            .await;
        for name in ["Shoulder", "Elbow", "Ankle"] {
            store
                .push_result("u1", "p1", ResultDocument::new("", name, "1"))
                .await;
        }

        let names: Vec<_> = store
            .list_results("u1", "p1")
            .await
            .unwrap()
            .into_iter()
            .filter_map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Shoulder", "Elbow", "Ankle"]);
    }

    #[tokio::test]
    async fn test_results_without_root_document() {
        let store = InMemoryPatientStore::new();
        store
            .push_result("u1", "ghost", ResultDocument::new("", "Knee", "90"))
            .await;

        assert!(store.get_patient("u1", "ghost").await.unwrap().is_none());
        assert_eq!(store.list_results("u1", "ghost").await.unwrap().len(), 1);
    }
}
