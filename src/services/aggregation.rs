//! 数据聚合服务
//!
//! 读取患者根文档及其测量结果，合并为一份 PatientRecord。

use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::models::{PatientRecord, ResultEntry};
use crate::storage::repository::PatientStore;

#[derive(Clone)]
pub struct DataAggregator {
    store: Arc<dyn PatientStore>,
}

impl DataAggregator {
    pub fn new(store: Arc<dyn PatientStore>) -> Self {
        Self { store }
    }

    /// 聚合患者记录
    ///
    /// 根文档不存在时返回 `Ok(None)`，此时不会读取结果集合。存储错误原样向上传播。
    pub async fn fetch_patient_report(
        &self,
        user_id: &str,
        patient_id: &str,
    ) -> Result<Option<PatientRecord>> {
        let Some(attributes) = self.store.get_patient(user_id, patient_id).await? else {
            debug!("No patient document for users/{}/patients/{}", user_id, patient_id);
            return Ok(None);
        };

        let results: Vec<ResultEntry> = self
            .store
            .list_results(user_id, patient_id)
            .await?
            .into_iter()
            .map(ResultEntry::from)
            .collect();

        debug!(
            "Aggregated patient {} with {} result(s)",
            patient_id,
            results.len()
        );

        Ok(Some(PatientRecord::new(attributes, results)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::{PatientAttributes, ResultDocument};
    use crate::storage::memory::InMemoryPatientStore;
    use async_trait::async_trait;

    struct UnavailableStore;

    #[async_trait]
    impl PatientStore for UnavailableStore {
        async fn get_patient(&self, _: &str, _: &str) -> Result<Option<PatientAttributes>> {
            Err(AppError::Database("permission denied".into()))
        }

        async fn list_results(&self, _: &str, _: &str) -> Result<Vec<ResultDocument>> {
            Err(AppError::Database("permission denied".into()))
        }
    }

    #[tokio::test]
    async fn test_absent_root_document() {
        let store = Arc::new(InMemoryPatientStore::new());
        store
            .push_result("u1", "p1", ResultDocument::new("", "Elbow", "120"))
            .await;

        let aggregator = DataAggregator::new(store);
        assert!(aggregator.fetch_patient_report("u1", "p1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_root_without_results() {
        let store = Arc::new(InMemoryPatientStore::new());
        store
            .put_patient("u1", "p1", PatientAttributes::new("Alice", "2024-01-01"))
            .await;

        let record = DataAggregator::new(store)
            .fetch_patient_report("u1", "p1")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(record.attributes.patient_name(), "Alice");
        assert!(record.results.is_empty());
    }

    #[tokio::test]
    async fn test_results_mapped_in_store_order_with_defaults() {
        let store = Arc::new(InMemoryPatientStore::new());
        store
            .put_patient("u1", "p1", PatientAttributes::default())
            .await;
        store
            .push_result("u1", "p1", ResultDocument::new("2024-01-01T00:00:00Z", "Wrist", "45"))
            .await;
        store
            .push_result("u1", "p1", ResultDocument::default())
            .await;

        let record = DataAggregator::new(store)
            .fetch_patient_report("u1", "p1")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(
            record.results,
            vec![
                ResultEntry {
                    created: "2024-01-01T00:00:00Z".into(),
                    name: "Wrist".into(),
                    value: "45".into(),
                },
                ResultEntry::default(),
            ]
        );
    }

    #[tokio::test]
    async fn test_store_error_propagates() {
        let aggregator = DataAggregator::new(Arc::new(UnavailableStore));
        let err = aggregator.fetch_patient_report("u1", "p1").await.unwrap_err();
        assert!(matches!(err, AppError::Database(_)));
    }
}
