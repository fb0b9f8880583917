use async_trait::async_trait;

use crate::error::Result;
use crate::models::{PatientAttributes, ResultDocument};

/// 患者文档只读接口
///
/// 文档按 `users/{user_id}/patients/{patient_id}` 寻址，测量结果位于其下的 `results` 子集合。
#[async_trait]
pub trait PatientStore: Send + Sync {
    /// 读取患者根文档，不存在时返回 `None`
    async fn get_patient(
        &self,
        user_id: &str,
        patient_id: &str,
    ) -> Result<Option<PatientAttributes>>;

    /// 按存储自然顺序列出根文档下的全部测量结果
    async fn list_results(&self, user_id: &str, patient_id: &str) -> Result<Vec<ResultDocument>>;
}

#[cfg(feature = "surrealdb")]
pub use self::surreal::SurrealPatientStore;

#[cfg(feature = "surrealdb")]
mod surreal {
    use super::*;
    use surrealdb::{Surreal, engine::any::Any};

    use crate::storage::surrealdb::SurrealPool;

    const SELECT_PATIENT: &str = "
        SELECT * OMIT id FROM type::thing('patient', [$user_id, $patient_id])
    ";

    // 不排序：保持存储的自然返回顺序
    const SELECT_RESULTS: &str = "
        SELECT
            IF created != NONE THEN <string> created END AS created,
            IF type::is::string(name) THEN name END AS name,
            IF type::is::string(value) THEN value END AS value
        FROM result
        WHERE patient = type::thing('patient', [$user_id, $patient_id])
    ";

    /// SurrealDB 患者仓储实现
    ///
    /// 根文档为 `patient:[user_id, patient_id]`，测量结果为 `result` 表中
    /// 通过 `patient` 字段链接到根文档的记录。
    #[derive(Clone)]
    pub struct SurrealPatientStore {
        db: Surreal<Any>,
    }

    impl SurrealPatientStore {
        pub fn new(pool: &SurrealPool) -> Self {
            Self { db: pool.inner() }
        }
    }

    #[async_trait]
    impl PatientStore for SurrealPatientStore {
        async fn get_patient(
            &self,
            user_id: &str,
            patient_id: &str,
        ) -> Result<Option<PatientAttributes>> {
            let patient: Option<PatientAttributes> = self
                .db
                .query(SELECT_PATIENT)
                .bind(("user_id", user_id.to_owned()))
                .bind(("patient_id", patient_id.to_owned()))
                .await?
                .take(0)?;
            Ok(patient)
        }

        async fn list_results(
            &self,
            user_id: &str,
            patient_id: &str,
        ) -> Result<Vec<ResultDocument>> {
            let results: Vec<ResultDocument> = self
                .db
                .query(SELECT_RESULTS)
                .bind(("user_id", user_id.to_owned()))
                .bind(("patient_id", patient_id.to_owned()))
                .await?
                .take(0)?;
            Ok(results)
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::config::config::{DatabaseConfig, StoreBackend};

        async fn seeded_store() -> SurrealPatientStore {
            let pool = SurrealPool::new(&DatabaseConfig {
                backend: StoreBackend::Surrealdb,
                url: "mem://".into(),
                namespace: "test".into(),
                database: "test".into(),
                username: String::new(),
                password: String::new(),
            })
            .await
            .unwrap();

            pool.inner()
                .query(
                    "
                    CREATE patient:['u1', 'p1'] SET patientName = 'Alice', evaluationDate = '2024-01-01';
                    CREATE result:a SET patient = patient:['u1', 'p1'], created = d'2024-01-01T00:00:00Z', name = 'Elbow', value = '120';
                    CREATE result:b SET patient = patient:['u1', 'p1'], name = 'Knee';
                    CREATE result:c SET patient = patient:['u1', 'other'], name = 'Wrist', value = '80';
                    ",
                )
                .await
                .unwrap()
                .check()
                .unwrap();

            SurrealPatientStore::new(&pool)
        }

        #[tokio::test]
        async fn test_get_patient_existing() {
            let store = seeded_store().await;
            let patient = store.get_patient("u1", "p1").await.unwrap().unwrap();

            assert_eq!(patient.patient_name(), "Alice");
            assert_eq!(patient.evaluation_date(), "2024-01-01");
        }

        #[tokio::test]
        async fn test_get_patient_missing() {
            let store = seeded_store().await;
            assert!(store.get_patient("u1", "nobody").await.unwrap().is_none());
        }

        #[tokio::test]
        async fn test_list_results_scoped_to_patient() {
            let store = seeded_store().await;
            let results = store.list_results("u1", "p1").await.unwrap();

            assert_eq!(results.len(), 2);
            assert_eq!(results[0].name.as_deref(), Some("Elbow"));
            assert_eq!(results[0].value.as_deref(), Some("120"));
            assert_eq!(results[0].created.as_deref(), Some("2024-01-01T00:00:00Z"));
            assert_eq!(results[1].name.as_deref(), Some("Knee"));
            assert_eq!(results[1].value, None);
            assert_eq!(results[1].created, None);
        }
    }
}
