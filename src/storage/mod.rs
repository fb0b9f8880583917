//! 存储层模块
//!
//! 提供患者文档的只读访问，支持 SurrealDB 与进程内存储。

#[cfg(feature = "surrealdb")]
pub mod surrealdb;

pub mod factory;
pub mod memory;
pub mod repository;

pub use memory::InMemoryPatientStore;
pub use repository::PatientStore;
