use crate::config::config::DatabaseConfig;
use surrealdb::{
    Surreal,
    engine::any::{Any, connect},
    opt::auth::Root,
};

/// SurrealDB 连接句柄
///
/// 进程启动时创建一次，之后在并发请求间共享只读使用。
#[derive(Clone)]
pub struct SurrealPool {
    /// 数据库连接
    db: Surreal<Any>,
}

impl SurrealPool {
    /// 建立连接
    pub async fn new(config: &DatabaseConfig) -> Result<Self, surrealdb::Error> {
        let db: Surreal<Any> = connect(&config.url).await?;

        // 嵌入式引擎没有用户，用户名为空时跳过认证
        if !config.username.is_empty() {
            db.signin(Root {
                username: &config.username,
                password: &config.password,
            })
            .await?;
        }

        db.use_ns(&config.namespace)
            .use_db(&config.database)
            .await?;

        Ok(Self { db })
    }

    /// 获取内部数据库实例
    pub fn inner(&self) -> Surreal<Any> {
        self.db.clone()
    }

    /// 检查连接是否可用
    pub async fn health_check(&self) -> Result<(), surrealdb::Error> {
        self.db.health().await
    }
}
