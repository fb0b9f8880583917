use crate::config::config::{AppConfig, StoreBackend};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use lettre::message::Mailbox;
use std::path::{Path, PathBuf};

/// 环境变量前缀，层级以 `__` 分隔，例如 `PATIENT_REPORT_MAIL__SMTP_HOST`
pub const ENV_PREFIX: &str = "PATIENT_REPORT_";

/// 配置加载器
pub struct ConfigLoader;

impl ConfigLoader {
    /// 从默认路径加载配置
    ///
    /// 优先级（由低到高）：
    /// 1. 内置默认值（由 `environment` 选择开发或生产环境）
    /// 2. ./config.toml
    /// 3. `PATIENT_REPORT_` 环境变量
    /// 4. `PORT` 环境变量（仅覆盖 server.port）
    pub fn load() -> Result<AppConfig, figment::Error> {
        Self::load_from(default_config_path())
    }

    /// 从指定路径加载配置
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig, figment::Error> {
        Self::figment(path.as_ref()).extract()
    }

    fn figment(path: &Path) -> Figment {
        let overrides = Figment::new()
            .merge(Toml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()));

        let environment: String = overrides
            .extract_inner("environment")
            .unwrap_or_else(|_| "development".into());

        Figment::from(Serialized::defaults(AppConfig::for_environment(&environment)))
            .merge(overrides)
    }

    /// 验证配置
    pub fn validate(config: &AppConfig) -> Result<(), ConfigValidationError> {
        if config.server.port == 0 {
            return Err(ConfigValidationError::InvalidPort);
        }

        if config.database.backend == StoreBackend::Surrealdb && config.database.url.is_empty() {
            return Err(ConfigValidationError::MissingDatabaseUrl);
        }

        if config.mail.smtp_host.is_empty() {
            return Err(ConfigValidationError::MissingSmtpHost);
        }

        if config.mail.from.is_empty() {
            return Err(ConfigValidationError::MissingSender);
        }

        if config.mail.from.parse::<Mailbox>().is_err() {
            return Err(ConfigValidationError::InvalidSender(config.mail.from.clone()));
        }

        Ok(())
    }
}

/// 配置验证错误
#[derive(thiserror::Error, Debug)]
pub enum ConfigValidationError {
    #[error("服务端口无效，必须大于 0")]
    InvalidPort,

    #[error("数据库连接 URL 未配置")]
    MissingDatabaseUrl,

    #[error("SMTP 中继主机未配置")]
    MissingSmtpHost,

    #[error("发件人地址未配置")]
    MissingSender,

    #[error("发件人地址无效: {0}")]
    InvalidSender(String),
}

/// 获取默认配置文件路径
pub fn default_config_path() -> PathBuf {
    PathBuf::from("config.toml")
}
