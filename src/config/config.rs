use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 文档存储后端
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// SurrealDB 文档数据库
    #[default]
    Surrealdb,
    /// 进程内存储（开发与测试）
    Memory,
}

/// 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatabaseConfig {
    /// 存储后端
    pub backend: StoreBackend,
    /// SurrealDB 连接地址
    pub url: String,
    /// 命名空间
    pub namespace: String,
    /// 数据库名称
    pub database: String,
    /// 用户名（为空时跳过登录）
    pub username: String,
    /// 密码
    pub password: String,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ServerConfig {
    /// 监听地址
    pub host: String,
    /// 监听端口
    pub port: u16,
}

/// 邮件投递配置
#[derive(Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct MailConfig {
    /// SMTP 中继主机
    pub smtp_host: String,
    /// SMTP 端口
    pub smtp_port: u16,
    /// 是否使用 STARTTLS
    pub starttls: bool,
    /// SMTP 用户名
    pub username: String,
    /// SMTP 密码
    pub password: String,
    /// 发件人地址
    pub from: String,
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("starttls", &self.starttls)
            .field("username", &self.username)
            .field("password", &"***")
            .field("from", &self.from)
            .finish()
    }
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别
    pub level: String,
    /// 结构化日志格式
    pub structured: bool,
    /// 日志文件目录（按天滚动）
    pub log_dir: Option<PathBuf>,
}

/// 报告渲染配置
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ReportConfig {
    /// 嵌入的 TrueType 字体路径；未配置时使用 PDF 内置字体（仅 WinAnsi 字符集）
    pub font_path: Option<PathBuf>,
}

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 数据库配置
    pub database: DatabaseConfig,
    /// 服务器配置
    pub server: ServerConfig,
    /// 邮件配置
    pub mail: MailConfig,
    /// 日志配置
    pub logging: LoggingConfig,
    /// 报告渲染配置
    pub report: ReportConfig,
    /// 应用名称
    pub app_name: String,
    /// 环境
    pub environment: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::development()
    }
}

impl AppConfig {
    /// 创建开发环境配置
    pub fn development() -> Self {
        Self {
            database: DatabaseConfig {
                backend: StoreBackend::Surrealdb,
                url: "ws://localhost:8000".into(),
                namespace: "clinic".into(),
                database: "evaluations".into(),
                username: "root".into(),
                password: "root".into(),
            },
            server: ServerConfig {
                host: "0.0.0.0".into(),
                port: 8080,
            },
            mail: MailConfig {
                smtp_host: "smtp.gmail.com".into(),
                smtp_port: 587,
                starttls: true,
                username: String::new(),
                password: String::new(),
                from: "reports@localhost".into(),
            },
            logging: LoggingConfig {
                level: "debug".into(),
                structured: false,
                log_dir: None,
            },
            report: ReportConfig::default(),
            app_name: "patient-report".into(),
            environment: "development".into(),
        }
    }

    /// 创建生产环境配置
    pub fn production() -> Self {
        let mut config = Self::development();
        config.environment = "production".into();
        config.logging.level = "info".into();
        config.logging.structured = true;
        config
    }

    /// 按环境名称选择默认配置，未知名称按开发环境处理
    pub fn for_environment(environment: &str) -> Self {
        match environment {
            "production" => Self::production(),
            _ => Self::development(),
        }
    }
}
