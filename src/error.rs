//! 错误处理模块
//!
//! 定义应用程序的错误类型，以及到 HTTP 状态码的唯一映射点。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 请求参数缺失
    #[error("{0}")]
    Validation(String),

    /// 资源不存在
    #[error("{0}")]
    NotFound(String),

    /// 数据库错误
    #[error("数据库错误: {0}")]
    Database(String),

    /// 报告渲染错误
    #[error("报告渲染错误: {0}")]
    Render(String),

    /// 邮件投递错误（不区分认证、网络或收件人拒绝）
    #[error("邮件投递错误: {0}")]
    Delivery(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),
}

impl AppError {
    /// 请求失败类别
    pub fn kind(&self) -> FailureKind {
        match self {
            AppError::Validation(_) => FailureKind::BadInput,
            AppError::NotFound(_) => FailureKind::NotFound,
            _ => FailureKind::ServerError,
        }
    }
}

/// 请求失败类别，每一类对应一个 HTTP 状态码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    BadInput,
    NotFound,
    ServerError,
}

impl From<FailureKind> for StatusCode {
    fn from(kind: FailureKind) -> Self {
        match kind {
            FailureKind::BadInput => StatusCode::BAD_REQUEST,
            FailureKind::NotFound => StatusCode::NOT_FOUND,
            FailureKind::ServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(feature = "surrealdb")]
impl From<surrealdb::Error> for AppError {
    fn from(e: surrealdb::Error) -> Self {
        AppError::Database(e.to_string())
    }
}

impl From<lettre::error::Error> for AppError {
    fn from(e: lettre::error::Error) -> Self {
        AppError::Delivery(e.to_string())
    }
}

impl From<lettre::address::AddressError> for AppError {
    fn from(e: lettre::address::AddressError) -> Self {
        AppError::Delivery(e.to_string())
    }
}

impl From<lettre::transport::smtp::Error> for AppError {
    fn from(e: lettre::transport::smtp::Error) -> Self {
        AppError::Delivery(e.to_string())
    }
}

/// Axum response implementation for AppError
///
/// 所有错误都以纯文本返回；服务端错误统一加上 `Failed to send PDF:` 前缀。
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let body = match kind {
            FailureKind::ServerError => format!("Failed to send PDF: {}", self),
            _ => self.to_string(),
        };
        (StatusCode::from(kind), body).into_response()
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;
