//! Handlers 模块
//!
//! HTTP 请求处理程序。

pub mod report_handler;

pub use report_handler::*;
