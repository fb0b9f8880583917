//! Patient Report - 患者评估报告服务
//!
//! 聚合患者根文档与测量结果，渲染为 PDF 报告，
//! 通过邮件发送给调用方指定的地址，并在 HTTP 响应中返回同一份报告。

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod observability;
pub mod services;
pub mod storage;
