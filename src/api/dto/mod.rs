//! DTO 模块
//!
//! 数据传输对象，用于 API 请求参数的反序列化。

pub mod report_dto;

pub use report_dto::*;
