//! 核心数据模型模块
//!
//! 定义患者记录的数据结构：根文档属性、测量结果以及合并后的 PatientRecord。

pub mod patient;

pub use patient::*;
