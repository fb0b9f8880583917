//! 服务模块
//!
//! 报告流水线的三个环节：数据聚合、报告渲染、邮件投递。

pub mod aggregation;
pub mod delivery;
pub mod report;

pub use aggregation::DataAggregator;
pub use delivery::{DeliveryDispatcher, Mailer, SmtpMailer};
pub use report::{ReportRenderer, render_report, report_lines};
