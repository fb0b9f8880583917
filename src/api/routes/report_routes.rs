//! Report Routes
//!
//! 定义患者报告相关的 API 路由。

use crate::api::handlers::report_handler::*;
use axum::{Router, routing::get};

use crate::api::app_state::AppState;

/// 创建报告路由器
pub fn create_report_router() -> Router<AppState> {
    Router::new().route(
        "/users/:user_id/patients/:patient_id/send-pdf",
        get(send_pdf),
    )
}
