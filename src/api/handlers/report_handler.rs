use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::{
    api::{app_state::AppState, dto::report_dto::*},
    error::{AppError, FailureKind, Result},
    services::delivery::{REPORT_CONTENT_TYPE, REPORT_FILENAME},
};

/// 生成患者报告，通过邮件发送，并在响应体中返回同一份 PDF
#[tracing::instrument(
    skip(state, params),
    fields(request_id = %uuid::Uuid::new_v4())
)]
pub async fn send_pdf(
    State(state): State<AppState>,
    Path((user_id, patient_id)): Path<(String, String)>,
    Query(params): Query<SendPdfParams>,
) -> Result<Response> {
    debug!("Report requested for user {} patient {}", user_id, patient_id);

    let outcome = run_pipeline(&state, &user_id, &patient_id, params.email.as_deref()).await;
    state.metrics.record_outcome(&outcome);

    let pdf = outcome.inspect_err(|e| match e.kind() {
        FailureKind::ServerError => warn!("Report pipeline failed: {}", e),
        _ => debug!("Report request rejected: {}", e),
    })?;

    let disposition = format!("attachment; filename=\"{}\"", REPORT_FILENAME);
    Ok((
        [
            (header::CONTENT_TYPE, REPORT_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}

/// 校验 → 聚合 → 渲染 → 投递
///
/// 报告只渲染一次，同一份字节同时用于邮件附件和 HTTP 响应。
/// 投递失败时丢弃已渲染的报告。
async fn run_pipeline(
    state: &AppState,
    user_id: &str,
    patient_id: &str,
    email: Option<&str>,
) -> Result<Vec<u8>> {
    let request = SendPdfRequest::validate(user_id, patient_id, email)?;

    let record = state
        .aggregator
        .fetch_patient_report(&request.user_id, &request.patient_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Patient not found".to_string()))?;

    let renderer = state.renderer.clone();
    let pdf = tokio::task::spawn_blocking(move || renderer.render(&record))
        .await
        .map_err(|e| AppError::Internal(format!("render task failed: {e}")))??;

    state.dispatcher.send_report(&request.email, &pdf).await?;

    Ok(pdf)
}
