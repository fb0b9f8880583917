//! 可观测性模块
//!
//! 提供请求结果指标、结构化日志初始化和存活检查。

use axum::{Json, Router, extract::State, response::IntoResponse, routing::get};

use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt::writer::BoxMakeWriter};

use crate::config::config::LoggingConfig;
use crate::error::{FailureKind, Result};

// ===== Metrics =====

/// 报告请求指标
#[derive(Default)]
pub struct AppMetrics {
    pub reports_delivered: AtomicU64,
    pub bad_requests: AtomicU64,
    pub patients_not_found: AtomicU64,
    pub pipeline_failures: AtomicU64,
}

impl AppMetrics {
    /// 按请求结果计数
    pub fn record_outcome<T>(&self, outcome: &Result<T>) {
        let counter = match outcome {
            Ok(_) => &self.reports_delivered,
            Err(e) => match e.kind() {
                FailureKind::BadInput => &self.bad_requests,
                FailureKind::NotFound => &self.patients_not_found,
                FailureKind::ServerError => &self.pipeline_failures,
            },
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// 生成 Prometheus 格式指标
    pub fn gather(&self) -> String {
        format!(
            r#"# HELP reports_delivered_total Reports rendered and delivered
# TYPE reports_delivered_total counter
reports_delivered_total {}
# HELP report_bad_requests_total Report requests missing a required field
# TYPE report_bad_requests_total counter
report_bad_requests_total {}
# HELP report_not_found_total Report requests for unknown patients
# TYPE report_not_found_total counter
report_not_found_total {}
# HELP report_failures_total Report requests failed in aggregation, rendering or delivery
# TYPE report_failures_total counter
report_failures_total {}
"#,
            self.reports_delivered.load(Ordering::Relaxed),
            self.bad_requests.load(Ordering::Relaxed),
            self.patients_not_found.load(Ordering::Relaxed),
            self.pipeline_failures.load(Ordering::Relaxed),
        )
    }
}

// ===== Health Check =====

#[derive(Clone)]
pub struct ObservabilityState {
    pub metrics: Arc<AppMetrics>,
    pub start_time: DateTime<Utc>,
    pub version: String,
}

impl ObservabilityState {
    pub fn new(version: String, metrics: Arc<AppMetrics>) -> Self {
        Self {
            metrics,
            start_time: Utc::now(),
            version,
        }
    }

    /// 获取应用正常运行时间
    pub fn uptime_seconds(&self) -> f64 {
        (Utc::now() - self.start_time).num_seconds() as f64
    }
}

/// 简单存活检查
pub async fn liveness() -> impl IntoResponse {
    "OK"
}

/// Prometheus 指标端点
pub async fn metrics(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    state.metrics.gather()
}

/// 版本信息端点
pub async fn version(State(state): State<Arc<ObservabilityState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "version": state.version,
        "uptime_seconds": state.uptime_seconds(),
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// 创建可观测性路由
pub fn create_observability_router(state: Arc<ObservabilityState>) -> Router {
    Router::new()
        .route("/health/live", get(liveness))
        .route("/metrics", get(metrics))
        .route("/version", get(version))
        .with_state(state)
}

// ===== Structured Logging =====

/// 初始化日志
///
/// `RUST_LOG` 优先于配置中的级别。配置了 `log_dir` 时按天滚动写入文件，
/// 返回的 guard 必须在进程退出前一直持有。
pub fn init_tracing(
    config: &LoggingConfig,
) -> std::result::Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (writer, guard) = match &config.log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "patient-report.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard))
        }
        None => (BoxMakeWriter::new(std::io::stdout), None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_target(true)
        .with_line_number(true);

    if config.structured {
        builder.json().try_init()?;
    } else {
        builder.try_init()?;
    }

    Ok(guard)
}
