use crate::observability::AppMetrics;
use crate::services::aggregation::DataAggregator;
use crate::services::delivery::{DeliveryDispatcher, Mailer};
use crate::services::report::ReportRenderer;
use crate::storage::repository::PatientStore;
use lettre::message::Mailbox;
use std::sync::Arc;

/// Application state containing the shared collaborators
///
/// Built once at startup; request handlers only read from it.
#[derive(Clone)]
pub struct AppState {
    /// Reads patient documents and merges their results
    pub aggregator: DataAggregator,
    /// Typesets aggregated records as PDF
    pub renderer: ReportRenderer,
    /// Sends rendered reports by email
    pub dispatcher: DeliveryDispatcher,
    /// Request outcome counters
    pub metrics: Arc<AppMetrics>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("aggregator", &"DataAggregator")
            .field("renderer", &self.renderer)
            .field("dispatcher", &"DeliveryDispatcher")
            .field("metrics", &"Arc<AppMetrics>")
            .finish()
    }
}

impl AppState {
    /// Create new application state
    pub fn new(
        store: Arc<dyn PatientStore>,
        renderer: ReportRenderer,
        mailer: Arc<dyn Mailer>,
        sender: Mailbox,
        metrics: Arc<AppMetrics>,
    ) -> Self {
        Self {
            aggregator: DataAggregator::new(store),
            renderer,
            dispatcher: DeliveryDispatcher::new(mailer, sender),
            metrics,
        }
    }
}
