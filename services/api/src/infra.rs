use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tutorlink::dashboard::{ChangeFeed, DashboardServices, InMemoryStore};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// One shared store and change feed for the whole process.
pub(crate) fn build_dashboard() -> (Arc<DashboardServices<InMemoryStore>>, Arc<ChangeFeed>) {
    let store = Arc::new(InMemoryStore::default());
    let feed = Arc::new(ChangeFeed::default());
    let services = Arc::new(DashboardServices::new(store, feed.clone()));
    (services, feed)
}
