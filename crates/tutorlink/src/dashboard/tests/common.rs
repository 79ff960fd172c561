use std::sync::Arc;

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::dashboard::applications::ApplicationRequest;
use crate::dashboard::domain::{StudentId, TeacherId, TuitionId};
use crate::dashboard::events::ChangeFeed;
use crate::dashboard::reports::ReportEntry;
use crate::dashboard::store::{InMemoryStore, RecordStore, StoreError};
use crate::dashboard::{dashboard_router, DashboardServices};

pub(super) fn teacher() -> TeacherId {
    TeacherId("t1".to_string())
}

pub(super) fn student() -> StudentId {
    StudentId("s1".to_string())
}

pub(super) fn applied_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
}

pub(super) fn request(tuition: &str) -> ApplicationRequest {
    ApplicationRequest {
        tuition_id: TuitionId(tuition.to_string()),
        title: "Grade 8 Mathematics".to_string(),
        location: "Dhanmondi".to_string(),
        proposal: Some("hello".to_string()),
        expected_salary: Some(5000),
    }
}

pub(super) fn report_entry(performance: &str, day: u32) -> ReportEntry {
    ReportEntry {
        performance: performance.to_string(),
        comments: "Completed the weekly worksheet.".to_string(),
        date: NaiveDate::from_ymd_opt(2026, 3, day),
    }
}

pub(super) fn build_services() -> (
    Arc<DashboardServices<InMemoryStore>>,
    Arc<InMemoryStore>,
    Arc<ChangeFeed>,
) {
    let store = Arc::new(InMemoryStore::default());
    let feed = Arc::new(ChangeFeed::default());
    let services = Arc::new(DashboardServices::new(store.clone(), feed.clone()));
    (services, store, feed)
}

pub(super) fn build_failing_services() -> Arc<DashboardServices<UnavailableStore>> {
    let feed = Arc::new(ChangeFeed::default());
    Arc::new(DashboardServices::new(Arc::new(UnavailableStore), feed))
}

pub(super) fn dashboard_router_with_services(
    services: Arc<DashboardServices<InMemoryStore>>,
) -> axum::Router {
    dashboard_router(services)
}

/// Store double that fails every operation.
pub(super) struct UnavailableStore;

impl RecordStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable("storage offline".to_string()))
    }

    fn put(&self, _key: &str, _value: String) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("storage offline".to_string()))
    }
}

/// Store double whose reads work but whose writes fail, so duplicate checks
/// still run before the failure surfaces.
pub(super) struct ReadOnlyStore {
    pub(super) inner: InMemoryStore,
}

impl RecordStore for ReadOnlyStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.inner.get(key)
    }

    fn put(&self, _key: &str, _value: String) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("read only".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
