use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::applications::ApplicationRequest;
use super::domain::{ApplicationId, ApplicationStatus, StudentId, TeacherId};
use super::reports::ReportEntry;
use super::store::RecordStore;
use super::{DashboardError, DashboardServices};

/// Router builder exposing the per-teacher dashboard endpoints.
pub fn dashboard_router<S>(services: Arc<DashboardServices<S>>) -> Router
where
    S: RecordStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/teachers/:teacher_id/applications",
            get(list_applications_handler::<S>).post(apply_handler::<S>),
        )
        .route(
            "/api/v1/teachers/:teacher_id/applications/:application_id",
            patch(set_status_handler::<S>),
        )
        .route(
            "/api/v1/teachers/:teacher_id/contracts",
            get(contracts_handler::<S>),
        )
        .route(
            "/api/v1/teachers/:teacher_id/payments",
            get(payments_handler::<S>),
        )
        .route("/api/v1/teachers/:teacher_id/stats", get(stats_handler::<S>))
        .route(
            "/api/v1/teachers/:teacher_id/students/:student_id/reports",
            get(list_reports_handler::<S>).post(append_report_handler::<S>),
        )
        .route(
            "/api/v1/teachers/:teacher_id/demo-seed",
            post(seed_handler::<S>),
        )
        .with_state(services)
}

/// Body for a status change request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusChangeRequest {
    pub status: ApplicationStatus,
}

fn internal_error(error: &DashboardError) -> Response {
    let payload = json!({ "error": error.to_string() });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}

pub(crate) async fn list_applications_handler<S>(
    State(services): State<Arc<DashboardServices<S>>>,
    Path(teacher_id): Path<String>,
) -> Response
where
    S: RecordStore + 'static,
{
    let teacher = TeacherId(teacher_id);
    let applications = services.applications.list(&teacher);
    (StatusCode::OK, axum::Json(applications)).into_response()
}

pub(crate) async fn apply_handler<S>(
    State(services): State<Arc<DashboardServices<S>>>,
    Path(teacher_id): Path<String>,
    axum::Json(request): axum::Json<ApplicationRequest>,
) -> Response
where
    S: RecordStore + 'static,
{
    let teacher = TeacherId(teacher_id);
    match services.applications.apply(&teacher, request) {
        Ok(application) => (StatusCode::CREATED, axum::Json(application)).into_response(),
        Err(error @ DashboardError::DuplicateApplication { .. }) => {
            let payload = json!({ "error": error.to_string() });
            (StatusCode::CONFLICT, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(&other),
    }
}

pub(crate) async fn set_status_handler<S>(
    State(services): State<Arc<DashboardServices<S>>>,
    Path((teacher_id, application_id)): Path<(String, String)>,
    axum::Json(request): axum::Json<StatusChangeRequest>,
) -> Response
where
    S: RecordStore + 'static,
{
    let teacher = TeacherId(teacher_id);
    let id = ApplicationId(application_id);
    match services.applications.set_status(&teacher, &id, request.status) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => internal_error(&error),
    }
}

pub(crate) async fn contracts_handler<S>(
    State(services): State<Arc<DashboardServices<S>>>,
    Path(teacher_id): Path<String>,
) -> Response
where
    S: RecordStore + 'static,
{
    let teacher = TeacherId(teacher_id);
    let contracts = services.ledger.contracts(&teacher);
    (StatusCode::OK, axum::Json(contracts)).into_response()
}

pub(crate) async fn payments_handler<S>(
    State(services): State<Arc<DashboardServices<S>>>,
    Path(teacher_id): Path<String>,
) -> Response
where
    S: RecordStore + 'static,
{
    let teacher = TeacherId(teacher_id);
    let payments = services.ledger.payments(&teacher);
    (StatusCode::OK, axum::Json(payments)).into_response()
}

pub(crate) async fn stats_handler<S>(
    State(services): State<Arc<DashboardServices<S>>>,
    Path(teacher_id): Path<String>,
) -> Response
where
    S: RecordStore + 'static,
{
    let teacher = TeacherId(teacher_id);
    let stats = services.ledger.stats(&teacher);
    (StatusCode::OK, axum::Json(stats)).into_response()
}

pub(crate) async fn list_reports_handler<S>(
    State(services): State<Arc<DashboardServices<S>>>,
    Path((teacher_id, student_id)): Path<(String, String)>,
) -> Response
where
    S: RecordStore + 'static,
{
    let teacher = TeacherId(teacher_id);
    let student = StudentId(student_id);
    let reports = services.reports.list(&teacher, &student);
    (StatusCode::OK, axum::Json(reports)).into_response()
}

pub(crate) async fn append_report_handler<S>(
    State(services): State<Arc<DashboardServices<S>>>,
    Path((teacher_id, student_id)): Path<(String, String)>,
    axum::Json(entry): axum::Json<ReportEntry>,
) -> Response
where
    S: RecordStore + 'static,
{
    let teacher = TeacherId(teacher_id);
    let student = StudentId(student_id);
    match services.reports.append(&teacher, &student, entry) {
        Ok(report) => (StatusCode::CREATED, axum::Json(report)).into_response(),
        Err(error) => internal_error(&error),
    }
}

pub(crate) async fn seed_handler<S>(
    State(services): State<Arc<DashboardServices<S>>>,
    Path(teacher_id): Path<String>,
) -> Response
where
    S: RecordStore + 'static,
{
    let teacher = TeacherId(teacher_id);
    match services.seeder.seed_if_needed(&teacher) {
        Ok(seeded) => {
            let payload = json!({ "seeded": seeded });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => internal_error(&error),
    }
}
