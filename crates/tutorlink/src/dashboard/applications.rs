use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::domain::{Application, ApplicationId, ApplicationStatus, TeacherId, TuitionId};
use super::events::{ChangeEvent, ChangeFeed, EntityKind};
use super::store::{self, RecordStore};
use super::DashboardError;

static APPLICATION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_application_id() -> ApplicationId {
    let id = APPLICATION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ApplicationId(format!("app-{id:06}"))
}

/// Payload for a new tuition application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationRequest {
    pub tuition_id: TuitionId,
    pub title: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proposal: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_salary: Option<u32>,
}

/// Manages the lifecycle of a teacher's tuition applications.
pub struct ApplicationTracker<S> {
    store: Arc<S>,
    feed: Arc<ChangeFeed>,
}

impl<S> ApplicationTracker<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>, feed: Arc<ChangeFeed>) -> Self {
        Self { store, feed }
    }

    /// Applications in insertion order.
    pub fn list(&self, teacher: &TeacherId) -> Vec<Application> {
        store::read_collection(self.store.as_ref(), &store::applications_key(teacher))
    }

    /// Submit a new application, dated today. Fails when the teacher already
    /// applied to the tuition.
    pub fn apply(
        &self,
        teacher: &TeacherId,
        request: ApplicationRequest,
    ) -> Result<Application, DashboardError> {
        self.apply_on(teacher, request, Local::now().date_naive())
    }

    /// `apply` with an explicit application date.
    pub fn apply_on(
        &self,
        teacher: &TeacherId,
        request: ApplicationRequest,
        applied_on: NaiveDate,
    ) -> Result<Application, DashboardError> {
        let key = store::applications_key(teacher);
        let mut applications: Vec<Application> =
            store::read_collection(self.store.as_ref(), &key);

        if applications
            .iter()
            .any(|application| application.tuition_id == request.tuition_id)
        {
            return Err(DashboardError::DuplicateApplication {
                tuition_id: request.tuition_id,
            });
        }

        let application = Application {
            id: next_application_id(),
            tuition_id: request.tuition_id,
            title: request.title,
            location: request.location,
            applied_on,
            status: ApplicationStatus::Pending,
            proposal: request.proposal,
            expected_salary: request.expected_salary,
        };

        applications.push(application.clone());
        store::write_collection(self.store.as_ref(), &key, &applications)?;
        self.feed.publish(ChangeEvent {
            teacher: teacher.clone(),
            kind: EntityKind::Application,
            record_id: application.id.0.clone(),
        });

        Ok(application)
    }

    /// Set the status of an existing application. Unknown ids are a silent
    /// no-op; transitions are not validated.
    pub fn set_status(
        &self,
        teacher: &TeacherId,
        id: &ApplicationId,
        status: ApplicationStatus,
    ) -> Result<(), DashboardError> {
        let key = store::applications_key(teacher);
        let mut applications: Vec<Application> =
            store::read_collection(self.store.as_ref(), &key);

        let Some(application) = applications
            .iter_mut()
            .find(|application| &application.id == id)
        else {
            debug!(
                teacher = %teacher.0,
                application = %id.0,
                "status change for unknown application ignored"
            );
            return Ok(());
        };

        application.status = status;
        store::write_collection(self.store.as_ref(), &key, &applications)?;
        self.feed.publish(ChangeEvent {
            teacher: teacher.clone(),
            kind: EntityKind::Application,
            record_id: id.0.clone(),
        });

        Ok(())
    }
}
