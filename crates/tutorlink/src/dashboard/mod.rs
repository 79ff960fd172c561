//! Teacher dashboard services: tuition application tracking, the contract and
//! payment ledger, progress report logging, and demo seeding, all over a
//! shared record store with a typed change feed.

pub mod applications;
pub mod domain;
pub mod events;
pub mod ledger;
pub mod reports;
pub mod router;
pub mod seed;
pub mod store;

#[cfg(test)]
mod tests;

use std::sync::Arc;

pub use applications::{ApplicationRequest, ApplicationTracker};
pub use domain::{
    Application, ApplicationId, ApplicationStatus, Contract, ContractId, ContractStatus, Payment,
    PaymentId, PaymentStatus, ProgressReport, ReportId, StudentId, TeacherId, TeacherStats,
    TuitionId,
};
pub use events::{ChangeEvent, ChangeFeed, EntityKind};
pub use ledger::{EarningsLedger, PLACEHOLDER_RATING};
pub use reports::{ProgressReportLog, ReportEntry};
pub use router::{dashboard_router, StatusChangeRequest};
pub use seed::DemoSeeder;
pub use store::{InMemoryStore, RecordStore, StoreError};

/// Error raised by the dashboard services.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    #[error("an application for tuition '{tuition_id}' already exists")]
    DuplicateApplication { tuition_id: TuitionId },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Bundles the per-teacher services over one shared store and change feed.
pub struct DashboardServices<S> {
    pub applications: ApplicationTracker<S>,
    pub ledger: EarningsLedger<S>,
    pub reports: ProgressReportLog<S>,
    pub seeder: DemoSeeder<S>,
    feed: Arc<ChangeFeed>,
}

impl<S> DashboardServices<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>, feed: Arc<ChangeFeed>) -> Self {
        Self {
            applications: ApplicationTracker::new(store.clone(), feed.clone()),
            ledger: EarningsLedger::new(store.clone()),
            reports: ProgressReportLog::new(store.clone(), feed.clone()),
            seeder: DemoSeeder::new(store, feed.clone()),
            feed,
        }
    }

    pub fn feed(&self) -> &ChangeFeed {
        &self.feed
    }
}
