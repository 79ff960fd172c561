use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use super::domain::{
    Application, ApplicationId, ApplicationStatus, Contract, ContractId, ContractStatus, Payment,
    PaymentId, PaymentStatus, TeacherId, TuitionId,
};
use super::events::{ChangeEvent, ChangeFeed, EntityKind};
use super::store::{self, RecordStore};
use super::DashboardError;

/// One-time initializer that populates a first-time teacher's dashboard
/// with fixture data, gated by a per-teacher flag key.
pub struct DemoSeeder<S> {
    store: Arc<S>,
    feed: Arc<ChangeFeed>,
}

impl<S> DemoSeeder<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>, feed: Arc<ChangeFeed>) -> Self {
        Self { store, feed }
    }

    /// Seed fixture applications, contracts, and payments unless the flag is
    /// already set. Returns true when fixtures were written. The flag alone
    /// gates re-seeding: collections cleared externally behind a surviving
    /// flag stay empty. Store failures propagate.
    pub fn seed_if_needed(&self, teacher: &TeacherId) -> Result<bool, DashboardError> {
        let flag_key = store::seeded_flag_key(teacher);
        if self.store.get(&flag_key)?.is_some() {
            return Ok(false);
        }

        store::write_collection(
            self.store.as_ref(),
            &store::applications_key(teacher),
            &fixture_applications(),
        )?;
        store::write_collection(
            self.store.as_ref(),
            &store::contracts_key(teacher),
            &fixture_contracts(),
        )?;
        store::write_collection(
            self.store.as_ref(),
            &store::payments_key(teacher),
            &fixture_payments(),
        )?;
        self.store.put(&flag_key, "true".to_string())?;

        info!(teacher = %teacher.0, "demo fixtures seeded");
        for kind in [
            EntityKind::Application,
            EntityKind::Contract,
            EntityKind::Payment,
        ] {
            self.feed.publish(ChangeEvent {
                teacher: teacher.clone(),
                kind,
                record_id: "demo-fixtures".to_string(),
            });
        }

        Ok(true)
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid fixture date")
}

fn fixture_applications() -> Vec<Application> {
    vec![
        Application {
            id: ApplicationId("app-demo-001".to_string()),
            tuition_id: TuitionId("tuition-demo-101".to_string()),
            title: "Grade 9 Mathematics".to_string(),
            location: "Dhanmondi".to_string(),
            applied_on: date(2026, 1, 12),
            status: ApplicationStatus::Accepted,
            proposal: Some("Five years teaching secondary mathematics.".to_string()),
            expected_salary: Some(6000),
        },
        Application {
            id: ApplicationId("app-demo-002".to_string()),
            tuition_id: TuitionId("tuition-demo-102".to_string()),
            title: "HSC Physics".to_string(),
            location: "Uttara".to_string(),
            applied_on: date(2026, 2, 3),
            status: ApplicationStatus::Shortlisted,
            proposal: Some("Physics graduate, exam-focused sessions.".to_string()),
            expected_salary: Some(7500),
        },
        Application {
            id: ApplicationId("app-demo-003".to_string()),
            tuition_id: TuitionId("tuition-demo-103".to_string()),
            title: "Grade 6 English".to_string(),
            location: "Mirpur".to_string(),
            applied_on: date(2026, 2, 20),
            status: ApplicationStatus::Pending,
            proposal: None,
            expected_salary: Some(4000),
        },
    ]
}

fn fixture_contracts() -> Vec<Contract> {
    vec![
        Contract {
            id: ContractId("contract-demo-001".to_string()),
            student_name: "Rahim Uddin".to_string(),
            subject: "Mathematics".to_string(),
            start_date: date(2026, 1, 20),
            salary: 6000,
            status: ContractStatus::Active,
        },
        Contract {
            id: ContractId("contract-demo-002".to_string()),
            student_name: "Sadia Akter".to_string(),
            subject: "Chemistry".to_string(),
            start_date: date(2025, 9, 1),
            salary: 5500,
            status: ContractStatus::Completed,
        },
    ]
}

fn fixture_payments() -> Vec<Payment> {
    vec![
        Payment {
            id: PaymentId("payment-demo-001".to_string()),
            student: "Rahim Uddin".to_string(),
            guardian: "Karim Uddin".to_string(),
            amount: 6000,
            month: "2026-01".to_string(),
            status: PaymentStatus::Paid,
            date: date(2026, 2, 1),
        },
        Payment {
            id: PaymentId("payment-demo-002".to_string()),
            student: "Rahim Uddin".to_string(),
            guardian: "Karim Uddin".to_string(),
            amount: 6000,
            month: "2026-02".to_string(),
            status: PaymentStatus::Paid,
            date: date(2026, 3, 1),
        },
        Payment {
            id: PaymentId("payment-demo-003".to_string()),
            student: "Rahim Uddin".to_string(),
            guardian: "Karim Uddin".to_string(),
            amount: 6000,
            month: "2026-03".to_string(),
            status: PaymentStatus::Pending,
            date: date(2026, 4, 1),
        },
    ]
}
