use std::sync::Arc;

use super::domain::{
    Application, ApplicationStatus, Contract, ContractStatus, Payment, PaymentStatus, TeacherId,
    TeacherStats,
};
use super::store::{self, RecordStore};

/// Placeholder until a review subsystem exists; no formula may be assumed.
pub const PLACEHOLDER_RATING: f32 = 4.8;

/// Read-only view over a teacher's contracts and payment history, plus the
/// derived dashboard statistics.
pub struct EarningsLedger<S> {
    store: Arc<S>,
}

impl<S> EarningsLedger<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn contracts(&self, teacher: &TeacherId) -> Vec<Contract> {
        store::read_collection(self.store.as_ref(), &store::contracts_key(teacher))
    }

    pub fn payments(&self, teacher: &TeacherId) -> Vec<Payment> {
        store::read_collection(self.store.as_ref(), &store::payments_key(teacher))
    }

    /// Recompute statistics from fresh reads. Nothing is cached or
    /// accumulated between calls.
    pub fn stats(&self, teacher: &TeacherId) -> TeacherStats {
        let applications: Vec<Application> =
            store::read_collection(self.store.as_ref(), &store::applications_key(teacher));
        let contracts = self.contracts(teacher);
        let payments = self.payments(teacher);

        TeacherStats {
            total_applications: applications.len(),
            shortlisted: applications
                .iter()
                .filter(|application| application.status == ApplicationStatus::Shortlisted)
                .count(),
            hired: contracts
                .iter()
                .filter(|contract| contract.status == ContractStatus::Active)
                .count(),
            rating: PLACEHOLDER_RATING,
            total_earned: payments
                .iter()
                .filter(|payment| payment.status == PaymentStatus::Paid)
                .map(|payment| u64::from(payment.amount))
                .sum(),
            pending_payments: payments
                .iter()
                .filter(|payment| payment.status == PaymentStatus::Pending)
                .map(|payment| u64::from(payment.amount))
                .sum(),
        }
    }
}
