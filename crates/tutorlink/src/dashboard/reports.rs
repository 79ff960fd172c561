use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use super::domain::{ProgressReport, ReportId, StudentId, TeacherId};
use super::events::{ChangeEvent, ChangeFeed, EntityKind};
use super::store::{self, RecordStore};
use super::DashboardError;

static REPORT_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_report_id() -> ReportId {
    let id = REPORT_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    ReportId(format!("report-{id:06}"))
}

/// Payload for a new progress note. The date defaults to today when omitted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportEntry {
    pub performance: String,
    pub comments: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

/// Append-only log of teacher-authored notes per (teacher, student). No
/// edit or delete operation exists.
pub struct ProgressReportLog<S> {
    store: Arc<S>,
    feed: Arc<ChangeFeed>,
}

impl<S> ProgressReportLog<S>
where
    S: RecordStore + 'static,
{
    pub fn new(store: Arc<S>, feed: Arc<ChangeFeed>) -> Self {
        Self { store, feed }
    }

    /// Append a progress note for a student. Store failures propagate.
    pub fn append(
        &self,
        teacher: &TeacherId,
        student: &StudentId,
        entry: ReportEntry,
    ) -> Result<ProgressReport, DashboardError> {
        let key = store::reports_key(teacher, student);
        let mut reports: Vec<ProgressReport> =
            store::read_collection(self.store.as_ref(), &key);

        let report = ProgressReport {
            id: next_report_id(),
            performance: entry.performance,
            comments: entry.comments,
            date: entry.date.unwrap_or_else(|| Local::now().date_naive()),
        };

        reports.push(report.clone());
        store::write_collection(self.store.as_ref(), &key, &reports)?;
        self.feed.publish(ChangeEvent {
            teacher: teacher.clone(),
            kind: EntityKind::ProgressReport,
            record_id: report.id.0.clone(),
        });

        Ok(report)
    }

    /// Notes for one student, oldest first.
    pub fn list(&self, teacher: &TeacherId, student: &StudentId) -> Vec<ProgressReport> {
        store::read_collection(self.store.as_ref(), &store::reports_key(teacher, student))
    }
}
