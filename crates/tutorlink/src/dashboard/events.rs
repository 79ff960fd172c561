use serde::Serialize;
use tokio::sync::broadcast;

use super::domain::TeacherId;

/// Collection kinds carried on the change feed so listeners know which
/// collection to re-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Application,
    Contract,
    Payment,
    ProgressReport,
}

impl EntityKind {
    pub const fn label(self) -> &'static str {
        match self {
            EntityKind::Application => "application",
            EntityKind::Contract => "contract",
            EntityKind::Payment => "payment",
            EntityKind::ProgressReport => "progress_report",
        }
    }
}

/// A typed mutation notification: which teacher's collection changed, what
/// kind of record moved, and which record it was.
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub teacher: TeacherId,
    pub kind: EntityKind,
    pub record_id: String,
}

/// Broadcast channel the dashboard services publish mutations on.
#[derive(Debug, Clone)]
pub struct ChangeFeed {
    sender: broadcast::Sender<ChangeEvent>,
}

impl ChangeFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ChangeEvent> {
        self.sender.subscribe()
    }

    /// Publishing with no live subscribers is not an error.
    pub fn publish(&self, event: ChangeEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for ChangeFeed {
    fn default() -> Self {
        Self::new(64)
    }
}
