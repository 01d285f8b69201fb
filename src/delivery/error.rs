use thiserror::Error;

use crate::delivery::tabs::TabId;

#[derive(Debug, Error)]
pub enum TabsError {
    #[error("Failed to query active tab: {0}")]
    Query(String),

    /// The tab has no content script listening yet
    #[error("Could not establish connection. Receiving end does not exist.")]
    NoReceiver,

    #[error("Failed to send message to tab {tab_id}: {reason}")]
    Dispatch { tab_id: TabId, reason: String },
}
