//! Browser tab access used for delivery

#[cfg(test)]
use mockall::automock;

use crate::delivery::error::TabsError;
use crate::message::types::TabMessage;

pub type TabId = i64;

/// Snapshot of a browser tab
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tab {
    /// Missing for tabs the browser does not expose to extensions
    pub id: Option<TabId>,
    pub url: Option<String>,
}

/// Browser tabs API as seen from the background context
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait TabsApi: Send + Sync {
    /// Returns the focused tab of the focused window, if any
    async fn get_active(&self) -> Result<Option<Tab>, TabsError>;

    /// True when the tab shows one of the extension's own pages
    fn is_extension_tab(&self, tab: &Tab) -> bool;

    /// Sends a message to the content script of the tab
    ///
    /// Fails with [`TabsError::NoReceiver`] while the content script is not
    /// injected yet.
    async fn send_message(&self, tab_id: TabId, message: &TabMessage) -> Result<(), TabsError>;
}

/// Recognizes extension pages by URL prefix
pub fn is_extension_url(url: &str, extension_origin: &str) -> bool {
    !extension_origin.is_empty() && url.starts_with(extension_origin)
}
