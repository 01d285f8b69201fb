//! Stand-in browser used by the command line tool
//!
//! Pretends one tab is always active and writes every message sent to it as a
//! JSON line, so the exact payload a content script would receive can be
//! inspected.

use std::io::Write;
use std::sync::Mutex;

use crate::delivery::error::TabsError;
use crate::delivery::tabs::{Tab, TabId, TabsApi, is_extension_url};
use crate::message::types::TabMessage;

pub const PREVIEW_TAB_ID: TabId = 1;

pub struct PreviewTabs<W> {
    tab: Tab,
    extension_origin: String,
    out: Mutex<W>,
}

impl<W: Write + Send> PreviewTabs<W> {
    pub fn new(tab_url: &str, extension_origin: &str, out: W) -> Self {
        Self {
            tab: Tab {
                id: Some(PREVIEW_TAB_ID),
                url: Some(tab_url.to_string()),
            },
            extension_origin: extension_origin.to_string(),
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait::async_trait]
impl<W: Write + Send> TabsApi for PreviewTabs<W> {
    async fn get_active(&self) -> Result<Option<Tab>, TabsError> {
        Ok(Some(self.tab.clone()))
    }

    fn is_extension_tab(&self, tab: &Tab) -> bool {
        tab.url
            .as_deref()
            .is_some_and(|url| is_extension_url(url, &self.extension_origin))
    }

    async fn send_message(&self, tab_id: TabId, message: &TabMessage) -> Result<(), TabsError> {
        let dispatch_error = |reason: String| TabsError::Dispatch { tab_id, reason };

        let line = serde_json::to_string(message).map_err(|e| dispatch_error(e.to_string()))?;
        let mut out = self
            .out
            .lock()
            .map_err(|_| dispatch_error("output lock poisoned".to_string()))?;
        writeln!(out, "{line}").map_err(|e| dispatch_error(e.to_string()))?;
        out.flush().map_err(|e| dispatch_error(e.to_string()))
    }
}
