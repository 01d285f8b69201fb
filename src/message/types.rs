use serde::{Deserialize, Serialize};

/// Filter list description supplied by the filtering engine
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterMetadata {
    pub filter_id: u32,
    pub display_number: u32,
    pub group_id: u32,
    pub name: String,
}

/// Body of an alert popup: one paragraph or one line per item
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AlertText {
    Single(String),
    Lines(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertPayload {
    pub title: String,
    pub text: AlertText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionUpdatePayload {
    pub title: String,
    pub description: String,
    pub changelog_href: String,
    pub changelog_text: String,
    pub show_promo_notification: bool,
    pub offer: String,
    pub offer_desc: String,
    pub offer_button_text: String,
    pub offer_button_href: String,
    pub disable_notification_text: String,
}

/// Popup variants understood by the content script
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Popup {
    ShowAlertPopup(AlertPayload),
    ShowVersionUpdatedPopup(VersionUpdatePayload),
}

impl Popup {
    pub fn message_type(&self) -> &'static str {
        match self {
            Popup::ShowAlertPopup(_) => "show-alert-popup",
            Popup::ShowVersionUpdatedPopup(_) => "show-version-updated-popup",
        }
    }
}

/// Message sent to a tab's content script
///
/// Serializes flat: `{"type": ..., <payload fields>, "alertStyles", "isAdguardTab"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabMessage {
    #[serde(flatten)]
    pub popup: Popup,
    pub alert_styles: String,
    /// Set per attempt from the resolved tab
    pub is_adguard_tab: bool,
}

impl TabMessage {
    pub fn new(popup: Popup, alert_styles: String) -> Self {
        Self {
            popup,
            alert_styles,
            is_adguard_tab: false,
        }
    }
}
