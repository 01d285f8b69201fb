//! Promotional notification lookup

#[cfg(test)]
use mockall::automock;

use serde::Deserialize;

/// Promo text is either a plain string or a structured offer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum PromoText {
    Plain(String),
    Offer { title: String, desc: String, btn: String },
}

/// Time-boxed promotional notification
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PromoNotification {
    pub url: String,
    pub text: PromoText,
}

/// Source of the currently active promotional notification
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait PromoProvider: Send + Sync {
    /// Returns the active notification, if any
    async fn current_notification(&self) -> Option<PromoNotification>;
}

/// Provider with no promotions, ever
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPromo;

#[async_trait::async_trait]
impl PromoProvider for NoPromo {
    async fn current_notification(&self) -> Option<PromoNotification> {
        None
    }
}

/// Provider returning one fixed notification
#[derive(Debug, Clone)]
pub struct StaticPromo(pub PromoNotification);

#[async_trait::async_trait]
impl PromoProvider for StaticPromo {
    async fn current_notification(&self) -> Option<PromoNotification> {
        Some(self.0.clone())
    }
}
