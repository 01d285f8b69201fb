//! Entry point used by the rest of the extension to show popups

use std::sync::{Arc, OnceLock};

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::assets::{AssetError, AssetFetcher};
use crate::config::ToastsConfig;
use crate::delivery::agent::{DeliveryAgent, DeliveryOutcome};
use crate::delivery::tabs::TabsApi;
use crate::message::filters::{filters_enabled, filters_updated};
use crate::message::translator::Translator;
use crate::message::types::{FilterMetadata, Popup, TabMessage};
use crate::message::version_update::version_updated;
use crate::promo::PromoProvider;

/// Composes alert popups and hands them to the delivery agent.
///
/// Build one per process and share it behind an `Arc`. Call [`init`](Self::init)
/// once before showing anything, otherwise popups go out without styles.
/// Every `show_*` method returns right after spawning the delivery; the
/// returned handle can be awaited for the outcome or dropped.
pub struct Toasts {
    config: ToastsConfig,
    translator: Arc<dyn Translator>,
    promos: Arc<dyn PromoProvider>,
    assets: Arc<dyn AssetFetcher>,
    agent: DeliveryAgent,
    styles: OnceLock<String>,
}

impl Toasts {
    pub fn new(
        config: ToastsConfig,
        tabs: Arc<dyn TabsApi>,
        translator: Arc<dyn Translator>,
        promos: Arc<dyn PromoProvider>,
        assets: Arc<dyn AssetFetcher>,
    ) -> Self {
        let agent = DeliveryAgent::new(tabs, config.delivery.retry_policy());
        Self {
            config,
            translator,
            promos,
            assets,
            agent,
            styles: OnceLock::new(),
        }
    }

    /// Loads the alert style sheet
    pub async fn init(&self) -> Result<(), AssetError> {
        let styles = self.assets.fetch_text(&self.config.styles_url).await?;
        debug!(
            "Loaded {} bytes of alert styles from {}",
            styles.len(),
            self.config.styles_url
        );
        if self.styles.set(styles).is_err() {
            warn!("Alert styles were already loaded, keeping the first copy");
        }
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.styles.get().is_some()
    }

    /// Shows the list of filters that were just enabled
    pub fn show_filters_enabled_alert(
        &self,
        filters: &[FilterMetadata],
    ) -> JoinHandle<DeliveryOutcome> {
        let payload = filters_enabled(self.translator.as_ref(), filters);
        self.dispatch(Popup::ShowAlertPopup(payload))
    }

    /// Shows the result of a filter update check
    pub fn show_filters_updated_alert(
        &self,
        success: bool,
        filters: Option<&[FilterMetadata]>,
    ) -> JoinHandle<DeliveryOutcome> {
        let payload = filters_updated(
            self.translator.as_ref(),
            success,
            filters,
            self.config.updated_filters_order,
        );
        self.dispatch(Popup::ShowAlertPopup(payload))
    }

    /// Shows the "extension updated" popup.
    ///
    /// Returns `None` without delivering anything when no promo is active and
    /// the update did not change the major or minor number.
    pub async fn show_application_updated_popup(
        &self,
        current_version: &str,
        previous_version: &str,
    ) -> Option<JoinHandle<DeliveryOutcome>> {
        let promo = self.promos.current_notification().await;

        let Some(payload) = version_updated(
            self.translator.as_ref(),
            &self.config.links,
            current_version,
            previous_version,
            promo.as_ref(),
        ) else {
            debug!(
                "Skipping update popup for {} -> {}: same release, no promo",
                previous_version, current_version
            );
            return None;
        };

        Some(self.dispatch(Popup::ShowVersionUpdatedPopup(payload)))
    }

    fn dispatch(&self, popup: Popup) -> JoinHandle<DeliveryOutcome> {
        let styles = self.styles.get().cloned().unwrap_or_default();
        self.agent.spawn(TabMessage::new(popup, styles))
    }
}
