//! Facade construction helpers

use std::sync::Arc;

use async_trait::async_trait;

use toast_relay::Toasts;
use toast_relay::assets::{AssetError, AssetFetcher};
use toast_relay::config::ToastsConfig;
use toast_relay::delivery::TabsApi;
use toast_relay::message::{FilterMetadata, MessageCatalog};
use toast_relay::promo::PromoProvider;

pub const TEST_STYLES: &str = ".adguard-alert { z-index: 2147483647; }";

/// Serves the same style sheet for any path
pub struct FixedAssets;

#[async_trait]
impl AssetFetcher for FixedAssets {
    async fn fetch_text(&self, _path: &str) -> Result<String, AssetError> {
        Ok(TEST_STYLES.to_string())
    }
}

/// English texts for every key the popups use
pub fn create_test_catalog() -> MessageCatalog {
    MessageCatalog::from_json(
        r#"{
            "alert_popup_filter_enabled_title": { "message": "Filters enabled" },
            "alert_popup_filter_enabled_desc": { "message": "Filter \"%filter_name%\" has been enabled" },
            "options_popup_update_title_error": { "message": "Filters update error" },
            "options_popup_update_error": { "message": "Error while updating filters" },
            "options_popup_update_not_found": { "message": "No updates found" },
            "options_popup_update_filter": { "message": "filter has been updated" },
            "options_popup_update_filters": { "message": "filters have been updated" },
            "options_popup_version_update_title_text": { "message": "Updated to %current_version%" },
            "options_popup_version_update_description_major": { "message": "Major update" },
            "options_popup_version_update_description_minor": { "message": "Minor update" },
            "options_popup_version_update_changelog_text": { "message": "Changelog" },
            "options_popup_version_update_offer": { "message": "Try the app" },
            "options_popup_version_update_offer_button_text": { "message": "Learn more" },
            "options_popup_version_update_disable_notification": { "message": "Don't show again" }
        }"#,
    )
    .unwrap()
}

pub fn create_test_toasts(
    config: ToastsConfig,
    tabs: Arc<dyn TabsApi>,
    promos: Arc<dyn PromoProvider>,
) -> Toasts {
    Toasts::new(
        config,
        tabs,
        Arc::new(create_test_catalog()),
        promos,
        Arc::new(FixedAssets),
    )
}

pub fn filter(display_number: u32, group_id: u32, name: &str) -> FilterMetadata {
    FilterMetadata {
        filter_id: 1000 + display_number,
        display_number,
        group_id,
        name: name.to_string(),
    }
}
