//! Message keys looked up through the translator

pub const FILTER_ENABLED_TITLE: &str = "alert_popup_filter_enabled_title";
/// Placeholder: `filter_name`
pub const FILTER_ENABLED_DESC: &str = "alert_popup_filter_enabled_desc";

pub const UPDATE_TITLE_ERROR: &str = "options_popup_update_title_error";
pub const UPDATE_ERROR: &str = "options_popup_update_error";
pub const UPDATE_NOT_FOUND: &str = "options_popup_update_not_found";
pub const UPDATE_FILTER: &str = "options_popup_update_filter";
pub const UPDATE_FILTERS: &str = "options_popup_update_filters";

/// Placeholder: `current_version`
pub const VERSION_UPDATE_TITLE: &str = "options_popup_version_update_title_text";
pub const VERSION_UPDATE_DESCRIPTION_MAJOR: &str = "options_popup_version_update_description_major";
pub const VERSION_UPDATE_DESCRIPTION_MINOR: &str = "options_popup_version_update_description_minor";
pub const VERSION_UPDATE_CHANGELOG: &str = "options_popup_version_update_changelog_text";
pub const VERSION_UPDATE_OFFER: &str = "options_popup_version_update_offer";
pub const VERSION_UPDATE_OFFER_BUTTON: &str = "options_popup_version_update_offer_button_text";
pub const VERSION_UPDATE_DISABLE_NOTIFICATION: &str =
    "options_popup_version_update_disable_notification";
