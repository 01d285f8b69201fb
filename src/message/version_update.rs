//! Content of the "extension updated" popup

use crate::config::{LinksConfig, PROMO_HREF_SUFFIX};
use crate::message::keys;
use crate::message::translator::Translator;
use crate::message::types::VersionUpdatePayload;
use crate::promo::{PromoNotification, PromoText};
use crate::version::{UpdateKind, classify_update, same_release};

/// Builds the version updated popup.
///
/// Returns `None` when there is nothing worth showing: no active promo and the
/// major and minor numbers are unchanged.
pub fn version_updated(
    translator: &dyn Translator,
    links: &LinksConfig,
    current_version: &str,
    previous_version: &str,
    promo: Option<&PromoNotification>,
) -> Option<VersionUpdatePayload> {
    if promo.is_none() && same_release(current_version, previous_version) {
        return None;
    }

    let (offer, offer_desc, offer_button_text, offer_button_href) = match promo {
        Some(PromoNotification {
            url,
            text: PromoText::Offer { title, desc, btn },
        }) => (
            title.clone(),
            desc.clone(),
            btn.clone(),
            format!("{url}{PROMO_HREF_SUFFIX}"),
        ),
        _ => (
            translator.get_message(keys::VERSION_UPDATE_OFFER, &[]),
            String::new(),
            translator.get_message(keys::VERSION_UPDATE_OFFER_BUTTON, &[]),
            links.default_offer.clone(),
        ),
    };

    Some(VersionUpdatePayload {
        title: translator.get_message(
            keys::VERSION_UPDATE_TITLE,
            &[("current_version", current_version)],
        ),
        description: translator.get_message(
            description_key(current_version, previous_version),
            &[],
        ),
        changelog_href: links.changelog.clone(),
        changelog_text: translator.get_message(keys::VERSION_UPDATE_CHANGELOG, &[]),
        show_promo_notification: promo.is_some(),
        offer,
        offer_desc,
        offer_button_text,
        offer_button_href,
        disable_notification_text: translator
            .get_message(keys::VERSION_UPDATE_DISABLE_NOTIFICATION, &[]),
    })
}

/// Message key describing the size of the update
pub fn description_key(current_version: &str, previous_version: &str) -> &'static str {
    match classify_update(current_version, previous_version) {
        UpdateKind::Major => keys::VERSION_UPDATE_DESCRIPTION_MAJOR,
        UpdateKind::Minor => keys::VERSION_UPDATE_DESCRIPTION_MINOR,
    }
}
