//! Alert composition
//!
//! Pure builders that turn domain data into popup text. Nothing here talks to
//! tabs or timers; the same inputs always produce the same payload.
//!
//! # Modules
//!
//! - [`filters`]: "filters enabled" and "filters updated" alerts
//! - [`version_update`]: "extension updated" popup
//! - [`translator`]: text lookup trait and the `messages.json` catalog
//! - [`keys`]: message keys
//! - [`types`]: payloads and the outbound tab message

pub mod filters;
pub mod keys;
pub mod translator;
pub mod types;
mod timsort;
pub mod version_update;

pub use filters::{FilterOrder, filters_enabled, filters_updated};
pub use translator::{MessageCatalog, Translator};
pub use types::{AlertPayload, AlertText, FilterMetadata, Popup, TabMessage, VersionUpdatePayload};
pub use version_update::version_updated;
