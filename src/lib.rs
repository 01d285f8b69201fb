//! Alert popups for the extension background context
//!
//! Composes filter and version update alerts and delivers them to the active
//! browser tab, retrying while the tab's content script is not reachable.
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Toasts    │────▶│   message   │     │   version   │
//! │  (facade)   │     │  (compose)  │────▶│ (maj./min.) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │
//!        ▼
//! ┌─────────────┐     ┌─────────────┐
//! │  delivery   │────▶│   TabsApi   │
//! │(retry loop) │     │ (browser)   │
//! └─────────────┘     └─────────────┘
//! ```

pub mod assets;
pub mod config;
pub mod delivery;
pub mod logging;
pub mod message;
pub mod preview;
pub mod promo;
pub mod toasts;
pub mod version;

pub use toasts::Toasts;
