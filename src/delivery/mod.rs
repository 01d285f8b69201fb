//! Delivery of popup messages to the active browser tab
//!
//! ```text
//! ┌─────────────┐  resolve tab  ┌─────────────┐
//! │DeliveryAgent│──────────────▶│   TabsApi   │
//! │  (attempt)  │◀──────────────│(get/send)   │
//! └─────────────┘   ok / error  └─────────────┘
//!        │ error
//!        ▼
//! ┌─────────────┐
//! │ RetryPolicy │  sleep, then attempt N+1 until max tries
//! └─────────────┘
//! ```
//!
//! - [`agent`]: attempt loop and outcome reporting
//! - [`retry`]: retry count and spacing
//! - [`tabs`]: tab access trait
//! - [`error`]: tab errors

pub mod agent;
pub mod error;
pub mod retry;
pub mod tabs;

pub use agent::{DeliveryAgent, DeliveryOutcome};
pub use error::TabsError;
pub use retry::{Backoff, DeliveryAttempt, RetryPolicy};
pub use tabs::{Tab, TabId, TabsApi};
