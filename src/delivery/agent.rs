//! Delivery of one popup message to the active tab

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::delivery::error::TabsError;
use crate::delivery::retry::{DeliveryAttempt, RetryPolicy};
use crate::delivery::tabs::{TabId, TabsApi};
use crate::message::types::TabMessage;

/// How a delivery ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// The content script of `tab_id` accepted the message
    Delivered { tab_id: TabId, attempts: u32 },
    /// No active tab to show it to. Not retried.
    NoTarget { attempts: u32 },
    /// Every allowed attempt failed
    Exhausted { attempts: u32 },
}

/// Delivers messages to the active tab, retrying failed attempts
#[derive(Clone)]
pub struct DeliveryAgent {
    tabs: Arc<dyn TabsApi>,
    policy: RetryPolicy,
}

impl DeliveryAgent {
    pub fn new(tabs: Arc<dyn TabsApi>, policy: RetryPolicy) -> Self {
        Self { tabs, policy }
    }

    /// Runs [`deliver`](Self::deliver) on a detached task
    ///
    /// Dropping the handle does not cancel the delivery.
    pub fn spawn(&self, message: TabMessage) -> JoinHandle<DeliveryOutcome> {
        let agent = self.clone();
        tokio::spawn(async move { agent.deliver(message).await })
    }

    /// Delivers `message`, retrying until it is accepted, there is no active
    /// tab, or the policy runs out of attempts.
    ///
    /// Attempts run strictly one after another; errors never escape.
    pub async fn deliver(&self, message: TabMessage) -> DeliveryOutcome {
        let message_type = message.popup.message_type();
        let mut attempt = DeliveryAttempt::first(message);

        let attempts = loop {
            if !self.policy.allows(attempt.tries_count) {
                break attempt.tries_count - 1;
            }

            match self.try_deliver(&mut attempt.message).await {
                Ok(Some(tab_id)) => {
                    info!(
                        "Delivered {} to tab {} after {} attempt(s)",
                        message_type, tab_id, attempt.tries_count
                    );
                    return DeliveryOutcome::Delivered {
                        tab_id,
                        attempts: attempt.tries_count,
                    };
                }
                Ok(None) => {
                    debug!("No active tab for {}, dropping it", message_type);
                    return DeliveryOutcome::NoTarget {
                        attempts: attempt.tries_count,
                    };
                }
                Err(e) => {
                    let tries_count = attempt.tries_count;
                    let delay = self.policy.delay_after(tries_count);
                    debug!(
                        "Attempt {} to show {} failed: {}. Retrying in {:?}",
                        tries_count, message_type, e, delay
                    );
                    sleep(delay).await;
                    match attempt.next() {
                        Some(next) => attempt = next,
                        None => break tries_count,
                    }
                }
            }
        };

        warn!(
            "Reached max tries on attempts to show {} ({} tries)",
            message_type, self.policy.max_tries
        );
        DeliveryOutcome::Exhausted { attempts }
    }

    /// One attempt. `Ok(None)` means there was no tab to send to.
    async fn try_deliver(&self, message: &mut TabMessage) -> Result<Option<TabId>, TabsError> {
        let Some(tab) = self.tabs.get_active().await? else {
            return Ok(None);
        };
        let Some(tab_id) = tab.id else {
            return Ok(None);
        };

        message.is_adguard_tab = self.tabs.is_extension_tab(&tab);
        self.tabs.send_message(tab_id, message).await?;

        Ok(Some(tab_id))
    }
}
