//! Scripted browser tabs

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::time::Instant;

use toast_relay::delivery::{Tab, TabId, TabsApi, TabsError};
use toast_relay::message::TabMessage;

/// What one delivery attempt runs into
#[derive(Debug, Clone)]
pub enum TabStep {
    /// Active tab exists and accepts the message
    Accept(TabId),
    /// Active tab exists but nothing listens yet
    NoReceiver(TabId),
    /// Tab query itself fails
    QueryError,
    /// No tab is focused
    NoTab,
}

/// Tabs double that replays a fixed script, one step per attempt
///
/// Once the script runs out the last step repeats.
pub struct ScriptedTabs {
    steps: Mutex<VecDeque<TabStep>>,
    last: Mutex<TabStep>,
    attempts: Mutex<Vec<Instant>>,
    received: Mutex<Vec<(TabId, TabMessage)>>,
    extension_tab: bool,
}

impl ScriptedTabs {
    pub fn new(steps: Vec<TabStep>) -> Self {
        let last = steps.last().cloned().unwrap_or(TabStep::NoTab);
        Self {
            steps: Mutex::new(steps.into()),
            last: Mutex::new(last),
            attempts: Mutex::new(Vec::new()),
            received: Mutex::new(Vec::new()),
            extension_tab: false,
        }
    }

    /// Fails `failures` times with no receiver, then accepts
    pub fn failing_then_accepting(failures: usize, tab_id: TabId) -> Self {
        let mut steps = vec![TabStep::NoReceiver(tab_id); failures];
        steps.push(TabStep::Accept(tab_id));
        Self::new(steps)
    }

    pub fn always_failing(tab_id: TabId) -> Self {
        Self::new(vec![TabStep::NoReceiver(tab_id)])
    }

    pub fn as_extension_tab(mut self) -> Self {
        self.extension_tab = true;
        self
    }

    /// Start time of every attempt, in order
    pub fn attempts(&self) -> Vec<Instant> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn received(&self) -> Vec<(TabId, TabMessage)> {
        self.received.lock().unwrap().clone()
    }

    fn next_step(&self) -> TabStep {
        let mut steps = self.steps.lock().unwrap();
        match steps.pop_front() {
            Some(step) => {
                *self.last.lock().unwrap() = step.clone();
                step
            }
            None => self.last.lock().unwrap().clone(),
        }
    }

    fn current_step(&self) -> TabStep {
        self.last.lock().unwrap().clone()
    }
}

#[async_trait]
impl TabsApi for ScriptedTabs {
    async fn get_active(&self) -> Result<Option<Tab>, TabsError> {
        self.attempts.lock().unwrap().push(Instant::now());
        match self.next_step() {
            TabStep::Accept(id) | TabStep::NoReceiver(id) => Ok(Some(Tab {
                id: Some(id),
                url: Some("https://example.org/".to_string()),
            })),
            TabStep::QueryError => Err(TabsError::Query("no focused window".to_string())),
            TabStep::NoTab => Ok(None),
        }
    }

    fn is_extension_tab(&self, _tab: &Tab) -> bool {
        self.extension_tab
    }

    async fn send_message(&self, tab_id: TabId, message: &TabMessage) -> Result<(), TabsError> {
        match self.current_step() {
            TabStep::Accept(_) => {
                self.received
                    .lock()
                    .unwrap()
                    .push((tab_id, message.clone()));
                Ok(())
            }
            _ => Err(TabsError::NoReceiver),
        }
    }
}
