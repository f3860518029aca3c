// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Backend side of the chooser protocol.
//!
//! Pipeline nodes block in [`MessageBroker::wait_for_message`] until the chooser posts a
//! selection for them, or until a cancel aborts every pending wait. The HTTP endpoint in
//! [`server`] feeds posted messages into the broker.

pub mod server;

use std::collections::HashMap;
use std::num::ParseIntError;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::sync::Notify;
use tracing::{debug, info, warn};

use crate::protocol::{CANCEL_SENTINEL, START_SENTINEL};

pub use server::{router, serve};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BrokerError {
    #[error("chooser was cancelled")]
    Cancelled,
}

#[derive(Debug, Default)]
struct BrokerState {
    messages: HashMap<String, String>,
    aliases: HashMap<String, String>,
    last_selection: HashMap<String, Vec<i64>>,
    cancel_pending: bool,
    cancel_epoch: u64,
}

impl BrokerState {
    fn resolve(&self, id: &str) -> String {
        self.aliases.get(id).cloned().unwrap_or_else(|| id.to_owned())
    }

    fn reset_run(&mut self) {
        self.messages.clear();
        self.aliases.clear();
        self.cancel_pending = false;
    }
}

/// Hands posted chooser messages to the pipeline nodes waiting for them.
///
/// A cancel wakes every current waiter with [`BrokerError::Cancelled`] and stays pending
/// for the next wait until a start notice begins a new run. Last selections survive runs.
#[derive(Debug, Default)]
pub struct MessageBroker {
    state: Mutex<BrokerState>,
    notify: Notify,
}

impl MessageBroker {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, BrokerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Accepts one posted `(id, message)` pair.
    pub fn add_message(&self, id: &str, message: &str) {
        let id = id.trim();
        match message.trim() {
            START_SENTINEL => {
                self.lock().reset_run();
                info!("pipeline run started; chooser messages reset");
            }
            CANCEL_SENTINEL => {
                let mut state = self.lock();
                state.cancel_pending = true;
                state.cancel_epoch += 1;
                drop(state);
                info!("chooser cancelled");
                self.notify.notify_waiters();
            }
            _ => {
                let mut state = self.lock();
                let key = state.resolve(id);
                debug!(id, key = %key, message, "chooser message stored");
                state.messages.insert(key, message.to_owned());
                drop(state);
                self.notify.notify_waiters();
            }
        }
    }

    /// Makes messages posted under the display id, or under any segment of a nested unique
    /// id, reach the waiter for `unique_id`. A message already stored under an alias moves
    /// over unless one exists for the unique id.
    pub fn bind_display_id(&self, display_id: &str, unique_id: &str) {
        let mut tokens = vec![unique_id];
        if unique_id.contains(':') {
            tokens.extend(unique_id.split(':').filter(|segment| !segment.is_empty()));
        }
        tokens.push(display_id);

        let mut state = self.lock();
        for token in tokens {
            state.aliases.insert(token.to_owned(), unique_id.to_owned());
            if token != unique_id && !state.messages.contains_key(unique_id) {
                if let Some(message) = state.messages.remove(token) {
                    state.messages.insert(unique_id.to_owned(), message);
                }
            }
        }
        drop(state);
        self.notify.notify_waiters();
    }

    /// Waits for the selection posted for `unique_id`.
    ///
    /// A malformed selection is logged and yields an empty list.
    pub async fn wait_for_message(&self, unique_id: &str) -> Result<Vec<i64>, BrokerError> {
        let epoch = {
            let mut state = self.lock();
            if state.cancel_pending {
                state.cancel_pending = false;
                return Err(BrokerError::Cancelled);
            }
            state.cancel_epoch
        };

        loop {
            let notified = self.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            {
                let mut state = self.lock();
                if state.cancel_epoch != epoch {
                    return Err(BrokerError::Cancelled);
                }
                let key = state.resolve(unique_id);
                if let Some(message) = state.messages.remove(&key) {
                    drop(state);
                    return Ok(parse_selection(&message));
                }
            }

            notified.await;
        }
    }

    pub fn set_last_selection(&self, unique_id: &str, selection: Vec<i64>) {
        self.lock().last_selection.insert(unique_id.to_owned(), selection);
    }

    pub fn last_selection(&self, unique_id: &str) -> Option<Vec<i64>> {
        self.lock().last_selection.get(unique_id).cloned()
    }

    pub fn clear_last_selection(&self, unique_id: &str) {
        self.lock().last_selection.remove(unique_id);
    }
}

fn parse_selection(message: &str) -> Vec<i64> {
    let parsed: Result<Vec<i64>, ParseIntError> = message
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::parse)
        .collect();
    parsed.unwrap_or_else(|err| {
        warn!(message, error = %err, "failed to parse chooser selection");
        Vec::new()
    })
}
