// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Test doubles for the messaging boundary.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::Semaphore;

use super::transport::{Transport, TransportError};
use super::wire::{Payload, WireMessage};

/// Records every message handed to it.
///
/// Selection sends can be held back with [`RecordingTransport::hold_selections`] to
/// observe what happens while a send is in flight; cancel and start notices always go
/// through immediately.
#[derive(Debug, Clone, Default)]
pub struct RecordingTransport {
    inner: Arc<RecordingInner>,
}

#[derive(Debug)]
struct RecordingInner {
    sent: Mutex<Vec<WireMessage>>,
    holding: AtomicBool,
    failing: AtomicBool,
    gate: Semaphore,
}

impl Default for RecordingInner {
    fn default() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            holding: AtomicBool::new(false),
            failing: AtomicBool::new(false),
            gate: Semaphore::new(0),
        }
    }
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<WireMessage> {
        self.inner.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Encoded `message` fields in send order.
    pub fn messages(&self) -> Vec<String> {
        self.sent().iter().map(WireMessage::message).collect()
    }

    pub fn hold_selections(&self) {
        self.inner.holding.store(true, Ordering::SeqCst);
    }

    /// Lets one held selection send complete.
    pub fn release_one(&self) {
        self.inner.gate.add_permits(1);
    }

    /// Every subsequent send fails after being recorded.
    pub fn fail_sends(&self) {
        self.inner.failing.store(true, Ordering::SeqCst);
    }
}

impl Transport for RecordingTransport {
    async fn send(&self, message: &WireMessage) -> Result<(), TransportError> {
        self.inner.sent.lock().unwrap_or_else(PoisonError::into_inner).push(message.clone());

        let is_selection = matches!(message.payload(), Payload::Selection(_));
        if is_selection && self.inner.holding.load(Ordering::SeqCst) {
            let permit = self
                .inner
                .gate
                .acquire()
                .await
                .map_err(|err| TransportError::Unavailable(err.to_string()))?;
            permit.forget();
        }

        if self.inner.failing.load(Ordering::SeqCst) {
            return Err(TransportError::Unavailable("backend unreachable".to_owned()));
        }
        Ok(())
    }
}
