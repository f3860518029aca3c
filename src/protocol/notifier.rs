// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use tracing::debug;

use super::wire::WireMessage;

/// Decides whether an observed pipeline start is announced to the backend.
///
/// A submitted selection re-queues the pipeline as a side effect. That start must not be
/// reported as a user-initiated run, so each self-initiated re-queue records one skip and
/// the next observed start consumes it. A counter rather than a flag: several re-queues
/// can be pending before their starts arrive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartNotifier {
    pending_skips: u32,
}

impl StartNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_skips(&self) -> u32 {
        self.pending_skips
    }

    pub fn note_requeue(&mut self) {
        self.pending_skips = self.pending_skips.saturating_add(1);
    }

    /// Returns the `__start__` notice to send, or `None` when this start was self-initiated.
    pub fn on_pipeline_start(&mut self) -> Option<WireMessage> {
        if self.pending_skips > 0 {
            self.pending_skips -= 1;
            debug!(remaining = self.pending_skips, "suppressed start notice for self-queued run");
            return None;
        }
        Some(WireMessage::start())
    }
}
