// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::config::LayoutConfig;
use crate::error::ChooserError;
use crate::host::SettingsStore;
use crate::model::{ChooserSpec, NodeId, SessionId};
use crate::protocol::WireMessage;

use super::keys::{Key, KeyAction};
use super::selection::{CloseReason, SelectionSession, SendTicket, Submission};

/// Result of opening a chooser.
#[derive(Debug)]
pub struct Opened {
    pub session: SessionId,
    /// The session this one displaced, already closed with [`CloseReason::Replaced`].
    pub replaced: Option<SelectionSession>,
}

/// A session closed by the user, plus the notice owed to the backend.
#[derive(Debug)]
pub struct Cancellation {
    pub session: SelectionSession,
    pub notice: WireMessage,
}

/// Live chooser sessions and keyboard focus.
///
/// Only live sessions are stored: closing a session removes it and hands it back to the
/// caller. At most one overlay session exists; widget sessions are keyed by host node. The
/// focused id, when set, always names a stored session.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    config: LayoutConfig,
    sessions: BTreeMap<SessionId, SelectionSession>,
    overlay: Option<SessionId>,
    widgets: BTreeMap<NodeId, SessionId>,
    focused: Option<SessionId>,
    next_id: u64,
}

impl SessionRegistry {
    pub fn new(config: LayoutConfig) -> Self {
        Self { config, ..Self::default() }
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.config
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn get(&self, id: SessionId) -> Option<&SelectionSession> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut SelectionSession> {
        self.sessions.get_mut(&id)
    }

    pub fn sessions(&self) -> impl Iterator<Item = &SelectionSession> {
        self.sessions.values()
    }

    pub fn overlay(&self) -> Option<&SelectionSession> {
        self.overlay.and_then(|id| self.sessions.get(&id))
    }

    pub fn widget(&self, node: &NodeId) -> Option<&SelectionSession> {
        self.widgets.get(node).and_then(|id| self.sessions.get(id))
    }

    pub fn focused_id(&self) -> Option<SessionId> {
        self.focused
    }

    pub fn focused(&self) -> Option<&SelectionSession> {
        self.focused.and_then(|id| self.sessions.get(&id))
    }

    pub fn focused_mut(&mut self) -> Option<&mut SelectionSession> {
        self.focused.and_then(|id| self.sessions.get_mut(&id))
    }

    /// Moves keyboard focus to a live session. Returns `false` for unknown ids.
    pub fn focus(&mut self, id: SessionId) -> bool {
        if !self.sessions.contains_key(&id) {
            return false;
        }
        self.focused = Some(id);
        true
    }

    /// Opens an overlay chooser, replacing any overlay still open.
    pub fn open_overlay(&mut self, spec: ChooserSpec) -> Opened {
        let replaced = self.overlay.and_then(|prior| self.close(prior, CloseReason::Replaced));
        let id = self.insert(spec, None);
        self.overlay = Some(id);
        Opened { session: id, replaced }
    }

    /// Opens a widget chooser on `node`, replacing only that node's session.
    pub fn open_widget(&mut self, node: NodeId, spec: ChooserSpec) -> Opened {
        let replaced = self
            .widgets
            .get(&node)
            .copied()
            .and_then(|prior| self.close(prior, CloseReason::Replaced));
        let id = self.insert(spec, Some(node.clone()));
        self.widgets.insert(node, id);
        Opened { session: id, replaced }
    }

    /// Closes and removes a session. Idempotent: unknown or already-closed ids yield `None`.
    pub fn close(&mut self, id: SessionId, reason: CloseReason) -> Option<SelectionSession> {
        let mut session = self.sessions.remove(&id)?;
        session.close(reason);
        self.detach(&session);
        Some(session)
    }

    /// Closes every session. Used when the pipeline run they belong to ends.
    pub fn close_all(&mut self, reason: CloseReason) -> Vec<SelectionSession> {
        let ids: Vec<SessionId> = self.sessions.keys().copied().collect();
        let closed: Vec<SelectionSession> =
            ids.into_iter().filter_map(|id| self.close(id, reason)).collect();
        if !closed.is_empty() {
            info!(count = closed.len(), %reason, "closed all chooser sessions");
        }
        closed
    }

    /// Drops the session of a host node that went away.
    pub fn remove_node(&mut self, node: &NodeId) -> Option<SelectionSession> {
        let id = self.widgets.get(node).copied()?;
        self.close(id, CloseReason::NodeRemoved)
    }

    pub fn toggle_positive(&mut self, id: SessionId, index: usize) -> Option<Submission> {
        self.sessions.get_mut(&id)?.toggle_positive(index)
    }

    pub fn toggle_negative(&mut self, id: SessionId, index: usize) {
        if let Some(session) = self.sessions.get_mut(&id) {
            session.toggle_negative(index);
        }
    }

    pub fn progress(&mut self, id: SessionId) -> Result<Option<Submission>, ChooserError> {
        self.sessions.get_mut(&id).ok_or(ChooserError::UnknownSession(id))?.progress()
    }

    /// Records completion of a progress send. Returns the closed session when the ticket
    /// was still current; a session cancelled in the meantime is already gone.
    pub fn finish_send(&mut self, id: SessionId, ticket: SendTicket) -> Option<SelectionSession> {
        let session = self.sessions.get_mut(&id)?;
        if !session.finish_send(ticket) {
            return None;
        }
        let session = self.sessions.remove(&id)?;
        self.detach(&session);
        Some(session)
    }

    /// Cancels a live session, including one whose progress send is still in flight.
    pub fn cancel(&mut self, id: SessionId) -> Option<Cancellation> {
        let notice = self.sessions.get_mut(&id)?.cancel()?;
        let session = self.sessions.remove(&id)?;
        self.detach(&session);
        Some(Cancellation { session, notice })
    }

    /// Resolves a key press against the focused session.
    pub fn route_key(&self, key: Key, settings: &dyn SettingsStore) -> KeyAction {
        if !settings.hotkeys_enabled() {
            return KeyAction::Ignored;
        }
        let Some(session) = self.focused() else {
            return KeyAction::Ignored;
        };
        if !session.is_open() {
            return KeyAction::Ignored;
        }
        let id = session.id();
        match key {
            Key::Digit(0) if !session.positive().is_empty() => KeyAction::Progress(id),
            Key::Digit(0) | Key::Escape => KeyAction::Cancel(id),
            Key::Digit(digit @ 1..=9) => {
                let index = usize::from(digit - 1);
                if index < session.spec().image_count() {
                    KeyAction::Toggle { session: id, index }
                } else {
                    KeyAction::Ignored
                }
            }
            Key::Digit(_) | Key::Other => KeyAction::Ignored,
        }
    }

    fn insert(&mut self, spec: ChooserSpec, node: Option<NodeId>) -> SessionId {
        self.next_id += 1;
        let id = SessionId::new(self.next_id);
        let mut session = SelectionSession::new(id, spec, &self.config);
        if let Some(node) = node {
            session = session.with_node(node);
        }
        debug!(
            session = %id,
            unique_id = session.spec().unique_id(),
            images = session.spec().image_count(),
            "session opened"
        );
        self.sessions.insert(id, session);
        self.focused = Some(id);
        id
    }

    fn detach(&mut self, session: &SelectionSession) {
        let id = session.id();
        if self.overlay == Some(id) {
            self.overlay = None;
        }
        if let Some(node) = session.node() {
            if self.widgets.get(node) == Some(&id) {
                self.widgets.remove(node);
            }
        }
        if self.focused == Some(id) {
            self.focused = None;
        }
    }
}
