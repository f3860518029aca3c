// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;

use tracing::debug;

use crate::config::LayoutConfig;
use crate::error::ChooserError;
use crate::layout::{solve_layout, AspectRatioTracker, ContainerSize, LayoutGeometry, LayoutRequest};
use crate::model::{ChooserKind, ChooserSpec, NodeId, SessionId};
use crate::protocol::{Selection, WireMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    /// Accepting selection input.
    Open,
    /// A terminal send is in flight; input is ignored.
    Sending,
    /// Terminal. The session only remains readable.
    Closed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CloseReason {
    Sent,
    Cancelled,
    Replaced,
    PipelineStart,
    PipelineError,
    PipelineSuccess,
    PipelineInterrupted,
    AppUnload,
    NodeRemoved,
}

impl CloseReason {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sent => "sent",
            Self::Cancelled => "cancelled",
            Self::Replaced => "replaced",
            Self::PipelineStart => "pipeline_start",
            Self::PipelineError => "pipeline_error",
            Self::PipelineSuccess => "pipeline_success",
            Self::PipelineInterrupted => "pipeline_interrupted",
            Self::AppUnload => "app_unload",
            Self::NodeRemoved => "node_removed",
        }
    }
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identifies one progress send so a completion can be matched to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SendTicket(u64);

/// A selection ready to go out. The send is performed by the caller, which reports back
/// through [`SelectionSession::finish_send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    session: SessionId,
    ticket: SendTicket,
    message: WireMessage,
}

impl Submission {
    pub fn session(&self) -> SessionId {
        self.session
    }

    pub fn ticket(&self) -> SendTicket {
        self.ticket
    }

    pub fn message(&self) -> &WireMessage {
        &self.message
    }
}

/// Selection state of one chooser invocation.
///
/// The session never performs I/O itself. Terminal actions hand back the message to send
/// and the session moves `Open -> Sending -> Closed`; `cancel` and `close` jump straight to
/// `Closed` from either live state, and a send that completes afterwards is ignored.
#[derive(Debug, Clone)]
pub struct SelectionSession {
    id: SessionId,
    spec: ChooserSpec,
    node: Option<NodeId>,
    positive: BTreeSet<usize>,
    negative: BTreeSet<usize>,
    state: SessionState,
    close_reason: Option<CloseReason>,
    in_flight: Option<SendTicket>,
    next_ticket: u64,
    aspect: AspectRatioTracker,
    area: Option<(ContainerSize, bool)>,
    geometry: Option<LayoutGeometry>,
}

impl SelectionSession {
    pub fn new(id: SessionId, spec: ChooserSpec, config: &LayoutConfig) -> Self {
        let aspect =
            AspectRatioTracker::from_images(spec.images(), config.aspect_refresh_threshold);
        Self {
            id,
            spec,
            node: None,
            positive: BTreeSet::new(),
            negative: BTreeSet::new(),
            state: SessionState::Open,
            close_reason: None,
            in_flight: None,
            next_ticket: 0,
            aspect,
            area: None,
            geometry: None,
        }
    }

    pub fn with_node(mut self, node: NodeId) -> Self {
        self.node = Some(node);
        self
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn spec(&self) -> &ChooserSpec {
        &self.spec
    }

    pub fn node(&self) -> Option<&NodeId> {
        self.node.as_ref()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn close_reason(&self) -> Option<CloseReason> {
        self.close_reason
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == SessionState::Closed
    }

    pub fn positive(&self) -> &BTreeSet<usize> {
        &self.positive
    }

    pub fn negative(&self) -> &BTreeSet<usize> {
        &self.negative
    }

    pub fn selection(&self) -> Selection {
        Selection::new(self.spec.kind(), self.positive.clone(), self.negative.clone())
    }

    /// Primary activation of a tile.
    ///
    /// Returns a submission when progress-first-pick turns this pick into the final one.
    pub fn toggle_positive(&mut self, index: usize) -> Option<Submission> {
        if !self.accepts(index) {
            return None;
        }
        if self.spec.kind() == ChooserKind::Double {
            self.negative.remove(&index);
        }
        if !self.positive.remove(&index) {
            self.positive.insert(index);
        }

        if self.spec.progress_first_pick() && !self.positive.is_empty() {
            debug!(session = %self.id, index, "progress on first pick");
            return Some(self.begin_send());
        }
        None
    }

    /// Secondary activation. Only double-mode choosers keep a negative set.
    pub fn toggle_negative(&mut self, index: usize) {
        if self.spec.kind() != ChooserKind::Double || !self.accepts(index) {
            return;
        }
        self.positive.remove(&index);
        if !self.negative.remove(&index) {
            self.negative.insert(index);
        }
    }

    /// Whether the progress action is currently available.
    pub fn can_progress(&self) -> bool {
        self.is_open() && (self.spec.kind() == ChooserKind::Double || !self.positive.is_empty())
    }

    pub fn progress_label(&self) -> String {
        match self.spec.kind() {
            ChooserKind::Single => format!("Progress ({})", self.positive.len()),
            ChooserKind::Double => {
                format!("Progress ({} + {})", self.positive.len(), self.negative.len())
            }
        }
    }

    /// Starts the terminal send of the current selection.
    ///
    /// Calls made while a send is already in flight, or after the session closed, are
    /// no-ops and return `Ok(None)`.
    pub fn progress(&mut self) -> Result<Option<Submission>, ChooserError> {
        if !self.is_open() {
            return Ok(None);
        }
        if self.spec.kind() == ChooserKind::Single && self.positive.is_empty() {
            return Err(ChooserError::InvalidSelection {
                unique_id: self.spec.unique_id().to_owned(),
            });
        }
        Ok(Some(self.begin_send()))
    }

    /// Reports completion (success or failure) of a progress send. Only the ticket that is
    /// currently in flight closes the session; returns whether it did.
    pub fn finish_send(&mut self, ticket: SendTicket) -> bool {
        if self.state != SessionState::Sending || self.in_flight != Some(ticket) {
            debug!(session = %self.id, "ignoring stale send completion");
            return false;
        }
        self.in_flight = None;
        self.close(CloseReason::Sent)
    }

    /// Abandons the chooser. Overrides an in-flight progress send.
    ///
    /// Returns the cancel notice to send, or `None` when the session was already closed.
    pub fn cancel(&mut self) -> Option<WireMessage> {
        if !self.close(CloseReason::Cancelled) {
            return None;
        }
        Some(WireMessage::cancel())
    }

    /// Closes without notifying the backend. Idempotent; returns whether this call closed
    /// the session.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if self.is_closed() {
            return false;
        }
        self.state = SessionState::Closed;
        self.close_reason = Some(reason);
        self.in_flight = None;
        debug!(session = %self.id, unique_id = self.spec.unique_id(), %reason, "session closed");
        true
    }

    /// Solves the grid for `area` with the session's image count and current aspect
    /// ratio, and caches the result.
    pub fn layout(
        &mut self,
        area: ContainerSize,
        user_resized: bool,
        config: &LayoutConfig,
    ) -> LayoutGeometry {
        let count = self.spec.image_count();
        let request = LayoutRequest::new(area.width, area.height, count, self.aspect.ratio())
            .with_user_resized(user_resized);
        let geometry = solve_layout(&request, config);
        self.area = Some((area, user_resized));
        self.geometry = Some(geometry);
        geometry
    }

    /// Re-solves for the last laid-out area, e.g. after the aspect ratio changed.
    /// `None` until [`SelectionSession::layout`] has been called once.
    pub fn relayout(&mut self, config: &LayoutConfig) -> Option<LayoutGeometry> {
        let (area, user_resized) = self.area?;
        Some(self.layout(area, user_resized, config))
    }

    pub fn geometry(&self) -> Option<&LayoutGeometry> {
        self.geometry.as_ref()
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect.ratio()
    }

    /// Feeds a measured image size. Returns `true` when the grid should be laid out again.
    pub fn observe_image(&mut self, width: u32, height: u32) -> bool {
        if self.is_closed() {
            return false;
        }
        self.aspect.observe(width, height)
    }

    fn accepts(&self, index: usize) -> bool {
        self.is_open() && index < self.spec.image_count()
    }

    fn begin_send(&mut self) -> Submission {
        let ticket = SendTicket(self.next_ticket);
        self.next_ticket += 1;
        self.in_flight = Some(ticket);
        self.state = SessionState::Sending;
        let message = WireMessage::selection(self.spec.unique_id(), self.selection());
        Submission { session: self.id, ticket, message }
    }
}
