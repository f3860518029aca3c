// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! In-memory collaborators for driving a [`super::ChooserHost`] without an application.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::model::{NodeId, SessionId};
use crate::session::{CloseReason, SelectionSession};

use super::{AlertPlayer, NodeLocator, SurfaceRenderer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Rendered { session: SessionId, label: String },
    TornDown { session: SessionId, reason: Option<CloseReason> },
}

/// Records render and teardown calls.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    events: Arc<Mutex<Vec<SurfaceEvent>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SurfaceEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Close reasons of torn-down surfaces, in order.
    pub fn teardowns(&self) -> Vec<(SessionId, Option<CloseReason>)> {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                SurfaceEvent::TornDown { session, reason } => Some((session, reason)),
                SurfaceEvent::Rendered { .. } => None,
            })
            .collect()
    }

    fn push(&self, event: SurfaceEvent) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }
}

impl SurfaceRenderer for RecordingSurface {
    fn render(&self, session: &SelectionSession) {
        let label = session.progress_label();
        self.push(SurfaceEvent::Rendered { session: session.id(), label });
    }

    fn teardown(&self, session: &SelectionSession) {
        self.push(SurfaceEvent::TornDown { session: session.id(), reason: session.close_reason() });
    }
}

/// Knows a fixed set of chooser nodes.
#[derive(Debug, Clone, Default)]
pub struct StaticNodes {
    nodes: BTreeSet<String>,
}

impl StaticNodes {
    pub fn new<I, S>(nodes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { nodes: nodes.into_iter().map(Into::into).collect() }
    }
}

impl NodeLocator for StaticNodes {
    fn find_chooser_node(&self, candidates: &[&str]) -> Option<NodeId> {
        candidates
            .iter()
            .find(|candidate| self.nodes.contains(**candidate))
            .and_then(|candidate| NodeId::new(*candidate).ok())
    }
}

/// Counts alert plays.
#[derive(Debug, Clone, Default)]
pub struct CountingAlert {
    plays: Arc<AtomicUsize>,
}

impl CountingAlert {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plays(&self) -> usize {
        self.plays.load(Ordering::SeqCst)
    }
}

impl AlertPlayer for CountingAlert {
    fn play(&self) {
        self.plays.fetch_add(1, Ordering::SeqCst);
    }
}
