// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Event-driven chooser host.
//!
//! [`ChooserHost`] turns decoded [`crate::protocol::HostEvent`]s and user input into
//! registry transitions and outbound messages. Everything it needs from the surrounding
//! application is expressed as a capability trait: locating the node that embeds a
//! widget, drawing and tearing down surfaces, reading user settings and playing the
//! open alert.

mod driver;
pub mod testing;

pub use driver::{ChooserHost, Detached};

use crate::model::NodeId;
use crate::session::SelectionSession;

/// Finds the host node that embeds a chooser widget.
pub trait NodeLocator: Send + Sync {
    /// Returns the first candidate id that names a chooser-capable node.
    fn find_chooser_node(&self, candidates: &[&str]) -> Option<NodeId>;
}

/// Draws chooser surfaces.
pub trait SurfaceRenderer: Send + Sync {
    /// Called after every change to a live session.
    fn render(&self, session: &SelectionSession);

    /// Called once when a session closes, for whatever reason.
    fn teardown(&self, session: &SelectionSession);
}

pub trait SettingsStore: Send + Sync {
    fn alert_sound_enabled(&self) -> bool;
    fn hotkeys_enabled(&self) -> bool;
}

pub trait AlertPlayer: Send + Sync {
    fn play(&self);
}
