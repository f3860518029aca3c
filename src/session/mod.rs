// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Chooser sessions.
//!
//! A [`SelectionSession`] holds the picks of one chooser invocation and its lifecycle.
//! The [`SessionRegistry`] owns every live session, enforces one overlay at a time (widgets
//! are one per host node), and routes keyboard input to the focused session.

pub mod keys;
pub mod registry;
pub mod selection;

pub use keys::{Key, KeyAction};
pub use registry::{Cancellation, Opened, SessionRegistry};
pub use selection::{CloseReason, SelectionSession, SendTicket, SessionState, Submission};

#[cfg(test)]
mod tests;
