// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::SessionId;
use crate::protocol::TransportError;

/// Failures surfaced by chooser operations. Each is handled where it occurs; none of
/// them leaves a session open.
#[derive(Debug, thiserror::Error)]
pub enum ChooserError {
    /// No host node matched any candidate id of the chooser.
    #[error("no host node found for chooser '{unique_id}' (tried {candidates:?})")]
    RoutingFailure { unique_id: String, candidates: Vec<String> },
    #[error("failed to deliver chooser message: {0}")]
    TransportFailure(#[from] TransportError),
    /// Progress requested with nothing picked in single mode.
    #[error("cannot progress chooser '{unique_id}' without a selection")]
    InvalidSelection { unique_id: String },
    #[error("session {0} is not registered")]
    UnknownSession(SessionId),
}
