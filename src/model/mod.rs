// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A chooser invocation is described by a [`ChooserSpec`] holding the [`ImageRef`]s to pick
//! from. Ids for host nodes and registry sessions live in [`ids`].

pub mod chooser;
#[cfg(test)]
pub(crate) mod fixtures;
pub mod ids;
pub mod image;

pub use chooser::{ChooserKind, ChooserSpec, PauseMode, Presentation};
pub use ids::{Id, IdError, NodeId, SessionId};
pub use image::ImageRef;
