// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Grid layout for chooser surfaces.
//!
//! [`solve_layout`] packs a batch of uniform, aspect-ratio-constrained tiles into the
//! available area. [`AspectRatioTracker`] keeps the ratio it is fed with up to date as
//! images report their real dimensions.

pub mod aspect;
pub mod grid;

pub use aspect::{AspectRatioTracker, DEFAULT_ASPECT_RATIO};
pub use grid::{
    solve_layout, CellRect, ContainerSize, LayoutGeometry, LayoutRequest, MIN_ASPECT_RATIO,
};
