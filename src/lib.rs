// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pickpause: pipeline checkpoint image chooser.
//!
//! A paused pipeline node shows a batch of images; the user picks some (or rejects some,
//! in double mode) and the choice is posted back so the run can continue.
//!
//! - [`layout`] packs the batch into an aspect-ratio-preserving grid.
//! - [`session`] holds picks and the chooser lifecycle.
//! - [`protocol`] encodes outbound messages and decodes host events.
//! - [`host`] drives sessions from events and user input.
//! - [`broker`] and [`policy`] are the backend side: waiting for selections and deciding
//!   when to pause at all.

pub mod broker;
pub mod config;
pub mod error;
pub mod host;
pub mod layout;
pub mod model;
pub mod policy;
pub mod protocol;
pub mod session;

pub use config::ChooserConfig;
pub use error::ChooserError;
