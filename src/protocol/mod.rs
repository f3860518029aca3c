// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Chooser messaging protocol.
//!
//! Outbound: a [`WireMessage`] is a routing id plus a payload (cancel, start notice or an
//! encoded [`Selection`]), posted form-encoded through a [`Transport`]. Inbound: host
//! events are decoded into [`HostEvent`]s, the open event being the only source of a
//! [`crate::model::ChooserSpec`].

pub mod inbound;
pub mod notifier;
pub mod testing;
pub mod transport;
pub mod wire;

pub use inbound::{HostEvent, OpenEvent, OPEN_OVERLAY_CHANNEL, OPEN_WIDGET_CHANNELS};
pub use notifier::StartNotifier;
pub use transport::{HttpTransport, Transport, TransportError};
pub use wire::{
    Payload, RoutingId, Selection, WireMessage, BROADCAST_ID, CANCEL_SENTINEL, MESSAGE_PATH,
    NEGATIVE_SEPARATOR, START_SENTINEL,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed chooser payload: {0}")]
    Decode(String),
    #[error("open event carries neither unique_id nor display_id")]
    MissingId,
    #[error("invalid selection message '{raw}'")]
    InvalidSelection { raw: String },
}
