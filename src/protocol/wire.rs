// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::BTreeSet;
use std::fmt;

use crate::model::ChooserKind;

use super::ProtocolError;

/// Backend endpoint receiving chooser messages.
pub const MESSAGE_PATH: &str = "/image_chooser_classic_message";
pub const CANCEL_SENTINEL: &str = "__cancel__";
pub const START_SENTINEL: &str = "__start__";
/// Wire form of [`RoutingId::Broadcast`].
pub const BROADCAST_ID: &str = "-1";
/// Separates positive from negative indices in a double-mode selection.
pub const NEGATIVE_SEPARATOR: i64 = -1;

/// Which pipeline invocation a message belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RoutingId {
    Node(String),
    /// No specific target; whichever chooser is pending.
    Broadcast,
}

impl RoutingId {
    pub fn node(id: impl Into<String>) -> Self {
        let id = id.into();
        Self::from_wire(&id)
    }

    pub fn as_wire(&self) -> &str {
        match self {
            Self::Node(id) => id,
            Self::Broadcast => BROADCAST_ID,
        }
    }

    /// Empty strings and `-1` both mean broadcast.
    pub fn from_wire(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == BROADCAST_ID {
            Self::Broadcast
        } else {
            Self::Node(trimmed.to_owned())
        }
    }
}

impl fmt::Display for RoutingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// A finished pick. Index sets are ordered, so encoding is always ascending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    kind: ChooserKind,
    positive: BTreeSet<usize>,
    negative: BTreeSet<usize>,
}

impl Selection {
    /// Negative picks are dropped for single-mode selections.
    pub fn new(kind: ChooserKind, positive: BTreeSet<usize>, negative: BTreeSet<usize>) -> Self {
        let negative = match kind {
            ChooserKind::Single => BTreeSet::new(),
            ChooserKind::Double => negative,
        };
        Self { kind, positive, negative }
    }

    pub fn single(positive: impl IntoIterator<Item = usize>) -> Self {
        Self::new(ChooserKind::Single, positive.into_iter().collect(), BTreeSet::new())
    }

    pub fn double(
        positive: impl IntoIterator<Item = usize>,
        negative: impl IntoIterator<Item = usize>,
    ) -> Self {
        Self::new(
            ChooserKind::Double,
            positive.into_iter().collect(),
            negative.into_iter().collect(),
        )
    }

    pub fn kind(&self) -> ChooserKind {
        self.kind
    }

    pub fn positive(&self) -> &BTreeSet<usize> {
        &self.positive
    }

    pub fn negative(&self) -> &BTreeSet<usize> {
        &self.negative
    }

    /// `"0,2,5"` in single mode; `"0,2,-1,1"` in double mode. Double mode always carries
    /// the separator, even without negatives.
    pub fn encode(&self) -> String {
        let mut parts: Vec<String> = self.positive.iter().map(usize::to_string).collect();
        if self.kind == ChooserKind::Double {
            parts.push(NEGATIVE_SEPARATOR.to_string());
            parts.extend(self.negative.iter().map(usize::to_string));
        }
        parts.join(",")
    }

    /// Parses an encoded selection. A `-1` marks double mode; empty items are skipped.
    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        let mut positive = BTreeSet::new();
        let mut negative = BTreeSet::new();
        let mut kind = ChooserKind::Single;

        for item in raw.split(',').map(str::trim).filter(|item| !item.is_empty()) {
            let value: i64 = item
                .parse()
                .map_err(|_| ProtocolError::InvalidSelection { raw: raw.to_owned() })?;
            if value == NEGATIVE_SEPARATOR && kind == ChooserKind::Single {
                kind = ChooserKind::Double;
                continue;
            }
            let index = usize::try_from(value)
                .map_err(|_| ProtocolError::InvalidSelection { raw: raw.to_owned() })?;
            match kind {
                ChooserKind::Single => positive.insert(index),
                ChooserKind::Double => negative.insert(index),
            };
        }

        Ok(Self { kind, positive, negative })
    }
}

/// Message body sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Cancel,
    Start,
    Selection(Selection),
}

impl Payload {
    pub fn encode(&self) -> String {
        match self {
            Self::Cancel => CANCEL_SENTINEL.to_owned(),
            Self::Start => START_SENTINEL.to_owned(),
            Self::Selection(selection) => selection.encode(),
        }
    }

    pub fn parse(raw: &str) -> Result<Self, ProtocolError> {
        match raw.trim() {
            CANCEL_SENTINEL => Ok(Self::Cancel),
            START_SENTINEL => Ok(Self::Start),
            other => Selection::parse(other).map(Self::Selection),
        }
    }
}

/// One outbound `(routing id, payload)` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireMessage {
    id: RoutingId,
    payload: Payload,
}

impl WireMessage {
    pub fn new(id: RoutingId, payload: Payload) -> Self {
        Self { id, payload }
    }

    pub fn cancel() -> Self {
        Self::new(RoutingId::Broadcast, Payload::Cancel)
    }

    pub fn start() -> Self {
        Self::new(RoutingId::Broadcast, Payload::Start)
    }

    pub fn selection(unique_id: &str, selection: Selection) -> Self {
        Self::new(RoutingId::node(unique_id), Payload::Selection(selection))
    }

    pub fn id(&self) -> &RoutingId {
        &self.id
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// The `message` form field.
    pub fn message(&self) -> String {
        self.payload.encode()
    }

    /// Form-encoded body: `id` and `message`.
    pub fn form_fields(&self) -> [(&'static str, String); 2] {
        [("id", self.id.as_wire().to_owned()), ("message", self.message())]
    }
}

impl fmt::Display for WireMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <- {}", self.id, self.message())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Payload, RoutingId, Selection, WireMessage};
    use crate::model::ChooserKind;
    use crate::protocol::ProtocolError;

    #[rstest]
    #[case(Selection::double([1, 3], []), "1,3,-1")]
    #[case(Selection::double([], [0]), "-1,0")]
    #[case(Selection::double([0, 2], [1]), "0,2,-1,1")]
    #[case(Selection::single([2, 0]), "0,2")]
    #[case(Selection::single([5, 0, 2]), "0,2,5")]
    fn selections_encode_ascending(#[case] selection: Selection, #[case] expected: &str) {
        assert_eq!(selection.encode(), expected);
    }

    #[test]
    fn single_mode_drops_negative_picks() {
        let selection = Selection::new(ChooserKind::Single, [1].into(), [2].into());
        assert!(selection.negative().is_empty());
        assert_eq!(selection.encode(), "1");
    }

    #[test]
    fn parse_recognises_double_mode_by_separator() {
        let parsed = Selection::parse("0, 2,-1,1").expect("selection");
        assert_eq!(parsed, Selection::double([0, 2], [1]));

        let bare = Selection::parse("4,-1").expect("selection");
        assert_eq!(bare.kind(), ChooserKind::Double);
        assert!(bare.negative().is_empty());
    }

    #[test]
    fn parse_rejects_garbage_and_negative_indices() {
        assert_eq!(
            Selection::parse("1,x"),
            Err(ProtocolError::InvalidSelection { raw: "1,x".to_owned() })
        );
        assert!(Selection::parse("-1,-1").is_err());
        assert!(Selection::parse("-3").is_err());
    }

    #[test]
    fn sentinels_round_trip_through_payload() {
        assert_eq!(Payload::parse("__cancel__"), Ok(Payload::Cancel));
        assert_eq!(Payload::parse("__start__"), Ok(Payload::Start));
        assert_eq!(Payload::Cancel.encode(), "__cancel__");
        assert_eq!(Payload::Start.encode(), "__start__");
    }

    #[test]
    fn routing_id_treats_empty_and_minus_one_as_broadcast() {
        assert_eq!(RoutingId::from_wire(""), RoutingId::Broadcast);
        assert_eq!(RoutingId::from_wire("-1"), RoutingId::Broadcast);
        assert_eq!(RoutingId::from_wire("12:4"), RoutingId::Node("12:4".to_owned()));
        assert_eq!(RoutingId::Broadcast.as_wire(), "-1");
    }

    #[test]
    fn form_fields_carry_id_and_message() {
        let message = WireMessage::selection("7", Selection::single([1]));
        assert_eq!(
            message.form_fields(),
            [("id", "7".to_owned()), ("message", "1".to_owned())]
        );
        assert_eq!(
            WireMessage::cancel().form_fields(),
            [("id", "-1".to_owned()), ("message", "__cancel__".to_owned())]
        );
    }
}
