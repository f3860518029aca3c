// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use pretty_assertions::assert_eq;
use rstest::{fixture, rstest};

use super::{CloseReason, Key, KeyAction, SessionRegistry, SessionState};
use crate::config::{LayoutConfig, Settings};
use crate::model::fixtures::{double_spec, single_spec, widget_spec};
use crate::model::NodeId;
use crate::protocol::WireMessage;

#[fixture]
fn registry() -> SessionRegistry {
    SessionRegistry::new(LayoutConfig::default())
}

fn node(id: &str) -> NodeId {
    NodeId::new(id).expect("node id")
}

#[rstest]
fn opening_focuses_the_new_session(mut registry: SessionRegistry) {
    let opened = registry.open_overlay(single_spec("3", 2));
    assert!(opened.replaced.is_none());
    assert_eq!(registry.focused_id(), Some(opened.session));
    assert_eq!(registry.overlay().map(|session| session.id()), Some(opened.session));
}

#[rstest]
fn second_overlay_replaces_the_first(mut registry: SessionRegistry) {
    let first = registry.open_overlay(single_spec("3", 4)).session;
    let second = registry.open_overlay(single_spec("5", 4));

    let replaced = second.replaced.expect("first session replaced");
    assert_eq!(replaced.id(), first);
    assert_eq!(replaced.state(), SessionState::Closed);
    assert_eq!(replaced.close_reason(), Some(CloseReason::Replaced));
    assert!(registry.get(first).is_none());
    assert_eq!(registry.len(), 1);

    let settings = Settings::default();
    let action = registry.route_key(Key::Digit(2), &settings);
    assert_eq!(action, KeyAction::Toggle { session: second.session, index: 1 });
    assert_eq!(registry.toggle_positive(first, 1), None);
    registry.toggle_positive(second.session, 1);
    assert!(registry.focused().expect("focused").positive().contains(&1));
}

#[rstest]
fn widgets_are_exclusive_per_node_only(mut registry: SessionRegistry) {
    let overlay = registry.open_overlay(single_spec("1", 2)).session;
    let left = registry.open_widget(node("8"), widget_spec("8", 2)).session;
    let right = registry.open_widget(node("9"), widget_spec("9", 2)).session;
    assert_eq!(registry.len(), 3);
    assert_eq!(registry.focused_id(), Some(right));

    let again = registry.open_widget(node("8"), widget_spec("8", 3));
    assert_eq!(again.replaced.map(|session| session.id()), Some(left));
    assert!(registry.get(overlay).is_some());
    assert!(registry.get(right).is_some());
    assert_eq!(registry.widget(&node("8")).map(|session| session.id()), Some(again.session));
}

#[rstest]
fn close_is_idempotent_and_clears_focus(mut registry: SessionRegistry) {
    let id = registry.open_overlay(single_spec("3", 2)).session;
    let closed = registry.close(id, CloseReason::PipelineError).expect("closed");
    assert_eq!(closed.close_reason(), Some(CloseReason::PipelineError));
    assert!(registry.close(id, CloseReason::PipelineError).is_none());
    assert_eq!(registry.focused_id(), None);
    assert!(registry.overlay().is_none());
    assert!(!registry.focus(id));
}

#[rstest]
fn close_all_empties_the_registry(mut registry: SessionRegistry) {
    registry.open_overlay(single_spec("1", 2));
    registry.open_widget(node("8"), widget_spec("8", 2));
    let closed = registry.close_all(CloseReason::PipelineStart);
    assert_eq!(closed.len(), 2);
    assert!(closed
        .iter()
        .all(|session| session.close_reason() == Some(CloseReason::PipelineStart)));
    assert!(registry.is_empty());
    assert_eq!(registry.focused_id(), None);
    assert!(registry.close_all(CloseReason::PipelineStart).is_empty());
}

#[rstest]
fn removing_a_node_closes_its_widget(mut registry: SessionRegistry) {
    let id = registry.open_widget(node("8"), widget_spec("8", 2)).session;
    let closed = registry.remove_node(&node("8")).expect("widget closed");
    assert_eq!(closed.id(), id);
    assert_eq!(closed.close_reason(), Some(CloseReason::NodeRemoved));
    assert!(registry.remove_node(&node("8")).is_none());
}

#[rstest]
fn cancel_during_send_wins_over_completion(mut registry: SessionRegistry) {
    let id = registry.open_overlay(single_spec("3", 2)).session;
    registry.toggle_positive(id, 0);
    let submission = registry.progress(id).expect("progress").expect("submission");

    let cancellation = registry.cancel(id).expect("cancelled");
    assert_eq!(cancellation.notice, WireMessage::cancel());
    assert_eq!(cancellation.session.close_reason(), Some(CloseReason::Cancelled));

    assert!(registry.finish_send(id, submission.ticket()).is_none());
    assert!(registry.cancel(id).is_none());
}

#[rstest]
fn completed_send_removes_the_session(mut registry: SessionRegistry) {
    let id = registry.open_overlay(double_spec("3", 2)).session;
    let submission = registry.progress(id).expect("progress").expect("submission");
    let closed = registry.finish_send(id, submission.ticket()).expect("closed");
    assert_eq!(closed.close_reason(), Some(CloseReason::Sent));
    assert!(registry.is_empty());
}

#[rstest]
#[case(Key::Digit(0), false, "cancel")]
#[case(Key::Digit(0), true, "progress")]
#[case(Key::Escape, true, "cancel")]
#[case(Key::Digit(9), false, "ignored")]
#[case(Key::Other, false, "ignored")]
fn hotkeys_follow_the_selection(
    mut registry: SessionRegistry,
    #[case] key: Key,
    #[case] picked: bool,
    #[case] expected: &str,
) {
    let id = registry.open_overlay(single_spec("3", 4)).session;
    if picked {
        registry.toggle_positive(id, 2);
    }
    let action = registry.route_key(key, &Settings::default());
    let label = match action {
        KeyAction::Ignored => "ignored",
        KeyAction::Toggle { .. } => "toggle",
        KeyAction::Progress(session) if session == id => "progress",
        KeyAction::Cancel(session) if session == id => "cancel",
        KeyAction::Progress(_) | KeyAction::Cancel(_) => "wrong session",
    };
    assert_eq!(label, expected);
}

#[rstest]
fn hotkeys_can_be_disabled(mut registry: SessionRegistry) {
    registry.open_overlay(single_spec("3", 4));
    let settings = Settings { hotkeys: false, ..Settings::default() };
    assert_eq!(registry.route_key(Key::Escape, &settings), KeyAction::Ignored);
}

#[rstest]
fn keys_without_focus_are_ignored(registry: SessionRegistry) {
    assert_eq!(registry.route_key(Key::Digit(1), &Settings::default()), KeyAction::Ignored);
}
