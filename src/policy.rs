// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pipeline-side pause policy.
//!
//! Decides whether a chooser node needs to ask the user at all, and turns the indices it
//! receives back into picks.

use tracing::debug;

use crate::broker::{BrokerError, MessageBroker};
use crate::model::PauseMode;
use crate::protocol::NEGATIVE_SEPARATOR;

/// The selection a pause mode makes without asking, or `None` to pause and ask.
///
/// `batch` is the number of images produced, `count` the node's `n`, `last` the previous
/// selection of the same node.
pub fn auto_selection(
    mode: PauseMode,
    batch: usize,
    count: usize,
    last: Option<&[i64]>,
) -> Option<Vec<i64>> {
    match mode {
        PauseMode::RepeatLastSelection => last.filter(|last| !last.is_empty()).map(<[i64]>::to_vec),
        PauseMode::PassThrough => Some(indices(0..batch)),
        PauseMode::TakeFirstN => Some(indices(0..count.min(batch))),
        PauseMode::TakeLastN => Some(indices(batch.saturating_sub(count)..batch)),
        PauseMode::OnlyPauseIfBatch if batch <= 1 => Some(vec![0]),
        PauseMode::AlwaysPause | PauseMode::OnlyPauseIfBatch | PauseMode::ProgressFirstPick => None,
    }
}

/// Splits a double-mode selection at the first separator. Without a separator everything
/// is positive.
pub fn split_double(selection: &[i64]) -> (Vec<usize>, Vec<usize>) {
    match selection.iter().position(|&index| index == NEGATIVE_SEPARATOR) {
        Some(divider) => {
            (non_negative(&selection[..divider]), non_negative(&selection[divider + 1..]))
        }
        None => (non_negative(selection), Vec::new()),
    }
}

/// Drops separators and any other negative entries.
pub fn non_negative(selection: &[i64]) -> Vec<usize> {
    selection.iter().filter_map(|&index| usize::try_from(index).ok()).collect()
}

/// Resolves the selection of one chooser node: applies the pause mode, otherwise calls
/// `open` to show the chooser and waits for the user's answer. The result is remembered
/// as the node's last selection.
pub async fn resolve_selection(
    broker: &MessageBroker,
    unique_id: &str,
    mode: PauseMode,
    batch: usize,
    count: usize,
    open: impl FnOnce(),
) -> Result<Vec<i64>, BrokerError> {
    let last = broker.last_selection(unique_id);
    let selection = match auto_selection(mode, batch, count, last.as_deref()) {
        Some(selection) => {
            debug!(unique_id, %mode, ?selection, "selection made without pausing");
            selection
        }
        None => {
            open();
            broker.wait_for_message(unique_id).await?
        }
    };
    broker.set_last_selection(unique_id, selection.clone());
    Ok(selection)
}

fn indices(range: std::ops::Range<usize>) -> Vec<i64> {
    range.filter_map(|index| i64::try_from(index).ok()).collect()
}
