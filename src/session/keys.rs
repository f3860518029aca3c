// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::SessionId;

/// Keyboard input relevant to a focused chooser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Digit(u8),
    Escape,
    Other,
}

impl Key {
    /// Maps a DOM-style key name (`"1"`, `"0"`, `"Escape"`).
    pub fn from_name(name: &str) -> Self {
        match name {
            "Escape" | "Esc" => Self::Escape,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => ch
                        .to_digit(10)
                        .and_then(|digit| u8::try_from(digit).ok())
                        .map_or(Self::Other, Self::Digit),
                    _ => Self::Other,
                }
            }
        }
    }
}

/// What a key press asks of the focused session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Ignored,
    /// `1`..`9`: toggle the positive pick of tile `index`.
    Toggle { session: SessionId, index: usize },
    /// `0` with something picked.
    Progress(SessionId),
    /// `0` with nothing picked, or `Escape`.
    Cancel(SessionId),
}
