// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::image::ImageRef;

/// How many disjoint selection sets a chooser offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChooserKind {
    /// Positive picks only.
    Single,
    /// Positive and negative picks, kept disjoint.
    Double,
}

/// Where the chooser is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Presentation {
    /// Full-window overlay; at most one is live at a time.
    Overlay,
    /// Inline widget embedded in a host node; one per node.
    Widget,
}

impl Presentation {
    /// Maps the backend's `chooser_type` string.
    pub fn from_chooser_type(chooser_type: &str) -> Self {
        match chooser_type {
            "classic_widget" | "widget" => Self::Widget,
            _ => Self::Overlay,
        }
    }
}

/// Pipeline-side policy deciding whether a chooser pauses the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PauseMode {
    #[default]
    AlwaysPause,
    RepeatLastSelection,
    OnlyPauseIfBatch,
    ProgressFirstPick,
    PassThrough,
    TakeFirstN,
    TakeLastN,
}

impl PauseMode {
    pub const ALL: [PauseMode; 7] = [
        PauseMode::AlwaysPause,
        PauseMode::RepeatLastSelection,
        PauseMode::OnlyPauseIfBatch,
        PauseMode::ProgressFirstPick,
        PauseMode::PassThrough,
        PauseMode::TakeFirstN,
        PauseMode::TakeLastN,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::AlwaysPause => "Always pause",
            Self::RepeatLastSelection => "Repeat last selection",
            Self::OnlyPauseIfBatch => "Only pause if batch",
            Self::ProgressFirstPick => "Progress first pick",
            Self::PassThrough => "Pass through",
            Self::TakeFirstN => "Take First n",
            Self::TakeLastN => "Take Last n",
        }
    }

    /// Unknown labels fall back to [`PauseMode::AlwaysPause`].
    pub fn from_label(label: &str) -> Self {
        Self::ALL.into_iter().find(|mode| mode.label() == label).unwrap_or_default()
    }
}

impl fmt::Display for PauseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters of one chooser invocation. Read-only for the lifetime of its session.
#[derive(Debug, Clone, PartialEq)]
pub struct ChooserSpec {
    unique_id: String,
    display_id: String,
    kind: ChooserKind,
    presentation: Presentation,
    pause_mode: PauseMode,
    count: u32,
    images: Vec<ImageRef>,
    progress_first_pick: bool,
}

impl ChooserSpec {
    pub fn new(unique_id: impl Into<String>, kind: ChooserKind, images: Vec<ImageRef>) -> Self {
        let unique_id = unique_id.into();
        let display_id = unique_id.split(':').next().unwrap_or_default().to_owned();
        Self {
            unique_id,
            display_id,
            kind,
            presentation: Presentation::Overlay,
            pause_mode: PauseMode::AlwaysPause,
            count: 1,
            images,
            progress_first_pick: false,
        }
    }

    pub fn with_display_id(mut self, display_id: impl Into<String>) -> Self {
        self.display_id = display_id.into();
        self
    }

    pub fn with_presentation(mut self, presentation: Presentation) -> Self {
        self.presentation = presentation;
        self
    }

    pub fn with_pause_mode(mut self, pause_mode: PauseMode) -> Self {
        self.pause_mode = pause_mode;
        self
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_progress_first_pick(mut self, progress_first_pick: bool) -> Self {
        self.progress_first_pick = progress_first_pick;
        self
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn display_id(&self) -> &str {
        &self.display_id
    }

    pub fn kind(&self) -> ChooserKind {
        self.kind
    }

    pub fn presentation(&self) -> Presentation {
        self.presentation
    }

    pub fn pause_mode(&self) -> PauseMode {
        self.pause_mode
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn images(&self) -> &[ImageRef] {
        &self.images
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Auto-submit on the first positive pick. Only honoured by single-mode choosers.
    pub fn progress_first_pick(&self) -> bool {
        self.progress_first_pick && self.kind == ChooserKind::Single
    }

    /// Candidate node ids for locating the host node, most specific first: display id,
    /// unique id, then the outer and inner segments of a nested unique id.
    pub fn node_candidates(&self) -> Vec<&str> {
        let mut candidates = Vec::new();
        if !self.display_id.is_empty() {
            candidates.push(self.display_id.as_str());
        }
        if !self.unique_id.is_empty() {
            candidates.push(self.unique_id.as_str());
            let segments: Vec<&str> = self.unique_id.split(':').collect();
            if segments.len() > 1 {
                candidates.push(segments[0]);
                candidates.push(segments[segments.len() - 1]);
            }
        }
        let mut seen = Vec::with_capacity(candidates.len());
        candidates.retain(|candidate| {
            if candidate.is_empty() || seen.contains(candidate) {
                return false;
            }
            seen.push(*candidate);
            true
        });
        candidates
    }
}

#[cfg(test)]
mod tests {
    use super::{ChooserKind, ChooserSpec, PauseMode, Presentation};

    #[test]
    fn pause_mode_labels_round_trip_and_unknown_falls_back() {
        for mode in PauseMode::ALL {
            assert_eq!(PauseMode::from_label(mode.label()), mode);
        }
        assert_eq!(PauseMode::from_label("Sometimes pause"), PauseMode::AlwaysPause);
    }

    #[test]
    fn presentation_maps_widget_chooser_type() {
        assert_eq!(Presentation::from_chooser_type("classic_widget"), Presentation::Widget);
        assert_eq!(Presentation::from_chooser_type("double"), Presentation::Overlay);
        assert_eq!(Presentation::from_chooser_type("single"), Presentation::Overlay);
    }

    #[test]
    fn progress_first_pick_is_ignored_in_double_mode() {
        let single = ChooserSpec::new("5", ChooserKind::Single, Vec::new())
            .with_progress_first_pick(true);
        let double = ChooserSpec::new("5", ChooserKind::Double, Vec::new())
            .with_progress_first_pick(true);
        assert!(single.progress_first_pick());
        assert!(!double.progress_first_pick());
    }

    #[test]
    fn node_candidates_cover_nested_ids_without_duplicates() {
        let spec = ChooserSpec::new("12:4:7", ChooserKind::Single, Vec::new());
        assert_eq!(spec.display_id(), "12");
        assert_eq!(spec.node_candidates(), vec!["12", "12:4:7", "7"]);

        let flat = ChooserSpec::new("9", ChooserKind::Single, Vec::new());
        assert_eq!(flat.node_candidates(), vec!["9"]);
    }
}
