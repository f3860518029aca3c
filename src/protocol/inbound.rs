// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::model::{ChooserKind, ChooserSpec, ImageRef, PauseMode, Presentation};

use super::ProtocolError;

/// Host channel announcing an overlay chooser.
pub const OPEN_OVERLAY_CHANNEL: &str = "cg-image-chooser-classic-open";
/// Host channels announcing an inline widget chooser.
pub const OPEN_WIDGET_CHANNELS: [&str; 2] =
    ["cg-image-chooser-classic-widget", "cg-image-chooser-classic-widget-channel"];

/// Payload of an `open-chooser` event, as emitted by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenEvent {
    #[serde(default, deserialize_with = "id_string")]
    pub unique_id: String,
    #[serde(default, deserialize_with = "id_string")]
    pub display_id: String,
    #[serde(default = "default_chooser_type")]
    pub chooser_type: String,
    #[serde(default = "default_mode")]
    pub mode: String,
    #[serde(default = "default_count")]
    pub count: u32,
    #[serde(default)]
    pub urls: Vec<ImageRef>,
    #[serde(default)]
    pub progress_first_pick: bool,
}

fn default_chooser_type() -> String {
    "single".to_owned()
}

fn default_mode() -> String {
    PauseMode::AlwaysPause.label().to_owned()
}

fn default_count() -> u32 {
    1
}

/// Node ids arrive as strings or bare numbers depending on the host version.
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => value,
        Value::Number(value) => value.to_string(),
        _ => String::new(),
    })
}

impl OpenEvent {
    pub fn from_json(payload: &Value) -> Result<Self, ProtocolError> {
        Self::deserialize(payload).map_err(|err| ProtocolError::Decode(err.to_string()))
    }

    /// The only constructor path for a [`ChooserSpec`] coming from the backend.
    pub fn into_spec(self) -> Result<ChooserSpec, ProtocolError> {
        let unique_id = if self.unique_id.trim().is_empty() {
            self.display_id.clone()
        } else {
            self.unique_id
        };
        if unique_id.trim().is_empty() {
            return Err(ProtocolError::MissingId);
        }

        let kind = match self.chooser_type.as_str() {
            "double" => ChooserKind::Double,
            _ => ChooserKind::Single,
        };
        let pause_mode = PauseMode::from_label(&self.mode);
        let progress_first_pick =
            self.progress_first_pick || pause_mode == PauseMode::ProgressFirstPick;

        let mut spec = ChooserSpec::new(unique_id, kind, self.urls)
            .with_presentation(Presentation::from_chooser_type(&self.chooser_type))
            .with_pause_mode(pause_mode)
            .with_count(self.count.max(1))
            .with_progress_first_pick(progress_first_pick);
        if !self.display_id.trim().is_empty() {
            spec = spec.with_display_id(self.display_id);
        }
        Ok(spec)
    }
}

/// Discrete inbound events from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    OpenChooser(ChooserSpec),
    PipelineStart,
    PipelineError,
    PipelineSuccess,
    PipelineInterrupted,
    AppUnload,
}

impl HostEvent {
    /// Decodes a host event by channel name. Channels unrelated to choosers yield `None`.
    pub fn from_channel(channel: &str, payload: &Value) -> Result<Option<Self>, ProtocolError> {
        let event = match channel {
            OPEN_OVERLAY_CHANNEL => Self::OpenChooser(OpenEvent::from_json(payload)?.into_spec()?),
            channel if OPEN_WIDGET_CHANNELS.contains(&channel) => {
                let spec = OpenEvent::from_json(payload)?.into_spec()?;
                Self::OpenChooser(spec.with_presentation(Presentation::Widget))
            }
            "execution_start" => Self::PipelineStart,
            "execution_error" => Self::PipelineError,
            "execution_success" => Self::PipelineSuccess,
            "execution_interrupted" => Self::PipelineInterrupted,
            "beforeunload" | "app_unload" => Self::AppUnload,
            _ => return Ok(None),
        };
        Ok(Some(event))
    }
}
