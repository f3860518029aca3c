// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file at all) yields a working
//! configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::host::SettingsStore;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChooserConfig {
    pub layout: LayoutConfig,
    pub settings: Settings,
    pub backend: BackendConfig,
}

impl ChooserConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.display().to_string(), source })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn validate(&self) -> Vec<String> {
        let mut issues = self.layout.validate();
        if self.backend.base_url.trim().is_empty() {
            issues.push("backend.base_url must not be empty".to_owned());
        }
        if !self.backend.message_path.starts_with('/') {
            issues.push("backend.message_path must start with '/'".to_owned());
        }
        issues
    }
}

/// Tunables for the grid solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Upper bound for the gap between cells, in pixels.
    pub max_gap: f64,
    /// Gap cap as a fraction of the space available per column (or row).
    pub gap_fraction: f64,
    pub padding: f64,
    pub footer_height: f64,
    pub min_container_width: f64,
    pub min_container_height: f64,
    pub max_container_width: f64,
    pub max_container_height: f64,
    /// Slack allowed when checking that a candidate fits the available area.
    pub tolerance: f64,
    /// Relative aspect-ratio change below which a measured image does not trigger a
    /// relayout.
    pub aspect_refresh_threshold: f64,
    pub weights: ScoreWeights,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_gap: 8.0,
            gap_fraction: 0.05,
            padding: 12.0,
            footer_height: 42.0,
            min_container_width: 280.0,
            min_container_height: 160.0,
            max_container_width: 1280.0,
            max_container_height: 960.0,
            tolerance: 1e-6,
            aspect_refresh_threshold: 0.01,
            weights: ScoreWeights::default(),
        }
    }
}

impl LayoutConfig {
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for (name, value) in [
            ("layout.max_gap", self.max_gap),
            ("layout.padding", self.padding),
            ("layout.footer_height", self.footer_height),
            ("layout.tolerance", self.tolerance),
            ("layout.aspect_refresh_threshold", self.aspect_refresh_threshold),
        ] {
            if !value.is_finite() || value < 0.0 {
                issues.push(format!("{name} must be a finite, non-negative number"));
            }
        }
        if !(0.0..1.0).contains(&self.gap_fraction) {
            issues.push("layout.gap_fraction must be in [0, 1)".to_owned());
        }
        if self.min_container_width > self.max_container_width {
            issues.push("layout.min_container_width exceeds max_container_width".to_owned());
        }
        if self.min_container_height > self.max_container_height {
            issues.push("layout.min_container_height exceeds max_container_height".to_owned());
        }
        issues.extend(self.weights.validate());
        issues
    }
}

/// Penalty weights that decide between grid candidates of equal cell area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScoreWeights {
    /// Unused width/height fraction.
    pub fill: f64,
    /// Empty grid slots (`rows * columns - items`) as a fraction of all slots.
    pub empty_slot: f64,
    /// Column/row imbalance.
    pub balance: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self { fill: 0.1, empty_slot: 0.01, balance: 0.05 }
    }
}

impl ScoreWeights {
    /// No penalties; equal-area ties keep the lower column count.
    pub fn area_only() -> Self {
        Self { fill: 0.0, empty_slot: 0.0, balance: 0.0 }
    }

    fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();
        for (name, value) in [
            ("layout.weights.fill", self.fill),
            ("layout.weights.empty_slot", self.empty_slot),
            ("layout.weights.balance", self.balance),
        ] {
            if !value.is_finite() || value < 0.0 {
                issues.push(format!("{name} must be a finite, non-negative number"));
            }
        }
        issues
    }
}

/// User-facing toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub alert_sound: bool,
    pub hotkeys: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self { alert_sound: true, hotkeys: true }
    }
}

impl SettingsStore for Settings {
    fn alert_sound_enabled(&self) -> bool {
        self.alert_sound
    }

    fn hotkeys_enabled(&self) -> bool {
        self.hotkeys
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackendConfig {
    pub base_url: String,
    pub message_path: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8188".to_owned(),
            message_path: crate::protocol::MESSAGE_PATH.to_owned(),
        }
    }
}

impl BackendConfig {
    pub fn message_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), self.message_path)
    }
}
