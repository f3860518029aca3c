// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::{Deserialize, Serialize};

/// One selectable image as announced by the backend.
///
/// Width and height are optional hints; when both are present they seed the aspect
/// ratio used for the first layout pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    filename: String,
    #[serde(default)]
    subfolder: String,
    #[serde(rename = "type", default = "default_image_kind")]
    kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    height: Option<u32>,
}

fn default_image_kind() -> String {
    "temp".to_owned()
}

impl ImageRef {
    pub fn new(
        filename: impl Into<String>,
        subfolder: impl Into<String>,
        kind: impl Into<String>,
    ) -> Self {
        Self {
            filename: filename.into(),
            subfolder: subfolder.into(),
            kind: kind.into(),
            width: None,
            height: None,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn subfolder(&self) -> &str {
        &self.subfolder
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn width(&self) -> Option<u32> {
        self.width
    }

    pub fn height(&self) -> Option<u32> {
        self.height
    }

    /// `width / height` when both hints are present and non-zero.
    pub fn aspect_ratio(&self) -> Option<f64> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some(f64::from(w) / f64::from(h)),
            _ => None,
        }
    }

    /// Query parameters for the host's `/view` endpoint. `subfolder` is omitted when empty.
    pub fn view_params(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("filename", self.filename.as_str()), ("type", self.kind.as_str())];
        if !self.subfolder.is_empty() {
            params.push(("subfolder", self.subfolder.as_str()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::ImageRef;

    #[test]
    fn deserializes_wire_shape_with_type_field() {
        let image: ImageRef =
            serde_json::from_str(r#"{"filename":"a.png","subfolder":"","type":"temp"}"#)
                .expect("image ref");
        assert_eq!(image.filename(), "a.png");
        assert_eq!(image.kind(), "temp");
        assert_eq!(image.aspect_ratio(), None);
    }

    #[test]
    fn aspect_ratio_requires_both_positive_hints() {
        let image = ImageRef::new("a.png", "", "output").with_dimensions(768, 512);
        assert_eq!(image.aspect_ratio(), Some(1.5));

        let degenerate = ImageRef::new("b.png", "", "output").with_dimensions(768, 0);
        assert_eq!(degenerate.aspect_ratio(), None);
    }

    #[test]
    fn view_params_skip_empty_subfolder() {
        let flat = ImageRef::new("a.png", "", "temp");
        assert_eq!(flat.view_params(), vec![("filename", "a.png"), ("type", "temp")]);

        let nested = ImageRef::new("a.png", "batch 1", "temp");
        assert_eq!(nested.view_params().last(), Some(&("subfolder", "batch 1")));
    }
}
