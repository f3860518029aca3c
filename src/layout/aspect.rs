// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use crate::model::ImageRef;

/// Ratio assumed until an image hint or a measurement says otherwise.
pub const DEFAULT_ASPECT_RATIO: f64 = 1.0;

/// Aspect ratio used for layout, refined as displayed images report their real size.
///
/// Small measurement differences (float jitter across near-identical images) are absorbed
/// so the grid is not re-solved for every image that finishes loading.
#[derive(Debug, Clone, PartialEq)]
pub struct AspectRatioTracker {
    ratio: f64,
    measured: bool,
    threshold: f64,
}

impl AspectRatioTracker {
    pub fn new(initial: f64, threshold: f64) -> Self {
        let ratio =
            if initial.is_finite() && initial > 0.0 { initial } else { DEFAULT_ASPECT_RATIO };
        Self { ratio, measured: false, threshold: threshold.max(0.0) }
    }

    /// Seeds the ratio from the first image that carries both dimension hints.
    pub fn from_images(images: &[ImageRef], threshold: f64) -> Self {
        let initial =
            images.iter().find_map(ImageRef::aspect_ratio).unwrap_or(DEFAULT_ASPECT_RATIO);
        Self::new(initial, threshold)
    }

    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// A real image size has been observed.
    pub fn is_measured(&self) -> bool {
        self.measured
    }

    /// Records a measured image size. Returns `true` when the cached ratio moved by more
    /// than the threshold and the grid should be laid out again.
    pub fn observe(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        let measured = f64::from(width) / f64::from(height);
        let change = (measured - self.ratio).abs() / self.ratio;
        self.measured = true;
        if change > self.threshold {
            self.ratio = measured;
            return true;
        }
        false
    }
}
