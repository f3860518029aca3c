// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::chooser::{ChooserKind, ChooserSpec, Presentation};
use super::image::ImageRef;

pub(crate) fn images(count: usize) -> Vec<ImageRef> {
    (0..count)
        .map(|idx| ImageRef::new(format!("chooser_{idx:05}_.png"), "", "temp"))
        .collect()
}

pub(crate) fn single_spec(unique_id: &str, count: usize) -> ChooserSpec {
    ChooserSpec::new(unique_id, ChooserKind::Single, images(count))
}

pub(crate) fn double_spec(unique_id: &str, count: usize) -> ChooserSpec {
    ChooserSpec::new(unique_id, ChooserKind::Double, images(count))
}

pub(crate) fn widget_spec(unique_id: &str, count: usize) -> ChooserSpec {
    single_spec(unique_id, count).with_presentation(Presentation::Widget)
}

#[cfg(test)]
mod tests {
    #[test]
    fn fixtures_produce_requested_image_counts() {
        assert_eq!(super::single_spec("1", 3).image_count(), 3);
        assert_eq!(super::double_spec("1", 0).image_count(), 0);
    }
}
