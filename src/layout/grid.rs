// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Pickpause-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Pickpause and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;
use tracing::debug;

use crate::config::LayoutConfig;

/// Aspect ratios at or below zero (or non-finite) are clamped to this value.
pub const MIN_ASPECT_RATIO: f64 = 1e-3;

/// Relative cell-area difference under which two candidates count as equally large.
const AREA_TIE_EPSILON: f64 = 1e-12;

/// Inputs of one solver pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutRequest {
    /// Content area width, excluding fixed chrome.
    pub available_width: f64,
    /// Content area height, excluding the footer.
    pub available_height: f64,
    pub item_count: usize,
    /// Cell width divided by cell height.
    pub aspect_ratio: f64,
    /// The user sized the container by hand; no size recommendation is returned.
    pub user_resized: bool,
}

impl LayoutRequest {
    pub fn new(
        available_width: f64,
        available_height: f64,
        item_count: usize,
        aspect_ratio: f64,
    ) -> Self {
        Self { available_width, available_height, item_count, aspect_ratio, user_resized: false }
    }

    pub fn with_user_resized(mut self, user_resized: bool) -> Self {
        self.user_resized = user_resized;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ContainerSize {
    pub width: f64,
    pub height: f64,
}

/// Position of one tile inside the grid, relative to the grid origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Solved grid geometry. A value type: recomputed on demand, never stored as truth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LayoutGeometry {
    columns: usize,
    rows: usize,
    cell_width: f64,
    cell_height: f64,
    column_gap: f64,
    row_gap: f64,
    used_width: f64,
    used_height: f64,
    preferred_size: Option<ContainerSize>,
    degenerate: bool,
}

impl LayoutGeometry {
    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    pub fn column_gap(&self) -> f64 {
        self.column_gap
    }

    pub fn row_gap(&self) -> f64 {
        self.row_gap
    }

    pub fn used_width(&self) -> f64 {
        self.used_width
    }

    pub fn used_height(&self) -> f64 {
        self.used_height
    }

    /// Container size hint for auto-sizing hosts. `None` once the user resized by hand.
    pub fn preferred_size(&self) -> Option<ContainerSize> {
        self.preferred_size
    }

    /// The single-column fallback was used because no candidate fit.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    /// Tiles fill the grid row by row.
    pub fn cell_rect(&self, index: usize) -> CellRect {
        let column = index % self.columns;
        let row = index / self.columns;
        CellRect {
            x: column as f64 * (self.cell_width + self.column_gap),
            y: row as f64 * (self.cell_height + self.row_gap),
            width: self.cell_width,
            height: self.cell_height,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Grid {
    columns: usize,
    rows: usize,
    cell_width: f64,
    cell_height: f64,
    column_gap: f64,
    row_gap: f64,
}

impl Grid {
    fn used_width(&self) -> f64 {
        self.columns as f64 * self.cell_width + (self.columns - 1) as f64 * self.column_gap
    }

    fn used_height(&self) -> f64 {
        self.rows as f64 * self.cell_height + (self.rows - 1) as f64 * self.row_gap
    }
}

#[derive(Debug, Clone, Copy)]
struct Candidate {
    grid: Grid,
    area: f64,
    score: f64,
}

impl Candidate {
    /// Larger cells always win; the penalty score only separates candidates whose cell area
    /// is equal within [`AREA_TIE_EPSILON`]. Remaining ties go to `other`.
    fn beats(&self, other: &Candidate) -> bool {
        let slack = AREA_TIE_EPSILON * self.area.max(other.area);
        if self.area > other.area + slack {
            return true;
        }
        if self.area < other.area - slack {
            return false;
        }
        self.score > other.score
    }
}

/// Packs `item_count` uniform cells into the available area.
///
/// Every column count is tried and the candidate with the largest cells wins. Penalties for
/// unused space, empty slots and lopsided grids (see [`crate::config::ScoreWeights`]) only
/// decide between candidates of equal cell area, so widening the area never shrinks the
/// cells. The result always fits inside the available area and the function never fails:
/// when nothing fits, a single column squeezed to the available height is returned instead.
pub fn solve_layout(request: &LayoutRequest, config: &LayoutConfig) -> LayoutGeometry {
    let count = request.item_count.max(1);
    let aspect = sanitize_aspect(request.aspect_ratio);
    let width = sanitize_extent(request.available_width);
    let height = sanitize_extent(request.available_height);

    let best = (1..=count)
        .filter_map(|columns| evaluate(columns, count, aspect, width, height, config))
        .fold(None::<Candidate>, |best, candidate| match best {
            Some(best) if !candidate.beats(&best) => Some(best),
            _ => Some(candidate),
        });

    let (grid, degenerate) = match best {
        Some(candidate) => (candidate.grid, false),
        None => {
            debug!(width, height, count, aspect, "no grid candidate fits; using single column");
            (single_column(count, aspect, height, config), true)
        }
    };

    let grid = fit_within(grid, width, height);
    let used_width = grid.used_width();
    let used_height = grid.used_height();
    let preferred_size =
        (!request.user_resized).then(|| preferred_container(used_width, used_height, config));

    LayoutGeometry {
        columns: grid.columns,
        rows: grid.rows,
        cell_width: grid.cell_width,
        cell_height: grid.cell_height,
        column_gap: grid.column_gap,
        row_gap: grid.row_gap,
        used_width,
        used_height,
        preferred_size,
        degenerate,
    }
}

fn sanitize_aspect(aspect: f64) -> f64 {
    if aspect.is_finite() {
        aspect.max(MIN_ASPECT_RATIO)
    } else {
        1.0
    }
}

fn sanitize_extent(extent: f64) -> f64 {
    if extent.is_finite() && extent > 0.0 {
        extent
    } else {
        0.0
    }
}

fn gap_for(extent: f64, divisions: usize, config: &LayoutConfig) -> f64 {
    if divisions <= 1 {
        return 0.0;
    }
    config.max_gap.min(config.gap_fraction * extent / divisions as f64).max(0.0)
}

fn evaluate(
    columns: usize,
    count: usize,
    aspect: f64,
    width: f64,
    height: f64,
    config: &LayoutConfig,
) -> Option<Candidate> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }

    let rows = count.div_ceil(columns);
    let column_gap = gap_for(width, columns, config);
    let row_gap = gap_for(height, rows, config);

    let column_budget = (width - (columns - 1) as f64 * column_gap) / columns as f64;
    let row_budget = (height - (rows - 1) as f64 * row_gap) / rows as f64;
    let cell_height = row_budget.min(column_budget / aspect);
    let cell_width = cell_height * aspect;

    if !(cell_width > 0.0 && cell_height > 0.0) {
        return None;
    }

    let grid = Grid { columns, rows, cell_width, cell_height, column_gap, row_gap };
    let used_width = grid.used_width();
    let used_height = grid.used_height();
    if used_width > width + config.tolerance || used_height > height + config.tolerance {
        return None;
    }

    let weights = config.weights;
    let area = count as f64 * cell_width * cell_height / (width * height);
    let fill = ((width - used_width).max(0.0) / width + (height - used_height).max(0.0) / height)
        / 2.0;
    let slots = (rows * columns) as f64;
    let empty = (slots - count as f64) / slots;
    let balance = columns.abs_diff(rows) as f64 / columns.max(rows) as f64;
    let score = -(weights.fill * fill + weights.empty_slot * empty + weights.balance * balance);

    Some(Candidate { grid, area, score })
}

fn single_column(count: usize, aspect: f64, height: f64, config: &LayoutConfig) -> Grid {
    let row_gap = gap_for(height, count, config);
    let cell_height = ((height - (count - 1) as f64 * row_gap) / count as f64).max(0.0);
    Grid {
        columns: 1,
        rows: count,
        cell_width: cell_height * aspect,
        cell_height,
        column_gap: 0.0,
        row_gap,
    }
}

fn fit_within(grid: Grid, width: f64, height: f64) -> Grid {
    let used_width = grid.used_width();
    let used_height = grid.used_height();
    let mut scale = 1.0_f64;
    if used_width > width && used_width > 0.0 {
        scale = scale.min(width / used_width);
    }
    if used_height > height && used_height > 0.0 {
        scale = scale.min(height / used_height);
    }
    if scale >= 1.0 {
        return grid;
    }
    Grid {
        cell_width: grid.cell_width * scale,
        cell_height: grid.cell_height * scale,
        column_gap: grid.column_gap * scale,
        row_gap: grid.row_gap * scale,
        ..grid
    }
}

fn preferred_container(used_width: f64, used_height: f64, config: &LayoutConfig) -> ContainerSize {
    let width = (used_width + 2.0 * config.padding)
        .max(config.min_container_width)
        .min(config.max_container_width);
    let height = (used_height + 2.0 * config.padding + config.footer_height)
        .max(config.min_container_height)
        .min(config.max_container_height);
    ContainerSize { width, height }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{solve_layout, LayoutRequest, MIN_ASPECT_RATIO};
    use crate::config::{LayoutConfig, ScoreWeights};

    const EPS: f64 = 1e-6;

    fn solve(width: f64, height: f64, count: usize, aspect: f64) -> super::LayoutGeometry {
        solve_layout(&LayoutRequest::new(width, height, count, aspect), &LayoutConfig::default())
    }

    #[rstest]
    fn geometry_invariants_hold_across_inputs(
        #[values(1, 2, 3, 4, 5, 7, 9, 16, 25, 64)] count: usize,
        #[values(0.5, 1.0, 1.5, 16.0 / 9.0)] aspect: f64,
        #[values((800.0, 600.0), (300.0, 900.0), (1920.0, 200.0), (40.0, 40.0), (3.0, 2.0))]
        area: (f64, f64),
    ) {
        let (width, height) = area;
        let geometry = solve(width, height, count, aspect);

        assert!(geometry.columns() >= 1);
        assert_eq!(geometry.rows(), count.div_ceil(geometry.columns()));
        assert!(geometry.cell_width() > 0.0 && geometry.cell_height() > 0.0);
        let ratio = geometry.cell_width() / geometry.cell_height();
        assert!((ratio - aspect).abs() <= aspect * 1e-9, "ratio {ratio} vs {aspect}");
        assert!(geometry.used_width() <= width + EPS, "{geometry:?}");
        assert!(geometry.used_height() <= height + EPS, "{geometry:?}");
    }

    #[test]
    fn identical_inputs_give_bit_identical_geometry() {
        let request = LayoutRequest::new(1033.0, 711.0, 11, 0.75);
        let config = LayoutConfig::default();
        let first = solve_layout(&request, &config);
        let second = solve_layout(&request, &config);
        assert_eq!(first.cell_width().to_bits(), second.cell_width().to_bits());
        assert_eq!(first.used_height().to_bits(), second.used_height().to_bits());
        assert_eq!(first, second);
    }

    #[rstest]
    fn widening_never_shrinks_cells(
        #[values(1, 2, 3, 4, 5, 7, 8, 13, 20, 30)] count: usize,
        #[values(0.5, 0.75, 1.0, 1.5, 16.0 / 9.0)] aspect: f64,
        #[values(200.0, 400.0, 600.0)] height: f64,
    ) {
        let config = LayoutConfig::default();
        let mut previous = 0.0_f64;
        for step in 0..300 {
            let width = 30.0 + step as f64 * 5.0;
            let geometry =
                solve_layout(&LayoutRequest::new(width, height, count, aspect), &config);
            assert!(
                geometry.cell_width() + EPS >= previous,
                "width {width}: {} < {previous}",
                geometry.cell_width()
            );
            previous = geometry.cell_width();
        }
    }

    #[rstest]
    #[case(ScoreWeights::area_only(), 3)]
    #[case(ScoreWeights { fill: 1.0, empty_slot: 0.0, balance: 0.0 }, 4)]
    fn penalties_only_split_equal_area_candidates(
        #[case] weights: ScoreWeights,
        #[case] columns: usize,
    ) {
        // Three and four columns both give two rows of 196px cells; five columns give
        // smaller cells and never win, whatever the weights.
        let config = LayoutConfig { weights, ..LayoutConfig::default() };
        let geometry = solve_layout(&LayoutRequest::new(1000.0, 400.0, 5, 1.0), &config);
        assert_eq!((geometry.columns(), geometry.rows()), (columns, 2));
        assert!((geometry.cell_width() - 196.0).abs() < EPS);
    }

    #[test]
    fn heavy_penalties_never_trade_cell_area() {
        let config = LayoutConfig {
            weights: ScoreWeights { fill: 50.0, empty_slot: 50.0, balance: 50.0 },
            ..LayoutConfig::default()
        };
        let request = LayoutRequest::new(65.0, 200.0, 3, 0.5);
        let weighted = solve_layout(&request, &config);
        let plain = solve_layout(&request, &LayoutConfig::default());
        assert!((weighted.cell_width() - plain.cell_width()).abs() < EPS);
    }

    #[test]
    fn wide_area_puts_square_items_in_one_row() {
        let geometry = solve(1000.0, 200.0, 4, 1.0);
        assert_eq!((geometry.columns(), geometry.rows()), (4, 1));
        assert!(!geometry.is_degenerate());
    }

    #[test]
    fn square_area_prefers_balanced_grid_for_four_items() {
        let geometry = solve(600.0, 600.0, 4, 1.0);
        assert_eq!((geometry.columns(), geometry.rows()), (2, 2));
    }

    #[test]
    fn zero_items_are_laid_out_as_one() {
        let geometry = solve(300.0, 300.0, 0, 1.0);
        assert_eq!((geometry.columns(), geometry.rows()), (1, 1));
        assert!((geometry.cell_width() - 300.0).abs() < EPS);
    }

    #[rstest]
    #[case(0.0)]
    #[case(-2.0)]
    #[case(f64::NAN)]
    fn malformed_aspect_ratio_is_clamped(#[case] aspect: f64) {
        let geometry = solve(300.0, 300.0, 2, aspect);
        assert!(geometry.cell_width() > 0.0);
        assert!(geometry.cell_width() / geometry.cell_height() >= MIN_ASPECT_RATIO * 0.999);
    }

    #[test]
    fn tiny_area_still_gets_a_fitting_grid() {
        let geometry = solve(10.0, 10.0, 6, 1.0);
        assert!(!geometry.is_degenerate());
        assert!(geometry.cell_width() > 10.0 / 6.0);
        assert!(geometry.used_width() <= 10.0 + EPS);
        assert!(geometry.used_height() <= 10.0 + EPS);
    }

    #[test]
    fn dense_batch_in_a_short_strip_gets_a_real_grid() {
        let geometry = solve(200.0, 60.0, 20, 1.0);
        assert!(!geometry.is_degenerate(), "{geometry:?}");
        assert!(geometry.columns() > 1);
        assert!(geometry.cell_width() > 10.0, "{geometry:?}");
        assert!(geometry.used_width() <= 200.0 + EPS);
        assert!(geometry.used_height() <= 60.0 + EPS);
    }

    #[test]
    fn zero_area_still_returns_geometry() {
        let geometry = solve(0.0, 0.0, 3, 1.0);
        assert!(geometry.is_degenerate());
        assert_eq!((geometry.columns(), geometry.rows()), (1, 3));
        assert_eq!(geometry.used_width(), 0.0);
    }

    #[test]
    fn gaps_never_exceed_the_configured_maximum() {
        let config = LayoutConfig::default();
        let geometry = solve(2000.0, 2000.0, 9, 1.0);
        assert!(geometry.column_gap() <= config.max_gap);
        assert!(geometry.row_gap() <= config.max_gap);

        let dense = solve(200.0, 200.0, 9, 1.0);
        assert!(dense.column_gap() <= 200.0 * config.gap_fraction / 3.0 + EPS);
    }

    #[test]
    fn preferred_size_adds_chrome_and_respects_band() {
        let config = LayoutConfig::default();
        let geometry = solve(400.0, 300.0, 1, 1.0);
        let preferred = geometry.preferred_size().expect("auto size");
        assert!((preferred.width - (geometry.used_width() + 2.0 * config.padding)).abs() < EPS);
        assert!(
            (preferred.height
                - (geometry.used_height() + 2.0 * config.padding + config.footer_height))
                .abs()
                < EPS
        );

        let small = solve(40.0, 40.0, 1, 1.0).preferred_size().expect("auto size");
        assert_eq!(small.width, config.min_container_width);
        assert_eq!(small.height, config.min_container_height);

        let huge = solve(5000.0, 5000.0, 1, 1.0).preferred_size().expect("auto size");
        assert_eq!(huge.width, config.max_container_width);
        assert_eq!(huge.height, config.max_container_height);
    }

    #[test]
    fn user_resized_suppresses_size_recommendation() {
        let request = LayoutRequest::new(400.0, 300.0, 5, 1.0).with_user_resized(true);
        let geometry = solve_layout(&request, &LayoutConfig::default());
        assert_eq!(geometry.preferred_size(), None);
        assert!(geometry.used_width() <= 400.0 + EPS);
    }

    #[test]
    fn cell_rects_walk_rows_left_to_right() {
        let geometry = solve(1000.0, 200.0, 4, 1.0);
        let first = geometry.cell_rect(0);
        let second = geometry.cell_rect(1);
        assert_eq!((first.x, first.y), (0.0, 0.0));
        assert!((second.x - (geometry.cell_width() + geometry.column_gap())).abs() < EPS);
        assert_eq!(second.y, 0.0);
    }
}
