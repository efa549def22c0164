//! # Dimension Solver
//!
//! Track sizing along a single axis.
//!
//! ## Algorithm
//!
//! Sizes are resolved in three ordered phases, each re-run only when dirty:
//!
//! 1. **Fixed**: literal pixel sizes are copied into place.
//! 2. **Auto**: every child covering a content-sized track is measured against
//!    the space left after fixed tracks and spacing; tracks only grow.
//! 3. **Star**: the space left after fixed and auto tracks is split by weight.
//!    The last star track takes the rounding remainder so nothing is lost.
//!
//! Positions are then assigned from an anchor. Start and center anchors lay
//! tracks out forward from the origin; the end anchor lays them out backward
//! from the far edge, keeping declaration order left-to-right.

use std::fmt;

use tracing::{debug, error, trace};

use crate::child::{ChildList, GridChild, MeasureDelegate, PlacementDelegate, Visibility};
use crate::track::{parse_tracks, TrackClassification};
use crate::UpdateInfo;

/// Where the occupied extent is anchored inside the available extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    /// Origin at 0, laid out forward.
    #[default]
    Start,
    /// Centered in the available extent, laid out forward.
    Center,
    /// Anchored at the far edge, laid out backward.
    End,
}

/// Sizes and positions of the tracks along one axis.
pub struct DimensionSolver {
    axis: &'static str,
    classification: TrackClassification,

    sizes: Vec<i32>,
    positions: Vec<i32>,

    update_info: UpdateInfo,

    fixed_total: i32,
    auto_total: i32,
    star_total: i32,
    current_size: i32,
    total_spacing: i32,

    values: String,
    spacing: i32,
    number_of_values: usize,

    /// Far edge of the bounds (right or bottom).
    bounds_max: i32,
    /// Extent of the bounds (width or height).
    bounds_size: i32,

    anchor: Anchor,
    forward: bool,

    children: Option<ChildList>,
    measure: MeasureDelegate,
    placement: PlacementDelegate,
}

impl fmt::Debug for DimensionSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DimensionSolver")
            .field("axis", &self.axis)
            .field("values", &self.values)
            .field("sizes", &self.sizes)
            .field("positions", &self.positions)
            .field("update_info", &self.update_info)
            .field("spacing", &self.spacing)
            .field("bounds_size", &self.bounds_size)
            .field("bounds_max", &self.bounds_max)
            .field("anchor", &self.anchor)
            .field(
                "children",
                &self.children.as_ref().map(|c| c.borrow().len()),
            )
            .finish()
    }
}

impl DimensionSolver {
    /// Create a solver bound to one axis through its measurement and placement delegates.
    pub fn new(axis: &'static str, measure: MeasureDelegate, placement: PlacementDelegate) -> Self {
        Self {
            axis,
            classification: TrackClassification::default(),
            sizes: Vec::new(),
            positions: Vec::new(),
            update_info: UpdateInfo::dirty(0),
            fixed_total: 0,
            auto_total: 0,
            star_total: 0,
            current_size: 0,
            total_spacing: 0,
            values: String::new(),
            spacing: 0,
            number_of_values: 0,
            bounds_max: 0,
            bounds_size: 0,
            anchor: Anchor::Start,
            forward: true,
            children: None,
            measure,
            placement,
        }
    }

    // ==================== Inputs ====================

    /// Replace the track definition string.
    pub fn set_values(&mut self, value: &str) {
        if self.values == value {
            return;
        }

        let (classification, parsed) = parse_tracks(&self.values, value);
        let count_changed = parsed.number_of_cells != self.number_of_values;

        self.classification = classification;
        self.number_of_values = parsed.number_of_cells;
        self.values = if self.number_of_values == 0 {
            String::new()
        } else {
            value.to_string()
        };

        self.update_info.merge(&parsed);
        if count_changed {
            self.update_info.set_all(true);
        }
        self.update_info.cascade();

        self.update_spacing();
        self.resolve();
    }

    /// Set the spacing between adjacent tracks.
    pub fn set_spacing(&mut self, value: i32) {
        if self.spacing == value {
            return;
        }
        self.spacing = value;
        self.update_spacing();
        self.update_info.update_auto_star();
        self.resolve();
    }

    /// Attach a new child list (or detach with `None`).
    pub fn set_children(&mut self, children: Option<ChildList>) {
        let same = match (&self.children, &children) {
            (Some(a), Some(b)) => std::rc::Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if same {
            return;
        }
        self.children = children;
        self.update_info.update_auto_star();
        self.resolve();
    }

    /// Children were added, removed or changed in place.
    pub fn invalidate_children(&mut self) {
        self.update_info.update_auto_star();
        self.resolve();
    }

    /// Set the available extent and the far edge of the bounds.
    pub fn set_bounds(&mut self, size: i32, max: i32) {
        if self.bounds_size == size && self.bounds_max == max {
            return;
        }
        let resized = self.bounds_size != size;
        self.bounds_size = size;
        self.bounds_max = max;

        if resized {
            self.update_info.update_auto_star();
            self.resolve();
        } else {
            self.reposition();
        }
    }

    /// Change the anchor. Only positions are recomputed.
    pub fn set_anchor(&mut self, anchor: Anchor) {
        if self.anchor == anchor {
            return;
        }
        self.anchor = anchor;
        self.reposition();
    }

    /// Total occupied extent for the given available extent.
    ///
    /// Used by the measure pass of the owning container. The available extent
    /// becomes the new bounds size.
    pub fn size_for(&mut self, available: i32) -> i32 {
        if self.bounds_size != available {
            self.bounds_size = available;
            self.update_info.update_auto_star();
            self.resolve();
        }
        self.current_size
    }

    // ==================== Outputs ====================

    pub fn sizes(&self) -> &[i32] {
        &self.sizes
    }

    pub fn positions(&self) -> &[i32] {
        &self.positions
    }

    pub fn number_of_values(&self) -> usize {
        self.number_of_values
    }

    pub fn values(&self) -> &str {
        &self.values
    }

    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    pub fn anchor(&self) -> Anchor {
        self.anchor
    }

    /// Occupied extent including spacing from the last resolve.
    pub fn current_size(&self) -> i32 {
        self.current_size
    }

    /// Whether positions were assigned forward from the origin.
    /// Backward positions are already relative to the far edge's coordinate space.
    pub fn is_forward(&self) -> bool {
        self.forward
    }

    pub fn bounds_size(&self) -> i32 {
        self.bounds_size
    }

    pub fn bounds_max(&self) -> i32 {
        self.bounds_max
    }

    pub fn update_info(&self) -> &UpdateInfo {
        &self.update_info
    }

    pub fn classification(&self) -> &TrackClassification {
        &self.classification
    }

    // ==================== Solving ====================

    fn effective_spacing(&self) -> i32 {
        self.spacing.max(0)
    }

    fn update_spacing(&mut self) {
        let gaps = self.number_of_values.saturating_sub(1) as i32;
        self.total_spacing = gaps.saturating_mul(self.effective_spacing());
    }

    fn resize_tracks(&mut self) {
        self.sizes.resize(self.number_of_values, 0);
        self.positions.resize(self.number_of_values, 0);
    }

    /// Re-run every dirty phase, then positions.
    fn resolve(&mut self) {
        if !self.update_info.need_update() {
            trace!(axis = self.axis, "dimension up to date");
            return;
        }

        self.resize_tracks();

        if self.bounds_size <= 0 {
            self.sizes.fill(0);
            self.positions.fill(0);
            self.fixed_total = 0;
            self.auto_total = 0;
            self.star_total = 0;
            self.current_size = 0;
            // Zeroed sizes are not real results; everything runs again once space arrives.
            self.update_info.set_all(true);
            trace!(axis = self.axis, bounds = self.bounds_size, "no space, tracks collapsed");
            return;
        }

        self.update_fixed();

        let mut rest = self
            .bounds_size
            .saturating_sub(self.total_spacing)
            .saturating_sub(self.fixed_total)
            .max(0);
        self.update_auto(rest);

        rest = rest.saturating_sub(self.auto_total).max(0);
        self.update_star(rest);

        let total = self
            .fixed_total
            .saturating_add(self.auto_total)
            .saturating_add(self.star_total)
            .saturating_add(self.total_spacing);
        self.update_positions(total);
        self.current_size = total;
        self.update_info.number_of_cells = self.number_of_values;

        debug!(
            axis = self.axis,
            tracks = self.number_of_values,
            fixed = self.fixed_total,
            auto = self.auto_total,
            star = self.star_total,
            spacing = self.total_spacing,
            total,
            "resolved dimension"
        );
    }

    /// Recompute positions from the current sizes.
    fn reposition(&mut self) {
        if self.update_info.need_update() || self.bounds_size <= 0 {
            self.resolve();
            return;
        }
        self.update_positions(self.current_size);
    }

    fn update_fixed(&mut self) {
        if !self.update_info.update_fixed {
            return;
        }

        self.fixed_total = 0;
        for (&index, &px) in &self.classification.fixed {
            let px = px.max(0);
            self.sizes[index] = px;
            self.fixed_total = self.fixed_total.saturating_add(px);
        }

        trace!(axis = self.axis, total = self.fixed_total, "fixed tracks sized");
        self.update_info.update_fixed = false;
    }

    fn update_auto(&mut self, available: i32) {
        if !self.update_info.update_auto {
            return;
        }

        for &index in &self.classification.auto {
            debug_assert!(
                index < self.sizes.len(),
                "auto track {index} outside {} sizes",
                self.sizes.len()
            );
            if index >= self.sizes.len() {
                error!(axis = self.axis, index, "auto track index outside size list");
                continue;
            }
            self.sizes[index] = 0;
        }

        if !self.classification.auto.is_empty() {
            if let Some(children) = self.children.clone() {
                let children = children.borrow();
                for child in children.iter() {
                    if child.visibility() == Visibility::Collapsed {
                        continue;
                    }
                    let (index, span) = (self.placement)(&child.placement());
                    self.contribute(child.as_ref(), index, span, available);
                }
            }
        }

        self.auto_total = self
            .classification
            .auto
            .iter()
            .filter_map(|&index| self.sizes.get(index))
            .fold(0i32, |total, &size| total.saturating_add(size));

        trace!(axis = self.axis, available, total = self.auto_total, "auto tracks sized");
        self.update_info.update_auto = false;
    }

    /// Grow the auto tracks covered by one child to fit its measured size.
    fn contribute(&mut self, child: &dyn GridChild, index: usize, span: usize, available: i32) {
        let count = self.sizes.len();
        if index >= count {
            trace!(axis = self.axis, index, count, "child outside tracks, skipped");
            return;
        }
        let end = index.saturating_add(span.max(1)).min(count);

        let covered: Vec<usize> = (index..end)
            .filter(|i| self.classification.auto.contains(i))
            .collect();
        if covered.is_empty() {
            return;
        }

        let measured = (self.measure)(child, available).max(0);

        // Star tracks are sized after this phase and provide nothing yet.
        let gaps = (end - index - 1) as i32;
        let allocated = (index..end)
            .filter(|i| !self.classification.star.contains_key(i))
            .fold(self.effective_spacing().saturating_mul(gaps), |total, i| {
                total.saturating_add(self.sizes[i])
            });

        let excess = measured.saturating_sub(allocated);
        if excess <= 0 {
            return;
        }

        trace!(axis = self.axis, index, span, measured, excess, "growing auto tracks");
        distribute(&mut self.sizes, &covered, excess);
    }

    fn update_star(&mut self, rest: i32) {
        if !self.update_info.update_star {
            return;
        }

        self.star_total = 0;
        let rest = rest.max(0);

        if let Some(&last) = self.classification.star.keys().next_back() {
            // Huge weights are taken relative to the largest so the sum stays finite.
            let scale = if self.classification.star_weight().is_finite() {
                1.0
            } else {
                self.classification
                    .star
                    .values()
                    .fold(1.0, |largest: f64, &weight| largest.max(weight))
            };
            let total_weight: f64 = self
                .classification
                .star
                .values()
                .map(|&weight| weight / scale)
                .sum();
            let mut assigned = 0i32;

            for (&index, &weight) in &self.classification.star {
                if index == last {
                    continue;
                }
                let share = (rest as f64) * (weight / scale) / total_weight;
                let size = (share.floor().max(0.0) as i32).min(rest - assigned);
                self.sizes[index] = size;
                assigned += size;
            }

            self.sizes[last] = (rest - assigned).max(0);
            self.star_total = assigned + self.sizes[last];
        }

        trace!(axis = self.axis, rest, total = self.star_total, "star tracks sized");
        self.update_info.update_star = false;
    }

    fn start(&self, total: i32) -> (i32, bool) {
        match self.anchor {
            Anchor::Start => (0, true),
            Anchor::Center => ((self.bounds_size.saturating_sub(total) / 2).max(0), true),
            Anchor::End => (self.bounds_max.max(0), false),
        }
    }

    fn update_positions(&mut self, total: i32) {
        let (start, forward) = self.start(total);
        let spacing = self.effective_spacing();
        self.forward = forward;

        let mut cursor = start;
        if forward {
            for (position, size) in self.positions.iter_mut().zip(&self.sizes) {
                *position = cursor;
                cursor = cursor.saturating_add(*size).saturating_add(spacing);
            }
        } else {
            for (position, size) in self.positions.iter_mut().zip(&self.sizes).rev() {
                *position = cursor.saturating_sub(*size);
                cursor = cursor.saturating_sub(*size).saturating_sub(spacing);
            }
        }
    }
}

/// Spread `excess` over the `covered` tracks, growing them only.
///
/// Shares follow the tracks' current sizes, or are even when all are zero.
/// The last covered track takes the rounding remainder.
fn distribute(sizes: &mut [i32], covered: &[usize], excess: i32) {
    let Some((&last, rest)) = covered.split_last() else {
        return;
    };

    let current: i64 = covered.iter().map(|&i| sizes[i] as i64).sum();
    let count = covered.len() as i64;
    let mut given = 0i64;

    for &i in rest {
        let share = if current > 0 {
            excess as i64 * sizes[i] as i64 / current
        } else {
            excess as i64 / count
        };
        sizes[i] = sizes[i].saturating_add(share as i32);
        given += share;
    }
    sizes[last] = sizes[last].saturating_add((excess as i64 - given) as i32);
}
