//! # Grid Container
//!
//! The element that owns a [`Grid`], its children and the grid-related
//! properties. It runs the measure and arrange passes for the visual tree.
//!
//! Every property lives in a flat [`GridConfig`]. A setter assigns the value,
//! runs the container's own hook (which pushes the value into the grid), and
//! then notifies registered [`PropertyObserver`]s in registration order.
//! Assigning an equal value does nothing.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::axis::{HorizontalAlignment, VerticalAlignment};
use crate::child::{child_list, ChildList, GridChild, GridPlacement, Visibility};
use crate::grid::Grid;
use crate::track::{TrackList, TrackSize};
use crate::{Bounds, LayoutError};

/// A grid property that changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridProperty {
    Columns,
    Rows,
    ColumnSpacing,
    RowSpacing,
    HorizontalAlignment,
    VerticalAlignment,
    Scale,
    Orientation,
    Children,
}

/// Receives property change notifications from a [`GridContainer`].
///
/// Called after the container has applied the change to its grid.
pub trait PropertyObserver {
    fn on_changed(&mut self, property: GridProperty, config: &GridConfig, grid: &Grid);
}

impl<F> PropertyObserver for F
where
    F: FnMut(GridProperty, &GridConfig, &Grid),
{
    fn on_changed(&mut self, property: GridProperty, config: &GridConfig, grid: &Grid) {
        self(property, config, grid)
    }
}

/// Stacking axis for a container used as a one-dimensional stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Child order along the stacking axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrientationDirection {
    #[default]
    Normal,
    Reverse,
}

/// Grid container configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct GridConfig {
    /// Column track definitions.
    pub columns: String,
    /// Row track definitions.
    pub rows: String,
    /// Logical spacing between columns, scaled by `scale_x`.
    pub column_spacing: i32,
    /// Logical spacing between rows, scaled by `scale_y`.
    pub row_spacing: i32,
    pub horizontal_alignment: HorizontalAlignment,
    pub vertical_alignment: VerticalAlignment,
    /// Horizontal DPI scale.
    pub scale_x: f32,
    /// Vertical DPI scale.
    pub scale_y: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            columns: "*".to_string(),
            rows: "*".to_string(),
            column_spacing: 0,
            row_spacing: 0,
            horizontal_alignment: HorizontalAlignment::Stretch,
            vertical_alignment: VerticalAlignment::Stretch,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl GridConfig {
    /// Check track strings and scales, rejecting anything the lenient path would degrade.
    pub fn validate(&self) -> Result<(), LayoutError> {
        TrackList::parse_strict(&self.columns)?;
        TrackList::parse_strict(&self.rows)?;
        for (name, scale) in [("scale_x", self.scale_x), ("scale_y", self.scale_y)] {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(LayoutError::InvalidConfig(format!(
                    "{name} must be a positive number, got {scale}"
                )));
            }
        }
        Ok(())
    }

    fn scaled_column_spacing(&self) -> i32 {
        (self.column_spacing as f32 * self.scale_x).round() as i32
    }

    fn scaled_row_spacing(&self) -> i32 {
        (self.row_spacing as f32 * self.scale_y).round() as i32
    }
}

/// Stack mode state.
#[derive(Debug, Clone, Copy, PartialEq)]
struct StackMode {
    orientation: Orientation,
    direction: OrientationDirection,
    track: TrackSize,
}

/// A container laying out its children in a grid.
pub struct GridContainer {
    config: GridConfig,
    stack: Option<StackMode>,
    children: ChildList,
    grid: Grid,
    observers: Vec<Box<dyn PropertyObserver>>,
}

impl fmt::Debug for GridContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridContainer")
            .field("config", &self.config)
            .field("stack", &self.stack)
            .field("children", &self.children.borrow().len())
            .field("grid", &self.grid)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Default for GridContainer {
    fn default() -> Self {
        Self::new(GridConfig::default())
    }
}

impl GridContainer {
    /// Create a container from a configuration.
    ///
    /// Children are attached first, then tracks, then spacing, so each
    /// setter resolves with everything it depends on already in place.
    pub fn new(config: GridConfig) -> Self {
        let children = child_list(Vec::new());
        let mut grid = Grid::new();
        grid.set_children(Some(children.clone()));
        grid.set_columns(&config.columns);
        grid.set_rows(&config.rows);
        grid.set_column_spacing(config.scaled_column_spacing());
        grid.set_row_spacing(config.scaled_row_spacing());
        grid.set_horizontal_alignment(config.horizontal_alignment);
        grid.set_vertical_alignment(config.vertical_alignment);

        Self {
            config,
            stack: None,
            children,
            grid,
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn children(&self) -> &ChildList {
        &self.children
    }

    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    /// Register an observer. Observers are notified in registration order.
    pub fn subscribe(&mut self, observer: Box<dyn PropertyObserver>) {
        self.observers.push(observer);
    }

    fn notify(&mut self, property: GridProperty) {
        trace!(?property, observers = self.observers.len(), "grid property changed");
        for observer in &mut self.observers {
            observer.on_changed(property, &self.config, &self.grid);
        }
    }

    // ==================== Properties ====================

    pub fn set_columns(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.config.columns == value {
            return;
        }
        self.config.columns = value;
        self.on_columns_changed();
        self.notify(GridProperty::Columns);
    }

    pub fn set_rows(&mut self, value: impl Into<String>) {
        let value = value.into();
        if self.config.rows == value {
            return;
        }
        self.config.rows = value;
        self.on_rows_changed();
        self.notify(GridProperty::Rows);
    }

    pub fn set_column_spacing(&mut self, value: i32) {
        if self.config.column_spacing == value {
            return;
        }
        self.config.column_spacing = value;
        self.on_column_spacing_changed();
        self.notify(GridProperty::ColumnSpacing);
    }

    pub fn set_row_spacing(&mut self, value: i32) {
        if self.config.row_spacing == value {
            return;
        }
        self.config.row_spacing = value;
        self.on_row_spacing_changed();
        self.notify(GridProperty::RowSpacing);
    }

    pub fn set_horizontal_alignment(&mut self, value: HorizontalAlignment) {
        if self.config.horizontal_alignment == value {
            return;
        }
        self.config.horizontal_alignment = value;
        self.grid.set_horizontal_alignment(value);
        self.notify(GridProperty::HorizontalAlignment);
    }

    pub fn set_vertical_alignment(&mut self, value: VerticalAlignment) {
        if self.config.vertical_alignment == value {
            return;
        }
        self.config.vertical_alignment = value;
        self.grid.set_vertical_alignment(value);
        self.notify(GridProperty::VerticalAlignment);
    }

    /// Set the DPI scale applied to spacing. Non-positive scales are ignored.
    pub fn set_scale(&mut self, scale_x: f32, scale_y: f32) {
        if !(scale_x.is_finite() && scale_y.is_finite() && scale_x > 0.0 && scale_y > 0.0) {
            warn!(scale_x, scale_y, "ignoring invalid scale");
            return;
        }
        if self.config.scale_x == scale_x && self.config.scale_y == scale_y {
            return;
        }
        self.config.scale_x = scale_x;
        self.config.scale_y = scale_y;
        self.on_column_spacing_changed();
        self.on_row_spacing_changed();
        self.notify(GridProperty::Scale);
    }

    fn on_columns_changed(&mut self) {
        self.grid.set_columns(&self.config.columns);
    }

    fn on_rows_changed(&mut self) {
        self.grid.set_rows(&self.config.rows);
    }

    fn on_column_spacing_changed(&mut self) {
        self.grid.set_column_spacing(self.config.scaled_column_spacing());
    }

    fn on_row_spacing_changed(&mut self) {
        self.grid.set_row_spacing(self.config.scaled_row_spacing());
    }

    // ==================== Children ====================

    /// Append a child.
    pub fn add_child(&mut self, child: Box<dyn GridChild>) {
        self.children.borrow_mut().push(child);
        self.on_children_changed();
        self.notify(GridProperty::Children);
    }

    /// Remove the child at `index`.
    pub fn remove_child(&mut self, index: usize) -> Option<Box<dyn GridChild>> {
        let removed = {
            let mut children = self.children.borrow_mut();
            (index < children.len()).then(|| children.remove(index))
        };
        if removed.is_some() {
            self.on_children_changed();
            self.notify(GridProperty::Children);
        }
        removed
    }

    /// Move a child to another cell.
    pub fn set_child_placement(&mut self, index: usize, placement: GridPlacement) -> bool {
        let moved = match self.children.borrow_mut().get_mut(index) {
            Some(child) if child.placement() != placement => {
                child.set_placement(placement);
                true
            }
            _ => false,
        };
        if moved {
            self.grid.invalidate_children();
            self.notify(GridProperty::Children);
        }
        moved
    }

    /// Children were changed in place (visibility, content size).
    pub fn invalidate_children(&mut self) {
        self.grid.invalidate_children();
    }

    fn on_children_changed(&mut self) {
        if self.stack.is_some() {
            self.update_stack();
        }
        self.grid.invalidate_children();
    }

    // ==================== Stack mode ====================

    /// Lay children out as a one-dimensional stack along `orientation`.
    ///
    /// Each child gets its own track of `track` size along the stacking axis
    /// (`Auto` by default); the cross axis is a single star track.
    pub fn set_orientation(&mut self, orientation: Orientation, direction: OrientationDirection) {
        let track = self.stack.map_or(TrackSize::Auto, |stack| stack.track);
        self.set_stack(orientation, direction, track);
    }

    /// Change the track size used for every stacked child.
    pub fn set_stack_track(&mut self, track: TrackSize) {
        let (orientation, direction) = self
            .stack
            .map_or((Orientation::default(), OrientationDirection::default()), |stack| {
                (stack.orientation, stack.direction)
            });
        self.set_stack(orientation, direction, track);
    }

    fn set_stack(&mut self, orientation: Orientation, direction: OrientationDirection, track: TrackSize) {
        let mode = StackMode {
            orientation,
            direction,
            track,
        };
        if self.stack == Some(mode) {
            return;
        }
        self.stack = Some(mode);
        self.update_stack();
        self.grid.invalidate_children();
        self.notify(GridProperty::Orientation);
    }

    /// Leave stack mode. Tracks and placements stay as they are.
    pub fn clear_orientation(&mut self) {
        if self.stack.take().is_some() {
            self.notify(GridProperty::Orientation);
        }
    }

    pub fn orientation(&self) -> Option<(Orientation, OrientationDirection)> {
        self.stack.map(|stack| (stack.orientation, stack.direction))
    }

    fn update_stack(&mut self) {
        let Some(stack) = self.stack else {
            return;
        };

        let count = self.children.borrow().len();
        let main = TrackList {
            tracks: vec![stack.track; count],
        }
        .to_string();

        match stack.orientation {
            Orientation::Horizontal => {
                self.config.columns = main;
                self.config.rows = "*".to_string();
            }
            Orientation::Vertical => {
                self.config.columns = "*".to_string();
                self.config.rows = main;
            }
        }

        for (i, child) in self.children.borrow_mut().iter_mut().enumerate() {
            let index = match stack.direction {
                OrientationDirection::Normal => i,
                OrientationDirection::Reverse => count - 1 - i,
            };
            let placement = match stack.orientation {
                Orientation::Horizontal => GridPlacement::cell(index, 0),
                Orientation::Vertical => GridPlacement::cell(0, index),
            };
            child.set_placement(placement);
        }

        self.on_columns_changed();
        self.on_rows_changed();
        trace!(?stack.orientation, ?stack.direction, count, "stack placements updated");
    }

    // ==================== Layout passes ====================

    /// Width this container needs for the given available width.
    pub fn measure_width(&mut self, available: i32) -> i32 {
        self.grid.width_for(available)
    }

    /// Height this container needs for the given available height.
    pub fn measure_height(&mut self, available: i32) -> i32 {
        self.grid.height_for(available)
    }

    /// Lay out the grid in `bounds` and return one rectangle per child.
    ///
    /// Children that are not visible get `None`.
    pub fn arrange(&mut self, bounds: Bounds) -> Vec<Option<Bounds>> {
        self.grid.set_bounds(&bounds);

        let columns = self.grid.columns();
        let rows = self.grid.rows();
        let column_axis = AxisView {
            sizes: columns.column_widths(),
            positions: columns.column_positions(),
            spacing: columns.column_spacing().max(0),
            forward: columns.solver().is_forward(),
        };
        let row_axis = AxisView {
            sizes: rows.row_heights(),
            positions: rows.row_positions(),
            spacing: rows.row_spacing().max(0),
            forward: rows.solver().is_forward(),
        };

        let children = self.children.borrow();
        let rects: Vec<Option<Bounds>> = children
            .iter()
            .map(|child| {
                if child.visibility() != Visibility::Visible {
                    return None;
                }
                let placement = child.placement();
                let (x, width) = column_axis.extent(
                    placement.column,
                    placement.column_span,
                    bounds.x,
                    bounds.width,
                );
                let (y, height) =
                    row_axis.extent(placement.row, placement.row_span, bounds.y, bounds.height);
                Some(Bounds::new(x, y, width, height))
            })
            .collect();

        debug!(
            children = rects.len(),
            columns = column_axis.sizes.len(),
            rows = row_axis.sizes.len(),
            "arranged grid container"
        );
        rects
    }
}

/// Resolved tracks of one axis, read during arrange.
struct AxisView<'a> {
    sizes: &'a [i32],
    positions: &'a [i32],
    spacing: i32,
    forward: bool,
}

impl AxisView<'_> {
    /// Offset and extent of a child covering `span` tracks from `index`.
    ///
    /// No tracks means the child gets the whole extent. An index past the
    /// last track is clamped onto it.
    fn extent(&self, index: usize, span: usize, origin: i32, available: i32) -> (i32, i32) {
        let available = available.max(0);
        let Some(last) = self.sizes.len().checked_sub(1) else {
            return (origin, available);
        };

        let start = index.min(last);
        let end = index
            .saturating_add(span.max(1))
            .min(self.sizes.len())
            .max(start + 1);

        let offset = if self.forward {
            origin.saturating_add(self.positions[start])
        } else {
            self.positions[start]
        };

        let gaps = (end - start - 1) as i32;
        let size = self.sizes[start..end]
            .iter()
            .fold(self.spacing.saturating_mul(gaps), |total, &size| {
                total.saturating_add(size)
            });

        (offset, size.clamp(0, available))
    }
}

/// Builder for [`GridContainer`].
#[derive(Default)]
pub struct GridBuilder {
    config: GridConfig,
    children: Vec<Box<dyn GridChild>>,
    observers: Vec<Box<dyn PropertyObserver>>,
    stack: Option<(Orientation, OrientationDirection)>,
}

impl GridBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(config: GridConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Set the column track definitions.
    pub fn columns(mut self, columns: impl Into<String>) -> Self {
        self.config.columns = columns.into();
        self
    }

    /// Set the row track definitions.
    pub fn rows(mut self, rows: impl Into<String>) -> Self {
        self.config.rows = rows.into();
        self
    }

    pub fn column_spacing(mut self, spacing: i32) -> Self {
        self.config.column_spacing = spacing;
        self
    }

    pub fn row_spacing(mut self, spacing: i32) -> Self {
        self.config.row_spacing = spacing;
        self
    }

    /// Set both spacings.
    pub fn spacing(self, spacing: i32) -> Self {
        self.column_spacing(spacing).row_spacing(spacing)
    }

    pub fn horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.config.horizontal_alignment = alignment;
        self
    }

    pub fn vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.config.vertical_alignment = alignment;
        self
    }

    pub fn scale(mut self, scale_x: f32, scale_y: f32) -> Self {
        self.config.scale_x = scale_x;
        self.config.scale_y = scale_y;
        self
    }

    /// Use the container as a one-dimensional stack.
    pub fn orientation(mut self, orientation: Orientation, direction: OrientationDirection) -> Self {
        self.stack = Some((orientation, direction));
        self
    }

    pub fn child(mut self, child: Box<dyn GridChild>) -> Self {
        self.children.push(child);
        self
    }

    pub fn observer(mut self, observer: Box<dyn PropertyObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Validate the configuration and build the container.
    pub fn build(self) -> Result<GridContainer, LayoutError> {
        self.config.validate()?;

        let mut container = GridContainer::new(self.config);
        container.children.borrow_mut().extend(self.children);
        if let Some((orientation, direction)) = self.stack {
            container.set_orientation(orientation, direction);
        }
        container.grid.invalidate_children();
        container.observers = self.observers;
        Ok(container)
    }
}
