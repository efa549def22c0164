//! The geometry capability a grid needs from each child.
//!
//! The visual tree owns the children; the grid only reads their placement,
//! asks them to measure along one axis, and skips collapsed ones.

use std::cell::RefCell;
use std::rc::Rc;

/// Visibility of a child in the visual tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    #[default]
    Visible,
    /// Not drawn, but still occupies space.
    Hidden,
    /// Not drawn and contributes nothing to layout.
    Collapsed,
}

/// Cell placement of a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPlacement {
    pub column: usize,
    pub row: usize,
    pub column_span: usize,
    pub row_span: usize,
}

impl Default for GridPlacement {
    fn default() -> Self {
        Self {
            column: 0,
            row: 0,
            column_span: 1,
            row_span: 1,
        }
    }
}

impl GridPlacement {
    /// Create a placement, clamping negative indices to 0 and spans to at least 1.
    pub fn new(column: i32, row: i32, column_span: i32, row_span: i32) -> Self {
        Self {
            column: column.max(0) as usize,
            row: row.max(0) as usize,
            column_span: column_span.max(1) as usize,
            row_span: row_span.max(1) as usize,
        }
    }

    /// Single cell at (column, row).
    pub fn cell(column: usize, row: usize) -> Self {
        Self {
            column,
            row,
            ..Self::default()
        }
    }
}

/// A child that can be laid out by a grid.
pub trait GridChild {
    /// Current visibility.
    fn visibility(&self) -> Visibility {
        Visibility::Visible
    }

    /// Cell the child occupies.
    fn placement(&self) -> GridPlacement;

    /// Move the child to another cell.
    fn set_placement(&mut self, placement: GridPlacement);

    /// Desired width for the given available width.
    fn measure_width(&self, available: i32) -> i32;

    /// Desired height for the given available height.
    fn measure_height(&self, available: i32) -> i32;
}

/// Shared child list. Layout runs on the UI thread only.
pub type ChildList = Rc<RefCell<Vec<Box<dyn GridChild>>>>;

/// Axis measurement strategy bound into a solver at construction.
pub type MeasureDelegate = fn(&dyn GridChild, i32) -> i32;

/// Axis placement extractor returning `(index, span)`.
pub type PlacementDelegate = fn(&GridPlacement) -> (usize, usize);

/// Wrap a vector of children into a shared list.
pub fn child_list(children: Vec<Box<dyn GridChild>>) -> ChildList {
    Rc::new(RefCell::new(children))
}

pub(crate) fn measure_width(child: &dyn GridChild, available: i32) -> i32 {
    child.measure_width(available)
}

pub(crate) fn measure_height(child: &dyn GridChild, available: i32) -> i32 {
    child.measure_height(available)
}

pub(crate) fn column_and_span(placement: &GridPlacement) -> (usize, usize) {
    (placement.column, placement.column_span)
}

pub(crate) fn row_and_span(placement: &GridPlacement) -> (usize, usize) {
    (placement.row, placement.row_span)
}
