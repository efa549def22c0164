//! Two-axis grid made of one column solver and one row solver.
//!
//! The axes are independent: auto columns are measured against the available
//! height passed down by the container, never against the final row heights.
//! Content whose width depends on its height (wrapped text) is therefore
//! measured against the available extent only.

use crate::axis::{GridColumns, GridRows, HorizontalAlignment, VerticalAlignment};
use crate::child::ChildList;
use crate::Bounds;

/// Column and row layout for a set of children.
#[derive(Debug, Default)]
pub struct Grid {
    columns: GridColumns,
    rows: GridRows,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward the bounds to both axes.
    pub fn set_bounds(&mut self, bounds: &Bounds) {
        self.columns.set_bounds(bounds);
        self.rows.set_bounds(bounds);
    }

    /// Forward the child list to both axes.
    pub fn set_children(&mut self, children: Option<ChildList>) {
        self.columns.set_children(children.clone());
        self.rows.set_children(children);
    }

    /// Children changed in place; re-measure both axes.
    pub fn invalidate_children(&mut self) {
        self.columns.invalidate_children();
        self.rows.invalidate_children();
    }

    pub fn set_columns(&mut self, value: &str) {
        self.columns.set_columns(value);
    }

    pub fn set_rows(&mut self, value: &str) {
        self.rows.set_rows(value);
    }

    pub fn set_column_spacing(&mut self, value: i32) {
        self.columns.set_column_spacing(value);
    }

    pub fn set_row_spacing(&mut self, value: i32) {
        self.rows.set_row_spacing(value);
    }

    pub fn set_horizontal_alignment(&mut self, alignment: HorizontalAlignment) {
        self.columns.set_horizontal_alignment(alignment);
    }

    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) {
        self.rows.set_vertical_alignment(alignment);
    }

    pub fn width_for(&mut self, available: i32) -> i32 {
        self.columns.width_for(available)
    }

    pub fn height_for(&mut self, available: i32) -> i32 {
        self.rows.height_for(available)
    }

    pub fn columns(&self) -> &GridColumns {
        &self.columns
    }

    pub fn rows(&self) -> &GridRows {
        &self.rows
    }

    pub fn column_widths(&self) -> &[i32] {
        self.columns.column_widths()
    }

    pub fn column_positions(&self) -> &[i32] {
        self.columns.column_positions()
    }

    pub fn row_heights(&self) -> &[i32] {
        self.rows.row_heights()
    }

    pub fn row_positions(&self) -> &[i32] {
        self.rows.row_positions()
    }

    pub fn number_of_columns(&self) -> usize {
        self.columns.number_of_columns()
    }

    pub fn number_of_rows(&self) -> usize {
        self.rows.number_of_rows()
    }
}
