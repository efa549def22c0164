//! Column and row bindings of the dimension solver.
//!
//! Each adapter supplies the axis-specific pieces: which measurement the
//! children perform, how the axis alignment maps onto an anchor, and which
//! part of a child's placement addresses this axis. Everything else is shared.

use crate::child::{self, ChildList};
use crate::dimension::{Anchor, DimensionSolver};
use crate::Bounds;

/// Horizontal content alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    Left,
    Center,
    Right,
    #[default]
    Stretch,
}

impl HorizontalAlignment {
    /// Anchor used for column positions.
    pub fn anchor(self) -> Anchor {
        match self {
            HorizontalAlignment::Left | HorizontalAlignment::Stretch => Anchor::Start,
            HorizontalAlignment::Center => Anchor::Center,
            HorizontalAlignment::Right => Anchor::End,
        }
    }
}

/// Vertical content alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    Top,
    Center,
    Bottom,
    #[default]
    Stretch,
}

impl VerticalAlignment {
    /// Anchor used for row positions.
    pub fn anchor(self) -> Anchor {
        match self {
            VerticalAlignment::Top | VerticalAlignment::Stretch => Anchor::Start,
            VerticalAlignment::Center => Anchor::Center,
            VerticalAlignment::Bottom => Anchor::End,
        }
    }
}

/// Column sizing for a grid.
#[derive(Debug)]
pub struct GridColumns {
    solver: DimensionSolver,
    alignment: HorizontalAlignment,
}

impl Default for GridColumns {
    fn default() -> Self {
        Self::new()
    }
}

impl GridColumns {
    pub fn new() -> Self {
        Self {
            solver: DimensionSolver::new("columns", child::measure_width, child::column_and_span),
            alignment: HorizontalAlignment::default(),
        }
    }

    /// Use the width and right edge of `bounds`.
    pub fn set_bounds(&mut self, bounds: &Bounds) {
        self.solver.set_bounds(bounds.width, bounds.right());
    }

    pub fn set_children(&mut self, children: Option<ChildList>) {
        self.solver.set_children(children);
    }

    pub fn invalidate_children(&mut self) {
        self.solver.invalidate_children();
    }

    pub fn set_columns(&mut self, value: &str) {
        self.solver.set_values(value);
    }

    pub fn columns(&self) -> &str {
        self.solver.values()
    }

    pub fn set_column_spacing(&mut self, value: i32) {
        self.solver.set_spacing(value);
    }

    pub fn column_spacing(&self) -> i32 {
        self.solver.spacing()
    }

    pub fn set_horizontal_alignment(&mut self, alignment: HorizontalAlignment) {
        self.alignment = alignment;
        self.solver.set_anchor(alignment.anchor());
    }

    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    pub fn column_widths(&self) -> &[i32] {
        self.solver.sizes()
    }

    pub fn column_positions(&self) -> &[i32] {
        self.solver.positions()
    }

    pub fn number_of_columns(&self) -> usize {
        self.solver.number_of_values()
    }

    /// Occupied width for the given available width.
    pub fn width_for(&mut self, available: i32) -> i32 {
        self.solver.size_for(available)
    }

    pub fn solver(&self) -> &DimensionSolver {
        &self.solver
    }
}

/// Row sizing for a grid.
#[derive(Debug)]
pub struct GridRows {
    solver: DimensionSolver,
    alignment: VerticalAlignment,
}

impl Default for GridRows {
    fn default() -> Self {
        Self::new()
    }
}

impl GridRows {
    pub fn new() -> Self {
        Self {
            solver: DimensionSolver::new("rows", child::measure_height, child::row_and_span),
            alignment: VerticalAlignment::default(),
        }
    }

    /// Use the height and bottom edge of `bounds`.
    pub fn set_bounds(&mut self, bounds: &Bounds) {
        self.solver.set_bounds(bounds.height, bounds.bottom());
    }

    pub fn set_children(&mut self, children: Option<ChildList>) {
        self.solver.set_children(children);
    }

    pub fn invalidate_children(&mut self) {
        self.solver.invalidate_children();
    }

    pub fn set_rows(&mut self, value: &str) {
        self.solver.set_values(value);
    }

    pub fn rows(&self) -> &str {
        self.solver.values()
    }

    pub fn set_row_spacing(&mut self, value: i32) {
        self.solver.set_spacing(value);
    }

    pub fn row_spacing(&self) -> i32 {
        self.solver.spacing()
    }

    pub fn set_vertical_alignment(&mut self, alignment: VerticalAlignment) {
        self.alignment = alignment;
        self.solver.set_anchor(alignment.anchor());
    }

    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.alignment
    }

    pub fn row_heights(&self) -> &[i32] {
        self.solver.sizes()
    }

    pub fn row_positions(&self) -> &[i32] {
        self.solver.positions()
    }

    pub fn number_of_rows(&self) -> usize {
        self.solver.number_of_values()
    }

    /// Occupied height for the given available height.
    pub fn height_for(&mut self, available: i32) -> i32 {
        self.solver.size_for(available)
    }

    pub fn solver(&self) -> &DimensionSolver {
        &self.solver
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::child::{child_list, GridChild, GridPlacement};

    struct Label {
        placement: GridPlacement,
        width: i32,
        height: i32,
    }

    impl GridChild for Label {
        fn placement(&self) -> GridPlacement {
            self.placement
        }

        fn set_placement(&mut self, placement: GridPlacement) {
            self.placement = placement;
        }

        fn measure_width(&self, _available: i32) -> i32 {
            self.width
        }

        fn measure_height(&self, _available: i32) -> i32 {
            self.height
        }
    }

    #[test]
    fn test_default_columns() {
        let columns = GridColumns::new();
        assert!(columns.column_widths().is_empty());
        assert!(columns.column_positions().is_empty());
        assert_eq!(columns.number_of_columns(), 0);
        assert_eq!(columns.column_spacing(), 0);
        assert_eq!(columns.columns(), "");
    }

    #[test]
    fn test_alignment_anchors() {
        assert_eq!(HorizontalAlignment::Left.anchor(), Anchor::Start);
        assert_eq!(HorizontalAlignment::Stretch.anchor(), Anchor::Start);
        assert_eq!(HorizontalAlignment::Center.anchor(), Anchor::Center);
        assert_eq!(HorizontalAlignment::Right.anchor(), Anchor::End);
        assert_eq!(VerticalAlignment::Top.anchor(), Anchor::Start);
        assert_eq!(VerticalAlignment::Bottom.anchor(), Anchor::End);
    }

    #[test]
    fn test_columns_use_width_and_right() {
        let mut columns = GridColumns::new();
        columns.set_columns("50,50");
        columns.set_horizontal_alignment(HorizontalAlignment::Right);
        columns.set_bounds(&Bounds::new(0, 0, 200, 80));

        assert_eq!(columns.column_widths(), &[50, 50]);
        assert_eq!(columns.column_positions(), &[100, 150]);
    }

    #[test]
    fn test_rows_use_height_and_bottom() {
        let mut rows = GridRows::new();
        rows.set_rows("20,*");
        rows.set_vertical_alignment(VerticalAlignment::Bottom);
        rows.set_bounds(&Bounds::new(0, 10, 300, 100));

        assert_eq!(rows.row_heights(), &[20, 80]);
        assert_eq!(rows.row_positions(), &[10, 30]);
    }

    #[test]
    fn test_each_axis_measures_its_own_extent() {
        let children = child_list(vec![Box::new(Label {
            placement: GridPlacement::cell(0, 0),
            width: 70,
            height: 25,
        }) as Box<dyn GridChild>]);

        let mut columns = GridColumns::new();
        columns.set_children(Some(children.clone()));
        columns.set_columns("Auto,*");

        let mut rows = GridRows::new();
        rows.set_children(Some(children));
        rows.set_rows("Auto,*");

        let bounds = Bounds::new(0, 0, 200, 100);
        columns.set_bounds(&bounds);
        rows.set_bounds(&bounds);

        assert_eq!(columns.column_widths(), &[70, 130]);
        assert_eq!(rows.row_heights(), &[25, 75]);
    }

    #[test]
    fn test_width_for_zero_available() {
        let mut columns = GridColumns::new();
        assert_eq!(columns.width_for(0), 0);
        assert!(columns.width_for(-50) >= 0);

        columns.set_columns("100,*");
        assert_eq!(columns.width_for(300), 300);
        assert_eq!(columns.width_for(0), 0);
    }

    #[test]
    fn test_width_for_fixed_content() {
        let mut columns = GridColumns::new();
        columns.set_columns("50,60");
        columns.set_column_spacing(5);
        assert_eq!(columns.width_for(400), 115);
    }
}
