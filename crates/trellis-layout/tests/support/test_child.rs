//! A grid child with a fixed desired size.

use std::cell::Cell;
use std::rc::Rc;

use trellis_layout::{GridChild, GridPlacement, Visibility};

/// Shared counter of measure calls.
pub type MeasureCount = Rc<Cell<usize>>;

pub struct TestChild {
    pub placement: GridPlacement,
    pub width: i32,
    pub height: i32,
    pub visibility: Visibility,
    pub measured: MeasureCount,
}

impl TestChild {
    pub fn new(column: usize, row: usize, width: i32, height: i32) -> Self {
        Self {
            placement: GridPlacement::cell(column, row),
            width,
            height,
            visibility: Visibility::Visible,
            measured: Rc::new(Cell::new(0)),
        }
    }

    pub fn span(mut self, column_span: usize, row_span: usize) -> Self {
        self.placement.column_span = column_span;
        self.placement.row_span = row_span;
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    /// Share a measure counter with the caller.
    pub fn counted(mut self, counter: &MeasureCount) -> Self {
        self.measured = Rc::clone(counter);
        self
    }

    pub fn boxed(self) -> Box<dyn GridChild> {
        Box::new(self)
    }
}

impl GridChild for TestChild {
    fn visibility(&self) -> Visibility {
        self.visibility
    }

    fn placement(&self) -> GridPlacement {
        self.placement
    }

    fn set_placement(&mut self, placement: GridPlacement) {
        self.placement = placement;
    }

    fn measure_width(&self, _available: i32) -> i32 {
        self.measured.set(self.measured.get() + 1);
        self.width
    }

    fn measure_height(&self, _available: i32) -> i32 {
        self.measured.set(self.measured.get() + 1);
        self.height
    }
}
