//! Benchmark fixtures for the Trellis grid layout engine.
//!
//! Grids here mix fixed, auto and star tracks so every solver phase does
//! real work.

use tracing::debug;
use trellis_layout::{child_list, Bounds, ChildList, Grid, GridChild, GridPlacement};

/// Child whose desired size depends on its index.
#[derive(Debug, Clone)]
pub struct BenchChild {
    placement: GridPlacement,
    width: i32,
    height: i32,
}

impl BenchChild {
    pub fn new(placement: GridPlacement, width: i32, height: i32) -> Self {
        Self {
            placement,
            width,
            height,
        }
    }
}

impl GridChild for BenchChild {
    fn placement(&self) -> GridPlacement {
        self.placement
    }

    fn set_placement(&mut self, placement: GridPlacement) {
        self.placement = placement;
    }

    fn measure_width(&self, available: i32) -> i32 {
        self.width.min(available)
    }

    fn measure_height(&self, available: i32) -> i32 {
        self.height.min(available)
    }
}

/// Track string cycling through fixed, auto and star tracks.
pub fn mixed_tracks(count: usize) -> String {
    (0..count)
        .map(|i| match i % 4 {
            0 => "48".to_string(),
            1 | 3 => "Auto".to_string(),
            _ => format!("{}*", i % 3 + 1),
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// One child per cell, every fifth spanning two columns.
pub fn cell_children(columns: usize, rows: usize) -> ChildList {
    let mut children: Vec<Box<dyn GridChild>> = Vec::with_capacity(columns * rows);
    for row in 0..rows {
        for column in 0..columns {
            let n = row * columns + column;
            let span = if n % 5 == 0 { 2 } else { 1 };
            let placement = GridPlacement {
                column,
                row,
                column_span: span,
                row_span: 1,
            };
            children.push(Box::new(BenchChild::new(
                placement,
                20 + (n % 7) as i32 * 9,
                12 + (n % 3) as i32 * 6,
            )));
        }
    }
    child_list(children)
}

/// A resolved grid of `columns` x `rows` mixed tracks.
pub fn build_grid(columns: usize, rows: usize, bounds: Bounds) -> Grid {
    let mut grid = Grid::new();
    grid.set_children(Some(cell_children(columns, rows)));
    grid.set_columns(&mixed_tracks(columns));
    grid.set_rows(&mixed_tracks(rows));
    grid.set_column_spacing(4);
    grid.set_row_spacing(2);
    grid.set_bounds(&bounds);
    debug!(columns, rows, ?bounds, "built bench grid");
    grid
}
