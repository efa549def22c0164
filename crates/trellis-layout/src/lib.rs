//! # Trellis Layout
//!
//! Grid layout engine for the Trellis UI toolkit.
//! Turns textual track definitions (`"100,Auto,*"`) and a list of placed
//! children into integer pixel sizes and positions.
//!
//! ## Design Goals
//!
//! 1. **Track parsing**: Classify each track as fixed, auto or star, never failing on bad input
//! 2. **Three-phase solving**: Fixed tracks first, then content-sized tracks, then proportional tracks
//! 3. **Incremental updates**: Only dirty phases re-run; unchanged inputs are a cache read
//! 4. **Independent axes**: Columns and rows are solved by the same code bound to different axes
//! 5. **Exact pixels**: Star tracks always add up to the remaining space, no rounding loss

pub mod axis;
pub mod child;
pub mod container;
pub mod dimension;
pub mod grid;
pub mod track;
pub mod update;

pub use axis::{GridColumns, GridRows, HorizontalAlignment, VerticalAlignment};
pub use child::{child_list, ChildList, GridChild, GridPlacement, MeasureDelegate, PlacementDelegate, Visibility};
pub use container::{
    GridBuilder, GridConfig, GridContainer, GridProperty, Orientation, OrientationDirection,
    PropertyObserver,
};
pub use dimension::{Anchor, DimensionSolver};
pub use grid::Grid;
pub use track::{parse_tracks, TrackClassification, TrackList, TrackSize};
pub use update::UpdateInfo;

use thiserror::Error;

/// Errors that can occur in layout.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    #[error("Invalid track definition at index {index}: {token:?}")]
    InvalidTrack { index: usize, token: String },

    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// An integer rectangle in device pixels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}
