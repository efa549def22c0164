//! Container-level layout tests
//!
//! Drives GridContainer through measure and arrange the way a visual tree would.

mod support;

use std::cell::RefCell;
use std::rc::Rc;

use support::*;
use trellis_layout::{
    Bounds, Grid, GridBuilder, GridConfig, GridProperty, HorizontalAlignment, Orientation,
    OrientationDirection, VerticalAlignment, Visibility,
};

#[test]
fn test_fixed_auto_star_columns() {
    init_tracing();
    let mut container = GridBuilder::new()
        .columns("100,Auto,*")
        .column_spacing(10)
        .child(TestChild::new(1, 0, 40, 12).boxed())
        .build()
        .unwrap();

    container.arrange(Bounds::new(0, 0, 300, 50));

    let grid = container.grid();
    assert_eq!(grid.column_widths(), &[100, 40, 140]);
    assert_eq!(grid.column_positions(), &[0, 110, 160]);
    assert_fills(grid.column_widths(), 10, 300);
}

#[test]
fn test_star_weights_lose_no_pixels() {
    let mut container = GridBuilder::new().columns("*,2*,*").build().unwrap();

    container.arrange(Bounds::new(0, 0, 103, 10));

    let widths = container.grid().column_widths();
    assert_eq!(widths, &[25, 51, 27]);
    assert_fills(widths, 0, 103);
    assert_contiguous(widths, container.grid().column_positions(), 0, 0);
}

#[test]
fn test_unchanged_bounds_do_not_remeasure() {
    let measured = MeasureCount::default();
    let mut container = GridBuilder::new()
        .columns("Auto,*")
        .rows("*")
        .child(TestChild::new(0, 0, 30, 10).counted(&measured).boxed())
        .build()
        .unwrap();

    let first = container.arrange(Bounds::new(0, 0, 200, 100));
    assert_eq!(measured.get(), 1);

    let second = container.arrange(Bounds::new(0, 0, 200, 100));
    assert_eq!(measured.get(), 1);
    assert_eq!(first, second);

    container.invalidate_children();
    container.arrange(Bounds::new(0, 0, 200, 100));
    assert_eq!(measured.get(), 2);
}

#[test]
fn test_moving_bounds_only_repositions() {
    let measured = MeasureCount::default();
    let mut container = GridBuilder::new()
        .columns("Auto,*")
        .horizontal_alignment(HorizontalAlignment::Right)
        .child(TestChild::new(0, 0, 30, 10).counted(&measured).boxed())
        .build()
        .unwrap();

    container.arrange(Bounds::new(0, 0, 200, 100));
    let count = measured.get();

    let rects = container.arrange(Bounds::new(50, 0, 200, 100));
    assert_eq!(measured.get(), count);
    assert_eq!(container.grid().column_positions(), &[50, 80]);
    assert_arranged(rects[0], Bounds::new(50, 0, 30, 100));
}

#[test]
fn test_star_weight_change_skips_measurement() {
    let measured = MeasureCount::default();
    let mut container = GridBuilder::new()
        .columns("Auto,*,*")
        .child(TestChild::new(0, 0, 40, 10).counted(&measured).boxed())
        .build()
        .unwrap();
    container.arrange(Bounds::new(0, 0, 160, 20));
    let count = measured.get();

    container.set_columns("Auto,*,3*");

    assert_eq!(measured.get(), count);
    assert_eq!(container.grid().column_widths(), &[40, 30, 90]);
}

#[test]
fn test_track_count_change_resolves_everything() {
    let mut container = GridBuilder::new()
        .columns("Auto,*")
        .child(TestChild::new(0, 0, 40, 10).boxed())
        .child(TestChild::new(2, 0, 25, 10).boxed())
        .build()
        .unwrap();
    container.arrange(Bounds::new(0, 0, 100, 20));
    assert_eq!(container.grid().column_widths(), &[40, 60]);

    container.set_columns("Auto,*,Auto");
    assert_eq!(container.grid().number_of_columns(), 3);
    assert_eq!(container.grid().column_widths(), &[40, 35, 25]);
}

#[test]
fn test_zero_bounds_then_space_arrives() {
    let mut container = GridBuilder::new().columns("*,*").rows("Auto").build().unwrap();

    let rects = container.arrange(Bounds::new(0, 0, 0, 0));
    assert!(rects.is_empty());
    assert_eq!(container.grid().column_widths(), &[0, 0]);
    assert_eq!(container.grid().column_positions(), &[0, 0]);

    container.arrange(Bounds::new(0, 0, 100, 40));
    assert_eq!(container.grid().column_widths(), &[50, 50]);
}

#[test]
fn test_spanning_child_grows_auto_tracks_evenly() {
    let mut container = GridBuilder::new()
        .columns("Auto,Auto")
        .column_spacing(10)
        .child(TestChild::new(0, 0, 110, 10).span(2, 1).boxed())
        .build()
        .unwrap();

    let rects = container.arrange(Bounds::new(0, 0, 400, 20));

    assert_eq!(container.grid().column_widths(), &[50, 50]);
    assert_eq!(container.grid().column_positions(), &[0, 60]);
    assert_arranged(rects[0], Bounds::new(0, 0, 110, 20));
}

#[test]
fn test_centered_rows() {
    let mut container = GridBuilder::new()
        .rows("20,20")
        .row_spacing(10)
        .vertical_alignment(VerticalAlignment::Center)
        .child(TestChild::new(0, 1, 10, 10).boxed())
        .build()
        .unwrap();

    let rects = container.arrange(Bounds::new(0, 100, 80, 150));

    assert_eq!(container.grid().row_positions(), &[50, 80]);
    assert_arranged(rects[0], Bounds::new(0, 180, 80, 20));
}

#[test]
fn test_collapsed_children_take_no_space() {
    let mut container = GridBuilder::new()
        .columns("Auto,*")
        .child(TestChild::new(0, 0, 70, 10).visibility(Visibility::Collapsed).boxed())
        .child(TestChild::new(0, 0, 20, 10).boxed())
        .build()
        .unwrap();

    let rects = container.arrange(Bounds::new(0, 0, 100, 30));

    assert_eq!(container.grid().column_widths(), &[20, 80]);
    assert_eq!(rects[0], None);
    assert_arranged(rects[1], Bounds::new(0, 0, 20, 30));
}

#[test]
fn test_observers_see_applied_changes() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);

    let mut container = GridBuilder::new()
        .columns("*")
        .observer(Box::new(
            move |property: GridProperty, config: &GridConfig, grid: &Grid| {
                sink.borrow_mut().push((
                    property,
                    config.column_spacing,
                    grid.columns().column_spacing(),
                ));
            },
        ))
        .build()
        .unwrap();

    container.set_column_spacing(4);
    container.set_scale(2.0, 2.0);
    container.set_column_spacing(4);

    assert_eq!(
        *seen.borrow(),
        vec![
            (GridProperty::ColumnSpacing, 4, 4),
            (GridProperty::Scale, 4, 8),
        ]
    );
}

#[test]
fn test_builder_rejects_bad_tracks() {
    let err = GridBuilder::new().rows("Auto,12px").build().unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid track definition at index 1: \"12px\""
    );
}

#[test]
fn test_setter_degrades_bad_tracks_to_auto() {
    init_tracing();
    let mut container = GridBuilder::new()
        .child(TestChild::new(1, 0, 15, 10).boxed())
        .build()
        .unwrap();

    container.set_columns("40,oops,*");
    container.arrange(Bounds::new(0, 0, 100, 10));

    assert_eq!(container.grid().column_widths(), &[40, 15, 45]);
}

#[test]
fn test_stack_tracks_follow_children() {
    let mut container = GridBuilder::new()
        .orientation(Orientation::Horizontal, OrientationDirection::Reverse)
        .child(TestChild::new(0, 0, 10, 10).boxed())
        .child(TestChild::new(0, 0, 20, 10).boxed())
        .child(TestChild::new(0, 0, 30, 10).boxed())
        .build()
        .unwrap();

    let rects = container.arrange(Bounds::new(0, 0, 200, 40));

    assert_eq!(container.config().columns, "Auto,Auto,Auto");
    assert_arranged(rects[2], Bounds::new(0, 0, 30, 40));
    assert_arranged(rects[1], Bounds::new(30, 0, 20, 40));
    assert_arranged(rects[0], Bounds::new(50, 0, 10, 40));
}

#[test]
fn test_extreme_inputs_stay_non_negative() {
    init_tracing();
    let mut container = GridBuilder::new()
        .columns("99999999999999999999999,Auto,*")
        .rows("Auto,*")
        .column_spacing(i32::MAX)
        .scale(2.0, 1.0)
        .child(TestChild::new(1, 0, i32::MAX, i32::MAX).boxed())
        .child(TestChild::new(0, 1, i32::MAX, i32::MAX).span(3, 2).boxed())
        .build()
        .unwrap();

    let rects = container.arrange(Bounds::new(0, 0, 640, 480));

    let grid = container.grid();
    assert_eq!(grid.column_widths()[0], i32::MAX);
    assert!(grid.column_widths().iter().all(|&w| w >= 0));
    assert!(grid.row_heights().iter().all(|&h| h >= 0));
    for rect in rects.into_iter().flatten() {
        assert!(rect.width >= 0 && rect.width <= 640);
        assert!(rect.height >= 0 && rect.height <= 480);
    }
}
