//! Custom assertions for layout tests.

use trellis_layout::Bounds;

/// Assert that tracks fill `extent` exactly once spacing is added.
#[track_caller]
pub fn assert_fills(sizes: &[i32], spacing: i32, extent: i32) {
    let gaps = sizes.len().saturating_sub(1) as i32;
    let total: i32 = sizes.iter().sum::<i32>() + spacing * gaps;
    assert_eq!(
        total, extent,
        "Tracks {:?} with spacing {} occupy {}, expected {}",
        sizes, spacing, total, extent
    );
}

/// Assert that forward positions follow sizes plus spacing.
#[track_caller]
pub fn assert_contiguous(sizes: &[i32], positions: &[i32], spacing: i32, start: i32) {
    assert_eq!(sizes.len(), positions.len(), "Size and position counts differ");
    let mut cursor = start;
    for (i, (size, position)) in sizes.iter().zip(positions).enumerate() {
        assert_eq!(
            *position, cursor,
            "Track {} at {}, expected {} (sizes {:?}, positions {:?})",
            i, position, cursor, sizes, positions
        );
        cursor += size + spacing;
    }
}

/// Assert that a child was arranged into `expected`.
#[track_caller]
pub fn assert_arranged(actual: Option<Bounds>, expected: Bounds) {
    match actual {
        Some(bounds) => assert_eq!(bounds, expected, "Child arranged into the wrong rectangle"),
        None => panic!("Child was not arranged, expected {:?}", expected),
    }
}
