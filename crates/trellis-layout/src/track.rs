//! # Track Definitions
//!
//! Parsing of comma-separated track definition strings such as `"100,Auto,2*"`.
//!
//! ## Grammar
//!
//! - `<integer>` - fixed size in pixels (negative values clamp to 0)
//! - `Auto` (any case) - sized to the largest content placed in the track
//! - `*` or `<number>*` - proportional share of the remaining space (weight 1 by default)
//!
//! Anything else is treated as `Auto`, so the lenient path never fails.
//! [`TrackList::parse_strict`] exists for callers that want to report bad input.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tracing::{trace, warn};

use crate::{LayoutError, UpdateInfo};

/// A single track size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TrackSize {
    /// Fixed size in pixels.
    Fixed(i32),
    /// Size driven by content.
    #[default]
    Auto,
    /// Proportional weight of the remaining space.
    Star(f64),
}

impl TrackSize {
    /// Parse a single token. Returns `None` for tokens outside the grammar.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();

        if token.eq_ignore_ascii_case("auto") {
            return Some(TrackSize::Auto);
        }

        if let Some(weight) = token.strip_suffix('*') {
            let weight = weight.trim();
            if weight.is_empty() {
                return Some(TrackSize::Star(1.0));
            }
            let weight = weight.parse::<f64>().ok()?;
            // Zero and negative weights count as 1.
            if !weight.is_finite() || weight <= 0.0 {
                return Some(TrackSize::Star(1.0));
            }
            return Some(TrackSize::Star(weight));
        }

        if let Ok(value) = token.parse::<i64>() {
            return Some(TrackSize::Fixed(value.clamp(0, i32::MAX as i64) as i32));
        }

        // Integers too long for i64 still clamp like any other out-of-range value.
        let (negative, digits) = match token.strip_prefix('-') {
            Some(digits) => (true, digits),
            None => (false, token.strip_prefix('+').unwrap_or(token)),
        };
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            return Some(TrackSize::Fixed(if negative { 0 } else { i32::MAX }));
        }
        None
    }

    /// Parse a token, degrading anything unparseable to `Auto`.
    pub fn parse_lenient(index: usize, token: &str) -> Self {
        match Self::parse(token) {
            Some(size) => size,
            None => {
                warn!(index, token, "malformed track definition, using Auto");
                TrackSize::Auto
            }
        }
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, TrackSize::Fixed(_))
    }

    pub fn is_auto(&self) -> bool {
        matches!(self, TrackSize::Auto)
    }

    pub fn is_star(&self) -> bool {
        matches!(self, TrackSize::Star(_))
    }

    /// Mark the phase owning this kind of track on `info`.
    fn mark(&self, info: &mut UpdateInfo) {
        match self {
            TrackSize::Fixed(_) => info.update_fixed = true,
            TrackSize::Auto => info.update_auto = true,
            TrackSize::Star(_) => info.update_star = true,
        }
    }
}

impl fmt::Display for TrackSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackSize::Fixed(px) => write!(f, "{px}"),
            TrackSize::Auto => f.write_str("Auto"),
            TrackSize::Star(weight) if *weight == 1.0 => f.write_str("*"),
            TrackSize::Star(weight) => write!(f, "{weight}*"),
        }
    }
}

/// An ordered list of track sizes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackList {
    pub tracks: Vec<TrackSize>,
}

impl TrackList {
    /// Parse a definition string, degrading malformed tokens to `Auto`.
    pub fn parse(value: &str) -> Self {
        let tracks = split_tokens(value)
            .enumerate()
            .map(|(index, token)| TrackSize::parse_lenient(index, token))
            .collect();
        Self { tracks }
    }

    /// Parse a definition string, rejecting any token outside the grammar.
    pub fn parse_strict(value: &str) -> Result<Self, LayoutError> {
        let tracks = split_tokens(value)
            .enumerate()
            .map(|(index, token)| {
                TrackSize::parse(token).ok_or_else(|| LayoutError::InvalidTrack {
                    index,
                    token: token.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { tracks })
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

impl fmt::Display for TrackList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, track) in self.tracks.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{track}")?;
        }
        Ok(())
    }
}

/// Split on commas. A blank string has no tokens at all.
fn split_tokens(value: &str) -> impl Iterator<Item = &str> {
    let value = value.trim();
    value
        .split(',')
        .filter(move |_| !value.is_empty())
        .map(str::trim)
}

/// Tracks grouped by sizing strategy, keyed by track index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackClassification {
    /// Fixed pixel sizes.
    pub fixed: BTreeMap<usize, i32>,
    /// Content-sized track indices, ascending.
    pub auto: BTreeSet<usize>,
    /// Star weights.
    pub star: BTreeMap<usize, f64>,
}

impl TrackClassification {
    /// Classify an already parsed track list.
    pub fn from_tracks(list: &TrackList) -> Self {
        let mut classification = Self::default();
        for (index, track) in list.tracks.iter().enumerate() {
            match *track {
                TrackSize::Fixed(px) => {
                    classification.fixed.insert(index, px);
                }
                TrackSize::Auto => {
                    classification.auto.insert(index);
                }
                TrackSize::Star(weight) => {
                    classification.star.insert(index, weight);
                }
            }
        }
        classification
    }

    /// Total number of classified tracks.
    pub fn len(&self) -> usize {
        self.fixed.len() + self.auto.len() + self.star.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum of all star weights.
    pub fn star_weight(&self) -> f64 {
        self.star.values().sum()
    }
}

/// Parse `new` and diff it against `old`.
///
/// Returns the classification of `new` and the phases the change touches.
/// Identical strings produce no flags. The returned cell count is the number
/// of tokens in `new`, zero for an empty definition.
pub fn parse_tracks(old: &str, new: &str) -> (TrackClassification, UpdateInfo) {
    let new_list = TrackList::parse(new);
    let classification = TrackClassification::from_tracks(&new_list);

    let mut info = UpdateInfo {
        number_of_cells: new_list.len(),
        ..UpdateInfo::default()
    };

    if old == new {
        return (classification, info);
    }

    let old_list = TrackList::parse(old);
    let count = old_list.len().max(new_list.len());

    for i in 0..count {
        let before = old_list.tracks.get(i);
        let after = new_list.tracks.get(i);
        if before == after {
            continue;
        }
        if let Some(track) = before {
            track.mark(&mut info);
        }
        if let Some(track) = after {
            track.mark(&mut info);
        }
    }

    trace!(
        old,
        new,
        cells = info.number_of_cells,
        fixed = info.update_fixed,
        auto = info.update_auto,
        star = info.update_star,
        "parsed track definition"
    );

    (classification, info)
}
