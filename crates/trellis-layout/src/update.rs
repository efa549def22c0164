//! Dirty tracking for the three solver phases.

/// Which solver phases must re-run before sizes can be trusted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateInfo {
    /// Number of tracks the flags refer to. Zero always forces an update.
    pub number_of_cells: usize,
    /// Fixed tracks changed.
    pub update_fixed: bool,
    /// Content-sized tracks must be re-measured.
    pub update_auto: bool,
    /// Proportional tracks must be redistributed.
    pub update_star: bool,
}

impl UpdateInfo {
    /// Create update info with every phase pending.
    pub fn dirty(number_of_cells: usize) -> Self {
        let mut info = Self {
            number_of_cells,
            ..Self::default()
        };
        info.set_all(true);
        info
    }

    /// Whether any phase has to run.
    pub fn need_update(&self) -> bool {
        self.update_fixed || self.update_auto || self.update_star || self.number_of_cells == 0
    }

    /// Set all three phase flags at once.
    pub fn set_all(&mut self, value: bool) {
        self.update_fixed = value;
        self.update_auto = value;
        self.update_star = value;
    }

    /// Mark the phases that depend on available space.
    pub fn update_auto_star(&mut self) {
        self.update_auto = true;
        self.update_star = true;
    }

    /// Fold another set of flags into this one. The cell count is taken from `other`.
    pub fn merge(&mut self, other: &UpdateInfo) {
        self.number_of_cells = other.number_of_cells;
        self.update_fixed |= other.update_fixed;
        self.update_auto |= other.update_auto;
        self.update_star |= other.update_star;
    }

    /// Propagate flags to the later phases that consume the earlier totals.
    ///
    /// The auto pass measures against space left after fixed tracks, and the
    /// star pass distributes what is left after both.
    pub fn cascade(&mut self) {
        if self.update_fixed {
            self.update_auto = true;
        }
        if self.update_auto {
            self.update_star = true;
        }
    }
}
