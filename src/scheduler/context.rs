//! Shared inputs of the placement passes.

use crate::models::{DateRange, DayPartition, TimeSlot};

use super::CatalogSnapshot;

/// Read-only inputs shared by the lecture and practice passes.
#[derive(Debug, Clone, Copy)]
pub struct PlacementContext<'a> {
    /// Catalog slice being scheduled.
    pub snapshot: &'a CatalogSnapshot,
    /// Inclusive calendar range to walk.
    pub range: DateRange,
    /// Lecture/practice weekday split for this run.
    pub partition: &'a DayPartition,
    /// Ordered daily slots.
    pub slots: &'a [TimeSlot],
    /// Per-subgroup daily-load ceiling.
    pub max_daily_lessons: u32,
}

impl<'a> PlacementContext<'a> {
    /// Creates a context with the default ceiling of four lessons per day.
    pub fn new(
        snapshot: &'a CatalogSnapshot,
        range: DateRange,
        partition: &'a DayPartition,
        slots: &'a [TimeSlot],
    ) -> Self {
        Self {
            snapshot,
            range,
            partition,
            slots,
            max_daily_lessons: 4,
        }
    }

    /// Sets the daily-load ceiling.
    pub fn with_max_daily_lessons(mut self, max: u32) -> Self {
        self.max_daily_lessons = max;
        self
    }
}
