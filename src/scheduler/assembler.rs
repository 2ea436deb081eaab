//! Schedule assembly.
//!
//! Reads back every lesson in range for the subgroups in scope, in store
//! order (date, then start time), and groups them by subgroup and date.
//! Lessons persisted before the run are included alongside the new ones.

use crate::error::Result;
use crate::models::{DateRange, SubgroupId, Timetable};
use crate::store::{LessonStore, SubgroupScope};

/// Builds the timetable for `subgroups` over `range` from committed state.
pub fn assemble<S>(store: &S, range: &DateRange, subgroups: &[SubgroupId]) -> Result<Timetable>
where
    S: LessonStore + ?Sized,
{
    if subgroups.is_empty() {
        return Ok(Timetable::new());
    }
    let scope = SubgroupScope::Only(subgroups.to_vec());
    let lessons = store.range_query(range, &scope)?;
    Ok(Timetable::from_lessons(lessons))
}
