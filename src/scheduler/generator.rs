//! Timetable generation run.
//!
//! # Lifecycle
//!
//! ```text
//! Validating ──► Generating ──► Committed
//!     │               │
//!     └───────────────┴───────► Aborted
//! ```
//!
//! 1. **Validating**: the request is checked against the catalog. Nothing
//!    touches the store on failure.
//! 2. **Generating**: the availability index is seeded from persisted
//!    lessons, then the lecture pass and the practice pass stage lessons in
//!    memory.
//! 3. **Committed**: the staged batch goes to the store in one bulk insert
//!    and the timetable is read back. Any failure before the insert
//!    succeeds discards the batch and ends in **Aborted**.

use std::collections::HashMap;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::config::GeneratorConfig;
use crate::error::{Result, TimetableError};
use crate::models::{
    Catalog, DateRange, DayPartition, Lesson, StudyPlanId, TeacherId, Timetable,
};
use crate::store::LessonStore;
use crate::validation::validate_request;

use super::{
    assemble, place_lectures, place_practices, AvailabilityIndex, CatalogSnapshot,
    LectureSummary, PlacementContext, PracticeSummary, StagedLessons,
};

/// Inputs of one generation run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRequest {
    /// Study plan to schedule.
    pub study_plan_id: StudyPlanId,
    /// Semester within the study plan (1-based).
    pub semester: u8,
    /// Inclusive date range.
    pub range: DateRange,
}

impl GenerationRequest {
    /// Creates a request for `[start, end]`.
    pub fn new(
        study_plan_id: StudyPlanId,
        semester: u8,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            study_plan_id,
            semester,
            range: DateRange::new(start, end),
        }
    }
}

/// Where a run stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GenerationState {
    /// Checking the request.
    Validating,
    /// Running the placement passes.
    Generating,
    /// Lessons persisted.
    Committed,
    /// Run failed; nothing persisted.
    Aborted,
}

/// Result of a committed run.
#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    /// Lessons in range for the plan's subgroups, including ones persisted
    /// before the run.
    pub timetable: Timetable,
    /// Lecture/practice weekday split used.
    pub partition: DayPartition,
    /// Lecture sessions placed (one per course × slot).
    pub lecture_sessions: usize,
    /// Lecture lessons placed (one per attending subgroup).
    pub lecture_lessons: usize,
    /// Practice lessons placed.
    pub practice_lessons: usize,
    /// Practice lessons per teacher in this run.
    pub teacher_workload: HashMap<TeacherId, u32>,
    /// Lessons inserted by this run, in placement order.
    pub committed: Vec<Lesson>,
}

impl GenerationOutcome {
    fn empty(partition: DayPartition) -> Self {
        Self {
            timetable: Timetable::new(),
            partition,
            lecture_sessions: 0,
            lecture_lessons: 0,
            practice_lessons: 0,
            teacher_workload: HashMap::new(),
            committed: Vec::new(),
        }
    }
}

/// Greedy timetable generator over a lesson store.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use u_timetable::config::GeneratorConfig;
/// use u_timetable::models::{Catalog, Course, Group, StudyPlan, Subgroup, Teacher};
/// use u_timetable::scheduler::{GenerationRequest, TimetableGenerator};
/// use u_timetable::store::InMemoryLessonStore;
///
/// let catalog = Catalog::new()
///     .with_study_plan(StudyPlan::new(1, "CS"))
///     .with_teacher(Teacher::new(1, "Ada"))
///     .with_course(Course::new(1, 1, "Algorithms", 1).with_hours(4, 4))
///     .with_group(Group::new(1, 1, "CS-1"))
///     .with_subgroup(Subgroup::new(1, 1, 1));
///
/// let mut store = InMemoryLessonStore::new();
/// let mut generator =
///     TimetableGenerator::new(&mut store, GeneratorConfig::default().with_seed(7)).unwrap();
/// let request = GenerationRequest::new(
///     1,
///     1,
///     NaiveDate::from_ymd_opt(2025, 1, 20).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 2, 2).unwrap(),
/// );
/// let outcome = generator.generate(&catalog, &request).unwrap();
/// assert_eq!(outcome.lecture_lessons, 2);
/// assert_eq!(outcome.practice_lessons, 2);
/// ```
pub struct TimetableGenerator<'s, S>
where
    S: LessonStore + ?Sized,
{
    store: &'s mut S,
    config: GeneratorConfig,
    rng: StdRng,
    state: Option<GenerationState>,
}

impl<'s, S> TimetableGenerator<'s, S>
where
    S: LessonStore + ?Sized,
{
    /// Creates a generator, validating the configuration.
    pub fn new(store: &'s mut S, config: GeneratorConfig) -> Result<Self> {
        config.validate()?;
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Ok(Self {
            store,
            config,
            rng,
            state: None,
        })
    }

    /// Reseeds the random source.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// State reached by the last run, `None` before the first run.
    pub fn state(&self) -> Option<GenerationState> {
        self.state
    }

    /// Active configuration.
    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Generates and commits the timetable for one request.
    pub fn generate(
        &mut self,
        catalog: &Catalog,
        request: &GenerationRequest,
    ) -> Result<GenerationOutcome> {
        self.state = Some(GenerationState::Validating);
        let snapshot = match validate_request(catalog, request)
            .and_then(|()| CatalogSnapshot::load(catalog, request.study_plan_id, request.semester))
        {
            Ok(snapshot) => snapshot,
            Err(e) => return Err(self.abort(e)),
        };

        let partition = self.partition();
        info!(
            study_plan = %snapshot.study_plan.name,
            semester = request.semester,
            start = %request.range.start,
            end = %request.range.end,
            courses = snapshot.courses.len(),
            subgroups = snapshot.subgroups.len(),
            lecture_days = ?partition.lecture_days,
            practice_days = ?partition.practice_days,
            "Generating timetable"
        );

        if !snapshot.has_schedulable_courses() {
            info!("No courses with hours in this semester, nothing to schedule");
            self.state = Some(GenerationState::Committed);
            return Ok(GenerationOutcome::empty(partition));
        }

        self.state = Some(GenerationState::Generating);
        let ctx = PlacementContext::new(
            &snapshot,
            request.range,
            &partition,
            &self.config.time_slots,
        )
        .with_max_daily_lessons(self.config.max_daily_lessons);

        let (staged, lectures, practices) = match stage_run(&*self.store, &ctx, &mut self.rng) {
            Ok(run) => run,
            Err(e) => return Err(self.abort(e)),
        };

        let committed = staged.into_lessons();
        if !committed.is_empty() {
            if let Err(e) = self.store.bulk_insert(committed.clone()) {
                return Err(self.abort(e));
            }
        }
        self.state = Some(GenerationState::Committed);
        info!(lessons = committed.len(), "Committed lessons");

        let timetable = assemble(&*self.store, &request.range, &snapshot.subgroup_ids())?;
        info!(total = timetable.lesson_count(), "Timetable assembled");

        Ok(GenerationOutcome {
            timetable,
            partition,
            lecture_sessions: lectures.sessions,
            lecture_lessons: lectures.lessons,
            practice_lessons: practices.lessons,
            teacher_workload: practices.teacher_workload,
            committed,
        })
    }

    fn partition(&mut self) -> DayPartition {
        match &self.config.lecture_days {
            Some(days) => DayPartition::fixed(&self.config.work_days, days),
            None => DayPartition::random(
                &self.config.work_days,
                self.config.lecture_day_count,
                &mut self.rng,
            ),
        }
    }

    fn abort(&mut self, err: TimetableError) -> TimetableError {
        error!(error = %err, "Generation aborted");
        self.state = Some(GenerationState::Aborted);
        err
    }
}

/// Seeds the index and runs both passes without mutating the store.
fn stage_run<S>(
    store: &S,
    ctx: &PlacementContext<'_>,
    rng: &mut StdRng,
) -> Result<(StagedLessons, LectureSummary, PracticeSummary)>
where
    S: LessonStore + ?Sized,
{
    let index = AvailabilityIndex::seeded(store, &ctx.range, ctx.snapshot)?;
    let mut staged = StagedLessons::new(index);

    let lectures = place_lectures(ctx, &mut staged, rng)?;
    info!(
        sessions = lectures.sessions,
        lessons = lectures.lessons,
        "Lecture pass complete"
    );

    let practices = place_practices(ctx, &mut staged, rng)?;
    info!(lessons = practices.lessons, "Practice pass complete");

    Ok((staged, lectures, practices))
}
