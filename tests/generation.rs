//! End-to-end generation properties over a multi-plan catalog.

use std::collections::{HashMap, HashSet};

use chrono::{NaiveDate, NaiveTime, Weekday};
use u_timetable::config::GeneratorConfig;
use u_timetable::models::{
    Catalog, Course, CourseId, Group, Lesson, StudyPlan, Subgroup, SubgroupId, Teacher,
    WORK_DAYS,
};
use u_timetable::scheduler::{
    CatalogSnapshot, GenerationRequest, GenerationState, QuotaReport, TimetableGenerator,
};
use u_timetable::store::{InMemoryLessonStore, LessonStore, SubgroupScope};
use u_timetable::validation::validate_catalog;

fn date(m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, m, d).unwrap()
}

/// Two study plans sharing teachers 1 and 3.
fn catalog() -> Catalog {
    Catalog::new()
        .with_study_plan(StudyPlan::new(1, "Computer Science").with_semesters(8))
        .with_study_plan(StudyPlan::new(2, "Mathematics").with_semesters(8))
        .with_teacher(Teacher::new(1, "Ivanova"))
        .with_teacher(Teacher::new(2, "Petrov"))
        .with_teacher(Teacher::new(3, "Sidorov"))
        .with_teacher(Teacher::new(4, "Kuznetsova"))
        .with_course(Course::new(1, 1, "Algorithms", 1).with_hours(32, 32).with_semester(2))
        .with_course(Course::new(2, 1, "Databases", 2).with_hours(24, 40).with_semester(2))
        .with_course(Course::new(3, 1, "Networks", 3).with_hours(16, 16).with_semester(2))
        .with_course(Course::new(4, 1, "Compilers", 3).with_hours(7, 9).with_semester(2))
        .with_course(Course::new(5, 2, "Analysis", 1).with_hours(40, 40).with_semester(2))
        .with_course(Course::new(6, 2, "Algebra", 4).with_hours(32, 48).with_semester(2))
        .with_course(Course::new(7, 2, "Topology", 3).with_hours(16, 0).with_semester(2))
        .with_course(Course::new(8, 2, "Logic", 4).with_hours(0, 24).with_semester(1))
        .with_group(Group::new(1, 1, "CS-21").with_year(2))
        .with_group(Group::new(2, 1, "CS-22").with_year(2))
        .with_group(Group::new(3, 2, "M-21").with_year(2))
        .with_subgroup(Subgroup::new(1, 1, 1))
        .with_subgroup(Subgroup::new(2, 1, 2))
        .with_subgroup(Subgroup::new(3, 2, 1))
        .with_subgroup(Subgroup::new(4, 3, 1))
        .with_subgroup(Subgroup::new(5, 3, 2))
}

fn generate_all(store: &mut InMemoryLessonStore, seed: u64) -> Vec<Lesson> {
    let catalog = catalog();
    let config = GeneratorConfig::default().with_seed(seed);
    let mut generator = TimetableGenerator::new(store, config).unwrap();
    let mut committed = Vec::new();
    for plan in [1, 2] {
        let request = GenerationRequest::new(plan, 2, date(1, 20), date(5, 31));
        let outcome = generator.generate(&catalog, &request).unwrap();
        assert_eq!(generator.state(), Some(GenerationState::Committed));

        let lecture: HashSet<_> = outcome.partition.lecture_days.iter().copied().collect();
        let practice: HashSet<_> = outcome.partition.practice_days.iter().copied().collect();
        assert!(lecture.is_disjoint(&practice));
        let union: HashSet<Weekday> = lecture.union(&practice).copied().collect();
        assert_eq!(union, WORK_DAYS.iter().copied().collect());

        committed.extend(outcome.committed);
    }
    committed
}

fn assert_conflict_free(catalog: &Catalog, lessons: &[Lesson]) {
    let mut subgroup_slots = HashSet::new();
    let mut teacher_slots = HashSet::new();
    let mut daily: HashMap<(SubgroupId, NaiveDate), u32> = HashMap::new();

    for lesson in lessons {
        assert!(
            subgroup_slots.insert((lesson.subgroup_id, lesson.date, lesson.start_time)),
            "subgroup double-booked: {lesson:?}"
        );
        *daily.entry((lesson.subgroup_id, lesson.date)).or_insert(0) += 1;
    }

    // A lecture session holds one teacher slot however many subgroups attend
    let lectures: HashSet<(CourseId, NaiveDate, NaiveTime)> = lessons
        .iter()
        .filter(|l| l.is_lecture())
        .map(|l| (l.course_id, l.date, l.start_time))
        .collect();
    for lesson in lessons.iter().filter(|l| !l.is_lecture()) {
        let teacher = catalog.course(lesson.course_id).unwrap().teacher_id;
        assert!(
            teacher_slots.insert((teacher, lesson.date, lesson.start_time)),
            "teacher double-booked: {lesson:?}"
        );
    }
    for &(course_id, d, t) in &lectures {
        let teacher = catalog.course(course_id).unwrap().teacher_id;
        assert!(
            teacher_slots.insert((teacher, d, t)),
            "teacher double-booked by lecture of course {course_id} on {d} at {t}"
        );
    }
    assert!(daily.values().all(|&n| n <= 4));
}

fn assert_quotas_respected(catalog: &Catalog, lessons: &[Lesson]) {
    for plan in [1, 2] {
        let snapshot = CatalogSnapshot::load(catalog, plan, 2).unwrap();
        let report = QuotaReport::calculate(&snapshot, lessons);
        for q in &report.lectures {
            assert!(q.placed <= q.required, "lecture quota exceeded: {q:?}");
        }
        for q in &report.practices {
            assert!(q.placed <= q.required, "practice quota exceeded: {q:?}");
        }
    }
}

#[test]
fn catalog_is_consistent() {
    assert!(validate_catalog(&catalog()).is_ok());
}

#[test]
fn properties_hold_across_seeds() {
    let catalog = catalog();
    for seed in [0, 1, 7, 42, 2025] {
        let mut store = InMemoryLessonStore::new();
        let committed = generate_all(&mut store, seed);

        assert!(!committed.is_empty());
        assert_eq!(committed.len(), store.len());
        assert_conflict_free(&catalog, store.lessons());
        assert_quotas_respected(&catalog, store.lessons());

        // Semester 1 course never appears
        assert!(store.lessons().iter().all(|l| l.course_id != 8));
    }
}

#[test]
fn same_seed_reproduces_store() {
    let mut a = InMemoryLessonStore::new();
    let mut b = InMemoryLessonStore::new();
    generate_all(&mut a, 99);
    generate_all(&mut b, 99);
    assert_eq!(a.lessons(), b.lessons());
}

#[test]
fn generous_window_fulfils_every_quota() {
    let catalog = catalog();
    let mut store = InMemoryLessonStore::new();
    generate_all(&mut store, 3);

    for plan in [1, 2] {
        let snapshot = CatalogSnapshot::load(&catalog, plan, 2).unwrap();
        let report = QuotaReport::calculate(&snapshot, store.lessons());
        assert!(report.is_fulfilled(), "{:?}", report.shortfalls());
    }
}

#[test]
fn regeneration_after_wipe() {
    let mut store = InMemoryLessonStore::new();
    let first = generate_all(&mut store, 5);

    assert_eq!(store.delete_all(&SubgroupScope::All).unwrap(), first.len());
    let second = generate_all(&mut store, 5);
    assert_eq!(first, second);
}

#[test]
fn full_subgroup_gets_nothing_that_day() {
    let catalog = catalog();
    let slots = GeneratorConfig::default().time_slots;
    let monday = date(1, 20);

    // Subgroup 1 already holds four lessons on Monday from another source
    let existing: Vec<Lesson> = slots
        .iter()
        .skip(3)
        .map(|slot| Lesson::practice(99, 1, monday, slot.start))
        .collect();
    let mut store = InMemoryLessonStore::with_lessons(existing);

    let config = GeneratorConfig::default().with_seed(8);
    let mut generator = TimetableGenerator::new(&mut store, config).unwrap();
    let request = GenerationRequest::new(1, 2, monday, date(1, 24));
    let outcome = generator.generate(&catalog, &request).unwrap();

    assert!(outcome
        .committed
        .iter()
        .all(|l| !(l.subgroup_id == 1 && l.date == monday)));
    assert_eq!(outcome.timetable.lessons_on(1, monday).len(), 4);
}

#[test]
fn reversed_window_is_rejected_without_side_effects() {
    let mut store = InMemoryLessonStore::with_lessons(vec![Lesson::lecture(
        1,
        1,
        date(1, 20),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
    )]);
    let mut generator = TimetableGenerator::new(&mut store, GeneratorConfig::default()).unwrap();
    let request = GenerationRequest::new(1, 2, date(5, 31), date(1, 20));

    let err = generator.generate(&catalog(), &request).unwrap_err();
    assert!(err.is_invalid_input());
    assert_eq!(generator.state(), Some(GenerationState::Aborted));
    assert_eq!(store.len(), 1);
}
