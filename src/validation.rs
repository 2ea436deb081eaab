//! Input validation for timetable generation.
//!
//! Two levels:
//! - [`validate_catalog`] checks the structural integrity of the reference
//!   data and collects every issue found (duplicate IDs, dangling
//!   references, impossible semesters).
//! - [`validate_request`] checks one generation request against the catalog
//!   and fails fast with [`TimetableError::InvalidInput`].

use std::collections::{HashMap, HashSet};

use crate::error::{Result, TimetableError};
use crate::models::Catalog;
use crate::scheduler::GenerationRequest;

/// Catalog validation result.
pub type ValidationResult = std::result::Result<(), Vec<ValidationError>>;

/// A catalog integrity error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of catalog integrity errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// A course references a teacher that doesn't exist.
    UnknownTeacher,
    /// A course or group references a study plan that doesn't exist.
    UnknownStudyPlan,
    /// A subgroup references a group that doesn't exist.
    UnknownGroup,
    /// A study plan declares zero semesters.
    NoSemesters,
    /// A course's semester lies outside its study plan.
    SemesterOutOfRange,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn check_unique<I>(kind_name: &str, ids: I, errors: &mut Vec<ValidationError>) -> HashSet<u32>
where
    I: IntoIterator<Item = u32>,
{
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate {kind_name} ID: {id}"),
            ));
        }
    }
    seen
}

/// Validates the reference data.
///
/// Checks:
/// 1. No duplicate IDs per entity kind
/// 2. Every study plan has at least one semester
/// 3. Every course references an existing teacher and study plan
/// 4. Every course semester lies within its study plan
/// 5. Every group references an existing study plan
/// 6. Every subgroup references an existing group
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_catalog(catalog: &Catalog) -> ValidationResult {
    let mut errors = Vec::new();

    check_unique(
        "study plan",
        catalog.study_plans.iter().map(|p| p.id),
        &mut errors,
    );
    let teacher_ids = check_unique("teacher", catalog.teachers.iter().map(|t| t.id), &mut errors);
    check_unique("course", catalog.courses.iter().map(|c| c.id), &mut errors);
    let group_ids = check_unique("group", catalog.groups.iter().map(|g| g.id), &mut errors);
    check_unique(
        "subgroup",
        catalog.subgroups.iter().map(|s| s.id),
        &mut errors,
    );

    let semesters: HashMap<u32, u8> = catalog
        .study_plans
        .iter()
        .map(|p| (p.id, p.semester_count))
        .collect();

    for plan in &catalog.study_plans {
        if plan.semester_count == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::NoSemesters,
                format!("Study plan '{}' has no semesters", plan.name),
            ));
        }
    }

    for course in &catalog.courses {
        if !teacher_ids.contains(&course.teacher_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownTeacher,
                format!(
                    "Course '{}' references unknown teacher {}",
                    course.name, course.teacher_id
                ),
            ));
        }

        match semesters.get(&course.study_plan_id) {
            None => errors.push(ValidationError::new(
                ValidationErrorKind::UnknownStudyPlan,
                format!(
                    "Course '{}' references unknown study plan {}",
                    course.name, course.study_plan_id
                ),
            )),
            Some(&count) if course.semester == 0 || course.semester > count => {
                errors.push(ValidationError::new(
                    ValidationErrorKind::SemesterOutOfRange,
                    format!(
                        "Course '{}' is in semester {} but its plan has {count}",
                        course.name, course.semester
                    ),
                ));
            }
            Some(_) => {}
        }
    }

    for group in &catalog.groups {
        if !semesters.contains_key(&group.study_plan_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownStudyPlan,
                format!(
                    "Group '{}' references unknown study plan {}",
                    group.name, group.study_plan_id
                ),
            ));
        }
    }

    for subgroup in &catalog.subgroups {
        if !group_ids.contains(&subgroup.group_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownGroup,
                format!(
                    "Subgroup {} references unknown group {}",
                    subgroup.id, subgroup.group_id
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Validates a generation request.
///
/// Fails if the study plan is missing, the semester lies outside the plan,
/// or `start_date > end_date`.
pub fn validate_request(catalog: &Catalog, request: &GenerationRequest) -> Result<()> {
    let plan = catalog.study_plan(request.study_plan_id).ok_or_else(|| {
        TimetableError::invalid_input(format!(
            "study plan {} not found",
            request.study_plan_id
        ))
    })?;

    if !request.range.is_valid() {
        return Err(TimetableError::invalid_input(format!(
            "start date {} is after end date {}",
            request.range.start, request.range.end
        )));
    }

    if !plan.has_semester(request.semester) {
        return Err(TimetableError::invalid_input(format!(
            "semester {} is outside study plan '{}' (1..={})",
            request.semester, plan.name, plan.semester_count
        )));
    }

    Ok(())
}
