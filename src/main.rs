//! Timetable generation CLI.
//!
//! Regenerates the timetable of every study plan in a catalog: wipes the
//! store, runs generation per plan for one semester and date window, prints
//! per-subgroup lesson counts and unmet quotas, then saves the store.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use chrono::NaiveDate;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use u_timetable::config::GeneratorConfig;
use u_timetable::models::{Catalog, LessonType, Timetable};
use u_timetable::scheduler::{
    CatalogSnapshot, GenerationRequest, QuotaReport, SubgroupTally, TimetableGenerator,
};
use u_timetable::store::{InMemoryLessonStore, LessonStore, SubgroupScope};
use u_timetable::validation::validate_catalog;

/// Academic timetable generator
///
/// Places lectures and practices for every study plan of a catalog into
/// fixed daily slots without teacher or subgroup conflicts.
#[derive(Parser, Debug)]
#[command(name = "u-timetable")]
#[command(version, about, long_about = None)]
struct Args {
    /// Catalog JSON (study plans, teachers, courses, groups, subgroups)
    #[arg(long, value_name = "FILE")]
    catalog: PathBuf,

    /// Generator configuration JSON
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Lesson store JSON, loaded if present and saved on success
    #[arg(long, value_name = "FILE")]
    store: Option<PathBuf>,

    /// Semester to generate
    #[arg(long, default_value_t = 2)]
    semester: u8,

    /// First date of the window (YYYY-MM-DD)
    #[arg(long, default_value = "2025-01-20")]
    start: NaiveDate,

    /// Last date of the window (YYYY-MM-DD)
    #[arg(long, default_value = "2025-05-31")]
    end: NaiveDate,

    /// Seed for reproducible output (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Write the generated timetable as JSON
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let catalog = load_catalog(&args.catalog)?;
    if let Err(issues) = validate_catalog(&catalog) {
        for issue in &issues {
            eprintln!("  {:?}: {}", issue.kind, issue.message);
        }
        anyhow::bail!("catalog has {} integrity issue(s)", issues.len());
    }

    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load_from_file(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let mut store = match &args.store {
        Some(path) => InMemoryLessonStore::load_json(path)?,
        None => InMemoryLessonStore::new(),
    };
    let wiped = store.delete_all(&SubgroupScope::All)?;
    tracing::info!(lessons = wiped, "Cleared lesson store");

    let mut combined = Timetable::new();
    let mut reports = Vec::new();
    {
        let mut generator = TimetableGenerator::new(&mut store, config)?;
        for plan in &catalog.study_plans {
            if !plan.has_semester(args.semester) {
                tracing::warn!(
                    study_plan = %plan.name,
                    semester = args.semester,
                    "Study plan has no such semester, skipping"
                );
                continue;
            }

            let request = GenerationRequest::new(plan.id, args.semester, args.start, args.end);
            let outcome = generator
                .generate(&catalog, &request)
                .with_context(|| format!("generation failed for study plan '{}'", plan.name))?;

            let snapshot = CatalogSnapshot::load(&catalog, plan.id, args.semester)?;
            reports.push((plan.name.clone(), QuotaReport::calculate(&snapshot, &outcome.committed)));
            for lesson in outcome.timetable.lessons() {
                combined.push(lesson.clone());
            }
        }
    }

    print_tally(&catalog, &combined);
    for (plan_name, report) in &reports {
        print_shortfalls(&catalog, plan_name, report);
    }

    if let Some(path) = &args.output {
        let json = serde_json::to_string_pretty(&combined)?;
        std::fs::write(path, json)
            .with_context(|| format!("cannot write timetable to {}", path.display()))?;
        println!("Timetable written to {}", path.display());
    }

    if let Some(path) = &args.store {
        store.save_json(path)?;
        println!("Store saved to {} ({} lessons)", path.display(), store.len());
    }

    Ok(())
}

fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read catalog {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("cannot parse catalog {}", path.display()))
}

fn print_tally(catalog: &Catalog, timetable: &Timetable) {
    println!();
    println!("{:<24} {:>9} {:>9}", "Subgroup", "Lectures", "Practices");
    println!("{}", "-".repeat(44));
    let tallies = SubgroupTally::from_timetable(timetable);
    for subgroup in &catalog.subgroups {
        let tally = tallies.get(&subgroup.id).copied().unwrap_or_default();
        println!(
            "{:<24} {:>9} {:>9}",
            catalog.subgroup_label(subgroup),
            tally.lectures,
            tally.practices
        );
    }
}

fn print_shortfalls(catalog: &Catalog, plan_name: &str, report: &QuotaReport) {
    let shortfalls = report.shortfalls();
    if shortfalls.is_empty() {
        return;
    }

    println!();
    println!("{plan_name}: {} unmet quota(s)", shortfalls.len());
    for s in &shortfalls {
        let course = catalog
            .course(s.course_id)
            .map_or("?", |c| c.name.as_str());
        let who = match (s.lesson_type, s.subgroup_id) {
            (LessonType::Practice, Some(id)) => catalog
                .subgroups
                .iter()
                .find(|sg| sg.id == id)
                .map_or_else(|| format!("subgroup {id}"), |sg| catalog.subgroup_label(sg)),
            _ => "all subgroups".to_string(),
        };
        println!(
            "  {course} [{}] {who}: {}/{} sessions",
            s.lesson_type, s.placed, s.required
        );
    }
}
