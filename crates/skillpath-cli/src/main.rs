//! Skillpath learner CLI.
//!
//! Provides the `skillpath` binary with subcommands for working with a
//! learner profile database: seeding the demo catalog, rendering propagated
//! topic trees, enrolling via assessments, submitting test results, and
//! managing daily practice tasks.
//!
//! Every mutation re-runs the same `skillpath_progress` derivations the
//! library tests exercise, so the CLI is a thin orchestrator over the store.

use std::process;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use skillpath_core::{RoadmapId, TopicId, TopicNode, TopicResult, TopicStatus};
use skillpath_progress::{
    average_progress, generate_daily_tasks, grade_assessment, propagate_forest, roadmap_progress,
    year_activity,
};
use skillpath_storage::{
    compute_dirty_set, roadmap_fingerprint, seed_catalog, ProgressStore, SqliteStore, StorageError,
};

/// Skillpath learning tracker.
#[derive(Parser)]
#[command(name = "skillpath", about = "Roadmap progress tracker and demo CLI")]
struct Cli {
    /// Path to the profile database file.
    #[arg(short, long, default_value = "skillpath.db")]
    db: String,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Seed the demo catalog into an empty database.
    Seed,

    /// List the roadmap catalog and collection membership.
    Roadmaps,

    /// Render a roadmap's propagated topic tree.
    Tree {
        /// Roadmap ID (e.g. "ai").
        roadmap: String,
    },

    /// Take a roadmap's entry assessment and add it to the collection.
    Enroll {
        /// Roadmap ID.
        roadmap: String,

        /// Answers as comma-separated question=option pairs.
        #[arg(long)]
        answers: String,
    },

    /// Remove a roadmap from the collection.
    Remove {
        /// Roadmap ID.
        roadmap: String,
    },

    /// Record a topic test result and refresh the roadmap's progress.
    Submit {
        /// Leaf topic ID (e.g. "history-of-ai").
        topic: String,

        /// Test score.
        #[arg(long)]
        score: f64,

        /// Mark the attempt as passed.
        #[arg(long)]
        passed: bool,
    },

    /// Show completion summaries (optionally recomputing stale ones).
    Progress {
        /// Re-propagate roadmaps whose fingerprint changed.
        #[arg(long)]
        refresh: bool,
    },

    /// Show the year activity heatmap.
    Activity,

    /// Show (generating if needed) the daily practice tasks for a date.
    Daily {
        /// Date in YYYY-MM-DD form (default: today).
        #[arg(long)]
        date: Option<String>,
    },

    /// Mark a daily task as completed.
    CompleteTask {
        /// Task ID as shown by the `daily` subcommand.
        id: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let exit_code = match cli.command {
        Commands::Seed => run_seed(&cli.db),
        Commands::Roadmaps => run_roadmaps(&cli.db),
        Commands::Tree { roadmap } => run_tree(&cli.db, &roadmap),
        Commands::Enroll { roadmap, answers } => run_enroll(&cli.db, &roadmap, &answers),
        Commands::Remove { roadmap } => run_remove(&cli.db, &roadmap),
        Commands::Submit {
            topic,
            score,
            passed,
        } => run_submit(&cli.db, &topic, score, passed),
        Commands::Progress { refresh } => run_progress(&cli.db, refresh),
        Commands::Activity => run_activity(&cli.db),
        Commands::Daily { date } => run_daily(&cli.db, date.as_deref()),
        Commands::CompleteTask { id } => run_complete_task(&cli.db, &id),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Shared plumbing
// ---------------------------------------------------------------------------

/// Exit codes: 0 = success, 1 = invalid arguments, 2 = domain error
/// (unknown roadmap/topic/task, re-seed), 3 = storage/I/O error.
fn exit_code_for(err: &StorageError) -> i32 {
    match err {
        StorageError::Database(_)
        | StorageError::Migration(_)
        | StorageError::Serialization(_)
        | StorageError::Reconstruction { .. } => 3,
        _ => 2,
    }
}

fn open_store(db_path: &str) -> Result<SqliteStore, i32> {
    SqliteStore::new(db_path).map_err(|e| {
        eprintln!("Error: failed to open database '{}': {}", db_path, e);
        3
    })
}

fn now_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_millis() as u64)
}

/// Propagates one roadmap's tree from the store's current results.
fn propagate_roadmap(
    store: &SqliteStore,
    id: &RoadmapId,
) -> Result<Vec<TopicNode>, StorageError> {
    let tree = store.get_tree(id)?;
    let results = store.all_results()?;
    Ok(propagate_forest(&tree, |topic| results.get(topic).cloned()))
}

/// Re-derives and caches one roadmap's summary and fingerprint.
fn refresh_roadmap(
    store: &mut SqliteStore,
    id: &RoadmapId,
) -> Result<skillpath_core::RoadmapProgress, StorageError> {
    let propagated = propagate_roadmap(store, id)?;
    let summary = roadmap_progress(id.clone(), &propagated);
    store.upsert_progress(&summary)?;

    let tree = store.get_tree(id)?;
    let results = store.all_results()?;
    store.set_fingerprint(id, &roadmap_fingerprint(&tree, &results))?;
    Ok(summary)
}

fn status_glyph(status: TopicStatus) -> &'static str {
    match status {
        TopicStatus::Completed => "[x]",
        TopicStatus::InProgress => "[~]",
        TopicStatus::NotStarted => "[ ]",
        TopicStatus::Locked => "[#]",
    }
}

fn render_tree(nodes: &[TopicNode], depth: usize) {
    for node in nodes {
        println!(
            "{}{} {} ({})",
            "  ".repeat(depth),
            status_glyph(node.status),
            node.title,
            node.id,
        );
        render_tree(&node.children, depth + 1);
    }
}

// ---------------------------------------------------------------------------
// Subcommands
// ---------------------------------------------------------------------------

fn run_seed(db_path: &str) -> i32 {
    let mut store = match open_store(db_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    match store.list_roadmaps() {
        Ok(existing) if !existing.is_empty() => {
            eprintln!("Error: catalog already seeded ({} roadmaps)", existing.len());
            return 2;
        }
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_code_for(&e);
        }
    }

    match seed_catalog(&mut store) {
        Ok(()) => {
            println!("Seeded demo catalog into '{}'", db_path);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}

fn run_roadmaps(db_path: &str) -> i32 {
    let store = match open_store(db_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let listing = store.list_roadmaps().and_then(|summaries| {
        let collection = store.collection()?;
        for summary in &summaries {
            let member = collection.contains(&summary.id);
            let level = store.get_level(&summary.id)?;
            let mut line = format!(
                "{:<10} {} [{}] -- {} topics",
                summary.id.as_str(),
                summary.title,
                summary.level,
                summary.total_topics,
            );
            if summary.recommended {
                line.push_str(" (recommended)");
            }
            if member {
                match level {
                    Some(level) => line.push_str(&format!(" -- in collection, placed {}", level)),
                    None => line.push_str(" -- in collection"),
                }
            }
            println!("{}", line);
        }
        Ok(())
    });

    match listing {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}

fn run_tree(db_path: &str, roadmap: &str) -> i32 {
    let store = match open_store(db_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let id = RoadmapId::new(roadmap);
    match propagate_roadmap(&store, &id) {
        Ok(propagated) => {
            render_tree(&propagated, 0);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}

/// Parses `--answers q1=opt_a,q2=opt_b` into pairs.
fn parse_answers(raw: &str) -> Result<Vec<(String, String)>, String> {
    raw.split(',')
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| {
            chunk
                .split_once('=')
                .map(|(q, o)| (q.trim().to_string(), o.trim().to_string()))
                .ok_or_else(|| format!("expected question=option, got '{}'", chunk.trim()))
        })
        .collect()
}

fn run_enroll(db_path: &str, roadmap: &str, answers_raw: &str) -> i32 {
    let answers = match parse_answers(answers_raw) {
        Ok(pairs) => pairs,
        Err(msg) => {
            eprintln!("Error: {}", msg);
            return 1;
        }
    };

    let mut store = match open_store(db_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let id = RoadmapId::new(roadmap);
    let result = (|| -> Result<i32, StorageError> {
        let assessment = store.get_assessment(&id)?;
        let outcome = match grade_assessment(&assessment, &answers) {
            Ok(outcome) => outcome,
            Err(e) => {
                eprintln!("Error: {}", e);
                return Ok(2);
            }
        };

        let mut collection = store.collection()?;
        if !collection.contains(&id) {
            collection.push(id.clone());
        }
        store.set_collection(&collection)?;
        store.set_level(&id, outcome.level)?;
        let summary = refresh_roadmap(&mut store, &id)?;

        println!(
            "Enrolled in '{}': scored {}/{}, placed {}",
            id, outcome.score, outcome.max_score, outcome.level,
        );
        println!(
            "Progress: {}% ({}/{} topics)",
            summary.completion_percent, summary.completed_topics, summary.total_topics,
        );
        Ok(0)
    })();

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}

fn run_remove(db_path: &str, roadmap: &str) -> i32 {
    let mut store = match open_store(db_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let id = RoadmapId::new(roadmap);
    match store.remove_from_collection(&id) {
        Ok(remaining) => {
            let ids: Vec<&str> = remaining.iter().map(RoadmapId::as_str).collect();
            println!("Removed '{}'; collection is now [{}]", id, ids.join(", "));
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}

/// Finds the catalog roadmap whose tree contains `topic`.
fn find_roadmap_of_topic(
    store: &SqliteStore,
    topic: &TopicId,
) -> Result<Option<RoadmapId>, StorageError> {
    for summary in store.list_roadmaps()? {
        let tree = store.get_tree(&summary.id)?;
        if tree.iter().any(|node| node.find(topic).is_some()) {
            return Ok(Some(summary.id));
        }
    }
    Ok(None)
}

fn run_submit(db_path: &str, topic: &str, score: f64, passed: bool) -> i32 {
    let mut store = match open_store(db_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let topic_id = TopicId::new(topic);
    let result = (|| -> Result<i32, StorageError> {
        let Some(roadmap_id) = find_roadmap_of_topic(&store, &topic_id)? else {
            eprintln!("Error: no roadmap contains topic '{}'", topic_id);
            return Ok(2);
        };

        store.record_result(&topic_id, &TopicResult::new(score, passed, now_ms()))?;
        let summary = refresh_roadmap(&mut store, &roadmap_id)?;

        println!(
            "Recorded {} for '{}' (score {})",
            if passed { "pass" } else { "fail" },
            topic_id,
            score,
        );
        println!(
            "{}: {}% ({}/{} topics)",
            roadmap_id, summary.completion_percent, summary.completed_topics, summary.total_topics,
        );
        Ok(0)
    })();

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}

fn run_progress(db_path: &str, refresh: bool) -> i32 {
    let mut store = match open_store(db_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let result = (|| -> Result<i32, StorageError> {
        if refresh {
            let previous = store.fingerprints()?;
            let dirty = compute_dirty_set(&store, &previous)?;
            for id in dirty.needs_refresh() {
                refresh_roadmap(&mut store, &id)?;
            }
            if !dirty.is_clean() {
                println!("Refreshed {} roadmap(s)", dirty.needs_refresh().len());
            }
        }

        let summaries = store.list_progress()?;
        // Machine-readable output for the summaries themselves.
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        println!("Average completion: {}%", average_progress(&summaries));
        Ok(0)
    })();

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}

fn run_activity(db_path: &str) -> i32 {
    let store = match open_store(db_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let result = (|| -> Result<i32, StorageError> {
        let results = store.all_results()?;
        let days = year_activity(Utc::now().date_naive(), results.values());

        let active = days.iter().filter(|d| d.level > 0).count();
        println!("Active days in the last year: {}", active);

        // Render the most recent four weeks as a compact strip.
        let recent = &days[days.len().saturating_sub(28)..];
        let strip: String = recent
            .iter()
            .map(|d| char::from_digit(u32::from(d.level), 10).unwrap_or('0'))
            .collect();
        println!("Last 28 days: {}", strip);
        Ok(0)
    })();

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}

fn run_daily(db_path: &str, date_raw: Option<&str>) -> i32 {
    let date = match date_raw {
        None => Utc::now().date_naive(),
        Some(raw) => match raw.parse::<NaiveDate>() {
            Ok(date) => date,
            Err(e) => {
                eprintln!("Error: invalid date '{}': {}", raw, e);
                return 1;
            }
        },
    };

    let mut store = match open_store(db_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let result = (|| -> Result<i32, StorageError> {
        let mut tasks = store.daily_tasks(date)?;
        if tasks.is_empty() {
            let mut sources = Vec::new();
            for id in store.collection()? {
                let roadmap = store.get_roadmap(&id)?;
                let propagated = propagate_roadmap(&store, &id)?;
                sources.push((roadmap, propagated));
            }
            tasks = generate_daily_tasks(date, &sources);
            store.save_daily_tasks(date, &tasks)?;
        }

        if tasks.is_empty() {
            println!("No practice tasks for {} (empty collection?)", date);
            return Ok(0);
        }

        for task in &tasks {
            let marker = if task.completed { "done" } else { "open" };
            println!(
                "[{}] {} -- {} / {} ({} pts)\n      {}",
                marker, task.id, task.roadmap_title, task.node_title, task.points, task.description,
            );
        }
        Ok(0)
    })();

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}

fn run_complete_task(db_path: &str, task_id: &str) -> i32 {
    let mut store = match open_store(db_path) {
        Ok(s) => s,
        Err(code) => return code,
    };

    match store.complete_daily_task(task_id, now_ms()) {
        Ok(task) => {
            println!("Completed '{}' (+{} pts)", task.id, task.points);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit_code_for(&e)
        }
    }
}
