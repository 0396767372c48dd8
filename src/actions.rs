#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use itertools::Itertools;
use tracing::{error, info, warn};
use typed_builder::TypedBuilder;

use crate::{
    display,
    record::{MarkOutcome, StudentRecord},
    report::{FolderSummary, ProcessSummary, Report},
    roster::{self, Roster},
    stats, submissions,
};

/// Inputs of the `process` action.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ProcessArgs {
    /// Namelist to read and overwrite.
    #[builder(setter(into))]
    pub namelist:        PathBuf,
    /// Root directory holding one folder per assignment.
    #[builder(setter(into))]
    pub submissions_dir: PathBuf,
    /// Suffix a file name must end with to count as a submission.
    #[builder(setter(into))]
    pub extension:       String,
    /// Print the table after saving.
    #[builder(default)]
    pub view:            bool,
}

/// Everything a `process` run produced.
#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    /// The updated namelist, as written.
    pub roster:           Roster,
    /// Folders found under the submissions root, in assignment order.
    pub folders:          Vec<String>,
    /// Per-folder counters.
    pub folder_summaries: Vec<FolderSummary>,
    /// Run totals.
    pub summary:          ProcessSummary,
    /// Non-fatal issues met along the way.
    pub report:           Report,
}

/// Loads the namelist, failing when it holds no student.
fn load_non_empty(namelist: &Path, report: &mut Report) -> Result<Roster> {
    let roster = roster::load(namelist, report)
        .with_context(|| format!("Failed to load namelist `{}`", namelist.display()))?;
    if roster.is_empty() {
        bail!("No student data loaded from `{}`", namelist.display());
    }
    Ok(roster)
}

/// Credits every submission file in one assignment folder.
fn process_folder(
    folder: &str,
    assignment: usize,
    files: &[PathBuf],
    roster: &mut Roster,
    by_id: &HashMap<String, usize>,
    report: &mut Report,
) -> FolderSummary {
    let capacity = roster.mark_columns;
    let mut summary = FolderSummary {
        folder: folder.to_owned(),
        assignment: assignment + 1,
        files_found: files.len(),
        ..FolderSummary::default()
    };

    for path in files {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let Some(id) = submissions::extract_student_id(&file_name) else {
            report.submission(folder, file_name, "Could not extract student ID.");
            summary.file_errors += 1;
            continue;
        };

        let Some(record) = by_id
            .get(&id)
            .and_then(|&index| roster.records.get_mut(index))
        else {
            report.submission(
                folder,
                file_name,
                format!("Student ID '{id}' not found in namelist."),
            );
            summary.file_errors += 1;
            continue;
        };

        let outcome = record.mark_submission(assignment, capacity);
        if outcome.is_success() {
            summary.students_marked += 1;
        }
        if outcome == MarkOutcome::Marked {
            summary.newly_marked += 1;
        }
    }

    summary
}

/// Scans the submission folders, marks attendance, recomputes statistics and
/// overwrites the namelist.
pub fn process(args: &ProcessArgs) -> Result<ProcessOutcome> {
    info!("Action: Process Submissions");
    info!("Namelist file: {}", args.namelist.display());
    info!("Submissions directory: {}", args.submissions_dir.display());
    info!("Processing file extension: {}", args.extension);

    let mut report = Report::new();
    let mut roster = load_non_empty(&args.namelist, &mut report)?;
    let capacity = roster.mark_columns;

    // Duplicate IDs resolve to the last occurrence.
    let by_id: HashMap<String, usize> = roster
        .records
        .iter()
        .enumerate()
        .map(|(index, record)| (record.id().to_owned(), index))
        .collect();

    let folders = match submissions::list_assignment_folders(&args.submissions_dir) {
        Ok(folders) => folders,
        Err(e) => {
            error!("{e}");
            Vec::new()
        }
    };

    if folders.is_empty() {
        warn!(
            "No assignment subfolders found in '{}'. No new submissions will be processed.",
            args.submissions_dir.display()
        );
    } else {
        info!("Found {} assignment folder(s): {}", folders.len(), folders.iter().join(", "));
    }

    if folders.len() > capacity {
        report.capacity(format!(
            "Found {} assignment folders, but namelist only supports {capacity} assignment \
             marks. Only the first {capacity} assignments (folders) will be actively processed \
             for marking.",
            folders.len()
        ));
    }

    let mut summary = ProcessSummary::default();
    let mut folder_summaries = Vec::new();
    for (assignment, folder) in folders.iter().take(capacity).enumerate() {
        info!("Processing folder: '{folder}' (Assignment {})", assignment + 1);
        let files = submissions::list_files(&args.submissions_dir.join(folder), &args.extension)
            .unwrap_or_else(|e| {
                error!("{e}");
                Vec::new()
            });

        let folder_summary =
            process_folder(folder, assignment, &files, &mut roster, &by_id, &mut report);
        println!("{}", display::folder_summary(&folder_summary, &args.extension));
        summary.absorb(&folder_summary);
        folder_summaries.push(folder_summary);
    }

    // The rate is taken over every column the namelist has room for, not only
    // over the folders that exist so far.
    stats::recompute(&mut roster.records, capacity, capacity);
    roster::save(&args.namelist, &roster.records, capacity)
        .with_context(|| format!("Could not write results to `{}`", args.namelist.display()))?;

    println!("{}", display::overall_summary(&summary, &report));

    if args.view {
        info!("Displaying table after processing...");
        println!("{}", display::attendance_table(&roster.records, capacity));
    }

    info!("Processing action complete.");
    Ok(ProcessOutcome {
        roster,
        folders,
        folder_summaries,
        summary,
        report,
    })
}

/// Finds students whose ID equals `identifier` or whose name contains it,
/// ignoring case.
///
/// Only the first name match is kept. Scanning then goes on looking for an
/// exact ID match, which is added and ends the search.
pub fn find_students<'a>(
    records: &'a [StudentRecord],
    identifier: &str,
) -> Vec<&'a StudentRecord> {
    let needle = identifier.to_lowercase();
    let mut found = Vec::new();

    for record in records {
        if record.id().to_lowercase() == needle {
            found.push(record);
            break;
        }
        if found.is_empty() && record.name().to_lowercase().contains(&needle) {
            found.push(record);
        }
    }

    found
}

/// Prints details for the students matching `identifier` and returns them
/// with freshly computed statistics.
pub fn query(namelist: &Path, identifier: &str) -> Result<Vec<StudentRecord>> {
    info!("Action: Query Student");
    info!("Namelist file: {}", namelist.display());
    info!("Querying for: '{identifier}'");

    let mut report = Report::new();
    let roster = load_non_empty(namelist, &mut report).context("Cannot query")?;

    let mut found = find_students(&roster.records, identifier)
        .into_iter()
        .cloned()
        .collect_vec();

    if found.is_empty() {
        warn!("No student found with ID or name matching '{identifier}'.");
        return Ok(found);
    }
    if found.len() > 1 {
        info!("Found {} students matching '{identifier}'. Displaying all:", found.len());
    }

    for student in &mut found {
        stats::recompute(std::slice::from_mut(student), roster.mark_columns, roster.mark_columns);
        println!("{}", display::student_details(student, roster.mark_columns));
    }

    info!("Query action complete.");
    Ok(found)
}

/// Prints the whole namelist, as a table or as JSON, with freshly computed
/// statistics.
pub fn view(namelist: &Path, json: bool) -> Result<Roster> {
    info!("Action: View Table");
    info!("Namelist file: {}", namelist.display());

    let mut report = Report::new();
    let mut roster = load_non_empty(namelist, &mut report).context("Cannot view table")?;
    stats::recompute(&mut roster.records, roster.mark_columns, roster.mark_columns);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&roster).context("Could not serialize namelist")?
        );
    } else {
        println!("{}", display::attendance_table(&roster.records, roster.mark_columns));
    }

    info!("View action complete.");
    Ok(roster)
}
