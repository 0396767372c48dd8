#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Collects the non-fatal problems met during a run so they can be listed in
//! the final summary.

use std::fmt::Display;

use serde::Serialize;
use tracing::warn;

/// Where a non-fatal problem came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IssueKind {
    /// A namelist line was skipped.
    Row,
    /// A submission file could not be matched to a student.
    Submission,
    /// More assignment folders than the namelist has mark columns.
    Capacity,
}

/// A single non-fatal problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Issue {
    /// Category of the problem.
    kind:    IssueKind,
    /// Assignment folder being processed, if any.
    folder:  Option<String>,
    /// Offending file name, if any.
    file:    Option<String>,
    /// 1-based namelist line number, if any.
    line:    Option<usize>,
    /// Human readable reason.
    message: String,
}

impl Issue {
    /// Category of the problem.
    pub fn kind(&self) -> IssueKind {
        self.kind
    }

    /// Assignment folder the problem was found in.
    pub fn folder(&self) -> Option<&str> {
        self.folder.as_deref()
    }

    /// File name the problem refers to.
    pub fn file(&self) -> Option<&str> {
        self.file.as_deref()
    }

    /// Namelist line number the problem refers to.
    pub fn line(&self) -> Option<usize> {
        self.line
    }

    /// Reason for the problem.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for Issue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match (&self.file, &self.folder, self.line) {
            (Some(file), Some(folder), _) => {
                write!(f, "File '{file}' in folder '{folder}': {}", self.message)
            }
            (Some(file), None, _) => write!(f, "File '{file}': {}", self.message),
            (None, _, Some(line)) => write!(f, "Line {line}: {}", self.message),
            (None, _, None) => write!(f, "{}", self.message),
        }
    }
}

/// Accumulates issues for one invocation. Every recorded issue is also
/// logged at warn level.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    /// Issues in the order they were found.
    issues: Vec<Issue>,
}

impl Report {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Logs and stores an issue.
    fn push(&mut self, issue: Issue) {
        warn!("{issue}");
        self.issues.push(issue);
    }

    /// Records a skipped namelist line.
    pub fn row(&mut self, line: usize, message: impl Into<String>) {
        self.push(Issue {
            kind:    IssueKind::Row,
            folder:  None,
            file:    None,
            line:    Some(line),
            message: message.into(),
        });
    }

    /// Records a submission file that could not be credited to a student.
    pub fn submission(
        &mut self,
        folder: impl Into<String>,
        file: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.push(Issue {
            kind:    IssueKind::Submission,
            folder:  Some(folder.into()),
            file:    Some(file.into()),
            line:    None,
            message: message.into(),
        });
    }

    /// Records assignment folders that exceed the namelist's capacity.
    pub fn capacity(&mut self, message: impl Into<String>) {
        self.push(Issue {
            kind:    IssueKind::Capacity,
            folder:  None,
            file:    None,
            line:    None,
            message: message.into(),
        });
    }

    /// All issues, oldest first.
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Issues of one kind.
    pub fn of_kind(&self, kind: IssueKind) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |issue| issue.kind == kind)
    }

    /// Number of submission files that could not be credited.
    pub fn file_error_count(&self) -> usize {
        self.of_kind(IssueKind::Submission).count()
    }

    /// True if nothing went wrong.
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Counters for one assignment folder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderSummary {
    /// Assignment folder name.
    pub folder:          String,
    /// 1-based assignment number.
    pub assignment:      usize,
    /// Files with the configured extension found in the folder.
    pub files_found:     usize,
    /// Files credited to a student, resubmissions included.
    pub students_marked: usize,
    /// Marks that went from 0 to 1.
    pub newly_marked:    usize,
    /// Files that could not be credited.
    pub file_errors:     usize,
}

/// Counters for a whole `process` run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessSummary {
    /// Assignment folders actually scanned.
    pub folders_processed: usize,
    /// Files with the configured extension found in those folders.
    pub files_found:       usize,
    /// Files credited to a student, resubmissions included.
    pub marks_recorded:    usize,
    /// Marks that went from 0 to 1.
    pub newly_marked:      usize,
    /// Files that could not be credited.
    pub file_errors:       usize,
}

impl ProcessSummary {
    /// Adds one folder's counters to the run totals.
    pub fn absorb(&mut self, folder: &FolderSummary) {
        self.folders_processed += 1;
        self.files_found += folder.files_found;
        self.marks_recorded += folder.students_marked;
        self.newly_marked += folder.newly_marked;
        self.file_errors += folder.file_errors;
    }
}
