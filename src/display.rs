#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

use colored::Colorize;
use itertools::Itertools;
use tabled::{
    Table, Tabled,
    builder::Builder,
    settings::{Alignment, Modify, Panel, Style, object::Rows},
};

use crate::{
    record::StudentRecord,
    report::{FolderSummary, IssueKind, ProcessSummary, Report},
};

/// A two-column row for summary tables.
#[derive(Tabled)]
struct SummaryRow {
    /// what is being counted
    #[tabled(rename = "Metric")]
    metric: String,
    /// the count
    #[tabled(rename = "Value")]
    value:  String,
}

impl SummaryRow {
    /// Convenience constructor.
    fn new(metric: impl Into<String>, value: impl ToString) -> Self {
        Self {
            metric: metric.into(),
            value:  value.to_string(),
        }
    }
}

/// Formats a rate as `0.75 (75 %)`.
pub fn format_rate(rate: f64) -> String {
    format!("{rate:.2} ({:.0} %)", rate * 100.0)
}

/// Renders the whole namelist with one `A<n>` column per assignment.
pub fn attendance_table(records: &[StudentRecord], mark_columns: usize) -> String {
    let mut builder = Builder::default();

    let headers = ["ID".to_owned(), "Name".to_owned()]
        .into_iter()
        .chain((1..=mark_columns).map(|i| format!("A{i}")))
        .chain(["Total".to_owned(), "Rate".to_owned()]);
    builder.push_record(headers);

    for record in records {
        let marks = (0..mark_columns).map(|i| {
            record
                .marks()
                .get(i)
                .map_or_else(|| "0".to_owned(), i64::to_string)
        });
        let row = [record.id().to_owned(), record.name().to_owned()]
            .into_iter()
            .chain(marks)
            .chain([record.total().to_string(), format_rate(record.rate())]);
        builder.push_record(row);
    }

    let mut table = builder.build();
    table
        .with(Panel::header("Attendance/Submission Analysis"))
        .with(Panel::footer(format!("{} student(s)", records.len())))
        .with(
            Modify::new(Rows::first())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(
            Modify::new(Rows::last())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(Style::modern());
    table.to_string()
}

/// Renders one student's marks and summary.
pub fn student_details(record: &StudentRecord, mark_columns: usize) -> String {
    let mut out = format!("Student Details for ID: {}\n  Name: {}\n", record.id(), record.name());

    if mark_columns == 0 {
        out.push_str("  Assignment Marks: No assignment columns are configured in the namelist.\n");
    } else {
        let marks = (0..mark_columns)
            .map(|i| {
                SummaryRow::new(
                    format!("Assignment {}", i + 1),
                    record
                        .marks()
                        .get(i)
                        .map_or_else(|| "N/A".to_owned(), i64::to_string),
                )
            })
            .collect_vec();
        let mut table = Table::new(marks);
        table
            .with(Panel::header("Assignment Marks"))
            .with(Style::modern());
        out.push_str(&table.to_string());
        out.push('\n');
    }

    let summary = vec![
        SummaryRow::new("Total Submissions", record.total()),
        SummaryRow::new("Submission Rate", format_rate(record.rate())),
    ];
    let mut table = Table::new(summary);
    table
        .with(Panel::header("Overall Summary"))
        .with(Style::modern());
    out.push_str(&table.to_string());
    out
}

/// Renders the counters for one assignment folder.
pub fn folder_summary(summary: &FolderSummary, extension: &str) -> String {
    let rows = vec![
        SummaryRow::new(format!("Files found ({extension})"), summary.files_found),
        SummaryRow::new("Students successfully marked", summary.students_marked),
        SummaryRow::new("Newly marked", summary.newly_marked),
        SummaryRow::new("File errors in this folder", summary.file_errors),
    ];
    let mut table = Table::new(rows);
    table
        .with(Panel::header(format!(
            "Summary for folder: {} (Assignment {})",
            summary.folder, summary.assignment
        )))
        .with(
            Modify::new(Rows::first())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(Style::modern());
    table.to_string()
}

/// Renders the run totals followed by every issue collected along the way.
pub fn overall_summary(summary: &ProcessSummary, report: &Report) -> String {
    let rows = vec![
        SummaryRow::new("Total assignment folders processed", summary.folders_processed),
        SummaryRow::new("Total submission files found", summary.files_found),
        SummaryRow::new("Total submissions successfully recorded", summary.marks_recorded),
        SummaryRow::new("Total new marks set", summary.newly_marked),
        SummaryRow::new("Total file-related errors encountered", summary.file_errors),
    ];
    let mut table = Table::new(rows);
    table
        .with(Panel::header("Overall Processing Summary"))
        .with(
            Modify::new(Rows::first())
                .with(Alignment::center())
                .with(Alignment::center_vertical()),
        )
        .with(Style::modern());

    let mut out = table.to_string();
    out.push('\n');

    let file_errors = report.of_kind(IssueKind::Submission).collect_vec();
    if file_errors.is_empty() {
        out.push_str(&format!("{}\n", "No file-related errors encountered.".green()));
    } else {
        out.push_str(&format!("{}\n", "Error File Details:".red()));
        out.push_str(
            &file_errors
                .iter()
                .map(|issue| format!("  - {issue}"))
                .join("\n"),
        );
        out.push('\n');
    }

    let other = report
        .issues()
        .iter()
        .filter(|issue| issue.kind() != IssueKind::Submission)
        .collect_vec();
    if !other.is_empty() {
        out.push_str(&format!("{}\n", "Other warnings:".yellow()));
        out.push_str(&other.iter().map(|issue| format!("  - {issue}")).join("\n"));
        out.push('\n');
    }

    out
}
