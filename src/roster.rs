#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! Reading and writing the tab-delimited namelist.
//!
//! A namelist line is `ID<TAB>Name<TAB>[mark_1<TAB>...<TAB>mark_k]`, optionally
//! followed by `<TAB>Total<TAB>Rate` once the file has been processed. The
//! number of mark columns is not stored anywhere; it is inferred from the
//! first line that can be classified.

use std::path::{Path, PathBuf};

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{constants::FIELD_SEPARATOR, record::StudentRecord, report::Report};

/// Structural failures that make a namelist unusable.
#[derive(thiserror::Error, Debug)]
pub enum RosterError {
    /// The namelist path does not exist.
    #[error("Namelist file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// The namelist exists but could not be read.
    #[error("Could not read namelist file `{}`", path.display())]
    Read {
        /// namelist path
        path:   PathBuf,
        /// underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// No line had enough fields to establish the column layout.
    #[error(
        "Could not determine a consistent assignment mark column structure: all {lines} line(s) \
         are blank or malformed"
    )]
    UndeterminedSchema {
        /// number of lines seen, blank ones included
        lines: usize,
    },
    /// The namelist could not be written back.
    #[error("Failed to save namelist file `{}`", path.display())]
    Write {
        /// namelist path
        path:   PathBuf,
        /// underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

/// How a namelist line was classified.
///
/// The classification is sniffed, not declared. A line is augmented when its
/// last field is a decimal rate (it contains a `.`, as [`write`] always
/// produces) and the one before it is an integer. Integer marks therefore
/// never pass for a rate, but a hand-edited rate written without a decimal
/// point (`...\t3\t1`) is read as two more marks. An explicit header or
/// format marker would remove the guesswork.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineFormat {
    /// `ID, Name, marks...`
    Plain,
    /// `ID, Name, marks..., Total, Rate`
    Augmented,
}

impl LineFormat {
    /// Classifies a line that has already been split into fields.
    pub fn detect(fields: &[&str]) -> Self {
        if persisted_stats(fields).is_some() {
            LineFormat::Augmented
        } else {
            LineFormat::Plain
        }
    }
}

/// Parses the trailing `Total, Rate` pair of a line with at least four
/// fields. The rate must be written with a decimal point.
fn persisted_stats(fields: &[&str]) -> Option<(i64, f64)> {
    if fields.len() < 4 {
        return None;
    }
    let [.., total, rate] = fields else {
        return None;
    };
    let rate = rate.trim();
    if !rate.contains('.') {
        return None;
    }
    let rate = rate.parse::<f64>().ok()?;
    let total = total.trim().parse::<i64>().ok()?;
    Some((total, rate))
}

/// A parsed namelist.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roster {
    /// Retained records, in file order.
    pub records:      Vec<StudentRecord>,
    /// Number of mark columns every record carries.
    pub mark_columns: usize,
    /// Whether the first classified line carried Total/Rate columns.
    pub augmented:    bool,
}

impl Roster {
    /// True when no student records were retained.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// A line split into its parts after format detection.
struct Classified<'a> {
    /// detected format, after any downgrade
    format: LineFormat,
    /// raw mark fields
    marks:  &'a [&'a str],
    /// persisted total, or 0
    total:  i64,
    /// persisted rate, or 0.0
    rate:   f64,
}

/// Splits `rest` (everything after ID and Name) according to the detected
/// format of the whole line.
fn classify<'a>(
    fields: &'a [&'a str],
    rest: &'a [&'a str],
    line: usize,
    report: &mut Report,
) -> Classified<'a> {
    let plain = Classified {
        format: LineFormat::Plain,
        marks:  rest,
        total:  0,
        rate:   0.0,
    };

    if LineFormat::detect(fields) == LineFormat::Plain {
        return plain;
    }

    match persisted_stats(fields) {
        Some((total, rate)) if rest.len() >= 2 => {
            let (marks, _) = rest.split_at(rest.len() - 2);
            Classified {
                format: LineFormat::Augmented,
                marks,
                total,
                rate,
            }
        }
        _ => {
            report.row(
                line,
                "Error parsing pre-existing Total/Rate despite format detection. Using defaults.",
            );
            plain
        }
    }
}

/// Parses namelist lines into a [`Roster`].
///
/// Malformed lines are skipped and recorded in `report`; the column count is
/// fixed by the first line with at least an ID and a name, and later lines
/// with a different number of marks are dropped rather than padded. Input
/// with no lines at all is an empty roster, while input whose lines are all
/// blank or malformed is an error.
pub fn parse<'a>(
    lines: impl IntoIterator<Item = &'a str>,
    report: &mut Report,
) -> Result<Roster, RosterError> {
    let mut roster = Roster::default();
    let mut expected: Option<usize> = None;
    let mut seen = 0usize;

    for (index, raw) in lines.into_iter().enumerate() {
        let line_no = index + 1;
        seen += 1;
        let content = raw.trim();
        if content.is_empty() {
            continue;
        }

        let fields: Vec<&str> = content.split(FIELD_SEPARATOR).collect();
        if fields.len() < 2 {
            report.row(
                line_no,
                format!(
                    "Skipping malformed line: Not enough parts for ID and Name. Content: \
                     '{content}'"
                ),
            );
            continue;
        }
        let (head, rest) = fields.split_at(2);
        let [id, name] = head else {
            continue;
        };

        let line = classify(&fields, rest, line_no, report);

        match expected {
            None => {
                expected = Some(line.marks.len());
                roster.mark_columns = line.marks.len();
                roster.augmented = line.format == LineFormat::Augmented;
                info!(
                    "Namelist structure: Expecting {} assignment mark column(s).",
                    line.marks.len()
                );
                if roster.augmented {
                    info!("Detected 'Total' and 'Rate' columns; these values will be loaded.");
                }
            }
            Some(columns) if columns != line.marks.len() => {
                report.row(
                    line_no,
                    format!(
                        "Skipping line: Inconsistent number of assignment mark columns. Expected \
                         {columns}, found {}. Content: '{content}'",
                        line.marks.len()
                    ),
                );
                continue;
            }
            Some(_) => {}
        }

        let mut marks = match line
            .marks
            .iter()
            .map(|mark| mark.trim().parse::<i64>())
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(marks) => marks,
            Err(_) => {
                report.row(
                    line_no,
                    format!(
                        "Skipping malformed line due to non-integer value in assignment mark \
                         columns. Content: '{content}'"
                    ),
                );
                continue;
            }
        };
        marks.resize(roster.mark_columns, 0);

        roster.records.push(
            StudentRecord::builder()
                .id(*id)
                .name(*name)
                .marks(marks)
                .total(line.total)
                .rate(line.rate)
                .build(),
        );
    }

    match expected {
        None if seen > 0 => {
            error!("Could not determine a consistent assignment mark column structure.");
            Err(RosterError::UndeterminedSchema { lines: seen })
        }
        None => {
            warn!("Namelist is empty.");
            Ok(roster)
        }
        Some(_) => {
            if roster.is_empty() {
                warn!("No valid student data loaded after initial structure detection.");
            }
            Ok(roster)
        }
    }
}

/// Reads and parses the namelist at `path`. The file is read completely and
/// closed before parsing.
pub fn load(path: &Path, report: &mut Report) -> Result<Roster, RosterError> {
    if !path.exists() {
        return Err(RosterError::NotFound(path.to_path_buf()));
    }

    let contents = std::fs::read_to_string(path).map_err(|source| RosterError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    info!("Loading namelist from {}", path.display());
    parse(contents.lines(), report)
}

/// Serializes records in the augmented format, one newline-terminated line
/// per record. Marks are truncated or zero-padded to `mark_columns`; the rate
/// is written with two decimals.
pub fn write(records: &[StudentRecord], mark_columns: usize) -> String {
    records
        .iter()
        .map(|record| {
            let marks = record
                .marks()
                .iter()
                .copied()
                .chain(std::iter::repeat(0))
                .take(mark_columns)
                .map(|mark| mark.to_string());

            let line = [record.id().to_owned(), record.name().to_owned()]
                .into_iter()
                .chain(marks)
                .chain([record.total().to_string(), format!("{:.2}", record.rate())])
                .join(&FIELD_SEPARATOR.to_string());
            format!("{line}\n")
        })
        .collect()
}

/// Overwrites the namelist at `path` with [`write`]'s output.
pub fn save(
    path: &Path,
    records: &[StudentRecord],
    mark_columns: usize,
) -> Result<(), RosterError> {
    std::fs::write(path, write(records, mark_columns)).map_err(|source| RosterError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Successfully saved updated student data to {}", path.display());
    Ok(())
}
