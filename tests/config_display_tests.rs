use std::{collections::HashMap, path::Path};

use attend::{
    Config, Report, StudentRecord,
    config::normalize_extension,
    display::{attendance_table, format_rate, overall_summary, student_details},
    report::ProcessSummary,
};

#[test]
fn defaults_apply_without_environment() {
    let config = Config::from_vars(|_| None);

    assert_eq!(config, Config::default());
    assert_eq!(config.namelist(), Path::new("namelist.txt"));
    assert_eq!(config.submissions_dir(), Path::new("submissions"));
    assert_eq!(config.extension(), ".py");
}

#[test]
fn environment_overrides_defaults() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("ATTEND_NAMELIST", "roster.tsv"),
        ("ATTEND_SUBMISSIONS_DIR", "exercises"),
        ("ATTEND_EXTENSION", "zip"),
    ]);
    let config = Config::from_vars(|key| vars.get(key).map(|v| v.to_string()));

    assert_eq!(config.namelist(), Path::new("roster.tsv"));
    assert_eq!(config.submissions_dir(), Path::new("exercises"));
    assert_eq!(config.extension(), ".zip");
}

#[test]
fn blank_variables_are_ignored() {
    let config = Config::from_vars(|_| Some("   ".to_string()));
    assert_eq!(config, Config::default());
}

#[test]
fn builder_normalizes_extension() {
    let config = Config::builder().extension("txt").build();
    assert_eq!(config.extension(), ".txt");
    assert_eq!(normalize_extension(".py"), ".py");
    assert_eq!(normalize_extension(""), "");
}

#[test]
fn rate_shows_fraction_and_percent() {
    assert_eq!(format_rate(0.75), "0.75 (75 %)");
    assert_eq!(format_rate(0.0), "0.00 (0 %)");
}

#[test]
fn table_has_one_column_per_assignment() {
    let records = vec![
        StudentRecord::builder()
            .id("00000001")
            .name("Alice")
            .marks(vec![1, 0, 1])
            .total(2)
            .rate(2.0 / 3.0)
            .build(),
    ];
    let table = attendance_table(&records, 3);

    for header in ["ID", "Name", "A1", "A2", "A3", "Total", "Rate"] {
        assert!(table.contains(header), "missing {header} in\n{table}");
    }
    assert!(!table.contains("A4"));
    assert!(table.contains("00000001"));
    assert!(table.contains("0.67 (67 %)"));
}

#[test]
fn details_list_every_assignment() {
    let alice = StudentRecord::builder()
        .id("00000001")
        .name("Alice")
        .marks(vec![1, 0])
        .total(1)
        .rate(0.5)
        .build();
    let details = student_details(&alice, 2);

    assert!(details.contains("Assignment 1"));
    assert!(details.contains("Assignment 2"));
    assert!(details.contains("0.50 (50 %)"));

    let none = student_details(&alice, 0);
    assert!(none.contains("No assignment columns"));
}

#[test]
fn summary_lists_file_errors() {
    let mut report = Report::new();
    report.submission("A", "anonymous.py", "Could not extract student ID.");
    let summary = ProcessSummary {
        folders_processed: 1,
        files_found:       1,
        file_errors:       1,
        ..ProcessSummary::default()
    };

    let text = overall_summary(&summary, &report);
    assert!(text.contains("File 'anonymous.py' in folder 'A': Could not extract student ID."));
}
