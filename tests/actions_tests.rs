use std::{fs, path::PathBuf};

use attend::{
    IssueKind, StudentRecord,
    actions::{self, ProcessArgs, find_students},
};
use uuid::Uuid;

fn temp_root() -> PathBuf {
    let root = std::env::temp_dir().join(format!("attend-actions-{}", Uuid::new_v4()));
    fs::create_dir_all(&root).expect("create temp root");
    root
}

/// Lays out a namelist with three assignment columns and two assignment
/// folders holding a mix of good and bad submissions.
fn fixture() -> (PathBuf, PathBuf, PathBuf) {
    let root = temp_root();
    let namelist = root.join("namelist.txt");
    fs::write(
        &namelist,
        "20241061\tBoringo Victor\t0\t0\t0\n\
         20241291\tHanae Dikha\t0\t0\t0\n\
         20241207\tHawanatu\t0\t0\t0\n",
    )
    .expect("write namelist");

    let submissions = root.join("submissions");
    let first = submissions.join("2025-03-24_01.37.01");
    let second = submissions.join("2025-04-21_01.40.00");
    fs::create_dir_all(first.join("C607-23")).expect("create first");
    fs::create_dir_all(second.join("C607-45")).expect("create second");

    fs::write(first.join("20241061_boringo victor_ex10cr.py"), "").expect("write");
    fs::write(first.join("C607-23/C607-23_20241291_HanaeDikha_10.py"), "").expect("write");
    fs::write(first.join("C607-23/20241291_resubmit.py"), "").expect("write");
    fs::write(first.join("anonymous.py"), "").expect("write");
    fs::write(first.join("20241061_notes.txt"), "").expect("write");
    fs::write(second.join("C607-45/C607-45_HAWANATU_20241207_14.py"), "").expect("write");
    fs::write(second.join("99999999_stranger.py"), "").expect("write");

    (root, namelist, submissions)
}

#[test]
fn process_marks_submissions_and_rewrites_namelist() {
    let (root, namelist, submissions) = fixture();

    let args = ProcessArgs::builder()
        .namelist(namelist.clone())
        .submissions_dir(submissions)
        .extension(".py")
        .build();
    let outcome = actions::process(&args).expect("process succeeds");

    assert_eq!(outcome.folders.len(), 2);
    assert_eq!(outcome.summary.folders_processed, 2);
    assert_eq!(outcome.summary.files_found, 6);
    assert_eq!(outcome.summary.marks_recorded, 4);
    assert_eq!(outcome.summary.newly_marked, 3);
    assert_eq!(outcome.summary.file_errors, 2);
    assert_eq!(outcome.report.file_error_count(), 2);

    let written = fs::read_to_string(&namelist).expect("read namelist");
    assert_eq!(
        written,
        "20241061\tBoringo Victor\t1\t0\t0\t1\t0.33\n\
         20241291\tHanae Dikha\t1\t0\t0\t1\t0.33\n\
         20241207\tHawanatu\t0\t1\t0\t1\t0.33\n"
    );

    // A second run over the same tree changes nothing.
    let again = actions::process(&args).expect("second run succeeds");
    assert_eq!(again.summary.newly_marked, 0);
    assert_eq!(fs::read_to_string(&namelist).expect("read namelist"), written);

    let _ = fs::remove_dir_all(root);
}

#[test]
fn extra_folders_are_reported_and_ignored() {
    let root = temp_root();
    let namelist = root.join("namelist.txt");
    fs::write(&namelist, "00000001\tAlice\t0\n").expect("write namelist");
    let submissions = root.join("submissions");
    fs::create_dir_all(submissions.join("A")).expect("create A");
    fs::create_dir_all(submissions.join("B")).expect("create B");
    fs::write(submissions.join("A/00000001.py"), "").expect("write");
    fs::write(submissions.join("B/00000001.py"), "").expect("write");

    let args = ProcessArgs::builder()
        .namelist(namelist.clone())
        .submissions_dir(submissions)
        .extension(".py")
        .build();
    let outcome = actions::process(&args).expect("process succeeds");

    assert_eq!(outcome.summary.folders_processed, 1);
    assert_eq!(outcome.report.of_kind(IssueKind::Capacity).count(), 1);
    assert_eq!(fs::read_to_string(&namelist).expect("read"), "00000001\tAlice\t1\t1\t1.00\n");

    let _ = fs::remove_dir_all(root);
}

#[test]
fn missing_submissions_root_still_saves() {
    let root = temp_root();
    let namelist = root.join("namelist.txt");
    fs::write(&namelist, "00000001\tAlice\t1\t0\n").expect("write namelist");

    let args = ProcessArgs::builder()
        .namelist(namelist.clone())
        .submissions_dir(root.join("nowhere"))
        .extension(".py")
        .build();
    let outcome = actions::process(&args).expect("process succeeds");

    assert!(outcome.folders.is_empty());
    assert_eq!(fs::read_to_string(&namelist).expect("read"), "00000001\tAlice\t1\t0\t1\t0.50\n");

    let _ = fs::remove_dir_all(root);
}

#[test]
fn process_fails_without_a_namelist() {
    let root = temp_root();
    let args = ProcessArgs::builder()
        .namelist(root.join("namelist.txt"))
        .submissions_dir(root.join("submissions"))
        .extension(".py")
        .build();

    assert!(actions::process(&args).is_err());
    let _ = fs::remove_dir_all(root);
}

#[test]
fn process_fails_on_an_empty_namelist() {
    let root = temp_root();
    let namelist = root.join("namelist.txt");
    fs::write(&namelist, "").expect("write namelist");
    let args = ProcessArgs::builder()
        .namelist(namelist.clone())
        .submissions_dir(root.join("submissions"))
        .extension(".py")
        .build();

    assert!(actions::process(&args).is_err());
    assert_eq!(fs::read_to_string(&namelist).expect("read"), "");
    let _ = fs::remove_dir_all(root);
}

fn ids(found: Vec<&StudentRecord>) -> Vec<String> {
    found.iter().map(|r| r.id().to_owned()).collect()
}

#[test]
fn find_students_matches_id_exactly_and_names_loosely() {
    let records = vec![
        StudentRecord::builder().id("00000001").name("Alice Smith").build(),
        StudentRecord::builder().id("00000002").name("Bob Smith").build(),
        StudentRecord::builder().id("00000003").name("Cara Jones").build(),
    ];

    assert_eq!(ids(find_students(&records, "00000002")), ["00000002"]);
    assert_eq!(ids(find_students(&records, "SMITH")), ["00000001"]);
    assert_eq!(ids(find_students(&records, "jones")), ["00000003"]);
    assert!(find_students(&records, "nobody").is_empty());
}

#[test]
fn name_match_is_kept_alongside_a_later_id_match() {
    let records = vec![
        StudentRecord::builder().id("00000001").name("Room 20241291 Alice").build(),
        StudentRecord::builder().id("00000002").name("Room 20241291 Bob").build(),
        StudentRecord::builder().id("20241291").name("Hanae Dikha").build(),
        StudentRecord::builder().id("00000004").name("Room 20241291 Dan").build(),
    ];

    assert_eq!(ids(find_students(&records, "20241291")), ["00000001", "20241291"]);
}

#[test]
fn query_recomputes_statistics() {
    let root = temp_root();
    let namelist = root.join("namelist.txt");
    fs::write(&namelist, "00000001\tAlice\t1\t1\t0\t1\t0.11\n00000002\tBob\t0\t0\t0\t0\t0.00\n")
        .expect("write namelist");

    let found = actions::query(&namelist, "alice").expect("query succeeds");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].total(), 2);
    assert!((found[0].rate() - 2.0 / 3.0).abs() < 1e-9);

    assert!(actions::query(&namelist, "nobody").expect("no match is fine").is_empty());

    // Querying never rewrites the file.
    assert!(
        fs::read_to_string(&namelist)
            .expect("read")
            .contains("0.11")
    );
    let _ = fs::remove_dir_all(root);
}

#[test]
fn view_recomputes_and_fails_on_missing_file() {
    let root = temp_root();
    let namelist = root.join("namelist.txt");
    fs::write(&namelist, "00000001\tAlice\t1\t0\t0\t0.00\n").expect("write namelist");

    let roster = actions::view(&namelist, false).expect("view succeeds");
    assert_eq!(roster.records[0].total(), 1);
    assert_eq!(roster.records[0].rate(), 0.5);

    let roster = actions::view(&namelist, true).expect("json view succeeds");
    assert_eq!(roster.mark_columns, 2);

    assert!(actions::view(&root.join("missing.txt"), false).is_err());
    let _ = fs::remove_dir_all(root);
}

#[test]
fn view_survives_hand_edited_huge_marks() {
    let root = temp_root();
    let namelist = root.join("namelist.txt");
    fs::write(&namelist, "00000001\tAlice\t9223372036854775807\t9223372036854775807\n")
        .expect("write namelist");

    let roster = actions::view(&namelist, false).expect("view succeeds");
    assert_eq!(roster.records[0].total(), i64::MAX);

    let found = actions::query(&namelist, "00000001").expect("query succeeds");
    assert_eq!(found[0].total(), i64::MAX);
    let _ = fs::remove_dir_all(root);
}
