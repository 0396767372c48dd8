use std::{fs, path::PathBuf};

use attend::{
    parsers::parser,
    submissions::{DiscoveryError, extract_student_id, list_assignment_folders, list_files},
};
use uuid::Uuid;

fn temp_root() -> PathBuf {
    let root = std::env::temp_dir().join(format!("attend-submissions-{}", Uuid::new_v4()));
    fs::create_dir_all(&root).expect("create temp root");
    root
}

#[test]
fn extracts_an_embedded_id() {
    assert_eq!(extract_student_id("report_12345678_final.py").as_deref(), Some("12345678"));
    assert_eq!(extract_student_id("_12345678_").as_deref(), Some("12345678"));
    assert_eq!(extract_student_id("12345678.py").as_deref(), Some("12345678"));
    assert_eq!(
        extract_student_id("C607-23_20241291_HanaeDikha_10.py").as_deref(),
        Some("20241291")
    );
}

#[test]
fn rejects_longer_and_missing_digit_runs() {
    assert_eq!(extract_student_id("123456789.py"), None);
    assert_eq!(extract_student_id("no_id_here.py"), None);
    assert_eq!(extract_student_id("1234567.py"), None);
    assert_eq!(extract_student_id(""), None);
}

#[test]
fn leftmost_id_wins() {
    assert_eq!(
        extract_student_id("123456789_11112222_33334444.py").as_deref(),
        Some("11112222")
    );
}

#[test]
fn digit_runs_splits_on_non_digits() {
    assert_eq!(parser::digit_runs("a12b345c").expect("parses"), vec!["12", "345"]);
    assert_eq!(parser::digit_runs("no digits").expect("parses"), Vec::<&str>::new());
    assert_eq!(parser::digit_runs("2024").expect("parses"), vec!["2024"]);
}

#[test]
fn folders_are_sorted_alphabetically() {
    let root = temp_root();
    for name in ["B", "A", "C"] {
        fs::create_dir_all(root.join(name)).expect("create folder");
    }
    fs::write(root.join("stray.txt"), "not a folder").expect("write file");

    let folders = list_assignment_folders(&root).expect("list folders");
    assert_eq!(folders, ["A", "B", "C"]);
    assert_eq!(folders[0], "A");

    let _ = fs::remove_dir_all(root);
}

#[test]
fn missing_root_is_an_error() {
    let root = std::env::temp_dir().join(format!("attend-missing-{}", Uuid::new_v4()));
    assert!(matches!(
        list_assignment_folders(&root),
        Err(DiscoveryError::NotADirectory(_))
    ));
}

#[test]
fn files_are_found_recursively_by_suffix() {
    let root = temp_root();
    let folder = root.join("2025-03-24");
    fs::create_dir_all(folder.join("C607-23/nested")).expect("create tree");
    fs::write(folder.join("20241061_victor.py"), "").expect("write");
    fs::write(folder.join("C607-23/C607-23_20241291_Hanae.py"), "").expect("write");
    fs::write(folder.join("C607-23/nested/deep_20240000.py"), "").expect("write");
    fs::write(folder.join("notes_20241061.txt"), "").expect("write");
    fs::create_dir_all(folder.join("dir.py")).expect("create dir named like a file");

    let files = list_files(&folder, ".py").expect("list files");
    let names: Vec<String> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

    assert_eq!(files.len(), 3);
    assert!(names.contains(&"20241061_victor.py".to_string()));
    assert!(names.contains(&"C607-23_20241291_Hanae.py".to_string()));
    assert!(names.contains(&"deep_20240000.py".to_string()));

    let _ = fs::remove_dir_all(root);
}

#[test]
fn missing_folder_has_no_files() {
    let root = std::env::temp_dir().join(format!("attend-nofolder-{}", Uuid::new_v4()));
    assert!(list_files(&root, ".py").expect("not an error").is_empty());
}
