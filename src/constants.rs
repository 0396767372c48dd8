#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

/// Namelist file used when none is given on the command line or in the
/// environment.
pub const DEFAULT_NAMELIST_FILE: &str = "namelist.txt";

/// Root directory holding one subfolder per assignment.
pub const DEFAULT_SUBMISSIONS_DIR: &str = "submissions";

/// Extension of the files counted as submissions.
pub const DEFAULT_FILE_EXTENSION: &str = ".py";

/// Number of digits in a student ID embedded in a submission file name.
pub const STUDENT_ID_LEN: usize = 8;

/// Field separator used by the namelist format.
pub const FIELD_SEPARATOR: char = '\t';

/// Environment variable overriding the namelist path.
pub const NAMELIST_ENV: &str = "ATTEND_NAMELIST";

/// Environment variable overriding the submissions root directory.
pub const SUBMISSIONS_DIR_ENV: &str = "ATTEND_SUBMISSIONS_DIR";

/// Environment variable overriding the submission file extension.
pub const EXTENSION_ENV: &str = "ATTEND_EXTENSION";
