#![warn(missing_docs)]
#![warn(clippy::missing_docs_in_private_items)]

//! # attend
//! ## Introduction
//!
//! Keeps a namelist of students up to date with the assignments they handed
//! in. Every folder under the submissions directory is one assignment
//! (alphabetical order decides which column it fills), and every file in it
//! whose name carries a student's 8-digit ID counts as that student's
//! submission.
//!
//! ## Usage
//!
//! `attend process namelist.txt submissions --ext .py --view`, then
//! `attend query namelist.txt 20241291` or `attend view namelist.txt`.
//!
//! Defaults for the namelist, submissions directory and extension can be set
//! with `ATTEND_NAMELIST`, `ATTEND_SUBMISSIONS_DIR` and `ATTEND_EXTENSION`,
//! either in the environment or in a `.env` file.

use std::path::PathBuf;

use anyhow::Result;
use attend::{
    Config,
    actions::{self, ProcessArgs},
    config::normalize_extension,
};
use bpaf::*;
use dotenvy::dotenv;
use tracing::{Level, metadata::LevelFilter};
use tracing_subscriber::{fmt, prelude::*, util::SubscriberInitExt};

/// Top-level CLI commands.
#[derive(Debug, Clone)]
enum Cmd {
    /// Scan submissions and update the namelist
    Process {
        /// namelist override
        namelist:        Option<PathBuf>,
        /// submissions root override
        submissions_dir: Option<PathBuf>,
        /// extension override
        ext:             Option<String>,
        /// print the table afterwards
        view:            bool,
    },
    /// Show one or more students
    Query(PathBuf, String),
    /// Show the whole namelist
    View(PathBuf, bool),
}

/// Parsed command line.
#[derive(Debug, Clone)]
struct Opts {
    /// log at debug level
    verbose: bool,
    /// the command to run
    cmd:     Cmd,
}

/// Parse the command line arguments and return `Opts`
fn options() -> Opts {
    /// parses the namelist path of `query` and `view`
    fn n() -> impl Parser<PathBuf> {
        positional("NAMELIST").help("Path to the student namelist text file")
    }

    let namelist = positional::<PathBuf>("NAMELIST")
        .help("Path to the student namelist text file (default: namelist.txt)")
        .optional();
    let submissions_dir = positional::<PathBuf>("SUBMISSIONS_DIR")
        .help("Root directory containing assignment subfolders (default: submissions)")
        .optional();
    let ext = long("ext")
        .help("File extension of submission files to look for (default: .py)")
        .argument::<String>("EXT")
        .optional();
    let view = long("view")
        .help("Display the updated attendance table after processing")
        .switch();
    let process = construct!(Cmd::Process {
        ext,
        view,
        namelist,
        submissions_dir,
    })
    .to_options()
    .command("process")
    .help("Process submissions, update records, and save to the namelist file");

    let identifier = positional::<String>("IDENTIFIER")
        .help("Student ID (exact match) or name (case-insensitive, partial match)");
    let query = construct!(Cmd::Query(n(), identifier))
        .to_options()
        .command("query")
        .help("Display details for a specific student");

    let json = long("json")
        .help("Print the records as JSON instead of a table")
        .switch();
    let view = construct!(Cmd::View(n(), json))
        .to_options()
        .command("view")
        .help("Display the entire namelist as a table");

    let verbose = short('v')
        .long("verbose")
        .help("Log debug messages")
        .switch();
    let cmd = construct!([process, query, view]);

    construct!(Opts { verbose, cmd })
        .to_options()
        .descr("Student submission attendance tracker")
        .run()
}

fn main() -> Result<()> {
    dotenv().ok();

    let opts = options();

    let fmt = fmt::layer()
        .without_time()
        .with_file(false)
        .with_line_number(false);
    let filter_layer = LevelFilter::from_level(if opts.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    });
    tracing_subscriber::registry()
        .with(fmt)
        .with(filter_layer)
        .init();

    let config = Config::from_env();

    match opts.cmd {
        Cmd::Process {
            namelist,
            submissions_dir,
            ext,
            view,
        } => {
            let args = ProcessArgs::builder()
                .namelist(namelist.unwrap_or_else(|| config.namelist().to_path_buf()))
                .submissions_dir(
                    submissions_dir.unwrap_or_else(|| config.submissions_dir().to_path_buf()),
                )
                .extension(
                    ext.map(|ext| normalize_extension(&ext))
                        .unwrap_or_else(|| config.extension().to_owned()),
                )
                .view(view)
                .build();
            actions::process(&args)?;
        }
        Cmd::Query(namelist, identifier) => {
            actions::query(&namelist, &identifier)?;
        }
        Cmd::View(namelist, json) => {
            actions::view(&namelist, json)?;
        }
    };

    Ok(())
}
