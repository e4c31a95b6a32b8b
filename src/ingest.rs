use log::{debug, info, warn};

use snafu::{prelude::*, Snafu};
use vote_table::builder::{EventUpdate, SessionBuilder};
use vote_table::*;

use std::fs;
use std::path::{Path, PathBuf};

use text_diff::print_diff;

pub mod config_reader;
mod io_common;
mod io_csv;
mod io_json;

use crate::ingest::config_reader::*;

#[derive(Debug, Snafu)]
pub enum IngestError {
    #[snafu(display("Error scanning directory {}", path.display()))]
    ScanningInput {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Error opening vote file {}", path.display()))]
    OpeningEvent {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Malformed vote file {}", path.display()))]
    ParsingEvent {
        source: serde_json::Error,
        path: PathBuf,
    },
    #[snafu(display("Invalid vote in file {}", path.display()))]
    InvalidEvent {
        source: VoteTableError,
        path: PathBuf,
    },
    #[snafu(display("Unknown chamber {chamber:?} in vote file {}", path.display()))]
    UnknownChamber { chamber: String, path: PathBuf },
    #[snafu(display("Unknown voter entry {entry:?} in vote file {}", path.display()))]
    UnknownVoterEntry { entry: String, path: PathBuf },

    #[snafu(display("Error opening configuration file {path}"))]
    OpeningConfig {
        source: std::io::Error,
        path: String,
    },
    #[snafu(display("Error parsing configuration file {path}"))]
    ParsingConfig {
        source: serde_json::Error,
        path: String,
    },

    #[snafu(display("Error creating output directory {}", path.display()))]
    CreatingOutputDir {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Error formatting table for {}", path.display()))]
    WritingTable { source: csv::Error, path: PathBuf },
    #[snafu(display("Error writing table to {}", path.display()))]
    PersistingTable {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Error opening table {}", path.display()))]
    OpeningTable {
        source: std::io::Error,
        path: PathBuf,
    },
    #[snafu(display("Error reading table {}", path.display()))]
    ReadingTable { source: csv::Error, path: PathBuf },
    #[snafu(display("Error parsing line {lineno} of table {}: {content}", path.display()))]
    ParsingTable {
        path: PathBuf,
        lineno: usize,
        content: String,
    },
    #[snafu(display("Table {} differs from reference {}", path.display(), reference.display()))]
    ReferenceMismatch { path: PathBuf, reference: PathBuf },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type IngestResult<T> = Result<T, IngestError>;

/// Reads all the vote files of a session and writes its table.
///
/// Returns the path of the table. Any malformed vote file stops the run
/// before anything is written.
pub fn run_session(
    config: &SessionConfig,
    session: &str,
    reference: Option<&Path>,
) -> IngestResult<PathBuf> {
    let input_dir = config.session_input_dir(session);
    info!("Reading vote files from {}", input_dir.display());
    let files = io_common::collect_event_files(&input_dir)?;
    if files.is_empty() {
        whatever!("No vote file found in {}", input_dir.display())
    }
    info!("Found {} vote files", files.len());

    let table = build_session_table(config, &files)?;
    info!(
        "Session {}: {} legislators, {} measures",
        session,
        table.rows.len(),
        table.measure_ids.len()
    );

    let out = config.table_path(session);
    io_csv::write_table(&table, &out)?;
    info!("Table written to {}", out.display());

    if let Some(reference_path) = reference {
        check_reference(&out, reference_path)?;
    }
    Ok(out)
}

fn build_session_table(config: &SessionConfig, files: &[PathBuf]) -> IngestResult<DenseTable> {
    let mut builder = SessionBuilder::new(config.identity_key)
        .skip_procedural_only(config.skip_procedural_only_events);
    let mut skipped = 0;
    for path in files.iter() {
        let event = io_json::read_event(path)?;
        // The whole file is validated before the session is touched.
        let update = EventUpdate::prepare(&event, builder.identity_key_mode())
            .context(InvalidEventSnafu { path: path.clone() })?;
        let summary = builder.apply(update);
        debug!(
            "{}: {} yeas, {} nays",
            io_common::simplify_file_name(path),
            summary.yeas,
            summary.nays
        );
        if summary.skipped {
            skipped += 1;
        }
    }
    if skipped > 0 {
        info!("Skipped {} events with only procedural votes", skipped);
    }
    Ok(builder.build())
}

fn check_reference(path: &Path, reference: &Path) -> IngestResult<()> {
    let produced = io_csv::read_table(path)?;
    let expected = io_csv::read_table(reference)?;
    if produced == expected {
        info!("Table matches reference {}", reference.display());
        return Ok(());
    }
    warn!("Found differences with the reference table");
    let produced_s = fs::read_to_string(path).context(OpeningTableSnafu { path })?;
    let expected_s = fs::read_to_string(reference).context(OpeningTableSnafu { path: reference })?;
    print_diff(expected_s.as_str(), produced_s.as_str(), "\n");
    ReferenceMismatchSnafu { path, reference }.fail()
}
