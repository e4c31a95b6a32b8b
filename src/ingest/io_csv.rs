// Writing and reading the session table in CSV format.

use std::io::Write;

use tempfile::NamedTempFile;

use crate::ingest::*;
use snafu::prelude::*;

/// Writes the table to `path`.
///
/// The content is fully formatted in memory, written to a temporary file
/// next to the destination and then renamed over it. On failure, the
/// destination is left untouched.
pub fn write_table(table: &DenseTable, path: &Path) -> IngestResult<()> {
    let buffer = format_table(table, path)?;

    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).context(CreatingOutputDirSnafu { path: dir })?;

    let mut tmp = NamedTempFile::new_in(dir).context(PersistingTableSnafu { path })?;
    tmp.write_all(&buffer).context(PersistingTableSnafu { path })?;
    tmp.as_file()
        .sync_all()
        .context(PersistingTableSnafu { path })?;
    tmp.persist(path)
        .map_err(|e| e.error)
        .context(PersistingTableSnafu { path })?;
    debug!("write_table: {} bytes to {}", buffer.len(), path.display());
    Ok(())
}

fn format_table(table: &DenseTable, path: &Path) -> IngestResult<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<String> = vec![INDEX_COLUMN.to_string()];
    header.extend(table.columns());
    wtr.write_record(&header).context(WritingTableSnafu { path })?;

    for row in table.rows.iter() {
        let mut record: Vec<String> = vec![
            row.key.to_string(),
            row.party.clone(),
            row.state.clone(),
            row.chamber.tag().to_string(),
        ];
        record.extend(row.cells.iter().map(|c| c.to_string()));
        wtr.write_record(&record).context(WritingTableSnafu { path })?;
    }

    wtr.into_inner()
        .map_err(|e| std::io::Error::new(e.error().kind(), e.to_string()))
        .context(PersistingTableSnafu { path })
}

/// Reads a table written by `write_table`.
pub fn read_table(path: &Path) -> IngestResult<DenseTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .context(ReadingTableSnafu { path })?;

    let headers = rdr.headers().context(ReadingTableSnafu { path })?.clone();
    let leading: Vec<&str> = headers.iter().take(1 + METADATA_COLUMNS.len()).collect();
    let mut expected: Vec<&str> = vec![INDEX_COLUMN];
    expected.extend(METADATA_COLUMNS.iter());
    if leading != expected {
        return ParsingTableSnafu {
            path,
            lineno: 1_usize,
            content: format!("{:?}", headers),
        }
        .fail();
    }
    let measure_ids: Vec<String> = headers
        .iter()
        .skip(expected.len())
        .map(|s| s.to_string())
        .collect();

    let mut rows: Vec<TableRow> = Vec::new();
    for (idx, record_r) in rdr.records().enumerate() {
        let lineno = idx + 2;
        let record = record_r.context(ReadingTableSnafu { path })?;
        let bad_line = || ParsingTableSnafu {
            path,
            lineno,
            content: format!("{:?}", record),
        };
        let chamber = record
            .get(3)
            .and_then(Chamber::from_tag)
            .with_context(bad_line)?;
        let mut cells: Vec<i8> = Vec::with_capacity(measure_ids.len());
        for s in record.iter().skip(expected.len()) {
            cells.push(parse_cell(s).with_context(bad_line)?);
        }
        rows.push(TableRow {
            key: IdentityKey(record[0].to_string()),
            party: record[1].to_string(),
            state: record[2].to_string(),
            chamber,
            cells,
        });
    }
    debug!("read_table: {}: {} rows", path.display(), rows.len());
    Ok(DenseTable { measure_ids, rows })
}

// Also accepts the float notation of other tools ("-1.0").
fn parse_cell(s: &str) -> Option<i8> {
    let x: f64 = s.trim().parse().ok()?;
    [1_i8, 0, MISSING_VOTE]
        .into_iter()
        .find(|c| f64::from(*c) == x)
}
