use std::collections::BTreeMap;

use crate::config::*;
use crate::ledger::LegislatorLedger;

/// Label of the index column of the table.
pub const INDEX_COLUMN: &str = "Name";

/// The static columns that precede the measure columns.
pub const METADATA_COLUMNS: [&str; 3] = ["Party", "State", "Chamber"];

/// One legislator in the table.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct TableRow {
    pub key: IdentityKey,
    pub party: String,
    pub state: String,
    pub chamber: Chamber,
    /// One cell per measure column: 1 (yea), 0 (nay) or MISSING_VOTE.
    pub cells: Vec<i8>,
}

/// The legislator by measure vote table.
///
/// Rows are sorted by identity key, measure columns by date and then by
/// identifier. Every row has exactly one cell per measure.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct DenseTable {
    pub measure_ids: Vec<String>,
    pub rows: Vec<TableRow>,
}

impl DenseTable {
    /// The column labels, excluding the index column.
    pub fn columns(&self) -> Vec<String> {
        METADATA_COLUMNS
            .iter()
            .map(|s| s.to_string())
            .chain(self.measure_ids.iter().cloned())
            .collect()
    }

    pub fn num_columns(&self) -> usize {
        METADATA_COLUMNS.len() + self.measure_ids.len()
    }

    pub fn row(&self, key: &str) -> Option<&TableRow> {
        self.rows.iter().find(|r| r.key.as_str() == key)
    }

    /// The cell of a legislator for a measure, if both exist in the table.
    pub fn cell(&self, key: &str, measure_id: &str) -> Option<i8> {
        let col = self.measure_ids.iter().position(|m| m == measure_id)?;
        self.row(key).and_then(|r| r.cells.get(col).cloned())
    }

    /// All the recorded votes of the table, keyed by (legislator, measure).
    /// Missing votes are left out.
    pub fn recorded_votes(&self) -> BTreeMap<(String, String), VoteValue> {
        let mut res = BTreeMap::new();
        for row in self.rows.iter() {
            for (measure_id, cell) in self.measure_ids.iter().zip(row.cells.iter()) {
                if let Some(v) = VoteValue::from_cell(*cell) {
                    res.insert((row.key.0.clone(), measure_id.clone()), v);
                }
            }
        }
        res
    }
}

/// Joins the ordered measures with the ledger into a dense table.
///
/// `measures` is expected in column order, as returned by
/// `MeasureIndex::finalize`. Legislators without any vote on a measure get
/// MISSING_VOTE in that column.
pub fn build_table(measures: &[Measure], ledger: &LegislatorLedger) -> DenseTable {
    let measure_ids: Vec<String> = measures.iter().map(|m| m.measure_id.clone()).collect();
    let rows: Vec<TableRow> = ledger
        .iter()
        .map(|(key, record)| TableRow {
            key: key.clone(),
            party: record.attrs.party.clone(),
            state: record.attrs.state.clone(),
            chamber: record.attrs.chamber,
            cells: measure_ids
                .iter()
                .map(|m| {
                    record
                        .votes
                        .get(m)
                        .map(|v| v.as_cell())
                        .unwrap_or(MISSING_VOTE)
                })
                .collect(),
        })
        .collect();
    DenseTable { measure_ids, rows }
}
