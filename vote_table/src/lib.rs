/*!

Builds a dense legislator by measure table out of the roll-call votes of a
legislative session.

Every event (one recorded vote on one measure) lists its voters under labels
such as "Yea", "Aye", "Nay", "No", "Present" or "Not Voting". Only yeas (1)
and nays (0) are recorded. The final table has one row per legislator, the
columns `Party`, `State`, `Chamber`, and then one column per measure in
chronological order. A legislator without a yea or a nay on a measure gets
[`MISSING_VOTE`] (-1) in that column, which must not be read as a third kind
of vote.

The easiest entry point is the [`builder::SessionBuilder`].
*/

mod config;
pub mod builder;
pub mod labels;
pub mod ledger;
pub mod measures;
pub mod table;

pub use crate::config::*;
pub use crate::table::{DenseTable, TableRow, INDEX_COLUMN, METADATA_COLUMNS};
