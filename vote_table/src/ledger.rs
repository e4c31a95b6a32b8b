use log::debug;

use std::collections::{BTreeMap, HashMap};

use crate::config::*;

/// Everything known about one legislator after a run: the static attributes
/// and the sparse map from measure to vote.
///
/// The attributes are those listed with the earliest measure the legislator
/// voted on, by date then measure identifier. They do not depend on the
/// order in which the votes were cast.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct LegislatorRecord {
    pub attrs: LegislatorAttrs,
    pub votes: HashMap<String, VoteValue>,
    // (date, measure id) of the measure the attributes come from.
    attrs_source: (String, String),
}

/// What a call to `cast_vote` did to the ledger.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum CastOutcome {
    NewLegislator,
    Recorded,
    /// The same vote was already recorded.
    Unchanged,
    /// A different vote was recorded for this measure and got replaced.
    Overwritten(VoteValue),
}

/// Accumulates the votes of every legislator across all the events of a run.
///
/// Records are kept sorted by identity key, which is also the row order of
/// the final table.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct LegislatorLedger {
    records: BTreeMap<IdentityKey, LegislatorRecord>,
}

impl LegislatorLedger {
    pub fn new() -> LegislatorLedger {
        LegislatorLedger::default()
    }

    /// Records the vote of a legislator on a measure.
    ///
    /// The attributes replace the stored ones only when `measure` sorts
    /// strictly before the measure they were taken from. A later vote on the
    /// same measure replaces the earlier one.
    pub fn cast_vote(
        &mut self,
        key: IdentityKey,
        attrs: &LegislatorAttrs,
        measure: &Measure,
        value: VoteValue,
    ) -> CastOutcome {
        let source = (measure.date.clone(), measure.measure_id.clone());
        match self.records.get_mut(&key) {
            None => {
                let mut votes = HashMap::new();
                votes.insert(measure.measure_id.clone(), value);
                self.records.insert(
                    key,
                    LegislatorRecord {
                        attrs: attrs.clone(),
                        votes,
                        attrs_source: source,
                    },
                );
                CastOutcome::NewLegislator
            }
            Some(record) => {
                if record.attrs != *attrs {
                    // Usually two legislators sharing the same key, or a
                    // member moving from one chamber to the other.
                    debug!(
                        "cast_vote: {}: attributes {:?} from {:?}, {:?} from {:?}",
                        key, record.attrs, record.attrs_source, attrs, source
                    );
                }
                if source < record.attrs_source {
                    record.attrs = attrs.clone();
                    record.attrs_source = source;
                }
                match record.votes.insert(measure.measure_id.clone(), value) {
                    None => CastOutcome::Recorded,
                    Some(previous) if previous == value => CastOutcome::Unchanged,
                    Some(previous) => CastOutcome::Overwritten(previous),
                }
            }
        }
    }

    pub fn get(&self, key: &IdentityKey) -> Option<&LegislatorRecord> {
        self.records.get(key)
    }

    /// The records, in increasing order of identity key.
    pub fn iter(&self) -> impl Iterator<Item = (&IdentityKey, &LegislatorRecord)> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Derives the identity key of a voter.
pub fn identity_key(
    voter: &VoterDescriptor,
    mode: IdentityKeyMode,
) -> Result<IdentityKey, VoteTableError> {
    match mode {
        IdentityKeyMode::DisplayName => name_key(&voter.display_name).ok_or_else(|| {
            VoteTableError::EmptyDisplayName {
                legislator_id: voter.legislator_id.clone(),
            }
        }),
        IdentityKeyMode::LegislatorId => {
            let id = voter.legislator_id.trim();
            if id.is_empty() {
                Err(VoteTableError::MissingVoterField {
                    voter: voter.display_name.clone(),
                    field: "id",
                })
            } else {
                Ok(IdentityKey(id.to_string()))
            }
        }
    }
}

/// The first token of a display name, trailing commas removed, title-cased.
///
/// "PELOSI, Nancy" and "Pelosi (D-CA)" both become "Pelosi".
pub fn name_key(display_name: &str) -> Option<IdentityKey> {
    let token = display_name.split_whitespace().next()?;
    let token = token.trim_end_matches(',');
    if token.is_empty() {
        return None;
    }
    Some(IdentityKey(title_case(token)))
}

// Upper case at the start of every run of letters, lower case elsewhere:
// "o'rourke" -> "O'Rourke", "McCAIN" -> "Mccain".
fn title_case(s: &str) -> String {
    let mut res = String::with_capacity(s.len());
    let mut in_word = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if in_word {
                res.extend(c.to_lowercase());
            } else {
                res.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            res.push(c);
            in_word = false;
        }
    }
    res
}
