// ********* Input data structures ***********

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::Display;

/// The bare voter entry standing for the presiding officer casting a
/// tie-breaking vote. It is not a legislator and never gets a vote record.
pub const PRESIDING_OFFICER_PLACEHOLDER: &str = "VP";

/// One of the two legislative bodies of a session.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum Chamber {
    House,
    Senate,
}

impl Chamber {
    /// The short tag used in the raw vote files and in the exported table.
    pub fn tag(&self) -> &'static str {
        match self {
            Chamber::House => "h",
            Chamber::Senate => "s",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Chamber> {
        match tag.to_ascii_lowercase().as_str() {
            "h" | "house" => Some(Chamber::House),
            "s" | "senate" => Some(Chamber::Senate),
            _ => None,
        }
    }
}

impl Display for Chamber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// A voter as listed under a vote label in a roll-call event.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct VoterDescriptor {
    pub display_name: String,
    pub legislator_id: String,
    pub party: String,
    pub state: String,
}

/// An entry of a vote list: either a member of the chamber, or the
/// placeholder for the presiding officer breaking a tie.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub enum Voter {
    Member(VoterDescriptor),
    PresidingOfficer,
}

/// A single roll-call event, as decoded from one input file.
///
/// `votes` maps the raw vote label ("Yea", "No", "Not Voting", ...) to the
/// voters listed under it, in file order.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct RawVoteEvent {
    pub measure_id: String,
    pub date: String,
    pub result: String,
    pub chamber: Chamber,
    pub votes: BTreeMap<String, Vec<Voter>>,
}

/// A recorded vote. Anything else (absence, "present", ...) is not recorded.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum VoteValue {
    Nay,
    Yea,
}

/// The cell value for a legislator who has no recorded yea or nay on a measure.
pub const MISSING_VOTE: i8 = -1;

impl VoteValue {
    pub fn as_cell(&self) -> i8 {
        match self {
            VoteValue::Nay => 0,
            VoteValue::Yea => 1,
        }
    }

    /// Inverse of `as_cell`. The missing vote sentinel maps to `None`.
    pub fn from_cell(cell: i8) -> Option<VoteValue> {
        match cell {
            0 => Some(VoteValue::Nay),
            1 => Some(VoteValue::Yea),
            _ => None,
        }
    }
}

// ********* Accumulated records *********

/// Metadata for one measure voted on during the session.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct Measure {
    pub measure_id: String,
    /// Any representation that sorts chronologically as a string (ISO 8601).
    pub date: String,
    pub result: String,
    pub chamber: Chamber,
}

impl Measure {
    pub fn new(
        measure_id: &str,
        date: &str,
        result: &str,
        chamber: Chamber,
    ) -> Result<Measure, VoteTableError> {
        if measure_id.trim().is_empty() {
            return Err(VoteTableError::EmptyMeasureId);
        }
        if date.trim().is_empty() {
            return Err(VoteTableError::MissingMeasureField {
                measure_id: measure_id.to_string(),
                field: "date",
            });
        }
        Ok(Measure {
            measure_id: measure_id.to_string(),
            date: date.to_string(),
            result: result.to_string(),
            chamber,
        })
    }
}

/// The static attributes of a legislator, as listed with one of their votes.
/// The ledger keeps those of the earliest measure they voted on.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct LegislatorAttrs {
    pub congress_id: String,
    pub chamber: Chamber,
    pub party: String,
    pub state: String,
}

impl LegislatorAttrs {
    pub fn new(
        congress_id: &str,
        chamber: Chamber,
        party: &str,
        state: &str,
    ) -> Result<LegislatorAttrs, VoteTableError> {
        for (field, value) in [("id", congress_id), ("party", party), ("state", state)] {
            if value.trim().is_empty() {
                return Err(VoteTableError::MissingVoterField {
                    voter: congress_id.to_string(),
                    field,
                });
            }
        }
        Ok(LegislatorAttrs {
            congress_id: congress_id.to_string(),
            chamber,
            party: party.to_string(),
            state: state.to_string(),
        })
    }

    pub fn from_voter(
        voter: &VoterDescriptor,
        chamber: Chamber,
    ) -> Result<LegislatorAttrs, VoteTableError> {
        LegislatorAttrs::new(&voter.legislator_id, chamber, &voter.party, &voter.state).map_err(
            |e| match e {
                VoteTableError::MissingVoterField { field, .. } => {
                    VoteTableError::MissingVoterField {
                        voter: voter.display_name.clone(),
                        field,
                    }
                }
                e => e,
            },
        )
    }
}

/// The key identifying a legislator (one table row) within one run.
#[derive(Eq, PartialEq, Debug, Clone, Hash, Ord, PartialOrd)]
pub struct IdentityKey(pub String);

impl IdentityKey {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for IdentityKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How the identity key of a legislator is derived from a voter entry.
///
/// - DisplayName: the first token of the display name, title-cased. Two
/// legislators sharing a surname end up in the same row.
///
/// - LegislatorId: the identifier provided with the vote. Stable, but the
/// table is then labelled by identifiers instead of names.
#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub enum IdentityKeyMode {
    DisplayName,
    LegislatorId,
}

impl Default for IdentityKeyMode {
    fn default() -> Self {
        IdentityKeyMode::DisplayName
    }
}

// ******** Errors *********

/// Input records that cannot be turned into measures or vote records.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum VoteTableError {
    EmptyMeasureId,
    MissingMeasureField {
        measure_id: String,
        field: &'static str,
    },
    EmptyDisplayName {
        legislator_id: String,
    },
    MissingVoterField {
        voter: String,
        field: &'static str,
    },
}

impl Error for VoteTableError {}

impl Display for VoteTableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VoteTableError::EmptyMeasureId => write!(f, "vote event without a measure identifier"),
            VoteTableError::MissingMeasureField { measure_id, field } => {
                write!(f, "measure {}: missing field {}", measure_id, field)
            }
            VoteTableError::EmptyDisplayName { legislator_id } => {
                write!(f, "voter {:?} has an empty display name", legislator_id)
            }
            VoteTableError::MissingVoterField { voter, field } => {
                write!(f, "voter {:?}: missing field {}", voter, field)
            }
        }
    }
}
