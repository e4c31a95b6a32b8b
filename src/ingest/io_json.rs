// Decoding of the roll-call vote files.

use std::collections::BTreeMap;

use crate::ingest::*;
use snafu::prelude::*;

use serde::{Deserialize, Serialize};

pub fn read_event(path: &Path) -> IngestResult<RawVoteEvent> {
    let contents = fs::read_to_string(path).context(OpeningEventSnafu { path })?;
    parse_event(contents.as_str(), path)
}

pub fn parse_event(contents: &str, path: &Path) -> IngestResult<RawVoteEvent> {
    let ef: EventFile = serde_json::from_str(contents).context(ParsingEventSnafu { path })?;

    let chamber = Chamber::from_tag(&ef.chamber).context(UnknownChamberSnafu {
        chamber: ef.chamber.clone(),
        path,
    })?;

    let mut votes: BTreeMap<String, Vec<Voter>> = BTreeMap::new();
    for (label, entries) in ef.votes.into_iter() {
        let mut voters: Vec<Voter> = Vec::with_capacity(entries.len());
        for entry in entries.into_iter() {
            let voter = match entry {
                VoterEntry::Member(m) => Voter::Member(VoterDescriptor {
                    display_name: m.display_name,
                    legislator_id: m.id,
                    party: m.party,
                    state: m.state,
                }),
                VoterEntry::Placeholder(s) if s == PRESIDING_OFFICER_PLACEHOLDER => {
                    Voter::PresidingOfficer
                }
                VoterEntry::Placeholder(s) => {
                    return UnknownVoterEntrySnafu { entry: s, path }.fail();
                }
            };
            voters.push(voter);
        }
        debug!("parse_event: {}: {} {:?}", ef.vote_id, label, voters.len());
        votes.insert(label, voters);
    }

    Ok(RawVoteEvent {
        measure_id: ef.vote_id,
        date: ef.date,
        result: ef.result,
        chamber,
        votes,
    })
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct MemberEntry {
    pub display_name: String,
    pub id: String,
    pub party: String,
    pub state: String,
}

// The presiding officer appears as a bare string instead of a member.
#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum VoterEntry {
    Member(MemberEntry),
    Placeholder(String),
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
struct EventFile {
    pub vote_id: String,
    pub date: String,
    pub result: String,
    pub chamber: String,
    pub votes: BTreeMap<String, Vec<VoterEntry>>,
}
