//! Resolution of the vote labels of one event into yea and nay voter lists.
//!
//! The vocabulary depends on the chamber and on the session: the House
//! records "Aye"/"No" on some votes and "Yea"/"Nay" on others, the Senate
//! uses "Yea"/"Nay". Every label is looked up in a single table.

use std::collections::BTreeMap;

use crate::config::*;

/// The canonical meaning of a vote label.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum VoteCategory {
    Affirmative,
    Negative,
    /// Present, not voting, and any other status that is not a yea or a nay.
    Procedural,
}

/// Recognized labels, in lookup order within each category.
const LABELS: &[(&str, VoteCategory)] = &[
    ("Aye", VoteCategory::Affirmative),
    ("Yea", VoteCategory::Affirmative),
    ("No", VoteCategory::Negative),
    ("Nay", VoteCategory::Negative),
    ("Present", VoteCategory::Procedural),
    ("Not Voting", VoteCategory::Procedural),
];

/// The category of a raw label. Unknown labels are treated as procedural.
pub fn category_of(label: &str) -> VoteCategory {
    LABELS
        .iter()
        .find(|(l, _)| *l == label)
        .map(|(_, c)| *c)
        .unwrap_or(VoteCategory::Procedural)
}

/// The voters of one event who cast a yea or a nay.
///
/// An empty side means that no label of that side was present, which is a
/// valid outcome.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct ResolvedVotes<'a> {
    pub affirmative: Vec<&'a VoterDescriptor>,
    pub negative: Vec<&'a VoterDescriptor>,
}

impl<'a> ResolvedVotes<'a> {
    pub fn is_empty(&self) -> bool {
        self.affirmative.is_empty() && self.negative.is_empty()
    }

    /// All the recorded votes, yeas first.
    pub fn casts(&self) -> impl Iterator<Item = (&'a VoterDescriptor, VoteValue)> + '_ {
        self.affirmative
            .iter()
            .map(|v| (*v, VoteValue::Yea))
            .chain(self.negative.iter().map(|v| (*v, VoteValue::Nay)))
    }
}

/// Splits the vote mapping of one event into yea and nay voters.
///
/// If both synonyms of a side are present, their voters are concatenated in
/// lookup order. The presiding officer placeholder is dropped from both sides.
pub fn resolve_votes(votes: &BTreeMap<String, Vec<Voter>>) -> ResolvedVotes<'_> {
    ResolvedVotes {
        affirmative: voters_of(votes, VoteCategory::Affirmative),
        negative: voters_of(votes, VoteCategory::Negative),
    }
}

fn voters_of(
    votes: &BTreeMap<String, Vec<Voter>>,
    category: VoteCategory,
) -> Vec<&VoterDescriptor> {
    LABELS
        .iter()
        .filter(|(_, c)| *c == category)
        .filter_map(|(label, _)| votes.get(*label))
        .flat_map(|voters| voters.iter())
        .filter_map(|v| match v {
            Voter::Member(d) => Some(d),
            Voter::PresidingOfficer => None,
        })
        .collect()
}

/// True if every label of the event is a known procedural one ("Present",
/// "Not Voting"). An event without any label is procedural-only, an event
/// with an unknown label ("Guilty") is not.
pub fn is_procedural_only(votes: &BTreeMap<String, Vec<Voter>>) -> bool {
    votes.keys().all(|l| {
        LABELS
            .iter()
            .any(|(k, c)| *k == l.as_str() && *c == VoteCategory::Procedural)
    })
}
