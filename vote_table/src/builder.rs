use log::{debug, warn};

pub use crate::config::*;
use crate::labels::{is_procedural_only, resolve_votes};
use crate::ledger::{identity_key, CastOutcome, LegislatorLedger};
use crate::measures::{MeasureIndex, RecordOutcome};
use crate::table::{build_table, DenseTable};

/// The changes one event brings to a session, validated but not applied yet.
///
/// Preparing an update does not touch any shared state, so events can be
/// prepared independently and merged one at a time afterwards.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct EventUpdate {
    pub measure: Measure,
    pub casts: Vec<(IdentityKey, LegislatorAttrs, VoteValue)>,
    /// Only "Present" or "Not Voting" labels (or none at all) in this event.
    pub procedural_only: bool,
}

impl EventUpdate {
    pub fn prepare(
        event: &RawVoteEvent,
        mode: IdentityKeyMode,
    ) -> Result<EventUpdate, VoteTableError> {
        let measure = Measure::new(&event.measure_id, &event.date, &event.result, event.chamber)?;
        let resolved = resolve_votes(&event.votes);
        let mut casts = Vec::new();
        for (voter, value) in resolved.casts() {
            let key = identity_key(voter, mode)?;
            let attrs = LegislatorAttrs::from_voter(voter, event.chamber)?;
            casts.push((key, attrs, value));
        }
        Ok(EventUpdate {
            measure,
            casts,
            procedural_only: is_procedural_only(&event.votes),
        })
    }
}

/// Counts for one applied event.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Default)]
pub struct EventSummary {
    pub yeas: usize,
    pub nays: usize,
    pub overwritten_votes: usize,
    pub skipped: bool,
}

/// Accumulates the events of one session and builds the table.
///
/// ```
/// use std::collections::BTreeMap;
/// use vote_table::builder::SessionBuilder;
/// use vote_table::*;
///
/// let mut votes = BTreeMap::new();
/// votes.insert(
///     "Yea".to_string(),
///     vec![Voter::Member(VoterDescriptor {
///         display_name: "Cruz (R-TX)".to_string(),
///         legislator_id: "S355".to_string(),
///         party: "R".to_string(),
///         state: "TX".to_string(),
///     })],
/// );
/// let event = RawVoteEvent {
///     measure_id: "s1-113.2013".to_string(),
///     date: "2013-01-22".to_string(),
///     result: "Passed".to_string(),
///     chamber: Chamber::Senate,
///     votes,
/// };
///
/// let mut builder = SessionBuilder::new(IdentityKeyMode::DisplayName);
/// builder.add_event(&event)?;
/// let table = builder.build();
/// assert_eq!(table.cell("Cruz", "s1-113.2013"), Some(1));
///
/// # Ok::<(), VoteTableError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SessionBuilder {
    mode: IdentityKeyMode,
    skip_procedural_only: bool,
    measures: MeasureIndex,
    ledger: LegislatorLedger,
}

impl SessionBuilder {
    pub fn new(mode: IdentityKeyMode) -> SessionBuilder {
        SessionBuilder {
            mode,
            skip_procedural_only: false,
            measures: MeasureIndex::new(),
            ledger: LegislatorLedger::new(),
        }
    }

    /// If set, events with only procedural labels do not produce a column.
    pub fn skip_procedural_only(self, skip: bool) -> SessionBuilder {
        SessionBuilder {
            skip_procedural_only: skip,
            ..self
        }
    }

    pub fn identity_key_mode(&self) -> IdentityKeyMode {
        self.mode
    }

    /// Adds one event. Nothing is changed if the event is invalid.
    pub fn add_event(&mut self, event: &RawVoteEvent) -> Result<EventSummary, VoteTableError> {
        let update = EventUpdate::prepare(event, self.mode)?;
        Ok(self.apply(update))
    }

    /// Merges a prepared update into the session.
    pub fn apply(&mut self, update: EventUpdate) -> EventSummary {
        let measure = update.measure;
        let measure_id = measure.measure_id.as_str();
        if update.procedural_only && self.skip_procedural_only {
            debug!("apply: {}: only procedural votes, skipping", measure_id);
            return EventSummary {
                skipped: true,
                ..EventSummary::default()
            };
        }
        if update.casts.is_empty() {
            warn!("apply: {}: no yea or nay recorded", measure_id);
        }

        if let RecordOutcome::Overwritten(previous) = self.measures.record(measure.clone()) {
            warn!(
                "apply: measure {} seen again, replacing {:?}",
                measure_id, previous
            );
        }

        let mut summary = EventSummary::default();
        for (key, attrs, value) in update.casts {
            match value {
                VoteValue::Yea => summary.yeas += 1,
                VoteValue::Nay => summary.nays += 1,
            }
            if let CastOutcome::Overwritten(previous) =
                self.ledger.cast_vote(key.clone(), &attrs, &measure, value)
            {
                warn!(
                    "apply: {}: vote of {} changed from {:?} to {:?}",
                    measure_id, key, previous, value
                );
                summary.overwritten_votes += 1;
            }
        }
        debug!("apply: {}: {:?}", measure_id, summary);
        summary
    }

    pub fn measures(&self) -> &MeasureIndex {
        &self.measures
    }

    pub fn ledger(&self) -> &LegislatorLedger {
        &self.ledger
    }

    /// Freezes the session and builds the table.
    pub fn build(self) -> DenseTable {
        let ordered = self.measures.finalize();
        build_table(&ordered, &self.ledger)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn member(name: &str, party: &str, state: &str) -> Voter {
        Voter::Member(VoterDescriptor {
            display_name: name.to_string(),
            legislator_id: format!("ID-{}", name),
            party: party.to_string(),
            state: state.to_string(),
        })
    }

    fn event(
        id: &str,
        date: &str,
        chamber: Chamber,
        votes: &[(&str, Vec<Voter>)],
    ) -> RawVoteEvent {
        RawVoteEvent {
            measure_id: id.to_string(),
            date: date.to_string(),
            result: "Passed".to_string(),
            chamber,
            votes: votes
                .iter()
                .map(|(l, v)| (l.to_string(), v.clone()))
                .collect::<BTreeMap<String, Vec<Voter>>>(),
        }
    }

    fn h1() -> RawVoteEvent {
        event(
            "h1",
            "2013-01-03",
            Chamber::House,
            &[
                ("Aye", vec![member("A", "D", "CA"), member("B", "R", "TX")]),
                ("No", vec![member("C", "D", "NY")]),
            ],
        )
    }

    fn s1() -> RawVoteEvent {
        event(
            "s1",
            "2013-01-05",
            Chamber::Senate,
            &[
                ("Yea", vec![member("A", "D", "CA"), Voter::PresidingOfficer]),
                ("Nay", vec![member("D", "R", "OH")]),
                ("Not Voting", vec![member("E", "R", "UT")]),
            ],
        )
    }

    #[test]
    fn two_chambers() {
        init();
        let mut builder = SessionBuilder::new(IdentityKeyMode::DisplayName);
        builder.add_event(&s1()).unwrap();
        builder.add_event(&h1()).unwrap();
        let table = builder.build();
        assert_eq!(
            table.columns(),
            vec!["Party", "State", "Chamber", "h1", "s1"]
        );
        let rows: Vec<(&str, Vec<i8>)> = table
            .rows
            .iter()
            .map(|r| (r.key.as_str(), r.cells.clone()))
            .collect();
        assert_eq!(
            rows,
            vec![
                ("A", vec![1, 1]),
                ("B", vec![1, -1]),
                ("C", vec![0, -1]),
                ("D", vec![-1, 0]),
            ]
        );
        // h1 is the earliest vote of A, even though s1 was added first.
        assert_eq!(table.row("A").unwrap().chamber, Chamber::House);
        assert_eq!(table.row("D").unwrap().party, "R");
    }

    #[test]
    fn every_resolved_voter_is_recorded() {
        init();
        let mut builder = SessionBuilder::new(IdentityKeyMode::DisplayName);
        let summary = builder.add_event(&s1()).unwrap();
        assert_eq!(summary.yeas, 1);
        assert_eq!(summary.nays, 1);
        let a = builder.ledger().get(&IdentityKey("A".to_string())).unwrap();
        assert_eq!(a.votes.get("s1"), Some(&VoteValue::Yea));
        let d = builder.ledger().get(&IdentityKey("D".to_string())).unwrap();
        assert_eq!(d.votes.get("s1"), Some(&VoteValue::Nay));
        assert!(builder.ledger().get(&IdentityKey("E".to_string())).is_none());
        assert_eq!(builder.ledger().len(), 2);
    }

    #[test]
    fn same_event_twice() {
        let mut once = SessionBuilder::new(IdentityKeyMode::DisplayName);
        once.add_event(&h1()).unwrap();
        let mut twice = SessionBuilder::new(IdentityKeyMode::DisplayName);
        twice.add_event(&h1()).unwrap();
        let summary = twice.add_event(&h1()).unwrap();
        assert_eq!(summary.overwritten_votes, 0);
        assert_eq!(once.ledger(), twice.ledger());
        assert_eq!(once.measures(), twice.measures());
        assert_eq!(once.build(), twice.build());
    }

    #[test]
    fn input_order_does_not_matter() {
        let events = vec![h1(), s1(), event("h0", "2013-01-05", Chamber::House, &[])];
        let mut forward = SessionBuilder::new(IdentityKeyMode::DisplayName);
        for e in events.iter() {
            forward.add_event(e).unwrap();
        }
        let mut backward = SessionBuilder::new(IdentityKeyMode::DisplayName);
        for e in events.iter().rev() {
            backward.add_event(e).unwrap();
        }
        let table = forward.build();
        assert_eq!(table.measure_ids, vec!["h1", "h0", "s1"]);
        assert_eq!(table, backward.build());
    }

    #[test]
    fn conflicting_vote_last_write_wins() {
        init();
        let mut builder = SessionBuilder::new(IdentityKeyMode::DisplayName);
        builder.add_event(&h1()).unwrap();
        let flipped = event(
            "h1",
            "2013-01-04",
            Chamber::House,
            &[("Nay", vec![member("A", "D", "CA")])],
        );
        let summary = builder.add_event(&flipped).unwrap();
        assert_eq!(summary.overwritten_votes, 1);
        assert_eq!(builder.measures().get("h1").unwrap().date, "2013-01-04");
        let table = builder.build();
        assert_eq!(table.cell("A", "h1"), Some(0));
        // B and C keep the votes of the first observation.
        assert_eq!(table.cell("B", "h1"), Some(1));
        assert_eq!(table.cell("C", "h1"), Some(0));
    }

    #[test]
    fn procedural_only_events() {
        let quorum = event(
            "h2",
            "2013-01-04",
            Chamber::House,
            &[("Present", vec![member("A", "D", "CA")])],
        );

        let mut kept = SessionBuilder::new(IdentityKeyMode::DisplayName);
        kept.add_event(&h1()).unwrap();
        kept.add_event(&quorum).unwrap();
        let table = kept.build();
        assert_eq!(table.measure_ids, vec!["h1", "h2"]);
        assert!(table.rows.iter().all(|r| r.cells[1] == MISSING_VOTE));

        let mut skipping =
            SessionBuilder::new(IdentityKeyMode::DisplayName).skip_procedural_only(true);
        skipping.add_event(&h1()).unwrap();
        let summary = skipping.add_event(&quorum).unwrap();
        assert!(summary.skipped);
        assert_eq!(skipping.build().measure_ids, vec!["h1"]);
    }

    #[test]
    fn invalid_event_changes_nothing() {
        let mut builder = SessionBuilder::new(IdentityKeyMode::DisplayName);
        builder.add_event(&h1()).unwrap();
        let bad = event(
            "s9",
            "2013-02-01",
            Chamber::Senate,
            &[
                ("Yea", vec![member("Z", "D", "CA")]),
                ("Nay", vec![member("Y", "", "CA")]),
            ],
        );
        assert!(builder.add_event(&bad).is_err());
        assert!(builder.measures().get("s9").is_none());
        assert!(builder.ledger().get(&IdentityKey("Z".to_string())).is_none());
        assert_eq!(builder.ledger().len(), 3);
    }

    #[test]
    fn keyed_by_legislator_id() {
        let mut builder = SessionBuilder::new(IdentityKeyMode::LegislatorId);
        builder.add_event(&h1()).unwrap();
        let table = builder.build();
        let keys: Vec<&str> = table.rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, vec!["ID-A", "ID-B", "ID-C"]);
    }
}
