use log::debug;

use std::collections::HashMap;

use crate::config::*;

/// What a call to `record` did to the index.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum RecordOutcome {
    Inserted,
    /// The same metadata was already recorded.
    Unchanged,
    /// Different metadata was recorded under this identifier and got replaced.
    Overwritten(Measure),
}

/// One metadata record per measure identifier seen during a run.
///
/// When the same identifier is seen again with different metadata, the
/// later observation replaces the earlier one. Insertion order is not kept:
/// `finalize` orders by date.
#[derive(Eq, PartialEq, Debug, Clone, Default)]
pub struct MeasureIndex {
    measures: HashMap<String, Measure>,
}

impl MeasureIndex {
    pub fn new() -> MeasureIndex {
        MeasureIndex::default()
    }

    pub fn record(&mut self, measure: Measure) -> RecordOutcome {
        match self
            .measures
            .insert(measure.measure_id.clone(), measure.clone())
        {
            None => RecordOutcome::Inserted,
            Some(previous) if previous == measure => RecordOutcome::Unchanged,
            Some(previous) => {
                debug!("record: replaced {:?}", previous);
                RecordOutcome::Overwritten(previous)
            }
        }
    }

    pub fn get(&self, measure_id: &str) -> Option<&Measure> {
        self.measures.get(measure_id)
    }

    pub fn len(&self) -> usize {
        self.measures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.measures.is_empty()
    }

    /// The measures in chronological order. Measures with the same date are
    /// ordered by identifier.
    pub fn finalize(self) -> Vec<Measure> {
        let mut res: Vec<Measure> = self.measures.into_values().collect();
        res.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.measure_id.cmp(&b.measure_id))
        });
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(id: &str, date: &str) -> Measure {
        Measure::new(id, date, "Passed", Chamber::House).unwrap()
    }

    fn ids(ms: &[Measure]) -> Vec<&str> {
        ms.iter().map(|m| m.measure_id.as_str()).collect()
    }

    #[test]
    fn finalize_orders_by_date_then_id() {
        let mut index = MeasureIndex::new();
        index.record(m("s3", "2013-01-05"));
        index.record(m("h9", "2013-01-03"));
        index.record(m("h10", "2013-01-03"));
        index.record(m("s1", "2013-01-04"));
        assert_eq!(ids(&index.finalize()), vec!["h10", "h9", "s1", "s3"]);
    }

    #[test]
    fn insertion_order_does_not_matter() {
        let all = vec![
            m("a", "2013-02-01"),
            m("b", "2013-01-01"),
            m("c", "2013-01-01"),
            m("d", "2012-12-31"),
        ];
        let mut forward = MeasureIndex::new();
        for x in all.iter() {
            forward.record(x.clone());
        }
        let mut backward = MeasureIndex::new();
        for x in all.iter().rev() {
            backward.record(x.clone());
        }
        assert_eq!(forward.finalize(), backward.finalize());
    }

    #[test]
    fn same_metadata_is_unchanged() {
        let mut index = MeasureIndex::new();
        assert_eq!(index.record(m("h1", "2013-01-03")), RecordOutcome::Inserted);
        assert_eq!(index.record(m("h1", "2013-01-03")), RecordOutcome::Unchanged);
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn later_metadata_wins() {
        let mut index = MeasureIndex::new();
        index.record(m("h1", "2013-01-03"));
        let later = Measure::new("h1", "2013-01-07", "Failed", Chamber::House).unwrap();
        assert_eq!(
            index.record(later.clone()),
            RecordOutcome::Overwritten(m("h1", "2013-01-03"))
        );
        assert_eq!(index.get("h1"), Some(&later));
        assert_eq!(index.finalize(), vec![later]);
    }

    #[test]
    fn invalid_measures() {
        assert_eq!(
            Measure::new(" ", "2013-01-03", "Passed", Chamber::Senate),
            Err(VoteTableError::EmptyMeasureId)
        );
        assert!(Measure::new("s1", "", "Passed", Chamber::Senate).is_err());
    }
}
