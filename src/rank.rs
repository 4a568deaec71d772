use std::cmp::Ordering;

use crate::question::Question;
use crate::tally::AggregateEntry;

/// Total order used to rank entries for `question`.
///
/// Counts come first. Airline and airport counts rank highest first. Country
/// counts are stored negated, so ranking them ascending puts the country with
/// the most routes first. Equal counts fall back to the name, byte-wise
/// ascending, then to the whole key.
pub fn compare(question: Question, a: &AggregateEntry, b: &AggregateEntry) -> Ordering {
    let by_count = match question {
        Question::DestinationCountry => a.count.cmp(&b.count),
        Question::CanadaByAirline | Question::DestinationAirport => b.count.cmp(&a.count),
    };

    by_count
        .then_with(|| a.key.tiebreak().as_bytes().cmp(b.key.tiebreak().as_bytes()))
        .then_with(|| a.key.cmp(&b.key))
}

pub fn rank(mut entries: Vec<AggregateEntry>, question: Question) -> Vec<AggregateEntry> {
    entries.sort_by(| a, b | compare(question, a, b));
    entries
}
