use std::io::Write;

use crate::classify::AggregationKey;
use crate::error::Result;
use crate::question::Question;
use crate::tally::AggregateEntry;

pub const HEADER: [&str; 2] = ["subject", "statistic"];

pub fn subject(entry: &AggregateEntry) -> String {
    match &entry.key {
        AggregationKey::Airline { name, code } => format!("{name} ({code})"),
        AggregationKey::Country { name } => name.clone(),
        AggregationKey::Airport { name, code, city, country } => {
            format!("{name} ({code}), {city}, {country}")
        }
    }
}

/// Country counts are accumulated negatively; flip them back for display.
pub fn statistic(question: Question, entry: &AggregateEntry) -> i64 {
    match question {
        Question::DestinationCountry => -entry.count,
        Question::CanadaByAirline | Question::DestinationAirport => entry.count,
    }
}

/// Writes the header and the first `limit` ranked entries. Returns the number
/// of data rows written.
pub fn write_top<W: Write>(
    output: W,
    question: Question,
    ranked: &[AggregateEntry],
    limit: usize,
) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new().from_writer(output);
    writer.write_record(HEADER)?;

    let mut rows = 0;
    for entry in ranked.iter().take(limit) {
        writer.write_record([subject(entry), statistic(question, entry).to_string()])?;
        rows += 1;
    }
    writer.flush().map_err(csv::Error::from)?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    fn entry(key: AggregationKey, count: i64) -> AggregateEntry {
        AggregateEntry { key, representative: Record::default(), count }
    }

    fn render(question: Question, ranked: &[AggregateEntry], limit: usize) -> String {
        let mut buffer = Vec::new();
        write_top(&mut buffer, question, ranked, limit).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn airline_rows() {
        let ranked = vec![
            entry(AggregationKey::Airline { name: "AirA".into(), code: "AA".into() }, 3),
            entry(AggregationKey::Airline { name: "AirB".into(), code: "BB".into() }, 1),
        ];
        assert_eq!(
            render(Question::CanadaByAirline, &ranked, 2),
            "subject,statistic\nAirA (AA),3\nAirB (BB),1\n"
        );
    }

    #[test]
    fn country_statistic_is_positive() {
        let ranked = vec![
            entry(AggregationKey::Country { name: "Mexico".into() }, -4),
            entry(AggregationKey::Country { name: "Chile".into() }, -2),
        ];
        assert_eq!(render(Question::DestinationCountry, &ranked, 1), "subject,statistic\nMexico,4\n");
    }

    #[test]
    fn airport_subject_is_quoted() {
        let ranked = vec![entry(
            AggregationKey::Airport {
                name: "Pearson".into(),
                code: "CYYZ".into(),
                city: "Toronto".into(),
                country: "Canada".into(),
            },
            12,
        )];
        assert_eq!(
            render(Question::DestinationAirport, &ranked, 10),
            "subject,statistic\n\"Pearson (CYYZ), Toronto, Canada\",12\n"
        );
    }

    #[test]
    fn zero_limit_writes_header_only() {
        let ranked = vec![entry(AggregationKey::Country { name: "Chile".into() }, -2)];
        let mut buffer = Vec::new();
        let rows = write_top(&mut buffer, Question::DestinationCountry, &ranked, 0).unwrap();
        assert_eq!(rows, 0);
        assert_eq!(buffer, b"subject,statistic\n");
    }

    #[test]
    fn empty_ranking_writes_header_only() {
        assert_eq!(render(Question::CanadaByAirline, &[], 5), "subject,statistic\n");
    }
}
