//! Turns raw input into [`Record`]s.
//!
//! Two layouts are understood: one route per comma separated line, and the
//! colon-delimited block layout where every route spans one `key: value` line
//! per field. Neither layout quotes or escapes its fields.

use bstr::ByteSlice;

use crate::error::{Error, Result};
use crate::record::{Airline, Airport, Record};

pub const COLUMNS: usize = 13;
const HEADER_FIRST_FIELD: &str = "airline_name";
const BLOCK_MARKER: &str = "-";

/// Keeps letters, plus spaces and hyphens once the first letter has been seen.
/// Quotes, digits and other punctuation are dropped, as is trailing space.
pub fn clean_field(raw: &str) -> String {
    let mut cleaned = String::with_capacity(raw.len());
    for c in raw.chars() {
        if c.is_alphabetic() || (!cleaned.is_empty() && (c == ' ' || c == '-')) {
            cleaned.push(c);
        }
    }
    cleaned.truncate(cleaned.trim_end().len());
    cleaned
}

pub fn is_csv_header(line: &[u8]) -> bool {
    line.split_str(",")
        .next()
        .is_some_and(| first | first.trim() == HEADER_FIRST_FIELD.as_bytes())
}

/// Builds a record from one 13-column line. Altitude columns are ignored.
pub fn record_from_line(text: &str, line: u64) -> Result<Record> {
    let columns: Vec<&str> = text.split(',').map(str::trim).collect();
    if columns.len() != COLUMNS {
        return Err(Error::MalformedRow { line, found: columns.len() });
    }
    let column = | index: usize | columns[index].to_string();

    Ok(Record::new(
        Airline::new(column(0), column(1), column(2)),
        Airport::new(column(3), column(4), column(5), column(6)),
        Airport::new(column(8), column(9), column(10), column(11)),
    ))
}

#[derive(Debug, Default)]
struct PartialRecord {
    start_line: u64,
    airline_name: Option<String>,
    airline_code: Option<String>,
    airline_country: Option<String>,
    origin_name: Option<String>,
    origin_city: Option<String>,
    origin_country: Option<String>,
    origin_code: Option<String>,
    destination_name: Option<String>,
    destination_city: Option<String>,
    destination_country: Option<String>,
    destination_code: Option<String>,
}

impl PartialRecord {
    fn new(start_line: u64) -> Self {
        Self { start_line, ..Self::default() }
    }

    fn set(&mut self, key: &str, value: &str, line: u64) -> Result<()> {
        let slot = match key {
            "airline_name" => &mut self.airline_name,
            "airline_icao_unique_code" => &mut self.airline_code,
            "airline_country" => &mut self.airline_country,
            "from_airport_name" => &mut self.origin_name,
            "from_airport_city" => &mut self.origin_city,
            "from_airport_country" => &mut self.origin_country,
            "from_airport_icao_unique_code" => &mut self.origin_code,
            "to_airport_name" => &mut self.destination_name,
            "to_airport_city" => &mut self.destination_city,
            "to_airport_country" => &mut self.destination_country,
            "to_airport_icao_unique_code" => &mut self.destination_code,
            "from_airport_altitude" | "to_airport_altitude" => return Ok(()),
            _ => return Err(Error::UnknownField { line, field: key.to_string() }),
        };
        *slot = Some(clean_field(value));
        Ok(())
    }

    fn finish(self) -> Result<Record> {
        let line = self.start_line;
        let take = | value: Option<String>, field: &'static str | {
            value.ok_or(Error::MissingField { line, field })
        };

        Ok(Record::new(
            Airline::new(
                take(self.airline_name, "airline_name")?,
                take(self.airline_code, "airline_icao_unique_code")?,
                take(self.airline_country, "airline_country")?,
            ),
            Airport::new(
                take(self.origin_name, "from_airport_name")?,
                take(self.origin_city, "from_airport_city")?,
                take(self.origin_country, "from_airport_country")?,
                take(self.origin_code, "from_airport_icao_unique_code")?,
            ),
            Airport::new(
                take(self.destination_name, "to_airport_name")?,
                take(self.destination_city, "to_airport_city")?,
                take(self.destination_country, "to_airport_country")?,
                take(self.destination_code, "to_airport_icao_unique_code")?,
            ),
        ))
    }
}

/// Iterator over the records of a colon-delimited block document.
pub struct BlockReader<'a> {
    lines: std::iter::Enumerate<bstr::Lines<'a>>,
    pending: Option<PartialRecord>,
    started: bool,
}

impl<'a> BlockReader<'a> {
    pub fn new(input: &'a [u8]) -> Self {
        Self { lines: input.lines().enumerate(), pending: None, started: false }
    }

    fn read_line(&mut self, index: usize, raw: &[u8]) -> Result<Option<Record>> {
        let line = index as u64 + 1;
        let text = raw.to_str().map_err(|_| Error::Utf8 { line })?.trim();
        if text.is_empty() {
            return Ok(None);
        }

        let (starts_block, field) = match text.strip_prefix(BLOCK_MARKER) {
            Some(rest) => (true, rest.trim_start()),
            None => (false, text),
        };
        let (key, value) = field.split_once(':').unwrap_or((field, ""));
        let key = key.trim();

        let first = !self.started;
        self.started = true;
        if first && !starts_block && value.trim().is_empty() {
            return Ok(None);
        }

        let mut finished = None;
        if starts_block {
            finished = self.pending.replace(PartialRecord::new(line));
        }
        if !key.is_empty() {
            match self.pending.as_mut() {
                Some(pending) => pending.set(key, value, line)?,
                None => return Err(Error::OrphanField { line }),
            }
        }
        finished.map(PartialRecord::finish).transpose()
    }
}

impl Iterator for BlockReader<'_> {
    type Item = Result<Record>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((index, raw)) = self.lines.next() {
            match self.read_line(index, raw) {
                Ok(None) => continue,
                Ok(Some(record)) => return Some(Ok(record)),
                Err(error) => return Some(Err(error)),
            }
        }
        self.pending.take().map(PartialRecord::finish)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOCKS: &str = "\
routes:
- airline_name: 'Air Canada'
  airline_icao_unique_code: ACA
  airline_country: Canada
  from_airport_name: 'Vancouver International Airport'
  from_airport_city: Vancouver
  from_airport_country: Canada
  from_airport_icao_unique_code: CYVR
  from_airport_altitude: 14
  to_airport_name: 'Lester B. Pearson International Airport'
  to_airport_city: Toronto
  to_airport_country: Canada
  to_airport_icao_unique_code: CYYZ
  to_airport_altitude: 569
- airline_name: WestJet
  airline_icao_unique_code: WJA
  airline_country: Canada
  from_airport_name: 'Calgary International Airport'
  from_airport_city: Calgary
  from_airport_country: Canada
  from_airport_icao_unique_code: CYYC
  from_airport_altitude: 3557
  to_airport_name: 'Los Angeles International Airport'
  to_airport_city: 'Los Angeles'
  to_airport_country: 'United States'
  to_airport_icao_unique_code: KLAX
  to_airport_altitude: 125
";

    #[test]
    fn clean_field_strips_quotes_and_leading_noise() {
        assert_eq!(clean_field(" 'Air Canada'\n"), "Air Canada");
        assert_eq!(clean_field("\"Aero-Mexico\""), "Aero-Mexico");
        assert_eq!(clean_field(" - Lester B. Pearson "), "Lester B Pearson");
        assert_eq!(clean_field("C3PO"), "CPO");
        assert_eq!(clean_field("Montréal"), "Montréal");
        assert_eq!(clean_field("  1234 "), "");
    }

    #[test]
    fn detects_csv_header() {
        assert!(is_csv_header(b"airline_name,airline_icao_unique_code,airline_country"));
        assert!(is_csv_header(b" airline_name ,x"));
        assert!(!is_csv_header(b"Air Canada,ACA,Canada"));
        assert!(!is_csv_header(b""));
    }

    #[test]
    fn line_maps_columns_and_skips_altitudes() {
        let text = "Air Canada, ACA ,Canada,Vancouver Intl,Vancouver,Canada,CYVR,14,Pearson,Toronto,Canada,CYYZ,569";
        let record = record_from_line(text, 1).unwrap();
        assert_eq!(record.airline, Airline::new("Air Canada", "ACA", "Canada"));
        assert_eq!(record.origin, Airport::new("Vancouver Intl", "Vancouver", "Canada", "CYVR"));
        assert_eq!(record.destination, Airport::new("Pearson", "Toronto", "Canada", "CYYZ"));
    }

    #[test]
    fn short_line_is_rejected_with_its_line() {
        assert!(matches!(record_from_line("Air Canada,ACA", 7), Err(Error::MalformedRow { line: 7, found: 2 })));
    }

    #[test]
    fn reads_blocks() {
        let records: Vec<Record> = BlockReader::new(BLOCKS.as_bytes()).collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].airline, Airline::new("Air Canada", "ACA", "Canada"));
        assert_eq!(records[0].destination.name, "Lester B Pearson International Airport");
        assert_eq!(records[1].destination, Airport::new(
            "Los Angeles International Airport", "Los Angeles", "United States", "KLAX",
        ));
    }

    #[test]
    fn incomplete_block_names_missing_field() {
        let input = "routes:\n- airline_name: X\n  airline_icao_unique_code: XX\n";
        let result: Result<Vec<Record>> = BlockReader::new(input.as_bytes()).collect();
        assert!(matches!(result, Err(Error::MissingField { line: 2, field: "airline_country" })));
    }

    #[test]
    fn unknown_and_orphan_fields_are_errors() {
        let unknown = "routes:\n- airline_name: X\n  airline_colour: red\n";
        let result: Result<Vec<Record>> = BlockReader::new(unknown.as_bytes()).collect();
        assert!(matches!(result, Err(Error::UnknownField { line: 3, .. })));

        let orphan = "routes:\n  airline_name: X\n";
        let result: Result<Vec<Record>> = BlockReader::new(orphan.as_bytes()).collect();
        assert!(matches!(result, Err(Error::OrphanField { line: 2 })));
    }

    #[test]
    fn section_header_after_blank_lines_is_skipped() {
        let input = format!("\n\n{BLOCKS}");
        let records: Vec<Record> = BlockReader::new(input.as_bytes()).collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 2);

        let truncated = "\nroutes:\n- airline_name: X\n";
        let result: Result<Vec<Record>> = BlockReader::new(truncated.as_bytes()).collect();
        assert!(matches!(result, Err(Error::MissingField { line: 3, .. })));
    }

    #[test]
    fn empty_document_has_no_records() {
        assert_eq!(BlockReader::new(b"routes:\n").count(), 0);
        assert_eq!(BlockReader::new(b"").count(), 0);
    }
}
