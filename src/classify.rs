use crate::question::Question;
use crate::record::Record;

const CANADA: &str = "Canada";

/// Grouping identity of a record under one question.
///
/// The derived ordering is only used as the last resort tiebreak when ranking.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AggregationKey {
    Airline { name: String, code: String },
    Country { name: String },
    Airport { name: String, code: String, city: String, country: String },
}

impl AggregationKey {
    /// The field ranked second after the count.
    pub fn tiebreak(&self) -> &str {
        match self {
            Self::Airline { name, .. } | Self::Country { name } | Self::Airport { name, .. } => name,
        }
    }
}

pub fn classify(question: Question, record: &Record) -> Option<(AggregationKey, i64)> {
    let key = match question {
        Question::CanadaByAirline => {
            if record.destination.country != CANADA {
                return None;
            }
            AggregationKey::Airline {
                name: record.airline.name.clone(),
                code: record.airline.code.clone(),
            }
        }
        Question::DestinationCountry => AggregationKey::Country {
            name: record.destination.country.clone(),
        },
        Question::DestinationAirport => AggregationKey::Airport {
            name: record.destination.name.clone(),
            code: record.destination.code.clone(),
            city: record.destination.city.clone(),
            country: record.destination.country.clone(),
        },
    };

    Some((key, question.unit_delta()))
}
