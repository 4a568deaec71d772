use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Question {
    /// Routes into Canada, per airline.
    CanadaByAirline,
    /// Routes arriving in each destination country.
    DestinationCountry,
    /// Routes arriving at each destination airport.
    DestinationAirport,
}

impl Question {
    pub const fn number(self) -> u8 {
        match self {
            Self::CanadaByAirline => 1,
            Self::DestinationCountry => 2,
            Self::DestinationAirport => 3,
        }
    }

    /// Amount added to a key's count for every record that maps to it.
    pub const fn unit_delta(self) -> i64 {
        match self {
            Self::DestinationCountry => -1,
            Self::CanadaByAirline | Self::DestinationAirport => 1,
        }
    }
}

impl FromStr for Question {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let number = trimmed
            .strip_prefix('q')
            .or_else(|| trimmed.strip_prefix('Q'))
            .unwrap_or(trimmed);

        match number {
            "1" => Ok(Self::CanadaByAirline),
            "2" => Ok(Self::DestinationCountry),
            "3" => Ok(Self::DestinationAirport),
            _ => Err(Error::UnknownQuestion(value.to_string())),
        }
    }
}

impl Display for Question {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "q{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_numbers_and_prefixed_forms() {
        assert_eq!("1".parse::<Question>().unwrap(), Question::CanadaByAirline);
        assert_eq!("q2".parse::<Question>().unwrap(), Question::DestinationCountry);
        assert_eq!(" Q3 ".parse::<Question>().unwrap(), Question::DestinationAirport);
    }

    #[test]
    fn rejects_anything_else() {
        for bad in ["0", "4", "", "q", "one", "12"] {
            assert!(matches!(bad.parse::<Question>(), Err(Error::UnknownQuestion(_))), "{bad}");
        }
    }

    #[test]
    fn country_question_counts_down() {
        assert_eq!(Question::CanadaByAirline.unit_delta(), 1);
        assert_eq!(Question::DestinationCountry.unit_delta(), -1);
        assert_eq!(Question::DestinationAirport.unit_delta(), 1);
    }
}
