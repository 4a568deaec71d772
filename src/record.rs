#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Airline {
    pub name: String,
    pub code: String,
    pub country: String,
}

impl Airline {
    pub fn new(name: impl Into<String>, code: impl Into<String>, country: impl Into<String>) -> Self {
        Self { name: name.into(), code: code.into(), country: country.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Airport {
    pub name: String,
    pub city: String,
    pub country: String,
    pub code: String,
}

impl Airport {
    pub fn new(
        name: impl Into<String>,
        city: impl Into<String>,
        country: impl Into<String>,
        code: impl Into<String>,
    ) -> Self {
        Self { name: name.into(), city: city.into(), country: country.into(), code: code.into() }
    }
}

/// One route: an airline flying from `origin` to `destination`.
///
/// Altitudes present in the input are dropped by the parser.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub airline: Airline,
    pub origin: Airport,
    pub destination: Airport,
}

impl Record {
    pub fn new(airline: Airline, origin: Airport, destination: Airport) -> Self {
        Self { airline, origin, destination }
    }
}
