//! In-memory customer directory used as a stop source.
//!
//! Records mirror the customer spreadsheet columns: vendor code, customer
//! code and name, district, coordinates and the weekdays on which the
//! customer accepts visits.

use std::fmt;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::RecordError;
use crate::stop::Stop;
use crate::traits::{StopQuery, StopSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// The weekday a calendar date falls on.
    pub fn from_date(date: time::Date) -> Self {
        date.weekday().into()
    }
}

impl From<time::Weekday> for Weekday {
    fn from(day: time::Weekday) -> Self {
        match day {
            time::Weekday::Monday => Weekday::Monday,
            time::Weekday::Tuesday => Weekday::Tuesday,
            time::Weekday::Wednesday => Weekday::Wednesday,
            time::Weekday::Thursday => Weekday::Thursday,
            time::Weekday::Friday => Weekday::Friday,
            time::Weekday::Saturday => Weekday::Saturday,
            time::Weekday::Sunday => Weekday::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown weekday {0:?}")]
pub struct ParseWeekdayError(String);

impl FromStr for Weekday {
    type Err = ParseWeekdayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Weekday::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseWeekdayError(trimmed.to_string()))
    }
}

/// One customer row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    #[serde(rename = "Codigo_Vendedor")]
    pub vendor_code: String,
    #[serde(rename = "Codigo_Cliente")]
    pub customer_code: String,
    #[serde(rename = "Nombre_Cliente")]
    pub customer_name: String,
    #[serde(rename = "Distrito")]
    pub district: String,
    #[serde(rename = "LATITUD")]
    pub latitude: Option<f64>,
    #[serde(rename = "LONGITUD")]
    pub longitude: Option<f64>,
    /// Free-text list of weekday names, e.g. `"Monday, Thursday"`.
    #[serde(rename = "Dias_Sin_Rechazo")]
    pub visit_days: Option<String>,
}

impl CustomerRecord {
    /// Weekdays whose English name appears in the visit-day list.
    ///
    /// Matching is a case-sensitive substring search, so `"Monday, Friday"`
    /// and `"MondayFriday"` both name two days while `"monday"` names none.
    pub fn visit_weekdays(&self) -> Vec<Weekday> {
        Weekday::ALL
            .into_iter()
            .filter(|day| self.visits_on(*day))
            .collect()
    }

    pub fn visits_on(&self, weekday: Weekday) -> bool {
        self.visit_days
            .as_deref()
            .is_some_and(|days| days.contains(weekday.name()))
    }

    /// Whether this record belongs to `query`. Rows without a visit-day list
    /// never match.
    pub fn matches(&self, query: &StopQuery) -> bool {
        self.vendor_code == query.vendor_code
            && self.district == query.district
            && self.visits_on(query.weekday)
    }

    /// Convert to a stop. A missing coordinate becomes NaN so planning
    /// rejects the stop instead of silently placing it somewhere.
    pub fn to_stop(&self) -> Stop {
        Stop::new(
            self.customer_code.clone(),
            self.customer_name.clone(),
            self.latitude.unwrap_or(f64::NAN),
            self.longitude.unwrap_or(f64::NAN),
        )
    }
}

/// Customer records held in memory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerDirectory {
    records: Vec<CustomerRecord>,
}

impl CustomerDirectory {
    pub fn new(records: Vec<CustomerRecord>) -> Self {
        Self { records }
    }

    /// Read records from CSV with a header row.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, RecordError> {
        let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
        let records = reader
            .deserialize()
            .collect::<Result<Vec<CustomerRecord>, csv::Error>>()?;
        debug!(records = records.len(), "loaded customer records");
        Ok(Self { records })
    }

    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, RecordError> {
        let file = std::fs::File::open(path)?;
        Self::from_csv_reader(std::io::BufReader::new(file))
    }

    pub fn records(&self) -> &[CustomerRecord] {
        &self.records
    }

    /// Distinct districts in first-seen order.
    pub fn districts(&self) -> Vec<&str> {
        let mut districts: Vec<&str> = Vec::new();
        for record in &self.records {
            if !districts.contains(&record.district.as_str()) {
                districts.push(&record.district);
            }
        }
        districts
    }
}

impl StopSource for CustomerDirectory {
    fn find_stops(&self, query: &StopQuery) -> Vec<Stop> {
        self.records
            .iter()
            .filter(|record| record.matches(query))
            .map(CustomerRecord::to_stop)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
Codigo_Vendedor,Codigo_Cliente,Nombre_Cliente,Distrito,LATITUD,LONGITUD,Dias_Sin_Rechazo
V01,C001,Bodega Lucia,Miraflores,-12.1219,-77.0297,\"Monday, Thursday\"
V01,C002,Minimarket Sol,Miraflores,-12.1190,-77.0340,Tuesday
V02,C003,Abarrotes Rosa,Miraflores,-12.1250,-77.0250,Monday
V01,C004,Bodega Tito,Surco,-12.1450,-76.9900,Monday
V01,C005,Tienda Mary,Miraflores,,,Monday
V01,C006,Market Lima,Miraflores,-12.1200,-77.0300,
";

    #[test]
    fn test_weekday_parse_is_case_insensitive() {
        assert_eq!("monday".parse::<Weekday>(), Ok(Weekday::Monday));
        assert_eq!(" SUNDAY ".parse::<Weekday>(), Ok(Weekday::Sunday));
        assert!("Lunes".parse::<Weekday>().is_err());
        assert_eq!(Weekday::Friday.to_string(), "Friday");
    }

    #[test]
    fn test_weekday_from_date() {
        let date = time::Date::from_calendar_date(2024, time::Month::June, 3).unwrap();
        assert_eq!(Weekday::from_date(date), Weekday::Monday);

        let date = time::Date::from_calendar_date(2024, time::Month::June, 9).unwrap();
        assert_eq!(Weekday::from_date(date), Weekday::Sunday);
    }

    #[test]
    fn test_load_from_csv() {
        let directory = CustomerDirectory::from_csv_reader(CSV.as_bytes()).unwrap();
        assert_eq!(directory.records().len(), 6);

        let first = &directory.records()[0];
        assert_eq!(first.customer_name, "Bodega Lucia");
        assert_eq!(first.visit_weekdays(), vec![Weekday::Monday, Weekday::Thursday]);

        let missing = &directory.records()[4];
        assert_eq!(missing.latitude, None);
        assert_eq!(directory.records()[5].visit_days, None);
    }

    #[test]
    fn test_malformed_csv_is_an_error() {
        let bad = "Codigo_Vendedor,Codigo_Cliente,Nombre_Cliente,Distrito,LATITUD,LONGITUD,Dias_Sin_Rechazo\n\
                   V01,C001,Bodega,Miraflores,north,-77.0,Monday\n";
        let err = CustomerDirectory::from_csv_reader(bad.as_bytes()).unwrap_err();
        assert!(matches!(err, RecordError::Csv(_)));
    }

    #[test]
    fn test_districts_first_seen_order() {
        let directory = CustomerDirectory::from_csv_reader(CSV.as_bytes()).unwrap();
        assert_eq!(directory.districts(), vec!["Miraflores", "Surco"]);
    }

    #[test]
    fn test_find_stops_filters_vendor_district_and_day() {
        let directory = CustomerDirectory::from_csv_reader(CSV.as_bytes()).unwrap();
        let query = StopQuery::new("V01", Weekday::Monday, "Miraflores");

        let ids: Vec<String> = directory.find_stops(&query).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["C001", "C005"]);
    }

    #[test]
    fn test_visit_days_match_case_sensitively() {
        let mut record = CustomerDirectory::from_csv_reader(CSV.as_bytes()).unwrap().records()[0].clone();

        record.visit_days = Some("monday".to_string());
        assert!(!record.visits_on(Weekday::Monday));
        assert!(record.visit_weekdays().is_empty());

        record.visit_days = Some("Saturday/Sunday".to_string());
        assert_eq!(record.visit_weekdays(), vec![Weekday::Saturday, Weekday::Sunday]);
    }

    #[test]
    fn test_find_stops_for_date() {
        let directory = CustomerDirectory::from_csv_reader(CSV.as_bytes()).unwrap();
        let thursday = time::Date::from_calendar_date(2024, time::Month::June, 6).unwrap();
        let query = StopQuery::for_date("V01", thursday, "Miraflores");

        assert_eq!(query.weekday, Weekday::Thursday);
        let ids: Vec<String> = directory.find_stops(&query).into_iter().map(|s| s.id).collect();
        assert_eq!(ids, vec!["C001"]);
    }

    #[test]
    fn test_find_stops_no_match() {
        let directory = CustomerDirectory::from_csv_reader(CSV.as_bytes()).unwrap();
        let query = StopQuery::new("V01", Weekday::Sunday, "Miraflores");
        assert!(directory.find_stops(&query).is_empty());
    }

    #[test]
    fn test_missing_coordinate_becomes_nan() {
        let directory = CustomerDirectory::from_csv_reader(CSV.as_bytes()).unwrap();
        let stop = directory.records()[4].to_stop();
        assert!(stop.latitude.is_nan());
        assert!(stop.coordinate_issue().is_some());
    }
}
