//! `dd/MM/yyyy` date handling shared by the query string and the backend payloads.

use chrono::NaiveDate;

/// Wire format for calendar dates in queries and JSON records.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Formats a date as `dd/MM/yyyy`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a user supplied date.
///
/// Accepts the wire format (`05/01/2024`) as well as ISO 8601 (`2024-01-05`).
pub fn parse_date(input: &str) -> Result<NaiveDate, chrono::ParseError> {
    let input = input.trim();
    NaiveDate::parse_from_str(input, DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(input, "%Y-%m-%d"))
}

/// Serde adapter for `dd/MM/yyyy` dates.
pub mod dmy {
    use super::DATE_FORMAT;
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&date.format(DATE_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&s, DATE_FORMAT).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_day_and_month() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap();
        assert_eq!(format_date(date), "05/01/2024");
    }

    #[test]
    fn test_parse_wire_format() {
        let date = parse_date("01/03/2024").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_iso_format() {
        let date = parse_date(" 2024-03-01 ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse_date("yesterday").is_err());
        assert!(parse_date("31/02/2024").is_err());
    }

    #[test]
    fn test_dmy_deserializer() {
        #[derive(serde::Deserialize)]
        struct Wrapper {
            #[serde(with = "dmy")]
            created: NaiveDate,
        }

        let w: Wrapper = serde_json::from_str(r#"{"created": "10/01/2024"}"#).unwrap();
        assert_eq!(w.created, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());

        assert!(serde_json::from_str::<Wrapper>(r#"{"created": "2024-01-10"}"#).is_err());
    }
}
