//! Shortened URL records as returned by the backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::date_format::dmy;

/// One row of the URL listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlRecord {
    pub id: i64,
    pub short_url: String,
    pub redirect_url: String,
    #[serde(with = "dmy")]
    pub created: NaiveDate,
    /// Address of the most recent visitor, empty when never visited.
    #[serde(rename = "lastIP", default)]
    pub last_ip: String,
    /// Total visits summed over all days.
    #[serde(default)]
    pub visits: i64,
}

/// Result of a create call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedUrl {
    pub shorten_url: String,
    /// `true` when the backend created a new mapping, `false` when it
    /// returned an existing one for the same original URL.
    pub created: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_backend_payload() {
        let payload = json!({
            "id": 7,
            "shortUrl": "http://sho.rt/url/ab12c",
            "redirectUrl": "http://example.com",
            "created": "05/01/2024",
            "lastIP": "10.0.0.1",
            "visits": 12
        });

        let record: UrlRecord = serde_json::from_value(payload).unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.short_url, "http://sho.rt/url/ab12c");
        assert_eq!(record.redirect_url, "http://example.com");
        assert_eq!(record.created, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());
        assert_eq!(record.last_ip, "10.0.0.1");
        assert_eq!(record.visits, 12);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let payload = json!({
            "id": 1,
            "shortUrl": "s",
            "redirectUrl": "r",
            "created": "01/03/2024"
        });

        let record: UrlRecord = serde_json::from_value(payload).unwrap();
        assert_eq!(record.last_ip, "");
        assert_eq!(record.visits, 0);
    }
}
