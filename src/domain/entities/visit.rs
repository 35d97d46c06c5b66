//! Per-day visit counters and per-address visitor records of a short URL.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::utils::date_format::dmy;

/// Visit counter for one URL on one day.
///
/// Timestamps are kept as the backend renders them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub id: i64,
    pub visits: i64,
    #[serde(with = "dmy")]
    pub created: NaiveDate,
    pub last_visit_at: Option<String>,
    #[serde(rename = "lastIP", default)]
    pub last_ip: String,
}

/// A distinct remote address that followed the short URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visitor {
    pub id: i64,
    pub visits: i64,
    pub first_visit: String,
    pub last_visit: Option<String>,
    pub ip: String,
    pub user_agent: String,
}
