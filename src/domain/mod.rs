/// Domain models for the application
use crate::errors::ApiError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Rows per dashboard page
pub const PAGE_SIZE: usize = 10;

/// Placeholder shown for anything that cannot be resolved
pub const PLACEHOLDER: &str = "-";

/// SpaceX launch record as delivered by the API.
///
/// Every field the dashboard reads is optional so a malformed record still
/// loads; anything else on the record is kept in `extra` for the detail view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Launch {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub date_utc: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub upcoming: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub rocket: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub launchpad: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub payloads: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Accept any JSON value; one that does not fit `T` reads as absent
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Ids arrive as strings, occasionally as numbers
fn lenient_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

impl Launch {
    pub fn is_upcoming(&self) -> bool {
        self.upcoming == Some(true)
    }

    /// First payload id, if the launch carries any
    pub fn first_payload_id(&self) -> Option<&str> {
        self.payloads
            .as_deref()
            .and_then(|p| p.first())
            .map(String::as_str)
    }
}

/// Payload reference record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayloadRecord {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(default, rename = "type", deserialize_with = "lenient")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub orbit: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub customers: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient")]
    pub mass_kg: Option<f64>,
}

/// Lookup tables joined against launches
#[derive(Debug, Clone, Default)]
pub struct ReferenceMaps {
    pub rockets: HashMap<String, String>,
    pub launchpads: HashMap<String, String>,
    pub payloads: HashMap<String, PayloadRecord>,
}

impl ReferenceMaps {
    pub fn rocket_name(&self, id: Option<&str>) -> Option<&str> {
        id.and_then(|id| self.rockets.get(id)).map(String::as_str)
    }

    pub fn launchpad_name(&self, id: Option<&str>) -> Option<&str> {
        id.and_then(|id| self.launchpads.get(id)).map(String::as_str)
    }

    pub fn payload(&self, id: Option<&str>) -> Option<&PayloadRecord> {
        id.and_then(|id| self.payloads.get(id))
    }
}

/// Immutable view of everything the data loader delivered.
/// Replaced as a whole on reload, never mutated in place.
#[derive(Debug, Clone, Default)]
pub struct DataSnapshot {
    pub launches: Vec<Launch>,
    pub maps: ReferenceMaps,
    pub loading: bool,
    pub loaded_at: Option<DateTime<Utc>>,
}

impl DataSnapshot {
    /// Placeholder used before the first load completes
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn loaded(launches: Vec<Launch>, maps: ReferenceMaps, at: DateTime<Utc>) -> Self {
        Self {
            launches,
            maps,
            loading: false,
            loaded_at: Some(at),
        }
    }
}

/// Launch status axis of the filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    Upcoming,
    Successful,
    Failed,
}

impl StatusFilter {
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Upcoming,
        StatusFilter::Successful,
        StatusFilter::Failed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Upcoming => "upcoming",
            StatusFilter::Successful => "successful",
            StatusFilter::Failed => "failed",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All Launches",
            StatusFilter::Upcoming => "Upcoming Launches",
            StatusFilter::Successful => "Successful Launches",
            StatusFilter::Failed => "Failed Launches",
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| ApiError::InvalidInput(format!("unknown status filter '{}'", s)))
    }
}

/// Relative time window axis of the filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeWindow {
    #[default]
    #[serde(rename = "all_time")]
    AllTime,
    #[serde(rename = "past_week")]
    PastWeek,
    #[serde(rename = "past_month")]
    PastMonth,
    #[serde(rename = "past_3_months")]
    Past3Months,
    #[serde(rename = "past_6_months")]
    Past6Months,
    #[serde(rename = "past_year")]
    PastYear,
    #[serde(rename = "past_2_years")]
    Past2Years,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 7] = [
        TimeWindow::AllTime,
        TimeWindow::PastWeek,
        TimeWindow::PastMonth,
        TimeWindow::Past3Months,
        TimeWindow::Past6Months,
        TimeWindow::PastYear,
        TimeWindow::Past2Years,
    ];

    /// Length of the window in days; `None` for all time
    pub fn days(self) -> Option<i64> {
        match self {
            TimeWindow::AllTime => None,
            TimeWindow::PastWeek => Some(7),
            TimeWindow::PastMonth => Some(30),
            TimeWindow::Past3Months => Some(90),
            TimeWindow::Past6Months => Some(180),
            TimeWindow::PastYear => Some(365),
            TimeWindow::Past2Years => Some(730),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeWindow::AllTime => "all_time",
            TimeWindow::PastWeek => "past_week",
            TimeWindow::PastMonth => "past_month",
            TimeWindow::Past3Months => "past_3_months",
            TimeWindow::Past6Months => "past_6_months",
            TimeWindow::PastYear => "past_year",
            TimeWindow::Past2Years => "past_2_years",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeWindow::AllTime => "All Time",
            TimeWindow::PastWeek => "Past Week",
            TimeWindow::PastMonth => "Past Month",
            TimeWindow::Past3Months => "Past 3 Months",
            TimeWindow::Past6Months => "Past 6 Months",
            TimeWindow::PastYear => "Past Year",
            TimeWindow::Past2Years => "Past 2 Years",
        }
    }
}

impl FromStr for TimeWindow {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|w| w.as_str() == s)
            .ok_or_else(|| ApiError::InvalidInput(format!("unknown time window '{}'", s)))
    }
}

/// Active selection on both filter axes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub status: StatusFilter,
    pub window: TimeWindow,
}

impl FilterCriteria {
    pub fn new(status: StatusFilter, window: TimeWindow) -> Self {
        Self { status, window }
    }

    /// True when either axis is away from its default
    pub fn is_active(&self) -> bool {
        self.status != StatusFilter::All || self.window != TimeWindow::AllTime
    }
}

/// Status shown in the table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusLabel {
    Upcoming,
    Success,
    Failure,
}

impl fmt::Display for StatusLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            StatusLabel::Upcoming => "Upcoming",
            StatusLabel::Success => "Success",
            StatusLabel::Failure => "Failure",
        };
        f.write_str(s)
    }
}

/// Launch joined with its resolved references, for the detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchDetail {
    pub launch: Launch,
    pub rocket: Option<String>,
    pub launchpad: Option<String>,
    pub payload: Option<PayloadRecord>,
}

/// One table row, rebuilt on every render
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayRow {
    pub serial: usize,
    pub id: String,
    pub formatted_date: String,
    pub location_name: String,
    pub name: String,
    pub orbit: String,
    pub status_label: StatusLabel,
    pub rocket_name: String,
    pub full_detail: LaunchDetail,
}

/// A filter value together with its display label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: &'static str,
    pub label: &'static str,
}

impl From<StatusFilter> for FilterOption {
    fn from(f: StatusFilter) -> Self {
        Self {
            value: f.as_str(),
            label: f.label(),
        }
    }
}

impl From<TimeWindow> for FilterOption {
    fn from(w: TimeWindow) -> Self {
        Self {
            value: w.as_str(),
            label: w.label(),
        }
    }
}

/// Dropdown contents for both filter axes
#[derive(Debug, Serialize)]
pub struct FilterOptions {
    pub status: Vec<FilterOption>,
    pub window: Vec<FilterOption>,
}

impl FilterOptions {
    pub fn all() -> Self {
        Self {
            status: StatusFilter::ALL.into_iter().map(Into::into).collect(),
            window: TimeWindow::ALL.into_iter().map(Into::into).collect(),
        }
    }
}

/// Everything the presentation layer needs for one render
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub loading: bool,
    pub rows: Vec<DisplayRow>,
    pub total_pages: usize,
    pub current_page: usize,
    pub page_size: usize,
    pub filtered_count: usize,
    pub filter_active: bool,
    pub status: FilterOption,
    pub window: FilterOption,
}

/// Health check response
#[derive(Serialize)]
pub struct Health {
    pub status: &'static str,
    pub now: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_deserialize_keeps_extra_fields() {
        let launch: Launch = serde_json::from_value(serde_json::json!({
            "id": "5eb87cd9ffd86e000604b32a",
            "name": "FalconSat",
            "date_utc": "2006-03-24T22:30:00.000Z",
            "upcoming": false,
            "success": false,
            "rocket": "5e9d0d95eda69955f709d1eb",
            "launchpad": "5e9e4502f5090995de566f86",
            "payloads": ["5eb0e4b5b6c3bb0006eeb1e1"],
            "flight_number": 1,
            "details": "Engine failure at 33 seconds"
        }))
        .unwrap();

        assert_eq!(launch.name.as_deref(), Some("FalconSat"));
        assert_eq!(launch.first_payload_id(), Some("5eb0e4b5b6c3bb0006eeb1e1"));
        assert_eq!(launch.extra["flight_number"], 1);
        assert!(!launch.is_upcoming());
    }

    #[test]
    fn test_launch_deserialize_tolerates_missing_and_null() {
        let launch: Launch =
            serde_json::from_value(serde_json::json!({"success": null, "rocket": null})).unwrap();
        assert_eq!(launch.id, None);
        assert_eq!(launch.success, None);
        assert_eq!(launch.rocket, None);
        assert_eq!(launch.first_payload_id(), None);
    }

    #[test]
    fn test_launch_off_type_fields_read_as_absent() {
        let launch: Launch = serde_json::from_value(serde_json::json!({
            "id": 42,
            "name": ["not", "a", "name"],
            "date_utc": 1143239400,
            "upcoming": "no",
            "success": 1,
            "rocket": {"id": "falcon9"},
            "payloads": "p1"
        }))
        .unwrap();

        assert_eq!(launch.id.as_deref(), Some("42"));
        assert_eq!(launch.name, None);
        assert_eq!(launch.date_utc, None);
        assert_eq!(launch.upcoming, None);
        assert_eq!(launch.success, None);
        assert_eq!(launch.rocket, None);
        assert_eq!(launch.payloads, None);
        assert_eq!(launch.first_payload_id(), None);
    }

    #[test]
    fn test_payload_off_type_fields_keep_orbit() {
        let payload: PayloadRecord = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "orbit": "LEO",
            "customers": "NASA",
            "mass_kg": "heavy"
        }))
        .unwrap();
        assert_eq!(payload.orbit.as_deref(), Some("LEO"));
        assert_eq!(payload.customers, None);
        assert_eq!(payload.mass_kg, None);
    }

    #[test]
    fn test_first_payload_id_empty() {
        let launch = Launch {
            payloads: Some(vec![]),
            ..Launch::default()
        };
        assert_eq!(launch.first_payload_id(), None);
    }

    #[test]
    fn test_payload_record_type_field() {
        let payload: PayloadRecord = serde_json::from_value(serde_json::json!({
            "id": "p1",
            "type": "Satellite",
            "orbit": "LEO"
        }))
        .unwrap();
        assert_eq!(payload.kind.as_deref(), Some("Satellite"));
        assert_eq!(payload.orbit.as_deref(), Some("LEO"));
        assert_eq!(payload.customers, None);
    }

    #[test]
    fn test_status_filter_from_str() {
        assert_eq!(
            "successful".parse::<StatusFilter>().unwrap(),
            StatusFilter::Successful
        );
        assert!("Successful Launches".parse::<StatusFilter>().is_err());
    }

    #[test]
    fn test_time_window_from_str_round_trips_wire_names() {
        for w in TimeWindow::ALL {
            assert_eq!(w.as_str().parse::<TimeWindow>().unwrap(), w);
        }
        assert!("past_decade".parse::<TimeWindow>().is_err());
    }

    #[test]
    fn test_time_window_serde_matches_wire_name() {
        let json = serde_json::to_value(TimeWindow::Past3Months).unwrap();
        assert_eq!(json, "past_3_months");
    }

    #[test]
    fn test_time_window_days() {
        assert_eq!(TimeWindow::AllTime.days(), None);
        assert_eq!(TimeWindow::PastWeek.days(), Some(7));
        assert_eq!(TimeWindow::Past2Years.days(), Some(730));
    }

    #[test]
    fn test_filter_criteria_is_active() {
        assert!(!FilterCriteria::default().is_active());
        assert!(FilterCriteria::new(StatusFilter::Failed, TimeWindow::AllTime).is_active());
        assert!(FilterCriteria::new(StatusFilter::All, TimeWindow::PastYear).is_active());
    }

    #[test]
    fn test_filter_options_order() {
        let options = FilterOptions::all();
        assert_eq!(options.status[0].label, "All Launches");
        assert_eq!(options.window.len(), 7);
        assert_eq!(options.window[6].value, "past_2_years");
    }
}
