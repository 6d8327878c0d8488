use chrono::Weekday;
use serde::{Deserialize, Serialize};
use tabled::Tabled;

/// Ordinal incident severity, ascending. The four labels match the
/// `delay_bin` column of the source CSV exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Severity {
    Low,
    Medium,
    High,
    Severe,
}

impl Severity {
    /// All severities in ascending order; also the canonical index order
    /// for dense per-severity count arrays.
    pub const ALL: [Severity; 4] = [
        Severity::Low,
        Severity::Medium,
        Severity::High,
        Severity::Severe,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Medium => "Medium",
            Severity::High => "High",
            Severity::Severe => "Severe",
        }
    }

    /// Parse the CSV label. Returns `None` for anything outside the fixed
    /// four-value set; the loader turns that into a domain violation.
    pub fn from_label(s: &str) -> Option<Severity> {
        match s {
            "Low" => Some(Severity::Low),
            "Medium" => Some(Severity::Medium),
            "High" => Some(Severity::High),
            "Severe" => Some(Severity::Severe),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Weight used by the priority scorer: Severe 3, High 2, Medium 1, Low 0.
    pub fn priority_weight(self) -> u32 {
        match self {
            Severity::Severe => 3,
            Severity::High => 2,
            Severity::Medium => 1,
            Severity::Low => 0,
        }
    }

    /// High-impact bucket used by metrics and scenario baselines.
    pub fn is_high(self) -> bool {
        matches!(self, Severity::High | Severity::Severe)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw CSV row as deserialized, everything optional and untyped. Parsing and
/// validation into [`IncidentRecord`] happens in the loader so that bad rows
/// can be reported with row/column context.
#[derive(Debug, Deserialize)]
pub struct RawRow {
    #[serde(rename = "route")]
    pub route: Option<String>,
    #[serde(rename = "hour")]
    pub hour: Option<String>,
    #[serde(rename = "weekday")]
    pub weekday: Option<String>,
    #[serde(rename = "min_delay")]
    pub min_delay: Option<String>,
    #[serde(rename = "delay_bin")]
    pub delay_bin: Option<String>,
}

/// One validated delay incident. Invariants are enforced by the loader:
/// `hour` is 0..=23, `min_delay` is non-negative, and `weekday` came from an
/// in-range 0..=6 integer (Monday = 0).
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentRecord {
    pub route: String,
    pub hour: u8,
    pub weekday: Weekday,
    pub min_delay: f64,
    pub severity: Severity,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct RouteCountRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Route")]
    #[tabled(rename = "Route")]
    pub route: String,
    #[serde(rename = "Incidents")]
    #[tabled(rename = "Incidents")]
    pub incidents: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct PriorityRow {
    #[serde(rename = "Rank")]
    #[tabled(rename = "Rank")]
    pub rank: usize,
    #[serde(rename = "Route")]
    #[tabled(rename = "Route")]
    pub route: String,
    #[serde(rename = "Hour")]
    #[tabled(rename = "Hour")]
    pub hour: String,
    #[serde(rename = "Incidents")]
    #[tabled(rename = "Incidents")]
    pub incidents: String,
    #[serde(rename = "SeverityScore")]
    #[tabled(rename = "SeverityScore")]
    pub severity_score: u32,
    #[serde(rename = "PriorityScore")]
    #[tabled(rename = "PriorityScore")]
    pub priority_score: String,
}

#[derive(Debug, Serialize, Tabled, Clone)]
pub struct HourCountRow {
    #[serde(rename = "Hour")]
    #[tabled(rename = "Hour")]
    pub hour: String,
    #[serde(rename = "Incidents")]
    #[tabled(rename = "Incidents")]
    pub incidents: String,
}
