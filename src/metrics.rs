//! Scalar summary statistics over a filtered view of the dataset.

use crate::types::IncidentRecord;
use crate::util::{average, pct};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct MetricsSummary {
    pub total_count: usize,
    pub filtered_count: usize,
    /// Mean delay in minutes over the filtered rows; 0 when there are none.
    pub avg_delay: f64,
    /// Filtered average minus the overall average; 0 when the filtered view
    /// is empty rather than a misleading negative of the overall mean.
    pub delta_from_overall: f64,
    pub high_severity_count: usize,
    pub high_severity_pct: f64,
    /// Most impacted route and its incident count. Absent for an empty view.
    pub top_route: Option<(String, usize)>,
}

/// Summarize a filtered view against the full dataset it was drawn from.
/// An empty `filtered` view is a valid input and yields zeroed metrics.
pub fn summarize(full: &[IncidentRecord], filtered: &[IncidentRecord]) -> MetricsSummary {
    let delays: Vec<f64> = filtered.iter().map(|r| r.min_delay).collect();
    let avg_delay = average(&delays);
    let delta_from_overall = if filtered.is_empty() {
        0.0
    } else {
        let overall: Vec<f64> = full.iter().map(|r| r.min_delay).collect();
        avg_delay - average(&overall)
    };

    let high_severity_count = filtered.iter().filter(|r| r.severity.is_high()).count();
    let high_severity_pct = pct(high_severity_count as f64, filtered.len() as f64);

    let top_route = top_routes(filtered, 1).into_iter().next();

    MetricsSummary {
        total_count: full.len(),
        filtered_count: filtered.len(),
        avg_delay,
        delta_from_overall,
        high_severity_count,
        high_severity_pct,
        top_route,
    }
}

/// Routes ranked by incident count, descending, at most `n` entries.
/// Ties break toward the lexically smaller route so the ranking is
/// reproducible regardless of input order.
pub fn top_routes(filtered: &[IncidentRecord], n: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in filtered {
        *counts.entry(r.route.as_str()).or_insert(0) += 1;
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(route, count)| (route.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}
