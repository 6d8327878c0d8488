//! Priority scoring of (route, hour) combinations across the whole dataset.
//!
//! Each observed combination gets `0.6 * incidents + 0.4 * severity_score`
//! where the severity score weighs Severe 3, High 2, Medium 1. Combinations
//! with no incidents are omitted, so the ranking is sparse.

use crate::types::IncidentRecord;
use crate::util::pct;
use std::collections::BTreeMap;

pub const VOLUME_WEIGHT: f64 = 0.6;
pub const SEVERITY_WEIGHT: f64 = 0.4;

#[derive(Debug, Clone, PartialEq)]
pub struct PriorityEntry {
    pub route: String,
    pub hour: u8,
    pub incident_count: usize,
    pub severity_score: u32,
    pub priority_score: f64,
}

/// Score every observed (route, hour) combination, descending by priority.
/// Equal scores order by route ascending, then hour ascending, so the
/// ranking is reproducible across runs and implementations.
pub fn score_all(full: &[IncidentRecord]) -> Vec<PriorityEntry> {
    let mut groups: BTreeMap<(&str, u8), (usize, u32)> = BTreeMap::new();
    for r in full {
        let entry = groups.entry((r.route.as_str(), r.hour)).or_insert((0, 0));
        entry.0 += 1;
        entry.1 += r.severity.priority_weight();
    }

    let mut entries: Vec<PriorityEntry> = groups
        .into_iter()
        .map(|((route, hour), (incident_count, severity_score))| PriorityEntry {
            route: route.to_string(),
            hour,
            incident_count,
            severity_score,
            priority_score: VOLUME_WEIGHT * incident_count as f64
                + SEVERITY_WEIGHT * f64::from(severity_score),
        })
        .collect();

    entries.sort_by(|a, b| {
        b.priority_score
            .partial_cmp(&a.priority_score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.route.cmp(&b.route))
            .then_with(|| a.hour.cmp(&b.hour))
    });
    entries
}

pub fn top_n(entries: &[PriorityEntry], n: usize) -> &[PriorityEntry] {
    &entries[..entries.len().min(n)]
}

/// Total priority score per hour of day — the "when to deploy" profile.
/// Hours with no scored combinations are absent.
pub fn score_by_hour(entries: &[PriorityEntry]) -> BTreeMap<u8, f64> {
    let mut by_hour: BTreeMap<u8, f64> = BTreeMap::new();
    for e in entries {
        *by_hour.entry(e.hour).or_insert(0.0) += e.priority_score;
    }
    by_hour
}

/// Routes ranked by total priority score, descending, route-ascending ties.
pub fn score_by_route(entries: &[PriorityEntry]) -> Vec<(String, f64)> {
    let mut by_route: BTreeMap<&str, f64> = BTreeMap::new();
    for e in entries {
        *by_route.entry(e.route.as_str()).or_insert(0.0) += e.priority_score;
    }
    let mut ranked: Vec<(String, f64)> = by_route
        .into_iter()
        .map(|(route, score)| (route.to_string(), score))
        .collect();
    ranked.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    ranked
}

/// Concrete resource allocation derived from one priority entry, as shown
/// in the dashboard's per-area action plans.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourcePlan {
    pub crew_members: usize,
    pub estimated_reduction: usize,
    pub severity_reduction: u32,
    pub impact_pct: f64,
}

impl ResourcePlan {
    pub fn for_entry(entry: &PriorityEntry) -> ResourcePlan {
        let estimated_reduction = (entry.incident_count as f64 * 0.2) as usize;
        ResourcePlan {
            crew_members: entry.incident_count / 30 + 1,
            estimated_reduction,
            severity_reduction: (f64::from(entry.severity_score) * 0.25) as u32,
            impact_pct: pct(estimated_reduction as f64, entry.incident_count as f64),
        }
    }
}

/// Headline numbers over the full ranking: the hour with the highest summed
/// score, the three highest-scoring routes, and what addressing the top 20
/// areas would cover. `None` when there are no scored entries at all.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyFindings {
    pub peak_hour: u8,
    pub top_routes: Vec<String>,
    pub top_area_incidents: usize,
    pub projected_annual_reduction: usize,
}

pub fn key_findings(entries: &[PriorityEntry]) -> Option<KeyFindings> {
    if entries.is_empty() {
        return None;
    }
    // Earliest hour wins a tie; BTreeMap iterates hours ascending.
    let by_hour = score_by_hour(entries);
    let (&peak_hour, _) = by_hour
        .iter()
        .max_by(|a, b| {
            a.1.partial_cmp(b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| b.0.cmp(a.0))
        })?;

    let top_routes = score_by_route(entries)
        .into_iter()
        .take(3)
        .map(|(route, _)| route)
        .collect();

    let top_area_incidents: usize = top_n(entries, 20).iter().map(|e| e.incident_count).sum();

    Some(KeyFindings {
        peak_hour,
        top_routes,
        top_area_incidents,
        projected_annual_reduction: (top_area_incidents as f64 * 0.2) as usize,
    })
}
