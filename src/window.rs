//! Single-route analysis over a fixed hour window (the rush-hour deep dive).

use crate::types::{IncidentRecord, Severity};
use crate::util::pct;
use std::collections::BTreeMap;

/// A named hour window used by the deep-dive views.
#[derive(Debug, Clone, Copy)]
pub struct RushWindow {
    pub label: &'static str,
    pub start: u8,
    pub end: u8,
}

pub const MORNING_RUSH: RushWindow = RushWindow {
    label: "morning rush",
    start: 5,
    end: 9,
};

pub const AFTERNOON_RUSH: RushWindow = RushWindow {
    label: "afternoon rush",
    start: 13,
    end: 18,
};

/// Per-route, per-window aggregates. A window with no incidents is a valid
/// result: `total_incidents` is 0, `hourly_counts` is empty, and the
/// severity counts are all zero.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteWindowStats {
    pub route: String,
    pub hour_min: u8,
    pub hour_max: u8,
    pub total_incidents: usize,
    /// Dense over the four severity bins, indexed by `Severity::index`.
    pub severity_counts: [usize; Severity::ALL.len()],
    /// Sparse: hours with no incidents are simply absent.
    pub hourly_counts: BTreeMap<u8, usize>,
}

impl RouteWindowStats {
    pub fn severity_count(&self, severity: Severity) -> usize {
        self.severity_counts[severity.index()]
    }

    pub fn high_severity_count(&self) -> usize {
        self.severity_count(Severity::High) + self.severity_count(Severity::Severe)
    }

    pub fn high_severity_pct(&self) -> f64 {
        pct(
            self.high_severity_count() as f64,
            self.total_incidents as f64,
        )
    }

    /// Hour with the most incidents and its count. `BTreeMap` iterates hours
    /// ascending and only a strictly greater count displaces the candidate,
    /// so ties resolve to the earliest hour. `None` when the window is empty.
    pub fn peak_hour(&self) -> Option<(u8, usize)> {
        let mut peak: Option<(u8, usize)> = None;
        for (&hour, &count) in &self.hourly_counts {
            match peak {
                Some((_, best)) if count <= best => {}
                _ => peak = Some((hour, count)),
            }
        }
        peak
    }
}

/// Restrict `full` to one route and an inclusive hour window, then compute
/// its hourly and severity distributions.
pub fn analyze_window(
    full: &[IncidentRecord],
    route: &str,
    hour_min: u8,
    hour_max: u8,
) -> RouteWindowStats {
    let mut severity_counts = [0usize; Severity::ALL.len()];
    let mut hourly_counts: BTreeMap<u8, usize> = BTreeMap::new();
    let mut total_incidents = 0usize;

    for r in full {
        if r.route != route || r.hour < hour_min || r.hour > hour_max {
            continue;
        }
        total_incidents += 1;
        severity_counts[r.severity.index()] += 1;
        *hourly_counts.entry(r.hour).or_insert(0) += 1;
    }

    RouteWindowStats {
        route: route.to_string(),
        hour_min,
        hour_max,
        total_incidents,
        severity_counts,
        hourly_counts,
    }
}
