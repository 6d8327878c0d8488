//! Row filtering over the full dataset.
//!
//! The three predicates (route, hour range, severity) are independent and
//! compose by logical AND, so application order never changes the result.

use crate::types::{IncidentRecord, Severity};
use std::collections::BTreeSet;

/// Route selection with an explicit "everything" sentinel, mirroring the
/// `All` option in the dashboard's route picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSelection {
    All,
    Only(BTreeSet<String>),
}

impl RouteSelection {
    pub fn from_list(routes: &[String]) -> RouteSelection {
        if routes.is_empty() || routes.iter().any(|r| r == "All") {
            RouteSelection::All
        } else {
            RouteSelection::Only(routes.iter().cloned().collect())
        }
    }

    fn matches(&self, route: &str) -> bool {
        match self {
            RouteSelection::All => true,
            RouteSelection::Only(set) => set.contains(route),
        }
    }
}

#[derive(Debug, Clone)]
pub struct FilterSpec {
    pub routes: RouteSelection,
    /// Inclusive hour-of-day range.
    pub hours: (u8, u8),
    /// Severities to keep. An empty set means "no severity restriction",
    /// matching how the dashboard treats a cleared severity picker.
    pub severities: BTreeSet<Severity>,
}

impl FilterSpec {
    /// A spec that keeps every row.
    pub fn all() -> FilterSpec {
        FilterSpec {
            routes: RouteSelection::All,
            hours: (0, 23),
            severities: BTreeSet::new(),
        }
    }

    pub fn matches(&self, record: &IncidentRecord) -> bool {
        if !self.routes.matches(&record.route) {
            return false;
        }
        if record.hour < self.hours.0 || record.hour > self.hours.1 {
            return false;
        }
        if !self.severities.is_empty() && !self.severities.contains(&record.severity) {
            return false;
        }
        true
    }

    /// Produce the filtered view. The source is never mutated; the result is
    /// a fresh vector owned by the caller.
    pub fn apply(&self, data: &[IncidentRecord]) -> Vec<IncidentRecord> {
        data.iter().filter(|r| self.matches(r)).cloned().collect()
    }
}
