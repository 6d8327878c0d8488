//! What-if cost/benefit simulation for operational interventions.
//!
//! A fixed linear model: each intervention has an impact factor, scaled by
//! a 1..=10 strength, applied to the historical baseline for one route and
//! hour window. Costs and savings are projected to a 30-day month.

use crate::error::ScenarioError;
use crate::types::IncidentRecord;
use crate::util::pct;
use serde::Serialize;

const CREW_COST_PER_HOUR: u64 = 50;
const INCIDENT_COST: u64 = 500;
const DAYS_PER_MONTH: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Intervention {
    AdditionalMaintenanceCrew,
    PreServiceInspection,
    BackupVehicle,
}

impl Intervention {
    /// Fraction of baseline incidents removed at full strength.
    pub fn impact_factor(self) -> f64 {
        match self {
            Intervention::AdditionalMaintenanceCrew => 0.15,
            Intervention::PreServiceInspection => 0.20,
            Intervention::BackupVehicle => 0.10,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Intervention::AdditionalMaintenanceCrew => "Additional Maintenance Crew",
            Intervention::PreServiceInspection => "Pre-Service Inspection",
            Intervention::BackupVehicle => "Backup Vehicle",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioResult {
    pub baseline_count: usize,
    pub baseline_high_severity: usize,
    pub estimated_reduction: usize,
    pub estimated_severity_reduction: usize,
    /// Reduction as a share of the baseline, 0 when the baseline is empty.
    pub reduction_pct: f64,
    /// Monthly cost of the intervention in dollars.
    pub intervention_cost: u64,
    /// Monthly savings from avoided incidents in dollars.
    pub estimated_savings: u64,
    /// Return on investment; 0 when the intervention costs nothing
    /// (a zero-hour window), not an error.
    pub roi_pct: f64,
}

/// Estimate the impact of one intervention on one route over an inclusive
/// hour window. Deterministic in its inputs; no randomness anywhere.
pub fn simulate(
    full: &[IncidentRecord],
    route: &str,
    hour_min: u8,
    hour_max: u8,
    intervention: Intervention,
    strength: u8,
) -> Result<ScenarioResult, ScenarioError> {
    if !(1..=10).contains(&strength) {
        return Err(ScenarioError::InvalidStrength(strength));
    }
    if hour_min > hour_max {
        return Err(ScenarioError::InvalidWindow {
            start: hour_min,
            end: hour_max,
        });
    }

    let mut baseline_count = 0usize;
    let mut baseline_high_severity = 0usize;
    for r in full {
        if r.route == route && (hour_min..=hour_max).contains(&r.hour) {
            baseline_count += 1;
            if r.severity.is_high() {
                baseline_high_severity += 1;
            }
        }
    }

    let scale = intervention.impact_factor() * f64::from(strength) / 10.0;
    let estimated_reduction = (baseline_count as f64 * scale).floor() as usize;
    let estimated_severity_reduction =
        (baseline_high_severity as f64 * scale * 1.5).floor() as usize;
    let reduction_pct = pct(estimated_reduction as f64, baseline_count as f64);

    let hours_deployed = u64::from(hour_max - hour_min);
    let intervention_cost =
        CREW_COST_PER_HOUR * hours_deployed * u64::from(strength) * DAYS_PER_MONTH;
    let estimated_savings = estimated_reduction as u64 * INCIDENT_COST * DAYS_PER_MONTH;
    let roi_pct = pct(
        estimated_savings as f64 - intervention_cost as f64,
        intervention_cost as f64,
    );

    Ok(ScenarioResult {
        baseline_count,
        baseline_high_severity,
        estimated_reduction,
        estimated_severity_reduction,
        reduction_pct,
        intervention_cost,
        estimated_savings,
        roi_pct,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;
    use chrono::Weekday;

    fn record(hour: u8, severity: Severity) -> IncidentRecord {
        IncidentRecord {
            route: "504".to_string(),
            hour,
            weekday: Weekday::Wed,
            min_delay: 9.0,
            severity,
        }
    }

    /// 100 baseline incidents, 40 high-severity, backup vehicle at full
    /// strength over 5..=9.
    fn baseline_100_40() -> Vec<IncidentRecord> {
        let mut data = Vec::new();
        for i in 0..100 {
            let severity = if i < 40 { Severity::High } else { Severity::Low };
            data.push(record(5 + (i % 5) as u8, severity));
        }
        data
    }

    #[test]
    fn worked_example_backup_vehicle_full_strength() {
        let result = simulate(
            &baseline_100_40(),
            "504",
            5,
            9,
            Intervention::BackupVehicle,
            10,
        )
        .expect("simulate");

        assert_eq!(result.baseline_count, 100);
        assert_eq!(result.baseline_high_severity, 40);
        assert_eq!(result.estimated_reduction, 10);
        assert_eq!(result.estimated_severity_reduction, 6);
        assert_eq!(result.intervention_cost, 60_000);
        assert_eq!(result.estimated_savings, 150_000);
        assert!((result.roi_pct - 150.0).abs() < 1e-9);
        assert!((result.reduction_pct - 10.0).abs() < 1e-9);
    }

    #[test]
    fn reduction_never_exceeds_baseline() {
        let data = baseline_100_40();
        for intervention in [
            Intervention::AdditionalMaintenanceCrew,
            Intervention::PreServiceInspection,
            Intervention::BackupVehicle,
        ] {
            for strength in 1..=10 {
                let result = simulate(&data, "504", 5, 9, intervention, strength).expect("simulate");
                assert!(result.estimated_reduction <= result.baseline_count);
            }
        }
    }

    #[test]
    fn zero_hour_window_has_zero_cost_and_roi() {
        let data = vec![record(5, Severity::Low)];
        let result =
            simulate(&data, "504", 5, 5, Intervention::PreServiceInspection, 5).expect("simulate");
        assert_eq!(result.intervention_cost, 0);
        assert_eq!(result.roi_pct, 0.0);
    }

    #[test]
    fn empty_baseline_yields_zeroed_result() {
        let result = simulate(&[], "504", 5, 9, Intervention::BackupVehicle, 5).expect("simulate");
        assert_eq!(result.baseline_count, 0);
        assert_eq!(result.estimated_reduction, 0);
        assert_eq!(result.estimated_savings, 0);
        assert_eq!(result.reduction_pct, 0.0);
    }

    #[test]
    fn out_of_range_strength_is_rejected() {
        assert!(matches!(
            simulate(&[], "504", 5, 9, Intervention::BackupVehicle, 0),
            Err(ScenarioError::InvalidStrength(0))
        ));
        assert!(matches!(
            simulate(&[], "504", 5, 9, Intervention::BackupVehicle, 11),
            Err(ScenarioError::InvalidStrength(11))
        ));
    }

    #[test]
    fn inverted_window_is_rejected() {
        assert!(matches!(
            simulate(&[], "504", 9, 5, Intervention::BackupVehicle, 5),
            Err(ScenarioError::InvalidWindow { start: 9, end: 5 })
        ));
    }
}
