//! Threshold-driven operational recommendations for a route/window.
//!
//! Always produces exactly four lines in a fixed order: volume, severity,
//! peak concentration, proactive measures. Pure function of its inputs.

use crate::window::RouteWindowStats;

pub fn recommend(stats: &RouteWindowStats, start_hour: u8, period_label: &str) -> Vec<String> {
    let total = stats.total_incidents;
    let mut out = Vec::with_capacity(4);

    // 1. Incident volume.
    if total > 100 {
        out.push(format!(
            "High incident volume: pre-position maintenance crew by {}:00",
            start_hour
        ));
    } else if total > 50 {
        out.push(format!(
            "Moderate incidents: on-call maintenance crew during {}",
            period_label
        ));
    } else {
        out.push("Low incident volume: standard maintenance protocols sufficient".to_string());
    }

    // 2. Severity mix, rendered as a whole-number percentage.
    let severity_pct = stats.high_severity_pct();
    if severity_pct > 40.0 {
        out.push(format!(
            "High severity rate ({:.0}%): deploy backup vehicle throughout window",
            severity_pct
        ));
    } else if severity_pct > 25.0 {
        out.push(format!(
            "Elevated severity ({:.0}%): backup vehicle on standby",
            severity_pct
        ));
    } else {
        out.push(format!(
            "Manageable severity ({:.0}%): standard backup protocols",
            severity_pct
        ));
    }

    // 3. Peak concentration: is any single hour carrying >30% of the window?
    let (peak_hour, peak_count) = stats.peak_hour().unwrap_or((start_hour, 0));
    if peak_count as f64 > total as f64 * 0.3 {
        out.push(format!(
            "Concentrated peak at {}:00: enhanced monitoring {}:30-{}:30",
            peak_hour,
            peak_hour as i32 - 1,
            peak_hour as i32 + 1
        ));
    } else {
        out.push("Distributed pattern: maintain consistent staffing throughout window".to_string());
    }

    // 4. Proactive measures.
    if total > 75 {
        out.push(format!(
            "Preventive action: enhanced pre-service inspection before {}:00",
            start_hour
        ));
    } else {
        out.push("Standard protocol: regular pre-service inspection".to_string());
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IncidentRecord, Severity};
    use crate::window::analyze_window;
    use chrono::Weekday;

    fn record(hour: u8, severity: Severity) -> IncidentRecord {
        IncidentRecord {
            route: "504".to_string(),
            hour,
            weekday: Weekday::Mon,
            min_delay: 6.0,
            severity,
        }
    }

    fn stats_for(data: &[IncidentRecord]) -> crate::window::RouteWindowStats {
        analyze_window(data, "504", 5, 9)
    }

    #[test]
    fn low_volume_low_severity_window() {
        let data = vec![
            record(5, Severity::Low),
            record(6, Severity::Low),
            record(7, Severity::Low),
        ];
        let recs = recommend(&stats_for(&data), 5, "morning rush");
        assert_eq!(recs.len(), 4);
        assert!(recs[0].starts_with("Low incident volume"));
        assert!(recs[1].starts_with("Manageable severity (0%)"));
        assert!(recs[2].starts_with("Distributed pattern"));
        assert!(recs[3].starts_with("Standard protocol"));
    }

    #[test]
    fn high_volume_triggers_preposition_and_inspection() {
        let mut data = Vec::new();
        for i in 0..101 {
            data.push(record(5 + (i % 5) as u8, Severity::Low));
        }
        let recs = recommend(&stats_for(&data), 5, "morning rush");
        assert!(recs[0].contains("pre-position maintenance crew by 5:00"));
        assert!(recs[3].contains("enhanced pre-service inspection before 5:00"));
    }

    #[test]
    fn severity_thresholds_select_backup_posture() {
        // 6 of 14 high-severity = 43% -> deploy throughout.
        let mut data = vec![record(5, Severity::Severe); 6];
        data.extend(vec![record(6, Severity::Low); 8]);
        let recs = recommend(&stats_for(&data), 5, "morning rush");
        assert!(recs[1].contains("deploy backup vehicle throughout window"));

        // 3 of 10 = 30% -> standby.
        let mut data = vec![record(5, Severity::High); 3];
        data.extend(vec![record(6, Severity::Low); 7]);
        let recs = recommend(&stats_for(&data), 5, "morning rush");
        assert!(recs[1].contains("backup vehicle on standby"));
    }

    #[test]
    fn concentrated_peak_names_monitoring_window() {
        // Hour 7 carries 4 of 10 incidents (40% > 30%).
        let mut data = vec![record(7, Severity::Low); 4];
        for h in [5, 5, 6, 8, 9, 9] {
            data.push(record(h, Severity::Low));
        }
        let recs = recommend(&stats_for(&data), 5, "morning rush");
        assert!(recs[2].contains("Concentrated peak at 7:00"));
        assert!(recs[2].contains("6:30-8:30"));
    }

    #[test]
    fn empty_window_falls_through_to_standard_branches() {
        let recs = recommend(&stats_for(&[]), 5, "morning rush");
        assert!(recs[0].starts_with("Low incident volume"));
        assert!(recs[1].starts_with("Manageable severity (0%)"));
        assert!(recs[2].starts_with("Distributed pattern"));
        assert!(recs[3].starts_with("Standard protocol"));
    }

    #[test]
    fn recommend_is_deterministic() {
        let data = vec![record(5, Severity::High), record(6, Severity::Low)];
        let stats = stats_for(&data);
        assert_eq!(
            recommend(&stats, 5, "morning rush"),
            recommend(&stats, 5, "morning rush")
        );
    }
}
