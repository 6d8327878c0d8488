//! Dense weekday x hour incident counts.

use crate::types::IncidentRecord;
use chrono::Weekday;

pub const DAYS: usize = 7;
pub const HOURS: usize = 24;

const WEEKDAYS: [Weekday; DAYS] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeatmapCell {
    pub weekday: Weekday,
    pub hour: u8,
    pub count: usize,
}

/// Complete 7x24 matrix of incident counts. Cells with no incidents are 0;
/// the matrix is always fully populated regardless of which (weekday, hour)
/// combinations appear in the data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heatmap {
    cells: [[usize; HOURS]; DAYS],
}

impl Heatmap {
    pub fn build(data: &[IncidentRecord]) -> Heatmap {
        let mut cells = [[0usize; HOURS]; DAYS];
        for r in data {
            // weekday/hour ranges are guaranteed by the loader
            cells[r.weekday.num_days_from_monday() as usize][r.hour as usize] += 1;
        }
        Heatmap { cells }
    }

    pub fn count(&self, weekday: Weekday, hour: u8) -> usize {
        self.cells[weekday.num_days_from_monday() as usize][hour as usize]
    }

    pub fn total(&self) -> usize {
        self.cells.iter().flatten().sum()
    }

    /// Iterate every cell in canonical order: weekday ascending from Monday,
    /// then hour ascending.
    pub fn cells(&self) -> impl Iterator<Item = HeatmapCell> + '_ {
        self.cells.iter().enumerate().flat_map(|(d, row)| {
            let weekday = WEEKDAYS[d];
            row.iter().enumerate().map(move |(h, &count)| HeatmapCell {
                weekday,
                hour: h as u8,
                count,
            })
        })
    }

    /// The busiest cell. Ties resolve to the first cell in canonical order,
    /// so the result is deterministic. An all-zero heatmap yields the
    /// Monday/00:00 cell with a count of 0; callers treat that as "no data".
    pub fn peak_cell(&self) -> HeatmapCell {
        let mut peak = HeatmapCell {
            weekday: Weekday::Mon,
            hour: 0,
            count: self.cells[0][0],
        };
        for cell in self.cells() {
            if cell.count > peak.count {
                peak = cell;
            }
        }
        peak
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    fn record(weekday: Weekday, hour: u8) -> IncidentRecord {
        IncidentRecord {
            route: "504".to_string(),
            hour,
            weekday,
            min_delay: 5.0,
            severity: Severity::Low,
        }
    }

    #[test]
    fn heatmap_is_always_dense() {
        let map = Heatmap::build(&[record(Weekday::Wed, 9)]);
        assert_eq!(map.cells().count(), DAYS * HOURS);
        assert_eq!(map.count(Weekday::Wed, 9), 1);
        assert_eq!(map.count(Weekday::Mon, 0), 0);
    }

    #[test]
    fn cell_counts_sum_to_input_length() {
        let data = vec![
            record(Weekday::Mon, 5),
            record(Weekday::Mon, 5),
            record(Weekday::Sun, 23),
            record(Weekday::Fri, 17),
        ];
        let map = Heatmap::build(&data);
        assert_eq!(map.total(), data.len());
        assert_eq!(map.count(Weekday::Mon, 5), 2);
    }

    #[test]
    fn peak_tie_resolves_to_canonical_order() {
        // Equal max counts at (Mon, 5) and (Tue, 5); Monday wins.
        let data = vec![
            record(Weekday::Tue, 5),
            record(Weekday::Mon, 5),
            record(Weekday::Tue, 5),
            record(Weekday::Mon, 5),
        ];
        let peak = Heatmap::build(&data).peak_cell();
        assert_eq!(peak.weekday, Weekday::Mon);
        assert_eq!(peak.hour, 5);
        assert_eq!(peak.count, 2);
    }

    #[test]
    fn empty_input_yields_zero_peak() {
        let peak = Heatmap::build(&[]).peak_cell();
        assert_eq!(peak.count, 0);
        assert_eq!(peak.weekday, Weekday::Mon);
        assert_eq!(peak.hour, 0);
    }
}
