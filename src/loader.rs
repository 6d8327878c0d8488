use crate::error::LoadError;
use crate::types::{IncidentRecord, RawRow, Severity};
use crate::util::{parse_f64_safe, parse_i32_safe};
use chrono::Weekday;
use csv::ReaderBuilder;
use std::collections::HashSet;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::info;

/// Columns the engine cannot run without. Checked against the header row
/// before any record is parsed so a malformed file fails fast.
pub const REQUIRED_COLUMNS: [&str; 5] = ["route", "hour", "weekday", "min_delay", "delay_bin"];

#[derive(Debug, Clone)]
pub struct LoadReport {
    pub rows: usize,
    pub routes: usize,
}

/// Load and validate the incident CSV.
///
/// Schema errors (missing column, unparseable value) and domain violations
/// (hour outside 0..=23, weekday outside 0..=6, unknown severity label,
/// negative delay) abort the load with row/column context. A fully loaded
/// dataset therefore upholds every [`IncidentRecord`] invariant, and the
/// analysis passes can index weekday/hour without range checks.
pub fn load(path: &Path) -> Result<(Vec<IncidentRecord>, LoadReport), LoadError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;

    let headers = rdr.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn { column });
        }
    }

    let mut records: Vec<IncidentRecord> = Vec::new();
    for (idx, result) in rdr.deserialize::<RawRow>().enumerate() {
        // 1-based data row, matching what a spreadsheet user would count.
        let row = idx + 1;
        let raw = result?;
        records.push(parse_row(raw, row)?);
    }

    let routes: HashSet<&str> = records.iter().map(|r| r.route.as_str()).collect();
    let report = LoadReport {
        rows: records.len(),
        routes: routes.len(),
    };
    Ok((records, report))
}

fn parse_row(raw: RawRow, row: usize) -> Result<IncidentRecord, LoadError> {
    let route = raw
        .route
        .as_deref()
        .map(str::trim)
        .filter(|r| !r.is_empty())
        .map(str::to_string)
        .ok_or_else(|| LoadError::InvalidValue {
            row,
            column: "route",
            value: raw.route.clone().unwrap_or_default(),
        })?;

    let hour_raw = parse_i32_safe(raw.hour.as_deref()).ok_or_else(|| LoadError::InvalidValue {
        row,
        column: "hour",
        value: raw.hour.clone().unwrap_or_default(),
    })?;
    if !(0..=23).contains(&hour_raw) {
        return Err(LoadError::DomainViolation {
            row,
            column: "hour",
            value: hour_raw.to_string(),
        });
    }

    let weekday_raw =
        parse_i32_safe(raw.weekday.as_deref()).ok_or_else(|| LoadError::InvalidValue {
            row,
            column: "weekday",
            value: raw.weekday.clone().unwrap_or_default(),
        })?;
    // The CSV encodes Monday as 0 through Sunday as 6.
    let weekday = match weekday_raw {
        0 => Weekday::Mon,
        1 => Weekday::Tue,
        2 => Weekday::Wed,
        3 => Weekday::Thu,
        4 => Weekday::Fri,
        5 => Weekday::Sat,
        6 => Weekday::Sun,
        _ => {
            return Err(LoadError::DomainViolation {
                row,
                column: "weekday",
                value: weekday_raw.to_string(),
            })
        }
    };

    let min_delay =
        parse_f64_safe(raw.min_delay.as_deref()).ok_or_else(|| LoadError::InvalidValue {
            row,
            column: "min_delay",
            value: raw.min_delay.clone().unwrap_or_default(),
        })?;
    if min_delay < 0.0 {
        return Err(LoadError::DomainViolation {
            row,
            column: "min_delay",
            value: min_delay.to_string(),
        });
    }

    let bin = raw.delay_bin.as_deref().map(str::trim).unwrap_or("");
    let severity = Severity::from_label(bin).ok_or_else(|| LoadError::DomainViolation {
        row,
        column: "delay_bin",
        value: bin.to_string(),
    })?;

    Ok(IncidentRecord {
        route,
        hour: hour_raw as u8,
        weekday,
        min_delay,
        severity,
    })
}

/// Process-wide load-once cache. The dataset is immutable after loading;
/// every engine call still receives an explicit `&[IncidentRecord]` rather
/// than reaching into this cache. Invalidated only by [`DatasetCache::clear`]
/// or process restart.
pub struct DatasetCache {
    slot: Mutex<Option<Arc<Vec<IncidentRecord>>>>,
}

impl DatasetCache {
    pub const fn new() -> Self {
        DatasetCache {
            slot: Mutex::new(None),
        }
    }

    pub fn get_or_load(&self, path: &Path) -> Result<Arc<Vec<IncidentRecord>>, LoadError> {
        let mut slot = self.slot.lock().unwrap();
        if let Some(data) = slot.as_ref() {
            return Ok(Arc::clone(data));
        }
        let (records, report) = load(path)?;
        info!(
            "loaded {} incidents across {} routes from {}",
            crate::util::format_int(report.rows as i64),
            report.routes,
            path.display()
        );
        let data = Arc::new(records);
        *slot = Some(Arc::clone(&data));
        Ok(data)
    }

    pub fn clear(&self) {
        *self.slot.lock().unwrap() = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn loads_valid_rows() {
        let file = write_csv(
            "route,hour,weekday,min_delay,delay_bin\n\
             504,5,0,12.5,Low\n\
             505,23,6,0,Severe\n",
        );
        let (records, report) = load(file.path()).expect("load");
        assert_eq!(report.rows, 2);
        assert_eq!(report.routes, 2);
        assert_eq!(records[0].route, "504");
        assert_eq!(records[0].weekday, Weekday::Mon);
        assert_eq!(records[1].hour, 23);
        assert_eq!(records[1].severity, Severity::Severe);
    }

    #[test]
    fn missing_column_is_fatal() {
        let file = write_csv("route,hour,weekday,min_delay\n504,5,0,12.5\n");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::MissingColumn {
                column: "delay_bin"
            }
        ));
    }

    #[test]
    fn out_of_range_weekday_is_domain_violation() {
        let file = write_csv("route,hour,weekday,min_delay,delay_bin\n504,5,7,12.5,Low\n");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::DomainViolation {
                row: 1,
                column: "weekday",
                ..
            }
        ));
    }

    #[test]
    fn unknown_severity_label_is_domain_violation() {
        let file = write_csv("route,hour,weekday,min_delay,delay_bin\n504,5,0,12.5,Extreme\n");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoadError::DomainViolation {
                column: "delay_bin",
                ..
            }
        ));
    }

    #[test]
    fn unparseable_hour_is_invalid_value() {
        let file = write_csv("route,hour,weekday,min_delay,delay_bin\n504,noon,0,12.5,Low\n");
        let err = load(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::InvalidValue { column: "hour", .. }));
    }

    #[test]
    fn cache_returns_same_dataset_until_cleared() {
        let file = write_csv("route,hour,weekday,min_delay,delay_bin\n504,5,0,12.5,Low\n");
        let cache = DatasetCache::new();
        let a = cache.get_or_load(file.path()).expect("load");
        let b = cache.get_or_load(file.path()).expect("cached");
        assert!(Arc::ptr_eq(&a, &b));
        cache.clear();
        let c = cache.get_or_load(file.path()).expect("reload");
        assert!(!Arc::ptr_eq(&a, &c));
    }
}
