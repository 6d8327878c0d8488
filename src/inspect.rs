//! Companion diagnostic for arbitrary uploaded CSVs.
//!
//! Reports columns, inferred value kinds, and value distributions for the
//! columns the engine knows about. Pure introspection, deliberately
//! tolerant: it never rejects a file, it only describes it.

use crate::error::LoadError;
use crate::util::{parse_f64_safe, parse_i32_safe};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Integer,
    Float,
    Text,
    Empty,
}

impl ColumnKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnKind::Integer => "integer",
            ColumnKind::Float => "float",
            ColumnKind::Text => "text",
            ColumnKind::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColumnProfile {
    pub name: String,
    pub kind: ColumnKind,
    pub non_empty: usize,
}

#[derive(Debug, Clone)]
pub struct DataProfile {
    pub rows: usize,
    pub columns: Vec<ColumnProfile>,
    /// Value counts for `delay_bin`, descending, when the column exists.
    pub delay_bin_counts: Option<Vec<(String, usize)>>,
    /// Observed `hour` range when the column exists and holds integers.
    pub hour_range: Option<(i32, i32)>,
    /// Value counts for `weekday` when the column exists.
    pub weekday_counts: Option<Vec<(String, usize)>>,
    /// Top ten `route` values by count when the column exists.
    pub top_routes: Option<Vec<(String, usize)>>,
}

pub fn inspect(path: &Path) -> Result<DataProfile, LoadError> {
    let mut rdr = ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_string).collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    let mut rows = 0usize;
    for result in rdr.records() {
        let record = result?;
        rows += 1;
        for (i, column) in cells.iter_mut().enumerate() {
            column.push(record.get(i).unwrap_or("").trim().to_string());
        }
    }

    let columns: Vec<ColumnProfile> = headers
        .iter()
        .zip(&cells)
        .map(|(name, values)| ColumnProfile {
            name: name.clone(),
            kind: infer_kind(values),
            non_empty: values.iter().filter(|v| !v.is_empty()).count(),
        })
        .collect();

    let column = |name: &str| -> Option<&Vec<String>> {
        headers.iter().position(|h| h == name).map(|i| &cells[i])
    };

    let delay_bin_counts = column("delay_bin").map(|values| value_counts(values, usize::MAX));
    let weekday_counts = column("weekday").map(|values| value_counts(values, usize::MAX));
    let top_routes = column("route").map(|values| value_counts(values, 10));
    let hour_range = column("hour").and_then(|values| {
        let hours: Vec<i32> = values
            .iter()
            .filter_map(|v| parse_i32_safe(Some(v)))
            .collect();
        let min = hours.iter().min()?;
        let max = hours.iter().max()?;
        Some((*min, *max))
    });

    Ok(DataProfile {
        rows,
        columns,
        delay_bin_counts,
        hour_range,
        weekday_counts,
        top_routes,
    })
}

fn infer_kind(values: &[String]) -> ColumnKind {
    let non_empty: Vec<&String> = values.iter().filter(|v| !v.is_empty()).collect();
    if non_empty.is_empty() {
        return ColumnKind::Empty;
    }
    if non_empty.iter().all(|v| parse_i32_safe(Some(v)).is_some()) {
        return ColumnKind::Integer;
    }
    if non_empty.iter().all(|v| parse_f64_safe(Some(v)).is_some()) {
        return ColumnKind::Float;
    }
    ColumnKind::Text
}

fn value_counts(values: &[String], limit: usize) -> Vec<(String, usize)> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for v in values {
        if !v.is_empty() {
            *counts.entry(v.as_str()).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(value, count)| (value.to_string(), count))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn profiles_columns_and_known_distributions() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(
            b"route,hour,weekday,min_delay,delay_bin,notes\n\
              504,5,0,12.5,Low,\n\
              504,9,2,3.0,High,switch fault\n\
              505,17,6,30.0,Low,\n",
        )
        .expect("write csv");

        let profile = inspect(file.path()).expect("inspect");
        assert_eq!(profile.rows, 3);
        assert_eq!(profile.columns.len(), 6);
        assert_eq!(profile.columns[1].kind, ColumnKind::Integer);
        assert_eq!(profile.columns[3].kind, ColumnKind::Float);
        assert_eq!(profile.columns[4].kind, ColumnKind::Text);
        assert_eq!(profile.columns[5].non_empty, 1);
        assert_eq!(profile.hour_range, Some((5, 17)));
        assert_eq!(
            profile.delay_bin_counts,
            Some(vec![("Low".to_string(), 2), ("High".to_string(), 1)])
        );
        assert_eq!(
            profile.top_routes,
            Some(vec![("504".to_string(), 2), ("505".to_string(), 1)])
        );
    }

    #[test]
    fn unknown_columns_are_described_not_rejected() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"a,b\n1,x\n2,y\n").expect("write csv");
        let profile = inspect(file.path()).expect("inspect");
        assert_eq!(profile.rows, 2);
        assert!(profile.delay_bin_counts.is_none());
        assert!(profile.hour_range.is_none());
    }
}
