use serde::Serialize;
use std::error::Error;
use std::path::Path;
use tabled::{settings::Style, Table, Tabled};

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> Result<(), Box<dyn Error>> {
    let mut wtr = csv::Writer::from_path(path)?;
    for r in rows {
        wtr.serialize(r)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let s = serde_json::to_string_pretty(value)?;
    std::fs::write(path, s)?;
    Ok(())
}

/// Render rows as a markdown table, or a `(no rows)` placeholder so empty
/// results still produce output instead of a bare header.
pub fn render_table<T>(rows: &[T]) -> String
where
    T: Tabled + Clone,
{
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    Table::new(rows.iter().cloned()).with(Style::markdown()).to_string()
}

pub fn print_table<T>(rows: &[T])
where
    T: Tabled + Clone,
{
    println!("{}\n", render_table(rows));
}

pub fn print_section(title: &str) {
    println!("\n{}", title);
    println!("{}", "-".repeat(title.len().max(40)));
}
