use thiserror::Error;

/// Failures while loading and validating the incident CSV. Schema problems
/// (missing columns, untyped values) and domain violations (values outside
/// the documented ranges) are both fatal: the dataset is either fully valid
/// or the load aborts, nothing is silently skipped.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("required column '{column}' is missing from the input file")]
    MissingColumn { column: &'static str },

    #[error("row {row}: column '{column}' has unparseable value '{value}'")]
    InvalidValue {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("row {row}: column '{column}' value '{value}' is outside its allowed domain")]
    DomainViolation {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Contract violations on scenario inputs. These stop processing rather
/// than producing a degenerate estimate.
#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("intervention strength must be between 1 and 10, got {0}")]
    InvalidStrength(u8),

    #[error("hour window start {start} is after end {end}")]
    InvalidWindow { start: u8, end: u8 },
}
