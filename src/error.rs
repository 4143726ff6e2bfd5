use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScraperError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("CSV serialization failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("no transit table (table#target_table) in the report page")]
    TableNotFound,

    #[error("row {row}: malformed '{cell}' cell: {reason}")]
    MalformedRow {
        row: usize,
        cell: &'static str,
        reason: String,
    },

    #[error("report layout changed: column '{column}' is missing")]
    SchemaMismatch { column: &'static str },
}

pub type Result<T> = std::result::Result<T, ScraperError>;
