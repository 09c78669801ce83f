use fuelgen::core::io::csv::CsvTableError;
use fuelgen::core::params::tables::TableError;
use fuelgen::engine::error::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Reference table error: {0}")]
    Tables(#[from] TableError),

    #[error("Table I/O error: {0}")]
    CsvTable(#[from] CsvTableError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
