//! Seed table carried in the configuration.

use serde::{Deserialize, Serialize};

use super::{RecordSource, SourceError};
use crate::table::Table;

/// A typed cell value from the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    /// Boolean value
    Bool(bool),
    /// Integer value
    Integer(i64),
    /// Floating point value
    Float(f64),
    /// Text value
    Text(String),
}

impl Cell {
    /// Coerce the cell to its display string.
    ///
    /// Integral floats keep one decimal (`3.0`), NaN becomes empty.
    #[must_use]
    pub fn to_display(&self) -> String {
        match self {
            Cell::Bool(true) => "True".to_string(),
            Cell::Bool(false) => "False".to_string(),
            Cell::Integer(i) => i.to_string(),
            Cell::Float(f) if f.is_nan() => String::new(),
            Cell::Float(f) if f.is_finite() && f.fract() == 0.0 => format!("{f:.1}"),
            Cell::Float(f) => f.to_string(),
            Cell::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for Cell {
    fn from(s: &str) -> Self {
        Cell::Text(s.to_string())
    }
}

/// Column names plus typed rows, declared in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedTable {
    /// Column names in declaration order
    pub columns: Vec<String>,
    /// Rows of cells; short rows are padded with empty strings
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
}

impl Default for SeedTable {
    fn default() -> Self {
        let row = |cells: [&str; 5]| cells.into_iter().map(Cell::from).collect::<Vec<_>>();
        Self {
            columns: [
                "MaterialCode",
                "MaterialName",
                "HazardClass",
                "HealthEffects",
                "Regulation",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            rows: vec![
                row([
                    "HM-001",
                    "Benzene",
                    "Carcinogenic",
                    "Cancer, dizziness, headaches",
                    "REACH, OSHA",
                ]),
                row([
                    "HM-002",
                    "Asbestos",
                    "Carcinogenic",
                    "Lung cancer, asbestosis",
                    "EU Ban",
                ]),
                row(["HM-003", "Mercury", "Toxic", "Neurological damage", "REACH"]),
                row([
                    "HM-004",
                    "Lead Compounds",
                    "Toxic",
                    "Organ damage, developmental issues",
                    "REACH, OSHA",
                ]),
            ],
        }
    }
}

impl SeedTable {
    /// Coerce every cell and build the display table.
    #[must_use]
    pub fn to_table(&self) -> Table {
        let mut table = Table::new(self.columns.iter().cloned());
        for row in &self.rows {
            table.push_row(row.iter().map(Cell::to_display).collect());
        }
        table
    }
}

/// Source backed by a [`SeedTable`] fixed at startup.
#[derive(Debug, Clone)]
pub struct InlineSource {
    seed: SeedTable,
}

impl InlineSource {
    /// Create a source over `seed`.
    #[must_use]
    pub fn new(seed: SeedTable) -> Self {
        Self { seed }
    }
}

impl RecordSource for InlineSource {
    fn load(&self) -> Result<Table, SourceError> {
        Ok(self.seed.to_table())
    }

    fn describe(&self) -> String {
        format!("inline table ({} rows)", self.seed.rows.len())
    }
}
