//! CSV loading.
//!
//! Header cells are normalized before matching (trimmed, lower-cased, spaces
//! replaced by underscores), so `" Food Name"` and `food_name` are the same
//! column. Columns other than the required six are ignored.
//!
//! A table either loads completely or not at all: the first bad row aborts the
//! load with its line number, and the caller keeps whatever dataset it had.

use super::{Category, FoodItem};
use serde::Deserialize;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Normalized names of the columns every table must have.
pub const REQUIRED_COLUMNS: [&str; 6] = ["food_name", "energy_kcal", "carb_g", "protein_g", "fat_g", "fibre_g"];

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),

    #[error("invalid row at line {line}: {reason}")]
    InvalidRow { line: u64, reason: String },
}

#[derive(Debug, Deserialize)]
struct Row {
    food_name: String,
    energy_kcal: f64,
    carb_g: f64,
    protein_g: f64,
    fat_g: f64,
    fibre_g: f64,
}

impl Row {
    fn into_item(self, line: u64, category: Category) -> Result<FoodItem, LoadError> {
        if self.food_name.is_empty() {
            return Err(LoadError::InvalidRow { line, reason: "empty food_name".to_string() });
        }

        let nutrients = [
            ("energy_kcal", self.energy_kcal),
            ("carb_g", self.carb_g),
            ("protein_g", self.protein_g),
            ("fat_g", self.fat_g),
            ("fibre_g", self.fibre_g),
        ];
        if let Some((column, value)) = nutrients.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(LoadError::InvalidRow { line, reason: format!("{column} must be a non-negative number, got {value}") });
        }

        Ok(FoodItem::new(self.food_name, category)
            .energy(self.energy_kcal)
            .carbs(self.carb_g)
            .protein(self.protein_g)
            .fat(self.fat_g)
            .fibre(self.fibre_g))
    }
}

/// `" Energy Kcal "` -> `"energy_kcal"`.
pub fn normalize_column(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Load one table from a CSV file on disk.
pub fn load_csv(path: impl AsRef<Path>, category: Category) -> Result<Vec<FoodItem>, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
    let items = load_reader(file, category)?;
    log::debug!("read {} {} rows from {}", items.len(), category.label(), path.display());
    Ok(items)
}

/// Load one table from any CSV source. The first record is the header row.
pub fn load_reader<R: io::Read>(reader: R, category: Category) -> Result<Vec<FoodItem>, LoadError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let headers: csv::StringRecord = rdr.headers()?.iter().map(normalize_column).collect();
    if let Some(missing) = REQUIRED_COLUMNS.iter().find(|col| !headers.iter().any(|h| h == **col)) {
        return Err(LoadError::MissingColumn(*missing));
    }

    let mut items = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let line = record.position().map_or(0, |pos| pos.line());
        let row: Row =
            record.deserialize(Some(&headers)).map_err(|err| LoadError::InvalidRow { line, reason: err.to_string() })?;
        items.push(row.into_item(line, category)?);
    }

    Ok(items)
}
