//! Query source: the ordered city list driving a run.
//!
//! A tabular CSV input with a `City` header column; rows are consumed in
//! file order, one query per row.

use crate::csv::parse_rows;
use crate::error::{Result, StoreError};
use jobsift_core::CityQuery;
use std::path::Path;

/// Load the ordered city queries from a tabular file.
///
/// The header row must contain a `City` column (case-insensitive). Rows
/// with an empty city cell are skipped with a warning; file order is
/// preserved for the rest.
pub fn load_cities(path: &Path) -> Result<Vec<CityQuery>> {
    let text = std::fs::read_to_string(path)?;
    let rows = parse_rows(&text);

    let Some((header, records)) = rows.split_first() else {
        return Err(StoreError::EmptyQuerySource {
            path: path.display().to_string(),
        });
    };

    let city_col = header
        .iter()
        .position(|h| h.trim().eq_ignore_ascii_case("city"))
        .ok_or_else(|| StoreError::MissingCityColumn {
            path: path.display().to_string(),
        })?;

    let mut cities = Vec::new();
    for record in records {
        let cell = record.get(city_col).map(String::as_str).unwrap_or("");
        match CityQuery::new(cell) {
            Ok(city) => cities.push(city),
            Err(_) => tracing::warn!("Skipping query row with empty city cell"),
        }
    }

    if cities.is_empty() {
        return Err(StoreError::EmptyQuerySource {
            path: path.display().to_string(),
        });
    }

    Ok(cities)
}
