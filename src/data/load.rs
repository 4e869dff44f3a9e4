use std::{fs::File, io::Read, path::Path};

use anyhow::Context as _;
use csv::ReaderBuilder;

use crate::{
    data::table::{Record, RecordTable},
    foundation::error::{ScatterError, ScatterResult},
};

/// Names of the coordinate columns in the source file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CoordinateColumns {
    pub lat: String,
    pub lon: String,
}

impl Default for CoordinateColumns {
    fn default() -> Self {
        Self {
            lat: "lat".to_string(),
            lon: "lon".to_string(),
        }
    }
}

/// Load the whole table from a CSV file with a header row.
#[tracing::instrument(skip(columns))]
pub fn load_records(path: &Path, columns: &CoordinateColumns) -> ScatterResult<RecordTable> {
    let file = File::open(path)
        .with_context(|| format!("failed to open CSV file '{}'", path.display()))
        .map_err(|e| ScatterError::load(format!("{e:#}")))?;
    let table = read_records(file, columns)?;
    tracing::info!(records = table.len(), path = %path.display(), "loaded record table");
    Ok(table)
}

pub fn read_records<R: Read>(reader: R, columns: &CoordinateColumns) -> ScatterResult<RecordTable> {
    let mut rdr = ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| ScatterError::load(format!("failed to read CSV header: {e}")))?
        .clone();

    let lat_idx = header_index(&headers, &columns.lat)?;
    let lon_idx = header_index(&headers, &columns.lon)?;

    let mut records = Vec::new();
    let mut missing_coords = 0usize;
    for (row, result) in rdr.records().enumerate() {
        let rec = result.map_err(|e| ScatterError::load(format!("malformed CSV row {}: {e}", row + 1)))?;
        let lat = parse_coordinate(rec.get(lat_idx));
        let lon = parse_coordinate(rec.get(lon_idx));
        if !lat.is_finite() || !lon.is_finite() {
            missing_coords += 1;
        }
        let values = (0..headers.len())
            .map(|i| rec.get(i).unwrap_or("").to_string())
            .collect();
        records.push(Record::new(lat, lon, values));
    }

    if missing_coords > 0 {
        tracing::warn!(
            rows = missing_coords,
            "rows with missing or unparsable coordinates"
        );
    }

    RecordTable::new(headers.iter().map(str::to_string).collect(), records)
}

fn header_index(headers: &csv::StringRecord, name: &str) -> ScatterResult<usize> {
    headers.iter().position(|h| h == name).ok_or_else(|| {
        ScatterError::load(format!("coordinate column '{name}' not found in CSV header"))
    })
}

fn parse_coordinate(cell: Option<&str>) -> f64 {
    cell.and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
#[path = "../../tests/unit/data/load.rs"]
mod tests;
