use std::collections::HashMap;

use crate::foundation::error::{ScatterError, ScatterResult};

/// Typed handle to a categorical column, resolved once against the table header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FieldId(usize);

impl FieldId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One input row. `lat`/`lon` are NaN when the source cell was missing or unparsable.
#[derive(Clone, Debug, PartialEq)]
pub struct Record {
    pub lat: f64,
    pub lon: f64,
    values: Vec<String>,
}

impl Record {
    pub fn new(lat: f64, lon: f64, values: Vec<String>) -> Self {
        Self { lat, lon, values }
    }

    /// Categorical value of `field`; an empty string when the row is short.
    pub fn category(&self, field: FieldId) -> &str {
        self.values.get(field.0).map(String::as_str).unwrap_or("")
    }

    pub fn has_coordinates(&self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

/// The loaded dataset. Row order defines the record-to-point correspondence for a run.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordTable {
    columns: Vec<String>,
    records: Vec<Record>,
}

impl RecordTable {
    pub fn new(columns: Vec<String>, records: Vec<Record>) -> ScatterResult<Self> {
        if let Some((row, r)) = records
            .iter()
            .enumerate()
            .find(|(_, r)| r.values.len() != columns.len())
        {
            return Err(ScatterError::validation(format!(
                "record {row} has {} values, header has {} columns",
                r.values.len(),
                columns.len()
            )));
        }
        Ok(Self { columns, records })
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn field(&self, name: &str) -> ScatterResult<FieldId> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(FieldId)
            .ok_or_else(|| {
                ScatterError::validation(format!(
                    "unknown categorical field '{name}' (columns: {})",
                    self.columns.join(", ")
                ))
            })
    }

    pub fn categories(&self, field: FieldId) -> Categories<'_> {
        Categories::collect(self, field)
    }
}

/// Distinct values of one field in first-seen order, plus each record's slot.
#[derive(Clone, Debug)]
pub struct Categories<'a> {
    keys: Vec<&'a str>,
    per_record: Vec<usize>,
}

impl<'a> Categories<'a> {
    fn collect(table: &'a RecordTable, field: FieldId) -> Self {
        let mut keys = Vec::new();
        let mut slots: HashMap<&str, usize> = HashMap::new();
        let mut per_record = Vec::with_capacity(table.len());
        for record in &table.records {
            let key = record.category(field);
            let slot = *slots.entry(key).or_insert_with(|| {
                keys.push(key);
                keys.len() - 1
            });
            per_record.push(slot);
        }
        Self { keys, per_record }
    }

    pub fn keys(&self) -> &[&'a str] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn slot_of_record(&self, index: usize) -> Option<usize> {
        self.per_record.get(index).copied()
    }

    /// Record indices grouped by category, groups in first-seen order.
    pub fn groups(&self) -> Vec<Vec<usize>> {
        let mut out = vec![Vec::new(); self.keys.len()];
        for (idx, &slot) in self.per_record.iter().enumerate() {
            out[slot].push(idx);
        }
        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/table.rs"]
mod tests;
