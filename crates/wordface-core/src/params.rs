//! Named parameter tables, the spreadsheet the face reads its pitch from
//!
//! A store holds tables by name; each table maps cell aliases to values.
//! On disk it is a JSON object of objects:
//!
//! ```json
//! { "Parameters": { "led_spacing": 16.6, "plate_side": "450 mm" } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Accepted table names, tried in order; the first one present wins
pub const PARAMETER_TABLE_NAMES: [&str; 3] = ["Parameters", "parameters", "Spreadsheet"];

/// Cell holding the LED pitch, used for both rows and columns
pub const LED_SPACING: &str = "led_spacing";

/// A spreadsheet cell: a plain number, text such as `"16.6 mm"`, or
/// anything else a sheet may hold (booleans, empty cells, lists)
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl CellValue {
    /// Numeric value in millimetres, if the cell holds one
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(value) => Some(*value),
            CellValue::Text(text) => {
                let text = text.trim();
                let number = text.strip_suffix("mm").unwrap_or(text).trim_end();
                number.parse().ok()
            },
            CellValue::Other(_) => None,
        }
    }
}

/// One named table of cells
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ParameterTable {
    cells: BTreeMap<String, CellValue>,
}

impl ParameterTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cell(mut self, alias: &str, value: CellValue) -> Self {
        self.cells.insert(alias.to_string(), value);
        self
    }

    pub fn get(&self, alias: &str) -> Option<&CellValue> {
        self.cells.get(alias)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// A table found by [`ParameterStore::resolve`], remembering its name
#[derive(Debug, Clone, Copy)]
pub struct ResolvedTable<'a> {
    pub name: &'a str,
    pub table: &'a ParameterTable,
}

impl ResolvedTable<'_> {
    /// Read a cell as a float, failing loudly when absent or not numeric
    pub fn number(&self, alias: &str) -> Result<f64> {
        let value = self.table.get(alias).ok_or_else(|| ConfigError::MissingCell {
            table: self.name.to_string(),
            cell: alias.to_string(),
        })?;

        value.as_f64().ok_or_else(|| {
            let shown = match value {
                CellValue::Number(n) => n.to_string(),
                CellValue::Text(t) => t.clone(),
                CellValue::Other(v) => v.to_string(),
            };
            ConfigError::NotANumber {
                table: self.name.to_string(),
                cell: alias.to_string(),
                value: shown,
            }
            .into()
        })
    }

    /// Like [`Self::number`] but `None` when the cell does not exist
    pub fn optional_number(&self, alias: &str) -> Result<Option<f64>> {
        match self.table.get(alias) {
            Some(_) => self.number(alias).map(Some),
            None => Ok(None),
        }
    }
}

/// Every parameter table known to a document
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ParameterStore {
    tables: BTreeMap<String, ParameterTable>,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()).into())
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        log::debug!("Loaded parameter file {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn insert_table(&mut self, name: &str, table: ParameterTable) {
        self.tables.insert(name.to_string(), table);
    }

    pub fn table(&self, name: &str) -> Option<&ParameterTable> {
        self.tables.get(name)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Find the first table present under any of `names`
    pub fn resolve<'a>(&'a self, names: &[&'a str]) -> Result<ResolvedTable<'a>> {
        for &name in names {
            if let Some(table) = self.tables.get(name) {
                log::debug!("Using parameter table '{}'", name);
                return Ok(ResolvedTable { name, table });
            }
        }

        Err(ConfigError::TableNotFound {
            primary: names.first().copied().unwrap_or_default().to_string(),
            tried: names.join(", "),
        }
        .into())
    }

    /// Resolve with the accepted default names
    pub fn parameters(&self) -> Result<ResolvedTable<'_>> {
        self.resolve(&PARAMETER_TABLE_NAMES)
    }
}
