//! Layout table loader.
//!
//! Headers and stripped cells lose surrounding whitespace and quote
//! characters (the Textract console writes `'Page number','Layout',...`).
//! Every cell is then parsed as its schema field's type.

use crate::error::{Error, Result};
use crate::model::{FieldKind, FieldSpec, FieldValue, LayoutRecord, LayoutSchema, LayoutTable};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load a layout table from a CSV file.
pub fn load_layout_table<P: AsRef<Path>>(path: P, schema: &LayoutSchema) -> Result<LayoutTable> {
    let path = path.as_ref();
    log::debug!("Loading layout table from {}", path.display());
    let file = File::open(path)?;
    load_layout_table_reader(BufReader::new(file), schema)
}

/// Load a layout table from any CSV reader.
pub fn load_layout_table_reader<R: Read>(reader: R, schema: &LayoutSchema) -> Result<LayoutTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| strip_cell(h).to_string())
        .collect();

    let columns = schema
        .fields
        .iter()
        .map(|field| {
            headers
                .iter()
                .position(|h| *h == field.name)
                .ok_or_else(|| Error::MissingColumn(field.name.clone()))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut table = LayoutTable::new(schema.clone());
    for (i, record) in csv_reader.records().enumerate() {
        let record = record?;
        let values = schema
            .fields
            .iter()
            .zip(&columns)
            .map(|(field, &col)| parse_cell(field, record.get(col).unwrap_or(""), i + 1))
            .collect::<Result<Vec<_>>>()?;
        table.records.push(LayoutRecord { values });
    }

    log::debug!(
        "Loaded layout table: {} rows, {} columns",
        table.len(),
        schema.fields.len()
    );
    Ok(table)
}

/// Trim whitespace and surrounding quote characters.
pub fn strip_cell(cell: &str) -> &str {
    cell.trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .trim()
}

fn parse_cell(field: &FieldSpec, cell: &str, row: usize) -> Result<FieldValue> {
    let cell = if field.strip { strip_cell(cell) } else { cell };

    if cell.is_empty() {
        return Ok(FieldValue::Null);
    }

    let invalid = || Error::InvalidField {
        row,
        column: field.name.clone(),
        value: cell.to_string(),
    };

    match field.kind {
        FieldKind::Text => Ok(FieldValue::Text(cell.to_string())),
        FieldKind::Integer => cell
            .parse::<i64>()
            .map(FieldValue::Integer)
            .map_err(|_| invalid()),
        FieldKind::Float => cell
            .parse::<f64>()
            .map(FieldValue::Float)
            .map_err(|_| invalid()),
    }
}
