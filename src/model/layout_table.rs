//! Auxiliary layout table with an explicit column schema.

use serde::Serialize;

/// Declared type of a layout table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FieldKind {
    /// Free text
    Text,
    /// Signed integer
    Integer,
    /// Floating point number
    Float,
}

/// One column of a [`LayoutSchema`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSpec {
    /// Column header, compared after normalization
    pub name: String,

    /// Value type
    pub kind: FieldKind,

    /// Strip surrounding quote characters and whitespace before parsing
    pub strip: bool,
}

impl FieldSpec {
    /// Create a field that is normalized before parsing.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            strip: true,
        }
    }

    /// Keep cell contents as read.
    pub fn raw(mut self) -> Self {
        self.strip = false;
        self
    }
}

/// Ordered list of columns expected in a layout table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutSchema {
    pub fields: Vec<FieldSpec>,
}

impl LayoutSchema {
    /// Create a schema from field specs.
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// The layout CSV exported by the Textract console.
    pub fn textract() -> Self {
        Self::new(vec![
            FieldSpec::new("Page number", FieldKind::Integer),
            FieldSpec::new("Layout", FieldKind::Text),
            FieldSpec::new("Text", FieldKind::Text),
            FieldSpec::new("Reading Order", FieldKind::Integer),
            FieldSpec::new("Confidence score % (Layout)", FieldKind::Float),
        ])
    }

    /// Position of a field by name.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }
}

impl Default for LayoutSchema {
    fn default() -> Self {
        Self::textract()
    }
}

/// A typed cell value. Empty cells are `Null`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Text(String),
    Integer(i64),
    Float(f64),
}

impl FieldValue {
    /// Text content, if this is a text cell.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Integer content, if this is an integer cell.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric content, widening integers.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(v) => Some(*v as f64),
            FieldValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether the cell was empty.
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }
}

/// One row of a layout table, values in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutRecord {
    pub values: Vec<FieldValue>,
}

/// A loaded layout table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LayoutTable {
    /// Schema the rows were validated against
    pub schema: LayoutSchema,

    /// Rows in file order
    pub records: Vec<LayoutRecord>,
}

impl LayoutTable {
    /// Create an empty table for a schema.
    pub fn new(schema: LayoutSchema) -> Self {
        Self {
            schema,
            records: Vec::new(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a cell by row index and column name.
    pub fn get(&self, row: usize, column: &str) -> Option<&FieldValue> {
        let index = self.schema.index_of(column)?;
        self.records.get(row)?.values.get(index)
    }

    /// Iterate over one column.
    pub fn column<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a FieldValue> + 'a {
        let index = self.schema.index_of(name);
        self.records
            .iter()
            .filter_map(move |record| index.and_then(|i| record.values.get(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textract_schema() {
        let schema = LayoutSchema::default();
        assert_eq!(schema.fields.len(), 5);
        assert_eq!(schema.index_of("Text"), Some(2));
        assert_eq!(schema.index_of("Missing"), None);
        assert!(schema.fields.iter().all(|f| f.strip));
    }

    #[test]
    fn test_field_value_accessors() {
        assert_eq!(FieldValue::Integer(3).as_f64(), Some(3.0));
        assert_eq!(FieldValue::Text("a".into()).as_str(), Some("a"));
        assert_eq!(FieldValue::Float(1.5).as_i64(), None);
        assert!(FieldValue::Null.is_null());
    }

    #[test]
    fn test_table_lookup() {
        let schema = LayoutSchema::new(vec![
            FieldSpec::new("Page number", FieldKind::Integer),
            FieldSpec::new("Text", FieldKind::Text).raw(),
        ]);
        let mut table = LayoutTable::new(schema);
        table.records.push(LayoutRecord {
            values: vec![FieldValue::Integer(1), FieldValue::Text("Title".into())],
        });

        assert_eq!(table.len(), 1);
        assert_eq!(table.get(0, "Text").and_then(|v| v.as_str()), Some("Title"));
        assert_eq!(table.get(1, "Text"), None);
        assert_eq!(
            table.column("Page number").filter_map(|v| v.as_i64()).sum::<i64>(),
            1
        );
    }
}
