//! In-memory column-typed table
//!
//! Columns keep insertion order. A column is numeric when every non-empty
//! cell parses as a float, otherwise it stays text. Missing cells are
//! represented explicitly so statistics can skip them.

use crate::error::TabularError;
use chrono::NaiveDate;
use indexmap::IndexMap;

/// A single typed column
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Floating-point values with explicit missing cells
    Numeric(Vec<Option<f64>>),
    /// Text values with explicit missing cells
    Text(Vec<Option<String>>),
}

impl Column {
    /// Number of cells, including missing ones
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Column::Numeric(v) => v.len(),
            Column::Text(v) => v.len(),
        }
    }

    /// Whether the column has no cells
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Count of missing cells
    #[must_use]
    pub fn missing_count(&self) -> usize {
        match self {
            Column::Numeric(v) => v.iter().filter(|c| c.is_none()).count(),
            Column::Text(v) => v.iter().filter(|c| c.is_none()).count(),
        }
    }

    /// Type name used in statistics output
    #[inline]
    #[must_use]
    pub fn dtype(&self) -> &'static str {
        match self {
            Column::Numeric(_) => "numeric",
            Column::Text(_) => "text",
        }
    }

    /// Non-missing numeric values, empty for text columns
    #[must_use]
    pub fn numeric_values(&self) -> Vec<f64> {
        match self {
            Column::Numeric(v) => v.iter().filter_map(|c| *c).collect(),
            Column::Text(_) => Vec::new(),
        }
    }
}

/// Column-ordered table
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: IndexMap<String, Column>,
    row_count: usize,
}

impl Table {
    /// Create an empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode CSV bytes into a table
    ///
    /// The first record is the header. Quoted fields may contain commas,
    /// escaped quotes (`""`) and newlines. Short records are padded with
    /// missing cells.
    ///
    /// # Errors
    /// `ParseFailed` for a missing header, `Empty` when no data rows follow.
    pub fn from_csv(bytes: &[u8]) -> Result<Self, TabularError> {
        let text = String::from_utf8_lossy(bytes);
        let records = parse_csv_records(&text);

        let mut records = records.into_iter();
        let header = records
            .next()
            .ok_or_else(|| TabularError::ParseFailed("missing header row".to_string()))?;
        if header.is_empty() || header.iter().all(|h| h.trim().is_empty()) {
            return Err(TabularError::ParseFailed("empty header row".to_string()));
        }

        let rows: Vec<Vec<String>> = records.collect();
        if rows.is_empty() {
            return Err(TabularError::Empty);
        }

        let mut cells: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(rows.len()); header.len()];
        for row in &rows {
            for (idx, cell) in cells.iter_mut().enumerate() {
                let value = row.get(idx).map(|s| s.trim().to_string());
                cell.push(match value {
                    Some(v) if !v.is_empty() => Some(v),
                    _ => None,
                });
            }
        }

        let mut columns = IndexMap::with_capacity(header.len());
        for (name, raw) in header.iter().zip(cells) {
            columns.insert(name.trim().to_string(), infer_column(raw));
        }

        tracing::info!(rows = rows.len(), columns = columns.len(), "decoded csv table");
        Ok(Self {
            columns,
            row_count: rows.len(),
        })
    }

    /// Build a table from named columns
    ///
    /// # Errors
    /// `ParseFailed` when column lengths disagree.
    pub fn from_columns(
        columns: impl IntoIterator<Item = (String, Column)>,
    ) -> Result<Self, TabularError> {
        let columns: IndexMap<String, Column> = columns.into_iter().collect();
        let mut row_count = None;
        for (name, column) in &columns {
            let len = column.len();
            match row_count {
                None => row_count = Some(len),
                Some(expected) if expected != len => {
                    return Err(TabularError::ParseFailed(format!(
                        "column {name} has {len} rows, expected {expected}"
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(Self {
            columns,
            row_count: row_count.unwrap_or(0),
        })
    }

    /// Number of data rows
    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Number of columns
    #[inline]
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Column names in insertion order
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.keys().map(String::as_str).collect()
    }

    /// Look up a column by name
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.get(name)
    }

    /// All columns in insertion order
    pub fn columns(&self) -> impl Iterator<Item = (&str, &Column)> {
        self.columns.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Names of numeric columns in insertion order
    #[must_use]
    pub fn numeric_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, c)| matches!(c, Column::Numeric(_)))
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// Names of text columns in insertion order
    #[must_use]
    pub fn text_column_names(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|(_, c)| matches!(c, Column::Text(_)))
            .map(|(k, _)| k.as_str())
            .collect()
    }

    /// First column whose non-missing values all parse as dates
    #[must_use]
    pub fn detect_date_column(&self) -> Option<&str> {
        self.columns.iter().find_map(|(name, column)| {
            let Column::Text(values) = column else {
                return None;
            };
            let present: Vec<&String> = values.iter().flatten().collect();
            if present.is_empty() {
                return None;
            }
            present
                .iter()
                .all(|v| parse_date(v).is_some())
                .then_some(name.as_str())
        })
    }

    /// Render the first `n` rows as an aligned text block
    #[must_use]
    pub fn sample_rows(&self, n: usize) -> String {
        let names = self.column_names();
        let mut lines = vec![names.join(" | ")];

        for row in 0..self.row_count.min(n) {
            let cells: Vec<String> = self
                .columns
                .values()
                .map(|column| match column {
                    Column::Numeric(v) => v[row].map_or("-".to_string(), |x| format!("{x}")),
                    Column::Text(v) => v[row].clone().unwrap_or_else(|| "-".to_string()),
                })
                .collect();
            lines.push(cells.join(" | "));
        }

        lines.join("\n")
    }
}

/// Parse a supported date representation
fn parse_date(value: &str) -> Option<NaiveDate> {
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%d-%m-%Y", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date);
        }
    }
    // Timestamps with a time component
    value
        .get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
        .filter(|_| value.len() > 10)
}

/// Numeric when every present cell parses as f64
fn infer_column(raw: Vec<Option<String>>) -> Column {
    let all_numeric = raw
        .iter()
        .flatten()
        .all(|v| v.parse::<f64>().is_ok());
    let any_present = raw.iter().any(Option::is_some);

    if all_numeric && any_present {
        Column::Numeric(
            raw.into_iter()
                .map(|c| c.and_then(|v| v.parse::<f64>().ok()))
                .collect(),
        )
    } else {
        Column::Text(raw)
    }
}

/// Split CSV text into records of fields, honoring quotes
fn parse_csv_records(text: &str) -> Vec<Vec<String>> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => fields.push(std::mem::take(&mut field)),
            '\r' => {}
            '\n' => {
                fields.push(std::mem::take(&mut field));
                if !(fields.len() == 1 && fields[0].is_empty()) {
                    records.push(std::mem::take(&mut fields));
                } else {
                    fields.clear();
                }
            }
            _ => field.push(c),
        }
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        if !(fields.len() == 1 && fields[0].is_empty()) {
            records.push(fields);
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CSV: &str = "date,price,volume,city\n\
        2025-01-01,10.5,100,Mumbai\n\
        2025-01-02,11.0,110,Delhi\n\
        2025-01-03,,120,Pune\n";

    #[test]
    fn decodes_csv_with_type_inference() {
        let table = Table::from_csv(CSV.as_bytes()).unwrap();

        assert_eq!(table.row_count(), 3);
        assert_eq!(table.column_count(), 4);
        assert_eq!(table.column_names(), vec!["date", "price", "volume", "city"]);
        assert_eq!(table.numeric_column_names(), vec!["price", "volume"]);
        assert_eq!(table.text_column_names(), vec!["date", "city"]);
    }

    #[test]
    fn missing_cells_are_counted() {
        let table = Table::from_csv(CSV.as_bytes()).unwrap();
        assert_eq!(table.column("price").unwrap().missing_count(), 1);
        assert_eq!(table.column("volume").unwrap().missing_count(), 0);
    }

    #[test]
    fn quoted_fields_keep_commas() {
        let csv = "name,notes\nwidget,\"cheap, cheerful\"\nsprocket,\"says \"\"hi\"\"\"\n";
        let table = Table::from_csv(csv.as_bytes()).unwrap();

        let Column::Text(notes) = table.column("notes").unwrap() else {
            panic!("notes should be text");
        };
        assert_eq!(notes[0].as_deref(), Some("cheap, cheerful"));
        assert_eq!(notes[1].as_deref(), Some("says \"hi\""));
    }

    #[test]
    fn header_only_is_empty() {
        let err = Table::from_csv(b"a,b,c\n").unwrap_err();
        assert!(matches!(err, TabularError::Empty));
    }

    #[test]
    fn no_header_is_parse_failure() {
        let err = Table::from_csv(b"").unwrap_err();
        assert!(matches!(err, TabularError::ParseFailed(_)));
    }

    #[test]
    fn detects_date_column() {
        let table = Table::from_csv(CSV.as_bytes()).unwrap();
        assert_eq!(table.detect_date_column(), Some("date"));

        let csv = "a,b\n1,x\n2,y\n";
        let table = Table::from_csv(csv.as_bytes()).unwrap();
        assert_eq!(table.detect_date_column(), None);
    }

    #[test]
    fn sample_rows_renders_missing_cells() {
        let table = Table::from_csv(CSV.as_bytes()).unwrap();
        let sample = table.sample_rows(2);
        assert!(sample.starts_with("date | price | volume | city"));
        assert_eq!(sample.lines().count(), 3);

        let full = table.sample_rows(10);
        assert!(full.contains("2025-01-03 | - | 120 | Pune"));
    }

    #[test]
    fn from_columns_validates_lengths() {
        let err = Table::from_columns(vec![
            ("a".to_string(), Column::Numeric(vec![Some(1.0)])),
            ("b".to_string(), Column::Numeric(vec![Some(1.0), Some(2.0)])),
        ])
        .unwrap_err();
        assert!(matches!(err, TabularError::ParseFailed(_)));
    }
}
