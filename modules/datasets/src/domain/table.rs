//! Tabular decoder for uploaded CSV buffers.
//!
//! The first non-empty line establishes the column headers; every later
//! non-empty line becomes one row. A row whose field count differs from the
//! header count fails the whole decode (reject, not pad). Quoting is not
//! interpreted; values are carried verbatim.
//!
//! The table is materialized in full: the pipeline needs positional
//! correspondence with the scoring service's output array, so it cannot
//! stream rows past that call.

use serde_json::{Map, Value};

use crate::domain::error::DecodeError;

/// Column carrying the optional customer identifier.
const CUSTOMER_ID_COLUMN: &str = "customer_id";

/// An ordered, fully materialized table of string cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    customer_id_col: Option<usize>,
}

impl Table {
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Customer id cell of row `index`, or `None` when the column is absent.
    /// The value is verbatim; an empty cell is still `Some("")`.
    #[must_use]
    pub fn customer_id(&self, index: usize) -> Option<&str> {
        let col = self.customer_id_col?;
        self.rows.get(index).map(|row| row[col].as_str())
    }

    /// Rows as JSON objects mapping header name to string value, in upload
    /// order. This is the wire shape the scoring service receives and the
    /// `features` payload persisted per prediction.
    #[must_use]
    pub fn row_objects(&self) -> Vec<Map<String, Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.headers
                    .iter()
                    .zip(row)
                    .map(|(h, v)| (h.clone(), Value::String(v.clone())))
                    .collect()
            })
            .collect()
    }
}

/// Decode an uploaded byte buffer into a [`Table`].
///
/// # Errors
/// `DecodeError::Malformed` when the buffer is not UTF-8 or a row's field
/// count differs from the header count.
pub fn decode(bytes: &[u8]) -> Result<Table, DecodeError> {
    let text = std::str::from_utf8(bytes)
        .map_err(|_| DecodeError::malformed("input is not valid UTF-8"))?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut lines = text.lines().filter(|l| !l.trim().is_empty());

    let Some(header_line) = lines.next() else {
        return Ok(Table {
            headers: Vec::new(),
            rows: Vec::new(),
            customer_id_col: None,
        });
    };

    let headers: Vec<String> = header_line.split(',').map(|h| h.trim().to_owned()).collect();
    let customer_id_col = headers.iter().position(|h| h == CUSTOMER_ID_COLUMN);

    let mut rows = Vec::new();
    for (i, line) in lines.enumerate() {
        let fields: Vec<String> = line.split(',').map(ToOwned::to_owned).collect();
        if fields.len() != headers.len() {
            return Err(DecodeError::malformed(format!(
                "row {} has {} fields, expected {}",
                i + 1,
                fields.len(),
                headers.len()
            )));
        }
        rows.push(fields);
    }

    Ok(Table {
        headers,
        rows,
        customer_id_col,
    })
}
