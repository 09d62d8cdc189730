pub mod candidate;
pub mod job;
pub mod applicant;
pub mod offer;

pub use candidate::*;
pub use job::*;
pub use applicant::*;
pub use offer::*;

use rusqlite::types::Type;
use rusqlite::Row;
use serde::de::DeserializeOwned;

/// Stored value that does not decode. Surfaces as a row error, never a default.
fn invalid_column(index: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, message.into())
}

/// Read a TEXT column holding one of an enum's names
fn enum_column<T>(
    row: &Row,
    index: usize,
    kind: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> rusqlite::Result<T> {
    let raw: String = row.get(index)?;
    parse(&raw).ok_or_else(|| invalid_column(index, format!("unknown {} '{}'", kind, raw)))
}

/// Read a TEXT column holding JSON
fn json_column<T: DeserializeOwned>(row: &Row, index: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(index)?;
    serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
    })
}
