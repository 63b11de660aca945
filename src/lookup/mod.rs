//! Single-value lookup
//!
//! Resolves one named datum from a [`DataIndex`] to printable text, picking
//! the nth element of array values.

mod index;

pub use index::*;

use tracing::instrument;

use crate::error::LookupError;

/// Resolve `name` in `index` to the text the lookup tool prints.
///
/// Scalars print as-is; for arrays the `nth` element is printed.
#[instrument(skip(index))]
pub fn lookup<I: DataIndex>(index: &mut I, name: &str, nth: usize) -> Result<String, LookupError> {
    let datum = match index.type_of(name) {
        DatumType::Unsupported => return Err(LookupError::Unsupported),
        _ => index
            .value_of(name)
            .ok_or_else(|| LookupError::NotFound(name.to_string()))?,
    };

    match datum {
        Datum::Int(v) => Ok(v.to_string()),
        Datum::Double(v) => Ok(v.to_string()),
        Datum::String(v) => Ok(v),
        Datum::IntArray(v) => nth_element(&v, nth),
        Datum::DoubleArray(v) => nth_element(&v, nth),
        Datum::StringArray(v) => nth_element(&v, nth),
    }
}

fn nth_element<T: ToString>(items: &[T], nth: usize) -> Result<String, LookupError> {
    items
        .get(nth)
        .map(ToString::to_string)
        .ok_or(LookupError::IndexOutOfRange {
            index: nth,
            len: items.len(),
        })
}
