//! Data index collaborator
//!
//! `DataIndex` is the interface the lookup tool queries. `FlatIndex` backs it
//! with a [`SettingsStore`], inferring each datum's type from its raw text.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::error::CodecError;
use crate::settings::convert::{is_float_literal, is_int_literal, tokenize};
use crate::settings::{FileCodec, SettingsStore};

/// Type of a datum as reported by a [`DataIndex`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatumType {
    Int,
    Double,
    String,
    IntArray,
    DoubleArray,
    StringArray,
    Unsupported,
}

/// A datum value
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Int(i64),
    Double(f64),
    String(String),
    IntArray(Vec<i64>),
    DoubleArray(Vec<f64>),
    StringArray(Vec<String>),
}

impl fmt::Display for Datum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write!(f, "{}", item)?;
            }
            Ok(())
        }

        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Double(v) => write!(f, "{}", v),
            Self::String(v) => write!(f, "{}", v),
            Self::IntArray(v) => list(f, v),
            Self::DoubleArray(v) => list(f, v),
            Self::StringArray(v) => list(f, v),
        }
    }
}

/// Queryable index of named data
pub trait DataIndex {
    /// Load data from `path`; names are resolved relative to `namespace`
    fn load(&mut self, path: &Path, namespace: &str) -> Result<(), CodecError>;

    /// Type of the datum called `name`
    fn type_of(&self, name: &str) -> DatumType;

    /// Value of the datum called `name`
    fn value_of(&mut self, name: &str) -> Option<Datum>;

    /// Text form of the datum called `name`
    fn serialize(&mut self, name: &str) -> String;
}

/// [`DataIndex`] over a flat settings file
#[derive(Debug, Default)]
pub struct FlatIndex {
    store: SettingsStore,
    codec: FileCodec,
    namespace: String,
}

impl FlatIndex {
    /// Create an empty index
    pub fn new(codec: FileCodec) -> Self {
        Self {
            codec,
            ..Default::default()
        }
    }

    /// Wrap an existing store
    pub fn from_store(store: SettingsStore) -> Self {
        Self {
            store,
            ..Default::default()
        }
    }

    /// The backing store
    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    fn resolve<'a>(&self, name: &'a str) -> &'a str {
        name.strip_prefix(self.namespace.as_str()).unwrap_or(name)
    }
}

impl DataIndex for FlatIndex {
    fn load(&mut self, path: &Path, namespace: &str) -> Result<(), CodecError> {
        self.namespace = namespace.to_string();
        self.codec.load(path, &mut self.store)?;
        debug!("Indexed {} settings under {:?}", self.store.len(), namespace);
        Ok(())
    }

    fn type_of(&self, name: &str) -> DatumType {
        match self.store.raw(self.resolve(name)) {
            Some(raw) => infer_type(raw),
            None => DatumType::Unsupported,
        }
    }

    fn value_of(&mut self, name: &str) -> Option<Datum> {
        let ty = self.type_of(name);
        let name = self.resolve(name);
        let store = &mut self.store;
        match ty {
            DatumType::Int => Some(Datum::Int(store.get_int(name))),
            DatumType::Double => Some(Datum::Double(store.get_float(name))),
            DatumType::String => Some(Datum::String(store.get_string(name))),
            DatumType::IntArray => Some(Datum::IntArray(store.get_int_vec(name))),
            DatumType::DoubleArray => Some(Datum::DoubleArray(store.get_float_vec(name))),
            DatumType::StringArray => Some(Datum::StringArray(store.get_string_vec(name))),
            DatumType::Unsupported => None,
        }
    }

    fn serialize(&mut self, name: &str) -> String {
        self.value_of(name).map(|d| d.to_string()).unwrap_or_default()
    }
}

/// Infer a datum type from raw setting text.
///
/// Single tokens are ints or doubles when they parse in full. Several tokens
/// form an int or double array when every token does; otherwise they form a
/// string array only if the text uses list punctuation.
pub fn infer_type(raw: &str) -> DatumType {
    let tokens = tokenize(raw);
    match tokens.as_slice() {
        [] => DatumType::String,
        [one] if is_int_literal(one) => DatumType::Int,
        [one] if is_float_literal(one) => DatumType::Double,
        [_] => DatumType::String,
        many if many.iter().all(|t| is_int_literal(t)) => DatumType::IntArray,
        many if many.iter().all(|t| is_float_literal(t)) => DatumType::DoubleArray,
        _ if raw.contains([',', '(', ')']) => DatumType::StringArray,
        _ => DatumType::String,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_of(text: &str) -> FlatIndex {
        let mut store = SettingsStore::new();
        FileCodec::new().read_from(text, &mut store);
        FlatIndex::from_store(store)
    }

    #[test]
    fn test_infer_type() {
        assert_eq!(infer_type("42"), DatumType::Int);
        assert_eq!(infer_type("-0.5"), DatumType::Double);
        assert_eq!(infer_type("1e3"), DatumType::Double);
        assert_eq!(infer_type("hello"), DatumType::String);
        assert_eq!(infer_type(""), DatumType::String);
        assert_eq!(infer_type("1 2 3"), DatumType::IntArray);
        assert_eq!(infer_type("(1, 2.5)"), DatumType::DoubleArray);
        assert_eq!(infer_type("red, green"), DatumType::StringArray);
        assert_eq!(infer_type("My Window"), DatumType::String);
    }

    #[test]
    fn test_value_of_commits_store_type() {
        let mut index = index_of("width 640\npos 1 2 3\n");
        assert_eq!(index.value_of("width"), Some(Datum::Int(640)));
        assert_eq!(index.value_of("pos"), Some(Datum::IntArray(vec![1, 2, 3])));
        assert_eq!(
            index.store().type_of("pos"),
            Some(crate::settings::SettingType::IntVec)
        );
        assert_eq!(index.value_of("missing"), None);
    }

    #[test]
    fn test_namespace_prefix_is_stripped() {
        let mut index = index_of("width 640\n");
        index.namespace = "/".to_string();
        assert_eq!(index.type_of("/width"), DatumType::Int);
        assert_eq!(index.type_of("width"), DatumType::Int);
        assert_eq!(index.serialize("/width"), "640");
    }

    #[test]
    fn test_serialize_arrays() {
        let mut index = index_of("pos (0.5, 1.5)\ntags a, b\n");
        assert_eq!(index.serialize("pos"), "0.5,1.5");
        assert_eq!(index.serialize("tags"), "a,b");
        assert_eq!(index.serialize("missing"), "");
    }
}
