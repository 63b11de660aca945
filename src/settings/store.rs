//! Typed settings store
//!
//! Holds one entry per setting name: the raw text plus the committed typed
//! value, if any. Typed reads convert the raw text once and cache the result;
//! the first typed read (or any setter) commits the setting's type.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, warn};

use super::codec::FileCodec;
use super::convert::{VectorFormat, survives_round_trip};
use super::types::{SettingType, SettingValue, TypedValue};
use crate::error::{CodecError, SettingsError};

/// One named setting
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Setting {
    /// Raw textual value
    pub raw: String,
    /// Committed typed view of `raw`, if any
    pub typed: Option<TypedValue>,
}

impl Setting {
    /// The committed type tag
    pub fn setting_type(&self) -> Option<SettingType> {
        self.typed.as_ref().map(TypedValue::setting_type)
    }
}

/// Settings store with lazily converted, cached typed views.
///
/// Getters take `&mut self`: a first read converts and caches.
#[derive(Debug, Clone, Default)]
pub struct SettingsStore {
    settings: BTreeMap<String, Setting>,
    vector_format: VectorFormat,
}

impl SettingsStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Set how vector setters join elements into raw text
    pub fn with_vector_format(mut self, format: VectorFormat) -> Self {
        self.vector_format = format;
        self
    }

    pub fn vector_format(&self) -> VectorFormat {
        self.vector_format
    }

    /// Read the typed value of `name`, converting and committing on first access.
    ///
    /// Returns `SettingsError::TypeMismatch` if the setting is already
    /// committed to a different type. An absent name reads as empty text.
    pub fn try_get<T: SettingValue>(&mut self, name: &str) -> Result<&T, SettingsError> {
        let setting = self.settings.entry(name.to_string()).or_default();

        if setting.typed.is_none() {
            debug!("Converting setting '{}' to {}", name, T::TYPE);
            setting.typed = Some(TypedValue::parse(T::TYPE, &setting.raw));
        }

        let committed = setting.setting_type().unwrap_or(T::TYPE);
        setting
            .typed
            .as_ref()
            .and_then(T::from_typed)
            .ok_or_else(|| SettingsError::TypeMismatch {
                name: name.to_string(),
                committed,
                requested: T::TYPE,
            })
    }

    /// Read the typed value of `name`, or the zero value of `T` on a type mismatch
    pub fn get<T: SettingValue>(&mut self, name: &str) -> T {
        match self.try_get::<T>(name) {
            Ok(value) => value.clone(),
            Err(e) => {
                warn!("{}", e);
                T::default()
            }
        }
    }

    /// Store `value` under `name`, replacing its raw text and committed type.
    ///
    /// Settings files hold one `name value` pair per line, so a name with
    /// whitespace, `,`, `(` or `)`, or a value with a line break or leading
    /// whitespace, is saved in a form that loads back differently. Such
    /// settings are still stored, and a warning is logged.
    pub fn set<T: SettingValue>(&mut self, name: &str, value: T) {
        let typed = value.into_typed();
        let raw = typed.to_raw(self.vector_format);
        debug!("Setting '{}' = {:?} as {}", name, raw, T::TYPE);
        if !survives_round_trip(name, &raw) {
            warn!("Setting '{}' = {:?} will not load back unchanged from a saved file", name, raw);
        }
        self.settings.insert(
            name.to_string(),
            Setting {
                raw,
                typed: Some(typed),
            },
        );
    }

    pub fn get_int(&mut self, name: &str) -> i64 {
        self.get(name)
    }

    pub fn get_float(&mut self, name: &str) -> f64 {
        self.get(name)
    }

    pub fn get_string(&mut self, name: &str) -> String {
        self.get(name)
    }

    pub fn get_int_vec(&mut self, name: &str) -> Vec<i64> {
        self.get(name)
    }

    pub fn get_float_vec(&mut self, name: &str) -> Vec<f64> {
        self.get(name)
    }

    pub fn get_string_vec(&mut self, name: &str) -> Vec<String> {
        self.get(name)
    }

    pub fn set_int(&mut self, name: &str, value: i64) {
        self.set(name, value);
    }

    pub fn set_float(&mut self, name: &str, value: f64) {
        self.set(name, value);
    }

    /// See [`Self::set`] for values that do not survive a save and load
    pub fn set_string(&mut self, name: &str, value: impl Into<String>) {
        self.set(name, value.into());
    }

    pub fn set_int_vec(&mut self, name: &str, values: Vec<i64>) {
        self.set(name, values);
    }

    pub fn set_float_vec(&mut self, name: &str, values: Vec<f64>) {
        self.set(name, values);
    }

    pub fn set_string_vec(&mut self, name: &str, values: Vec<String>) {
        self.set(name, values);
    }

    /// Replace the raw text of `name` without touching its committed type.
    ///
    /// A cached typed value stays as it was; use [`Self::invalidate`] to
    /// force reconversion.
    pub fn insert_raw(&mut self, name: impl Into<String>, raw: impl Into<String>) {
        let raw = raw.into();
        self.settings.entry(name.into()).or_default().raw = raw;
    }

    /// Drop the committed type of `name` so the next read converts afresh.
    /// Returns whether a typed value was cached.
    pub fn invalidate(&mut self, name: &str) -> bool {
        self.settings
            .get_mut(name)
            .and_then(|s| s.typed.take())
            .is_some()
    }

    /// Drop every committed type
    pub fn invalidate_all(&mut self) {
        for setting in self.settings.values_mut() {
            setting.typed = None;
        }
    }

    /// Raw text of `name`
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.settings.get(name).map(|s| s.raw.as_str())
    }

    /// Committed type of `name`
    pub fn type_of(&self, name: &str) -> Option<SettingType> {
        self.settings.get(name).and_then(Setting::setting_type)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.settings.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Iterate settings in name order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Setting)> {
        self.settings.iter().map(|(name, s)| (name.as_str(), s))
    }

    /// Load a settings file with the default codec
    pub fn load(&mut self, path: &Path) -> Result<usize, CodecError> {
        FileCodec::default().load(path, self)
    }

    /// Save to a settings file with the default codec
    pub fn save(&self, path: &Path) -> Result<usize, CodecError> {
        FileCodec::default().save(path, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(entries: &[(&str, &str)]) -> SettingsStore {
        let mut store = SettingsStore::new();
        for (name, raw) in entries {
            store.insert_raw(*name, *raw);
        }
        store
    }

    #[test]
    fn test_first_read_commits_type() {
        let mut store = store_with(&[("width", "640")]);
        assert_eq!(store.type_of("width"), None);

        assert_eq!(store.get_int("width"), 640);
        assert_eq!(store.type_of("width"), Some(SettingType::Int));
    }

    #[test]
    fn test_mismatch_returns_zero_value() {
        let mut store = store_with(&[("width", "640")]);
        assert_eq!(store.get_int("width"), 640);

        assert_eq!(store.get_float("width"), 0.0);
        assert_eq!(store.get_string("width"), "");
        assert!(store.get_int_vec("width").is_empty());
        assert!(store.get_float_vec("width").is_empty());
        assert!(store.get_string_vec("width").is_empty());

        // Committed value is unaffected
        assert_eq!(store.get_int("width"), 640);
        assert_eq!(store.type_of("width"), Some(SettingType::Int));
    }

    #[test]
    fn test_try_get_reports_mismatch() {
        let mut store = store_with(&[("pos", "1 2 3")]);
        assert_eq!(store.try_get::<Vec<i64>>("pos"), Ok(&vec![1, 2, 3]));

        let err = store.try_get::<f64>("pos").unwrap_err();
        assert_eq!(
            err,
            SettingsError::TypeMismatch {
                name: "pos".to_string(),
                committed: SettingType::IntVec,
                requested: SettingType::Float,
            }
        );
    }

    #[test]
    fn test_cached_value_ignores_raw_changes() {
        let mut store = store_with(&[("scale", "2.5")]);
        assert_eq!(store.get_float("scale"), 2.5);

        store.insert_raw("scale", "9.0");
        assert_eq!(store.get_float("scale"), 2.5);
        assert_eq!(store.raw("scale"), Some("9.0"));

        assert!(store.invalidate("scale"));
        assert_eq!(store.get_float("scale"), 9.0);
    }

    #[test]
    fn test_setter_overwrites_type() {
        let mut store = store_with(&[("mode", "fast")]);
        assert_eq!(store.get_string("mode"), "fast");

        store.set_int("mode", 3);
        assert_eq!(store.type_of("mode"), Some(SettingType::Int));
        assert_eq!(store.get_int("mode"), 3);
        assert_eq!(store.raw("mode"), Some("3"));
        assert_eq!(store.get_string("mode"), "");
    }

    #[test]
    fn test_setter_canonical_text() {
        let mut store = SettingsStore::new();
        store.set_float("gain", 1.5);
        store.set_int_vec("ids", vec![4, 5, 6]);
        store.set_float_vec("pos", vec![1.0, 2.0]);
        store.set_string_vec("tags", vec!["a".to_string(), "b".to_string()]);
        store.set_string("title", "  hello");

        assert_eq!(store.raw("gain"), Some("1.500000"));
        assert_eq!(store.raw("ids"), Some("4 5 6"));
        assert_eq!(store.raw("pos"), Some("1.000000 2.000000"));
        assert_eq!(store.raw("tags"), Some("a b"));
        assert_eq!(store.raw("title"), Some("  hello"));
        assert_eq!(store.get_int_vec("ids"), vec![4, 5, 6]);
    }

    #[test]
    fn test_concatenated_vector_format() {
        let mut store = SettingsStore::new().with_vector_format(VectorFormat::Concatenated);
        store.set_float_vec("pos", vec![1.0, 2.0]);
        assert_eq!(store.raw("pos"), Some("1.0000002.000000"));
        assert_eq!(store.get_float_vec("pos"), vec![1.0, 2.0]);
    }

    #[test]
    fn test_missing_name_reads_as_empty() {
        let mut store = SettingsStore::new();
        assert_eq!(store.get_int("missing"), 0);
        assert_eq!(store.type_of("missing"), Some(SettingType::Int));
        assert_eq!(store.raw("missing"), Some(""));

        assert!(store.get_string_vec("also_missing").is_empty());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_iter_is_name_ordered() {
        let store = store_with(&[("b", "2"), ("c", "3"), ("a", "1")]);
        let names: Vec<_> = store.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_invalidate_all() {
        let mut store = store_with(&[("a", "1"), ("b", "x")]);
        store.get_int("a");
        store.get_string("b");
        store.invalidate_all();
        assert_eq!(store.type_of("a"), None);
        assert_eq!(store.type_of("b"), None);
        assert!(!store.invalidate("a"));
    }
}
