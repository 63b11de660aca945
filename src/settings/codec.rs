//! Flat settings file codec
//!
//! One setting per line: the first token is the name, the rest of the line
//! is the raw value. Comment lines are skipped. Saved files pad names to a
//! fixed column so values line up.

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::convert::split_first_token;
use super::store::SettingsStore;
use crate::error::CodecError;

/// Default width of the name column in saved files
pub const DEFAULT_COLUMN_WIDTH: usize = 25;

/// Comment marker
pub const COMMENT_MARKER: char = '#';

/// Which lines count as comments
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommentStyle {
    /// `#` as the first non-whitespace character
    #[default]
    LineStart,
    /// `#` anywhere on the line, including inside a value
    Anywhere,
}

impl CommentStyle {
    /// Check if `line` is a comment under this style
    pub fn is_comment(&self, line: &str) -> bool {
        match self {
            Self::LineStart => line.trim_start().starts_with(COMMENT_MARKER),
            Self::Anywhere => line.contains(COMMENT_MARKER),
        }
    }
}

/// Reads and writes the raw values of a [`SettingsStore`]
#[derive(Debug, Clone)]
pub struct FileCodec {
    /// Comment detection rule for loading
    pub comment_style: CommentStyle,
    /// Name column width for saving
    pub column_width: usize,
    /// Keep committed types of names overwritten by a load
    pub keep_cached_on_load: bool,
}

impl Default for FileCodec {
    fn default() -> Self {
        Self {
            comment_style: CommentStyle::default(),
            column_width: DEFAULT_COLUMN_WIDTH,
            keep_cached_on_load: false,
        }
    }
}

impl FileCodec {
    /// Create a codec with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the comment detection rule
    pub fn with_comment_style(mut self, style: CommentStyle) -> Self {
        self.comment_style = style;
        self
    }

    /// Set the name column width
    pub fn with_column_width(mut self, width: usize) -> Self {
        self.column_width = width;
        self
    }

    /// Keep committed types when a load overwrites raw values
    pub fn with_keep_cached_on_load(mut self, keep: bool) -> Self {
        self.keep_cached_on_load = keep;
        self
    }

    /// Parse one line into `(name, raw value)`, or `None` for comments and blank lines
    pub fn parse_line<'a>(&self, line: &'a str) -> Option<(&'a str, &'a str)> {
        if self.comment_style.is_comment(line) {
            return None;
        }
        split_first_token(line)
    }

    /// Load settings from `path` into `store`. Returns the number of entries read.
    ///
    /// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
    /// failing the load.
    pub fn load(&self, path: &Path, store: &mut SettingsStore) -> Result<usize, CodecError> {
        let bytes = fs::read(path).map_err(|source| CodecError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let count = self.read_from(&String::from_utf8_lossy(&bytes), store);
        debug!("Loaded {} settings from {:?}", count, path);
        Ok(count)
    }

    /// Load settings from in-memory text. Returns the number of entries read.
    pub fn read_from(&self, text: &str, store: &mut SettingsStore) -> usize {
        let mut count = 0;
        for line in text.lines() {
            let Some((name, value)) = self.parse_line(line) else {
                continue;
            };
            trace!("Read setting '{}' = {:?}", name, value);

            store.insert_raw(name, value);
            if !self.keep_cached_on_load {
                store.invalidate(name);
            }
            count += 1;
        }
        count
    }

    /// Save every setting of `store` to `path`. Returns the number of lines written.
    pub fn save(&self, path: &Path, store: &SettingsStore) -> Result<usize, CodecError> {
        let write_err = |source| CodecError::Write {
            path: path.to_path_buf(),
            source,
        };

        let file = fs::File::create(path).map_err(write_err)?;
        let mut writer = BufWriter::new(file);
        let count = self.write_to(&mut writer, store).map_err(write_err)?;
        writer.flush().map_err(write_err)?;

        debug!("Saved {} settings to {:?}", count, path);
        Ok(count)
    }

    /// Write every setting of `store` to `writer` in name order
    pub fn write_to<W: Write>(&self, writer: &mut W, store: &SettingsStore) -> io::Result<usize> {
        let mut count = 0;
        for (name, setting) in store.iter() {
            writer.write_all(self.format_line(name, &setting.raw).as_bytes())?;
            count += 1;
        }
        Ok(count)
    }

    /// Render `store` as file text
    pub fn to_text(&self, store: &SettingsStore) -> String {
        store
            .iter()
            .map(|(name, setting)| self.format_line(name, &setting.raw))
            .collect()
    }

    /// One saved line: padded name, a space, the value without leading spaces
    fn format_line(&self, name: &str, raw: &str) -> String {
        format!(
            "{:<width$} {}\n",
            name,
            raw.trim_start_matches(' '),
            width = self.column_width
        )
    }
}
