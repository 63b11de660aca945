//! Typed settings store
//!
//! Provides:
//! - `SettingsStore` - raw text per setting with lazily committed typed views
//! - `FileCodec` - flat line-oriented file load/save
//! - `convert` - pure tokenizing, parsing and canonical formatting

mod codec;
pub mod convert;
mod store;
mod types;

pub use codec::*;
pub use convert::VectorFormat;
pub use store::*;
pub use types::*;
