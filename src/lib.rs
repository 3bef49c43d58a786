//! Lists the fonts installed on the system along with a flat record of their metadata.
//!
//! Fonts are read through Core Text on macOS. Other platforms report no fonts.

extern crate ahash;
extern crate bitflags;
extern crate rustybuzz;
extern crate serde;
extern crate serde_json;
extern crate thiserror;
extern crate tracing;
extern crate ttf_parser;

#[cfg(target_os = "macos")]
extern crate core_foundation;
#[cfg(target_os = "macos")]
extern crate core_text;

mod collection;
mod descriptor;
mod error;
mod font;
mod loaded_font;
mod query;

mod generic_backend;

#[cfg(target_os = "macos")]
#[path = "macos_backend/mod.rs"]
mod backend;
#[cfg(not(target_os = "macos"))]
#[path = "unsupported_backend/mod.rs"]
mod backend;

#[cfg(feature = "python")]
mod python;

use std::collections::HashMap;
use std::hash::BuildHasherDefault;

pub use collection::{get_all_local_fonts, FontCollection};
pub use descriptor::{to_json, FontDescriptorRecord};
pub use error::{Error, Result};
pub use generic_backend::{GenericFontCollectionBackend, GenericFontDescriptionBackend};
pub use loaded_font::{FontCache, FontMetrics, LoadedFont};
pub use font::{classify_weight, FontWeight, OpenTypeFontWeight, SymbolicTraits};
pub use query::{find_local_fonts, group_by_family, resolve_font_path, FontFamily, FontQuery};

pub(crate) type AHashMap<K, V> = HashMap<K, V, BuildHasherDefault<ahash::AHasher>>;
