use std::path::PathBuf;
use std::sync::Once;

use crate::font::SymbolicTraits;
use crate::generic_backend::{GenericFontCollectionBackend, GenericFontDescriptionBackend};

// Font enumeration is only implemented with Core Text. Elsewhere the system collection is
// always empty.

static UNSUPPORTED_WARNING: Once = Once::new();

#[derive(Debug, Clone)]
pub struct FontCollectionBackend;

impl GenericFontCollectionBackend for FontCollectionBackend {
    type Description = FontDescriptionBackend;

    fn system() -> Self {
        Self
    }

    fn descriptions(&self) -> Vec<FontDescriptionBackend> {
        UNSUPPORTED_WARNING.call_once(|| {
            tracing::warn!(os = std::env::consts::OS, "font enumeration is not supported on this platform");
        });
        tracing::debug!("no fonts on this platform");
        Vec::new()
    }
}

#[derive(Debug, Clone)]
pub enum FontDescriptionBackend {}

impl GenericFontDescriptionBackend for FontDescriptionBackend {
    fn family_name(&self) -> Option<String> {
        match *self {}
    }

    fn localized_family_name(&self) -> Option<String> {
        match *self {}
    }

    fn style_name(&self) -> Option<String> {
        match *self {}
    }

    fn postscript_name(&self) -> Option<String> {
        match *self {}
    }

    fn path(&self) -> Option<PathBuf> {
        match *self {}
    }

    fn weight_trait(&self) -> Option<f32> {
        match *self {}
    }

    fn symbolic_traits(&self) -> Option<SymbolicTraits> {
        match *self {}
    }
}
