use crate::backend::font_backend::FontCollectionBackend;
use crate::descriptor::FontDescriptorRecord;
use crate::generic_backend::GenericFontCollectionBackend;

// Names for this object:
// DirectWrite: FontCollection
// Core Text: FontCollection
// Skia: SkFontMgr

/// The set of fonts available on the system.
///
/// Nothing is cached. Each call to `records()` asks the platform again.
#[derive(Debug, Clone)]
pub struct FontCollection<B: GenericFontCollectionBackend = FontCollectionBackend> {
    backend: B,
}

impl FontCollection {
    pub fn system() -> Self {
        Self::from_backend(FontCollectionBackend::system())
    }
}

impl<B: GenericFontCollectionBackend> FontCollection<B> {
    /// Wraps a backend other than the system one, for example a fixed list of fonts.
    pub fn from_backend(backend: B) -> Self {
        Self { backend }
    }

    /// Returns a record for every font in the collection, in the order the platform lists them.
    pub fn records(&self) -> Vec<FontDescriptorRecord> {
        let descriptions = self.backend.descriptions();
        tracing::debug!(count = descriptions.len(), "enumerated font descriptors");
        descriptions.iter()
            .map(FontDescriptorRecord::from_description)
            .collect()
    }
}

/// Lists every font installed on the system.
///
/// Returns an empty list when the platform reports no fonts or can't enumerate them.
pub fn get_all_local_fonts() -> Vec<FontDescriptorRecord> {
    FontCollection::system().records()
}
