
use std::fmt::Debug;
use std::path::PathBuf;

use crate::font::SymbolicTraits;

pub trait GenericFontCollectionBackend: Debug + Clone {
    type Description: GenericFontDescriptionBackend;

    fn system() -> Self;

    /// Returns the descriptions in the order the platform lists them.
    fn descriptions(&self) -> Vec<Self::Description>;
}

// Every getter returns None when the platform doesn't have the attribute. Converting that into
// a default is left to the caller.
pub trait GenericFontDescriptionBackend: Debug + Clone {
    fn family_name(&self) -> Option<String>;

    /// Only returns a name if the platform resolved a variant of the family name for a specific
    /// locale.
    fn localized_family_name(&self) -> Option<String>;

    fn style_name(&self) -> Option<String>;

    fn postscript_name(&self) -> Option<String>;

    fn path(&self) -> Option<PathBuf>;

    /// The normalized weight, from -1.0 to 1.0.
    fn weight_trait(&self) -> Option<f32>;

    fn symbolic_traits(&self) -> Option<SymbolicTraits>;
}
