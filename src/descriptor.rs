use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::font::{classify_weight, OpenTypeFontWeight};
use crate::generic_backend::GenericFontDescriptionBackend;

/// The metadata of one installed font face.
///
/// Serializes with the same keys as the object handed to scripting code: `font-family`,
/// `font-style`, `font-weight`, `src`, `postscriptName`, `italic`, `bold`, `monoSpace` and, when
/// present, `localized`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontDescriptorRecord {
    /// The family name, localized for the user's language when the system has a variant for it.
    #[serde(rename = "font-family")]
    pub family: String,
    #[serde(rename = "font-style")]
    pub style: String,
    #[serde(rename = "font-weight")]
    pub weight: OpenTypeFontWeight,
    /// Path of the font file.
    pub src: String,
    #[serde(rename = "postscriptName")]
    pub postscript_name: String,
    pub italic: bool,
    pub bold: bool,
    #[serde(rename = "monoSpace")]
    pub monospace: bool,
    /// The family name localized for the user's language. Only set when the system has a
    /// locale specific variant of the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub localized: Option<String>,
}

fn or_empty(value: Option<String>, attribute: &'static str) -> String {
    value.unwrap_or_else(|| {
        tracing::trace!(attribute, "font attribute missing");
        String::new()
    })
}

impl FontDescriptorRecord {
    pub(crate) fn from_description<B: GenericFontDescriptionBackend>(desc: &B) -> Self {
        let traits = desc.symbolic_traits().unwrap_or_default();
        let localized = desc.localized_family_name();
        // The localized name wins over the raw attribute when the system has one.
        let family = localized.clone().or_else(|| desc.family_name());
        let src = desc.path()
            .map(|path| path.to_string_lossy().into_owned());
        Self {
            family: or_empty(family, "family name"),
            style: or_empty(desc.style_name(), "style name"),
            weight: classify_weight(desc.weight_trait()),
            src: or_empty(src, "url"),
            postscript_name: or_empty(desc.postscript_name(), "postscript name"),
            italic: traits.is_italic(),
            bold: traits.is_bold(),
            monospace: traits.is_monospaced(),
            localized,
        }
    }
}

/// Serializes records as a JSON array of objects.
pub fn to_json(records: &[FontDescriptorRecord]) -> Result<String> {
    Ok(serde_json::to_string(records)?)
}
