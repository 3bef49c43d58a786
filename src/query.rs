use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::collection::get_all_local_fonts;
use crate::descriptor::FontDescriptorRecord;
use crate::font::OpenTypeFontWeight;
use crate::AHashMap;

/// Selects fonts by family, style, and weight.
///
/// A field that is `None`, an empty string, or a weight of 0 matches every font.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontQuery {
    #[serde(rename = "font-family", default, skip_serializing_if = "Option::is_none")]
    pub family: Option<String>,
    #[serde(rename = "font-style", default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    #[serde(rename = "font-weight", default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<OpenTypeFontWeight>,
}

impl FontQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn family<S: Into<String>>(mut self, family: S) -> Self {
        self.family = Some(family.into());
        self
    }

    pub fn style<S: Into<String>>(mut self, style: S) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn weight<W: Into<OpenTypeFontWeight>>(mut self, weight: W) -> Self {
        self.weight = Some(weight.into());
        self
    }

    pub fn matches(&self, record: &FontDescriptorRecord) -> bool {
        fn str_matches(wanted: &Option<String>, actual: &str) -> bool {
            match wanted.as_deref() {
                None | Some("") => true,
                Some(wanted) => wanted == actual,
            }
        }
        let weight_matches = match self.weight {
            None => true,
            Some(weight) => weight.is_unknown() || weight == record.weight,
        };
        str_matches(&self.family, &record.family)
            && str_matches(&self.style, &record.style)
            && weight_matches
    }

    pub fn filter<'q, 'r: 'q>(&'q self, records: &'r [FontDescriptorRecord])
        -> impl Iterator<Item = &'r FontDescriptorRecord> + 'q
    {
        records.iter().filter(move |record| self.matches(record))
    }

    pub fn first_match<'a>(&self, records: &'a [FontDescriptorRecord])
        -> Option<&'a FontDescriptorRecord>
    {
        records.iter().find(|record| self.matches(record))
    }
}

/// Lists the installed fonts that match `query`, in the order the platform lists them.
pub fn find_local_fonts(query: &FontQuery) -> Vec<FontDescriptorRecord> {
    let mut records = get_all_local_fonts();
    records.retain(|record| query.matches(record));
    records
}

/// Returns the file of the first installed font that matches `query`.
pub fn resolve_font_path(query: &FontQuery) -> Option<PathBuf> {
    let records = get_all_local_fonts();
    query.first_match(&records)
        .filter(|record| !record.src.is_empty())
        .map(|record| PathBuf::from(&record.src))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontFamily {
    pub name: String,
    pub faces: Vec<FontDescriptorRecord>,
}

/// Groups records by family name. Families are in the order they first appear and faces keep
/// their relative order.
pub fn group_by_family<I>(records: I) -> Vec<FontFamily>
where
    I: IntoIterator<Item = FontDescriptorRecord>,
{
    let mut indexes: AHashMap<String, usize> = AHashMap::default();
    let mut families: Vec<FontFamily> = Vec::new();
    for record in records {
        let index = *indexes.entry(record.family.clone()).or_insert_with(|| {
            families.push(FontFamily { name: record.family.clone(), faces: Vec::new() });
            families.len() - 1
        });
        families[index].faces.push(record);
    }
    families
}
