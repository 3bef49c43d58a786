use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use crate::collection::get_all_local_fonts;
use crate::descriptor::FontDescriptorRecord;
use crate::error::{Error, Result};
use crate::query::FontQuery;
use crate::AHashMap;

/// Vertical metrics of a face, in font units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub units_per_em: u16,
    pub ascent: i16,
    pub descent: i16,
    pub line_gap: i16,
}

impl FontMetrics {
    pub fn from_face(face: &ttf_parser::Face<'_>) -> Self {
        Self {
            units_per_em: face.units_per_em(),
            ascent: face.ascender(),
            descent: face.descender(),
            line_gap: face.line_gap(),
        }
    }

    /// The height of a line of text at `font_size`, rounded down to a whole number.
    ///
    /// The line gap is only added when the ascent and descent fit in the em box.
    pub fn text_height(&self, font_size: f32) -> f32 {
        let units_per_em = i32::from(self.units_per_em.max(1));
        let font_height = i32::from(self.ascent) - i32::from(self.descent);
        let line_height = if font_height > units_per_em {
            font_height
        } else {
            font_height + i32::from(self.line_gap)
        };
        (f64::from(line_height) / f64::from(units_per_em) * f64::from(font_size)).floor() as f32
    }

    /// Scales a width in font units to `font_size`, rounded up to a whole number.
    pub fn scale_advance(&self, advance: i64, font_size: f32) -> f32 {
        let units_per_em = f64::from(self.units_per_em.max(1));
        (advance as f64 / units_per_em * f64::from(font_size)).ceil() as f32
    }
}

// Returns None for a file holding a single font, which always uses face 0.
fn find_face_index(data: &[u8], postscript_name: &str) -> Option<u32> {
    let count = ttf_parser::fonts_in_collection(data)?;
    (0..count).find(|&index| {
        let face = match ttf_parser::Face::parse(data, index) {
            Ok(face) => face,
            Err(_) => return false,
        };
        let name = face.names().into_iter()
            .filter(|name| name.name_id == ttf_parser::name_id::POST_SCRIPT_NAME)
            .find_map(|name| name.to_string());
        name.as_deref() == Some(postscript_name)
    })
}

/// A font file read into memory.
#[derive(Debug)]
pub struct LoadedFont {
    path: PathBuf,
    data: Vec<u8>,
    face_index: u32,
    metrics: FontMetrics,
}

impl LoadedFont {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_face(path.as_ref(), None)
    }

    /// Opens the file a record came from. In a font collection, the face with the record's
    /// PostScript name is used.
    pub fn open_record(record: &FontDescriptorRecord) -> Result<Self> {
        Self::open_face(Path::new(&record.src), Some(&record.postscript_name))
    }

    fn open_face(path: &Path, postscript_name: Option<&str>) -> Result<Self> {
        let data = fs::read(path)?;
        Self::from_data(path.to_owned(), data, postscript_name)
    }

    pub fn from_data(path: PathBuf, data: Vec<u8>, postscript_name: Option<&str>) -> Result<Self> {
        let face_index = postscript_name
            .and_then(|name| find_face_index(&data, name))
            .unwrap_or(0);
        let metrics = FontMetrics::from_face(&ttf_parser::Face::parse(&data, face_index)?);
        tracing::debug!(path = %path.display(), face_index, "font loaded");
        Ok(Self { path, data, face_index, metrics })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn face_index(&self) -> u32 {
        self.face_index
    }

    pub fn metrics(&self) -> FontMetrics {
        self.metrics
    }

    pub fn text_height(&self, font_size: f32) -> f32 {
        self.metrics.text_height(font_size)
    }

    /// The advance width of `text` after shaping, so kerning and ligatures are accounted for.
    pub fn text_width(&self, font_size: f32, text: &str) -> Result<f32> {
        let face = rustybuzz::Face::from_slice(&self.data, self.face_index)
            .ok_or_else(|| Error::Shaping(self.path.clone()))?;
        let mut buffer = rustybuzz::UnicodeBuffer::new();
        buffer.push_str(text);
        let glyphs = rustybuzz::shape(&face, &[], buffer);
        let advance: i64 = glyphs.glyph_positions().iter()
            .map(|pos| i64::from(pos.x_advance))
            .sum();
        Ok(self.metrics.scale_advance(advance, font_size))
    }
}

/// Keeps opened fonts so each file is only read once.
#[derive(Debug, Default)]
pub struct FontCache {
    fonts: RwLock<AHashMap<(PathBuf, Option<String>), Arc<LoadedFont>>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<Arc<LoadedFont>> {
        self.get_or_open(path.as_ref(), None)
    }

    pub fn open_record(&self, record: &FontDescriptorRecord) -> Result<Arc<LoadedFont>> {
        self.get_or_open(Path::new(&record.src), Some(&record.postscript_name))
    }

    /// Opens the first installed font matching `query`, or returns `None` if nothing matches.
    pub fn open_matching(&self, query: &FontQuery) -> Result<Option<Arc<LoadedFont>>> {
        let records = get_all_local_fonts();
        match query.first_match(&records) {
            Some(record) => self.open_record(record).map(Some),
            None => Ok(None),
        }
    }

    pub fn len(&self) -> usize {
        self.fonts.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_or_open(&self, path: &Path, postscript_name: Option<&str>) -> Result<Arc<LoadedFont>> {
        let key = (path.to_owned(), postscript_name.map(str::to_owned));
        let cached = self.fonts.read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        if let Some(font) = cached {
            return Ok(font);
        }
        let font = Arc::new(LoadedFont::open_face(path, postscript_name)?);
        let mut fonts = self.fonts.write().unwrap_or_else(PoisonError::into_inner);
        Ok(fonts.entry(key).or_insert(font).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metrics(units_per_em: u16, ascent: i16, descent: i16, line_gap: i16) -> FontMetrics {
        FontMetrics { units_per_em, ascent, descent, line_gap }
    }

    #[test]
    fn test_text_height_adds_line_gap() {
        // 800 + 200 fits in the em box, so the gap counts: 1090 / 1000 * 16 = 17.44
        assert_eq!(metrics(1000, 800, -200, 90).text_height(16.0), 17.0);
        assert_eq!(metrics(2048, 1638, -410, 0).text_height(12.0), 12.0);
    }

    #[test]
    fn test_text_height_skips_line_gap_for_tall_fonts() {
        // 1200 units is taller than the em box: 1200 / 1000 * 10 = 12
        assert_eq!(metrics(1000, 900, -300, 500).text_height(10.0), 12.0);
    }

    #[test]
    fn test_scale_advance_rounds_up() {
        let m = metrics(1000, 800, -200, 0);
        assert_eq!(m.scale_advance(1500, 12.0), 18.0);
        assert_eq!(m.scale_advance(1510, 12.0), 19.0);
        assert_eq!(m.scale_advance(0, 12.0), 0.0);
    }

    #[test]
    fn test_from_data_rejects_garbage() {
        let result = LoadedFont::from_data(PathBuf::from("garbage.ttf"), b"not a font".to_vec(), None);
        assert!(matches!(result, Err(Error::FaceParsing(_))));
    }

    #[test]
    fn test_open_missing_file() {
        let cache = FontCache::new();
        let result = cache.open("/nonexistent/fontfinder/missing.ttf");
        assert!(matches!(result, Err(Error::Io(_))));
        assert!(cache.is_empty());
    }

    #[test]
    fn test_open_record_without_src() {
        let record = FontDescriptorRecord {
            family: "Ghost".to_owned(),
            style: "Regular".to_owned(),
            weight: Default::default(),
            src: String::new(),
            postscript_name: "Ghost-Regular".to_owned(),
            italic: false,
            bold: false,
            monospace: false,
            localized: None,
        };
        assert!(LoadedFont::open_record(&record).is_err());
    }

    #[test]
    fn test_single_font_has_no_collection_index() {
        assert_eq!(find_face_index(b"not a collection", "Anything"), None);
    }
}
