extern crate fontfinder;

use fontfinder::{FontCollection, FontQuery, OpenTypeFontWeight};

const BUCKETS: [u32; 10] = [0, 100, 200, 300, 400, 500, 600, 700, 800, 900];

#[test]
fn test_local_font_records() {
    for record in fontfinder::get_all_local_fonts() {
        assert!(BUCKETS.contains(&record.weight.0), "{:?}", record);
        let value = serde_json::to_value(&record).unwrap();
        for key in ["font-family", "font-style", "src", "postscriptName"] {
            assert!(value[key].is_string(), "{} in {}", key, value);
        }
        assert!(value["font-weight"].is_u64());
        for key in ["italic", "bold", "monoSpace"] {
            assert!(value[key].is_boolean(), "{} in {}", key, value);
        }
        if let Some(localized) = value.get("localized") {
            assert!(localized.is_string());
        }
    }
}

#[test]
fn test_find_local_fonts_by_family() {
    let all = FontCollection::system().records();
    let first = match all.first() {
        Some(first) if !first.family.is_empty() => first.clone(),
        _ => return,
    };
    let found = fontfinder::find_local_fonts(&FontQuery::new().family(first.family.clone()));
    assert!(found.iter().all(|record| record.family == first.family));
    assert!(found.contains(&first));

    let everything = fontfinder::find_local_fonts(&FontQuery::new().weight(OpenTypeFontWeight::UNKNOWN));
    assert_eq!(everything.len(), all.len());
}

#[cfg(not(target_os = "macos"))]
#[test]
fn test_unsupported_platform_is_empty() {
    assert!(fontfinder::get_all_local_fonts().is_empty());
    assert_eq!(fontfinder::resolve_font_path(&FontQuery::new()), None);
}
