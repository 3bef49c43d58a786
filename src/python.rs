//! Python bindings using PyO3.
//!
//! Builds the `fontfinder` extension module. Fonts are returned as plain dicts built from the
//! serialized form of `FontDescriptorRecord`, so they have the same keys as its JSON.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::PyDict;
use serde_json::Value;

use crate::descriptor::FontDescriptorRecord;
use crate::error::Error;
use crate::font::OpenTypeFontWeight;
use crate::query::FontQuery;

impl From<Error> for PyErr {
    fn from(err: Error) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

fn record_to_dict<'py>(py: Python<'py>, record: &FontDescriptorRecord) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    let fields = match serde_json::to_value(record).map_err(Error::from)? {
        Value::Object(fields) => fields,
        other => return Err(PyValueError::new_err(format!("font record serialized as {}", other))),
    };
    for (key, value) in fields {
        match value {
            Value::String(s) => dict.set_item(key, s)?,
            Value::Bool(b) => dict.set_item(key, b)?,
            Value::Number(n) => match n.as_u64() {
                Some(n) => dict.set_item(key, n)?,
                None => dict.set_item(key, n.as_f64())?,
            },
            Value::Null => dict.set_item(key, py.None())?,
            other => return Err(PyValueError::new_err(format!("unexpected value for {}: {}", key, other))),
        }
    }
    Ok(dict)
}

// A missing key or None matches every font. A weight that isn't a bucket matches none.
fn query_from_dict(query: &Bound<'_, PyDict>) -> PyResult<FontQuery> {
    fn field<'py, T: FromPyObject<'py>>(query: &Bound<'py, PyDict>, key: &str) -> PyResult<Option<T>> {
        match query.get_item(key)? {
            Some(value) if !value.is_none() => value.extract().map(Some),
            _ => Ok(None),
        }
    }
    Ok(FontQuery {
        family: field(query, "font-family")?,
        style: field(query, "font-style")?,
        weight: field::<u32>(query, "font-weight")?.map(OpenTypeFontWeight),
    })
}

/// Lists every installed font.
#[pyfunction]
#[pyo3(name = "getAllLocalFonts")]
fn get_all_local_fonts(py: Python<'_>) -> PyResult<Vec<Bound<'_, PyDict>>> {
    crate::get_all_local_fonts()
        .iter()
        .map(|record| record_to_dict(py, record))
        .collect()
}

/// Lists the installed fonts matching a dict with optional `font-family`, `font-style`, and
/// `font-weight` keys.
#[pyfunction]
#[pyo3(name = "findLocalFonts", signature = (query=None))]
fn find_local_fonts<'py>(
    py: Python<'py>,
    query: Option<&Bound<'py, PyDict>>,
) -> PyResult<Vec<Bound<'py, PyDict>>> {
    let query = match query {
        Some(query) => query_from_dict(query)?,
        None => FontQuery::default(),
    };
    crate::find_local_fonts(&query)
        .iter()
        .map(|record| record_to_dict(py, record))
        .collect()
}

#[pymodule]
fn fontfinder(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    m.add_function(wrap_pyfunction!(get_all_local_fonts, m)?)?;
    m.add_function(wrap_pyfunction!(find_local_fonts, m)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pyo3::types::{PyBool, PyInt, PyList, PyString};

    use super::*;

    fn record(localized: Option<&str>) -> FontDescriptorRecord {
        FontDescriptorRecord {
            family: "Menlo".to_owned(),
            style: "Bold".to_owned(),
            weight: OpenTypeFontWeight(700),
            src: "/System/Library/Fonts/Menlo.ttc".to_owned(),
            postscript_name: "Menlo-Bold".to_owned(),
            italic: false,
            bold: true,
            monospace: true,
            localized: localized.map(str::to_owned),
        }
    }

    fn with_gil<F: for<'py> FnOnce(Python<'py>)>(f: F) {
        pyo3::prepare_freethreaded_python();
        Python::with_gil(f)
    }

    #[test]
    fn test_record_dict_keys_and_types() {
        with_gil(|py| {
            let dict = record_to_dict(py, &record(None)).unwrap();
            assert_eq!(dict.len(), 8);
            for key in ["font-family", "font-style", "src", "postscriptName"] {
                let value = dict.get_item(key).unwrap().unwrap();
                assert!(value.is_instance_of::<PyString>(), "{}", key);
            }
            for key in ["italic", "bold", "monoSpace"] {
                let value = dict.get_item(key).unwrap().unwrap();
                assert!(value.is_instance_of::<PyBool>(), "{}", key);
            }
            let weight = dict.get_item("font-weight").unwrap().unwrap();
            assert!(weight.is_instance_of::<PyInt>());
            assert_eq!(weight.extract::<u32>().unwrap(), 700);
            assert!(dict.get_item("localized").unwrap().is_none());
            assert_eq!(dict.get_item("postscriptName").unwrap().unwrap().extract::<String>().unwrap(),
                "Menlo-Bold");
        });
    }

    #[test]
    fn test_record_dict_localized() {
        with_gil(|py| {
            let dict = record_to_dict(py, &record(Some("メンロ"))).unwrap();
            assert_eq!(dict.len(), 9);
            let localized = dict.get_item("localized").unwrap().unwrap();
            assert_eq!(localized.extract::<String>().unwrap(), "メンロ");
        });
    }

    #[test]
    fn test_query_wildcards() {
        with_gil(|py| {
            let query = PyDict::new_bound(py);
            assert_eq!(query_from_dict(&query).unwrap(), FontQuery::default());

            query.set_item("font-family", py.None()).unwrap();
            query.set_item("font-style", py.None()).unwrap();
            query.set_item("font-weight", py.None()).unwrap();
            assert_eq!(query_from_dict(&query).unwrap(), FontQuery::default());

            query.set_item("font-family", "Menlo").unwrap();
            query.set_item("font-weight", 700).unwrap();
            let parsed = query_from_dict(&query).unwrap();
            assert_eq!(parsed, FontQuery::new().family("Menlo").weight(OpenTypeFontWeight(700)));
            assert!(parsed.matches(&record(None)));
        });
    }

    #[test]
    fn test_query_unknown_weight_matches_nothing() {
        with_gil(|py| {
            let query = PyDict::new_bound(py);
            query.set_item("font-weight", 450).unwrap();
            let parsed = query_from_dict(&query).unwrap();
            assert!(!parsed.matches(&record(None)));
        });
    }

    #[test]
    fn test_module_functions() {
        with_gil(|py| {
            let all = wrap_pyfunction!(get_all_local_fonts, py).unwrap().call0().unwrap();
            let all = all.downcast::<PyList>().unwrap();
            assert_eq!(all.len(), crate::get_all_local_fonts().len());

            let found = wrap_pyfunction!(find_local_fonts, py).unwrap().call0().unwrap();
            assert_eq!(found.downcast::<PyList>().unwrap().len(), all.len());
        });
    }
}
