use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::targets;

/// Comments attached to a catalog entry, grouped by kind.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comments {
    pub translator: Vec<String>,
    pub extracted: Vec<String>,
    pub references: Vec<String>,
    /// Individual flags, already split on commas (`fuzzy`, `c-format`, ...).
    pub flags: Vec<String>,
    pub previous: Vec<String>,
}

/// One translation unit of a PO file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoEntry {
    pub context: Option<String>,
    pub id: String,
    pub plural_id: Option<String>,
    /// `msgstr` for singular entries, `msgstr[0..n]` in order for plural ones.
    pub translations: Vec<String>,
    pub comments: Comments,
    /// Char offsets of the entry's `msgid` keyword in the source.
    pub start: usize,
    pub end: usize,
}

impl PoEntry {
    pub fn is_fuzzy(&self) -> bool {
        self.comments.flags.iter().any(|f| f == "fuzzy")
    }

    pub fn is_plural(&self) -> bool {
        self.plural_id.is_some()
    }

    /// The gettext header is the entry with an empty `msgid` and no context.
    pub fn is_header(&self) -> bool {
        self.context.is_none() && self.id.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("compiled catalog encoding failed: {0}")]
    Encode(postcard::Error),

    #[error("compiled catalog decoding failed: {0}")]
    Decode(postcard::Error),
}

/// Parsed PO catalog, entries in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub entries: Vec<PoEntry>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PoEntry> {
        self.entries.iter()
    }

    pub fn get(&self, context: Option<&str>, id: &str) -> Option<&PoEntry> {
        self.entries
            .iter()
            .find(|e| e.context.as_deref() == context && e.id == id)
    }

    pub fn header(&self) -> Option<&PoEntry> {
        self.entries.iter().find(|e| e.is_header())
    }

    /// Looks up a `Name: value` line of the header entry, case-insensitively.
    pub fn header_field(&self, name: &str) -> Option<&str> {
        let header = self.header()?;
        let text = header.translations.first()?;
        text.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            if key.trim().eq_ignore_ascii_case(name) {
                Some(value.trim())
            } else {
                None
            }
        })
    }

    /// Encodes the catalog in its compiled binary form.
    pub fn to_bytes(&self) -> Result<Vec<u8>, CatalogError> {
        let bytes = postcard::to_allocvec(self).map_err(CatalogError::Encode)?;
        tracing::debug!(
            target: targets::CATALOG,
            entries = self.entries.len(),
            bytes = bytes.len(),
            "encoded catalog"
        );
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CatalogError> {
        let catalog: Catalog = postcard::from_bytes(bytes).map_err(CatalogError::Decode)?;
        tracing::debug!(
            target: targets::CATALOG,
            entries = catalog.entries.len(),
            "decoded catalog"
        );
        Ok(catalog)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a PoEntry;
    type IntoIter = std::slice::Iter<'a, PoEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(context: Option<&str>, id: &str, translation: &str) -> PoEntry {
        PoEntry {
            context: context.map(str::to_string),
            id: id.to_string(),
            plural_id: None,
            translations: vec![translation.to_string()],
            comments: Comments::default(),
            start: 0,
            end: 5,
        }
    }

    fn sample() -> Catalog {
        Catalog {
            entries: vec![
                entry(
                    None,
                    "",
                    "Content-Type: text/plain; charset=UTF-8\nPlural-Forms: nplurals=2; plural=(n != 1);\n",
                ),
                entry(None, "open", "ouvrir"),
                entry(Some("menu"), "open", "Ouvrir…"),
            ],
        }
    }

    #[test]
    fn test_get_distinguishes_context() {
        let catalog = sample();
        assert_eq!(catalog.get(None, "open").unwrap().translations[0], "ouvrir");
        assert_eq!(
            catalog.get(Some("menu"), "open").unwrap().translations[0],
            "Ouvrir…"
        );
        assert!(catalog.get(Some("toolbar"), "open").is_none());
    }

    #[test]
    fn test_header_field_lookup() {
        let catalog = sample();
        assert!(catalog.header().unwrap().is_header());
        assert_eq!(
            catalog.header_field("plural-forms"),
            Some("nplurals=2; plural=(n != 1);")
        );
        assert_eq!(catalog.header_field("Language"), None);
    }

    #[test]
    fn test_header_missing() {
        let catalog = Catalog {
            entries: vec![entry(None, "a", "b")],
        };
        assert!(catalog.header().is_none());
        assert!(catalog.header_field("Content-Type").is_none());
    }

    #[test]
    fn test_fuzzy_flag() {
        let mut e = entry(None, "a", "b");
        assert!(!e.is_fuzzy());
        e.comments.flags = vec!["c-format".to_string(), "fuzzy".to_string()];
        assert!(e.is_fuzzy());
    }

    #[test]
    fn test_compiled_catalog_survives_encoding() {
        let catalog = sample();
        let bytes = catalog.to_bytes().unwrap();
        assert_eq!(Catalog::from_bytes(&bytes).unwrap(), catalog);
    }

    #[test]
    fn test_truncated_bytes_fail_to_decode() {
        let bytes = sample().to_bytes().unwrap();
        let err = Catalog::from_bytes(&bytes[..bytes.len() / 2]).unwrap_err();
        assert!(matches!(err, CatalogError::Decode(_)));
    }
}
