//! Localization bundles.
//!
//! Resource documents are `.resx` files: a flat list of
//! `<data name="Key"><value>Text</value></data>` entries. Only those entries
//! are read; headers, schemas and comments are skipped.

use quick_xml::{
    Reader,
    errors::IllFormedError,
    events::{BytesStart, Event},
};
use std::collections::BTreeMap;

/// Resource key -> localized string.
pub type ResourceMap = BTreeMap<String, String>;

/// Resource key holding an entity's own display name.
pub const DISPLAY_NAME_KEY: &str = "DisplayName";

const BOM: char = '\u{feff}';

/// Parse a resource document into a key map.
///
/// Absent or malformed input yields an empty map; records without localized
/// names are normal, so this never fails the caller.
#[must_use]
pub fn parse_resources(document: Option<&str>) -> ResourceMap {
    let Some(document) = document else {
        return ResourceMap::new();
    };
    let document = document.strip_prefix(BOM).unwrap_or(document);

    match read_entries(document) {
        Ok(map) => map,
        Err(e) => {
            tracing::debug!(target: "mtdgraph::l10n", error = %e, "malformed resource document, ignoring");
            ResourceMap::new()
        }
    }
}

fn read_entries(document: &str) -> quick_xml::Result<ResourceMap> {
    let mut reader = Reader::from_str(document);
    let mut map = ResourceMap::new();
    let mut open = Vec::new();

    // key and collected text of the <data> element being read
    let mut entry: Option<(String, String)> = None;
    let mut in_value = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => {
                match e.name().as_ref() {
                    b"data" => entry = data_key(&e)?.map(|key| (key, String::new())),
                    b"value" => in_value = entry.is_some(),
                    _ => {}
                }
                open.push(String::from_utf8_lossy(e.name().as_ref()).into_owned());
            }
            Event::Empty(e) => {
                if e.name().as_ref() == b"data"
                    && let Some(key) = data_key(&e)?
                {
                    map.insert(key, String::new());
                }
            }
            Event::Text(e) if in_value => {
                if let Some((_, value)) = &mut entry {
                    value.push_str(&e.unescape()?);
                }
            }
            Event::CData(e) if in_value => {
                if let Some((_, value)) = &mut entry {
                    value.push_str(&e.decode()?);
                }
            }
            Event::End(e) => {
                open.pop();
                match e.name().as_ref() {
                    b"value" => in_value = false,
                    b"data" => {
                        if let Some((key, value)) = entry.take() {
                            map.insert(key, value);
                        }
                    }
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    match open.pop() {
        Some(name) => Err(quick_xml::Error::IllFormed(IllFormedError::MissingEndTag(name))),
        None => Ok(map),
    }
}

fn data_key(start: &BytesStart<'_>) -> quick_xml::Result<Option<String>> {
    match start.try_get_attribute("name")? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

/// Locale carried by a resource file of the record `stem`.
///
/// `FooSystem.resx` and `Foo.resx` hold the default locale,
/// `FooSystem.ru.resx` and `Foo.ru.resx` hold `ru`. Files of other records
/// yield `None`.
#[must_use]
pub fn locale_from_file_name(stem: &str, file_name: &str, default_locale: &str) -> Option<String> {
    let rest = file_name
        .strip_suffix(".resx")?
        .strip_prefix(stem)?;
    let rest = rest.strip_prefix("System").unwrap_or(rest);

    if rest.is_empty() {
        return Some(default_locale.to_string());
    }

    let locale = rest.strip_prefix('.')?;
    (!locale.is_empty() && !locale.contains('.')).then(|| locale.to_string())
}

///
/// Localization
///
/// Per-locale resource maps attached to one record.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Localization {
    bundles: BTreeMap<String, ResourceMap>,
}

impl Localization {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            bundles: BTreeMap::new(),
        }
    }

    /// Builder form of [`Self::insert`].
    #[must_use]
    pub fn with(mut self, locale: impl Into<String>, resources: ResourceMap) -> Self {
        self.insert(locale, resources);
        self
    }

    /// Merge a resource map into a locale; later keys win.
    pub fn insert(&mut self, locale: impl Into<String>, resources: ResourceMap) {
        self.bundles
            .entry(locale.into())
            .or_default()
            .extend(resources);
    }

    #[must_use]
    pub fn get(&self, locale: &str, key: &str) -> Option<&str> {
        self.bundles
            .get(locale)
            .and_then(|bundle| bundle.get(key))
            .map(String::as_str)
    }

    pub fn locales(&self) -> impl Iterator<Item = &str> {
        self.bundles.keys().map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bundles.values().all(BTreeMap::is_empty)
    }
}
