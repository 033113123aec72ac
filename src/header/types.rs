use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Name of the section that collects entries seen before the first `[Section]` line.
pub const ROOT_SECTION: &str = "ROOT";

/// Key under which trailing text of a `[Section] text` line is stored.
pub const SECTION_HEADER_KEY: &str = "SECTIONHEADER";

/// Key prefix for lines that are neither `key=value` nor section markers.
pub const UNPARSED_PREFIX: &str = "UNPARSED";

/// A typed header value.
///
/// Values are coerced speculatively: integer first, then float, then string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HeaderValue {
    /// Integer value
    Int(i64),
    /// Floating point value
    Float(f64),
    /// Anything that did not parse as a number
    Str(String),
}

impl HeaderValue {
    /// Coerce raw text to the narrowest matching value type.
    pub fn coerce(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            return HeaderValue::Int(i);
        }
        // "inf"/"nan" parse as f64 but are not numbers the instrument writes.
        if let Some(f) = raw.parse::<f64>().ok().filter(|f| f.is_finite()) {
            return HeaderValue::Float(f);
        }
        HeaderValue::Str(raw.to_string())
    }

    /// Integer view, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            HeaderValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view; integers are widened.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            HeaderValue::Int(i) => Some(*i as f64),
            HeaderValue::Float(f) => Some(*f),
            HeaderValue::Str(_) => None,
        }
    }

    /// String view, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            HeaderValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Display for HeaderValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderValue::Int(i) => write!(f, "{}", i),
            HeaderValue::Float(v) => write!(f, "{}", v),
            HeaderValue::Str(s) => f.write_str(s),
        }
    }
}

/// One header section: an insertion-ordered key/value list.
///
/// Keys are unique within a section; the parser renames duplicates before
/// inserting them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeaderSection {
    entries: Vec<(String, HeaderValue)>,
}

impl HeaderSection {
    /// Create an empty section
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&HeaderValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Whether the key is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Append an entry. Callers are responsible for key uniqueness.
    pub(crate) fn push(&mut self, key: String, value: HeaderValue) {
        self.entries.push((key, value));
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &HeaderValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the section holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for HeaderSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for HeaderSection {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = deserializer.deserialize_map(OrderedEntries::<HeaderValue>::new())?;
        Ok(HeaderSection { entries })
    }
}

/// Map visitor that keeps entries in document order.
struct OrderedEntries<V>(PhantomData<V>);

impl<V> OrderedEntries<V> {
    fn new() -> Self {
        OrderedEntries(PhantomData)
    }
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedEntries<V> {
    type Value = Vec<(String, V)>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((k, v)) = access.next_entry::<String, V>()? {
            entries.push((k, v));
        }
        Ok(entries)
    }
}

/// Parsed list-file header: an ordered mapping of section name to section.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    sections: Vec<(String, HeaderSection)>,
}

impl Header {
    /// Create an empty header
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a section by name
    pub fn section(&self, name: &str) -> Option<&HeaderSection> {
        self.sections.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    /// Convenience lookup of `section -> key`
    pub fn get(&self, section: &str, key: &str) -> Option<&HeaderValue> {
        self.section(section).and_then(|s| s.get(key))
    }

    /// Get a section for writing, creating it at the end if missing.
    pub(crate) fn section_mut(&mut self, name: &str) -> &mut HeaderSection {
        let idx = match self.sections.iter().position(|(n, _)| n == name) {
            Some(idx) => idx,
            None => {
                self.sections.push((name.to_string(), HeaderSection::new()));
                self.sections.len() - 1
            }
        };
        &mut self.sections[idx].1
    }

    /// Iterate sections in order of first appearance
    pub fn sections(&self) -> impl Iterator<Item = (&str, &HeaderSection)> {
        self.sections.iter().map(|(n, s)| (n.as_str(), s))
    }

    /// Number of sections
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the header has no sections
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Flatten to `(section, key, value)` triples in order.
    pub fn flatten(&self) -> impl Iterator<Item = (&str, &str, &HeaderValue)> {
        self.sections
            .iter()
            .flat_map(|(name, section)| section.iter().map(move |(k, v)| (name.as_str(), k, v)))
    }
}

impl Serialize for Header {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for (name, section) in &self.sections {
            map.serialize_entry(name, section)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Header {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let sections = deserializer.deserialize_map(OrderedEntries::<HeaderSection>::new())?;
        Ok(Header { sections })
    }
}
