use super::types::{
    Header, HeaderValue, ROOT_SECTION, SECTION_HEADER_KEY, UNPARSED_PREFIX,
};

/// Classification of a single header line
#[derive(Debug, PartialEq)]
enum Line<'a> {
    KeyValue(&'a str, &'a str),
    Section(&'a str, &'a str),
    Other(&'a str),
}

fn classify(line: &str) -> Line<'_> {
    let trimmed = line.trim();
    if let Some(rest) = trimmed.strip_prefix('[') {
        if let Some(close) = rest.find(']') {
            let name = rest[..close].trim();
            if !name.is_empty() {
                return Line::Section(name, rest[close + 1..].trim());
            }
        }
    } else if let Some((key, value)) = trimmed.split_once('=') {
        let key = key.trim();
        if !key.is_empty() {
            return Line::KeyValue(key, value.trim());
        }
    }
    Line::Other(line)
}

/// Per-section bookkeeping that resets when a new section opens
#[derive(Default)]
struct Counters {
    unparsed: usize,
    duplicates: usize,
}

/// Parse raw header lines into sections of typed values.
///
/// Parsing is best-effort and never fails: lines that are neither
/// `key=value` nor `[Section]` markers land under `UNPARSED_<n>`.
pub fn parse_header_lines<S: AsRef<str>>(lines: &[S]) -> Header {
    let mut header = Header::new();
    let mut active = ROOT_SECTION.to_string();
    let mut counters = Counters::default();

    for line in lines {
        match classify(line.as_ref()) {
            Line::KeyValue(key, raw) => {
                let section = header.section_mut(&active);
                let key = if section.contains_key(key) {
                    let renamed = unique_key(section, key, counters.duplicates);
                    counters.duplicates += 1;
                    renamed
                } else {
                    key.to_string()
                };
                section.push(key, HeaderValue::coerce(raw));
            }
            Line::Section(name, trailing) => {
                active = name.to_string();
                counters = Counters::default();
                let section = header.section_mut(&active);
                if !trailing.is_empty() {
                    let key = if section.contains_key(SECTION_HEADER_KEY) {
                        let renamed = unique_key(section, SECTION_HEADER_KEY, counters.duplicates);
                        counters.duplicates += 1;
                        renamed
                    } else {
                        SECTION_HEADER_KEY.to_string()
                    };
                    section.push(key, HeaderValue::Str(trailing.to_string()));
                }
            }
            Line::Other(text) => {
                let section = header.section_mut(&active);
                let mut key = format!("{}_{}", UNPARSED_PREFIX, counters.unparsed);
                while section.contains_key(&key) {
                    counters.unparsed += 1;
                    key = format!("{}_{}", UNPARSED_PREFIX, counters.unparsed);
                }
                counters.unparsed += 1;
                section.push(key, HeaderValue::Str(text.to_string()));
            }
        }
    }

    header
}

/// `key_<n>`, bumping `n` further if a literal key of that name already exists.
fn unique_key(section: &super::types::HeaderSection, key: &str, n: usize) -> String {
    let mut n = n;
    let mut candidate = format!("{}_{}", key, n);
    while section.contains_key(&candidate) {
        n += 1;
        candidate = format!("{}_{}", key, n);
    }
    candidate
}
