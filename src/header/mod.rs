//! # List-File Header
//!
//! MPA-3 list files start with an ASCII preamble of `[Section]` markers and
//! `key=value` lines, terminated by the `[LISTDATA]` sentinel. Everything after
//! the sentinel line is the binary word stream.
//!
//! Reading and parsing are split: [`read_header`] only finds the sentinel and
//! the body offset, [`parse_header_lines`] turns the raw lines into a typed
//! [`Header`]. Parsing never fails; reading fails when the sentinel is absent.

mod error;
mod parser;
mod reader;
mod types;


use std::io::BufRead;

pub use error::HeaderError;
pub use parser::parse_header_lines;
pub use reader::{read_header, RawHeader, DEFAULT_MAX_HEADER_BYTES, LISTDATA_SENTINEL};
pub use types::{
    Header, HeaderSection, HeaderValue, ROOT_SECTION, SECTION_HEADER_KEY, UNPARSED_PREFIX,
};

/// Read the header and parse it in one step.
///
/// Returns the parsed header and the byte offset of the binary body.
pub fn read_and_parse<R: BufRead>(reader: &mut R, max_bytes: u64) -> Result<(Header, u64), HeaderError> {
    let raw = read_header(reader, max_bytes)?;
    Ok((parse_header_lines(&raw.lines), raw.body_offset))
}
