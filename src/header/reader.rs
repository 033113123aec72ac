use std::io::BufRead;

use log::debug;

use super::error::HeaderError;

/// Sentinel line that terminates the textual header.
pub const LISTDATA_SENTINEL: &str = "[LISTDATA]";

/// Default upper bound on header size before giving up on the sentinel.
pub const DEFAULT_MAX_HEADER_BYTES: u64 = 16 * 1024 * 1024;

/// Raw header lines plus the position where the binary body starts
#[derive(Debug, Clone, PartialEq)]
pub struct RawHeader {
    /// Header lines without terminators, sentinel excluded
    pub lines: Vec<String>,
    /// Byte offset of the first body byte (just after the sentinel line)
    pub body_offset: u64,
}

/// Consume lines up to and including the `[LISTDATA]` sentinel.
///
/// The reader is left positioned immediately after the sentinel line. Lines are
/// decoded as lossy UTF-8 because vendor headers occasionally carry Latin-1
/// characters.
pub fn read_header<R: BufRead>(reader: &mut R, max_bytes: u64) -> Result<RawHeader, HeaderError> {
    let mut lines = Vec::new();
    let mut consumed: u64 = 0;
    let mut buf = Vec::with_capacity(256);

    loop {
        buf.clear();
        let n = reader.read_until(b'\n', &mut buf)?;
        if n == 0 || consumed + n as u64 > max_bytes {
            return Err(HeaderError::MissingSentinel {
                sentinel: LISTDATA_SENTINEL,
                scanned: consumed + n as u64,
            });
        }
        consumed += n as u64;

        let line = String::from_utf8_lossy(strip_terminator(&buf)).into_owned();
        if line.trim_end() == LISTDATA_SENTINEL {
            debug!("Header sentinel found after {} lines ({} bytes)", lines.len(), consumed);
            return Ok(RawHeader {
                lines,
                body_offset: consumed,
            });
        }
        lines.push(line);
    }
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
