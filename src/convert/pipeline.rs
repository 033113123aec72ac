use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use log::{debug, info, warn};

use super::assemble::{assemble, ChannelLayout};
use super::cursor::StreamCursor;
use super::stats::ExploreSummary;
use super::{ConversionError, ListModeConverter};
use crate::decoder::{
    decode_chunk_in, explore_chunk_in, pairs_from_bytes, trailing_bytes, ChannelMask, ChunkPrefetcher,
    ChunkReader, ChunkSource, ChunkSplicer, DecodeDiagnostics,
};
use crate::header::{read_header, parse_header_lines, Header};
use crate::store::EventColumns;

/// Result of the discovery pass
#[derive(Debug, Clone, PartialEq)]
pub struct ListFileExploration {
    /// Parsed header
    pub header: Header,
    /// Byte offset of the binary body
    pub body_offset: u64,
    /// Size of the list file in bytes
    pub file_size: u64,
    /// Whole-file counts
    pub summary: ExploreSummary,
}

/// Result of the materialization pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedEvents {
    /// Filled output columns
    pub columns: EventColumns,
    /// Lenient-decoding counters of this pass
    pub diagnostics: DecodeDiagnostics,
}

/// Logs pass progress every `interval` chunks.
struct Progress {
    pass: &'static str,
    start: u64,
    end: u64,
    interval: usize,
    chunks: usize,
}

impl Progress {
    fn new(pass: &'static str, start: u64, end: u64, interval: usize) -> Self {
        Self {
            pass,
            start,
            end,
            interval: interval.max(1),
            chunks: 0,
        }
    }

    fn chunk_done(&mut self, position: u64) {
        self.chunks += 1;
        if self.chunks % self.interval != 0 {
            return;
        }
        let done = position.saturating_sub(self.start);
        let total = self.end.saturating_sub(self.start);
        if total > 0 {
            let pct = (done as f64 / total as f64) * 100.0;
            info!("{}: {}/{} bytes ({:.1}%)", self.pass, done, total, pct);
        }
    }
}

impl ListModeConverter {
    /// Open a list file, parse its header, and return a chunk source over the body.
    fn open_body(&self, path: &Path) -> Result<(Header, u64, u64, Box<dyn ChunkSource>), ConversionError> {
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();

        let mut reader = BufReader::new(file);
        let raw = read_header(&mut reader, self.config.max_header_bytes)?;
        let header = parse_header_lines(&raw.lines);
        debug!(
            "Header: {} lines in {} sections, body starts at byte {}",
            raw.lines.len(),
            header.len(),
            raw.body_offset
        );

        let chunks = ChunkReader::new(
            reader.into_inner(),
            raw.body_offset,
            file_size,
            self.config.chunk_bytes,
        )?;
        let source: Box<dyn ChunkSource> = if self.config.prefetch {
            Box::new(ChunkPrefetcher::spawn(chunks, self.config.prefetch_depth)?)
        } else {
            Box::new(chunks)
        };

        Ok((header, raw.body_offset, file_size, source))
    }

    /// Discovery pass: count events and collect the channel mask.
    ///
    /// Allocates nothing proportional to the file size.
    pub fn explore<P: AsRef<Path>>(&self, input_path: P) -> Result<ListFileExploration, ConversionError> {
        let input_path = input_path.as_ref();
        info!("Exploring {}", input_path.display());

        let (header, body_offset, file_size, mut source) = self.open_body(input_path)?;
        let mut summary = ExploreSummary {
            body_bytes: file_size.saturating_sub(body_offset),
            ..Default::default()
        };
        let mut progress = Progress::new("Explore", body_offset, file_size, self.config.progress_interval);
        let mut splicer = ChunkSplicer::new(file_size);

        while let Some(chunk) = source.next_chunk()? {
            let end = chunk.end();
            let (bytes, context) = splicer.join(chunk);
            if context.last {
                summary.diagnostics.trailing_bytes += trailing_bytes(bytes.len()) as u64;
            }
            let pairs = pairs_from_bytes(&bytes);
            let chunk_summary = explore_chunk_in(&pairs, context);
            splicer.keep(&bytes, chunk_summary.pending);
            summary.add_chunk(&chunk_summary.counts, chunk_summary.channel_mask);
            progress.chunk_done(end);
        }

        report_diagnostics("Explore", &summary.diagnostics);
        info!("Discovery pass complete: {}", summary);

        Ok(ListFileExploration {
            header,
            body_offset,
            file_size,
            summary,
        })
    }

    /// Materialization pass: decode every chunk into preallocated columns.
    ///
    /// Fails with [`ConversionError::EventCountMismatch`] if this pass does not
    /// reproduce the discovery counts.
    pub fn materialize<P: AsRef<Path>>(
        &self,
        input_path: P,
        exploration: &ListFileExploration,
    ) -> Result<MaterializedEvents, ConversionError> {
        let input_path = input_path.as_ref();
        let origin = self.config.channel_origin;
        let expected = &exploration.summary;

        let layout = ChannelLayout::from_mask(expected.channel_mask, origin);
        let mut columns = EventColumns::allocate(expected.events, layout.channels())?;

        info!(
            "Materializing {} events on channels {:?}",
            expected.events,
            layout.channels()
        );

        let (_, body_offset, file_size, mut source) = self.open_body(input_path)?;
        let mut progress = Progress::new("Convert", body_offset, file_size, self.config.progress_interval);
        let mut cursor = StreamCursor::new();
        let mut diagnostics = DecodeDiagnostics::default();
        let mut mask = ChannelMask::EMPTY;
        let mut splicer = ChunkSplicer::new(file_size);

        while let Some(chunk) = source.next_chunk()? {
            let end = chunk.end();
            let (bytes, context) = splicer.join(chunk);
            if context.last {
                diagnostics.trailing_bytes += trailing_bytes(bytes.len()) as u64;
            }
            let pairs = pairs_from_bytes(&bytes);
            let decoded = decode_chunk_in(&pairs, origin, context);
            splicer.keep(&bytes, decoded.pending);
            diagnostics += decoded.counts.diagnostics;
            mask |= decoded.channel_mask;

            let decoded_events = cursor.event_base + u64::from(decoded.counts.events);
            if decoded_events > expected.events {
                return Err(mismatch(expected, decoded_events, mask));
            }
            if decoded.counts.events > 0 {
                let rows = assemble(&decoded, &cursor, &layout)?;
                columns.write_rows(rows.first_event, &rows.time, &rows.values)?;
            }
            cursor.advance(&decoded.counts)?;
            progress.chunk_done(end);
        }

        if cursor.event_base != expected.events || mask != expected.channel_mask {
            return Err(mismatch(expected, cursor.event_base, mask));
        }

        report_diagnostics("Convert", &diagnostics);
        info!("Materialization complete: {} events", cursor.event_base);

        Ok(MaterializedEvents {
            columns,
            diagnostics,
        })
    }
}

fn mismatch(expected: &ExploreSummary, converted_events: u64, converted_mask: ChannelMask) -> ConversionError {
    ConversionError::EventCountMismatch {
        explored_events: expected.events,
        converted_events,
        explored_mask: expected.channel_mask,
        converted_mask,
    }
}

fn report_diagnostics(pass: &str, diagnostics: &DecodeDiagnostics) {
    if diagnostics.skipped_pairs > 0 {
        warn!("{}: skipped {} unrecognized word pairs", pass, diagnostics.skipped_pairs);
    }
    if diagnostics.empty_headers > 0 {
        warn!("{}: skipped {} event headers with an empty ADC mask", pass, diagnostics.empty_headers);
    }
    if diagnostics.truncated_events > 0 {
        warn!("{}: dropped {} truncated events", pass, diagnostics.truncated_events);
    }
    if diagnostics.trailing_bytes > 0 {
        warn!("{}: ignored {} trailing bytes", pass, diagnostics.trailing_bytes);
    }
}
