use std::io::BufRead;

use thiserror::Error;

use crate::chunk::{Chunk, ChunkList};
use crate::record::{Record, RecordError, RecordType, hex_field};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("line {line}: {source}: {text}")]
    Record {
        line: usize,
        text: String,
        source: RecordError,
    },

    #[error("line {line}: input continues after end-of-file record: {text}")]
    AfterEof { line: usize, text: String },

    #[error("error reading input: {0}")]
    Read(#[from] std::io::Error),
}

/// Declared program entry point, as reported after a full scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartAddress {
    /// No start-address record in the image.
    #[default]
    None,
    Single(u32),
    /// More than one start-address record; no single value is meaningful.
    Multiple,
}

/// Read-only results of a completed scan, handed to the reporting layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanSummary {
    /// Whether the image carried an end-of-file record. Its absence is a
    /// soft condition, not an error.
    pub eof_seen: bool,
    pub start_address: StartAddress,
    pub data_records: usize,
    /// Largest single-record payload encountered.
    pub max_data_size: usize,
    /// Merged data chunks in ascending address order.
    pub chunks: Vec<Chunk>,
    /// Pairwise overlaps observed between data records.
    pub overlaps: usize,
}

impl ScanSummary {
    /// Lowest address covered by any chunk.
    pub fn min_address(&self) -> Option<u32> {
        self.chunks.first().map(|c| c.address)
    }

    /// One past the highest address covered by any chunk.
    pub fn end_address(&self) -> Option<u32> {
        self.chunks.iter().map(Chunk::end).max()
    }

    /// Total payload bytes across all chunks.
    pub fn total_data_bytes(&self) -> u64 {
        self.chunks.iter().map(|c| u64::from(c.size)).sum()
    }
}

// Per-image parsing state. One transition per record, keyed on record type.
#[derive(Debug, Default)]
struct Session {
    base_address: u32,
    start_address: u32,
    start_addresses_seen: usize,
    eof_seen: bool,
    data_records: usize,
    max_data_size: usize,
    chunks: ChunkList,
}

impl Session {
    fn apply(&mut self, record: Record<'_>) -> Result<(), RecordError> {
        if let Some(expected) = record.record_type.required_payload()
            && record.payload_size != expected
        {
            return Err(RecordError::PayloadSize {
                record_type: record.record_type,
                expected,
                actual: record.payload_size,
            });
        }

        let payload = record.payload.as_bytes();
        match record.record_type {
            RecordType::Data => {
                self.chunks
                    .insert(Chunk::new(record.address, record.payload_size as u32));
                self.data_records += 1;
                self.max_data_size = self.max_data_size.max(record.payload_size);
            }
            RecordType::Eof => {
                self.eof_seen = true;
            }
            RecordType::ExtendedSegment => {
                self.base_address = hex_field(payload)? << 4;
            }
            RecordType::StartSegment => {
                // CS:IP pair
                let segment = hex_field(&payload[..4])?;
                let offset = hex_field(&payload[4..])?;
                self.start_address = (segment << 4) + offset;
                self.start_addresses_seen += 1;
            }
            RecordType::ExtendedLinear => {
                self.base_address = hex_field(payload)? << 16;
            }
            RecordType::StartLinear => {
                self.start_address = hex_field(payload)?;
                self.start_addresses_seen += 1;
            }
        }
        Ok(())
    }

    fn into_summary(self) -> ScanSummary {
        let start_address = match self.start_addresses_seen {
            0 => StartAddress::None,
            1 => StartAddress::Single(self.start_address),
            _ => StartAddress::Multiple,
        };
        ScanSummary {
            eof_seen: self.eof_seen,
            start_address,
            data_records: self.data_records,
            max_data_size: self.max_data_size,
            overlaps: self.chunks.overlap_pairs(),
            chunks: self.chunks.into_chunks(),
        }
    }
}

/// Scan a complete hex image, one line at a time.
///
/// The first failing line aborts the scan; the error carries the 1-based line
/// number and a sanitized copy of the line. A missing end-of-file record is
/// reported through [`ScanSummary::eof_seen`], not as an error.
pub fn scan<R: BufRead>(input: R) -> Result<ScanSummary, ScanError> {
    let mut session = Session::default();

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        let number = index + 1;

        // An EOF record must be the last line; checked before parsing the
        // line that follows it.
        if session.eof_seen {
            return Err(ScanError::AfterEof {
                line: number,
                text: printable(&line),
            });
        }

        let outcome = Record::parse(&line, session.base_address)
            .and_then(|record| session.apply(record));
        if let Err(source) = outcome {
            return Err(ScanError::Record {
                line: number,
                text: printable(&line),
                source,
            });
        }
    }

    Ok(session.into_summary())
}

const PRINTABLE_LIMIT: usize = 64;

// Sanitized copy of an input line for error context: non-printable characters
// become '?' and anything past the cap is dropped with a marker.
fn printable(line: &str) -> String {
    let mut text: String = line
        .chars()
        .take(PRINTABLE_LIMIT)
        .map(|ch| if ch.is_ascii_graphic() || ch == ' ' { ch } else { '?' })
        .collect();
    if line.chars().count() > PRINTABLE_LIMIT {
        text.push_str("[etc]");
    }
    text
}
