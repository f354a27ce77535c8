//! JSON-lines message source.
//!
//! Each input line is either one event object or an array of them, in
//! the shape the real-time chat API delivers:
//!
//! ```text
//! {"type":"message","channel":"C1","text":"failure"}
//! [{"channel":"C2","attachments":[{"color":"d00000"}]}, {"channel":"C3","text":"normal"}]
//! ```
//!
//! Malformed lines, including ones that are not valid UTF-8, are logged
//! and skipped; they never reach the core.

use std::io::BufRead;

use log::warn;
use serde::Deserialize;

use crate::app::ports::{MessageSource, SourceError};
use crate::classify::RtmEvent;

#[derive(Deserialize)]
#[serde(untagged)]
enum Line {
    Batch(Vec<RtmEvent>),
    Single(RtmEvent),
}

/// Reads events from any buffered reader, one line per batch.
#[derive(Debug)]
pub struct JsonLinesSource<R> {
    reader: R,
    line: Vec<u8>,
    line_no: u64,
    skipped: u64,
}

impl<R: BufRead> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line: Vec::new(),
            line_no: 0,
            skipped: 0,
        }
    }

    /// Lines dropped as malformed.
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl<R: BufRead> MessageSource for JsonLinesSource<R> {
    fn read_batch(&mut self) -> Result<Option<Vec<RtmEvent>>, SourceError> {
        self.line.clear();
        if self.reader.read_until(b'\n', &mut self.line)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;

        let trimmed = self.line.trim_ascii();
        if trimmed.is_empty() {
            return Ok(Some(Vec::new()));
        }

        match serde_json::from_slice::<Line>(trimmed) {
            Ok(Line::Batch(events)) => Ok(Some(events)),
            Ok(Line::Single(event)) => Ok(Some(vec![event])),
            Err(e) => {
                warn!("line {}: skipping malformed event: {}", self.line_no, e);
                self.skipped += 1;
                Ok(Some(Vec::new()))
            }
        }
    }
}
