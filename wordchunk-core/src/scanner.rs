//! Whitespace word scanning over buffered byte streams

use crate::source::Source;
use crate::types::Word;
use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead};

/// Splits one buffered stream into whitespace-delimited words
///
/// Words are cut from each `fill_buf` slice as it arrives, so memory stays
/// bounded by the reader's buffer plus the longest word. A word or UTF-8
/// sequence cut by the slice edge is carried into the next fill. Invalid
/// bytes decode to U+FFFD. Runs of Unicode whitespace act as a single
/// delimiter.
pub struct WordScanner<R> {
    reader: R,
    partial: String,
    tail: Vec<u8>,
    pending: VecDeque<Word>,
    bytes_read: u64,
    done: bool,
}

impl<R: BufRead> WordScanner<R> {
    /// Create a scanner over a buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            partial: String::new(),
            tail: Vec::new(),
            pending: VecDeque::new(),
            bytes_read: 0,
            done: false,
        }
    }

    /// Bytes consumed from the reader so far
    pub fn bytes_read(&self) -> u64 {
        self.bytes_read
    }

    fn absorb(&mut self, bytes: &[u8]) {
        let text = String::from_utf8_lossy(bytes);
        match last_whitespace_end(&text) {
            None => self.partial.push_str(&text),
            Some(cut) => {
                self.partial.push_str(&text[..cut]);
                let complete = std::mem::replace(&mut self.partial, text[cut..].to_string());
                self.pending.extend(complete.split_whitespace().map(Word::from));
            }
        }
    }

    fn finish(&mut self) {
        let tail = std::mem::take(&mut self.tail);
        self.absorb(&tail);
        let last = std::mem::take(&mut self.partial);
        self.pending.extend(last.split_whitespace().map(Word::from));
        self.done = true;
    }
}

impl<R: BufRead> Iterator for WordScanner<R> {
    type Item = io::Result<Word>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(word) = self.pending.pop_front() {
                return Some(Ok(word));
            }
            if self.done {
                return None;
            }

            let buf = match self.reader.fill_buf() {
                Ok(buf) => buf,
                Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => {
                    // a word cut by the failure is dropped
                    self.partial.clear();
                    self.tail.clear();
                    self.done = true;
                    return Some(Err(err));
                }
            };
            if buf.is_empty() {
                self.finish();
                continue;
            }

            let n = buf.len();
            let mut bytes = std::mem::take(&mut self.tail);
            bytes.extend_from_slice(buf);
            self.reader.consume(n);
            self.bytes_read += n as u64;

            let keep = incomplete_tail_len(&bytes);
            self.tail = bytes.split_off(bytes.len() - keep);
            self.absorb(&bytes);
        }
    }
}

/// Byte offset just past the last whitespace character
fn last_whitespace_end(text: &str) -> Option<usize> {
    text.char_indices()
        .rev()
        .find(|(_, c)| c.is_whitespace())
        .map(|(i, c)| i + c.len_utf8())
}

/// Length of a UTF-8 sequence cut short at the end of `bytes`
fn incomplete_tail_len(bytes: &[u8]) -> usize {
    let start = bytes.len().saturating_sub(3);
    for i in (start..bytes.len()).rev() {
        let byte = bytes[i];
        if byte & 0xC0 == 0x80 {
            continue;
        }
        let needed = match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        };
        let have = bytes.len() - i;
        return if have < needed { have } else { 0 };
    }
    0
}

/// A source that stopped early because reading it failed
#[derive(Debug)]
pub struct SourceFailure {
    /// Name of the failed source
    pub source_name: String,
    /// The underlying read error
    pub error: io::Error,
}

impl fmt::Display for SourceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to read {}: {}", self.source_name, self.error)
    }
}

impl std::error::Error for SourceFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// What the scanner saw across all of its sources
#[derive(Debug, Default)]
pub struct ScanSummary {
    /// Sources visited, including failed ones
    pub sources: usize,
    /// Total bytes read
    pub bytes_read: u64,
    /// Total words produced
    pub words: u64,
    /// Sources abandoned after a read error
    pub failures: Vec<SourceFailure>,
}

/// Scans a list of sources in order as one continuous word stream
///
/// A read error ends the current source; the failure is recorded and
/// scanning moves on to the next source. Words already produced are kept.
pub struct SourceScanner {
    queue: VecDeque<Source>,
    current: Option<(String, WordScanner<Box<dyn BufRead + Send>>)>,
    summary: ScanSummary,
}

impl SourceScanner {
    /// Create a scanner over sources, scanned in the given order
    pub fn new(sources: impl IntoIterator<Item = Source>) -> Self {
        Self {
            queue: sources.into_iter().collect(),
            current: None,
            summary: ScanSummary::default(),
        }
    }

    /// Finish scanning and return the summary
    ///
    /// Sources that were never reached are not counted.
    pub fn into_summary(mut self) -> ScanSummary {
        self.close_current();
        self.summary
    }

    fn close_current(&mut self) {
        if let Some((name, scanner)) = self.current.take() {
            log::trace!("finished source {name} ({} bytes)", scanner.bytes_read());
            self.summary.bytes_read += scanner.bytes_read();
        }
    }

    fn advance_source(&mut self) -> bool {
        self.close_current();
        match self.queue.pop_front() {
            Some(source) => {
                let (name, reader) = source.into_parts();
                log::trace!("scanning source {name}");
                self.summary.sources += 1;
                self.current = Some((name, WordScanner::new(reader)));
                true
            }
            None => false,
        }
    }
}

impl Iterator for SourceScanner {
    type Item = Word;

    fn next(&mut self) -> Option<Word> {
        loop {
            if self.current.is_none() && !self.advance_source() {
                return None;
            }
            let Some((name, scanner)) = self.current.as_mut() else {
                return None;
            };

            match scanner.next() {
                Some(Ok(word)) => {
                    self.summary.words += 1;
                    return Some(word);
                }
                Some(Err(error)) => {
                    log::warn!("read error in {name}, skipping rest of source: {error}");
                    let source_name = name.clone();
                    self.summary.failures.push(SourceFailure { source_name, error });
                    self.close_current();
                }
                None => self.close_current(),
            }
        }
    }
}

impl fmt::Debug for SourceScanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SourceScanner")
            .field("queued", &self.queue.len())
            .field("current", &self.current.as_ref().map(|(name, _)| name))
            .field("summary", &self.summary)
            .finish()
    }
}
