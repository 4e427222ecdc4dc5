//! Shared boundary-line detection for the PRN, TXT, and XML streaming
//! dialect readers. None of the three source formats are well-formed
//! outer documents, so record boundaries are detected heuristically: a
//! *boundary line* is any line matching one of a set of literal
//! substrings, or an optional anchored regular expression.
//!
//! This factors out the "accumulate non-boundary lines into a chunk
//! until the next boundary line or end of stream, skipping empty
//! chunks" loop that all three readers otherwise repeat verbatim.

use regex::Regex;
use std::io::BufRead;

/// A boundary predicate: a line matches if it contains any of `markers`,
/// or (after trimming) matches `pattern`.
#[derive(Debug, Clone)]
pub struct BoundaryMatcher {
    markers: Vec<&'static str>,
    pattern: Option<Regex>,
}

impl BoundaryMatcher {
    /// Build a matcher from literal substrings with no anchored pattern.
    #[must_use]
    pub fn new(markers: &[&'static str]) -> Self {
        Self {
            markers: markers.to_vec(),
            pattern: None,
        }
    }

    /// Add an anchored regular expression checked against the trimmed
    /// line, in addition to the literal markers.
    #[must_use]
    pub fn with_pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// True iff `line` is a boundary line under this matcher.
    #[must_use]
    pub fn is_boundary(&self, line: &str) -> bool {
        if self.markers.iter().any(|m| line.contains(m)) {
            return true;
        }
        match &self.pattern {
            Some(re) => re.is_match(line.trim()),
            None => false,
        }
    }
}

/// Accumulate non-boundary lines from `reader` into chunks, splitting at
/// every boundary line. Empty chunks are skipped; a chunk is the raw
/// concatenation of its constituent lines, each followed by a newline,
/// so embedded markup spanning several lines survives intact for the
/// caller's own line-by-line or substring scanning.
pub struct ChunkReader<R: BufRead> {
    reader: R,
    matcher: BoundaryMatcher,
    done: bool,
}

impl<R: BufRead> std::fmt::Debug for ChunkReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChunkReader").field("done", &self.done).finish()
    }
}

impl<R: BufRead> ChunkReader<R> {
    /// Wrap a line-oriented reader with the boundary rule that splits it
    /// into per-record chunks.
    pub fn new(reader: R, matcher: BoundaryMatcher) -> Self {
        Self {
            reader,
            matcher,
            done: false,
        }
    }

    /// Return the next non-empty chunk, or `None` once the stream and any
    /// trailing partial chunk are exhausted.
    pub fn next_chunk(&mut self) -> std::io::Result<Option<String>> {
        if self.done {
            return Ok(None);
        }

        let mut chunk = String::new();
        loop {
            let mut line = String::new();
            let bytes_read = self.reader.read_line(&mut line)?;
            if bytes_read == 0 {
                self.done = true;
                return Ok(if chunk.is_empty() { None } else { Some(chunk) });
            }

            if self.matcher.is_boundary(&line) {
                if !chunk.is_empty() {
                    return Ok(Some(chunk));
                }
                // Boundary line with nothing accumulated yet: keep scanning.
                continue;
            }

            chunk.push_str(&line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn splits_on_literal_marker() {
        let input = "*** DOCUMENT BOUNDARY ***\nfirst\nrecord\n*** DOCUMENT BOUNDARY ***\nsecond\n";
        let matcher = BoundaryMatcher::new(&["*** DOCUMENT BOUNDARY ***"]);
        let mut chunks = ChunkReader::new(Cursor::new(input), matcher);

        assert_eq!(chunks.next_chunk().unwrap(), Some("first\nrecord\n".to_string()));
        assert_eq!(chunks.next_chunk().unwrap(), Some("second\n".to_string()));
        assert_eq!(chunks.next_chunk().unwrap(), None);
    }

    #[test]
    fn splits_on_anchored_pattern() {
        let input = "<dateCreated>2020-01-01T00:00:00</dateCreated>\nbody1\n<dateCreated>2020-01-02T00:00:00</dateCreated>\nbody2\n";
        let pattern = Regex::new(r"^<dateCreated>\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}</dateCreated>$").unwrap();
        let matcher = BoundaryMatcher::new(&[]).with_pattern(pattern);
        let mut chunks = ChunkReader::new(Cursor::new(input), matcher);

        assert_eq!(chunks.next_chunk().unwrap(), Some("body1\n".to_string()));
        assert_eq!(chunks.next_chunk().unwrap(), Some("body2\n".to_string()));
    }

    #[test]
    fn empty_chunks_are_skipped() {
        let input = "*** DOCUMENT BOUNDARY ***\n*** DOCUMENT BOUNDARY ***\nonly\n";
        let matcher = BoundaryMatcher::new(&["*** DOCUMENT BOUNDARY ***"]);
        let mut chunks = ChunkReader::new(Cursor::new(input), matcher);

        assert_eq!(chunks.next_chunk().unwrap(), Some("only\n".to_string()));
        assert_eq!(chunks.next_chunk().unwrap(), None);
    }
}
