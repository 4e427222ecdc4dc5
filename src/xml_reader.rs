//! Streaming reader for the slim-MARCXML dialect, read one
//! heuristically-bounded chunk at a time rather than through a validating
//! XML parser, since real exports are streamed without a single
//! well-formed document root.

use crate::boundary::{BoundaryMatcher, ChunkReader};
use crate::error::Result;
use crate::field::Field;
use crate::formats::RecordSource;
use crate::leader::Leader;
use crate::record::Record;
use regex::Regex;
use std::io::BufRead;
use std::sync::OnceLock;

fn boundary_matcher() -> BoundaryMatcher {
    BoundaryMatcher::new(&[
        "<record xmlns=\"http://www.loc.gov/mods/v3\">",
        "<?xml version",
        "<OAI-PMH",
        "<ListRecords>",
        "</ListRecords>",
    ])
}

fn controlfield_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<controlfield tag="([^"]*)">(.*?)</controlfield>"#)
            .expect("controlfield pattern is a valid regex")
    })
}

fn datafield_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?s)<datafield tag="([^"]*)" ind1="([^"]*)" ind2="([^"]*)">(.*?)</datafield>"#,
        )
        .expect("datafield pattern is a valid regex")
    })
}

fn subfield_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?s)<subfield code="([^"]*)">(.*?)</subfield>"#)
            .expect("subfield pattern is a valid regex")
    })
}

/// Streaming slim-MARCXML dialect reader.
#[derive(Debug)]
pub struct XmlDialectReader<R: BufRead> {
    chunks: ChunkReader<R>,
    records_read: usize,
}

impl<R: BufRead> XmlDialectReader<R> {
    /// Wrap a line-oriented reader over slim-MARCXML export text.
    pub fn new(reader: R) -> Self {
        Self {
            chunks: ChunkReader::new(reader, boundary_matcher()),
            records_read: 0,
        }
    }

    /// Read the next record, or `Ok(None)` at end of stream.
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the underlying stream fails; malformed
    /// fragments within a chunk are skipped, never fatal.
    pub fn read_record(&mut self) -> Result<Option<Record>> {
        let chunk = match self.chunks.next_chunk()? {
            Some(c) => c,
            None => return Ok(None),
        };

        let mut record = Record::new(Leader::default());

        for caps in controlfield_re().captures_iter(&chunk) {
            let tag = caps[1].to_string();
            let data = caps[2].to_string();
            record.add_ordered_field(Field::control(tag, data));
        }

        for caps in datafield_re().captures_iter(&chunk) {
            let tag = caps[1].to_string();
            let ind1 = blank_if_empty(&caps[2]);
            let ind2 = blank_if_empty(&caps[3]);
            let body = caps[4].to_string();

            let mut field = Field::data(tag, ind1, ind2);
            for sub_caps in subfield_re().captures_iter(&body) {
                let code = sub_caps[1].chars().next().unwrap_or(' ');
                field.push_subfield_raw(code, sub_caps[2].to_string());
            }
            record.add_ordered_field(field);
        }

        self.records_read += 1;
        Ok(Some(record))
    }
}

fn blank_if_empty(s: &str) -> char {
    s.chars().next().unwrap_or(' ')
}

impl<R: BufRead + std::fmt::Debug> RecordSource for XmlDialectReader<R> {
    fn read_record(&mut self) -> Result<Option<Record>> {
        XmlDialectReader::read_record(self)
    }

    fn records_read(&self) -> Option<usize> {
        Some(self.records_read)
    }
}
