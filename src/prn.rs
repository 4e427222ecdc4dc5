//! Streaming reader for the vendor PRN export dialect: a concatenation of
//! XML-ish fragments with no single well-formed root, read one
//! heuristically-bounded chunk at a time.

use crate::boundary::{BoundaryMatcher, ChunkReader};
use crate::error::Result;
use crate::field::is_control_tag;
use crate::field::Field;
use crate::formats::RecordSource;
use crate::leader::Leader;
use crate::record::Record;
use regex::Regex;
use std::io::BufRead;
use std::sync::OnceLock;

fn boundary_matcher() -> BoundaryMatcher {
    let pattern = Regex::new(r"^<dateCreated>\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}</dateCreated>$")
        .expect("boundary pattern is a valid regex");
    BoundaryMatcher::new(&[
        "<?xml version",
        "<title>",
        "<report>",
        "</report>",
        "<dateFormat>",
        "<catalog>",
    ])
    .with_pattern(pattern)
}

fn marc_entry_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r#"(?s)<marcEntry tag="([^"]*)" label="([^"]*)" ind="([^"]*)">(.*?)</marcEntry>"#,
        )
        .expect("marcEntry pattern is a valid regex")
    })
}

fn call_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<call>(.*?)</call>").expect("call pattern is a valid regex"))
}

fn item_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<item>(.*?)</item>").expect("item pattern is a valid regex"))
}

fn tag_content(block: &str, tag: &str) -> Option<String> {
    let pattern = format!(r"(?s)<{tag}>(.*?)</{tag}>");
    Regex::new(&pattern).ok()?.captures(block).map(|c| c[1].to_string())
}

/// Streaming PRN dialect reader.
#[derive(Debug)]
pub struct PrnReader<R: BufRead> {
    chunks: ChunkReader<R>,
    records_read: usize,
}

impl<R: BufRead> PrnReader<R> {
    /// Wrap a line-oriented reader over PRN export text.
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
        for caps in marc_entry_re().captures_iter(&chunk) {
            let tag = caps[1].to_string();
            let ind = caps[3].to_string();
            let content = caps[4].to_string();
            record.add_ordered_field(marc_entry_field(&tag, &ind, &content));
        }

        let flat = chunk.replace(['\n', '\r'], "");
        for call_caps in call_re().captures_iter(&flat) {
            let call_block = &call_caps[1];
            let call_number =
                tag_content(call_block, "callNumber").unwrap_or_else(|| "[NO CALL NUMBER]".to_string());
            let library = tag_content(call_block, "library");

            for item_caps in item_re().captures_iter(call_block) {
                let item_block = &item_caps[1];
                record.add_ordered_field(item_field(&call_number, library.as_deref(), item_block));
            }
        }

        self.records_read += 1;
        Ok(Some(record))
    }
}

fn marc_entry_field(tag: &str, ind: &str, content: &str) -> Field {
    if is_control_tag(tag) {
        let data = content
            .find("|a")
            .map(|i| content[i + 2..].to_string())
            .unwrap_or_else(|| content.trim().to_string());
        return Field::control(tag, data);
    }

    let mut chars = ind.chars();
    let ind1 = chars.next().unwrap_or(' ');
    let ind2 = chars.next().unwrap_or(' ');
    let mut field = Field::data(tag, ind1, ind2);
    let mut parts = content.split('|');
    parts.next(); // first fragment is ignored
    for part in parts {
        let mut chars = part.chars();
        if let Some(code) = chars.next() {
            let value: String = chars.collect();
            field.push_subfield_raw(code, value);
        }
    }
    field
}

fn item_field(call_number: &str, library: Option<&str>, item_block: &str) -> Field {
    let mut field = Field::data("999", ' ', ' ');
    field.push_subfield_raw('a', call_number);
    field.push_subfield_raw('w', "ALPHANUM");

    for (code, tag) in [
        ('c', "copyNumber"),
        ('i', "itemID"),
        ('d', "dateCreated"),
        ('k', "location"),
        ('l', "homeLocation"),
    ] {
        if let Some(value) = tag_content(item_block, tag) {
            field.push_subfield_raw(code, value);
        }
    }

    if let Some(library) = library {
        field.push_subfield_raw('m', library);
    }

    field.push_subfield_raw('r', "Y");
    field.push_subfield_raw('s', "Y");

    for (code, tag) in [('t', "type"), ('x', "category1"), ('z', "category2")] {
        if let Some(value) = tag_content(item_block, tag) {
            field.push_subfield_raw(code, value);
        }
    }

    let u_value = tag_content(item_block, "dateModified").or_else(|| tag_content(item_block, "dateCreated"));
    if let Some(value) = u_value {
        field.push_subfield_raw('u', value);
    }

    field
}

impl<R: BufRead + std::fmt::Debug> RecordSource for PrnReader<R> {
    fn read_record(&mut self) -> Result<Option<Record>> {
        PrnReader::read_record(self)
    }

    fn records_read(&self) -> Option<usize> {
        Some(self.records_read)
    }
}
