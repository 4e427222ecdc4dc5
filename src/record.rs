//! The in-memory record: a leader plus an ordered collection of fields.
//!
//! Fields are stored as a single flat, ordered `Vec<Field>` rather than a
//! tag-grouped map. The ordered-insertion invariant (see
//! [`Record::add_ordered_field`]) requires tracking the relative position
//! of non-numeric/sentinel tags interleaved with ascending numeric tags in
//! exactly the order the stream produced them; a tag-grouped collection
//! cannot express that interleaving.

use crate::binary;
use crate::error::Result;
use crate::field::Field;
use crate::leader::Leader;

/// An ordered collection of [`Field`]s plus a 24-character leader.
#[derive(Debug, Clone)]
pub struct Record {
    /// The record's leader.
    pub leader: Leader,
    fields: Vec<Field>,
}

impl Record {
    /// Construct an empty record with the given (or default) leader,
    /// normalized per the leader rules.
    #[must_use]
    pub fn new(leader: Leader) -> Self {
        Self {
            leader,
            fields: Vec::new(),
        }
    }

    /// Decode a record from its binary (ISO 2709) representation.
    ///
    /// # Errors
    ///
    /// Returns any of the binary decoder's structural error kinds (see
    /// [`crate::error::MarcError`]).
    pub fn from_binary(bytes: &[u8]) -> Result<Self> {
        binary::decode(bytes)
    }

    /// All fields, in storage order.
    #[must_use]
    pub fn all_fields(&self) -> &[Field] {
        &self.fields
    }

    /// Fields whose tag (case-insensitively) matches any of `tags`,
    /// preserving order. With no tags given, returns every field.
    #[must_use]
    pub fn get_fields(&self, tags: &[&str]) -> Vec<&Field> {
        self.fields
            .iter()
            .filter(|f| tags.is_empty() || tags.iter().any(|t| t.eq_ignore_ascii_case(f.tag())))
            .collect()
    }

    /// Append fields to the end, without reordering.
    pub fn add_field(&mut self, field: Field) {
        self.fields.push(field);
    }

    /// True iff any field has the given tag (case-insensitive).
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.fields.iter().any(|f| f.tag().eq_ignore_ascii_case(tag))
    }

    /// The first field with the given tag (case-insensitive), if any.
    #[must_use]
    pub fn first(&self, tag: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.tag().eq_ignore_ascii_case(tag))
    }

    /// Insert `field` per the ordered-insertion invariant:
    ///
    /// 1. If the record has no fields yet, or the new field's tag is not
    ///    three digits, append it.
    /// 2. Otherwise walk the list; insert immediately before the first
    ///    position at which either (a) a non-digit, non-sentinel tag is
    ///    encountered, or (b) the last-seen digit tag is numerically
    ///    greater than the new tag. Sentinel control-like tags are skipped
    ///    when tracking "last-seen digit tag".
    /// 3. If no such position is found, append at the end.
    pub fn add_ordered_field(&mut self, field: Field) {
        let tag = field.tag().to_string();
        let new_is_numeric = tag.len() == 3 && tag.chars().all(|c| c.is_ascii_digit());

        if self.fields.is_empty() || !new_is_numeric {
            self.fields.push(field);
            return;
        }

        let mut last_digit_tag: Option<String> = None;
        let mut insert_at = None;
        for (i, existing) in self.fields.iter().enumerate() {
            let existing_tag = existing.tag();
            let existing_is_numeric =
                existing_tag.len() == 3 && existing_tag.chars().all(|c| c.is_ascii_digit());

            if !existing_is_numeric && !is_sentinel(existing_tag) {
                insert_at = Some(i);
                break;
            }
            if existing_is_numeric {
                if let Some(last) = &last_digit_tag {
                    if last.as_str() > tag.as_str() {
                        insert_at = Some(i);
                        break;
                    }
                }
                last_digit_tag = Some(existing_tag.to_string());
            }
            // Sentinel tags are skipped for "last-seen digit tag" tracking.
        }

        match insert_at {
            Some(i) => self.fields.insert(i, field),
            None => self.fields.push(field),
        }
    }

    /// Emit this record's binary (ISO 2709) byte representation.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::MarcError::RecordWriting`] if the record
    /// cannot be laid out (e.g. exceeds addressable lengths).
    pub fn as_binary(&self) -> Result<Vec<u8>> {
        binary::encode(self)
    }

    /// Emit a single `<marc:record>` element, including the recomputed
    /// leader. Does not include the `<marc:collection>` wrapper, callers
    /// open/close that themselves.
    #[must_use]
    pub fn as_xml(&self) -> String {
        let (record_length, base_address) = binary::compute_lengths(self);
        let leader_str = self
            .leader
            .format_for_emission(record_length, base_address);
        let mut out = String::from("\n\t<marc:record>");
        out.push_str(&format!("\n\t\t<marc:leader>{leader_str}</marc:leader>"));
        for field in &self.fields {
            out.push_str("\n\t\t");
            out.push_str(&field.as_xml());
        }
        out.push_str("\n\t</marc:record>");
        out
    }

    /// Emit the mnemonic (TXT) representation: `=LDR  ` plus the
    /// recomputed leader, then each field's mnemonic line.
    #[must_use]
    pub fn as_mnemonic(&self) -> String {
        let (record_length, base_address) = binary::compute_lengths(self);
        let leader_str = self
            .leader
            .format_for_emission(record_length, base_address);
        let mut lines = vec![format!("=LDR  {leader_str}")];
        lines.extend(self.fields.iter().map(Field::as_mnemonic));
        lines.join("\n")
    }

    /// The data of the first `001` field with a leading `"CKEY"` literal
    /// stripped and surrounding whitespace removed, or `None` if absent.
    #[must_use]
    pub fn identifier(&self) -> Option<String> {
        let field = self.first("001")?;
        if let Field::Control { data, .. } = field {
            let trimmed = data.trim();
            let stripped = trimmed.strip_prefix("CKEY").unwrap_or(trimmed);
            Some(stripped.trim().to_string())
        } else {
            None
        }
    }
}

fn is_sentinel(tag: &str) -> bool {
    matches!(tag, "DB " | "SYS" | "LDR")
}
