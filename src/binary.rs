//! The ISO 2709 binary codec: directory-based leader/field layout encode
//! and decode, operating purely over [`Record`]/[`Field`] values.

use crate::error::{MarcError, Result};
use crate::field::{is_control_tag, normalize_tag, Field, END_OF_FIELD, END_OF_RECORD, SUBFIELD_INDICATOR};
use crate::leader::Leader;
use crate::record::Record;

const DIRECTORY_ENTRY_LEN: usize = 12;
const LEADER_LEN: usize = 24;

/// Format a tag for a directory entry: three zero-padded digits if the
/// (already-normalized) tag is numeric, otherwise right-justified as-is.
fn directory_tag(tag: &str) -> String {
    let tag = normalize_tag(tag);
    if tag.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(n) = tag.trim().parse::<u32>() {
            return format!("{n:03}");
        }
    }
    tag
}

/// Compute `(record_length, base_address)` for `record` as they would be
/// after a full [`encode`] pass, without allocating the encoded bytes.
/// Used by the XML/mnemonic emitters, which embed the same recomputed
/// leader fields as the binary codec.
#[must_use]
pub fn compute_lengths(record: &Record) -> (usize, usize) {
    let field_count = record.all_fields().len();
    let directory_len = field_count * DIRECTORY_ENTRY_LEN + 1; // + END_OF_FIELD
    let base_address = LEADER_LEN + directory_len;
    let fields_len: usize = record
        .all_fields()
        .iter()
        .map(|f| f.as_binary().len())
        .sum::<usize>()
        + 1; // + END_OF_RECORD
    (base_address + fields_len, base_address)
}

/// Encode `record` to its ISO 2709 byte representation.
///
/// # Errors
///
/// Returns [`MarcError::RecordWriting`] if the computed lengths cannot be
/// represented in the five-digit decimal fields the format requires.
pub fn encode(record: &Record) -> Result<Vec<u8>> {
    let mut directory = Vec::new();
    let mut fields_bytes = Vec::new();
    let mut offset = 0usize;

    for field in record.all_fields() {
        let field_bytes = field.as_binary();
        let tag = directory_tag(field.tag());
        let length = field_bytes.len();

        if length > 9999 || offset > 99999 {
            return Err(MarcError::RecordWriting(format!(
                "field {tag} exceeds directory entry capacity"
            )));
        }

        directory.extend_from_slice(tag.as_bytes());
        directory.extend_from_slice(format!("{length:04}").as_bytes());
        directory.extend_from_slice(format!("{offset:05}").as_bytes());

        fields_bytes.extend_from_slice(&field_bytes);
        offset += length;
    }
    directory.push(END_OF_FIELD);
    fields_bytes.push(END_OF_RECORD);

    let base_address = LEADER_LEN + directory.len();
    let record_length = base_address + fields_bytes.len();

    if record_length > 99999 || base_address > 99999 {
        return Err(MarcError::RecordWriting(
            "record exceeds the five-digit length/base-address capacity".to_string(),
        ));
    }

    let leader_str = record
        .leader
        .format_for_emission(record_length, base_address);

    let mut out = Vec::with_capacity(record_length);
    out.extend_from_slice(leader_str.as_bytes());
    out.extend_from_slice(&directory);
    out.extend_from_slice(&fields_bytes);
    Ok(out)
}

/// Decode a single record from its ISO 2709 byte representation.
///
/// # Errors
///
/// Returns the matching structural [`MarcError`] variant for the first
/// violation encountered: `RecordLength`, `Leader`, `BaseAddress`,
/// `BaseAddressLength`, `Directory`, or `Fields`.
pub fn decode(bytes: &[u8]) -> Result<Record> {
    if bytes.len() < 5 {
        return Err(MarcError::RecordLength(format!(
            "need at least 5 bytes for the record-length header, got {}",
            bytes.len()
        )));
    }
    let length_str = std::str::from_utf8(&bytes[0..5])
        .map_err(|e| MarcError::RecordLength(format!("length header is not ASCII: {e}")))?;
    let record_length: usize = length_str
        .parse()
        .map_err(|_| MarcError::RecordLength(format!("unparsable record length: {length_str:?}")))?;

    if bytes.len() < LEADER_LEN {
        return Err(MarcError::Leader(format!(
            "need at least {LEADER_LEN} bytes for the leader, got {}",
            bytes.len()
        )));
    }
    let leader = Leader::from_bytes(&bytes[..LEADER_LEN])?;

    let base_address = leader.base_address()?;
    if base_address <= 0 {
        return Err(MarcError::BaseAddress(format!(
            "base address must be positive, got {base_address}"
        )));
    }
    let base_address = base_address as usize;
    if base_address >= record_length {
        return Err(MarcError::BaseAddressLength(format!(
            "base address {base_address} is at or beyond record length {record_length}"
        )));
    }

    let end = record_length.min(bytes.len());
    let record_bytes = &bytes[..end];

    let directory_end = base_address - 1; // exclude trailing END_OF_FIELD
    if directory_end < LEADER_LEN || directory_end > record_bytes.len() {
        return Err(MarcError::Directory(
            "directory region falls outside the record".to_string(),
        ));
    }
    let directory = &record_bytes[LEADER_LEN..directory_end];
    if directory.len() % DIRECTORY_ENTRY_LEN != 0 {
        return Err(MarcError::Directory(format!(
            "directory length {} is not a multiple of {DIRECTORY_ENTRY_LEN}",
            directory.len()
        )));
    }

    let mut record = Record::new(leader);
    for entry in directory.chunks_exact(DIRECTORY_ENTRY_LEN) {
        let tag = String::from_utf8_lossy(&entry[0..3]).to_string();
        let field_length: usize = std::str::from_utf8(&entry[3..7])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| MarcError::Directory(format!("unparsable field length in {entry:?}")))?;
        let field_offset: usize = std::str::from_utf8(&entry[7..12])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| MarcError::Directory(format!("unparsable field offset in {entry:?}")))?;

        let start = base_address + field_offset;
        let stop = start + field_length;
        if stop > record_bytes.len() || field_length == 0 {
            continue;
        }
        // Exclude the trailing END_OF_FIELD byte from the slice.
        let slice = &record_bytes[start..stop - 1];
        record.add_field(decode_field(&tag, slice));
    }

    if record.all_fields().is_empty() {
        return Err(MarcError::Fields(
            "no fields were recovered from the directory".to_string(),
        ));
    }

    Ok(record)
}

fn decode_field(tag: &str, slice: &[u8]) -> Field {
    if is_control_tag(tag) {
        return Field::control(tag, String::from_utf8_lossy(slice).to_string());
    }

    let mut parts = slice.split(|&b| b == SUBFIELD_INDICATOR);
    let indicators = parts.next().unwrap_or(&[]);
    let ind1 = indicators.first().copied().map(char::from).unwrap_or(' ');
    let ind2 = indicators.get(1).copied().map(char::from).unwrap_or(' ');

    let mut field = Field::data(tag, ind1, ind2);
    for part in parts {
        if part.is_empty() {
            continue;
        }
        let code = part[0] as char;
        match std::str::from_utf8(&part[1..]) {
            Ok(value) => field.push_subfield_raw(code, value.to_string()),
            Err(_) => continue, // malformed subfield: skipped, not fatal
        }
    }
    field
}
