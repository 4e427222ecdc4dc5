//! Record leader: the 24-character header at the start of every record.
//!
//! # Structure
//!
//! - Positions 0-4: total record length (5 ASCII digits)
//! - Position 5: record status
//! - Position 6: record type
//! - Position 7: bibliographic level
//! - Position 8: control record type
//! - Position 9: character coding (forced to `a` on decode to declare Unicode)
//! - Positions 10-11: indicator/subfield-code counts (forced to `"22"`)
//! - Positions 12-16: base address of data (5 ASCII digits)
//! - Positions 17-19: encoding level, cataloging form, multipart level
//! - Positions 20-23: reserved (forced to `"4500"`)
//!
//! The leader is kept as a plain 24-character string rather than a field-by-field
//! struct: every codec treats it as a template whose length/base-address/index
//! positions get overwritten on each emission, not as validated metadata.

use crate::error::{MarcError, Result};

const LEADER_LEN: usize = 24;
const DEFAULT_LEADER: &str = "                        ";

/// The 24-character leader of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leader(String);

impl Leader {
    /// Build a leader from a string, padding with spaces or truncating to
    /// exactly 24 characters, then normalizing positions 9, 10-11, and 20-23
    /// the same way decode does.
    #[must_use]
    pub fn new(template: &str) -> Self {
        let mut leader = Self(pad_or_truncate(template));
        leader.normalize();
        leader
    }

    /// Decode a leader from the first 24 bytes of a record.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::Leader`] if `bytes` is shorter than 24 bytes or
    /// is not valid UTF-8.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < LEADER_LEN {
            return Err(MarcError::Leader(format!(
                "leader must be at least {LEADER_LEN} bytes, got {}",
                bytes.len()
            )));
        }
        let text = std::str::from_utf8(&bytes[..LEADER_LEN])
            .map_err(|e| MarcError::Leader(format!("leader is not valid UTF-8: {e}")))?;
        let mut leader = Self(text.to_string());
        leader.normalize();
        Ok(leader)
    }

    /// Force position 9 to `'a'`, positions 10-11 to `"22"`, and positions
    /// 20-23 to `"4500"`. Applied on every decode and on direct construction.
    fn normalize(&mut self) {
        self.set_range(9, "a");
        self.set_range(10, "22");
        self.set_range(20, "4500");
    }

    fn set_range(&mut self, start: usize, value: &str) {
        let mut chars: Vec<char> = self.0.chars().collect();
        for (i, c) in value.chars().enumerate() {
            chars[start + i] = c;
        }
        self.0 = chars.into_iter().collect();
    }

    /// Borrow the leader as a 24-character string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Parse the base address of data from positions 12-16 as ASCII decimal.
    ///
    /// # Errors
    ///
    /// Returns [`MarcError::BaseAddress`] if the digits are unparsable.
    pub fn base_address(&self) -> Result<i64> {
        let slice = &self.0[12..17];
        slice
            .trim()
            .parse::<i64>()
            .map_err(|_| MarcError::BaseAddress(format!("unparsable base address: {slice:?}")))
    }

    /// Render the leader for emission, with positions 0-4 and 12-16
    /// overwritten by the freshly computed `record_length`/`base_address`,
    /// per the formula `%05d(record_length) ++ leader[5:12] ++
    /// %05d(base_address) ++ leader[17:24]`.
    #[must_use]
    pub fn format_for_emission(&self, record_length: usize, base_address: usize) -> String {
        format!(
            "{:05}{}{:05}{}",
            record_length,
            &self.0[5..12],
            base_address,
            &self.0[17..24]
        )
    }
}

impl Default for Leader {
    fn default() -> Self {
        Self::new(DEFAULT_LEADER)
    }
}

fn pad_or_truncate(s: &str) -> String {
    let mut chars: Vec<char> = s.chars().collect();
    chars.resize(LEADER_LEN, ' ');
    chars.truncate(LEADER_LEN);
    chars.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_leader_is_normalized() {
        let leader = Leader::default();
        assert_eq!(leader.as_str().len(), 24);
        assert_eq!(&leader.as_str()[9..10], "a");
        assert_eq!(&leader.as_str()[10..12], "22");
        assert_eq!(&leader.as_str()[20..24], "4500");
    }

    #[test]
    fn from_bytes_forces_unicode_coding() {
        let leader = Leader::from_bytes(b"00095cam a2200037 a 4500").unwrap();
        assert_eq!(&leader.as_str()[9..10], "a");
        assert_eq!(&leader.as_str()[10..12], "22");
        assert_eq!(&leader.as_str()[20..24], "4500");
    }

    #[test]
    fn from_bytes_rejects_short_input() {
        assert!(Leader::from_bytes(b"too short").is_err());
    }

    #[test]
    fn base_address_parses_digits() {
        let leader = Leader::from_bytes(b"00095cam a2200037 a 4500").unwrap();
        assert_eq!(leader.base_address().unwrap(), 37);
    }

    #[test]
    fn format_for_emission_overwrites_length_and_base_address() {
        let leader = Leader::default();
        let formatted = leader.format_for_emission(57, 37);
        assert_eq!(&formatted[0..5], "00057");
        assert_eq!(&formatted[12..17], "00037");
        assert_eq!(formatted.len(), 24);
    }
}
