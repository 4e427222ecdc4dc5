//! A single field within a record: either an opaque control field or a
//! data field with indicators and an ordered list of subfields.
//!
//! Modeled as a tagged variant with two shapes rather than one struct
//! with optional, conditionally-meaningful attributes. The tag classifies
//! the field once, at construction, instead of every operation branching
//! on whether it's a control field.

use crate::sanitize::sanitize;
use smallvec::SmallVec;

/// Subfield indicator: separates subfields within a data field.
pub const SUBFIELD_INDICATOR: u8 = 0x1F;
/// Terminates a single field's byte representation.
pub const END_OF_FIELD: u8 = 0x1E;
/// Terminates a record's byte representation.
pub const END_OF_RECORD: u8 = 0x1D;

const SENTINEL_TAGS: [&str; 3] = ["DB ", "SYS", "LDR"];

/// A single `(code, value)` subfield pair. Order among subfields is
/// semantically significant and codes may repeat, so subfields are kept
/// as an ordered list rather than a map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subfield {
    /// The one-character subfield code.
    pub code: char,
    /// The subfield's text value.
    pub value: String,
}

impl Subfield {
    /// Construct a subfield from a code and value.
    #[must_use]
    pub fn new(code: char, value: impl Into<String>) -> Self {
        Self {
            code,
            value: value.into(),
        }
    }
}

/// A field: either a control field carrying opaque data, or a data field
/// carrying two indicators and an ordered subfield list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Field {
    /// A control-like field (tag numerically `< 010`, or a sentinel tag).
    Control {
        /// Three-character tag.
        tag: String,
        /// Opaque payload, with no internal structure.
        data: String,
    },
    /// A data field with two indicators and ordered subfields.
    Data {
        /// Three-character tag.
        tag: String,
        /// First indicator; blank when absent.
        ind1: char,
        /// Second indicator; blank when absent.
        ind2: char,
        /// Ordered `(code, value)` subfield pairs.
        subfields: SmallVec<[Subfield; 4]>,
    },
}

/// Right-justify `tag` into a three-character cell, as every constructor
/// requires before classifying it.
#[must_use]
pub fn normalize_tag(tag: &str) -> String {
    if tag.len() >= 3 {
        tag[tag.len() - 3..].to_string()
    } else {
        format!("{tag:>3}")
    }
}

/// Classify a normalized (three-character) tag as control-like per the
/// record model: three ASCII digits numerically less than `010`, or one
/// of the three sentinel strings `"DB "`, `"SYS"`, `"LDR"`.
#[must_use]
pub fn is_control_tag(tag: &str) -> bool {
    if SENTINEL_TAGS.contains(&tag) {
        return true;
    }
    tag.len() == 3 && tag.chars().all(|c| c.is_ascii_digit()) && tag < "010"
}

impl Field {
    /// Construct a control-like field. The tag is right-justified to
    /// three characters. `data` is stored verbatim, unsanitized; decoders
    /// use this to preserve exact round-trip bytes.
    #[must_use]
    pub fn control(tag: impl AsRef<str>, data: impl Into<String>) -> Self {
        Self::Control {
            tag: normalize_tag(tag.as_ref()),
            data: data.into(),
        }
    }

    /// Construct a data field with no subfields yet. Blank/absent
    /// indicators should be passed as `' '`.
    #[must_use]
    pub fn data(tag: impl AsRef<str>, ind1: char, ind2: char) -> Self {
        Self::Data {
            tag: normalize_tag(tag.as_ref()),
            ind1: if ind1 == '\0' { ' ' } else { ind1 },
            ind2: if ind2 == '\0' { ' ' } else { ind2 },
            subfields: SmallVec::new(),
        }
    }

    /// Construct a field, classifying it as control-like or data per the
    /// tag. Used by decoders, which already know which shape they want;
    /// prefer [`Field::control`]/[`Field::data`] when the shape is known
    /// up front.
    #[must_use]
    pub fn new(tag: impl AsRef<str>, ind1: char, ind2: char, data: Option<String>) -> Self {
        let tag = normalize_tag(tag.as_ref());
        if is_control_tag(&tag) {
            Self::Control {
                tag,
                data: data.unwrap_or_default(),
            }
        } else {
            Self::data(tag, ind1, ind2)
        }
    }

    /// The field's three-character tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::Control { tag, .. } | Self::Data { tag, .. } => tag,
        }
    }

    /// True iff this field classifies as control-like.
    #[must_use]
    pub fn is_control_field(&self) -> bool {
        matches!(self, Self::Control { .. })
    }

    /// Append `(code, sanitize(value))` to the subfield sequence. No-op on
    /// a control field.
    pub fn add_subfield(&mut self, code: char, value: impl Into<String>) {
        if let Self::Data { subfields, .. } = self {
            let value = sanitize(Some(&value.into())).unwrap_or_default();
            subfields.push(Subfield::new(code, value));
        }
    }

    /// Append a subfield without sanitizing. Used internally by the
    /// binary/dialect decoders to preserve exact round-trip bytes.
    pub fn push_subfield_raw(&mut self, code: char, value: impl Into<String>) {
        if let Self::Data { subfields, .. } = self {
            subfields.push(Subfield::new(code, value));
        }
    }

    /// Values of subfields whose code matches any of `codes`, in field
    /// order. With no codes given, returns every subfield's value.
    #[must_use]
    pub fn get_subfields(&self, codes: &[char]) -> Vec<&str> {
        match self {
            Self::Control { .. } => Vec::new(),
            Self::Data { subfields, .. } => subfields
                .iter()
                .filter(|sf| codes.is_empty() || codes.contains(&sf.code))
                .map(|sf| sf.value.as_str())
                .collect(),
        }
    }

    /// Iterate over `(code, value)` pairs in insertion order.
    pub fn iterate(&self) -> impl Iterator<Item = (char, &str)> {
        let subfields: &[Subfield] = match self {
            Self::Control { .. } => &[],
            Self::Data { subfields, .. } => subfields,
        };
        subfields.iter().map(|sf| (sf.code, sf.value.as_str()))
    }

    /// Binary (ISO 2709) representation of this field, including its
    /// trailing `END_OF_FIELD` terminator.
    #[must_use]
    pub fn as_binary(&self) -> Vec<u8> {
        let mut out = Vec::new();
        match self {
            Self::Control { data, .. } => {
                out.extend_from_slice(data.as_bytes());
            }
            Self::Data {
                ind1,
                ind2,
                subfields,
                ..
            } => {
                out.push(*ind1 as u8);
                out.push(*ind2 as u8);
                for sf in subfields {
                    out.push(SUBFIELD_INDICATOR);
                    out.push(sf.code as u8);
                    out.extend_from_slice(sf.value.as_bytes());
                }
            }
        }
        out.push(END_OF_FIELD);
        out
    }

    /// Slim-XML representation of this field (`<marc:controlfield>` or
    /// `<marc:datafield>`/`<marc:subfield>`).
    #[must_use]
    pub fn as_xml(&self) -> String {
        match self {
            Self::Control { tag, data } => {
                format!(
                    "<marc:controlfield tag=\"{tag}\">{}</marc:controlfield>",
                    sanitize(Some(data)).unwrap_or_default()
                )
            }
            Self::Data {
                tag,
                ind1,
                ind2,
                subfields,
            } => {
                let mut out = format!("<marc:datafield tag=\"{tag}\" ind1=\"{ind1}\" ind2=\"{ind2}\">");
                for sf in subfields {
                    let value = sanitize(Some(sf.value.trim())).unwrap_or_default();
                    out.push_str(&format!(
                        "<marc:subfield code=\"{}\">{value}</marc:subfield>",
                        sf.code
                    ));
                }
                out.push_str("</marc:datafield>");
                out
            }
        }
    }

    /// Mnemonic (TXT) line representation of this field.
    #[must_use]
    pub fn as_mnemonic(&self) -> String {
        match self {
            Self::Control { tag, data } => {
                format!("={tag}  {}", data.replace(' ', "#"))
            }
            Self::Data {
                tag,
                ind1,
                ind2,
                subfields,
            } => {
                let i1 = if *ind1 == ' ' { '#' } else { *ind1 };
                let i2 = if *ind2 == ' ' { '#' } else { *ind2 };
                let mut out = format!("={tag}  {i1}{i2} ");
                for sf in subfields {
                    out.push_str(&format!("${}{}", sf.code, sf.value));
                }
                out
            }
        }
    }
}
