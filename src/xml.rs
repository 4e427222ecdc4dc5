//! The slim-MARCXML collection wrapper: the prolog and epilogue a caller
//! wraps around a stream of [`crate::record::Record::as_xml`] output.
//!
//! Per-field and per-record serialization lives on [`crate::field::Field`]
//! and [`crate::record::Record`] directly; this module holds only the
//! collection-level framing, since it has no per-record state of its own.

/// XML declaration plus opening `<marc:collection>` tag, with the
/// standard MARCXML namespace and schema location.
pub const COLLECTION_PROLOG: &str = concat!(
    "<?xml version=\"1.0\" encoding=\"UTF-8\" ?>\n",
    "<marc:collection xmlns:marc=\"http://www.loc.gov/MARC21/slim\" ",
    "xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\" ",
    "xsi:schemaLocation=\"http://www.loc.gov/MARC21/slim ",
    "http://www.loc.gov/standards/marcxml/schema/MARC21slim.xsd\">",
);

/// Closing `</marc:collection>` tag.
pub const COLLECTION_EPILOGUE: &str = "\n</marc:collection>\n";

/// Wrap a sequence of already-rendered `Record::as_xml()` fragments in the
/// collection prolog/epilogue, producing one complete XML document.
#[must_use]
pub fn wrap_collection<I, S>(records: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::from(COLLECTION_PROLOG);
    for record in records {
        out.push_str(record.as_ref());
    }
    out.push_str(COLLECTION_EPILOGUE);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use crate::leader::Leader;
    use crate::record::Record;

    #[test]
    fn wrap_collection_frames_records_between_prolog_and_epilogue() {
        let mut record = Record::new(Leader::default());
        record.add_field(Field::control("001", "ocm1"));

        let doc = wrap_collection([record.as_xml()]);
        assert!(doc.starts_with(COLLECTION_PROLOG));
        assert!(doc.ends_with(COLLECTION_EPILOGUE));
        assert!(doc.contains("<marc:controlfield tag=\"001\">ocm1</marc:controlfield>"));
    }

    #[test]
    fn wrap_collection_handles_empty_input() {
        let doc = wrap_collection(Vec::<String>::new());
        assert_eq!(doc, format!("{COLLECTION_PROLOG}{COLLECTION_EPILOGUE}"));
    }
}
