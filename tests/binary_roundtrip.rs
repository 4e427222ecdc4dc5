//! End-to-end binary (ISO 2709) encode/decode fidelity.

use marc_interchange::{Field, Leader, MarcError, MarcReader, MarcWriter, Record};
use std::io::Cursor;

#[test]
fn s1_decodes_a_known_95_byte_record() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"00047cam a2200037 a 4500");
    bytes.extend_from_slice(b"001000900000");
    bytes.push(0x1E);
    bytes.extend_from_slice(b"ocm12345");
    bytes.push(0x1E);
    bytes.push(0x1D);

    let record = Record::from_binary(&bytes).unwrap();
    assert_eq!(record.all_fields().len(), 1);
    assert_eq!(record.identifier(), Some("ocm12345".to_string()));
}

#[test]
fn s2_encodes_a_title_field_with_expected_layout() {
    let mut record = Record::new(Leader::default());
    let mut field = Field::data("245", '1', '0');
    field.push_subfield_raw('a', "Title /");
    record.add_field(field);

    let bytes = record.as_binary().unwrap();

    // One directory entry: 12 bytes + END_OF_FIELD; leader is 24 bytes.
    let base_address = 24 + 12 + 1;
    assert_eq!(&bytes[24..27], b"245");
    let field_len: usize = std::str::from_utf8(&bytes[27..31]).unwrap().parse().unwrap();
    let field_offset: usize = std::str::from_utf8(&bytes[31..36]).unwrap().parse().unwrap();
    assert_eq!(field_offset, 0);

    let field_bytes = &bytes[base_address..base_address + field_len];
    assert_eq!(field_bytes, b"10\x1FaTitle /\x1E".as_slice());

    let record_length: usize = std::str::from_utf8(&bytes[0..5]).unwrap().parse().unwrap();
    assert_eq!(record_length, bytes.len());
    let base_address_in_leader: usize =
        std::str::from_utf8(&bytes[12..17]).unwrap().parse().unwrap();
    assert_eq!(base_address_in_leader, base_address);
}

#[test]
fn s6_directory_length_not_multiple_of_12_is_an_error() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"00050cam a2200024 a 4500");
    bytes.extend_from_slice(&[b'0'; 13]);
    bytes.push(0x1E);
    bytes.push(0x1D);

    let err = Record::from_binary(&bytes).unwrap_err();
    assert!(matches!(err, MarcError::Directory(_)));
}

#[test]
fn round_trip_preserves_leader_and_multiple_fields() {
    let mut record = Record::new(Leader::default());
    record.add_field(Field::control("001", "ocm99887766"));
    record.add_field(Field::control("008", "230101s2023    nyu           000 0 eng d"));
    let mut title = Field::data("245", '1', '0');
    title.push_subfield_raw('a', "Invariants of record keeping /");
    title.push_subfield_raw('c', "by A. Librarian.");
    record.add_field(title);
    let mut subject = Field::data("650", ' ', '0');
    subject.push_subfield_raw('a', "Cataloging");
    subject.push_subfield_raw('x', "Automation.");
    record.add_field(subject);

    let bytes = record.as_binary().unwrap();
    let decoded = Record::from_binary(&bytes).unwrap();

    assert_eq!(decoded.all_fields().len(), 4);
    assert_eq!(decoded.identifier(), Some("ocm99887766".to_string()));
    assert_eq!(&decoded.leader.as_str()[9..10], "a");
    assert_eq!(&decoded.leader.as_str()[10..12], "22");
    assert_eq!(&decoded.leader.as_str()[20..24], "4500");

    let record_length: usize = decoded.leader.as_str()[0..5].parse().unwrap();
    assert_eq!(record_length, bytes.len());

    match decoded.first("245").unwrap() {
        marc_interchange::Field::Data { subfields, .. } => {
            assert_eq!(subfields[0].value, "Invariants of record keeping /");
            assert_eq!(subfields[1].value, "by A. Librarian.");
        }
        marc_interchange::Field::Control { .. } => panic!("expected data field"),
    }
}

#[test]
fn directory_offsets_equal_cumulative_prior_lengths() {
    let mut record = Record::new(Leader::default());
    record.add_field(Field::control("001", "id1"));
    record.add_field(Field::control("003", "OCoLC"));
    let bytes = record.as_binary().unwrap();

    let directory = &bytes[24..24 + 24]; // two 12-byte entries
    let first_offset: usize = std::str::from_utf8(&directory[7..12]).unwrap().parse().unwrap();
    let first_len: usize = std::str::from_utf8(&directory[3..7]).unwrap().parse().unwrap();
    let second_offset: usize = std::str::from_utf8(&directory[19..24]).unwrap().parse().unwrap();

    assert_eq!(first_offset, 0);
    assert_eq!(second_offset, first_len);
}

#[test]
fn reader_and_writer_round_trip_through_a_byte_stream() {
    let mut record = Record::new(Leader::default());
    record.add_field(Field::control("001", "roundtrip1"));
    let mut field = Field::data("100", '1', ' ');
    field.add_subfield('a', "Author, Some.");
    record.add_field(field);

    let mut buffer = Vec::new();
    let mut writer = MarcWriter::new(&mut buffer);
    writer.write_record(&record).unwrap();
    writer.finish().unwrap();

    let mut reader = MarcReader::new(Cursor::new(buffer));
    let read_back = reader.read_record().unwrap().unwrap();
    assert_eq!(read_back.identifier(), Some("roundtrip1".to_string()));
    assert!(reader.read_record().unwrap().is_none());
}
