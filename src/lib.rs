//! A library for reading and writing bibliographic catalog records in
//! four interchangeable surfaces: the binary ISO 2709 record format, a
//! slim MARCXML representation, and two vendor export dialects (a
//! line-oriented PRN/XML-ish dialect and a mnemonic TXT dialect).
//!
//! The [`record::Record`]/[`field::Field`] pair is the single in-memory
//! canonical form. All four codecs are pure functions or streaming
//! readers over it; callers convert among the surfaces by decoding with
//! one and encoding with another.
//!
//! ## Quick start
//!
//! ### Reading binary MARC
//!
//! ```no_run
//! use marc_interchange::MarcReader;
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let file = File::open("records.mrc")?;
//! let mut reader = MarcReader::new(file);
//!
//! while let Some(record) = reader.read_record()? {
//!     println!("{:?}", record.identifier());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ### Building and writing a record
//!
//! ```
//! use marc_interchange::{Field, Leader, MarcWriter, Record};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut record = Record::new(Leader::default());
//! record.add_field(Field::control("001", "12345"));
//!
//! let mut title = Field::data("245", '1', '0');
//! title.add_subfield('a', "The Great Gatsby");
//! record.add_ordered_field(title);
//!
//! let mut buffer = Vec::new();
//! let mut writer = MarcWriter::new(&mut buffer);
//! writer.write_record(&record)?;
//! writer.finish()?;
//! # Ok(())
//! # }
//! ```
//!
//! ### Streaming a vendor export dialect
//!
//! ```no_run
//! use marc_interchange::{PrnReader, TxtReader};
//! use std::io::BufReader;
//! use std::fs::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut prn = PrnReader::new(BufReader::new(File::open("export.prn")?));
//! while let Some(record) = prn.read_record()? {
//!     println!("{}", record.as_xml());
//! }
//!
//! let mut txt = TxtReader::new(BufReader::new(File::open("export.txt")?));
//! while let Some(record) = txt.read_record()? {
//!     println!("{}", record.as_mnemonic());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`leader`]: the 24-character record leader.
//! - [`field`]: [`Field`], a two-shape tagged enum (control/data), and [`Subfield`].
//! - [`record`]: [`Record`], the ordered field collection, the
//!   ordered-insertion invariant, and binary/XML/mnemonic emission.
//! - [`binary`]: the ISO 2709 encode/decode engine.
//! - [`reader`] / [`writer`]: length-prefixed binary framing over a byte stream.
//! - [`xml`]: the slim-MARCXML collection prolog/epilogue.
//! - [`sanitize`]: the C0/C1-stripping, HTML-entity-normalizing text sanitizer.
//! - [`boundary`]: the shared boundary-line-scan abstraction behind the
//!   three streaming dialect readers.
//! - [`prn`], [`txt`], [`xml_reader`]: the PRN, TXT mnemonic, and slim-XML
//!   streaming dialect readers.
//! - [`file`]: file-extension classification and existence-check collaborator.
//! - [`formats`]: the [`formats::RecordSource`]/[`formats::RecordSink`]
//!   contract shared by every reader/writer.
//! - [`error`]: the [`MarcError`] taxonomy and [`Result`] alias.

#![warn(missing_docs)]

pub mod binary;
pub mod boundary;
pub mod error;
pub mod field;
pub mod file;
pub mod formats;
pub mod leader;
pub mod prn;
pub mod reader;
pub mod record;
pub mod sanitize;
pub mod txt;
pub mod writer;
pub mod xml;
pub mod xml_reader;

pub use error::{MarcError, Result};
pub use field::{Field, Subfield};
pub use file::{classify, ClassifiedPath, FailHandler, FileKind, FileRole, TerminateOnFailure};
pub use formats::{RecordSink, RecordSource, RecordSourceExt};
pub use leader::Leader;
pub use prn::PrnReader;
pub use reader::MarcReader;
pub use record::Record;
pub use sanitize::sanitize;
pub use txt::TxtReader;
pub use writer::MarcWriter;
pub use xml::{wrap_collection, COLLECTION_EPILOGUE, COLLECTION_PROLOG};
pub use xml_reader::XmlDialectReader;
