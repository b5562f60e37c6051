//! Decoding and encoding of BER and DER data as a tree of values.
//!
//! Data encoded in the Basic Encoding Rules of ASN.1 is decoded into a
//! [`Node`] without knowing the structure of the data in advance. The type
//! of each value is determined from its identifier octets alone through the
//! [`Registry`]: universal types such as INTEGER, OBJECT IDENTIFIER, or the
//! string types are decoded into their natural representation, anything
//! else is kept as a sequence of nested values or as opaque content octets.
//!
//! A node encodes back into data. For data that follows the Distinguished
//! Encoding Rules, the result is identical to the original data:
//!
//! ```
//! let data = b"\x30\x06\x02\x01\x05\x01\x01\xFF";
//! let node = bertree::parse(data).unwrap();
//! assert_eq!(node.children()[0].as_integer().unwrap().to_i64(), Some(5));
//! assert_eq!(node.children()[1].as_bool(), Some(true));
//! assert_eq!(node.to_bytes(), data);
//! ```
//!
//! Values encoded with indefinite length keep their end-of-contents marker
//! as the last nested node and are encoded in indefinite form again.
//!
//! Nodes can also be created from scratch:
//!
//! ```
//! use bertree::Node;
//!
//! let node = Node::sequence(vec![Node::integer(1), Node::null()]);
//! assert_eq!(node.to_bytes(), b"\x30\x03\x02\x01\x01\x05\x00");
//! ```
//!
//! [`Decoder`] offers control over the encoding rules accepted and the
//! depth of nesting allowed.

pub use self::decode::{DecodeError, Decoder, ErrorKind, ReadError};
pub use self::header::Header;
pub use self::ident::{Class, FirstOctet, Ident, Tag};
pub use self::int::Integer;
pub use self::length::Length;
pub use self::mode::Mode;
pub use self::node::Node;
pub use self::oid::{Arcs, Oid};
pub use self::registry::{Descriptor, Kind, Registry};
pub use self::string::{BitString, Charset};
pub use self::value::{Value, ValueError};

pub mod decode;
pub mod string;
pub mod varint;

mod header;
mod ident;
mod int;
mod length;
mod mode;
mod node;
mod oid;
mod registry;
mod value;


//------------ Functions -----------------------------------------------------

/// Decodes the value at the start of `source`.
///
/// The data is decoded under BER rules with the default nesting limit.
/// Any data following the value is ignored.
pub fn parse(source: impl decode::IntoSource) -> Result<Node, DecodeError> {
    Decoder::new(Mode::Ber).decode(source)
}

/// Reads all data from `reader` and decodes the value at its start.
pub fn parse_reader(reader: impl std::io::Read) -> Result<Node, ReadError> {
    Decoder::new(Mode::Ber).decode_reader(reader)
}
