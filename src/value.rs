//! The content of a value.
//!
//! This is a private module. Its public items are re-exported by the parent.

use bytes::{Bytes, BytesMut};
use crate::decode::ErrorKind;
use crate::int::Integer;
use crate::mode::Mode;
use crate::node::Node;
use crate::oid::Oid;
use crate::registry::Kind;
use crate::string::{BitString, Charset};


//------------ Value ---------------------------------------------------------

/// The decoded content of a value.
///
/// Which variant a value uses is determined by the [`Kind`] of its type.
/// Constructed values always hold their nested values, in order, including
/// a terminating end-of-contents value if they were encoded with
/// indefinite length.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Value {
    /// The empty content of the end-of-contents marker.
    EndOfContents,

    /// A boolean.
    Boolean(bool),

    /// An integer.
    Integer(Integer),

    /// The content octets of a bit string.
    BitString(BitString),

    /// The content octets of an octet string.
    ///
    /// These may be modified in place through [`Node::octets_mut`].
    OctetString(BytesMut),

    /// The empty content of a null value.
    Null,

    /// An object identifier.
    Oid(Oid),

    /// The text of a character string.
    Text(String),

    /// Content octets of a type without a more specific interpretation.
    Opaque(Bytes),

    /// The nested values of a constructed value.
    Constructed(Vec<Node>),
}

impl Value {
    /// Decodes the content octets of a primitive value of the given kind.
    ///
    /// Under DER, a boolean must be encoded as either 0x00 or 0xFF.
    pub fn decode_primitive(
        kind: Kind, content: Bytes, mode: Mode
    ) -> Result<Self, ErrorKind> {
        match kind {
            Kind::EndOfContents => {
                if !content.is_empty() {
                    return Err(ErrorKind::InvalidValue(
                        "end-of-contents with content"
                    ))
                }
                Ok(Value::EndOfContents)
            }
            Kind::Boolean => {
                match *content.as_ref() {
                    [octet] => {
                        let canonical = octet == 0 || octet == 0xFF;
                        if mode.is_restricted() && !canonical {
                            return Err(ErrorKind::InvalidValue(
                                "boolean must be 0x00 or 0xFF"
                            ))
                        }
                        Ok(Value::Boolean(octet != 0))
                    }
                    _ => {
                        Err(ErrorKind::InvalidValue(
                            "boolean content must be one octet"
                        ))
                    }
                }
            }
            Kind::Integer => {
                Integer::from_content(content).map(Value::Integer)
            }
            Kind::BitString => Ok(Value::BitString(BitString::new(content))),
            Kind::OctetString => {
                Ok(Value::OctetString(BytesMut::from(content.as_ref())))
            }
            Kind::Null => {
                if !content.is_empty() {
                    return Err(ErrorKind::InvalidValue("null with content"))
                }
                Ok(Value::Null)
            }
            Kind::Oid => Oid::from_content(content).map(Value::Oid),
            Kind::Text(charset) => charset.decode(&content).map(Value::Text),
            Kind::Opaque => Ok(Value::Opaque(content)),
            Kind::Sequence => {
                Err(ErrorKind::InvalidValue(
                    "constructed type in primitive encoding"
                ))
            }
        }
    }

    /// Checks that the value can be the content of a type of `kind`.
    ///
    /// Text must also be valid in the character set of the kind.
    pub fn check_kind(&self, kind: Kind) -> Result<(), ValueError> {
        let fits = match (self, kind) {
            (&Value::Text(ref text), Kind::Text(charset)) => {
                return charset.check(text)
            }
            (&Value::EndOfContents, Kind::EndOfContents)
            | (&Value::Boolean(_), Kind::Boolean)
            | (&Value::Integer(_), Kind::Integer)
            | (&Value::BitString(_), Kind::BitString)
            | (&Value::OctetString(_), Kind::OctetString)
            | (&Value::Null, Kind::Null)
            | (&Value::Oid(_), Kind::Oid)
            | (&Value::Opaque(_), Kind::Opaque)
            | (&Value::Constructed(_), Kind::Sequence) => true,
            _ => false
        };
        if fits {
            Ok(())
        }
        else {
            Err(ValueError::Shape("value doesn’t match the type of the tag"))
        }
    }

    /// Returns whether this is the content of a constructed value.
    pub fn is_constructed(&self) -> bool {
        matches!(*self, Value::Constructed(_))
    }

    /// Returns the length of the encoded content.
    pub fn encoded_len(&self) -> usize {
        match *self {
            Value::EndOfContents | Value::Null => 0,
            Value::Boolean(_) => 1,
            Value::Integer(ref inner) => inner.as_slice().len(),
            Value::BitString(ref inner) => inner.len(),
            Value::OctetString(ref inner) => inner.len(),
            Value::Oid(ref inner) => inner.as_slice().len(),
            Value::Text(ref inner) => inner.len(),
            Value::Opaque(ref inner) => inner.len(),
            Value::Constructed(ref inner) => {
                inner.iter().map(Node::encoded_len).sum()
            }
        }
    }

    /// Appends the encoded content to the end of `target`.
    ///
    /// Nested values are appended with their complete encoding, one after
    /// another.
    pub fn append_encoded(&self, target: &mut Vec<u8>) {
        match *self {
            Value::EndOfContents | Value::Null => { }
            Value::Boolean(false) => target.push(0x00),
            Value::Boolean(true) => target.push(0xFF),
            Value::Integer(ref inner) => {
                target.extend_from_slice(inner.as_slice())
            }
            Value::BitString(ref inner) => {
                target.extend_from_slice(inner.as_slice())
            }
            Value::OctetString(ref inner) => target.extend_from_slice(inner),
            Value::Oid(ref inner) => {
                target.extend_from_slice(inner.as_slice())
            }
            Value::Text(ref inner) => {
                target.extend_from_slice(inner.as_bytes())
            }
            Value::Opaque(ref inner) => target.extend_from_slice(inner),
            Value::Constructed(ref inner) => {
                for node in inner {
                    node.append_encoded(target)
                }
            }
        }
    }
}


//------------ ValueError ----------------------------------------------------

/// A value could not be created from the data given.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ValueError {
    /// The text contains characters outside the character set.
    #[error("text is not valid {0}")]
    Charset(Charset),

    /// The arcs do not form a valid object identifier.
    #[error("invalid object identifier: {0}")]
    Oid(&'static str),

    /// The content doesn’t fit the identifier octets.
    #[error("{0}")]
    Shape(&'static str),

    /// The content octets aren’t valid for the type of the tag.
    #[error("invalid content: {0}")]
    Content(ErrorKind),
}


//============ Tests =========================================================
