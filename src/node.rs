//! The tree of decoded values.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::io;
use bytes::{Bytes, BytesMut};
use crate::header::Header;
use crate::ident::{Class, Ident, Tag};
use crate::int::Integer;
use crate::length::Length;
use crate::mode::Mode;
use crate::oid::Oid;
use crate::registry::{Kind, Registry};
use crate::string::BitString;
use crate::value::{Value, ValueError};


//------------ Node ----------------------------------------------------------

/// A single value together with its identifier octets.
///
/// A node is either the result of decoding data, in which case it remembers
/// the length of its header and of its complete encoding as they were found
/// in the data, or it is created from a value through one of the
/// constructor functions, in which case these lengths are calculated when
/// needed.
///
/// Constructed nodes own their nested nodes. If a node was decoded from the
/// indefinite length form, the last nested node is the end-of-contents
/// marker. Encoding such a node again produces the indefinite length form.
///
/// Two nodes are equal if their identifiers and values are equal. How they
/// were encoded does not matter.
#[derive(Clone, Debug)]
pub struct Node {
    ident: Ident,
    value: Value,

    /// Header length and total length as decoded.
    extent: Option<(usize, usize)>,

    indefinite: bool,
}

/// # Creation
///
impl Node {
    /// Creates a node from an identifier and a value.
    ///
    /// Fails if a constructed identifier is given a primitive value or vice
    /// versa, or if the value doesn’t match the type the identifier decodes
    /// as. Values of unknown primitive types must be opaque.
    pub fn new(ident: Ident, value: Value) -> Result<Self, ValueError> {
        if ident.is_constructed() != value.is_constructed() {
            return Err(ValueError::Shape(
                if ident.is_constructed() {
                    "constructed identifier with primitive value"
                }
                else {
                    "primitive identifier with constructed value"
                }
            ))
        }
        value.check_kind(Registry::describe(ident).kind())?;
        Ok(Self::from_parts(ident, value))
    }

    fn from_parts(ident: Ident, value: Value) -> Self {
        Node { ident, value, extent: None, indefinite: false }
    }

    pub(crate) fn decoded(
        ident: Ident,
        value: Value,
        header_len: usize,
        total_len: usize,
        indefinite: bool,
    ) -> Self {
        Node {
            ident, value,
            extent: Some((header_len, total_len)),
            indefinite
        }
    }

    /// Creates a BOOLEAN.
    pub fn boolean(value: bool) -> Self {
        Self::from_parts(Ident::primitive(Tag::BOOLEAN), Value::Boolean(value))
    }

    /// Creates an INTEGER.
    pub fn integer(value: impl Into<Integer>) -> Self {
        Self::from_parts(
            Ident::primitive(Tag::INTEGER), Value::Integer(value.into())
        )
    }

    /// Creates a NULL.
    pub fn null() -> Self {
        Self::from_parts(Ident::primitive(Tag::NULL), Value::Null)
    }

    /// Creates an OBJECT IDENTIFIER.
    pub fn oid(value: Oid) -> Self {
        Self::from_parts(Ident::primitive(Tag::OID), Value::Oid(value))
    }

    /// Creates an OCTET STRING with a copy of the given octets.
    pub fn octet_string(value: impl AsRef<[u8]>) -> Self {
        Self::from_parts(
            Ident::primitive(Tag::OCTET_STRING),
            Value::OctetString(BytesMut::from(value.as_ref()))
        )
    }

    /// Creates a BIT STRING.
    pub fn bit_string(value: BitString) -> Self {
        Self::from_parts(
            Ident::primitive(Tag::BIT_STRING), Value::BitString(value)
        )
    }

    /// Creates a character string with the given tag.
    ///
    /// The tag must be that of a known string type and the text must be
    /// valid in its character set. Use [`primitive`][Self::primitive] for
    /// text under any other tag.
    pub fn text(
        tag: Tag, text: impl Into<String>
    ) -> Result<Self, ValueError> {
        let ident = Ident::primitive(tag);
        let charset = match Registry::describe(ident).kind() {
            Kind::Text(charset) => charset,
            _ => return Err(ValueError::Shape("not a string type")),
        };
        let text = text.into();
        charset.check(&text)?;
        Ok(Self::from_parts(ident, Value::Text(text)))
    }

    /// Creates a SEQUENCE from its elements.
    pub fn sequence(children: Vec<Node>) -> Self {
        Self::constructed(Tag::SEQUENCE, children)
    }

    /// Creates a SET from its elements.
    ///
    /// The elements are kept in the order given.
    pub fn set(children: Vec<Node>) -> Self {
        Self::constructed(Tag::SET, children)
    }

    /// Creates a constructed value with any tag.
    pub fn constructed(tag: Tag, children: Vec<Node>) -> Self {
        Self::from_parts(Ident::constructed(tag), Value::Constructed(children))
    }

    /// Creates a primitive value with any tag from its content octets.
    ///
    /// The octets are decoded the same way the decoder would decode them
    /// under BER. Fails if they aren’t valid content for the tag’s type.
    pub fn primitive(
        tag: Tag, content: impl Into<Bytes>
    ) -> Result<Self, ValueError> {
        let ident = Ident::primitive(tag);
        let value = Value::decode_primitive(
            Registry::describe(ident).kind(), content.into(), Mode::Ber
        ).map_err(ValueError::Content)?;
        Ok(Self::from_parts(ident, value))
    }

    /// Creates the end-of-contents marker.
    pub fn end_of_contents() -> Self {
        Self::from_parts(Ident::END_OF_CONTENTS, Value::EndOfContents)
    }

    /// Converts a constructed node into one encoded with indefinite length.
    ///
    /// An end-of-contents marker is appended to the nested nodes unless the
    /// last of them already is one. Fails for primitive nodes.
    pub fn into_indefinite(mut self) -> Result<Self, ValueError> {
        let children = match self.value {
            Value::Constructed(ref mut children) => children,
            _ => {
                return Err(ValueError::Shape(
                    "indefinite length requires a constructed value"
                ))
            }
        };
        if !children.last().map(Node::is_end_of_contents).unwrap_or(false) {
            children.push(Node::end_of_contents())
        }
        self.indefinite = true;
        self.extent = None;
        Ok(self)
    }
}

/// # Access to the content
///
impl Node {
    /// Returns the identifier octets.
    pub fn ident(&self) -> Ident {
        self.ident
    }

    /// Returns the tag.
    pub fn tag(&self) -> Tag {
        self.ident.tag()
    }

    /// Returns the class of the tag.
    pub fn class(&self) -> Class {
        self.ident.class()
    }

    /// Returns whether this is a constructed value.
    pub fn is_constructed(&self) -> bool {
        self.ident.is_constructed()
    }

    /// Returns whether this is the end-of-contents marker.
    pub fn is_end_of_contents(&self) -> bool {
        self.ident == Ident::END_OF_CONTENTS
    }

    /// Returns the value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Converts the node into its value.
    pub fn into_value(self) -> Value {
        self.value
    }

    /// Returns the nested nodes.
    ///
    /// This is empty for a primitive node.
    pub fn children(&self) -> &[Node] {
        match self.value {
            Value::Constructed(ref inner) => inner.as_slice(),
            _ => &[]
        }
    }

    /// Returns mutable access to the nested nodes.
    ///
    /// Returns `None` for a primitive node. As with
    /// [`octets_mut`][Self::octets_mut], the node then reports the lengths
    /// of its current content. Removing the end-of-contents marker of an
    /// indefinite length node results in an invalid encoding.
    pub fn children_mut(&mut self) -> Option<&mut Vec<Node>> {
        match self.value {
            Value::Constructed(ref mut inner) => {
                self.extent = None;
                Some(inner)
            }
            _ => None
        }
    }

    /// Returns the value of a BOOLEAN node.
    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            Value::Boolean(inner) => Some(inner),
            _ => None
        }
    }

    /// Returns the value of an INTEGER node.
    pub fn as_integer(&self) -> Option<&Integer> {
        match self.value {
            Value::Integer(ref inner) => Some(inner),
            _ => None
        }
    }

    /// Returns the object identifier of an OBJECT IDENTIFIER node.
    pub fn as_oid(&self) -> Option<&Oid> {
        match self.value {
            Value::Oid(ref inner) => Some(inner),
            _ => None
        }
    }

    /// Returns the text of a character string.
    pub fn as_str(&self) -> Option<&str> {
        match self.value {
            Value::Text(ref inner) => Some(inner.as_str()),
            _ => None
        }
    }

    /// Returns the content octets of a string or opaque value.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self.value {
            Value::BitString(ref inner) => Some(inner.as_slice()),
            Value::OctetString(ref inner) => Some(inner.as_ref()),
            Value::Opaque(ref inner) => Some(inner.as_ref()),
            _ => None
        }
    }

    /// Returns mutable access to the content of an OCTET STRING.
    ///
    /// After calling this, the node reports the lengths of its current
    /// content rather than those it was decoded with.
    pub fn octets_mut(&mut self) -> Option<&mut BytesMut> {
        match self.value {
            Value::OctetString(ref mut inner) => {
                self.extent = None;
                Some(inner)
            }
            _ => None
        }
    }
}

/// # Lengths
///
impl Node {
    /// Returns whether the node uses the indefinite length form.
    pub fn is_indefinite(&self) -> bool {
        self.indefinite
    }

    /// Returns the length of the header.
    ///
    /// For a decoded node, this is the number of octets the header took up
    /// in the data.
    pub fn header_len(&self) -> usize {
        match self.extent {
            Some((header_len, _)) => header_len,
            None => self.header().encoded_len()
        }
    }

    /// Returns the length of header and content.
    ///
    /// For a decoded node, this is the number of octets taken up in the
    /// data, including the end-of-contents marker of an indefinite length
    /// value.
    pub fn total_len(&self) -> usize {
        match self.extent {
            Some((_, total_len)) => total_len,
            None => self.encoded_len()
        }
    }

    /// Returns the length of the node’s encoding.
    ///
    /// This is always calculated from the current content and may differ
    /// from [`total_len`][Self::total_len] for data that didn’t use the
    /// shortest length octets.
    pub fn encoded_len(&self) -> usize {
        let content_len = self.value.encoded_len();
        self.header_for(content_len).encoded_len() + content_len
    }

    fn header(&self) -> Header {
        self.header_for(self.value.encoded_len())
    }

    fn header_for(&self, content_len: usize) -> Header {
        Header::new(
            self.ident,
            if self.indefinite {
                Length::INDEFINITE
            }
            else {
                Length::definite(content_len)
            }
        )
    }
}

/// # Encoding
///
impl Node {
    /// Appends the encoded node to the end of `target`.
    pub fn append_encoded(&self, target: &mut Vec<u8>) {
        self.header().append_encoded(target);
        self.value.append_encoded(target);
    }

    /// Returns the encoded node.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut res = Vec::with_capacity(self.encoded_len());
        self.append_encoded(&mut res);
        res
    }

    /// Writes the encoded node to a writer.
    pub fn write_encoded<W: io::Write>(
        &self, target: &mut W
    ) -> Result<(), io::Error> {
        target.write_all(&self.to_bytes())
    }
}


//--- PartialEq and Eq

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.ident == other.ident && self.value == other.value
    }
}

impl Eq for Node { }


//============ Tests =========================================================
