//! The identifier octets of a BER encoded value.
//!
//! This is a private module. The relevant items are re-exported by the
//! parent.

use std::fmt;
use crate::decode::{DecodeError, ErrorKind, Source};
use crate::varint;


//------------ Tag -----------------------------------------------------------

/// The tag of a value.
///
/// In ASN.1, tags are used to identify the type of a value. Tags consist of
/// one of four classes, represented by the [`Class`] enum, and a number
/// within this class. The number is an unsigned integer.
///
/// In BER encoding, the tag becomes part of the identifier octets by
/// combining it with a bit indicating whether a value is primitive or
/// constructed. This combination is represented by [`Ident`].
///
/// # Limitations
///
/// We only support tag numbers that fit into a `u64`.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Tag {
    class: Class,
    number: u64,
}

impl Tag {
    /// Creates a tag from a class and number.
    pub const fn new(class: Class, number: u64) -> Self {
        Tag { class, number }
    }

    /// Creates a new tag in the universal class.
    pub const fn universal(number: u64) -> Self {
        Self::new(Class::Universal, number)
    }

    /// Creates a new tag in the application class.
    pub const fn application(number: u64) -> Self {
        Self::new(Class::Application, number)
    }

    /// Creates a new tag in class “context specific” with the given number.
    pub const fn ctx(number: u64) -> Self {
        Self::new(Class::Context, number)
    }

    /// Creates a new tag in the private class.
    pub const fn private(number: u64) -> Self {
        Self::new(Class::Private, number)
    }

    /// Returns the class of the tag.
    pub const fn class(self) -> Class {
        self.class
    }

    /// Returns the number of the tag.
    pub const fn number(self) -> u64 {
        self.number
    }

    /// Returns the universal type name of the tag if it has one.
    pub fn name(self) -> Option<&'static str> {
        if self.class != Class::Universal {
            return None
        }
        let res = match self.number {
            0 => "END-OF-CONTENTS",
            1 => "BOOLEAN",
            2 => "INTEGER",
            3 => "BIT STRING",
            4 => "OCTET STRING",
            5 => "NULL",
            6 => "OBJECT IDENTIFIER",
            7 => "ObjectDescriptor",
            8 => "EXTERNAL",
            9 => "REAL",
            10 => "ENUMERATED",
            11 => "EMBEDDED PDV",
            12 => "UTF8String",
            13 => "RELATIVE-OID",
            14 => "TIME",
            16 => "SEQUENCE",
            17 => "SET",
            18 => "NumericString",
            19 => "PrintableString",
            20 => "TeletexString",
            21 => "VideotexString",
            22 => "IA5String",
            23 => "UTCTime",
            24 => "GeneralizedTime",
            25 => "GraphicString",
            26 => "VisibleString",
            27 => "GeneralString",
            28 => "UniversalString",
            29 => "CHARACTER STRING",
            30 => "BMPString",
            _ => return None
        };
        Some(res)
    }
}

/// # Constants for universal tags.
///
/// See clause 8.4 of ITU Recommendation X.690.
///
impl Tag {
    /// The tag marking the end of an indefinite length value, UNIVERSAL 0.
    pub const END_OF_CONTENTS: Self = Self::universal(0);

    /// The tag for the BOOLEAN type, UNIVERSAL 1.
    pub const BOOLEAN: Self = Self::universal(1);

    /// The tag for the INTEGER type, UNIVERSAL 2.
    pub const INTEGER: Self = Self::universal(2);

    /// The tag for the BIT STRING type, UNIVERSAL 3.
    pub const BIT_STRING: Self = Self::universal(3);

    /// The tag for the OCTET STRING type, UNIVERSAL 4.
    pub const OCTET_STRING: Self = Self::universal(4);

    /// The tag for the NULL type, UNIVERSAL 5.
    pub const NULL: Self = Self::universal(5);

    /// The tag for the OBJECT IDENTIFIER type, UNIVERSAL 6.
    pub const OID: Self = Self::universal(6);

    /// The tag for the UTF8String type, UNIVERSAL 12
    pub const UTF8_STRING: Self = Self::universal(12);

    /// The tag for the SEQUENCE and SEQUENCE OF types, UNIVERSAL 16.
    pub const SEQUENCE: Self = Self::universal(16);

    /// The tag for the SET and SET OF types, UNIVERSAL 17.
    pub const SET: Self = Self::universal(17);

    /// The tag for the PrintableString type, UNIVERSAL 19.
    pub const PRINTABLE_STRING: Self = Self::universal(19);

    /// The tag for the TeletexString type, UNIVERSAL 20.
    ///
    /// This type is also known as T61String.
    pub const TELETEX_STRING: Self = Self::universal(20);

    /// The tag for the IA5String type, UNIVERSAL 22.
    pub const IA5_STRING: Self = Self::universal(22);

    /// The tag for the UTCTime type, UNIVERSAL 23.
    pub const UTC_TIME: Self = Self::universal(23);

    /// The tag for the GeneralString type, UNIVERSAL 27.
    pub const GENERAL_STRING: Self = Self::universal(27);

    /// The tag for the UniversalString type, UNIVERSAL 28.
    pub const UNIVERSAL_STRING: Self = Self::universal(28);
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if let Some(name) = self.name() {
            return f.write_str(name)
        }
        match self.class {
            Class::Universal => write!(f, "[UNIVERSAL ")?,
            Class::Application => write!(f, "[APPLICATION ")?,
            Class::Context => write!(f, "[")?,
            Class::Private => write!(f, "[PRIVATE ")?,
        }
        write!(f, "{}]", self.number)
    }
}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Tag({})", self)
    }
}


//------------ Ident ---------------------------------------------------------

/// The identifier octets of a value.
///
/// This is the tag of a value plus whether it uses the primitive or
/// constructed encoding. The triple of tag number, class, and constructed
/// flag determines how the content of a value is interpreted.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Ident {
    tag: Tag,
    constructed: bool,
}

impl Ident {
    /// The identifier of the end-of-contents marker.
    pub const END_OF_CONTENTS: Self = Self::primitive(Tag::END_OF_CONTENTS);

    /// Creates identifier octets from a tag.
    pub const fn new(tag: Tag, constructed: bool) -> Self {
        Ident { tag, constructed }
    }

    /// Creates the identifier octets for a primitive value.
    pub const fn primitive(tag: Tag) -> Self {
        Self::new(tag, false)
    }

    /// Creates the identifier octets for a constructed value.
    pub const fn constructed(tag: Tag) -> Self {
        Self::new(tag, true)
    }

    /// Returns the tag.
    pub const fn tag(self) -> Tag {
        self.tag
    }

    /// Returns the class of the tag.
    pub const fn class(self) -> Class {
        self.tag.class
    }

    /// Returns the number of the tag.
    pub const fn number(self) -> u64 {
        self.tag.number
    }

    /// Returns whether the value is to be a constructed value.
    pub const fn is_constructed(self) -> bool {
        self.constructed
    }

    /// Takes the identifier octets from the beginning of a source.
    ///
    /// Fails with [`ErrorKind::TruncatedHeader`] if the source ends before
    /// the identifier octets are complete.
    pub fn take_from(source: &mut Source) -> Result<Self, DecodeError> {
        let pos = source.pos();
        let first = match source.take_u8() {
            Some(octet) => FirstOctet(octet),
            None => {
                return Err(
                    DecodeError::new(ErrorKind::TruncatedHeader, pos)
                )
            }
        };
        let number = if first.number() == FirstOctet::EXTENDED {
            // The high tag number form must not have leading zero bits
            // and is only used for numbers that don’t fit the first octet.
            if source.peek_u8() == Some(0x80) {
                return Err(DecodeError::new(
                    ErrorKind::InvalidValue("tag number with leading zeros"),
                    pos
                ))
            }
            let number = varint::take_from(source).map_err(|err| {
                match err.kind() {
                    ErrorKind::TruncatedInput => {
                        DecodeError::new(ErrorKind::TruncatedHeader, pos)
                    }
                    _ => err
                }
            })?;
            if number < u64::from(FirstOctet::EXTENDED) {
                return Err(DecodeError::new(
                    ErrorKind::InvalidValue(
                        "low tag number in high tag number form"
                    ),
                    pos
                ))
            }
            number
        }
        else {
            u64::from(first.number())
        };
        Ok(Ident::new(Tag::new(first.class(), number), first.constructed()))
    }

    /// Returns the number of octets of the encoded identifier octets.
    pub fn encoded_len(self) -> usize {
        if self.tag.number < u64::from(FirstOctet::EXTENDED) {
            1
        }
        else {
            1 + varint::encoded_len(self.tag.number)
        }
    }

    /// Appends the encoded identifier octets to the end of `target`.
    ///
    /// Tag numbers of 31 or more use the high tag number form: the number
    /// field of the first octet has all bits set and the number follows as
    /// a varint.
    pub fn append_encoded(self, target: &mut Vec<u8>) {
        let first = FirstOctet::default()
            .with_class(self.tag.class)
            .with_constructed(self.constructed);
        if self.tag.number < u64::from(FirstOctet::EXTENDED) {
            target.push(first.with_number(self.tag.number as u8).into_u8())
        }
        else {
            target.push(first.with_number(FirstOctet::EXTENDED).into_u8());
            varint::append_encoded(self.tag.number, target);
        }
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.constructed {
            write!(f, "{} (constructed)", self.tag)
        }
        else {
            fmt::Display::fmt(&self.tag, f)
        }
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Ident({})", self)
    }
}


//------------ FirstOctet ----------------------------------------------------

/// The first identifier octet.
///
/// The octet is made up of three bit fields. From the most significant bit
/// down, these are the class (two bits), the constructed flag (one bit),
/// and the tag number (five bits).
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FirstOctet(u8);

impl FirstOctet {
    /// The mask for the class field.
    const CLASS_MASK: u8 = 0xC0;

    /// The shift of the class field.
    const CLASS_SHIFT: u32 = 6;

    /// The mask for the constructed flag.
    const CONSTRUCTED_MASK: u8 = 0x20;

    /// The mask for the tag number field.
    const NUMBER_MASK: u8 = 0x1F;

    /// The tag number field value signalling that the number follows.
    pub const EXTENDED: u8 = 0x1F;

    /// Creates the value from an octet.
    pub const fn from_u8(octet: u8) -> Self {
        FirstOctet(octet)
    }

    /// Returns the octet.
    pub const fn into_u8(self) -> u8 {
        self.0
    }

    /// Returns the class field.
    pub const fn class(self) -> Class {
        Class::from_bits((self.0 & Self::CLASS_MASK) >> Self::CLASS_SHIFT)
    }

    /// Returns the constructed flag.
    pub const fn constructed(self) -> bool {
        self.0 & Self::CONSTRUCTED_MASK != 0
    }

    /// Returns the tag number field.
    pub const fn number(self) -> u8 {
        self.0 & Self::NUMBER_MASK
    }

    /// Returns a copy with the class field replaced.
    pub const fn with_class(self, class: Class) -> Self {
        FirstOctet(
            (self.0 & !Self::CLASS_MASK)
            | (class.into_bits() << Self::CLASS_SHIFT)
        )
    }

    /// Returns a copy with the constructed flag replaced.
    pub const fn with_constructed(self, constructed: bool) -> Self {
        if constructed {
            FirstOctet(self.0 | Self::CONSTRUCTED_MASK)
        }
        else {
            FirstOctet(self.0 & !Self::CONSTRUCTED_MASK)
        }
    }

    /// Returns a copy with the tag number field replaced.
    ///
    /// Only the lowest five bits of `number` are used.
    pub const fn with_number(self, number: u8) -> Self {
        FirstOctet((self.0 & !Self::NUMBER_MASK) | (number & Self::NUMBER_MASK))
    }
}


//------------ Class ---------------------------------------------------------

/// The class of a tag.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Class {
    Universal,
    Application,
    Context,
    Private,
}

impl Class {
    /// Creates the class from the two bits of the class field.
    const fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::Universal,
            1 => Self::Application,
            2 => Self::Context,
            _ => Self::Private
        }
    }

    /// Returns the two bits of the class field.
    const fn into_bits(self) -> u8 {
        match self {
            Self::Universal => 0,
            Self::Application => 1,
            Self::Context => 2,
            Self::Private => 3,
        }
    }
}

impl fmt::Display for Class {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Class::Universal => "UNIVERSAL",
            Class::Application => "APPLICATION",
            Class::Context => "CONTEXT",
            Class::Private => "PRIVATE",
        })
    }
}


//============ Tests =========================================================
