//! The header of an encoded value.
//!
//! This is a private module. Its public items are re-exported by the parent.

use crate::decode::{DecodeError, Source};
use crate::ident::Ident;
use crate::length::Length;
use crate::mode::Mode;


//------------ Header --------------------------------------------------------

/// The identifier and length octets of an encoded value.
///
/// Every BER encoded value starts with a header that tells the tag of the
/// value, whether it is primitive or constructed, and how long its content
/// is.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Header {
    ident: Ident,
    length: Length,
}

impl Header {
    /// Creates a new header.
    pub fn new(ident: Ident, length: Length) -> Self {
        Header { ident, length }
    }

    /// Returns the identifier octets.
    pub fn ident(self) -> Ident {
        self.ident
    }

    /// Returns the length octets.
    pub fn length(self) -> Length {
        self.length
    }

    /// Takes a header from the beginning of a source.
    pub fn take_from(
        source: &mut Source, mode: Mode
    ) -> Result<Self, DecodeError> {
        let ident = Ident::take_from(source)?;
        let length = Length::take_from(source, mode)?;
        Ok(Header { ident, length })
    }

    /// Returns the number of octets of the encoded header.
    pub fn encoded_len(self) -> usize {
        self.ident.encoded_len() + self.length.encoded_len()
    }

    /// Appends the encoded header to the end of `target`.
    pub fn append_encoded(self, target: &mut Vec<u8>) {
        self.ident.append_encoded(target);
        self.length.append_encoded(target);
    }

    /// Returns the encoded header.
    pub fn to_vec(self) -> Vec<u8> {
        let mut res = Vec::with_capacity(self.encoded_len());
        self.append_encoded(&mut res);
        res
    }
}


//============ Tests =========================================================
