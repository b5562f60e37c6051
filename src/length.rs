//! The length octets.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::fmt;
use crate::decode::{DecodeError, ErrorKind, Source};
use crate::mode::Mode;


//------------ Length -------------------------------------------------------

/// The length octets of an encoded value.
///
/// A length value can either be definite, meaning it provides the actual
/// number of content octets in the value, or indefinite, in which case the
/// content is delimited by a special end-of-contents marker.
///
/// # BER Encoding
///
/// The length can be encoded in one of two basic ways. Which one is used is
/// determined by the most significant bit of the first octet. If it is not
/// set, the length octets is one octet long and the remaining bits of this
/// first octet provide the definite length. Thus, if the first octet is
/// less than 128, it provides the definite length already.
///
/// If the most significant bit is set, the remaining bits of the first
/// octet specify the number of octets that follow to encode the actual
/// length. If they specify that there are zero more octets, i.e., the
/// value of the first octet is 128, the length is indefinite. Otherwise,
/// those following octets give the big-endian encoding of the definite
/// length of the content octets.
///
/// Under DER rules, a definite length must be encoded in the minimum
/// number of octets and the indefinite form is not allowed.
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
pub struct Length(Option<usize>);

impl Length {
    /// The indefinite length.
    pub const INDEFINITE: Self = Length(None);

    /// Creates a definite length.
    pub const fn definite(len: usize) -> Self {
        Length(Some(len))
    }

    /// Returns the length if it is definite.
    pub fn as_definite(self) -> Option<usize> {
        self.0
    }

    /// Returns whether the length is indefinite.
    pub fn is_indefinite(self) -> bool {
        self.0.is_none()
    }

    /// Takes the length octets from the beginning of a source.
    ///
    /// Fails with [`ErrorKind::TruncatedHeader`] if there isn’t even a first
    /// octet, and with [`ErrorKind::BadLength`] if fewer octets are left
    /// than the first octet announces, if the length doesn’t fit into a
    /// `usize`, or if `mode` rejects the encoding.
    pub fn take_from(
        source: &mut Source, mode: Mode
    ) -> Result<Self, DecodeError> {
        let pos = source.pos();
        let first = match source.take_u8() {
            Some(first) => first,
            None => {
                return Err(DecodeError::new(ErrorKind::TruncatedHeader, pos))
            }
        };

        // Bit 8 clear: short form.
        if first & 0x80 == 0 {
            return Ok(Length::definite(usize::from(first)))
        }

        // 0x80: indefinite.
        if first == 0x80 {
            if !mode.allows_indefinite() {
                return Err(DecodeError::new(ErrorKind::BadLength, pos))
            }
            return Ok(Length::INDEFINITE)
        }

        // Anything else: clear bit 8 to get the number of octets.
        let count = usize::from(first & 0x7F);
        let octets = match source.take_bytes(count) {
            Some(octets) => octets,
            None => return Err(DecodeError::new(ErrorKind::BadLength, pos))
        };
        if mode.is_restricted() {
            // There is a shorter encoding if the first octet is zero or if
            // a single octet would have fit into the short form.
            if octets[0] == 0 || (count == 1 && octets[0] < 0x80) {
                return Err(DecodeError::new(ErrorKind::BadLength, pos))
            }
        }
        let mut res = 0usize;
        for &octet in octets.iter() {
            if res > (usize::MAX >> 8) {
                return Err(DecodeError::new(ErrorKind::BadLength, pos))
            }
            res = (res << 8) | usize::from(octet);
        }
        Ok(Length::definite(res))
    }

    /// Returns the length of the encoded representation of the value.
    pub fn encoded_len(self) -> usize {
        match self.0 {
            Some(len) if len > 0x7F => 1 + Self::octet_count(len),
            _ => 1,
        }
    }

    /// Appends the encoded length to the end of `target`.
    ///
    /// Definite lengths always use the shortest possible form.
    pub fn append_encoded(self, target: &mut Vec<u8>) {
        match self.0 {
            None => target.push(0x80),
            Some(len) if len > 0x7F => {
                let count = Self::octet_count(len);
                // count is at most the size of a usize, so this fits.
                target.push(0x80 | count as u8);
                target.extend_from_slice(
                    &len.to_be_bytes()[Self::USIZE_LEN - count..]
                );
            }
            Some(len) => target.push(len as u8),
        }
    }

    const USIZE_LEN: usize = 0usize.to_be_bytes().len();

    /// Returns the number of octets needed for the long form of `len`.
    fn octet_count(len: usize) -> usize {
        let bits = (usize::BITS - len.leading_zeros()) as usize;
        (bits + 7) / 8
    }
}


//--- Debug

impl fmt::Debug for Length {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.0 {
            Some(len) => write!(f, "Length({})", len),
            None => write!(f, "Length(indefinite)"),
        }
    }
}


//============ Tests =========================================================
