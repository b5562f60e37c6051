//! The source of data to decode.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use std::{fmt, ops};
use bytes::Bytes;


//------------ Source --------------------------------------------------------

/// A forward-only cursor over a buffer of encoded data.
///
/// The source keeps the complete buffer and an offset into it. Taking data
/// from the source only ever advances the offset, so decoding a value is
/// linear in its size. Content octets handed out by the source are cheap
/// slices of the underlying [`Bytes`] value.
///
/// A source can be limited to a region of the buffer via
/// [`split_to`][Self::split_to]. This is used for the content of definite
/// length constructed values whose nested values must not run past the
/// end of the content.
#[derive(Clone, Debug)]
pub struct Source {
    /// The complete buffer.
    data: Bytes,

    /// The offset of the next octet to take.
    pos: usize,

    /// The offset one past the last octet available to this source.
    end: usize,

    /// Is this source limited to a region of its parent?
    limited: bool,
}

impl Source {
    /// Creates a new source covering all of `data`.
    pub fn new(data: Bytes) -> Self {
        Source { end: data.len(), data, pos: 0, limited: false }
    }

    /// Returns the current position within the complete buffer.
    pub fn pos(&self) -> Pos {
        self.pos.into()
    }

    /// Returns the octets still available.
    pub fn remaining(&self) -> &[u8] {
        &self.data[self.pos..self.end]
    }

    /// Returns the number of octets still available.
    pub fn len(&self) -> usize {
        self.end - self.pos
    }

    /// Returns whether all octets have been taken.
    pub fn is_exhausted(&self) -> bool {
        self.pos == self.end
    }

    /// Returns whether the source is limited to the content of a value.
    pub fn is_limited(&self) -> bool {
        self.limited
    }

    /// Returns the next octet without taking it.
    pub fn peek_u8(&self) -> Option<u8> {
        self.remaining().first().copied()
    }

    /// Takes a single octet.
    pub fn take_u8(&mut self) -> Option<u8> {
        let res = self.peek_u8()?;
        self.pos += 1;
        Some(res)
    }

    /// Advances the source by `len` octets.
    ///
    /// Returns `None` and leaves the source untouched if fewer than `len`
    /// octets are available.
    pub fn advance(&mut self, len: usize) -> Option<()> {
        if len > self.len() {
            return None
        }
        self.pos += len;
        Some(())
    }

    /// Takes `len` octets.
    pub fn take_bytes(&mut self, len: usize) -> Option<Bytes> {
        if len > self.len() {
            return None
        }
        let res = self.data.slice(self.pos..self.pos + len);
        self.pos += len;
        Some(res)
    }

    /// Takes all remaining octets.
    pub fn take_all(&mut self) -> Bytes {
        let res = self.data.slice(self.pos..self.end);
        self.pos = self.end;
        res
    }

    /// Splits off a source for the next `len` octets.
    ///
    /// The returned source covers exactly these octets and reports
    /// positions relative to the complete buffer. The source itself is
    /// advanced past them. Returns `None` if fewer than `len` octets are
    /// available.
    pub fn split_to(&mut self, len: usize) -> Option<Source> {
        if len > self.len() {
            return None
        }
        let res = Source {
            data: self.data.clone(),
            pos: self.pos,
            end: self.pos + len,
            limited: true,
        };
        self.pos += len;
        Some(res)
    }
}


//------------ IntoSource ----------------------------------------------------

/// A type that can be converted into a source.
pub trait IntoSource {
    /// Converts the value into a source covering all of its data.
    fn into_source(self) -> Source;
}

impl IntoSource for Source {
    fn into_source(self) -> Source {
        self
    }
}

impl IntoSource for Bytes {
    fn into_source(self) -> Source {
        Source::new(self)
    }
}

impl IntoSource for Vec<u8> {
    fn into_source(self) -> Source {
        Source::new(self.into())
    }
}

impl<'a> IntoSource for &'a [u8] {
    fn into_source(self) -> Source {
        Source::new(Bytes::copy_from_slice(self))
    }
}

impl<'a, const N: usize> IntoSource for &'a [u8; N] {
    fn into_source(self) -> Source {
        Source::new(Bytes::copy_from_slice(self.as_ref()))
    }
}

impl<'a> IntoSource for &'a Vec<u8> {
    fn into_source(self) -> Source {
        Source::new(Bytes::copy_from_slice(self.as_slice()))
    }
}


//------------ Pos -----------------------------------------------------------

/// The logical position within a source.
///
/// Values of this type are used for diagnostics and for determining how
/// many octets were taken between two points of decoding.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Pos(usize);

impl From<usize> for Pos {
    fn from(pos: usize) -> Pos {
        Pos(pos)
    }
}

impl From<Pos> for usize {
    fn from(pos: Pos) -> usize {
        pos.0
    }
}

impl ops::Add<usize> for Pos {
    type Output = Self;

    fn add(self, rhs: usize) -> Self {
        Pos(self.0 + rhs)
    }
}

impl ops::Sub for Pos {
    type Output = usize;

    fn sub(self, rhs: Self) -> usize {
        self.0 - rhs.0
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn take_and_split() {
        let mut src = b"\x01\x02\x03\x04\x05".into_source();
        assert_eq!(src.take_u8(), Some(1));
        assert_eq!(src.pos(), Pos::from(1));

        let mut inner = src.split_to(3).unwrap();
        assert!(inner.is_limited());
        assert!(!src.is_limited());
        assert_eq!(src.pos(), Pos::from(4));
        assert_eq!(inner.pos(), Pos::from(1));
        assert_eq!(inner.remaining(), b"\x02\x03\x04");
        assert!(inner.take_bytes(4).is_none());
        assert_eq!(inner.take_bytes(2).unwrap().as_ref(), b"\x02\x03");
        assert_eq!(inner.take_all().as_ref(), b"\x04");
        assert!(inner.is_exhausted());
        assert_eq!(inner.take_u8(), None);

        assert!(src.split_to(2).is_none());
        assert_eq!(src.take_all().as_ref(), b"\x05");
        assert!(src.is_exhausted());
    }

    #[test]
    fn advance() {
        let mut src = vec![1u8, 2, 3].into_source();
        assert_eq!(src.advance(4), None);
        assert_eq!(src.pos(), Pos::from(0));
        assert_eq!(src.advance(2), Some(()));
        assert_eq!(src.peek_u8(), Some(3));
        assert_eq!(src.pos() - Pos::from(1), 1);
    }
}
