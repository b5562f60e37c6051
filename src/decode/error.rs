//! Error Handling.
//!
//! This is a private module. Its public content is being re-exported by the
//! parent module.

use std::io;
use crate::string::Charset;
use super::source::Pos;


//------------ ErrorKind -----------------------------------------------------

/// The reason a value could not be decoded.
///
/// All kinds are fatal to the decode operation that produced them. There is
/// no partial recovery of a tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ErrorKind {
    /// There weren’t enough octets left for the identifier and length
    /// octets of a value.
    #[error("truncated header")]
    TruncatedHeader,

    /// The data ended before the declared end of a value.
    #[error("unexpected end of data")]
    TruncatedInput,

    /// The content of a constructed value didn’t divide exactly into
    /// complete values.
    #[error("truncated object inside constructed value")]
    TruncatedObject,

    /// The length octets were malformed or announced more octets than are
    /// available.
    #[error("bad length octets")]
    BadLength,

    /// An indefinite length value ran out of data before its
    /// end-of-contents marker.
    #[error("indefinite length value without end-of-contents")]
    UnterminatedIndefiniteObject,

    /// The content octets violate the rules of the value’s type.
    #[error("invalid value: {0}")]
    InvalidValue(&'static str),

    /// The content of a string value is not in the string’s character set.
    #[error("string content is not valid {0}")]
    EncodingError(Charset),

    /// Values were nested deeper than the decoder allows.
    #[error("values nested too deeply")]
    NestingTooDeep,
}


//------------ DecodeError ---------------------------------------------------

/// An error happened while decoding data.
///
/// The error carries the kind of problem and the position in the source
/// data where it was detected.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{kind} at position {pos}")]
pub struct DecodeError {
    kind: ErrorKind,
    pos: Pos,
}

impl DecodeError {
    /// Creates a new error of the given kind at the given position.
    pub fn new(kind: ErrorKind, pos: Pos) -> Self {
        log::debug!("decode error at {}: {}", pos, kind);
        DecodeError { kind, pos }
    }

    /// Returns the kind of error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the position in the source where the error was detected.
    pub fn pos(&self) -> Pos {
        self.pos
    }

    /// Reports a truncated header as a truncated enclosing object.
    ///
    /// A header that runs past the end of a definite length constructed
    /// value means the content of that value ends with a partial value.
    pub(crate) fn into_truncated_object(self) -> Self {
        match self.kind {
            ErrorKind::TruncatedHeader | ErrorKind::TruncatedInput => {
                DecodeError { kind: ErrorKind::TruncatedObject, pos: self.pos }
            }
            _ => self
        }
    }
}


//------------ ReadError -----------------------------------------------------

/// An error happened while reading and decoding data from a reader.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// Reading the data failed.
    #[error("failed to read data: {0}")]
    Io(#[from] io::Error),

    /// The data was read but could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(
            DecodeError::new(ErrorKind::BadLength, Pos::from(12)).to_string(),
            "bad length octets at position 12"
        );
        assert_eq!(
            DecodeError::new(
                ErrorKind::EncodingError(Charset::Ascii), Pos::from(3)
            ).to_string(),
            "string content is not valid ASCII at position 3"
        );
    }

    #[test]
    fn truncated_object() {
        let err = DecodeError::new(ErrorKind::TruncatedHeader, 4.into());
        assert_eq!(
            err.into_truncated_object().kind(), ErrorKind::TruncatedObject
        );
        assert_eq!(err.into_truncated_object().pos(), Pos::from(4));
        let err = DecodeError::new(ErrorKind::BadLength, 4.into());
        assert_eq!(err.into_truncated_object().kind(), ErrorKind::BadLength);
    }
}
