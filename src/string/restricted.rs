//! Character sets of restricted string types.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::fmt;
use bytes::Bytes;
use crate::decode::ErrorKind;
use crate::value::ValueError;


//------------ Charset -------------------------------------------------------

/// The character encoding used by the content of a string type.
///
/// Every string type known to the registry converts between its content
/// octets and a Rust string using one of these encodings.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Charset {
    /// The content is UTF-8.
    ///
    /// Used for UTF8String as well as GeneralString and UniversalString.
    Utf8,

    /// The content is seven bit ASCII.
    ///
    /// Used for IA5String, PrintableString, and UTCTime.
    Ascii,
}

impl Charset {
    /// Checks whether `s` can be encoded in this character set.
    pub fn check(self, s: &str) -> Result<(), ValueError> {
        match self {
            Charset::Utf8 => Ok(()),
            Charset::Ascii => {
                if s.is_ascii() {
                    Ok(())
                }
                else {
                    Err(ValueError::Charset(self))
                }
            }
        }
    }

    /// Decodes the content octets of a string value.
    pub fn decode(self, content: &Bytes) -> Result<String, ErrorKind> {
        if self == Charset::Ascii && !content.is_ascii() {
            return Err(ErrorKind::EncodingError(self))
        }
        match std::str::from_utf8(content) {
            Ok(s) => Ok(s.into()),
            Err(_) => Err(ErrorKind::EncodingError(self))
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match *self {
            Charset::Utf8 => "UTF-8",
            Charset::Ascii => "ASCII",
        })
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn decode() {
        assert_eq!(
            Charset::Utf8.decode(&Bytes::from_static(b"Gr\xC3\xBC\xC3\x9Fe")),
            Ok(String::from("Grüße"))
        );
        assert_eq!(
            Charset::Ascii.decode(&Bytes::from_static(b"ca@example.org")),
            Ok(String::from("ca@example.org"))
        );
        assert_eq!(
            Charset::Ascii.decode(&Bytes::from_static(b"Gr\xC3\xBC\xC3\x9Fe")),
            Err(ErrorKind::EncodingError(Charset::Ascii))
        );
        assert_eq!(
            Charset::Utf8.decode(&Bytes::from_static(b"\xFF\xFE")),
            Err(ErrorKind::EncodingError(Charset::Utf8))
        );
    }

    #[test]
    fn check() {
        assert!(Charset::Utf8.check("Grüße").is_ok());
        assert!(Charset::Ascii.check("Test Root CA 1").is_ok());
        assert_eq!(
            Charset::Ascii.check("Grüße"),
            Err(ValueError::Charset(Charset::Ascii))
        );
    }
}
