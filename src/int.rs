//! BER encoded integers.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::fmt;
use bytes::Bytes;
use crate::decode::ErrorKind;


//------------ Integer -------------------------------------------------------

/// A BER encoded integer.
///
/// As integers are variable length in BER, this type is just a simple wrapper
/// atop the underlying `Bytes` value containing the raw content. This way,
/// integers of any size, such as the serial numbers of certificates, are
/// kept and re-encoded exactly.
///
/// Values created from native integers always use the shortest possible
/// encoding. Conversion back into native integers fails if the value is too
/// large.
///
/// # BER Encoding
///
/// In BER, an INTEGER is encoded as a primitive value with the content octets
/// providing a variable-length, big-endian, two‘s complement byte sequence of
/// that integer. Thus, the most-significant bit of the first octet serves as
/// the sign bit.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Integer(Bytes);

impl Integer {
    /// Creates an integer from its content octets.
    ///
    /// The content must contain at least one octet.
    pub fn from_content(content: Bytes) -> Result<Self, ErrorKind> {
        if content.is_empty() {
            return Err(ErrorKind::InvalidValue("empty integer"))
        }
        Ok(Integer(content))
    }

    /// Returns the content octets.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns whether the integer is negative.
    pub fn is_negative(&self) -> bool {
        self.0.first().map(|x| x & 0x80 != 0).unwrap_or(false)
    }

    /// Converts the integer into an `i128` if it fits.
    pub fn to_i128(&self) -> Option<i128> {
        let slice = self.strip();
        if slice.len() > 16 {
            return None
        }
        let mut res: i128 = if self.is_negative() { -1 } else { 0 };
        for &octet in slice {
            res = (res << 8) | i128::from(octet);
        }
        Some(res)
    }

    /// Converts the integer into an `i64` if it fits.
    pub fn to_i64(&self) -> Option<i64> {
        self.to_i128().and_then(|x| i64::try_from(x).ok())
    }

    /// Returns the content without redundant leading octets.
    ///
    /// A leading octet is redundant if it is all zeros or all ones and the
    /// next octet has the same sign bit.
    fn strip(&self) -> &[u8] {
        let mut slice = self.as_slice();
        while let [first, second, ..] = *slice {
            if (first == 0 && second & 0x80 == 0)
                || (first == 0xFF && second & 0x80 != 0)
            {
                slice = &slice[1..];
            }
            else {
                break
            }
        }
        slice
    }
}


//--- From

/// Converts a native integer into the shortest two’s complement form.
///
/// For negative powers of two this is one octet shorter than sizing the
/// content as `(bit length + 1) / 8` octets rounded up: `-128` becomes `80`
/// rather than `FF 80`. Both forms decode to the same value.
impl From<i128> for Integer {
    fn from(value: i128) -> Self {
        let octets = value.to_be_bytes();
        let mut start = 0;
        while start < octets.len() - 1 {
            let (first, second) = (octets[start], octets[start + 1]);
            if (first == 0 && second & 0x80 == 0)
                || (first == 0xFF && second & 0x80 != 0)
            {
                start += 1;
            }
            else {
                break
            }
        }
        Integer(Bytes::copy_from_slice(&octets[start..]))
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        i128::from(value).into()
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        i128::from(value).into()
    }
}

impl From<u64> for Integer {
    fn from(value: u64) -> Self {
        i128::from(value).into()
    }
}


//--- AsRef

impl AsRef<[u8]> for Integer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}


//--- Display and Debug

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.to_i128() {
            Some(value) => write!(f, "{}", value),
            None => {
                f.write_str("0x")?;
                for octet in self.0.iter() {
                    write!(f, "{:02x}", octet)?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Integer({})", self)
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn minimal_encoding() {
        assert_eq!(Integer::from(0i32).as_slice(), b"\x00");
        assert_eq!(Integer::from(-1i32).as_slice(), b"\xFF");
        assert_eq!(Integer::from(127i32).as_slice(), b"\x7F");
        assert_eq!(Integer::from(128i32).as_slice(), b"\x00\x80");
        assert_eq!(Integer::from(-128i32).as_slice(), b"\x80");
        assert_eq!(Integer::from(-129i32).as_slice(), b"\xFF\x7F");
        assert_eq!(Integer::from(300i32).as_slice(), b"\x01\x2C");
        assert_eq!(
            Integer::from(i128::MIN).as_slice(),
            &i128::MIN.to_be_bytes()[..]
        );
        assert_eq!(Integer::from(u64::MAX).as_slice().len(), 9);
    }

    #[test]
    fn native_values() {
        for value in [
            0i128, 1, -1, 127, 128, -128, -129, 300, 65535, -65536,
            i64::MAX.into(), i64::MIN.into(), i128::MAX, i128::MIN
        ] {
            assert_eq!(Integer::from(value).to_i128(), Some(value));
        }
        assert_eq!(Integer::from(300i32).to_i64(), Some(300));
        assert_eq!(Integer::from(i128::MAX).to_i64(), None);
    }

    #[test]
    fn from_content() {
        assert_eq!(
            Integer::from_content(Bytes::new()),
            Err(ErrorKind::InvalidValue("empty integer"))
        );

        // Redundant leading octets are kept but don’t change the value.
        let int = Integer::from_content(
            Bytes::from_static(b"\x00\x00\x01")
        ).unwrap();
        assert_eq!(int.as_slice(), b"\x00\x00\x01");
        assert_eq!(int.to_i128(), Some(1));
        let int = Integer::from_content(
            Bytes::from_static(b"\xFF\xFF\x80")
        ).unwrap();
        assert_eq!(int.to_i128(), Some(-128));

        // A certificate serial number.
        let serial = Integer::from_content(Bytes::from_static(
            b"\x2F\x20\x9A\xB2\x7A\xE7\xE7\xCC\xEE\x28\
              \x3E\xB3\xB7\xFE\xC4\x6C\x14\xB6\x3C\xE8"
        )).unwrap();
        assert!(!serial.is_negative());
        assert_eq!(serial.to_i128(), None);
        assert_eq!(
            serial.to_string(), "0x2f209ab27ae7e7ccee283eb3b7fec46c14b63ce8"
        );
    }
}
