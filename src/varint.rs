//! Base-128 variable length integers.
//!
//! Both the tag numbers of high-number identifier octets and the
//! subidentifiers of object identifiers are encoded as unsigned integers in
//! base 128, most significant group first. Each octet carries seven bits of
//! the value. Bit 8 is set in every octet except the last one.

use smallvec::SmallVec;
use crate::decode::{DecodeError, ErrorKind, Source};


//------------ Varint --------------------------------------------------------

/// The encoded form of a varint.
///
/// A `u64` never needs more than ten octets.
pub type Varint = SmallVec<[u8; 10]>;

/// Decodes a varint from the beginning of a slice.
///
/// Returns the value and the number of octets it occupied. Fails with
/// [`ErrorKind::TruncatedInput`] if the slice ends before an octet with
/// bit 8 cleared and with [`ErrorKind::InvalidValue`] if the value doesn’t
/// fit into a `u64`.
pub fn decode(data: &[u8]) -> Result<(u64, usize), ErrorKind> {
    let mut res = 0u64;
    for (idx, &octet) in data.iter().enumerate() {
        if res > (u64::MAX >> 7) {
            return Err(ErrorKind::InvalidValue("varint overflow"))
        }
        res = (res << 7) | u64::from(octet & 0x7F);
        if octet & 0x80 == 0 {
            return Ok((res, idx + 1))
        }
    }
    Err(ErrorKind::TruncatedInput)
}

/// Takes a varint from the beginning of a source.
///
/// The source is advanced past all octets of the varint.
pub fn take_from(source: &mut Source) -> Result<u64, DecodeError> {
    let pos = source.pos();
    let (res, len) = decode(source.remaining()).map_err(|kind| {
        DecodeError::new(kind, pos)
    })?;
    source.advance(len).ok_or_else(|| {
        DecodeError::new(ErrorKind::TruncatedInput, pos)
    })?;
    Ok(res)
}

/// Returns the number of octets of the encoded form of `value`.
pub fn encoded_len(value: u64) -> usize {
    let bits = 64 - value.leading_zeros() as usize;
    if bits == 0 {
        1
    }
    else {
        (bits + 6) / 7
    }
}

/// Encodes `value` in the minimal number of octets.
pub fn encode(mut value: u64) -> Varint {
    let mut res = Varint::new();
    res.push((value & 0x7F) as u8);
    value >>= 7;
    while value != 0 {
        res.push((value & 0x7F) as u8 | 0x80);
        value >>= 7;
    }
    res.reverse();
    res
}

/// Appends the encoded form of `value` to `target`.
pub fn append_encoded(value: u64, target: &mut Vec<u8>) {
    target.extend_from_slice(&encode(value))
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::decode::IntoSource;

    #[test]
    fn encode_values() {
        assert_eq!(encode(0).as_slice(), b"\x00");
        assert_eq!(encode(0x7F).as_slice(), b"\x7F");
        assert_eq!(encode(0x80).as_slice(), b"\x81\x00");
        assert_eq!(encode(31).as_slice(), b"\x1F");
        assert_eq!(encode(113549).as_slice(), b"\x86\xF7\x0D");
        assert_eq!(encode(0x3FFF).as_slice(), b"\xFF\x7F");
        assert_eq!(encode(0x4000).as_slice(), b"\x81\x80\x00");
        assert_eq!(encode(u64::MAX).len(), 10);
    }

    #[test]
    fn no_leading_empty_groups() {
        for value in [0u64, 1, 0x7F, 0x80, 0x3FFF, 0x4000, 1 << 35, u64::MAX] {
            let enc = encode(value);
            if enc.len() > 1 {
                assert_ne!(enc[0], 0x80, "{:x}", value);
            }
            assert_eq!(enc.len(), encoded_len(value));
        }
    }

    #[test]
    fn decode_values() {
        for value in [
            0u64, 1, 31, 0x7F, 0x80, 840, 113549, 0x1F_FFFF, 1 << 40,
            u64::MAX
        ] {
            let enc = encode(value);
            assert_eq!(decode(&enc), Ok((value, enc.len())));
        }
        // Trailing data is left alone.
        assert_eq!(decode(b"\x86\xF7\x0D\x01"), Ok((113549, 3)));
    }

    #[test]
    fn decode_failures() {
        assert_eq!(decode(b""), Err(ErrorKind::TruncatedInput));
        assert_eq!(decode(b"\x81\x80"), Err(ErrorKind::TruncatedInput));
        assert_eq!(
            decode(b"\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\xFF\x7F"),
            Err(ErrorKind::InvalidValue("varint overflow"))
        );
    }

    #[test]
    fn take_from_source() {
        let mut src = b"\x81\x00\x05".into_source();
        assert_eq!(take_from(&mut src), Ok(0x80));
        assert_eq!(src.remaining(), b"\x05");
        assert_eq!(usize::from(src.pos()), 2);
        assert_eq!(take_from(&mut src), Ok(5));
        assert!(src.is_exhausted());

        let mut src = b"\x81\x80".into_source();
        let err = take_from(&mut src).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
        assert_eq!(src.remaining(), b"\x81\x80");
    }
}
