//! ASN.1 Object Identifiers.
//!
//! This module contains the [`Oid`] type that implements object identifiers,
//! a construct used by ASN.1 to uniquely identify all sorts of things. The
//! type is also re-exported at the top-level.

use std::{fmt, str};
use bytes::Bytes;
use smallvec::SmallVec;
use crate::decode::ErrorKind;
use crate::value::ValueError;
use crate::varint;


//------------ Oid -----------------------------------------------------------

/// An object identifer.
///
/// Object identifiers are globally unique, hierarchical values that are used
/// to identify objects or their type. When written, they are presented as a
/// sequence of integers separated by dots such as ‘1.3.6.1.5.5.7.1’. These
/// integers are called arcs.
///
/// Values of this type keep a single object identifer in its BER encoding,
/// so a decoded identifier is re-encoded exactly. The arcs are derived from
/// the encoding via [`arcs`][Self::arcs].
///
/// # BER Encoding
///
/// The content octets are a sequence of subidentifiers, each encoded as a
/// base-128 varint. The first subidentifier combines the first two arcs as
/// `arc0 * 40 + arc1`. Each further arc is one subidentifier.
#[derive(Clone, Eq, Hash, PartialEq)]
pub struct Oid(Bytes);

impl Oid {
    /// Creates an object identifier from its content octets.
    ///
    /// Fails if the content is empty, if the last octet announces a
    /// further octet, or if a subidentifier doesn’t fit into a `u64`.
    pub fn from_content(content: Bytes) -> Result<Self, ErrorKind> {
        if content.is_empty() {
            return Err(ErrorKind::InvalidValue("empty object identifier"))
        }
        let mut slice = content.as_ref();
        while !slice.is_empty() {
            let (_, len) = varint::decode(slice)?;
            slice = &slice[len..];
        }
        Ok(Oid(content))
    }

    /// Creates an object identifier from its arcs.
    ///
    /// There must be at least two arcs. The first arc must be 0, 1, or 2,
    /// and if it is 0 or 1, the second arc must be less than 40.
    pub fn from_arcs(arcs: &[u64]) -> Result<Self, ValueError> {
        let (first, second, tail) = match *arcs {
            [first, second, ref tail @ ..] => (first, second, tail),
            _ => {
                return Err(ValueError::Oid("at least two arcs required"))
            }
        };
        if first > 2 {
            return Err(ValueError::Oid("first arc must be 0, 1, or 2"))
        }
        if first < 2 && second >= 40 {
            return Err(ValueError::Oid("second arc must be less than 40"))
        }
        let head = (first * 40).checked_add(second).ok_or(
            ValueError::Oid("second arc too large")
        )?;
        let mut res = Vec::new();
        varint::append_encoded(head, &mut res);
        for &arc in tail {
            varint::append_encoded(arc, &mut res);
        }
        Ok(Oid(res.into()))
    }

    /// Returns the content octets.
    pub fn as_slice(&self) -> &[u8] {
        self.0.as_ref()
    }

    /// Returns an iterator over the arcs of the identifier.
    pub fn arcs(&self) -> Arcs<'_> {
        Arcs { slice: self.as_slice(), position: Position::First, second: 0 }
    }

    /// Returns the arcs of the identifier.
    pub fn to_arcs(&self) -> SmallVec<[u64; 12]> {
        self.arcs().collect()
    }

    /// Returns a descriptive name if this is a well-known identifier.
    pub fn name(&self) -> Option<&'static str> {
        let arcs = self.to_arcs();
        KNOWN.iter().find_map(|&(known, name)| {
            if known == arcs.as_slice() { Some(name) } else { None }
        })
    }
}


//--- AsRef

impl AsRef<[u8]> for Oid {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}


//--- FromStr

impl str::FromStr for Oid {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let arcs = s.split('.').map(|arc| {
            arc.parse::<u64>().map_err(|_| {
                ValueError::Oid("only integer arcs allowed")
            })
        }).collect::<Result<SmallVec<[u64; 12]>, _>>()?;
        Self::from_arcs(&arcs)
    }
}


//--- Display and Debug

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for arc in self.arcs() {
            if first {
                first = false;
            }
            else {
                f.write_str(".")?;
            }
            write!(f, "{}", arc)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "Oid({} [{}])", self, name),
            None => write!(f, "Oid({})", self),
        }
    }
}


//------------ Arcs ----------------------------------------------------------

/// An iterator over the arcs of an object identifier.
#[derive(Clone, Debug)]
pub struct Arcs<'a> {
    /// The remainder of the object identifier’s encoded octets.
    slice: &'a [u8],

    /// The position of the next arc.
    position: Position,

    /// The second arc, already decoded with the first.
    second: u64,
}

/// The position of the next arc in the object identifier.
///
/// As the first two arcs of the object identifer are encoded in the
/// first subidentifier of the encoded value, we have three different cases.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Position {
    /// The first arc.
    ///
    /// This is 0 if the integer value of the subidentifer is 0..39,
    /// 1 for 40..79, and 2 for anything else.
    First,

    /// The second arc.
    ///
    /// This is the integer value of the subidentifer modulo 40 if the value
    /// is below 80 and otherwise the value minus 80.
    Second,

    /// Any later arc.
    ///
    /// This is identical to the integer value of the subidentifier.
    Other,
}

impl<'a> Iterator for Arcs<'a> {
    type Item = u64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position == Position::Second {
            self.position = Position::Other;
            return Some(self.second)
        }
        // Content was checked when the Oid was created.
        let (value, len) = varint::decode(self.slice).ok()?;
        self.slice = &self.slice[len..];
        if self.position == Position::First {
            self.position = Position::Second;
            if value < 80 {
                self.second = value % 40;
                Some(value / 40)
            }
            else {
                self.second = value - 80;
                Some(2)
            }
        }
        else {
            Some(value)
        }
    }
}


//------------ Well-known Identifiers ----------------------------------------

/// Names for identifiers commonly found in certificates.
const KNOWN: &[(&[u64], &str)] = &[
    (&[1, 2, 840, 113549, 1, 1, 1], "rsaEncryption"),
    (&[1, 2, 840, 113549, 1, 1, 5], "sha1WithRSAEncryption"),
    (&[1, 2, 840, 113549, 1, 1, 11], "sha256WithRSAEncryption"),
    (&[1, 2, 840, 113549, 1, 1, 12], "sha384WithRSAEncryption"),
    (&[1, 2, 840, 113549, 1, 1, 13], "sha512WithRSAEncryption"),
    (&[1, 2, 840, 113549, 1, 9, 1], "emailAddress"),
    (&[1, 2, 840, 10045, 2, 1], "ecPublicKey"),
    (&[1, 2, 840, 10045, 3, 1, 7], "prime256v1"),
    (&[1, 2, 840, 10045, 4, 3, 2], "ecdsa-with-SHA256"),
    (&[1, 2, 840, 10045, 4, 3, 3], "ecdsa-with-SHA384"),
    (&[1, 3, 132, 0, 34], "secp384r1"),
    (&[1, 3, 101, 112], "Ed25519"),
    (&[2, 5, 4, 3], "commonName"),
    (&[2, 5, 4, 5], "serialNumber"),
    (&[2, 5, 4, 6], "countryName"),
    (&[2, 5, 4, 7], "localityName"),
    (&[2, 5, 4, 8], "stateOrProvinceName"),
    (&[2, 5, 4, 10], "organizationName"),
    (&[2, 5, 4, 11], "organizationalUnitName"),
    (&[2, 5, 29, 14], "subjectKeyIdentifier"),
    (&[2, 5, 29, 15], "keyUsage"),
    (&[2, 5, 29, 17], "subjectAltName"),
    (&[2, 5, 29, 19], "basicConstraints"),
    (&[2, 5, 29, 31], "cRLDistributionPoints"),
    (&[2, 5, 29, 32], "certificatePolicies"),
    (&[2, 5, 29, 35], "authorityKeyIdentifier"),
    (&[2, 5, 29, 37], "extKeyUsage"),
    (&[1, 3, 6, 1, 5, 5, 7, 1, 1], "authorityInfoAccess"),
    (&[1, 3, 6, 1, 5, 5, 7, 3, 1], "serverAuth"),
    (&[1, 3, 6, 1, 5, 5, 7, 3, 2], "clientAuth"),
    (&[2, 16, 840, 1, 101, 3, 4, 2, 1], "sha256"),
];


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_str_and_display() {
        let oid: Oid = "1.2.840.113549.1.1.11".parse().unwrap();
        assert_eq!(
            oid.as_slice(), b"\x2A\x86\x48\x86\xF7\x0D\x01\x01\x0B"
        );
        assert_eq!(oid.to_string(), "1.2.840.113549.1.1.11");
        assert_eq!(oid.name(), Some("sha256WithRSAEncryption"));

        let oid: Oid = "2.5.4.3".parse().unwrap();
        assert_eq!(oid.as_slice(), b"\x55\x04\x03");
        assert_eq!(format!("{:?}", oid), "Oid(2.5.4.3 [commonName])");

        let oid: Oid = "2.999.3".parse().unwrap();
        assert_eq!(oid.as_slice(), b"\x88\x37\x03");
        assert_eq!(oid.to_string(), "2.999.3");
        assert_eq!(oid.name(), None);
    }

    #[test]
    fn from_str_failures() {
        assert!("1".parse::<Oid>().is_err());
        assert!("3.1".parse::<Oid>().is_err());
        assert!("1.40".parse::<Oid>().is_err());
        assert!("1.2.x".parse::<Oid>().is_err());
        assert!("1..2".parse::<Oid>().is_err());
        assert!("".parse::<Oid>().is_err());
    }

    #[test]
    fn from_content() {
        let oid = Oid::from_content(
            Bytes::from_static(b"\x2A\x86\x48\x86\xF7\x0D\x01\x01\x0B")
        ).unwrap();
        assert_eq!(
            oid.to_arcs().as_slice(), &[1, 2, 840, 113549, 1, 1, 11]
        );
        assert_eq!(
            Oid::from_content(Bytes::new()),
            Err(ErrorKind::InvalidValue("empty object identifier"))
        );
        assert_eq!(
            Oid::from_content(Bytes::from_static(b"\x2A\x86")),
            Err(ErrorKind::TruncatedInput)
        );

        // Only the first two arcs share a subidentifier.
        let oid = Oid::from_content(Bytes::from_static(b"\x00\x05")).unwrap();
        assert_eq!(oid.to_string(), "0.0.5");
        let oid = Oid::from_content(Bytes::from_static(b"\x4F")).unwrap();
        assert_eq!(oid.to_string(), "1.39");
        let oid = Oid::from_content(Bytes::from_static(b"\x50")).unwrap();
        assert_eq!(oid.to_string(), "2.0");
    }

    #[test]
    fn round_trip_through_content() {
        let oid: Oid = "1.2.840.113549.1.1.11".parse().unwrap();
        let copy = Oid::from_content(Bytes::copy_from_slice(oid.as_slice()))
            .unwrap();
        assert_eq!(copy, oid);
        assert_eq!(copy.to_string(), "1.2.840.113549.1.1.11");
    }
}
