//! Mapping identifier octets to the types of values.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::fmt;
use std::collections::HashMap;
use crate::ident::{Ident, Tag};
use crate::string::Charset;


//------------ Kind ----------------------------------------------------------

/// How the content of a value is to be interpreted.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    /// The end-of-contents marker. The content must be empty.
    EndOfContents,

    /// A BOOLEAN. The content is a single octet, non-zero for true.
    Boolean,

    /// An INTEGER in two’s complement.
    Integer,

    /// A BIT STRING, kept as its content octets.
    BitString,

    /// An OCTET STRING, kept as mutable content octets.
    OctetString,

    /// A NULL. The content must be empty.
    Null,

    /// An OBJECT IDENTIFIER.
    Oid,

    /// A character string in the given character set.
    Text(Charset),

    /// A sequence of nested values.
    ///
    /// This is used by SEQUENCE and SET as well as any unknown constructed
    /// value.
    Sequence,

    /// Opaque content octets.
    ///
    /// This is used by any unknown primitive value.
    Opaque,
}


//------------ Descriptor ----------------------------------------------------

/// The description of the type of a value.
///
/// A descriptor ties the identifier octets of a value to the kind of its
/// content. Descriptors of types known in advance carry the name of the
/// type, generic descriptors for anything else do not.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Descriptor {
    ident: Ident,
    kind: Kind,
    name: Option<&'static str>,
}

impl Descriptor {
    /// Creates a descriptor for a type known in advance.
    const fn builtin(
        tag: Tag, constructed: bool, kind: Kind, name: &'static str
    ) -> Self {
        Descriptor {
            ident: Ident::new(tag, constructed), kind, name: Some(name)
        }
    }

    /// Creates the generic descriptor for the given identifier.
    ///
    /// Primitive values are opaque, constructed values are sequences.
    pub fn generic(ident: Ident) -> Self {
        Descriptor {
            ident,
            kind: if ident.is_constructed() {
                Kind::Sequence
            }
            else {
                Kind::Opaque
            },
            name: None,
        }
    }

    /// Returns the identifier octets of the type.
    pub fn ident(&self) -> Ident {
        self.ident
    }

    /// Returns the kind of the content.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the name of the type if it is known in advance.
    pub fn name(&self) -> Option<&'static str> {
        self.name
    }

    /// Returns whether this is a generic descriptor.
    pub fn is_generic(&self) -> bool {
        self.name.is_none()
    }
}

impl fmt::Display for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.name {
            Some(name) => f.write_str(name),
            None => {
                write!(
                    f, "{:?}{}[{:#x}]",
                    self.ident.class(),
                    if self.ident.is_constructed() { "Cons" } else { "Prim" },
                    self.ident.number()
                )
            }
        }
    }
}


//------------ Registry ------------------------------------------------------

/// The registry of value types.
///
/// The registry maps the triple of tag number, class, and constructed flag
/// of a value to its [`Descriptor`]. It starts out with the universal types
/// listed in [`BUILTIN`][Registry::BUILTIN]. Any other triple resolves to a
/// generic descriptor which is created on first use and kept for all later
/// lookups of the same triple.
#[derive(Clone, Debug)]
pub struct Registry {
    types: HashMap<Ident, Descriptor>,
}

impl Registry {
    /// The descriptors of the types known in advance.
    pub const BUILTIN: &'static [Descriptor] = &[
        Descriptor::builtin(
            Tag::END_OF_CONTENTS, false, Kind::EndOfContents, "EOC"
        ),
        Descriptor::builtin(Tag::BOOLEAN, false, Kind::Boolean, "Boolean"),
        Descriptor::builtin(Tag::INTEGER, false, Kind::Integer, "Integer"),
        Descriptor::builtin(
            Tag::BIT_STRING, false, Kind::BitString, "BitString"
        ),
        Descriptor::builtin(
            Tag::OCTET_STRING, false, Kind::OctetString, "OctetString"
        ),
        Descriptor::builtin(Tag::NULL, false, Kind::Null, "Null"),
        Descriptor::builtin(Tag::OID, false, Kind::Oid, "OID"),
        Descriptor::builtin(
            Tag::UTF8_STRING, false, Kind::Text(Charset::Utf8), "UTF8String"
        ),
        Descriptor::builtin(Tag::SEQUENCE, true, Kind::Sequence, "Sequence"),
        Descriptor::builtin(Tag::SET, true, Kind::Sequence, "Set"),
        Descriptor::builtin(
            Tag::PRINTABLE_STRING, false, Kind::Text(Charset::Ascii),
            "PrintableString"
        ),
        Descriptor::builtin(
            Tag::TELETEX_STRING, false, Kind::Opaque, "T61String"
        ),
        Descriptor::builtin(
            Tag::IA5_STRING, false, Kind::Text(Charset::Ascii), "IA5String"
        ),
        Descriptor::builtin(
            Tag::UTC_TIME, false, Kind::Text(Charset::Ascii), "UTCTime"
        ),
        Descriptor::builtin(
            Tag::GENERAL_STRING, false, Kind::Text(Charset::Utf8),
            "GeneralString"
        ),
        Descriptor::builtin(
            Tag::UNIVERSAL_STRING, false, Kind::Text(Charset::Utf8),
            "UniversalString"
        ),
    ];

    /// Creates a new registry containing the built-in types.
    pub fn new() -> Self {
        Registry {
            types: Self::BUILTIN.iter().map(|desc| {
                (desc.ident, *desc)
            }).collect()
        }
    }

    /// Returns the built-in descriptor for the given identifier, if any.
    pub fn builtin(ident: Ident) -> Option<Descriptor> {
        Self::BUILTIN.iter().find(|desc| desc.ident == ident).copied()
    }

    /// Returns the descriptor a fresh registry resolves the identifier to.
    ///
    /// This is the built-in descriptor if there is one or the generic
    /// descriptor otherwise.
    pub fn describe(ident: Ident) -> Descriptor {
        Self::builtin(ident).unwrap_or_else(|| Descriptor::generic(ident))
    }

    /// Returns the descriptor for the given identifier if it is known.
    pub fn get(&self, ident: Ident) -> Option<Descriptor> {
        self.types.get(&ident).copied()
    }

    /// Returns the descriptor for the given identifier.
    ///
    /// If the identifier hasn’t been seen before, a generic descriptor is
    /// created and registered.
    pub fn resolve(&mut self, ident: Ident) -> Descriptor {
        *self.types.entry(ident).or_insert_with(|| {
            let res = Descriptor::generic(ident);
            log::debug!("registering generic type {}", res);
            res
        })
    }

    /// Removes all generic descriptors, keeping the built-in types.
    pub fn clear_generic(&mut self) {
        self.types.retain(|_, desc| !desc.is_generic())
    }

    /// Returns the number of registered types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns whether the registry is empty.
    ///
    /// This is never the case as the built-in types are always present.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}


//============ Tests =========================================================

#[cfg(test)]
mod test {
    use super::*;
    use crate::ident::Class;

    #[test]
    fn builtin_types() {
        let mut reg = Registry::new();
        assert_eq!(reg.len(), Registry::BUILTIN.len());

        let desc = reg.resolve(Ident::constructed(Tag::SEQUENCE));
        assert_eq!(desc.kind(), Kind::Sequence);
        assert_eq!(desc.name(), Some("Sequence"));
        let desc = reg.resolve(Ident::primitive(Tag::IA5_STRING));
        assert_eq!(desc.kind(), Kind::Text(Charset::Ascii));
        let desc = reg.resolve(Ident::primitive(Tag::END_OF_CONTENTS));
        assert_eq!(desc.kind(), Kind::EndOfContents);
        assert_eq!(reg.len(), Registry::BUILTIN.len());
        assert_eq!(
            Registry::builtin(Ident::primitive(Tag::UTC_TIME)).map(|d| d.kind()),
            Some(Kind::Text(Charset::Ascii))
        );
    }

    #[test]
    fn generic_types() {
        let mut reg = Registry::new();

        // A constructed universal type with a primitive registration is
        // still generic.
        let desc = reg.resolve(Ident::constructed(Tag::INTEGER));
        assert!(desc.is_generic());
        assert_eq!(desc.kind(), Kind::Sequence);

        let ident = Ident::primitive(Tag::ctx(3));
        assert_eq!(reg.get(ident), None);
        let desc = reg.resolve(ident);
        assert_eq!(desc.kind(), Kind::Opaque);
        assert_eq!(desc.ident().class(), Class::Context);
        assert_eq!(desc.to_string(), "ContextPrim[0x3]");

        // Memoized.
        assert_eq!(reg.get(ident), Some(desc));
        assert_eq!(reg.resolve(ident), desc);
        assert_eq!(reg.len(), Registry::BUILTIN.len() + 2);

        let desc = reg.resolve(Ident::constructed(Tag::application(0x42)));
        assert_eq!(desc.to_string(), "ApplicationCons[0x42]");

        reg.clear_generic();
        assert_eq!(reg.len(), Registry::BUILTIN.len());
        assert_eq!(reg.get(ident), None);
        assert!(reg.get(Ident::primitive(Tag::NULL)).is_some());
    }

    #[test]
    fn describe() {
        assert_eq!(
            Registry::describe(Ident::primitive(Tag::BOOLEAN)).kind(),
            Kind::Boolean
        );
        assert_eq!(
            Registry::describe(Ident::primitive(Tag::ctx(0))).kind(),
            Kind::Opaque
        );
        assert_eq!(
            Registry::describe(Ident::constructed(Tag::INTEGER)).kind(),
            Kind::Sequence
        );
    }
}
