//! Decoding data into a tree of nodes.
//!
//! This is a private module. Its public items are re-exported by the parent.

use std::io;
use crate::header::Header;
use crate::mode::Mode;
use crate::node::Node;
use crate::registry::Registry;
use crate::value::Value;
use super::error::{DecodeError, ErrorKind, ReadError};
use super::source::{IntoSource, Source};


//------------ Decoder -------------------------------------------------------

/// A decoder for BER encoded data.
///
/// The decoder turns the encoding of a single value into a [`Node`],
/// descending into constructed values. The type of each value is looked up
/// in the decoder’s [`Registry`] which learns about all identifiers seen
/// along the way.
///
/// Nesting is limited to [`max_depth`][Self::max_depth] levels below the
/// outermost value so that hostile data cannot exhaust the stack.
#[derive(Clone, Debug)]
pub struct Decoder {
    mode: Mode,
    max_depth: usize,
    registry: Registry,
}

impl Decoder {
    /// The default limit for nesting of values.
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    /// Creates a new decoder for the given mode.
    pub fn new(mode: Mode) -> Self {
        Decoder {
            mode,
            max_depth: Self::DEFAULT_MAX_DEPTH,
            registry: Registry::new(),
        }
    }

    /// Changes the limit for nesting of values.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Returns the encoding rules the decoder accepts.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns the limit for nesting of values.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Returns the registry with all types seen so far.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Forgets all types that aren’t built in.
    ///
    /// See [`take_from`][Self::take_from] for when this is useful.
    pub fn clear_registry(&mut self) {
        self.registry.clear_generic()
    }

    /// Decodes the value at the start of `source`.
    ///
    /// Any data following the value is ignored.
    pub fn decode(
        &mut self, source: impl IntoSource
    ) -> Result<Node, DecodeError> {
        self.take_from(&mut source.into_source())
    }

    /// Reads all data from `reader` and decodes the value at its start.
    pub fn decode_reader(
        &mut self, mut reader: impl io::Read
    ) -> Result<Node, ReadError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Ok(self.decode(data)?)
    }

    /// Takes a single value from the beginning of `source`.
    ///
    /// The source is advanced past the value, so this can be used to
    /// decode a sequence of values one after another.
    ///
    /// Every identifier not seen before adds an entry to the decoder’s
    /// registry, and entries are never dropped on their own. A decoder kept
    /// around for untrusted data should call
    /// [`clear_registry`][Self::clear_registry] from time to time.
    pub fn take_from(
        &mut self, source: &mut Source
    ) -> Result<Node, DecodeError> {
        self.take_node(source, 0)
    }

    fn take_node(
        &mut self, source: &mut Source, depth: usize
    ) -> Result<Node, DecodeError> {
        let start = source.pos();
        if depth > self.max_depth {
            return Err(DecodeError::new(ErrorKind::NestingTooDeep, start))
        }
        let limited = source.is_limited();
        let header = Header::take_from(source, self.mode).map_err(|err| {
            if limited { err.into_truncated_object() } else { err }
        })?;
        let header_len = source.pos() - start;
        let ident = header.ident();
        log::trace!(
            "{} with {:?} at position {}", ident, header.length(), start
        );
        let desc = self.registry.resolve(ident);

        let len = match header.length().as_definite() {
            Some(len) => len,
            None => {
                if !ident.is_constructed() {
                    return Err(DecodeError::new(
                        ErrorKind::InvalidValue(
                            "primitive value with indefinite length"
                        ),
                        start
                    ))
                }
                let children = self.take_indefinite(source, depth)?;
                return Ok(Node::decoded(
                    ident, Value::Constructed(children),
                    header_len, source.pos() - start, true
                ))
            }
        };

        let mut content = match source.split_to(len) {
            Some(content) => content,
            None => {
                return Err(DecodeError::new(
                    if limited {
                        ErrorKind::TruncatedObject
                    }
                    else {
                        ErrorKind::TruncatedInput
                    },
                    source.pos()
                ))
            }
        };
        let value = if ident.is_constructed() {
            Value::Constructed(self.take_definite(&mut content, depth)?)
        }
        else {
            let pos = content.pos();
            Value::decode_primitive(
                desc.kind(), content.take_all(), self.mode
            ).map_err(|kind| DecodeError::new(kind, pos))?
        };
        Ok(Node::decoded(ident, value, header_len, header_len + len, false))
    }

    /// Takes the nested values of a definite length constructed value.
    ///
    /// The content must contain complete values only.
    fn take_definite(
        &mut self, content: &mut Source, depth: usize
    ) -> Result<Vec<Node>, DecodeError> {
        let mut res = Vec::new();
        while !content.is_exhausted() {
            res.push(self.take_node(content, depth + 1)?);
        }
        Ok(res)
    }

    /// Takes the nested values of an indefinite length constructed value.
    ///
    /// The end-of-contents marker is included as the last value.
    fn take_indefinite(
        &mut self, source: &mut Source, depth: usize
    ) -> Result<Vec<Node>, DecodeError> {
        let mut res = Vec::new();
        loop {
            if source.is_exhausted() {
                return Err(DecodeError::new(
                    ErrorKind::UnterminatedIndefiniteObject, source.pos()
                ))
            }
            let node = self.take_node(source, depth + 1)?;
            let done = node.is_end_of_contents();
            res.push(node);
            if done {
                return Ok(res)
            }
        }
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(Mode::default())
    }
}


//============ Tests =========================================================
