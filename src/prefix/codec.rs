//! Prefix codec
//!
//! Encoding and decoding of the 4-byte namespace prefix.

use std::fmt;

use bytes::{BufMut, Bytes, BytesMut};

/// Width of the encoded namespace prefix (in bytes)
pub const PREFIX_LEN: usize = 4;

/// Identifier of one logical collection or index sharing the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct NamespaceId(u32);

impl NamespaceId {
    pub const MIN: NamespaceId = NamespaceId(0);
    pub const MAX: NamespaceId = NamespaceId(u32::MAX);

    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u32 {
        self.0
    }

    /// The next namespace id, or `None` at `u32::MAX`
    pub fn next(self) -> Option<NamespaceId> {
        self.0.checked_add(1).map(NamespaceId)
    }
}

impl From<u32> for NamespaceId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NamespaceId> for u32 {
    fn from(id: NamespaceId) -> Self {
        id.0
    }
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Big-endian serialization of a [`NamespaceId`].
///
/// Ordering of encoded prefixes (derived, lexicographic on the bytes) matches
/// the numeric ordering of the ids they encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EncodedPrefix([u8; PREFIX_LEN]);

impl EncodedPrefix {
    pub fn as_bytes(&self) -> &[u8; PREFIX_LEN] {
        &self.0
    }

    /// The namespace this prefix encodes
    pub fn namespace(&self) -> NamespaceId {
        NamespaceId(u32::from_be_bytes(self.0))
    }
}

impl AsRef<[u8]> for EncodedPrefix {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Encode a namespace id as its 4-byte big-endian prefix
pub fn encode_prefix(id: NamespaceId) -> EncodedPrefix {
    EncodedPrefix(id.0.to_be_bytes())
}

/// Extract the namespace prefix from a stored key
///
/// Returns the namespace and the unconsumed namespace-local bytes, or `None`
/// when the key is shorter than the prefix (engine sentinel keys can be).
pub fn extract_prefix(key: &[u8]) -> Option<(NamespaceId, &[u8])> {
    if key.len() < PREFIX_LEN {
        return None;
    }

    let (head, rest) = key.split_at(PREFIX_LEN);
    let id = u32::from_be_bytes([head[0], head[1], head[2], head[3]]);
    Some((NamespaceId(id), rest))
}

/// Build a stored key: prefix followed by the namespace-local key
pub fn encode_key(id: NamespaceId, local_key: &[u8]) -> Bytes {
    let mut key = BytesMut::with_capacity(PREFIX_LEN + local_key.len());
    key.put_u32(id.0); // big-endian
    key.put_slice(local_key);
    key.freeze()
}
