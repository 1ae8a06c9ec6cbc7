//! Namespace key ranges
//!
//! Every key of namespace `n` lies in `[encode(n), encode(n + 1))`. The last
//! namespace (`u32::MAX`) has no successor, so its range is open-ended.

use super::codec::{encode_prefix, EncodedPrefix, NamespaceId, PREFIX_LEN};

/// Half-open key range owned by one namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixRange {
    namespace: NamespaceId,
    lower: EncodedPrefix,
    /// `None` means unbounded (namespace `u32::MAX`)
    upper: Option<EncodedPrefix>,
}

impl PrefixRange {
    /// Range covering every key of `namespace`
    pub fn of(namespace: NamespaceId) -> Self {
        Self {
            namespace,
            lower: encode_prefix(namespace),
            upper: namespace.next().map(encode_prefix),
        }
    }

    pub fn namespace(&self) -> NamespaceId {
        self.namespace
    }

    /// Inclusive lower bound
    pub fn lower_bound(&self) -> &[u8] {
        &self.lower.as_bytes()[..]
    }

    /// Exclusive upper bound, `None` when unbounded
    pub fn upper_bound(&self) -> Option<&[u8]> {
        self.upper.as_ref().map(|p| &p.as_bytes()[..])
    }

    /// Whether `key` belongs to this namespace
    pub fn contains(&self, key: &[u8]) -> bool {
        key.len() >= PREFIX_LEN && key[..PREFIX_LEN] == self.lower.as_bytes()[..]
    }
}
