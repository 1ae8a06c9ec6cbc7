//! Prefix Module
//!
//! Maps namespace ids onto key prefixes so one ordered store can host many
//! independent collections and indexes.
//!
//! ## Responsibilities
//! - Encode a `NamespaceId` as a fixed-width, order-preserving prefix
//! - Extract the namespace from arbitrary stored keys without panicking
//! - Compute the key range owned by one namespace
//!
//! ## Key Layout
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────┐
//! │ NamespaceId (4, BE u32)  │  namespace-local key (opaque)    │
//! └──────────────────────────┴──────────────────────────────────┘
//! ```
//!
//! The prefix is big-endian so byte order equals numeric order: a forward
//! scan visits namespaces in ascending id order, and seeking to the last key
//! of the store lands in the highest namespace. This layout is persisted;
//! width and endianness must never change.

mod codec;
mod range;

pub use codec::{encode_key, encode_prefix, extract_prefix, EncodedPrefix, NamespaceId, PREFIX_LEN};
pub use range::PrefixRange;
