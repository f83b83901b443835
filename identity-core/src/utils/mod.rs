// identity-core/src/utils/mod.rs

//! Shared helpers: fixed-width byte handling, chain digests, Move type tags.

pub mod bytes;
pub mod digest;
pub mod type_tag;

pub use digest::{ObjectDigest, TransactionDigest};
pub use type_tag::{parse_type_tag, StructTag, TypeTag};
