//! Block model for lesson documents.
//!
//! A lesson is an ordered sequence of [`Block`]s. Each block carries a stable
//! [`BlockId`], a [`BlockKind`] (type tag plus type-specific payload as one
//! sum type) and a plain-text `content` string. The [`crate::codec`] module
//! converts a block sequence to and from its markdown projection; the
//! [`crate::editor`] module owns the live sequence during an editing session.

pub mod ids;
pub mod model;

pub use ids::{BlockId, IdSource, SequentialIdSource, UuidIdSource};
pub use model::{Block, BlockKind, BlockType, CalloutKind, ListKind, VideoSource};
