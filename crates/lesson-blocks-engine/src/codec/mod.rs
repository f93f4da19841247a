//! Bidirectional codec between a block sequence and its markdown projection.
//!
//! [`blocks_to_markdown`] is the authoritative rendering; [`markdown_to_blocks`]
//! is a best-effort, line-oriented parse of the same format. The pair is
//! semantically round-trip stable for headings, paragraphs, quotes, dividers,
//! code, images, lists and tables. Callouts, video embeds and image captions
//! are documented one-way renderings (see the parser docs).

pub mod parse;
pub mod render;

pub use parse::markdown_to_blocks;
pub use render::blocks_to_markdown;
