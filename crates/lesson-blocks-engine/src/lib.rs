pub mod blocks;
pub mod codec;
pub mod editor;
pub mod io;
pub mod models;

// Re-export key types for easier usage
pub use blocks::{
    Block, BlockId, BlockKind, BlockType, CalloutKind, IdSource, ListKind, SequentialIdSource,
    UuidIdSource, VideoSource,
};
pub use codec::{blocks_to_markdown, markdown_to_blocks};
pub use editor::{BlockEditor, Cmd, MoveDir, Patch};
pub use models::LessonFile;
