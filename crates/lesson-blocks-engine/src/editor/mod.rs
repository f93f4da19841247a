//! Editor controller for a live lesson document.
//!
//! [`BlockEditor`] owns the ordered block sequence for the duration of an
//! editing session. It is hydrated from markdown exactly once at
//! construction; afterwards the markdown string is a derived, outward-only
//! projection. All edits flow through [`Cmd`] values applied with
//! [`BlockEditor::apply`], which returns a [`Patch`] telling the caller
//! whether (and with what) to propagate the serialized form: the
//! emit-on-mutation pattern, kept independent of any UI framework's change
//! detection.
//!
//! The controller has no error channel: commands naming an unknown block id
//! are silent no-ops, and no operation can leave the document empty.

use crate::blocks::{Block, BlockId, BlockKind, BlockType, IdSource, UuidIdSource};
use crate::codec::{blocks_to_markdown, markdown_to_blocks};

/// Direction for single-step block moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDir {
    Up,
    Down,
}

/// Commands that can be applied to the editor's block sequence.
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    /// Replace a block's content, and its kind payload if one is given.
    /// `kind: None` means "leave the payload unchanged", not "clear it".
    Update {
        id: BlockId,
        content: String,
        kind: Option<BlockKind>,
    },
    /// Insert a fresh default block of `ty`, after `after` when that id
    /// exists, otherwise at the end.
    Insert {
        ty: BlockType,
        after: Option<BlockId>,
    },
    /// Remove a block. Deleting the last remaining block replaces it with a
    /// fresh empty paragraph instead of emptying the document.
    Delete { id: BlockId },
    /// Clone a block under a fresh id, inserted immediately after the
    /// original.
    Duplicate { id: BlockId },
    /// Swap a block with its neighbor; no-op at the sequence boundaries.
    Move { id: BlockId, dir: MoveDir },
    /// Change a block's type: kind resets to the new type's default payload,
    /// id and content are preserved.
    Retype { id: BlockId, ty: BlockType },
    /// First phase of a two-phase reorder: record the source index.
    GrabBlock { index: usize },
    /// Second phase: commit to a destination index (or abort with `None`).
    /// The grab state is cleared regardless of outcome.
    DropBlock { index: Option<usize> },
}

/// Result of applying a command.
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// The re-serialized document, present only when it differs from the
    /// last externally synced string. Callers persist this outward.
    pub markdown: Option<String>,
    /// Editor version after the command; increments only on actual change.
    pub version: u64,
}

/// Stateful controller owning the block sequence of one editing session.
pub struct BlockEditor {
    blocks: Vec<Block>,
    /// Last markdown known to the outside: the hydration input initially,
    /// then whatever was last emitted through a [`Patch`].
    synced_markdown: String,
    version: u64,
    ids: Box<dyn IdSource>,
    grab_source: Option<usize>,
}

impl BlockEditor {
    /// Hydrate an editor from persisted markdown with random block ids.
    pub fn new(markdown: &str) -> Self {
        Self::with_ids(markdown, Box::new(UuidIdSource))
    }

    /// Hydrate with a caller-supplied id source (deterministic tests).
    pub fn with_ids(markdown: &str, mut ids: Box<dyn IdSource>) -> Self {
        let blocks = markdown_to_blocks(markdown, ids.as_mut());
        Self {
            blocks,
            synced_markdown: markdown.to_string(),
            version: 0,
            ids,
            grab_source: None,
        }
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// The current serialized form, regardless of sync state.
    pub fn markdown(&self) -> String {
        blocks_to_markdown(&self.blocks)
    }

    /// Apply a command and report what, if anything, changed.
    pub fn apply(&mut self, cmd: Cmd) -> Patch {
        let changed = match cmd {
            Cmd::Update { id, content, kind } => self.update(id, content, kind),
            Cmd::Insert { ty, after } => self.insert(ty, after),
            Cmd::Delete { id } => self.delete(id),
            Cmd::Duplicate { id } => self.duplicate(id),
            Cmd::Move { id, dir } => self.move_block(id, dir),
            Cmd::Retype { id, ty } => self.retype(id, ty),
            Cmd::GrabBlock { index } => {
                self.grab_source = Some(index);
                false
            }
            Cmd::DropBlock { index } => self.drop_block(index),
        };

        if !changed {
            return Patch {
                markdown: None,
                version: self.version,
            };
        }

        self.version += 1;
        let markdown = blocks_to_markdown(&self.blocks);
        if markdown == self.synced_markdown {
            return Patch {
                markdown: None,
                version: self.version,
            };
        }

        self.synced_markdown = markdown.clone();
        Patch {
            markdown: Some(markdown),
            version: self.version,
        }
    }

    fn position(&self, id: BlockId) -> Option<usize> {
        self.blocks.iter().position(|b| b.id == id)
    }

    fn update(&mut self, id: BlockId, content: String, kind: Option<BlockKind>) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let block = &mut self.blocks[index];
        block.content = content;
        if let Some(kind) = kind {
            block.kind = kind;
        }
        true
    }

    fn insert(&mut self, ty: BlockType, after: Option<BlockId>) -> bool {
        let block = Block::empty(ty, self.ids.as_mut());
        let at = after
            .and_then(|id| self.position(id))
            .map(|index| index + 1)
            .unwrap_or(self.blocks.len());
        self.blocks.insert(at, block);
        true
    }

    fn delete(&mut self, id: BlockId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.blocks.remove(index);
        if self.blocks.is_empty() {
            self.blocks
                .push(Block::empty(BlockType::Paragraph, self.ids.as_mut()));
        }
        true
    }

    fn duplicate(&mut self, id: BlockId) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        let copy = self.blocks[index].duplicated(self.ids.as_mut());
        self.blocks.insert(index + 1, copy);
        true
    }

    fn move_block(&mut self, id: BlockId, dir: MoveDir) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        match dir {
            MoveDir::Up if index > 0 => {
                self.blocks.swap(index - 1, index);
                true
            }
            MoveDir::Down if index + 1 < self.blocks.len() => {
                self.blocks.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    fn retype(&mut self, id: BlockId, ty: BlockType) -> bool {
        let Some(index) = self.position(id) else {
            return false;
        };
        self.blocks[index].kind = BlockKind::empty(ty);
        true
    }

    fn drop_block(&mut self, to: Option<usize>) -> bool {
        // Grab state is ephemeral: cleared whatever happens on drop.
        let from = self.grab_source.take();
        let (Some(from), Some(to)) = (from, to) else {
            return false;
        };
        if from == to || from >= self.blocks.len() {
            return false;
        }
        let block = self.blocks.remove(from);
        let to = to.min(self.blocks.len());
        self.blocks.insert(to, block);
        true
    }
}

impl std::fmt::Debug for BlockEditor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockEditor")
            .field("blocks", &self.blocks)
            .field("version", &self.version)
            .field("grab_source", &self.grab_source)
            .finish_non_exhaustive()
    }
}
