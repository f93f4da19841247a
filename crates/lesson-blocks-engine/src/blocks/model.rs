use serde::{Deserialize, Serialize};

use crate::blocks::ids::{BlockId, IdSource};

/// The closed set of block types a lesson document can contain.
///
/// This is the tag used by "add block" menus, [`Block::empty`] and retype
/// operations; the per-type payload lives in [`BlockKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockType {
    #[serde(rename = "heading-1")]
    Heading1,
    #[serde(rename = "heading-2")]
    Heading2,
    #[serde(rename = "heading-3")]
    Heading3,
    #[serde(rename = "paragraph")]
    Paragraph,
    #[serde(rename = "quote")]
    Quote,
    #[serde(rename = "code")]
    Code,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "table")]
    Table,
    #[serde(rename = "list")]
    List,
    #[serde(rename = "callout")]
    Callout,
    #[serde(rename = "divider")]
    Divider,
}

impl BlockType {
    /// Every block type, in menu order.
    pub const ALL: [BlockType; 12] = [
        BlockType::Heading1,
        BlockType::Heading2,
        BlockType::Heading3,
        BlockType::Paragraph,
        BlockType::Quote,
        BlockType::Code,
        BlockType::Image,
        BlockType::Video,
        BlockType::Table,
        BlockType::List,
        BlockType::Callout,
        BlockType::Divider,
    ];

    /// Human-readable label for menus and the TUI.
    pub fn label(&self) -> &'static str {
        match self {
            BlockType::Heading1 => "Heading 1",
            BlockType::Heading2 => "Heading 2",
            BlockType::Heading3 => "Heading 3",
            BlockType::Paragraph => "Paragraph",
            BlockType::Quote => "Quote",
            BlockType::Code => "Code",
            BlockType::Image => "Image",
            BlockType::Video => "Video",
            BlockType::Table => "Table",
            BlockType::List => "List",
            BlockType::Callout => "Callout",
            BlockType::Divider => "Divider",
        }
    }
}

/// List flavor for list blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ListKind {
    Bullet,
    Numbered,
}

/// Severity flavor for callout blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalloutKind {
    Info,
    Warning,
    Success,
    Error,
}

impl CalloutKind {
    /// Icon from the fixed four-entry table used when rendering callouts.
    pub fn icon(&self) -> &'static str {
        match self {
            CalloutKind::Info => "ℹ️",
            CalloutKind::Warning => "⚠️",
            CalloutKind::Success => "✅",
            CalloutKind::Error => "❌",
        }
    }

    /// Uppercase tag rendered after the icon.
    pub fn tag(&self) -> &'static str {
        match self {
            CalloutKind::Info => "INFO",
            CalloutKind::Warning => "WARNING",
            CalloutKind::Success => "SUCCESS",
            CalloutKind::Error => "ERROR",
        }
    }
}

/// How a video block's media was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VideoSource {
    /// Pasted link (YouTube or similar).
    Link,
    /// File uploaded through the platform's storage backend.
    Upload,
}

/// Type tag plus type-specific payload, as one sum type.
///
/// The original model kept a string `type` field next to a bag of optional
/// `meta` fields; folding both into one enum makes mismatched payloads (a
/// table block carrying list items) unrepresentable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockKind {
    Heading1,
    Heading2,
    Heading3,
    Paragraph,
    Quote,
    Divider,
    Code {
        language: String,
    },
    Image {
        url: String,
        alt: String,
        caption: String,
    },
    Video {
        url: String,
        source: VideoSource,
    },
    Table {
        /// Row-major cells. The default payload is a rectangular 2x2 grid;
        /// parsed tables keep whatever cells each source line yielded and
        /// can be ragged.
        rows: Vec<Vec<String>>,
    },
    List {
        kind: ListKind,
        items: Vec<String>,
    },
    Callout {
        kind: CalloutKind,
    },
}

impl BlockKind {
    /// Default payload for a freshly created block of the given type.
    ///
    /// Tables start as a 2×2 grid of empty cells, lists as a bullet list with
    /// one empty item, callouts as info, code fences with a preset language.
    pub fn empty(ty: BlockType) -> Self {
        match ty {
            BlockType::Heading1 => BlockKind::Heading1,
            BlockType::Heading2 => BlockKind::Heading2,
            BlockType::Heading3 => BlockKind::Heading3,
            BlockType::Paragraph => BlockKind::Paragraph,
            BlockType::Quote => BlockKind::Quote,
            BlockType::Divider => BlockKind::Divider,
            BlockType::Code => BlockKind::Code {
                language: "javascript".to_string(),
            },
            BlockType::Image => BlockKind::Image {
                url: String::new(),
                alt: String::new(),
                caption: String::new(),
            },
            BlockType::Video => BlockKind::Video {
                url: String::new(),
                source: VideoSource::Link,
            },
            BlockType::Table => BlockKind::Table {
                rows: vec![vec![String::new(); 2]; 2],
            },
            BlockType::List => BlockKind::List {
                kind: ListKind::Bullet,
                items: vec![String::new()],
            },
            BlockType::Callout => BlockKind::Callout {
                kind: CalloutKind::Info,
            },
        }
    }

    /// The type tag this kind belongs to.
    pub fn block_type(&self) -> BlockType {
        match self {
            BlockKind::Heading1 => BlockType::Heading1,
            BlockKind::Heading2 => BlockType::Heading2,
            BlockKind::Heading3 => BlockType::Heading3,
            BlockKind::Paragraph => BlockType::Paragraph,
            BlockKind::Quote => BlockType::Quote,
            BlockKind::Divider => BlockType::Divider,
            BlockKind::Code { .. } => BlockType::Code,
            BlockKind::Image { .. } => BlockType::Image,
            BlockKind::Video { .. } => BlockType::Video,
            BlockKind::Table { .. } => BlockType::Table,
            BlockKind::List { .. } => BlockType::List,
            BlockKind::Callout { .. } => BlockType::Callout,
        }
    }
}

/// One discrete content unit in a lesson document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub kind: BlockKind,
    /// Plain-text payload. Body text for text kinds, raw reference for media
    /// kinds, empty for structural kinds whose payload lives in `kind`.
    pub content: String,
}

impl Block {
    /// Create a fresh, empty block of the given type with a new id.
    pub fn empty(ty: BlockType, ids: &mut dyn IdSource) -> Self {
        Self {
            id: ids.next_id(),
            kind: BlockKind::empty(ty),
            content: String::new(),
        }
    }

    pub fn block_type(&self) -> BlockType {
        self.kind.block_type()
    }

    /// Clone this block under a fresh id (same kind and content).
    pub fn duplicated(&self, ids: &mut dyn IdSource) -> Self {
        Self {
            id: ids.next_id(),
            kind: self.kind.clone(),
            content: self.content.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::ids::SequentialIdSource;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(BlockType::Heading1, BlockKind::Heading1)]
    #[case(BlockType::Heading2, BlockKind::Heading2)]
    #[case(BlockType::Heading3, BlockKind::Heading3)]
    #[case(BlockType::Paragraph, BlockKind::Paragraph)]
    #[case(BlockType::Quote, BlockKind::Quote)]
    #[case(BlockType::Divider, BlockKind::Divider)]
    #[case(BlockType::Code, BlockKind::Code { language: "javascript".to_string() })]
    #[case(BlockType::Image, BlockKind::Image {
        url: String::new(),
        alt: String::new(),
        caption: String::new(),
    })]
    #[case(BlockType::Video, BlockKind::Video { url: String::new(), source: VideoSource::Link })]
    #[case(BlockType::Table, BlockKind::Table {
        rows: vec![
            vec![String::new(), String::new()],
            vec![String::new(), String::new()],
        ],
    })]
    #[case(BlockType::List, BlockKind::List {
        kind: ListKind::Bullet,
        items: vec![String::new()],
    })]
    #[case(BlockType::Callout, BlockKind::Callout { kind: CalloutKind::Info })]
    fn empty_block_has_documented_default(#[case] ty: BlockType, #[case] expected: BlockKind) {
        let mut ids = SequentialIdSource::default();
        let block = Block::empty(ty, &mut ids);

        assert_eq!(block.content, "");
        assert_eq!(block.kind, expected);
        assert_eq!(block.block_type(), ty);
    }

    #[test]
    fn kind_round_trips_through_type_tag() {
        for ty in BlockType::ALL {
            assert_eq!(BlockKind::empty(ty).block_type(), ty);
        }
    }

    #[test]
    fn duplicated_block_keeps_kind_and_content_but_not_id() {
        let mut ids = SequentialIdSource::default();
        let mut original = Block::empty(BlockType::Quote, &mut ids);
        original.content = "primum non nocere".to_string();

        let copy = original.duplicated(&mut ids);

        assert_ne!(copy.id, original.id);
        assert_eq!(copy.kind, original.kind);
        assert_eq!(copy.content, original.content);
    }
}
