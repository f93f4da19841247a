use std::sync::OnceLock;

use regex::Regex;

use crate::blocks::{Block, BlockKind, BlockType, IdSource, ListKind};

/// Parse a markdown string into an ordered block sequence.
///
/// Single pass over lines with a variable-lookahead cursor: most rules
/// consume one line, while code fences, lists and tables consume a run of
/// lines. Rules are checked in a fixed order and the first match wins;
/// anything unmatched becomes a single-line paragraph, so parsing never
/// fails, it only approximates.
///
/// The result is never empty: blank input (and the degenerate case of no
/// rule emitting a block) yields one empty paragraph, which keeps the
/// editor's at-least-one-block invariant intact at the source.
///
/// Known asymmetries with [`super::render::blocks_to_markdown`]: callout
/// lines come back as quotes, `{% youtube %}` embeds and `*caption*` lines
/// come back as paragraphs.
pub fn markdown_to_blocks(markdown: &str, ids: &mut dyn IdSource) -> Vec<Block> {
    if markdown.trim().is_empty() {
        return vec![Block::empty(BlockType::Paragraph, ids)];
    }

    let lines: Vec<&str> = markdown.split('\n').collect();
    let mut blocks = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        let line = lines[i];

        // 1. Blank lines separate blocks and emit nothing.
        if line.trim().is_empty() {
            i += 1;
            continue;
        }

        // 2. Headings, longest prefix first so "## " never matches as "# ".
        if let Some(rest) = line.strip_prefix("### ") {
            blocks.push(text_block(ids, BlockKind::Heading3, rest));
            i += 1;
            continue;
        }
        if let Some(rest) = line.strip_prefix("## ") {
            blocks.push(text_block(ids, BlockKind::Heading2, rest));
            i += 1;
            continue;
        }
        if let Some(rest) = line.strip_prefix("# ") {
            blocks.push(text_block(ids, BlockKind::Heading1, rest));
            i += 1;
            continue;
        }

        // 3. Divider: the line is exactly "---".
        if line == "---" {
            blocks.push(text_block(ids, BlockKind::Divider, ""));
            i += 1;
            continue;
        }

        // 4. Code fence: language on the opening line, body verbatim until a
        // closing fence (consumed, excluded) or end of input.
        if let Some(language) = line.strip_prefix("```") {
            let mut body = Vec::new();
            i += 1;
            while i < lines.len() && !lines[i].starts_with("```") {
                body.push(lines[i]);
                i += 1;
            }
            if i < lines.len() {
                i += 1; // closing fence
            }
            blocks.push(text_block(
                ids,
                BlockKind::Code {
                    language: language.to_string(),
                },
                &body.join("\n"),
            ));
            continue;
        }

        // 5. Quote. Callout-encoded lines land here too: the parser has no
        // rule for the icon-prefixed form, so they round-trip as quotes.
        if let Some(rest) = line.strip_prefix("> ") {
            blocks.push(text_block(ids, BlockKind::Quote, rest));
            i += 1;
            continue;
        }

        // 6. Inline image. A following "*caption*" line is not attached; it
        // falls through to the paragraph rule on the next iteration.
        if let Some(captures) = image_regex().captures(line) {
            blocks.push(text_block(
                ids,
                BlockKind::Image {
                    alt: captures[1].to_string(),
                    url: captures[2].to_string(),
                    caption: String::new(),
                },
                "",
            ));
            i += 1;
            continue;
        }

        // 7. Bullet list: a run of "- " lines, prefix stripped.
        if line.starts_with("- ") {
            let mut items = Vec::new();
            while i < lines.len() && lines[i].starts_with("- ") {
                items.push(lines[i][2..].to_string());
                i += 1;
            }
            blocks.push(text_block(
                ids,
                BlockKind::List {
                    kind: ListKind::Bullet,
                    items,
                },
                "",
            ));
            continue;
        }

        // 8. Numbered list: a run of "N. " lines, numeric prefix stripped.
        if numbered_regex().is_match(line) {
            let mut items = Vec::new();
            while i < lines.len() {
                let Some(m) = numbered_regex().find(lines[i]) else {
                    break;
                };
                items.push(lines[i][m.end()..].to_string());
                i += 1;
            }
            blocks.push(text_block(
                ids,
                BlockKind::List {
                    kind: ListKind::Numbered,
                    items,
                },
                "",
            ));
            continue;
        }

        // 9. Table: a run of lines containing "|". Separator lines (any
        // consumed line containing "---") are dropped; the rest are split on
        // "|" with cells trimmed and empty cells discarded.
        if line.contains('|') {
            let mut rows = Vec::new();
            while i < lines.len() && lines[i].contains('|') {
                let row_line = lines[i];
                i += 1;
                if row_line.contains("---") {
                    continue;
                }
                let cells: Vec<String> = row_line
                    .split('|')
                    .map(str::trim)
                    .filter(|cell| !cell.is_empty())
                    .map(str::to_string)
                    .collect();
                rows.push(cells);
            }
            blocks.push(text_block(ids, BlockKind::Table { rows }, ""));
            continue;
        }

        // 10. Fallback: the raw line as a single-line paragraph.
        blocks.push(text_block(ids, BlockKind::Paragraph, line));
        i += 1;
    }

    if blocks.is_empty() {
        blocks.push(Block::empty(BlockType::Paragraph, ids));
    }

    blocks
}

fn text_block(ids: &mut dyn IdSource, kind: BlockKind, content: &str) -> Block {
    Block {
        id: ids.next_id(),
        kind,
        content: content.to_string(),
    }
}

fn image_regex() -> &'static Regex {
    static IMAGE_REGEX: OnceLock<Regex> = OnceLock::new();
    IMAGE_REGEX
        .get_or_init(|| Regex::new(r"^!\[(.*?)\]\((.*?)\)$").expect("Invalid image regex"))
}

fn numbered_regex() -> &'static Regex {
    static NUMBERED_REGEX: OnceLock<Regex> = OnceLock::new();
    NUMBERED_REGEX.get_or_init(|| Regex::new(r"^\d+\.\s").expect("Invalid numbered-list regex"))
}
