use crate::blocks::{Block, BlockKind, ListKind};

/// Render an ordered block sequence into a single markdown string.
///
/// Deterministic and total: every well-formed block renders without error,
/// and kinds with empty structural payloads (a table with no rows, a list
/// with no items) degrade to an empty string. Blocks are joined by a blank
/// line, which is what [`super::parse::markdown_to_blocks`] uses as the
/// block boundary on the way back in.
pub fn blocks_to_markdown(blocks: &[Block]) -> String {
    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn render_block(block: &Block) -> String {
    match &block.kind {
        BlockKind::Heading1 => format!("# {}", block.content),
        BlockKind::Heading2 => format!("## {}", block.content),
        BlockKind::Heading3 => format!("### {}", block.content),
        BlockKind::Paragraph => block.content.clone(),
        BlockKind::Quote => format!("> {}", block.content),
        BlockKind::Divider => "---".to_string(),
        BlockKind::Code { language } => {
            format!("```{}\n{}\n```", language, block.content)
        }
        BlockKind::Image { url, alt, caption } => {
            if caption.is_empty() {
                format!("![{alt}]({url})")
            } else {
                format!("![{alt}]({url})\n*{caption}*")
            }
        }
        // Legacy tag-style embed regardless of how the video was sourced.
        BlockKind::Video { url, .. } => {
            let target = if url.is_empty() { &block.content } else { url };
            format!("{{% youtube {target} %}}")
        }
        BlockKind::Table { rows } => render_table(rows),
        BlockKind::List { kind, items } => render_list(*kind, items),
        BlockKind::Callout { kind } => {
            format!("> {} **{}**: {}", kind.icon(), kind.tag(), block.content)
        }
    }
}

fn render_table(rows: &[Vec<String>]) -> String {
    let Some(header) = rows.first() else {
        return String::new();
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_row(header));
    lines.push(render_row(&vec!["---".to_string(); header.len()]));
    for row in &rows[1..] {
        lines.push(render_row(row));
    }
    lines.join("\n")
}

fn render_row(cells: &[String]) -> String {
    format!("| {} |", cells.join(" | "))
}

fn render_list(kind: ListKind, items: &[String]) -> String {
    let lines: Vec<String> = match kind {
        ListKind::Bullet => items.iter().map(|item| format!("- {item}")).collect(),
        ListKind::Numbered => items
            .iter()
            .enumerate()
            .map(|(n, item)| format!("{}. {item}", n + 1))
            .collect(),
    };
    lines.join("\n")
}
