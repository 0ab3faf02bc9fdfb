//! CLI output formatting.
//!
//! Renders the built source tree and stage summaries for the terminal.
//! Each view has a `format_*` function returning lines (pure, testable)
//! and a `print_*` wrapper that writes to stdout; stage banners are
//! printed by `main` between pipeline stages.
//!
//! ```text
//! blog/ → public
//!     about/ (article)
//!         index.md → index.html
//!     posts/ (2 entries)
//!         first-post/ (article)
//!             index.md → index.html
//!             diagram.png
//! ```

use crate::generate::GenerateSummary;
use crate::tree::{NodeId, NodeKind, Tree};

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format the whole source tree as an indented listing.
pub fn format_tree(tree: &Tree) -> Vec<String> {
    let root = tree.node(Tree::ROOT);
    let mut lines = vec![format!(
        "{}/ → {}",
        root.name(),
        root.dest.display()
    )];
    for &child in &root.children {
        format_subtree(tree, child, 1, &mut lines);
    }
    lines
}

fn format_subtree(tree: &Tree, id: NodeId, depth: usize, lines: &mut Vec<String>) {
    let node = tree.node(id);
    let line = match node.kind {
        NodeKind::Category => {
            format!("{}{}/ ({} entries)", indent(depth), node.name(), node.children.len())
        }
        NodeKind::Article => format!("{}{}/ (article)", indent(depth), node.name()),
        NodeKind::Leaf => {
            let name = node.name();
            let dest_name = node.dest_name();
            if name == dest_name {
                format!("{}{}", indent(depth), name)
            } else {
                format!("{}{} → {}", indent(depth), name, dest_name)
            }
        }
    };
    lines.push(line);
    for &child in &node.children {
        format_subtree(tree, child, depth + 1, lines);
    }
}

/// One-line generation summary.
pub fn format_generate_summary(summary: &GenerateSummary) -> String {
    format!(
        "Generated {} category {}, {} {}, {} {} copied",
        summary.categories,
        plural(summary.categories, "index", "indexes"),
        summary.articles,
        plural(summary.articles, "article", "articles"),
        summary.copied,
        plural(summary.copied, "file", "files"),
    )
}

fn plural<'a>(n: usize, one: &'a str, many: &'a str) -> &'a str {
    if n == 1 { one } else { many }
}

pub fn print_tree(tree: &Tree) {
    for line in format_tree(tree) {
        println!("{line}");
    }
}

pub fn print_generate_summary(summary: &GenerateSummary) {
    println!("{}", format_generate_summary(summary));
}
