//! Output tree generation.
//!
//! Stage 2 of the mdblog pipeline. Walks the built source tree breadth-first
//! and materializes the output directory from scratch.
//!
//! ## Generated layout
//!
//! ```text
//! public/
//! ├── index.html                 # Root category listing
//! ├── css/style.css              # Copied from the stylesheet directory
//! ├── about/
//! │   └── index.html             # Rendered from about/index.md
//! └── posts/
//!     ├── index.html             # Category listing, newest article first
//!     └── first-post/
//!         ├── index.html         # Rendered from first-post/index.md
//!         └── diagram.png        # Copied byte-for-byte
//! ```
//!
//! ## Rebuild semantics
//!
//! Regeneration is destructive: an existing output root is deleted in full
//! before anything is written, so stale artifacts can never survive a
//! source-side removal. Two runs over unchanged input produce
//! byte-identical trees.
//!
//! A node is processed by kind: categories get a directory and a listing
//! page (the assets directory gets neither), articles get a directory,
//! leaves get rendered (`index.md`) or copied (anything else). Article
//! front matter is read at the moment the parent category lists the
//! article and cached on the node, once per run.
//!
//! Any I/O or rendering failure aborts the run. Whatever partial output
//! exists at that point stays on disk; there is no rollback.

use crate::frontmatter::{self, ArticleMeta};
use crate::listing::{self, ListingEntry};
use crate::markdown;
use crate::templates;
use crate::tree::{NodeId, NodeKind, Tree};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to walk stylesheet directory: {0}")]
    Styles(#[from] walkdir::Error),
}

/// Counts reported after a generation run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenerateSummary {
    /// Category index pages written.
    pub categories: usize,
    /// Article pages rendered from `index.md`.
    pub articles: usize,
    /// Other leaves copied byte-for-byte.
    pub copied: usize,
}

/// Generate the output tree for a built source tree.
///
/// `assets_dir` names the category that gets no index page of its own
/// (its files are still copied through by their leaf nodes).
///
/// Takes the tree mutably: article metadata is filled in lazily, at most
/// once per article, when its parent category builds a listing.
pub fn generate(tree: &mut Tree, assets_dir: &str) -> Result<GenerateSummary, GenerateError> {
    let output_root = tree.node(Tree::ROOT).dest.clone();
    if output_root.exists() {
        fs::remove_dir_all(&output_root)?;
    }

    let mut summary = GenerateSummary::default();
    let mut queue = VecDeque::from([Tree::ROOT]);
    while let Some(id) = queue.pop_front() {
        queue.extend(tree.node(id).children.iter().copied());

        match tree.node(id).kind {
            NodeKind::Category => {
                if tree.node(id).name() == assets_dir {
                    continue;
                }
                write_category_index(tree, id)?;
                summary.categories += 1;
            }
            NodeKind::Article => {
                fs::create_dir_all(&tree.node(id).dest)?;
            }
            NodeKind::Leaf => {
                if write_leaf(tree, id)? {
                    summary.articles += 1;
                } else {
                    summary.copied += 1;
                }
            }
        }
    }

    Ok(summary)
}

/// Build, sort, render, and write one category's `index.html`.
fn write_category_index(tree: &mut Tree, id: NodeId) -> Result<(), GenerateError> {
    fs::create_dir_all(&tree.node(id).dest)?;

    let children: Vec<NodeId> = tree.node(id).children.clone();
    let mut entries = Vec::with_capacity(children.len());
    for child in children {
        if tree.node(child).kind == NodeKind::Article && tree.node(child).meta.is_none() {
            let meta = read_article_meta(tree, child)?;
            tree.node_mut(child).meta = Some(meta);
        }
        let node = tree.node(child);
        let name = node.dest_name();
        entries.push(ListingEntry {
            kind: node.kind,
            href: format!("{name}/index.html"),
            name,
            meta: node.meta.clone(),
        });
    }
    listing::sort(&mut entries);

    let name = tree.node(id).name();
    let html = templates::category_page(&name, &entries);
    fs::write(tree.node(id).dest.join("index.html"), html.into_string())?;
    Ok(())
}

fn read_article_meta(tree: &Tree, id: NodeId) -> Result<ArticleMeta, GenerateError> {
    let content = fs::read_to_string(tree.node(id).source.join("index.md"))?;
    Ok(ArticleMeta::extract(&content))
}

/// Materialize a leaf. Returns `true` when an article page was rendered,
/// `false` when the file was copied.
fn write_leaf(tree: &Tree, id: NodeId) -> Result<bool, GenerateError> {
    let node = tree.node(id);
    fs::create_dir_all(node.dest.parent().unwrap())?;

    if node.name() == "index.md" {
        let content = fs::read_to_string(&node.source)?;
        let body = markdown::to_html(frontmatter::strip(&content));
        let title = article_title(&node.source);
        let html = templates::article_page(&title, &body);
        fs::write(&node.dest, html.into_string())?;
        Ok(true)
    } else {
        fs::copy(&node.source, &node.dest)?;
        Ok(false)
    }
}

/// An article's page title is its directory's name.
fn article_title(index_source: &Path) -> String {
    index_source
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Copy the shared stylesheet directory into `<output_root>/css`.
///
/// Skipped without error when the directory does not exist; returns
/// whether anything was copied.
pub fn copy_styles(styles_dir: &Path, output_root: &Path) -> Result<bool, GenerateError> {
    if !styles_dir.is_dir() {
        return Ok(false);
    }
    let dest_root = output_root.join("css");
    for entry in WalkDir::new(styles_dir) {
        let entry = entry?;
        let rel = entry.path().strip_prefix(styles_dir).unwrap();
        let dest = dest_root.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)?;
        } else {
            fs::copy(entry.path(), &dest)?;
        }
    }
    Ok(true)
}
