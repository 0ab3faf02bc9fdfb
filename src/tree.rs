//! Filesystem scanning: builds the source tree the generator walks.
//!
//! Stage 1 of the mdblog pipeline. Walks the content directory breadth-first
//! and mirrors it as an in-memory tree, classifying every entry on the way.
//!
//! ## Directory Structure
//!
//! mdblog expects nothing beyond plain directories and files:
//!
//! ```text
//! blog/                            # Content root
//! ├── config.toml                  # Site configuration (optional, ignored by the walk)
//! ├── about/                       # Article: directory with an index.md
//! │   └── index.md
//! ├── posts/                       # Category: directory without an index.md
//! │   ├── first-post/              # Article
//! │   │   ├── index.md             # Front matter + body
//! │   │   └── diagram.png          # Extra files ride along unchanged
//! │   └── second-post/
//! │       └── index.md
//! └── images/                      # Assets category (no index page generated)
//!     └── avatar.png
//! ```
//!
//! ## Classification
//!
//! - Any non-directory entry is a [`NodeKind::Leaf`].
//! - A directory with a direct child named `index.md` is a [`NodeKind::Article`].
//! - Any other directory is a [`NodeKind::Category`].
//!
//! ## Destination mapping
//!
//! Each node's destination is the output root plus the node's path relative
//! to the content root. The one exception is a leaf named `index.md`, which
//! maps to `index.html` in the same directory. The root node's destination
//! is always the output root itself, whatever the content root is called.
//!
//! ## Determinism
//!
//! Directory entries are enumerated name-sorted, so two builds over the
//! same layout produce the same tree and, downstream, byte-identical
//! output. Display ordering inside category listings is a separate concern
//! handled by [`crate::listing`].
//!
//! Entries whose name matches the ignore set (version-control directories,
//! license files, the config file itself) are skipped at any depth: no node
//! is created and nothing below them is visited. Any traversal I/O error
//! aborts the build; a partial tree is never returned.

use crate::frontmatter::ArticleMeta;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TreeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("content root is not a directory: {0}")]
    NotADirectory(PathBuf),
}

/// What a filesystem entry is, decided once during the walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Any non-directory entry.
    Leaf,
    /// A directory with a direct `index.md` child.
    Article,
    /// A directory without an `index.md` child.
    Category,
}

/// Index of a node in its [`Tree`]'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

/// One filesystem entry in the mirrored tree.
#[derive(Debug)]
pub struct Node {
    /// Absolute or relative path of the entry in the content tree.
    pub source: PathBuf,
    /// Where this entry materializes under the output root.
    pub dest: PathBuf,
    pub kind: NodeKind,
    /// Children in name-sorted enumeration order. Fixed after the build.
    pub children: Vec<NodeId>,
    /// Article front matter, filled lazily by the generator when the
    /// parent category lists this node. `None` until then.
    pub meta: Option<ArticleMeta>,
}

impl Node {
    /// The entry's own name in the source tree.
    pub fn name(&self) -> String {
        self.source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The entry's name at the destination (`index.html` for `index.md`).
    pub fn dest_name(&self) -> String {
        self.dest
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Arena of nodes produced by one [`build`] call.
///
/// Nothing here outlives the run: the next build starts from an empty
/// arena, so no tree state leaks between invocations.
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// The content root. Always present; a tree has at least one node.
    pub const ROOT: NodeId = NodeId(0);

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All node ids in creation (breadth-first) order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.nodes.len()).map(NodeId)
    }
}

/// Classify a single filesystem entry.
///
/// Directories are listed to check for a direct `index.md` child; the
/// listing failure of an unreadable directory is fatal, like every other
/// traversal error.
pub fn classify(path: &Path) -> Result<NodeKind, TreeError> {
    if !fs::metadata(path)?.is_dir() {
        return Ok(NodeKind::Leaf);
    }
    for entry in fs::read_dir(path)? {
        if entry?.file_name() == "index.md" {
            return Ok(NodeKind::Article);
        }
    }
    Ok(NodeKind::Category)
}

/// Build the source tree for one run.
///
/// Breadth-first from `source_root`: every non-ignored entry becomes
/// exactly one node, linked under its parent by arena index. The root
/// node's destination is `output_root` regardless of the root's own name.
pub fn build(
    source_root: &Path,
    output_root: &Path,
    ignore: &[String],
) -> Result<Tree, TreeError> {
    let root_kind = classify(source_root)?;
    if root_kind == NodeKind::Leaf {
        return Err(TreeError::NotADirectory(source_root.to_path_buf()));
    }

    let mut nodes = vec![Node {
        source: source_root.to_path_buf(),
        dest: output_root.to_path_buf(),
        kind: root_kind,
        children: Vec::new(),
        meta: None,
    }];

    let mut queue = VecDeque::from([Tree::ROOT]);
    while let Some(parent) = queue.pop_front() {
        for path in list_entries(&nodes[parent.0].source, ignore)? {
            let kind = classify(&path)?;
            let rel = path.strip_prefix(source_root).unwrap();
            let mut dest = output_root.join(rel);
            if kind == NodeKind::Leaf && path.file_name().is_some_and(|n| n == "index.md") {
                dest = dest.parent().unwrap().join("index.html");
            }

            let id = NodeId(nodes.len());
            nodes.push(Node {
                source: path,
                dest,
                kind,
                children: Vec::new(),
                meta: None,
            });
            nodes[parent.0].children.push(id);
            if kind != NodeKind::Leaf {
                queue.push_back(id);
            }
        }
    }

    Ok(Tree { nodes })
}

/// List a directory's non-ignored entries, name-sorted.
fn list_entries(dir: &Path, ignore: &[String]) -> Result<Vec<PathBuf>, TreeError> {
    let mut entries = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name();
        if ignore.iter().any(|ig| name.as_os_str() == ig.as_str()) {
            continue;
        }
        entries.push(entry.path());
    }
    entries.sort();
    Ok(entries)
}
