//! # mdblog
//!
//! A minimal static blog generator. Your filesystem is the data source: a
//! directory with an `index.md` is an article, a directory without one is
//! a category, and everything else is copied through unchanged. The
//! generated site mirrors the source hierarchy and is published to a
//! remote host with a backup-swap over ssh.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! ```text
//! 1. Tree      blog/     →  in-memory tree   (classify + map destinations)
//! 2. Generate  tree      →  public/          (render + copy, destructive)
//! 3. Package   public/   →  site.tar.gz      (internal root renamed to alias)
//! 4. Deploy    archive   →  remote web root  (backup-swap under sudo)
//! ```
//!
//! Stages run strictly in sequence; a failure anywhere aborts the run and
//! leaves whatever partial state exists (on disk or remote) as-is. There
//! is no incremental mode: stage 2 deletes the output root and rebuilds
//! it, which keeps stale artifacts impossible at the cost of rerendering
//! everything.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`tree`] | Stage 1 — breadth-first walk, entry classification, destination mapping |
//! | [`generate`] | Stage 2 — renders category indexes and articles, copies the rest |
//! | [`package`] | Stage 3 — archives the output via system `tar` |
//! | [`deploy`] | Stage 4 — scp upload + privileged backup-swap command sequence |
//! | [`frontmatter`] | `---`-delimited key/value block parsing, typed article metadata |
//! | [`listing`] | Category listing entries and their display order |
//! | [`markdown`] | Markdown-to-HTML via pulldown-cmark |
//! | [`templates`] | Maud templates for article and category pages |
//! | [`config`] | `config.toml` loading and validation |
//! | [`exec`] | External command execution for `tar`/`scp`/`ssh` |
//! | [`output`] | CLI output formatting — tree display and stage summaries |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Files
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/) rather than a
//! runtime template directory: malformed markup is a compile error, all
//! interpolation is escaped by default, and there are no template files to
//! ship or get out of sync with the binary.
//!
//! ## System tar/ssh Over Protocol Crates
//!
//! Packaging and deployment shell out to `tar`, `scp`, and `ssh`. The
//! machines this targets already have them, ssh config and agents work
//! unchanged, and the privileged remote sequence stays a plain list of
//! commands an operator can read and replay by hand.

pub mod config;
pub mod deploy;
pub mod exec;
pub mod frontmatter;
pub mod generate;
pub mod listing;
pub mod markdown;
pub mod output;
pub mod package;
pub mod templates;
pub mod tree;
