//! Markdown-to-HTML rendering.
//!
//! Thin wrapper over `pulldown-cmark` with the extensions article bodies
//! rely on: tables, footnotes, and strikethrough. Fenced code blocks and
//! loose lists are part of core CommonMark and need no flag.

use pulldown_cmark::{Options, Parser, html};

/// Render Markdown text to an HTML fragment.
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, options);
    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}
