//! HTML page templates.
//!
//! Two page shapes cover the whole site: an article page wrapping rendered
//! Markdown, and a category page listing a directory's children. Both are
//! [maud](https://maud.lambda.xyz/) templates: compile-time checked,
//! auto-escaped, no template files to ship or get out of sync.
//!
//! Pages link the shared stylesheet at `/css/style.css`, which the
//! generator copies from the site's stylesheet directory.

use crate::listing::ListingEntry;
use crate::tree::NodeKind;
use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Base HTML document shared by both page shapes.
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                link rel="stylesheet" href="/css/style.css";
            }
            body {
                (content)
            }
        }
    }
}

/// Render an article page around an already-rendered Markdown body.
///
/// `title` is the article's directory name; the body HTML is embedded
/// unescaped since it comes from the Markdown renderer.
pub fn article_page(title: &str, body_html: &str) -> Markup {
    base_document(
        title,
        html! {
            main.article-page {
                article {
                    (PreEscaped(body_html))
                }
            }
        },
    )
}

/// Render a category index page from its sorted listing.
pub fn category_page(name: &str, entries: &[ListingEntry]) -> Markup {
    base_document(
        name,
        html! {
            main.category-page {
                h1 { (name) }
                ul.listing {
                    @for entry in entries {
                        (listing_item(entry))
                    }
                }
            }
        },
    )
}

fn listing_item(entry: &ListingEntry) -> Markup {
    let label = entry
        .meta
        .as_ref()
        .and_then(|m| m.title.as_deref())
        .unwrap_or(&entry.name);

    html! {
        li class=(kind_class(entry.kind)) {
            a href=(entry.href) { (label) }
            @if let Some(meta) = &entry.meta {
                @if let Some(date) = &meta.date {
                    time.listing-date { (date) }
                }
                @if let Some(summary) = &meta.summary {
                    p.listing-summary { (summary) }
                }
            }
        }
    }
}

fn kind_class(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Category => "category",
        NodeKind::Article => "article",
        NodeKind::Leaf => "file",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::ArticleMeta;

    fn entry(kind: NodeKind, name: &str, meta: Option<ArticleMeta>) -> ListingEntry {
        ListingEntry {
            kind,
            name: name.to_string(),
            href: format!("{name}/index.html"),
            meta,
        }
    }

    #[test]
    fn article_page_embeds_body_and_title() {
        let page = article_page("first-post", "<p>hello</p>").into_string();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>first-post</title>"));
        assert!(page.contains("<p>hello</p>"));
    }

    #[test]
    fn pages_link_shared_stylesheet() {
        let page = article_page("t", "").into_string();
        assert!(page.contains(r#"href="/css/style.css""#));
    }

    #[test]
    fn category_page_lists_entries_with_hrefs() {
        let entries = vec![
            entry(NodeKind::Category, "archive", None),
            entry(NodeKind::Article, "post", None),
        ];
        let page = category_page("posts", &entries).into_string();
        assert!(page.contains("<h1>posts</h1>"));
        assert!(page.contains(r#"href="archive/index.html""#));
        assert!(page.contains(r#"href="post/index.html""#));
        assert!(page.contains(r#"class="category""#));
        assert!(page.contains(r#"class="article""#));
    }

    #[test]
    fn listing_prefers_front_matter_title() {
        let meta = ArticleMeta {
            title: Some("A Proper Title".to_string()),
            date: Some("2024-06-01T00:00:00+00:00".to_string()),
            summary: Some("what it is about".to_string()),
        };
        let entries = vec![entry(NodeKind::Article, "post", Some(meta))];
        let page = category_page("posts", &entries).into_string();
        assert!(page.contains("A Proper Title"));
        assert!(page.contains("2024-06-01T00:00:00+00:00"));
        assert!(page.contains("what it is about"));
    }

    #[test]
    fn listing_falls_back_to_name_without_title() {
        let entries = vec![entry(NodeKind::Article, "untitled-post", None)];
        let page = category_page("posts", &entries).into_string();
        assert!(page.contains("untitled-post"));
    }

    #[test]
    fn markup_is_escaped() {
        let entries = vec![entry(NodeKind::Leaf, "<script>alert(1)</script>", None)];
        let page = category_page("posts", &entries).into_string();
        assert!(!page.contains("<script>alert"));
        assert!(page.contains("&lt;script&gt;"));
    }
}
