//! Serializes a [`Document`] into a standalone HTML page.

use std::fmt::Write as _;

use crate::document::{Content, Document};
use crate::format::escape_html;
use crate::render::ElementId;

const STYLE: &str = r#"
:root { --color-bg: #0f0f12; --color-surface: #18181b; --color-border: #27272a; --color-text: #fafafa; --color-text-muted: #a1a1aa; --color-accent: #f59e0b; }
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: var(--color-bg); color: var(--color-text); }
[hidden] { display: none !important; }
.container { max-width: 960px; margin: 0 auto; padding: 2rem 1rem; }
.brand { color: var(--color-accent); }
.search-form input { width: 100%; padding: .75rem 1rem; border-radius: 8px; border: 1px solid var(--color-border); background: var(--color-surface); color: inherit; }
.state { text-align: center; padding: 3rem 1rem; color: var(--color-text-muted); }
.profile-card { display: flex; gap: 1.5rem; padding: 1.5rem; border: 1px solid var(--color-border); border-radius: 12px; background: var(--color-surface); }
.profile-card img { width: 120px; height: 120px; border-radius: 50%; }
.details { list-style: none; padding: 0; display: flex; flex-wrap: wrap; gap: 1rem; color: var(--color-text-muted); }
.details li { display: flex; gap: .25rem; }
.stats { display: flex; gap: 1.5rem; }
.stats strong { display: block; font-size: 1.25rem; }
a { color: var(--color-accent); }
.repos-grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(280px, 1fr)); gap: 1rem; margin-top: 1.5rem; }
.repo-card { padding: 1rem; border: 1px solid var(--color-border); border-radius: 8px; background: var(--color-surface); }
.repo-header { display: flex; justify-content: space-between; gap: .5rem; }
.repo-visibility { font-size: .75rem; border: 1px solid var(--color-border); border-radius: 999px; padding: 0 .5rem; }
.repo-description { color: var(--color-text-muted); }
.repo-stats { display: flex; flex-wrap: wrap; gap: 1rem; font-size: .875rem; color: var(--color-text-muted); }
.repo-stat, .repo-language { display: flex; align-items: center; gap: .25rem; }
.language-dot { width: 10px; height: 10px; border-radius: 50%; display: inline-block; }
.repos-empty { text-align: center; color: var(--color-text-muted); padding: 2rem; }
"#;

/// Keyboard shortcuts mirroring `Controller::handle_key`: `/` focuses the
/// search input unless it is already active, `Escape` releases it.
fn shortcuts_script(out: &mut String) {
    let _ = write!(
        out,
        r#"<script>
document.addEventListener('keydown', (e) => {{
  const input = document.getElementById('{}');
  if (!input) return;
  if (e.key === '/' && document.activeElement !== input) {{
    e.preventDefault();
    input.focus();
  }}
  if (e.key === 'Escape' && document.activeElement === input) {{
    input.blur();
  }}
}});
</script>
"#,
        ElementId::SearchInput.dom_id()
    );
}

/// Writes one element: open tag with id, attributes and visibility, then its
/// content (text escaped, markup verbatim) or `fallback` when empty.
fn element(out: &mut String, doc: &Document, id: ElementId, tag: &str, class: &str, fallback: &str) {
    let el = doc.element(id);

    let _ = write!(out, r#"<{tag} id="{}""#, id.dom_id());
    if !class.is_empty() {
        let _ = write!(out, r#" class="{class}""#);
    }
    for (name, value) in &el.attributes {
        let _ = write!(out, r#" {}="{}""#, escape_html(name), escape_html(value));
    }
    if !el.visible {
        out.push_str(" hidden");
    }
    out.push('>');

    // Void elements carry no content or closing tag.
    if matches!(tag, "img" | "input") {
        return;
    }

    match &el.content {
        Some(Content::Text(text)) => out.push_str(&escape_html(text)),
        Some(Content::Html(markup)) => out.push_str(markup),
        None => out.push_str(fallback),
    }
    let _ = write!(out, "</{tag}>");
}

fn detail(out: &mut String, doc: &Document, item: ElementId, field: ElementId, tag: &str, label: &str) {
    let _ = write!(
        out,
        r#"<li id="{}"{}><span class="label">{label}</span>"#,
        item.dom_id(),
        if doc.is_visible(item) { "" } else { " hidden" },
    );
    element(out, doc, field, tag, "", "");
    out.push_str("</li>");
}

fn stat(out: &mut String, doc: &Document, id: ElementId, label: &str) {
    out.push_str("<div>");
    element(out, doc, id, "strong", "", "0");
    let _ = write!(out, "<span>{label}</span></div>");
}

/// Renders the whole page for the current state of `doc`.
pub fn render_page(doc: &Document) -> String {
    let mut out = String::with_capacity(8 * 1024);

    out.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    out.push_str("<title>GitView</title>\n<style>");
    out.push_str(STYLE);
    out.push_str("</style>\n</head>\n<body>\n<main class=\"container\">\n");

    out.push_str("<h1 class=\"brand\">GitView</h1>\n");
    out.push_str("<form id=\"searchForm\" class=\"search-form\">");
    element(&mut out, doc, ElementId::SearchInput, "input", "", "");
    out.push_str("</form>\n");

    element(
        &mut out,
        doc,
        ElementId::InitialState,
        "section",
        "state",
        "Search for a GitHub user to see their profile and recent repositories.",
    );
    out.push('\n');
    element(&mut out, doc, ElementId::Loading, "section", "state", "Loading...");
    out.push('\n');
    element(
        &mut out,
        doc,
        ElementId::Error,
        "section",
        "state",
        "User not found. Check the username and try again.",
    );
    out.push('\n');

    let _ = write!(
        out,
        r#"<section id="{}"{}>"#,
        ElementId::ProfileSection.dom_id(),
        if doc.is_visible(ElementId::ProfileSection) { "" } else { " hidden" },
    );
    out.push_str("\n<div class=\"profile-card\">");
    element(&mut out, doc, ElementId::Avatar, "img", "", "");
    out.push_str("<div class=\"profile-info\">");
    element(&mut out, doc, ElementId::Name, "h2", "", "");
    element(&mut out, doc, ElementId::Username, "p", "username", "");
    element(&mut out, doc, ElementId::Bio, "p", "bio", "");

    out.push_str("<ul class=\"details\">");
    detail(&mut out, doc, ElementId::LocationItem, ElementId::Location, "span", "Location");
    detail(&mut out, doc, ElementId::CompanyItem, ElementId::Company, "span", "Company");
    detail(&mut out, doc, ElementId::BlogItem, ElementId::Blog, "a", "Website");
    detail(&mut out, doc, ElementId::TwitterItem, ElementId::Twitter, "span", "Twitter");
    out.push_str("</ul>");

    out.push_str("<div class=\"stats\">");
    stat(&mut out, doc, ElementId::Repos, "Repositories");
    stat(&mut out, doc, ElementId::Followers, "Followers");
    stat(&mut out, doc, ElementId::Following, "Following");
    out.push_str("</div>");

    element(&mut out, doc, ElementId::ProfileLink, "a", "profile-link", "View on GitHub");
    out.push_str("</div></div>\n<h3>Recent repositories</h3>\n");
    element(&mut out, doc, ElementId::ReposList, "div", "repos-grid", "");
    out.push_str("\n</section>\n</main>\n");
    shortcuts_script(&mut out);
    out.push_str("</body>\n</html>\n");

    out
}
