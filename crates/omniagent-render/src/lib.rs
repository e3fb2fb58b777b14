//! Markdown to HTML for assistant replies

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, LinkType, Options, Parser, Tag, TagEnd};

/// URL schemes allowed in rendered links and images
const SAFE_SCHEMES: [&str; 6] = ["http", "https", "mailto", "irc", "ircs", "xmpp"];

/// Render markdown to HTML.
///
/// Links open in a new browsing context, fenced code is wrapped in
/// `pre.code-block` and inline code carries `code.inline-code`.
/// Raw HTML in the source is shown as text and link or image targets with
/// a scheme outside [`SAFE_SCHEMES`] are emptied.
pub fn render_markdown(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options).map(restyle);
    let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_output, parser);
    html_output
}

fn restyle(event: Event<'_>) -> Event<'_> {
    match event {
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            ..
        }) => Event::InlineHtml(open_link(link_type, &dest_url, &title).into()),
        Event::End(TagEnd::Link) => Event::InlineHtml(CowStr::Borrowed("</a>")),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) => Event::Start(Tag::Image {
            link_type,
            dest_url: safe_url(&dest_url).to_string().into(),
            title,
            id,
        }),
        Event::Start(Tag::CodeBlock(kind)) => Event::Html(open_code_block(&kind).into()),
        Event::End(TagEnd::CodeBlock) => Event::Html(CowStr::Borrowed("</code></pre>\n")),
        Event::Code(code) => Event::InlineHtml(
            format!("<code class=\"inline-code\">{}</code>", escape_html(&code)).into(),
        ),
        Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),
        other => other,
    }
}

fn open_link(link_type: LinkType, dest_url: &str, title: &str) -> String {
    let href = match link_type {
        LinkType::Email => format!("mailto:{}", dest_url),
        _ => dest_url.to_string(),
    };
    let mut tag = format!(
        "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\"",
        escape_html(safe_url(&href))
    );
    if !title.is_empty() {
        tag.push_str(&format!(" title=\"{}\"", escape_html(title)));
    }
    tag.push('>');
    tag
}

/// `url` if it is relative or uses an allowed scheme, otherwise `""`
fn safe_url(url: &str) -> &str {
    match url.find(|c| matches!(c, ':' | '/' | '?' | '#')) {
        Some(end) if url[end..].starts_with(':') => {
            let scheme = &url[..end];
            if SAFE_SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
                url
            } else {
                ""
            }
        }
        _ => url,
    }
}

fn open_code_block(kind: &CodeBlockKind<'_>) -> String {
    match kind {
        CodeBlockKind::Fenced(info) => match code_language(info) {
            Some(lang) => format!(
                "<pre class=\"code-block\"><code class=\"language-{}\">",
                escape_html(lang)
            ),
            None => "<pre class=\"code-block\"><code>".to_string(),
        },
        CodeBlockKind::Indented => "<pre class=\"code-block\"><code>".to_string(),
    }
}

/// Language from a code fence info string
fn code_language(info: &str) -> Option<&str> {
    info.split_whitespace().next()
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
