//! Static rendering of generated markup for the preview pane.
//!
//! Turns an HTML document into styled ratatui lines the way a text-mode
//! browser would: tags become structure and styling, never literal text.
//! Scripts and stylesheets are elided and nothing executes; the pane is an
//! isolated surface over the editable source.

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// Colors for rendered elements
const TEXT_COLOR: Color = Color::Rgb(228, 228, 231);
const HEADING_COLOR: Color = Color::Rgb(129, 140, 248);
const LINK_COLOR: Color = Color::Rgb(86, 182, 194);
const BULLET_COLOR: Color = Color::Rgb(167, 139, 250);
const RULE_COLOR: Color = Color::Rgb(82, 82, 91);
const PLACEHOLDER_COLOR: Color = Color::Rgb(113, 113, 122);
const CODE_BG: Color = Color::Rgb(30, 30, 30);
const CODE_FG: Color = Color::Rgb(212, 212, 212);

/// Tags that force a line break when opened or closed.
const BLOCK_TAGS: &[&str] = &[
    "p", "div", "section", "article", "header", "footer", "main", "nav", "form",
    "ul", "ol", "table", "tr", "blockquote", "li", "pre", "h1", "h2", "h3", "h4",
    "h5", "h6",
];

#[derive(Default)]
struct Renderer {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    bold: usize,
    italic: usize,
    link: usize,
    underline: usize,
    pre: usize,
    heading: Option<u8>,
}

impl Renderer {
    fn style(&self) -> Style {
        let mut style = Style::default().fg(TEXT_COLOR);
        if self.pre > 0 {
            style = style.fg(CODE_FG).bg(CODE_BG);
        }
        if let Some(level) = self.heading {
            style = style.fg(HEADING_COLOR).add_modifier(Modifier::BOLD);
            if level <= 2 {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
        }
        if self.bold > 0 {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic > 0 {
            style = style.add_modifier(Modifier::ITALIC);
        }
        if self.link > 0 {
            style = style.fg(LINK_COLOR).add_modifier(Modifier::UNDERLINED);
        }
        if self.underline > 0 {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        style
    }

    fn flush_line(&mut self) {
        if !self.spans.is_empty() {
            self.lines.push(Line::from(std::mem::take(&mut self.spans)));
        }
    }

    fn push_span(&mut self, text: String) {
        if !text.is_empty() {
            self.spans.push(Span::styled(text, self.style()));
        }
    }

    fn push_text(&mut self, raw: &str) {
        let decoded = decode_entities(raw);
        if self.pre > 0 {
            // Preformatted: keep whitespace, break on embedded newlines.
            let mut first = true;
            for line in decoded.split('\n') {
                if !first {
                    self.flush_line();
                }
                self.push_span(line.to_string());
                first = false;
            }
            return;
        }

        let collapsed: String = decoded.split_whitespace().collect::<Vec<_>>().join(" ");
        if collapsed.is_empty() {
            return;
        }
        let mut text = collapsed;
        // Keep a word boundary when the source had one.
        if decoded.starts_with(char::is_whitespace) && !self.spans.is_empty() {
            text.insert(0, ' ');
        }
        if decoded.ends_with(char::is_whitespace) {
            text.push(' ');
        }
        self.push_span(text);
    }

    fn open_tag(&mut self, name: &str) {
        match name {
            "br" => {
                if self.spans.is_empty() {
                    self.lines.push(Line::from(""));
                } else {
                    self.flush_line();
                }
            }
            "hr" => {
                self.flush_line();
                self.lines.push(Line::from(Span::styled(
                    "─".repeat(40),
                    Style::default().fg(RULE_COLOR),
                )));
            }
            "li" => {
                self.flush_line();
                self.spans.push(Span::styled(
                    "• ".to_string(),
                    Style::default().fg(BULLET_COLOR),
                ));
            }
            "img" => self.spans.push(Span::styled(
                "[image]".to_string(),
                Style::default()
                    .fg(PLACEHOLDER_COLOR)
                    .add_modifier(Modifier::ITALIC),
            )),
            "button" => self.push_span("[ ".to_string()),
            "b" | "strong" => self.bold += 1,
            "i" | "em" => self.italic += 1,
            "u" => self.underline += 1,
            "a" => self.link += 1,
            "pre" => {
                self.flush_line();
                self.pre += 1;
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.flush_line();
                self.heading = name[1..].parse::<u8>().ok();
            }
            _ if BLOCK_TAGS.contains(&name) => self.flush_line(),
            _ => {}
        }
    }

    fn close_tag(&mut self, name: &str) {
        match name {
            "b" | "strong" => self.bold = self.bold.saturating_sub(1),
            "i" | "em" => self.italic = self.italic.saturating_sub(1),
            "u" => self.underline = self.underline.saturating_sub(1),
            "a" => self.link = self.link.saturating_sub(1),
            "button" => self.push_span(" ]".to_string()),
            "td" | "th" => self.spans.push(Span::raw("  ")),
            "pre" => {
                self.flush_line();
                self.pre = self.pre.saturating_sub(1);
            }
            "h1" | "h2" | "h3" | "h4" | "h5" | "h6" => {
                self.flush_line();
                self.heading = None;
            }
            _ if BLOCK_TAGS.contains(&name) => self.flush_line(),
            _ => {}
        }
    }
}

/// Render an HTML document into styled lines.
pub fn render(html: &str) -> Vec<Line<'static>> {
    let mut r = Renderer::default();
    let mut rest = html;

    while let Some(lt) = rest.find('<') {
        let (text, tail) = rest.split_at(lt);
        r.push_text(text);

        if tail.starts_with("<!--") {
            rest = match tail.find("-->") {
                Some(end) => &tail[end + 3..],
                None => "",
            };
            continue;
        }

        let Some(gt) = tail.find('>') else {
            // Dangling '<' at the end of the document; show it as text.
            r.push_text(tail);
            rest = "";
            break;
        };

        let tag_body = tail[1..gt].trim();
        rest = &tail[gt + 1..];

        if tag_body.starts_with('!') || tag_body.starts_with('?') {
            continue; // doctype and processing instructions
        }

        let closing = tag_body.starts_with('/');
        let name: String = tag_body
            .trim_start_matches('/')
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        if name.is_empty() {
            continue;
        }

        if !closing && (name == "script" || name == "style") {
            // Elide the element body; nothing inside it is visible text.
            let lower = rest.to_ascii_lowercase();
            let close = format!("</{}", name);
            rest = match lower.find(&close) {
                Some(at) => match rest[at..].find('>') {
                    Some(end) => &rest[at + end + 1..],
                    None => "",
                },
                None => "",
            };
            continue;
        }

        if closing {
            r.close_tag(&name);
        } else {
            r.open_tag(&name);
        }
    }

    r.push_text(rest);
    r.flush_line();
    r.lines
}

/// Decode the handful of entities generated markup actually uses.
fn decode_entities(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices();

    while let Some((idx, c)) = chars.next() {
        if c != '&' {
            out.push(c);
            continue;
        }
        let rest = &text[idx + 1..];
        let Some(semi) = rest.find(';').filter(|&s| s <= 10) else {
            out.push('&');
            continue;
        };
        let entity = &rest[..semi];
        let decoded = match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" | "#39" => Some('\''),
            "nbsp" => Some(' '),
            _ => entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
                .and_then(|hex| u32::from_str_radix(hex, 16).ok())
                .or_else(|| entity.strip_prefix('#').and_then(|num| num.parse().ok()))
                .and_then(char::from_u32),
        };
        match decoded {
            Some(d) => {
                out.push(d);
                for _ in 0..=semi {
                    chars.next();
                }
            }
            None => out.push('&'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn rendered_text(html: &str) -> Vec<String> {
        render(html).iter().map(line_text).collect()
    }

    #[test]
    fn strips_tags_to_visible_text() {
        assert_eq!(rendered_text("<div>hi</div>"), vec!["hi"]);
    }

    #[test]
    fn script_and_style_bodies_are_hidden() {
        let html = "<div>a</div><script>alert('x')</script><style>.a{color:red}</style><div>b</div>";
        assert_eq!(rendered_text(html), vec!["a", "b"]);
    }

    #[test]
    fn comments_and_doctype_are_hidden() {
        let html = "<!DOCTYPE html><!-- nothing to see --><p>shown</p>";
        assert_eq!(rendered_text(html), vec!["shown"]);
    }

    #[test]
    fn list_items_get_bullets() {
        let html = "<ul><li>one</li><li>two</li></ul>";
        assert_eq!(rendered_text(html), vec!["• one", "• two"]);
    }

    #[test]
    fn br_breaks_the_line() {
        assert_eq!(rendered_text("a<br>b"), vec!["a", "b"]);
    }

    #[test]
    fn headings_are_emphasized() {
        let lines = render("<h1>Title</h1>");
        assert_eq!(line_text(&lines[0]), "Title");
        let style = lines[0].spans[0].style;
        assert!(style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn entities_decode() {
        assert_eq!(
            rendered_text("<p>&lt;b&gt; &amp; &quot;q&quot; &#169;</p>"),
            vec!["<b> & \"q\" ©"]
        );
    }

    #[test]
    fn inline_whitespace_collapses() {
        assert_eq!(
            rendered_text("<p>hello   \n   world</p>"),
            vec!["hello world"]
        );
    }

    #[test]
    fn word_boundary_survives_inline_tags() {
        assert_eq!(
            rendered_text("<p>click <b>here</b> now</p>"),
            vec!["click here now"]
        );
    }

    #[test]
    fn pre_preserves_layout() {
        assert_eq!(
            rendered_text("<pre>a\n  b</pre>"),
            vec!["a", "  b"]
        );
    }

    #[test]
    fn dangling_angle_bracket_does_not_panic() {
        assert_eq!(rendered_text("abc <div"), vec!["abc <div"]);
    }

    #[test]
    fn empty_document_renders_nothing() {
        assert!(render("").is_empty());
    }

    #[test]
    fn bare_ampersand_is_literal() {
        assert_eq!(rendered_text("<p>fish &amp chips</p>"), vec!["fish &amp chips"]);
    }
}
