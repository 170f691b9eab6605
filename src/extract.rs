// Normalizes the raw backend response into displayable markup.
//
// Models reply with either bare markup or markup wrapped in a fenced code
// block. `extract_markup` unwraps the fence; `verbatim` trusts the body as-is
// and is selected with UIGEN_RAW_RESULT / --raw / the /raw command.

/// Fence tags we recognize as markup. An empty tag (` ``` ` alone) counts.
const FENCE_TAGS: &[&str] = &["", "html", "xml", "css", "js"];

/// Return the trimmed interior of the first recognized fenced block,
/// or the trimmed whole input when no such block exists.
pub fn extract_markup(raw: &str) -> String {
    let mut interior: Vec<&str> = Vec::new();
    let mut in_fence = false;

    for line in raw.lines() {
        if !in_fence {
            if let Some(tag) = line.trim_end().strip_prefix("```") {
                if FENCE_TAGS.contains(&tag.trim()) {
                    in_fence = true;
                }
            }
        } else if line.trim_end().starts_with("```") {
            return interior.join("\n").trim().to_string();
        } else {
            interior.push(line);
        }
    }

    // Unterminated or absent fence: the whole body is the code.
    raw.trim().to_string()
}

/// The alternative policy: take the backend body verbatim, trimmed.
pub fn verbatim(raw: &str) -> String {
    raw.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwraps_tagged_fence() {
        let raw = "```html\n<div>hi</div>\n```";
        assert_eq!(extract_markup(raw), "<div>hi</div>");
    }

    #[test]
    fn verbatim_keeps_fences() {
        let raw = "```html\n<div>hi</div>\n```";
        assert_eq!(verbatim(raw), raw);
    }

    #[test]
    fn unwraps_untagged_fence() {
        let raw = "```\n<p>plain</p>\n```";
        assert_eq!(extract_markup(raw), "<p>plain</p>");
    }

    #[test]
    fn passes_through_bare_markup() {
        let raw = "  <section>hello</section>\n";
        assert_eq!(extract_markup(raw), "<section>hello</section>");
    }

    #[test]
    fn skips_fence_with_unknown_tag() {
        // A python fence is not markup, so the body falls through whole.
        let raw = "```python\nprint('hi')\n```";
        assert_eq!(extract_markup(raw), raw.trim());
    }

    #[test]
    fn ignores_prose_around_the_fence() {
        let raw = "Here is your component:\n```html\n<button>Go</button>\n```\nEnjoy!";
        assert_eq!(extract_markup(raw), "<button>Go</button>");
    }

    #[test]
    fn unterminated_fence_returns_whole_input() {
        let raw = "```html\n<div>half";
        assert_eq!(extract_markup(raw), raw.trim());
    }

    #[test]
    fn preserves_interior_blank_lines() {
        let raw = "```html\n<div>\n\n</div>\n```";
        assert_eq!(extract_markup(raw), "<div>\n\n</div>");
    }

    #[test]
    fn empty_input_yields_empty_string() {
        assert_eq!(extract_markup(""), "");
        assert_eq!(verbatim("   "), "");
    }

    #[test]
    fn fence_with_trailing_whitespace_still_opens() {
        let raw = "```html  \n<i>x</i>\n```";
        assert_eq!(extract_markup(raw), "<i>x</i>");
    }
}
