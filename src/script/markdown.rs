//! Course markdown cleanup before dialogue generation.

use regex::Regex;

/// Strips MDX/markdown markup that makes no sense when read aloud.
pub struct MarkdownCleaner {
    frontmatter: Regex,
    html_comment: Regex,
    code_block: Regex,
    jsx_tag: Regex,
    inline_code: Regex,
    image: Regex,
    link: Regex,
    blank_runs: Regex,
}

impl MarkdownCleaner {
    pub fn new() -> Self {
        Self {
            frontmatter: Regex::new(r"\A---\r?\n(?s:.*?)\r?\n---\r?\n").expect("Invalid regex"),
            html_comment: Regex::new(r"(?s)<!--.*?-->").expect("Invalid regex"),
            code_block: Regex::new(r"(?s)```.*?```").expect("Invalid regex"),
            jsx_tag: Regex::new(r"<[^>]+>").expect("Invalid regex"),
            inline_code: Regex::new(r"`([^`]+)`").expect("Invalid regex"),
            image: Regex::new(r"!\[[^\]]*\]\([^)]*\)").expect("Invalid regex"),
            link: Regex::new(r"\[([^\]]+)\]\([^)]+\)").expect("Invalid regex"),
            blank_runs: Regex::new(r"\n{3,}").expect("Invalid regex"),
        }
    }

    /// Produce plain prose from a markdown or MDX document.
    ///
    /// Code blocks become a spoken placeholder, images become `[Image]`,
    /// links keep their text and JSX/HTML tags are dropped.
    pub fn clean(&self, content: &str) -> String {
        let text = self.frontmatter.replace(content, "");
        let text = self.html_comment.replace_all(&text, "");
        let text = self
            .code_block
            .replace_all(&text, "[Code example omitted for audio]");
        let text = self.jsx_tag.replace_all(&text, "");
        let text = self.inline_code.replace_all(&text, "$1");
        let text = self.image.replace_all(&text, "[Image]");
        let text = self.link.replace_all(&text, "$1");
        let text = self.blank_runs.replace_all(&text, "\n\n");
        text.trim().to_string()
    }
}

impl Default for MarkdownCleaner {
    fn default() -> Self {
        Self::new()
    }
}

/// Extract the dialogue from a model response.
///
/// Models sometimes wrap the dialogue in `<podcast_dialog>` tags or add a
/// preamble before it; the tagged section wins when present.
pub fn extract_dialogue(response: &str) -> String {
    const OPEN: &str = "<podcast_dialog>";
    const CLOSE: &str = "</podcast_dialog>";

    if let Some(start) = response.find(OPEN) {
        let inner = &response[start + OPEN.len()..];
        let end = inner.find(CLOSE).unwrap_or(inner.len());
        return inner[..end].trim().to_string();
    }
    response.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_markdown() {
        let doc = "---\ntitle: Intro\nsidebar_position: 1\n---\n# Getting Started\n\n<Tabs>\nRead the [guide](https://example.com) and run `cargo build`.\n\n\n\n```rust\nfn main() {}\n```\n\n![diagram](./img.png)\n<!-- hidden -->\nDone.\n";
        let cleaned = MarkdownCleaner::new().clean(doc);

        assert_eq!(
            cleaned,
            "# Getting Started\n\nRead the guide and run cargo build.\n\n[Code example omitted for audio]\n\n[Image]\n\nDone."
        );
    }

    #[test]
    fn test_clean_without_frontmatter() {
        let cleaned = MarkdownCleaner::new().clean("Plain text only.");
        assert_eq!(cleaned, "Plain text only.");
    }

    #[test]
    fn test_extract_dialogue() {
        assert_eq!(
            extract_dialogue("Sure! <podcast_dialog>\nAlex: Hi\n</podcast_dialog> bye"),
            "Alex: Hi"
        );
        assert_eq!(extract_dialogue("  Alex: Hi\nSam: Hey  \n"), "Alex: Hi\nSam: Hey");
    }
}
