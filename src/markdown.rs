// ABOUTME: Markdown segmentation module for the carousel-slides application
// ABOUTME: Splits documents into slide segments and renders each to HTML

use comrak::{markdown_to_html, ComrakOptions};
use log::debug;

/// Placeholder content seeded into newly created documents.
pub const DEFAULT_MARKDOWN: &str = "# Welcome!

This is a **markdown to carousel** demo.

---

## How It Works

- Write markdown on the left
- Preview the slides
- Export as PNG images

---

## Tips

Use `---` to separate slides.

**Bold** and *italic* work great!

---

# Get Started!

Edit this text to create your own carousel.";

/// Returns true when the line is a slide delimiter: three-or-more `-`,
/// three-or-more `*`, or the spaced form `- - -` (with any longer dash
/// run). The whole line must be the delimiter; inline occurrences do not
/// count.
fn is_slide_delimiter(line: &str) -> bool {
    if line.len() >= 3 && line.bytes().all(|b| b == b'-') {
        return true;
    }
    if line.len() >= 3 && line.bytes().all(|b| b == b'*') {
        return true;
    }
    if let Some(rest) = line.strip_prefix("- - ") {
        return !rest.is_empty() && rest.bytes().all(|b| b == b'-');
    }
    false
}

/// Split raw markdown into slide segments on delimiter lines.
///
/// Segments are trimmed and empty ones dropped, so adjacent delimiters and
/// blank regions never produce placeholder slides. Blank input yields an
/// empty vector.
pub fn split_markdown(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    for line in text.split('\n') {
        if is_slide_delimiter(line) {
            segments.push(current.join("\n"));
            current.clear();
        } else {
            current.push(line);
        }
    }
    segments.push(current.join("\n"));

    segments
        .into_iter()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Render one markdown segment to HTML.
pub fn render_markdown(segment: &str) -> String {
    let mut options = ComrakOptions::default();
    options.render.unsafe_ = true; // Allow raw HTML
    markdown_to_html(segment, &options)
}

/// Split markdown on slide delimiters and render each segment to HTML,
/// one string per slide.
pub fn parse_and_split_markdown(text: &str) -> Vec<String> {
    let segments = split_markdown(text);
    debug!("Split markdown into {} slide segment(s)", segments.len());
    segments.iter().map(|s| render_markdown(s)).collect()
}
