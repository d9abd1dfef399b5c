// ABOUTME: HTML assembly module for the carousel-slides application
// ABOUTME: Builds the one-page slide deck with inline background styling

use crate::background::SlideBackground;
use crate::errors::{CarouselError, Result};
use crate::resources::{ResourceFile, ResourceKind};
use log::info;
use std::fs;
use std::path::Path;

/// Base stylesheet embedded into every generated page. Each slide fills
/// the viewport so capture dimensions equal window dimensions.
const BASE_STYLESHEET: &str = r#"
* { margin: 0; padding: 0; box-sizing: border-box; }
body { margin: 0; }
.slide {
    width: 100vw;
    height: 100vh;
    overflow: hidden;
    display: flex;
    align-items: center;
    justify-content: center;
}
.slide .content {
    max-width: 82%;
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Helvetica, Arial, sans-serif;
    font-size: 32px;
    line-height: 1.5;
    color: #1a1a1a;
}
.content h1 { font-size: 64px; margin-bottom: 0.4em; }
.content h2 { font-size: 48px; margin-bottom: 0.4em; }
.content h3 { font-size: 38px; margin-bottom: 0.4em; }
.content p, .content ul, .content ol { margin-bottom: 0.6em; }
.content ul, .content ol { padding-left: 1.2em; }
.content code {
    font-family: "SF Mono", Menlo, Consolas, monospace;
    font-size: 0.85em;
    background: rgba(0, 0, 0, 0.08);
    padding: 0.1em 0.3em;
    border-radius: 4px;
}
.content pre { margin-bottom: 0.6em; }
.content pre code { display: block; padding: 0.6em; }
.content blockquote {
    border-left: 4px solid rgba(0, 0, 0, 0.2);
    padding-left: 0.6em;
    opacity: 0.85;
}
"#;

/// Render the five background declarations as an inline style attribute
/// value.
fn background_style(bg: &SlideBackground) -> String {
    format!(
        "background-color: {}; background-image: {}; background-size: {}; background-position: {}; background-repeat: {};",
        bg.color, bg.image, bg.size, bg.position, bg.repeat
    )
}

/// Assemble the full HTML document for a carousel: one `div.slide` per
/// rendered segment, carrying its computed background inline.
///
/// `slides` holds pre-rendered segment HTML; `backgrounds` must be the
/// same length. Extra CSS resources are included best-effort: a resource
/// that fails to load is logged and skipped.
pub fn generate_slides_html(
    title: &str,
    slides: &[String],
    backgrounds: &[SlideBackground],
    css_files: &[ResourceFile],
    embed_resources: bool,
) -> Result<String> {
    if slides.len() != backgrounds.len() {
        return Err(CarouselError::HtmlError(format!(
            "Slide count {} does not match background count {}",
            slides.len(),
            backgrounds.len()
        )));
    }

    info!("Assembling HTML for {} slide(s)", slides.len());

    let mut html_doc = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html_doc.push_str("<meta charset=\"UTF-8\">\n");
    html_doc.push_str(
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n",
    );
    html_doc.push_str(&format!("<title>{}</title>\n", title));
    html_doc.push_str(&format!("<style>{}</style>\n", BASE_STYLESHEET));

    for css in css_files {
        match css.tag(ResourceKind::Stylesheet, embed_resources) {
            Ok(tag) => {
                html_doc.push_str(&tag);
                html_doc.push('\n');
            }
            Err(e) => {
                info!("Warning: Failed to include CSS resource {}: {}", css, e);
                // Continue with other resources rather than failing completely
            }
        }
    }

    html_doc.push_str("</head>\n<body>\n");

    for (slide, bg) in slides.iter().zip(backgrounds) {
        html_doc.push_str(&format!(
            "<div class=\"slide\" style=\"{}\">",
            background_style(bg)
        ));
        html_doc.push_str("<div class=\"content\">");
        html_doc.push_str(slide);
        html_doc.push_str("</div></div>\n");
    }

    html_doc.push_str("</body>\n</html>");

    Ok(html_doc)
}

/// Utility function to write HTML content to a file
pub fn write_html_to_file(html_content: &str, output_path: &Path) -> Result<()> {
    info!("Writing HTML to file: {:?}", output_path);

    if let Some(parent) = output_path.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(CarouselError::FileReadError)?;
        }
    }

    fs::write(output_path, html_content).map_err(CarouselError::FileReadError)?;

    Ok(())
}
