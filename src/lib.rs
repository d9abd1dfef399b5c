// ABOUTME: Library module for the carousel-slides program.
// ABOUTME: Contains core functionality for segmenting markdown, computing slide backgrounds, and exporting carousels.

// Reexport modules
pub mod background;
pub mod color;
pub mod config;
pub mod errors;
pub mod export;
pub mod html;
pub mod markdown;
pub mod render;
pub mod resources;
pub mod store;
pub mod utils;
pub mod watch;

// Reexport common types and functions
pub use background::{
    compute_slide_background, BackgroundConfig, BackgroundKind, ImageFit, SlideBackground,
};
pub use color::{generate_gradient_colors, hsl_to_hex, random_theme_color, Theme};
pub use config::{Config, DimensionPreset};
pub use errors::{CarouselError, Result};
pub use export::{export_slides_to_zip, find_slide_images, package_slides_dir, slide_filename};
pub use html::{generate_slides_html, write_html_to_file};
pub use markdown::{parse_and_split_markdown, render_markdown, split_markdown};
pub use render::{capture_slides, CaptureConfig};
pub use resources::{ResourceFile, ResourceKind};
pub use store::{Document, DocumentState, DocumentStorage, DocumentStore, JsonFileStorage};
pub use watch::{watch_markdown, WatchConfig};

#[cfg(test)]
mod tests;
