// ABOUTME: Background parameter computation for the carousel-slides application
// ABOUTME: Derives per-slide CSS background values, including the continuous background mode

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Predefined anchor positions for gradient mesh blobs. When a palette has
/// more colors than this table has entries, positions cycle (wrap).
pub const MESH_POSITIONS: [&str; 7] = [
    "40% 20%",
    "80% 0%",
    "0% 50%",
    "80% 50%",
    "0% 100%",
    "80% 100%",
    "0% 0%",
];

/// Fallback color used when a gradient palette is empty.
pub const DEFAULT_GRADIENT_COLOR: &str = "#667eea";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackgroundKind {
    Solid,
    Gradient,
    Image,
}

/// How an image background fills a slide when not in continuous mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFit {
    Cover,
    Repeat,
}

/// Background settings shared by all slides of a carousel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundConfig {
    pub kind: BackgroundKind,
    pub solid_color: String,
    pub gradient_colors: Vec<String>,
    /// Custom anchor positions for the gradient mesh; defaults to
    /// [`MESH_POSITIONS`] when absent.
    pub gradient_positions: Option<Vec<String>>,
    pub image: Option<String>,
    pub image_fit: ImageFit,
    /// When set, one logical background spans all slides and each slide
    /// exposes only its own horizontal band of it.
    pub continuous: bool,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            kind: BackgroundKind::Solid,
            solid_color: "#ffffff".to_string(),
            gradient_colors: Vec::new(),
            gradient_positions: None,
            image: None,
            image_fit: ImageFit::Cover,
            continuous: false,
        }
    }
}

/// The five CSS background declarations computed for one slide.
/// Derived per render, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlideBackground {
    pub color: String,
    pub image: String,
    pub size: String,
    pub position: String,
    pub repeat: String,
}

/// Compute the background color for a slide.
pub fn background_color(config: &BackgroundConfig) -> String {
    match config.kind {
        BackgroundKind::Solid => config.solid_color.clone(),
        BackgroundKind::Gradient => config
            .gradient_colors
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_GRADIENT_COLOR.to_string()),
        BackgroundKind::Image => "transparent".to_string(),
    }
}

/// Compute the CSS background-image value for a slide.
///
/// Gradient backgrounds render one radial-gradient term per palette color,
/// anchored at positions cycling through the configured or default table.
pub fn background_image(config: &BackgroundConfig) -> String {
    match config.kind {
        BackgroundKind::Gradient => {
            let defaults: Vec<String> = MESH_POSITIONS.iter().map(|p| p.to_string()).collect();
            let positions = match config.gradient_positions.as_ref() {
                Some(custom) if !custom.is_empty() => custom,
                _ => &defaults,
            };
            config
                .gradient_colors
                .iter()
                .enumerate()
                .map(|(i, color)| {
                    let pos = &positions[i % positions.len()];
                    format!("radial-gradient(at {}, {} 0px, transparent 50%)", pos, color)
                })
                .collect::<Vec<String>>()
                .join(",")
        }
        BackgroundKind::Image => match &config.image {
            Some(src) => format!("url({})", src),
            None => "none".to_string(),
        },
        BackgroundKind::Solid => "none".to_string(),
    }
}

/// Compute the CSS background-size value for a slide.
pub fn background_size(config: &BackgroundConfig, total_slides: usize) -> String {
    if config.kind == BackgroundKind::Image {
        if config.continuous {
            return "auto 100%".to_string();
        }
        return match config.image_fit {
            ImageFit::Cover => "cover".to_string(),
            ImageFit::Repeat => "auto".to_string(),
        };
    }
    if config.continuous {
        format!("{}% 100%", total_slides * 100)
    } else {
        "100% 100%".to_string()
    }
}

/// Compute the CSS background-position value for a slide.
///
/// In continuous mode, slide `i` of width `viewport_width` exposes the
/// i-th horizontal band of the shared backdrop: image backgrounds shift
/// left by whole viewports, gradients by a fraction of the stretched
/// canvas.
pub fn background_position(
    config: &BackgroundConfig,
    slide_index: usize,
    total_slides: usize,
    viewport_width: u32,
) -> String {
    if config.kind == BackgroundKind::Image {
        if config.continuous {
            let offset_px = slide_index as u64 * viewport_width as u64;
            return format!("-{}px 0", offset_px);
        }
        return "center".to_string();
    }
    if config.continuous {
        // total_slides = 1 must not divide by zero
        let span = total_slides.saturating_sub(1).max(1);
        let fraction = slide_index as f64 / span as f64 * 100.0;
        format!("{}% 0", fraction)
    } else {
        "0 0".to_string()
    }
}

/// Compute the CSS background-repeat value for a slide.
pub fn background_repeat(config: &BackgroundConfig) -> String {
    if config.kind == BackgroundKind::Image {
        if config.continuous {
            return "repeat-x".to_string();
        }
        return match config.image_fit {
            ImageFit::Repeat => "repeat".to_string(),
            ImageFit::Cover => "no-repeat".to_string(),
        };
    }
    "no-repeat".to_string()
}

/// Compute the full set of background declarations for one slide.
pub fn compute_slide_background(
    config: &BackgroundConfig,
    slide_index: usize,
    total_slides: usize,
    viewport_width: u32,
) -> SlideBackground {
    SlideBackground {
        color: background_color(config),
        image: background_image(config),
        size: background_size(config, total_slides),
        position: background_position(config, slide_index, total_slides, viewport_width),
        repeat: background_repeat(config),
    }
}

/// Generate random gradient mesh anchor positions as `"x% y%"` strings.
pub fn generate_random_positions(count: usize) -> Vec<String> {
    let mut rng = rand::thread_rng();
    (0..count)
        .map(|_| {
            let x: u32 = rng.gen_range(0..100);
            let y: u32 = rng.gen_range(0..100);
            format!("{}% {}%", x, y)
        })
        .collect()
}
