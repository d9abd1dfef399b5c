// ABOUTME: Color derivation module for the carousel-slides application
// ABOUTME: Generates theme-appropriate random colors and converts HSL to hex

use rand::Rng;

/// Color theme for generated palettes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// Generate a random theme-appropriate color as a hex string.
///
/// Light colors draw from high lightness (70-90%) with medium saturation
/// (60-100%); dark colors from low-medium lightness (30-60%) with high
/// saturation (70-100%). Hue is uniform over the full wheel.
pub fn random_theme_color(theme: Theme) -> String {
    let mut rng = rand::thread_rng();
    let hue = rng.gen_range(0..360);
    match theme {
        Theme::Light => {
            let sat = rng.gen_range(60..100);
            let light = rng.gen_range(70..90);
            hsl_to_hex(hue as f64, sat as f64, light as f64)
        }
        Theme::Dark => {
            let sat = rng.gen_range(70..100);
            let light = rng.gen_range(30..60);
            hsl_to_hex(hue as f64, sat as f64, light as f64)
        }
    }
}

/// Convert an HSL color (h in degrees, s and l as percentages) to a
/// lowercase `#rrggbb` hex string.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let s = s / 100.0;
    let l = l / 100.0;
    let a = s * l.min(1.0 - l);
    let f = |n: f64| -> u8 {
        let k = (n + h / 30.0) % 12.0;
        let color = l - a * (k - 3.0).min(9.0 - k).min(1.0).max(-1.0);
        (255.0 * color).round() as u8
    };
    format!("#{:02x}{:02x}{:02x}", f(0.0), f(8.0), f(4.0))
}

/// Generate an array of random gradient colors for the given theme.
pub fn generate_gradient_colors(count: usize, theme: Theme) -> Vec<String> {
    (0..count).map(|_| random_theme_color(theme)).collect()
}
