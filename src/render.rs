// ABOUTME: Browser capture module for the carousel-slides application
// ABOUTME: Screenshots each slide of the assembled page using a headless browser

use crate::errors::{CarouselError, Result};
use headless_chrome::{Browser, LaunchOptionsBuilder};
use log::{info, warn};
use std::env;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

/// Configuration for slide capture
pub struct CaptureConfig {
    pub width: u32,
    pub height: u32,
    /// Resolution multiplier applied to the browser window (1x, 2x, 3x)
    pub scale: u32,
    pub timeout_ms: u64,
    pub browser_path: Option<String>,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: 1080,
            height: 1080,
            scale: 1,
            timeout_ms: 30000, // 30 seconds
            browser_path: None,
        }
    }
}

impl CaptureConfig {
    /// Effective viewport width in pixels, the width a continuous
    /// background shifts by per slide.
    pub fn viewport_width(&self) -> u32 {
        self.width * self.scale.max(1)
    }

    /// Effective viewport height in pixels.
    pub fn viewport_height(&self) -> u32 {
        self.height * self.scale.max(1)
    }
}

/// Capture one PNG per slide from an assembled HTML page.
///
/// Slides are captured strictly one at a time: each rasterization holds a
/// full-resolution pixel buffer, so at most one is in flight. A failed
/// screenshot aborts the remaining capture.
pub fn capture_slides(
    html_path: &Path,
    slide_count: usize,
    config: &CaptureConfig,
) -> Result<Vec<Vec<u8>>> {
    info!("Capturing slides from HTML: {:?}", html_path);

    if !html_path.exists() {
        return Err(CarouselError::PathNotFoundError(html_path.to_path_buf()));
    }
    if slide_count == 0 {
        return Ok(Vec::new());
    }

    let mut launch_options_builder = LaunchOptionsBuilder::default();
    launch_options_builder
        .window_size(Some((config.viewport_width(), config.viewport_height())));
    launch_options_builder.headless(true);

    if let Some(browser_path) = &config.browser_path {
        launch_options_builder.path(Some(browser_path.into()));
    } else if let Ok(path) = env::var("BROWSER_PATH") {
        if !path.is_empty() {
            launch_options_builder.path(Some(path.into()));
        }
    }

    let launch_options = launch_options_builder
        .build()
        .map_err(|e| CarouselError::BrowserError {
            message: format!("Failed to build browser options: {:?}", e),
            source: None,
        })?;

    info!("Launching headless browser");
    let browser = Browser::new(launch_options).map_err(|e| CarouselError::BrowserError {
        message: format!("Failed to launch browser: {}", e),
        source: None,
    })?;

    let html_path_abs = fs::canonicalize(html_path).map_err(CarouselError::FileReadError)?;
    let url = format!("file://{}", html_path_abs.to_string_lossy());

    info!("Opening page at URL: {}", url);

    let tab = browser.new_tab().map_err(|e| CarouselError::BrowserError {
        message: format!("Failed to create new tab: {}", e),
        source: None,
    })?;

    tab.navigate_to(&url)
        .map_err(|e| CarouselError::BrowserError {
            message: format!("Failed to navigate to HTML: {}", e),
            source: None,
        })?;

    tab.wait_until_navigated()
        .map_err(|e| CarouselError::BrowserError {
            message: format!("Navigation failed: {}", e),
            source: None,
        })?;

    tab.wait_for_element_with_custom_timeout("body", Duration::from_millis(config.timeout_ms))
        .map_err(|e| CarouselError::BrowserError {
            message: format!("Failed to wait for body element: {}", e),
            source: None,
        })?;

    // Give stylesheets and background images a moment to settle
    std::thread::sleep(Duration::from_millis(500));

    // Sanity-check the DOM against the expected slide count
    let detected = tab
        .evaluate("document.querySelectorAll('body > div.slide').length", false)
        .map_err(|e| {
            warn!("Failed to count slides in page: {}", e);
            e
        })
        .ok()
        .and_then(|result| result.value.as_ref().and_then(|v| v.as_u64()))
        .map(|n| n as usize)
        .unwrap_or(0);
    let slide_count = if detected > 0 && detected != slide_count {
        warn!(
            "Page holds {} slide(s) but {} were expected; capturing {}",
            detected,
            slide_count,
            detected.min(slide_count)
        );
        detected.min(slide_count)
    } else {
        slide_count
    };

    info!("Loaded! Ready to capture {} slide(s)", slide_count);

    let start_time = Instant::now();
    let mut images = Vec::with_capacity(slide_count);

    for i in 0..slide_count {
        // Show only the current slide
        let js = format!(
            r#"
            var slides = document.querySelectorAll('body > div.slide');
            for (var j = 0; j < slides.length; j++) {{
                slides[j].style.display = 'none';
            }}
            if ({i} < slides.length) {{
                slides[{i}].style.display = 'flex';
                true;
            }} else {{
                false;
            }}
        "#,
            i = i
        );
        tab.evaluate(&js, false)
            .map_err(|e| CarouselError::BrowserError {
                message: format!("Failed to show slide {}: {}", i + 1, e),
                source: None,
            })?;

        // Let the display toggle paint before the screenshot
        std::thread::sleep(Duration::from_millis(300));

        info!("Capturing slide {} of {}", i + 1, slide_count);
        let data = tab
            .capture_screenshot(
                headless_chrome::protocol::cdp::Page::CaptureScreenshotFormatOption::Png,
                None,
                None,
                true,
            )
            .map_err(|e| {
                CarouselError::ScreenshotError(format!("Slide {}: {}", i + 1, e))
            })?;
        images.push(data);
    }

    let elapsed = start_time.elapsed();
    info!(
        "Capture complete. {} slide(s) in {:.2} seconds",
        images.len(),
        elapsed.as_secs_f64()
    );

    Ok(images)
}
