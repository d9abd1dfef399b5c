// ABOUTME: Watch module for monitoring markdown changes and regenerating the carousel
// ABOUTME: Provides debounced file watching and an optional preview HTTP server

use log::{debug, error, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use notify::{RecursiveMode, Watcher};
use notify_debouncer_full::new_debouncer;
use tiny_http::{Header, Response, Server, StatusCode};

use crate::background::{compute_slide_background, BackgroundConfig};
use crate::config::Config as AppConfig;
use crate::errors::{CarouselError, Result};
use crate::export;
use crate::html;
use crate::markdown;
use crate::render::{self, CaptureConfig};
use crate::resources::ResourceFile;
use crate::utils;

/// Configuration for watch mode
pub struct WatchConfig {
    /// Path to the markdown file to watch
    pub markdown_path: PathBuf,

    /// Output HTML file path
    pub html_output: PathBuf,

    /// Output zip archive path; when set, slides are re-captured and
    /// re-packaged on every change
    pub zip_output: Option<PathBuf>,

    /// Title of the generated page
    pub title: String,

    /// Background settings applied to every regeneration
    pub background: BackgroundConfig,

    /// Capture settings (dimensions, scale, browser)
    pub capture: CaptureConfig,

    /// CSS files to include
    pub css_files: Vec<ResourceFile>,

    /// Whether to embed resources in HTML
    pub embed_resources: bool,

    /// Debounce time in milliseconds
    pub debounce_ms: u64,

    /// Whether to serve the HTML using a local web server
    pub serve: bool,

    /// Port for local web server
    pub port: u16,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            markdown_path: PathBuf::new(),
            html_output: PathBuf::new(),
            zip_output: None,
            title: "Carousel".to_string(),
            background: BackgroundConfig::default(),
            capture: CaptureConfig::default(),
            css_files: Vec::new(),
            embed_resources: true,
            debounce_ms: 500,
            serve: false,
            port: 8080,
        }
    }
}

/// Start a simple HTTP server to serve the preview HTML and related files
fn start_server(html_path: PathBuf, port: u16) -> Result<()> {
    let server = Server::http(format!("0.0.0.0:{}", port))
        .map_err(|e| CarouselError::WatchError(format!("Failed to start HTTP server: {}", e)))?;

    let html_dir = html_path.parent().unwrap_or(Path::new(".")).to_path_buf();
    let html_file_name = html_path
        .file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string();

    let server_arc = Arc::new(server);
    let server_thread = server_arc.clone();

    thread::spawn(move || {
        info!("HTTP server listening on http://localhost:{}", port);
        println!("HTTP server listening on http://localhost:{}", port);

        for request in server_thread.incoming_requests() {
            let url_path = request.url();

            let file_path = if url_path == "/" {
                html_dir.join(&html_file_name)
            } else {
                let clean_path = url_path.trim_start_matches('/');
                html_dir.join(clean_path)
            };

            debug!("Request for {:?} -> {:?}", url_path, file_path);

            if file_path.exists() && file_path.is_file() {
                match fs::read(&file_path) {
                    Ok(content) => {
                        let content_type = match file_path.extension() {
                            Some(ext) if ext.to_string_lossy() == "html" => "text/html",
                            Some(ext) if ext.to_string_lossy() == "css" => "text/css",
                            Some(ext) if ext.to_string_lossy() == "js" => "application/javascript",
                            Some(ext) if ext.to_string_lossy() == "png" => "image/png",
                            Some(ext) if ext.to_string_lossy() == "zip" => "application/zip",
                            _ => "application/octet-stream",
                        };

                        let header = Header::from_bytes("Content-Type", content_type)
                            .expect("Failed to create content-type header");

                        let response = Response::from_data(content).with_header(header);
                        if let Err(e) = request.respond(response) {
                            error!("Failed to send response: {}", e);
                        }
                    }
                    Err(e) => {
                        error!("Failed to read file {:?}: {}", file_path, e);
                        let response = Response::from_string(format!("Failed to read file: {}", e))
                            .with_status_code(StatusCode(500));
                        let _ = request.respond(response);
                    }
                }
            } else {
                let response =
                    Response::from_string("404 Not Found").with_status_code(StatusCode(404));
                let _ = request.respond(response);
            }
        }
    });

    Ok(())
}

/// Starts watching a markdown file and auto-regenerates outputs when changes occur
pub fn watch_markdown(config: WatchConfig, app_config: &AppConfig) -> Result<()> {
    utils::validate_file_exists(&config.markdown_path)?;
    utils::ensure_parent_directory_exists(&config.html_output)?;

    if let Some(zip_output) = &config.zip_output {
        utils::ensure_parent_directory_exists(zip_output)?;
        if let Some(parent) = zip_output.parent() {
            if !parent.as_os_str().is_empty() {
                utils::validate_directory_writable(parent)?;
            }
        }
    }

    // Initial generation
    regenerate_outputs(&config, app_config)?;

    if config.serve {
        start_server(config.html_output.clone(), config.port)?;
    }

    let (tx, rx) = mpsc::channel();

    let mut debouncer = new_debouncer(Duration::from_millis(config.debounce_ms), None, tx)
        .map_err(|e| CarouselError::WatchError(format!("Failed to create file watcher: {}", e)))?;

    let watch_path = match config.markdown_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let abs_watch_path = if watch_path.is_absolute() {
        watch_path.to_path_buf()
    } else {
        utils::get_absolute_path(watch_path)?
    };

    debug!("Watching absolute path: {:?}", abs_watch_path);

    debouncer
        .watcher()
        .watch(&abs_watch_path, RecursiveMode::Recursive)
        .map_err(|e| {
            CarouselError::WatchError(format!(
                "Failed to start watching directory: {} about {:?}",
                e,
                [abs_watch_path]
            ))
        })?;

    info!("Watching for changes in {:?}", watch_path);
    println!(
        "Watching for changes in {:?} (Press Ctrl+C to stop)",
        watch_path
    );

    let mut last_processed = std::time::Instant::now();

    for result in rx {
        match result {
            Ok(events) => {
                let relevant_changes = events.iter().any(|event| {
                    if event.paths.is_empty() {
                        debug!("Received event with no paths: {:?}", event);
                        return false;
                    }

                    event.paths.iter().any(|path| {
                        let is_relevant = is_relevant_path(path, &config);
                        if is_relevant {
                            debug!("Detected relevant change in {:?}", path);
                        }
                        is_relevant
                    })
                });

                let now = std::time::Instant::now();
                if relevant_changes
                    && now.duration_since(last_processed)
                        > Duration::from_millis(config.debounce_ms)
                {
                    match regenerate_outputs(&config, app_config) {
                        Ok(_) => {
                            info!("Regenerated outputs successfully");
                            last_processed = now;
                        }
                        Err(e) => error!("Failed to regenerate outputs: {}", e),
                    }
                }
            }
            Err(e) => error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}

/// Checks if a path is relevant to watch (the markdown file or a local CSS resource)
fn is_relevant_path(path: &Path, config: &WatchConfig) -> bool {
    let path_abs = match utils::get_absolute_path(path) {
        Ok(p) => p,
        Err(_) => return false,
    };

    let md_path_abs = match utils::get_absolute_path(&config.markdown_path) {
        Ok(p) => p,
        Err(_) => config.markdown_path.clone(),
    };

    if path_abs == md_path_abs || path == config.markdown_path {
        return true;
    }

    for css in &config.css_files {
        if let Some(css_path) = css.local_path() {
            if css_path == path || css_path == path_abs {
                return true;
            }
        }
    }

    match path.extension() {
        Some(ext) => {
            let ext_str = ext.to_string_lossy().to_lowercase();
            ext_str == "md" || ext_str == "css"
        }
        None => false,
    }
}

/// Regenerate all outputs from the current state of the markdown file
fn regenerate_outputs(config: &WatchConfig, app_config: &AppConfig) -> Result<()> {
    info!("Regenerating outputs...");

    let markdown_content =
        fs::read_to_string(&config.markdown_path).map_err(CarouselError::FileReadError)?;

    let slides = markdown::parse_and_split_markdown(&markdown_content);
    let total = slides.len();
    let backgrounds: Vec<_> = (0..total)
        .map(|i| {
            compute_slide_background(&config.background, i, total, config.capture.viewport_width())
        })
        .collect();

    let html_content = html::generate_slides_html(
        &config.title,
        &slides,
        &backgrounds,
        &config.css_files,
        config.embed_resources && app_config.embed_resources,
    )?;

    html::write_html_to_file(&html_content, &config.html_output)?;
    info!("HTML regenerated: {:?}", config.html_output);

    if let Some(zip_output) = &config.zip_output {
        if total == 0 {
            info!("No slides to capture, skipping archive");
            return Ok(());
        }
        let images = render::capture_slides(&config.html_output, total, &config.capture)?;
        export::export_slides_to_zip(&images, zip_output)?;
        info!(
            "Archive regenerated: {} slide(s) in {:?}",
            images.len(),
            zip_output
        );
    }

    Ok(())
}
