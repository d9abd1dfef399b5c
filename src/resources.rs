// ABOUTME: Resource handling for the carousel-slides application
// ABOUTME: Loads local and remote CSS/JS resources for the assembled slide page

use crate::errors::{CarouselError, Result};
use log::info;
use reqwest::blocking::Client;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// What kind of tag a resource renders to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Stylesheet,
    Script,
}

#[derive(Debug, Clone)]
enum ResourceSource {
    Local(PathBuf),
    Remote(String),
}

/// A stylesheet or script referenced by the slide page, either a local
/// file or a remote URL.
#[derive(Debug, Clone)]
pub struct ResourceFile {
    source: ResourceSource,
}

impl ResourceFile {
    pub fn new(path: &str) -> Self {
        let source = if path.starts_with("http://") || path.starts_with("https://") {
            ResourceSource::Remote(path.to_string())
        } else {
            ResourceSource::Local(PathBuf::from(path))
        };
        Self { source }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self.source, ResourceSource::Remote(_))
    }

    /// The local path, when the resource is a local file.
    pub fn local_path(&self) -> Option<&Path> {
        match &self.source {
            ResourceSource::Local(path) => Some(path),
            ResourceSource::Remote(_) => None,
        }
    }

    /// Resource content, fetched for remote resources and read from disk
    /// for local ones.
    pub fn content(&self) -> Result<String> {
        match &self.source {
            ResourceSource::Remote(url) => fetch_with_retry(url),
            ResourceSource::Local(path) => {
                info!("Reading local resource: {:?}", path);
                if !path.exists() {
                    return Err(CarouselError::PathNotFoundError(path.clone()));
                }
                std::fs::read_to_string(path).map_err(CarouselError::FileReadError)
            }
        }
    }

    /// Generate an HTML tag for the resource. Remote resources and
    /// `embed = false` produce a reference tag; local resources are
    /// embedded inline.
    pub fn tag(&self, kind: ResourceKind, embed: bool) -> Result<String> {
        if self.is_remote() || !embed {
            return Ok(match kind {
                ResourceKind::Stylesheet => {
                    format!(r#"<link rel="stylesheet" href="{}">"#, self)
                }
                ResourceKind::Script => format!(r#"<script src="{}"></script>"#, self),
            });
        }
        let content = self.content()?;
        Ok(match kind {
            ResourceKind::Stylesheet => format!("<style>{}</style>", content),
            ResourceKind::Script => format!("<script>{}</script>", content),
        })
    }
}

impl fmt::Display for ResourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.source {
            ResourceSource::Local(path) => write!(f, "{}", path.display()),
            ResourceSource::Remote(url) => write!(f, "{}", url),
        }
    }
}

/// Fetch a remote resource, retrying up to 3 times with exponential
/// backoff.
fn fetch_with_retry(url: &str) -> Result<String> {
    info!("Fetching remote resource: {}", url);

    let client = Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .map_err(CarouselError::FetchError)?;

    let mut retry_delay = 1000;
    let mut last_error = None;

    for attempt in 1..=3 {
        match client.get(url).send() {
            Ok(response) => {
                if response.status().is_success() {
                    return response.text().map_err(CarouselError::FetchError);
                }
                let status = response.status();
                last_error = Some(CarouselError::ValidationError(format!(
                    "HTTP error: {}",
                    status
                )));
            }
            Err(e) => {
                last_error = Some(CarouselError::FetchError(e));
            }
        }

        info!(
            "Fetch attempt {} failed, retrying in {} ms",
            attempt, retry_delay
        );
        std::thread::sleep(Duration::from_millis(retry_delay));
        retry_delay *= 2;
    }

    Err(last_error.unwrap_or_else(|| {
        CarouselError::ValidationError("Unknown error fetching resource".to_string())
    }))
}
