// ABOUTME: Export module for the carousel-slides application
// ABOUTME: Packages captured slide images into a zip archive

use crate::errors::{CarouselError, Result};
use image::io::Reader as ImageReader;
use log::{info, warn};
use std::fs;
use std::io::{Seek, Write};
use std::path::{Path, PathBuf};
use zip::{write::FileOptions, ZipWriter};

/// Archive entry name for a slide: `slide-NN.png`, two-digit 1-based.
pub fn slide_filename(index: usize) -> String {
    format!("slide-{:02}.png", index + 1)
}

/// Write slide images into a zip archive in order, one `slide-NN.png`
/// entry per image.
pub fn write_slides_archive<W: Write + Seek>(images: &[Vec<u8>], writer: W) -> Result<()> {
    let mut zip = ZipWriter::new(writer);

    for (i, data) in images.iter().enumerate() {
        zip.start_file(slide_filename(i), FileOptions::default())?;
        zip.write_all(data)?;
    }

    zip.finish()?;
    Ok(())
}

/// Export slide images as a zip archive file.
pub fn export_slides_to_zip(images: &[Vec<u8>], output_file: &Path) -> Result<()> {
    info!(
        "Exporting {} slide(s) to archive {:?}",
        images.len(),
        output_file
    );

    if let Some(parent) = output_file.parent() {
        if !parent.exists() {
            fs::create_dir_all(parent).map_err(CarouselError::FileReadError)?;
        }
    }

    let file = fs::File::create(output_file).map_err(CarouselError::FileReadError)?;
    write_slides_archive(images, file)?;

    info!("Archive created at {:?}", output_file);
    Ok(())
}

/// Find slide images that match a pattern in a directory, sorted by name.
pub fn find_slide_images(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>> {
    let glob_pattern = format!("{}/{}", dir.to_string_lossy(), pattern);
    let mut paths = Vec::new();

    for entry in (glob::glob(&glob_pattern)
        .map_err(|e| CarouselError::ArchiveError(format!("Invalid glob pattern: {}", e)))?)
    .flatten()
    {
        paths.push(entry);
    }

    paths.sort();

    if paths.is_empty() {
        return Err(CarouselError::NoSlidesFoundError(glob_pattern));
    }

    Ok(paths)
}

/// Package a directory of already-rendered slide images into a zip
/// archive. Images that cannot be read or decoded are logged and skipped;
/// the archived entries are renumbered sequentially. Returns the number of
/// slides packaged.
pub fn package_slides_dir(slides_dir: &Path, pattern: &str, output_file: &Path) -> Result<usize> {
    info!("Packaging slides from {:?}", slides_dir);

    if !slides_dir.exists() || !slides_dir.is_dir() {
        return Err(CarouselError::PathNotFoundError(slides_dir.to_path_buf()));
    }

    let slide_paths = find_slide_images(slides_dir, pattern)?;
    info!("Found {} slide image(s)", slide_paths.len());

    let mut images = Vec::with_capacity(slide_paths.len());
    for slide_path in &slide_paths {
        // Validate the image decodes before archiving it
        match ImageReader::open(slide_path) {
            Ok(reader) => match reader.decode() {
                Ok(_) => {}
                Err(e) => {
                    warn!("Failed to decode image {:?}: {}", slide_path, e);
                    continue;
                }
            },
            Err(e) => {
                warn!("Failed to open image {:?}: {}", slide_path, e);
                continue;
            }
        }

        match fs::read(slide_path) {
            Ok(data) => images.push(data),
            Err(e) => {
                warn!("Failed to read image file {:?}: {}", slide_path, e);
            }
        }
    }

    if images.is_empty() {
        return Err(CarouselError::NoSlidesFoundError(format!(
            "{}/{}",
            slides_dir.to_string_lossy(),
            pattern
        )));
    }

    let count = images.len();
    export_slides_to_zip(&images, output_file)?;
    Ok(count)
}
