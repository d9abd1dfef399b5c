use std::fs;
use std::io::{Cursor, Read};
use tempfile::TempDir;

use carousel::export::write_slides_archive;
use carousel::{export_slides_to_zip, find_slide_images, package_slides_dir, CarouselError};

fn png_bytes(r: u8, g: u8, b: u8) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([r, g, b, 255]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageOutputFormat::Png)
        .expect("Failed to encode PNG");
    buf.into_inner()
}

#[test]
fn test_archive_entries_are_named_and_ordered() {
    let images = vec![png_bytes(255, 0, 0), png_bytes(0, 255, 0), png_bytes(0, 0, 255)];

    let mut buf = Cursor::new(Vec::new());
    write_slides_archive(&images, &mut buf).expect("Failed to write archive");

    let mut archive = zip::ZipArchive::new(Cursor::new(buf.into_inner()))
        .expect("Failed to open archive");
    assert_eq!(archive.len(), 3);

    for (i, expected) in ["slide-01.png", "slide-02.png", "slide-03.png"]
        .iter()
        .enumerate()
    {
        let mut entry = archive.by_index(i).expect("Failed to read entry");
        assert_eq!(entry.name(), *expected);

        let mut data = Vec::new();
        entry.read_to_end(&mut data).expect("Failed to read bytes");
        assert_eq!(data, images[i]);
    }
}

#[test]
fn test_export_writes_zip_file() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let output = dir.path().join("out").join("slides.zip");

    let images = vec![png_bytes(10, 20, 30)];
    export_slides_to_zip(&images, &output).expect("Failed to export");

    assert!(output.exists(), "Archive file should exist");
    let file = fs::File::open(&output).expect("Failed to open archive");
    let archive = zip::ZipArchive::new(file).expect("Failed to read archive");
    assert_eq!(archive.len(), 1);
}

#[test]
fn test_find_slide_images_sorted() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    for name in ["slide_0002.png", "slide_0001.png", "slide_0003.png"] {
        fs::write(dir.path().join(name), png_bytes(1, 2, 3)).expect("Failed to write image");
    }
    fs::write(dir.path().join("notes.txt"), "ignored").expect("Failed to write file");

    let paths = find_slide_images(dir.path(), "*.png").expect("Failed to find images");
    let names: Vec<String> = paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(names, vec!["slide_0001.png", "slide_0002.png", "slide_0003.png"]);
}

#[test]
fn test_find_slide_images_empty_dir_errors() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let result = find_slide_images(dir.path(), "*.png");
    assert!(matches!(result, Err(CarouselError::NoSlidesFoundError(_))));
}

#[test]
fn test_package_skips_undecodable_images() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(dir.path().join("a.png"), png_bytes(5, 5, 5)).expect("Failed to write image");
    fs::write(dir.path().join("b.png"), b"not a png").expect("Failed to write junk");
    fs::write(dir.path().join("c.png"), png_bytes(9, 9, 9)).expect("Failed to write image");

    let output = dir.path().join("slides.zip");
    let count = package_slides_dir(dir.path(), "*.png", &output).expect("Failed to package");
    assert_eq!(count, 2);

    let file = fs::File::open(&output).expect("Failed to open archive");
    let mut archive = zip::ZipArchive::new(file).expect("Failed to read archive");
    assert_eq!(archive.len(), 2);
    // renumbered sequentially regardless of the skipped file
    assert_eq!(archive.by_index(0).unwrap().name(), "slide-01.png");
    assert_eq!(archive.by_index(1).unwrap().name(), "slide-02.png");
}

#[test]
fn test_package_missing_dir_errors() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let missing = dir.path().join("nope");
    let result = package_slides_dir(&missing, "*.png", &dir.path().join("slides.zip"));
    assert!(matches!(result, Err(CarouselError::PathNotFoundError(_))));
}
