use super::background::{
    background_color, background_image, background_position, background_repeat, background_size,
    generate_random_positions, MESH_POSITIONS,
};
use super::store::DEFAULT_DOCUMENT_NAME;
use super::*;
use std::cell::RefCell;
use std::rc::Rc;

fn gradient_config(colors: &[&str]) -> BackgroundConfig {
    BackgroundConfig {
        kind: BackgroundKind::Gradient,
        gradient_colors: colors.iter().map(|c| c.to_string()).collect(),
        ..BackgroundConfig::default()
    }
}

fn image_config(src: &str, fit: ImageFit, continuous: bool) -> BackgroundConfig {
    BackgroundConfig {
        kind: BackgroundKind::Image,
        image: Some(src.to_string()),
        image_fit: fit,
        continuous,
        ..BackgroundConfig::default()
    }
}

/// In-memory storage double; clones share the same backing cell so tests
/// can inspect what the store persisted.
#[derive(Clone, Default)]
struct MemoryStorage {
    state: Rc<RefCell<Option<DocumentState>>>,
}

impl DocumentStorage for MemoryStorage {
    fn load(&self) -> Result<Option<DocumentState>> {
        Ok(self.state.borrow().clone())
    }

    fn save(&self, state: &DocumentState) -> Result<()> {
        *self.state.borrow_mut() = Some(state.clone());
        Ok(())
    }
}

struct BrokenStorage;

impl DocumentStorage for BrokenStorage {
    fn load(&self) -> Result<Option<DocumentState>> {
        Err(CarouselError::StorageError("backend unavailable".to_string()))
    }

    fn save(&self, _state: &DocumentState) -> Result<()> {
        Err(CarouselError::StorageError("backend unavailable".to_string()))
    }
}

#[test]
fn test_hsl_to_hex_primaries() {
    assert_eq!(hsl_to_hex(0.0, 100.0, 50.0), "#ff0000");
    assert_eq!(hsl_to_hex(120.0, 100.0, 50.0), "#00ff00");
    assert_eq!(hsl_to_hex(240.0, 100.0, 50.0), "#0000ff");
}

#[test]
fn test_hsl_to_hex_grays_and_yellow() {
    assert_eq!(hsl_to_hex(0.0, 0.0, 100.0), "#ffffff");
    assert_eq!(hsl_to_hex(0.0, 0.0, 0.0), "#000000");
    assert_eq!(hsl_to_hex(60.0, 100.0, 50.0), "#ffff00");
}

#[test]
fn test_random_theme_color_is_hex() {
    for theme in [Theme::Light, Theme::Dark] {
        for _ in 0..50 {
            let color = random_theme_color(theme);
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit()));
        }
    }
}

#[test]
fn test_generate_gradient_colors_count() {
    assert_eq!(generate_gradient_colors(5, Theme::Light).len(), 5);
    assert!(generate_gradient_colors(0, Theme::Dark).is_empty());
}

#[test]
fn test_generate_random_positions_format() {
    let positions = generate_random_positions(4);
    assert_eq!(positions.len(), 4);
    for pos in positions {
        assert!(pos.ends_with('%'));
        assert!(pos.contains("% "));
    }
}

#[test]
fn test_solid_background() {
    let config = BackgroundConfig {
        solid_color: "#123456".to_string(),
        ..BackgroundConfig::default()
    };
    let bg = compute_slide_background(&config, 0, 3, 1080);
    assert_eq!(bg.color, "#123456");
    assert_eq!(bg.image, "none");
    assert_eq!(bg.size, "100% 100%");
    assert_eq!(bg.position, "0 0");
    assert_eq!(bg.repeat, "no-repeat");
}

#[test]
fn test_gradient_color_falls_back_when_palette_empty() {
    let config = gradient_config(&[]);
    assert_eq!(background_color(&config), "#667eea");

    let config = gradient_config(&["#abcdef", "#fedcba"]);
    assert_eq!(background_color(&config), "#abcdef");
}

#[test]
fn test_gradient_mesh_image_terms() {
    let config = gradient_config(&["#aaaaaa", "#bbbbbb"]);
    let image = background_image(&config);
    assert_eq!(
        image,
        "radial-gradient(at 40% 20%, #aaaaaa 0px, transparent 50%),\
radial-gradient(at 80% 0%, #bbbbbb 0px, transparent 50%)"
    );
}

#[test]
fn test_gradient_mesh_positions_cycle() {
    let colors: Vec<String> = (0..8).map(|i| format!("#00000{}", i)).collect();
    let config = BackgroundConfig {
        kind: BackgroundKind::Gradient,
        gradient_colors: colors,
        ..BackgroundConfig::default()
    };
    let image = background_image(&config);
    let terms: Vec<&str> = image.split("),").collect();
    assert_eq!(terms.len(), 8);
    // the 8th color wraps to the first mesh position
    assert!(terms[7].contains(MESH_POSITIONS[0]));
}

#[test]
fn test_custom_gradient_positions_cycle_modulo_their_length() {
    let config = BackgroundConfig {
        kind: BackgroundKind::Gradient,
        gradient_colors: vec!["#111111".into(), "#222222".into(), "#333333".into()],
        gradient_positions: Some(vec!["10% 10%".into(), "90% 90%".into()]),
        ..BackgroundConfig::default()
    };
    let image = background_image(&config);
    let terms: Vec<&str> = image.split("),").collect();
    assert!(terms[0].contains("10% 10%"));
    assert!(terms[1].contains("90% 90%"));
    assert!(terms[2].contains("10% 10%"));
}

#[test]
fn test_continuous_gradient_spans_all_slides() {
    let config = BackgroundConfig {
        continuous: true,
        ..gradient_config(&["#aaaaaa"])
    };
    assert_eq!(background_size(&config, 5), "500% 100%");
    assert_eq!(background_position(&config, 2, 5, 1080), "50% 0");
    assert_eq!(background_position(&config, 0, 5, 1080), "0% 0");
    assert_eq!(background_position(&config, 4, 5, 1080), "100% 0");
}

#[test]
fn test_continuous_gradient_single_slide_does_not_divide_by_zero() {
    let config = BackgroundConfig {
        continuous: true,
        ..gradient_config(&["#aaaaaa"])
    };
    assert_eq!(background_position(&config, 0, 1, 1080), "0% 0");
}

#[test]
fn test_image_background_fits() {
    let cover = image_config("bg.png", ImageFit::Cover, false);
    assert_eq!(background_color(&cover), "transparent");
    assert_eq!(background_image(&cover), "url(bg.png)");
    assert_eq!(background_size(&cover, 3), "cover");
    assert_eq!(background_position(&cover, 1, 3, 1080), "center");
    assert_eq!(background_repeat(&cover), "no-repeat");

    let tiled = image_config("bg.png", ImageFit::Repeat, false);
    assert_eq!(background_size(&tiled, 3), "auto");
    assert_eq!(background_repeat(&tiled), "repeat");
}

#[test]
fn test_continuous_image_scrolls_by_viewport_width() {
    let config = image_config("bg.png", ImageFit::Cover, true);
    assert_eq!(background_size(&config, 4), "auto 100%");
    assert_eq!(background_position(&config, 3, 4, 1080), "-3240px 0");
    assert_eq!(background_position(&config, 0, 4, 1080), "-0px 0");
    assert_eq!(background_repeat(&config), "repeat-x");
}

#[test]
fn test_image_background_without_source() {
    let config = BackgroundConfig {
        kind: BackgroundKind::Image,
        ..BackgroundConfig::default()
    };
    assert_eq!(background_image(&config), "none");
}

#[test]
fn test_split_markdown_without_delimiters() {
    let segments = split_markdown("# Hello\n\nJust one slide.");
    assert_eq!(segments, vec!["# Hello\n\nJust one slide.".to_string()]);
}

#[test]
fn test_split_markdown_blank_input() {
    assert!(split_markdown("").is_empty());
    assert!(split_markdown("   \n\n  ").is_empty());
}

#[test]
fn test_split_markdown_delimiter_grammar() {
    let segments = split_markdown("A\n---\nB\n***\nC\n- - -\nD");
    assert_eq!(segments, vec!["A", "B", "C", "D"]);
}

#[test]
fn test_split_markdown_longer_delimiter_runs() {
    let segments = split_markdown("A\n-----\nB\n*****\nC");
    assert_eq!(segments, vec!["A", "B", "C"]);
}

#[test]
fn test_inline_delimiter_does_not_split() {
    let text = "Use --- to separate slides.\n\nStill one slide *** here.";
    let segments = split_markdown(text);
    assert_eq!(segments.len(), 1);
}

#[test]
fn test_non_delimiter_lines() {
    assert_eq!(split_markdown("A\n--\nB").len(), 1);
    assert_eq!(split_markdown("A\n- - - -\nB").len(), 1);
    assert_eq!(split_markdown("A\n--- \nB").len(), 1);
}

#[test]
fn test_empty_segments_are_dropped() {
    let segments = split_markdown("A\n---\n\n---\nB\n---\n   ");
    assert_eq!(segments, vec!["A", "B"]);
}

#[test]
fn test_parse_and_split_renders_each_segment() {
    let slides = parse_and_split_markdown("# One\n---\n## Two");
    assert_eq!(slides.len(), 2);
    assert!(slides[0].contains("<h1>One</h1>"));
    assert!(slides[1].contains("<h2>Two</h2>"));
}

#[test]
fn test_store_initializes_with_default_document() {
    let store = DocumentStore::open(Box::<MemoryStorage>::default());
    assert_eq!(store.documents().len(), 1);
    assert_eq!(store.active().name, DEFAULT_DOCUMENT_NAME);
    assert_eq!(store.active().id, store.active_id());
    assert!(store.active().content.contains("---"));
}

#[test]
fn test_store_survives_broken_storage() {
    let mut store = DocumentStore::open(Box::new(BrokenStorage));
    assert_eq!(store.documents().len(), 1);
    // mutations must not fail even though every save errors
    let id = store.add();
    store.rename(&id, "Renamed");
    assert_eq!(store.active().name, "Renamed");
}

#[test]
fn test_add_appends_and_activates() {
    let mut store = DocumentStore::open(Box::<MemoryStorage>::default());
    let first_id = store.active().id.clone();
    let new_id = store.add();
    assert_ne!(first_id, new_id);
    assert_eq!(store.documents().len(), 2);
    assert_eq!(store.active_id(), new_id);
    assert_eq!(store.documents().last().map(|d| d.id.clone()), Some(new_id));
}

#[test]
fn test_remove_last_document_is_noop() {
    let mut store = DocumentStore::open(Box::<MemoryStorage>::default());
    let id = store.active().id.clone();
    store.remove(&id);
    assert_eq!(store.documents().len(), 1);
    assert_eq!(store.active().id, id);
}

#[test]
fn test_remove_active_selects_predecessor() {
    let mut store = DocumentStore::open(Box::<MemoryStorage>::default());
    let a = store.active().id.clone();
    let b = store.add();
    let _c = store.add();
    store.set_active(&b);

    store.remove(&b);
    assert_eq!(store.active_id(), a);
}

#[test]
fn test_remove_first_active_selects_new_first() {
    let mut store = DocumentStore::open(Box::<MemoryStorage>::default());
    let a = store.active().id.clone();
    let b = store.add();
    let _c = store.add();
    store.set_active(&a);

    store.remove(&a);
    assert_eq!(store.active_id(), b);
}

#[test]
fn test_remove_inactive_keeps_active() {
    let mut store = DocumentStore::open(Box::<MemoryStorage>::default());
    let a = store.active().id.clone();
    let b = store.add();
    store.set_active(&a);

    store.remove(&b);
    assert_eq!(store.active_id(), a);
    assert_eq!(store.documents().len(), 1);
}

#[test]
fn test_remove_unknown_id_is_noop() {
    let mut store = DocumentStore::open(Box::<MemoryStorage>::default());
    store.add();
    store.remove("no-such-id");
    assert_eq!(store.documents().len(), 2);
}

#[test]
fn test_rename_and_unknown_rename() {
    let mut store = DocumentStore::open(Box::<MemoryStorage>::default());
    let id = store.active().id.clone();
    store.rename(&id, "My Carousel");
    assert_eq!(store.active().name, "My Carousel");

    store.rename("no-such-id", "Ignored");
    assert_eq!(store.active().name, "My Carousel");
}

#[test]
fn test_active_resolution_self_heals() {
    let mut store = DocumentStore::open(Box::<MemoryStorage>::default());
    let first_id = store.active().id.clone();
    store.set_active("dangling-id");
    assert_eq!(store.active().id, first_id);
}

#[test]
fn test_set_active_content_with_dangling_pointer_is_noop() {
    let mut store = DocumentStore::open(Box::<MemoryStorage>::default());
    let original = store.active().content.clone();
    store.set_active("dangling-id");
    store.set_active_content("changed");
    assert_eq!(store.active().content, original);
}

#[test]
fn test_set_active_content_mutates_active_document() {
    let mut store = DocumentStore::open(Box::<MemoryStorage>::default());
    store.set_active_content("# New content");
    assert_eq!(store.active().content, "# New content");
}

#[test]
fn test_mutations_persist_to_storage() {
    let storage = MemoryStorage::default();
    let mut store = DocumentStore::open(Box::new(storage.clone()));
    let id = store.add();
    store.rename(&id, "Persisted");
    store.set_active_content("# Body");

    let persisted = storage.state.borrow().clone().expect("state was saved");
    assert_eq!(persisted.documents.len(), 2);
    assert_eq!(persisted.active_id, id);
    assert_eq!(persisted.documents[1].name, "Persisted");
    assert_eq!(persisted.documents[1].content, "# Body");
}

#[test]
fn test_reopening_store_restores_state() {
    let storage = MemoryStorage::default();
    let (id, name) = {
        let mut store = DocumentStore::open(Box::new(storage.clone()));
        let id = store.add();
        store.rename(&id, "Second");
        (id, "Second".to_string())
    };

    let reopened = DocumentStore::open(Box::new(storage));
    assert_eq!(reopened.documents().len(), 2);
    assert_eq!(reopened.active_id(), id);
    assert_eq!(reopened.active().name, name);
}

#[test]
fn test_generate_slides_html_inlines_backgrounds() {
    let slides = vec!["<h1>One</h1>".to_string(), "<h1>Two</h1>".to_string()];
    let config = gradient_config(&["#aaaaaa"]);
    let backgrounds: Vec<_> = (0..slides.len())
        .map(|i| compute_slide_background(&config, i, slides.len(), 1080))
        .collect();

    let html = generate_slides_html("Test", &slides, &backgrounds, &[], true).unwrap();
    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("<title>Test</title>"));
    assert_eq!(html.matches("<div class=\"slide\"").count(), 2);
    assert!(html.contains("background-color: #aaaaaa;"));
    assert!(html.contains("radial-gradient(at 40% 20%, #aaaaaa 0px, transparent 50%)"));
}

#[test]
fn test_generate_slides_html_rejects_mismatched_lengths() {
    let slides = vec!["<h1>One</h1>".to_string()];
    let result = generate_slides_html("Test", &slides, &[], &[], true);
    assert!(result.is_err());
}

#[test]
fn test_slide_filename_zero_padding() {
    assert_eq!(slide_filename(0), "slide-01.png");
    assert_eq!(slide_filename(8), "slide-09.png");
    assert_eq!(slide_filename(11), "slide-12.png");
}

#[test]
fn test_resource_file_remote_tags() {
    let resource = ResourceFile::new("https://example.com/style.css");
    assert!(resource.is_remote());

    let tag = resource.tag(ResourceKind::Stylesheet, true).unwrap();
    assert_eq!(
        tag,
        r#"<link rel="stylesheet" href="https://example.com/style.css">"#
    );

    let resource = ResourceFile::new("https://example.com/script.js");
    let tag = resource.tag(ResourceKind::Script, true).unwrap();
    assert_eq!(
        tag,
        r#"<script src="https://example.com/script.js"></script>"#
    );
}
