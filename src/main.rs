// ABOUTME: Main entry point for the carousel-slides program.
// ABOUTME: Provides the CLI interface and executes commands from the library.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;

use carousel::background::generate_random_positions;
use carousel::{
    compute_slide_background, generate_gradient_colors, BackgroundConfig, BackgroundKind,
    CarouselError, Config, DimensionPreset, DocumentStore, ImageFit, JsonFileStorage,
    ResourceFile, Theme, WatchConfig,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the slide deck HTML from markdown
    GenerateHtml(GenerateHtmlArgs),

    /// Export markdown as a zip archive of slide PNGs
    Export(ExportArgs),

    /// Package an existing directory of slide images into a zip archive
    Package(PackageArgs),

    /// Watch a markdown file and regenerate outputs on change
    Watch(WatchArgs),

    /// Manage the document library
    #[command(subcommand)]
    Docs(DocsCommand),
}

#[derive(Clone, Copy, ValueEnum)]
enum BackgroundTypeArg {
    Solid,
    Gradient,
    Image,
}

#[derive(Clone, Copy, ValueEnum)]
enum ImageFitArg {
    Cover,
    Repeat,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Square,
    Portrait,
    Landscape,
}

impl From<PresetArg> for DimensionPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Square => DimensionPreset::Square,
            PresetArg::Portrait => DimensionPreset::Portrait,
            PresetArg::Landscape => DimensionPreset::Landscape,
        }
    }
}

#[derive(Args)]
struct BackgroundArgs {
    /// Background type
    #[arg(long = "bg-type", value_enum, default_value = "solid")]
    bg_type: BackgroundTypeArg,

    /// Solid background color (hex)
    #[arg(long = "bg-color", default_value = "#ffffff")]
    bg_color: String,

    /// Number of gradient mesh colors to generate
    #[arg(long, default_value_t = 5)]
    gradient_count: usize,

    /// Color theme for generated gradient colors
    #[arg(long, value_enum, default_value = "light")]
    theme: ThemeArg,

    /// Use random gradient mesh anchor positions instead of the fixed table
    #[arg(long)]
    random_positions: bool,

    /// Background image path or URL
    #[arg(long = "bg-image")]
    bg_image: Option<String>,

    /// How an image background fills a slide
    #[arg(long, value_enum, default_value = "cover")]
    image_fit: ImageFitArg,

    /// Span one background continuously across all slides
    #[arg(long)]
    continuous: bool,
}

impl BackgroundArgs {
    fn to_config(&self) -> BackgroundConfig {
        let kind = match self.bg_type {
            BackgroundTypeArg::Solid => BackgroundKind::Solid,
            BackgroundTypeArg::Gradient => BackgroundKind::Gradient,
            BackgroundTypeArg::Image => BackgroundKind::Image,
        };
        let theme = match self.theme {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        };
        let gradient_colors = if kind == BackgroundKind::Gradient {
            generate_gradient_colors(self.gradient_count, theme)
        } else {
            Vec::new()
        };
        let gradient_positions = if self.random_positions {
            Some(generate_random_positions(self.gradient_count))
        } else {
            None
        };
        BackgroundConfig {
            kind,
            solid_color: self.bg_color.clone(),
            gradient_colors,
            gradient_positions,
            image: self.bg_image.clone(),
            image_fit: match self.image_fit {
                ImageFitArg::Cover => ImageFit::Cover,
                ImageFitArg::Repeat => ImageFit::Repeat,
            },
            continuous: self.continuous,
        }
    }
}

#[derive(Args)]
struct GenerateHtmlArgs {
    /// Path to the markdown file
    #[arg(short, long)]
    input: PathBuf,

    /// Path to output HTML file
    #[arg(short, long)]
    output: PathBuf,

    /// Page title
    #[arg(long, default_value = "Carousel")]
    title: String,

    /// CSS files to include (local paths or URLs)
    #[arg(long, value_delimiter = ',')]
    css: Option<Vec<String>>,

    /// Mode for CSS: 'embed' to embed content or 'link' to reference
    #[arg(long, default_value = "embed")]
    mode: String,

    /// Slide dimension preset
    #[arg(long, value_enum, default_value = "square")]
    preset: PresetArg,

    /// Export resolution multiplier (1, 2 or 3)
    #[arg(long, default_value_t = 1)]
    scale: u32,

    #[command(flatten)]
    background: BackgroundArgs,
}

#[derive(Args)]
struct ExportArgs {
    /// Path to the markdown file; omit to export the active stored document
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to the output zip archive
    #[arg(short, long)]
    output: PathBuf,

    /// Keep the intermediate HTML at this path
    #[arg(long)]
    keep_html: Option<PathBuf>,

    /// Page title; defaults to the document name or file stem
    #[arg(long)]
    title: Option<String>,

    /// CSS files to include (local paths or URLs)
    #[arg(long, value_delimiter = ',')]
    css: Option<Vec<String>>,

    /// Slide dimension preset
    #[arg(long, value_enum, default_value = "square")]
    preset: PresetArg,

    /// Export resolution multiplier (1, 2 or 3)
    #[arg(long, default_value_t = 1)]
    scale: u32,

    #[command(flatten)]
    background: BackgroundArgs,
}

#[derive(Args)]
struct PackageArgs {
    /// Directory holding rendered slide images
    #[arg(short, long)]
    slides_dir: PathBuf,

    /// Path to the output zip archive
    #[arg(short, long)]
    output: PathBuf,

    /// Glob pattern for slide images
    #[arg(long, default_value = "*.png")]
    pattern: String,
}

#[derive(Args)]
struct WatchArgs {
    /// Path to the markdown file to watch
    #[arg(short, long)]
    input: PathBuf,

    /// Path to output HTML file
    #[arg(short, long)]
    output: PathBuf,

    /// Re-capture and re-package slides into this zip on every change
    #[arg(long)]
    zip: Option<PathBuf>,

    /// Page title
    #[arg(long, default_value = "Carousel")]
    title: String,

    /// CSS files to include (local paths or URLs)
    #[arg(long, value_delimiter = ',')]
    css: Option<Vec<String>>,

    /// Serve the HTML over a local preview server
    #[arg(long)]
    serve: bool,

    /// Preview server port
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Debounce time in milliseconds
    #[arg(long, default_value_t = 500)]
    debounce: u64,

    /// Slide dimension preset
    #[arg(long, value_enum, default_value = "square")]
    preset: PresetArg,

    /// Export resolution multiplier (1, 2 or 3)
    #[arg(long, default_value_t = 1)]
    scale: u32,

    #[command(flatten)]
    background: BackgroundArgs,
}

#[derive(Subcommand)]
enum DocsCommand {
    /// List all documents in the library
    List,

    /// Add a new document and make it active
    Add {
        /// Name for the new document
        #[arg(long)]
        name: Option<String>,
    },

    /// Remove a document by id
    Remove { id: String },

    /// Rename a document
    Rename { id: String, name: String },

    /// Make a document active
    Use { id: String },

    /// Print the active document's content
    Show,
}

fn resource_files(paths: &Option<Vec<String>>) -> Vec<ResourceFile> {
    paths
        .as_ref()
        .map(|files| files.iter().map(|p| ResourceFile::new(p)).collect())
        .unwrap_or_default()
}

fn validate_scale(scale: u32) -> carousel::Result<()> {
    if !carousel::config::EXPORT_SCALES.contains(&scale) {
        return Err(CarouselError::ValidationError(format!(
            "Unsupported export scale: {} (use 1, 2 or 3)",
            scale
        )));
    }
    Ok(())
}

fn run_generate_html(args: &GenerateHtmlArgs, config: &Config) -> carousel::Result<()> {
    validate_scale(args.scale)?;
    let markdown_content = fs::read_to_string(&args.input)?;
    let slides = carousel::parse_and_split_markdown(&markdown_content);

    let capture = config.get_capture_config(Some(args.preset.into()), Some(args.scale), None);
    let background = args.background.to_config();
    let backgrounds: Vec<_> = (0..slides.len())
        .map(|i| compute_slide_background(&background, i, slides.len(), capture.viewport_width()))
        .collect();

    let embed = args.mode != "link" && config.embed_resources;
    let html = carousel::generate_slides_html(
        &args.title,
        &slides,
        &backgrounds,
        &resource_files(&args.css),
        embed,
    )?;
    carousel::write_html_to_file(&html, &args.output)?;

    println!("HTML generated successfully: {:?}", args.output);
    Ok(())
}

fn run_export(args: &ExportArgs, config: &Config) -> carousel::Result<()> {
    validate_scale(args.scale)?;
    let (markdown_content, default_title) = match &args.input {
        Some(input) => {
            let content = fs::read_to_string(input)?;
            let title = input
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_else(|| "Carousel".to_string());
            (content, title)
        }
        None => {
            let store =
                DocumentStore::open(Box::new(JsonFileStorage::new(config.storage_path.clone())));
            let doc = store.active();
            (doc.content.clone(), doc.name.clone())
        }
    };

    let slides = carousel::parse_and_split_markdown(&markdown_content);
    if slides.is_empty() {
        return Err(CarouselError::ValidationError(
            "No slides found in markdown input".to_string(),
        ));
    }

    let capture = config.get_capture_config(Some(args.preset.into()), Some(args.scale), None);
    let background = args.background.to_config();
    let backgrounds: Vec<_> = (0..slides.len())
        .map(|i| compute_slide_background(&background, i, slides.len(), capture.viewport_width()))
        .collect();

    let title = args.title.clone().unwrap_or(default_title);
    let html = carousel::generate_slides_html(
        &title,
        &slides,
        &backgrounds,
        &resource_files(&args.css),
        config.embed_resources,
    )?;

    let html_path = match &args.keep_html {
        Some(path) => path.clone(),
        None => std::env::temp_dir().join(format!("carousel-{}.html", uuid::Uuid::new_v4())),
    };
    carousel::write_html_to_file(&html, &html_path)?;

    let images = carousel::capture_slides(&html_path, slides.len(), &capture)?;
    carousel::export_slides_to_zip(&images, &args.output)?;

    if args.keep_html.is_none() {
        if let Err(e) = fs::remove_file(&html_path) {
            log::warn!("Failed to remove intermediate HTML {:?}: {}", html_path, e);
        }
    }

    println!(
        "Exported {} slide(s) to {:?}",
        images.len(),
        args.output
    );
    Ok(())
}

fn run_package(args: &PackageArgs) -> carousel::Result<()> {
    let count = carousel::package_slides_dir(&args.slides_dir, &args.pattern, &args.output)?;
    println!("Packaged {} slide(s) into {:?}", count, args.output);
    Ok(())
}

fn run_watch(args: &WatchArgs, config: &Config) -> carousel::Result<()> {
    validate_scale(args.scale)?;
    let watch_config = WatchConfig {
        markdown_path: args.input.clone(),
        html_output: args.output.clone(),
        zip_output: args.zip.clone(),
        title: args.title.clone(),
        background: args.background.to_config(),
        capture: config.get_capture_config(Some(args.preset.into()), Some(args.scale), None),
        css_files: resource_files(&args.css),
        embed_resources: true,
        debounce_ms: args.debounce,
        serve: args.serve,
        port: args.port,
    };
    carousel::watch_markdown(watch_config, config)
}

fn run_docs(command: &DocsCommand, config: &Config) -> carousel::Result<()> {
    let storage = JsonFileStorage::new(config.storage_path.clone());
    let mut store = DocumentStore::open(Box::new(storage));

    match command {
        DocsCommand::List => {
            for doc in store.documents() {
                let marker = if doc.id == store.active_id() { "*" } else { " " };
                println!("{} {}  {}", marker, doc.id, doc.name);
            }
        }
        DocsCommand::Add { name } => {
            let id = store.add();
            if let Some(name) = name {
                store.rename(&id, name);
            }
            println!("Added document {}", id);
        }
        DocsCommand::Remove { id } => {
            store.remove(id);
            println!("Removed document {}", id);
        }
        DocsCommand::Rename { id, name } => {
            store.rename(id, name);
            println!("Renamed document {}", id);
        }
        DocsCommand::Use { id } => {
            store.set_active(id);
            println!("Active document is now {}", store.active().name);
        }
        DocsCommand::Show => {
            let doc = store.active();
            println!("{}", doc.content);
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = Config::from_env();

    let result = match &cli.command {
        Some(Commands::GenerateHtml(args)) => run_generate_html(args, &config),
        Some(Commands::Export(args)) => run_export(args, &config),
        Some(Commands::Package(args)) => run_package(args),
        Some(Commands::Watch(args)) => run_watch(args, &config),
        Some(Commands::Docs(command)) => run_docs(command, &config),
        None => {
            println!("No command specified. Use --help for usage information.");
            Ok(())
        }
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
