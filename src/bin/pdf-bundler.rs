//! PDF Bundler CLI tool
//!
//! A command-line tool for merging PDFs with cover and section title pages.

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use glob::glob;
use std::path::{Path, PathBuf};
use std::process;

use pdf_bundler::bundle::{DocumentSet, SourceLoader};
use pdf_bundler::layout::PageDimensions;
use pdf_bundler::manifest::Manifest;
use pdf_bundler::pdf::{inspect_file, MergeEngine, MergeOptions, TitlePageOptions};

/// PDF Bundler - Merge PDFs with cover and title pages
#[derive(Parser)]
#[command(name = "pdf-bundler")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Merge PDFs in the order given
    pdf-bundler merge -o bundle.pdf intro.pdf chapter1.pdf chapter2.pdf

    # Add a cover page and a title page before every document
    pdf-bundler merge -o bundle.pdf --cover \"Course Pack\" --section-titles \"[0-9]*.pdf\"

    # Give a document a custom title page text
    pdf-bundler merge -o bundle.pdf --section-titles --title \"a.pdf=Part One\" a.pdf b.pdf

    # Build from a JSON manifest
    pdf-bundler merge --manifest bundle.json -o bundle.pdf")]
struct Cli {
    /// Increase log verbosity (-v for debug, -vv for trace); RUST_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge PDF files into one bundle
    Merge {
        /// Input PDF files (in order). Supports glob patterns like "*.pdf"
        #[arg(required_unless_present = "manifest")]
        inputs: Vec<String>,

        /// Output PDF file path
        #[arg(short, long)]
        output: PathBuf,

        /// JSON manifest listing documents, titles and cover text;
        /// any INPUTS are appended after the manifest's documents
        #[arg(long)]
        manifest: Option<PathBuf>,

        /// Cover page text placed before the whole bundle
        #[arg(long)]
        cover: Option<String>,

        /// Insert a title page before each document
        #[arg(long)]
        section_titles: bool,

        /// Title for one document, as FILE_NAME=TITLE (repeatable); the file
        /// name must identify a single input
        #[arg(long = "title", value_name = "FILE_NAME=TITLE")]
        titles: Vec<String>,

        /// Paper size of generated title pages
        #[arg(long, value_enum, default_value_t = PageSize::Letter)]
        page_size: PageSize,

        /// Font size of title page text in points
        #[arg(long, default_value_t = 24.0)]
        font_size: f32,

        /// Open the output file after creation
        #[arg(long)]
        open: bool,
    },

    /// Show information about a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PageSize {
    Letter,
    A4,
}

impl From<PageSize> for PageDimensions {
    fn from(size: PageSize) -> Self {
        match size {
            PageSize::Letter => PageDimensions::letter(),
            PageSize::A4 => PageDimensions::a4(),
        }
    }
}

fn main() {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let result = match cli.command {
        Commands::Merge {
            inputs, output, manifest, cover, section_titles, titles,
            page_size, font_size, open,
        } => {
            cmd_merge(
                inputs, output, manifest, cover, section_titles, titles,
                page_size, font_size, open,
            )
        }
        Commands::Info { input } => {
            cmd_info(input)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

/// Expand glob patterns in input paths
///
/// Matches of one pattern are sorted; the patterns themselves keep the order
/// they were given in, since that order is the bundle order.
fn expand_globs(patterns: Vec<String>) -> anyhow::Result<Vec<PathBuf>> {
    let mut paths = Vec::new();

    for pattern in patterns {
        // Check if pattern contains glob characters
        if pattern.contains('*') || pattern.contains('?') || pattern.contains('[') {
            let mut matched = Vec::new();
            let entries = glob(&pattern)
                .map_err(|e| pdf_bundler::Error::InvalidGlob(format!("{pattern}: {e}")))?;
            for entry in entries {
                match entry {
                    Ok(path) => matched.push(path),
                    Err(e) => log::warn!("glob error for {}: {}", pattern, e),
                }
            }
            if matched.is_empty() {
                return Err(pdf_bundler::Error::NoFilesMatched(pattern).into());
            }
            matched.sort();
            paths.extend(matched);
        } else {
            // No glob characters, treat as literal path
            paths.push(PathBuf::from(pattern));
        }
    }

    Ok(paths)
}

/// Open a file with the system default application
fn open_file(path: &Path) -> anyhow::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(path)
            .spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()?;
    }
    Ok(())
}

/// Apply FILE_NAME=TITLE overrides to the documents of a bundle
fn apply_titles(set: &mut DocumentSet, titles: &[String]) -> anyhow::Result<()> {
    for spec in titles {
        let Some((name, title)) = spec.split_once('=') else {
            bail!("Invalid --title {:?}: expected FILE_NAME=TITLE", spec);
        };

        let source = set
            .find_by_name(name)
            .with_context(|| format!("Cannot apply --title {:?}", spec))?
            .cloned()
            .with_context(|| format!("--title refers to {:?}, which is not an input", name))?;

        set.set_title(&source, title)?;
    }

    Ok(())
}

/// Merge PDFs into one bundle
#[allow(clippy::too_many_arguments)]
fn cmd_merge(
    inputs: Vec<String>,
    output: PathBuf,
    manifest: Option<PathBuf>,
    cover: Option<String>,
    section_titles: bool,
    titles: Vec<String>,
    page_size: PageSize,
    font_size: f32,
    open: bool,
) -> anyhow::Result<()> {
    let mut insert_document_titles = section_titles;
    let mut loader = SourceLoader::new();

    let mut set = match manifest {
        Some(path) => {
            let manifest = Manifest::load(&path)
                .with_context(|| format!("Failed to load manifest {}", path.display()))?;
            insert_document_titles |= manifest.section_titles;
            manifest.into_document_set_with(&mut loader)?
        }
        None => DocumentSet::new(),
    };

    for path in expand_globs(inputs)? {
        let source = loader.load(&path)?;
        if !set.add(source) {
            log::warn!("{} is listed more than once; keeping the first", path.display());
        }
    }

    if cover.is_some() {
        set.set_leading_title(cover);
    }
    apply_titles(&mut set, &titles)?;

    eprintln!("Merging {} PDF files...", set.len());

    let engine = MergeEngine::with_title_options(TitlePageOptions {
        page: page_size.into(),
        font_size,
        ..Default::default()
    });
    let bytes = engine.merge(&set, &MergeOptions { insert_document_titles })?;

    std::fs::write(&output, bytes)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    eprintln!("Merged to: {}", output.display());

    if open {
        open_file(&output)?;
    }

    Ok(())
}

/// Show information about a PDF
fn cmd_info(input: PathBuf) -> anyhow::Result<()> {
    let metadata = inspect_file(&input)?;

    println!("File: {}", input.display());
    println!("Pages: {}", metadata.page_count);

    if let Some(title) = metadata.title {
        println!("Title: {}", title);
    }
    if let Some(author) = metadata.author {
        println!("Author: {}", author);
    }

    Ok(())
}
