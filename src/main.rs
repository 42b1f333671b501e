use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use waterfall::layout::{arrange, LayoutConfig};
use waterfall::{FileStore, ImageDescriptor, ThemeStore};
#[cfg(feature = "http")]
use waterfall::{GalleryConfig, ImageQuery, ImageSource};

#[derive(Parser)]
#[command(name = "waterfall", version, about = "Masonry image gallery layout and client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Args, Clone, Copy)]
struct GridArgs {
    /// Minimum column width in pixels
    #[arg(long, default_value_t = waterfall::layout::DEFAULT_MIN_COLUMN_WIDTH)]
    min_column_width: f64,
    /// Maximum number of columns
    #[arg(long, default_value_t = waterfall::layout::DEFAULT_MAX_COLUMNS)]
    max_columns: usize,
    /// Gap between columns in pixels
    #[arg(long, default_value_t = 0.0)]
    gap: f64,
}

impl From<GridArgs> for LayoutConfig {
    fn from(a: GridArgs) -> Self {
        LayoutConfig {
            min_column_width: a.min_column_width,
            max_columns: a.max_columns,
            gap: a.gap,
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Lay out a JSON array of images read from a file or stdin
    Layout {
        /// Container width in pixels
        #[arg(long)]
        width: f64,
        /// Input file; `-` or absent reads stdin
        #[arg(long)]
        input: Option<PathBuf>,
        #[command(flatten)]
        grid: GridArgs,
    },
    /// List authors from the image service
    Authors,
    /// Fetch a page of images, optionally laid out for a container width
    Fetch {
        #[arg(long)]
        author: Option<u64>,
        #[arg(long, default_value_t = waterfall::gallery::DEFAULT_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        /// Print the column layout for this container width instead of the raw list
        #[arg(long)]
        width: Option<f64>,
        #[command(flatten)]
        grid: GridArgs,
    },
    /// Show or toggle the persisted theme
    Theme {
        #[arg(long)]
        toggle: bool,
        /// Preference file
        #[arg(long, default_value = "waterfall-prefs.json")]
        store: PathBuf,
    },
}

fn read_images(input: Option<PathBuf>) -> anyhow::Result<Vec<ImageDescriptor>> {
    let text = match input {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?,
        _ => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };
    serde_json::from_str(&text).context("input is not a JSON array of images")
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn layout_for(images: Vec<ImageDescriptor>, width: f64, grid: LayoutConfig) -> anyhow::Result<()> {
    if !width.is_finite() {
        bail!("container width must be a finite number");
    }
    let count = grid.column_count(width);
    let columns = arrange(images, count, grid.column_width(width, count))?;
    print_json(&columns)
}

#[cfg(feature = "http")]
fn source() -> anyhow::Result<waterfall::HttpImageSource> {
    let config = GalleryConfig::from_env()?;
    Ok(waterfall::HttpImageSource::new(&config)?)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Layout { width, input, grid } => layout_for(read_images(input)?, width, grid.into()),
        #[cfg(feature = "http")]
        Command::Authors => print_json(&source()?.fetch_authors()?),
        #[cfg(feature = "http")]
        Command::Fetch {
            author,
            limit,
            offset,
            width,
            grid,
        } => {
            let query = ImageQuery::default()
                .for_author(author)
                .with_limit(limit)
                .with_offset(offset);
            let images = source()?.fetch_images(&query)?;
            match width {
                Some(w) => layout_for(images, w, grid.into()),
                None => print_json(&images),
            }
        }
        #[cfg(not(feature = "http"))]
        Command::Authors | Command::Fetch { .. } => {
            bail!("this build has no HTTP support; rebuild with the `http` feature")
        }
        Command::Theme { toggle, store } => {
            let mut theme = ThemeStore::load(FileStore::new(store))?;
            if toggle {
                theme.toggle()?;
            }
            println!("{}", theme.theme());
            Ok(())
        }
    }
}
