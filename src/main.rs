use clap::{Parser, Subcommand};
use note_save::browser::Browser;
use note_save::collection::{Collection, create_collection, list_collections};
use note_save::config::{self, NoteSaveConfig};
use note_save::export;
use note_save::imaging::FileListClipboard;
use note_save::layout::Row;
use note_save::output;
use note_save::store::{EntryStore, StoreError};
use serde::Serialize;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Which page of a collection to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PageArg {
    First,
    Last,
    /// 1-based page number.
    Number(usize),
}

impl FromStr for PageArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first" => Ok(Self::First),
            "last" => Ok(Self::Last),
            _ => match s.parse::<usize>() {
                Ok(0) | Err(_) => Err(format!(
                    "expected a page number from 1, `first` or `last`, got {s:?}"
                )),
                Ok(n) => Ok(Self::Number(n)),
            },
        }
    }
}

/// Shared flag for commands that work on one collection.
#[derive(clap::Args, Clone)]
struct CollectionArgs {
    /// Collection to use (defaults to `default_collection` from config)
    #[arg(long, short)]
    collection: Option<String>,
}

/// Shared flags for commands that show a page.
#[derive(clap::Args, Clone)]
struct PageArgs {
    /// Page to show: a number from 1, `first` or `last`
    #[arg(long, default_value = "first")]
    page: PageArg,

    /// Show the oldest entries first, whatever the config says
    #[arg(long)]
    oldest_first: bool,
}

#[derive(Parser)]
#[command(name = "note-save")]
#[command(about = "Scratchpad for text snippets and screenshots")]
#[command(long_about = "\
Scratchpad for text snippets and screenshots

Every save appends one entry to a collection: a plain-text log record plus
one PNG per image. Collections are directories under the save folder:

  saved/
  ├── Default/
  │   ├── TEXTS.txt                  # append-only entry log
  │   ├── 2024-03-09_14-05-59.png    # images, named by save time
  │   └── 2024-03-09_14-05-59_1.png  # same-second collision
  └── Recipes/
      └── TEXTS.txt

Entries are browsed as a paged grid: each entry is one unit wide per image,
rows hold `items_per_row` units and pages hold `rows_per_page` rows.

Run 'note-save gen-config' to generate a documented config.toml.
Set RUST_LOG=debug to see what each command does.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Save folder (overrides `save_folder` from config)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Save text and images as a new entry
    Save {
        #[command(flatten)]
        target: CollectionArgs,
        /// Entry text
        #[arg(long, short, conflicts_with = "stdin")]
        text: Option<String>,
        /// Read the entry text from standard input
        #[arg(long)]
        stdin: bool,
        /// Image file to attach (repeatable, kept in order)
        #[arg(long = "image", short, value_name = "PATH")]
        images: Vec<PathBuf>,
    },
    /// Show one page of a collection
    List {
        #[command(flatten)]
        target: CollectionArgs,
        #[command(flatten)]
        page: PageArgs,
        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },
    /// List collections
    Collections,
    /// Create an empty collection
    NewCollection {
        /// Letters, digits, spaces, `-` and `_`
        name: String,
    },
    /// Write one page of a collection as static HTML
    Export {
        #[command(flatten)]
        target: CollectionArgs,
        #[command(flatten)]
        page: PageArgs,
        /// Output directory
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

/// `list --json` output.
#[derive(Serialize)]
struct PageJson<'a> {
    collection: &'a str,
    /// 1-based.
    page: usize,
    page_count: usize,
    can_go_back: bool,
    can_go_forward: bool,
    rows: &'a [Row<'a>],
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(());
    }

    let config = config::load_config(&cli.config_dir)?;
    let root = cli
        .root
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.save_folder));

    match cli.command {
        Command::Save {
            target,
            text,
            stdin,
            images,
        } => {
            let collection = resolve_collection(&target, &config)?;
            let text = if stdin {
                let mut buf = String::new();
                std::io::stdin().read_to_string(&mut buf)?;
                buf
            } else {
                text.unwrap_or_default()
            };
            let images = FileListClipboard::new(images).decode_all()?;

            let store = EntryStore::new(&root);
            match store.try_save(collection.name(), &text, &images) {
                Ok(saved) => output::print_saved(collection.name(), &saved),
                Err(StoreError::NothingToSave) => {
                    return Err("nothing to save: give --text, --stdin or --image".into());
                }
                Err(e) => return Err(e.into()),
            }
        }
        Command::List { target, page, json } => {
            let collection = resolve_collection(&target, &config)?;
            let browser = open_browser(&root, &collection, &page, &config);
            if json {
                let current = browser.current_page();
                let view = PageJson {
                    collection: collection.name(),
                    page: browser.page_index() + 1,
                    page_count: browser.page_count(),
                    can_go_back: browser.can_go_back(),
                    can_go_forward: browser.can_go_forward(),
                    rows: &current.rows,
                };
                println!("{}", serde_json::to_string_pretty(&view)?);
            } else {
                output::print_page(collection.name(), &browser.layout(), browser.page_index());
            }
        }
        Command::Collections => {
            let collections = list_collections(&root, &config.default_collection);
            output::print_collections(&collections, &config.default_collection);
        }
        Command::NewCollection { name } => {
            let collection = Collection::parse(&name)?;
            let dir = create_collection(&root, &collection)?;
            println!("Created {} → {}", collection, dir.display());
        }
        Command::Export { target, page, out } => {
            init_thread_pool(&config.processing);
            let collection = resolve_collection(&target, &config)?;
            let browser = open_browser(&root, &collection, &page, &config);
            let layout = browser.layout();
            // An explicit page number past the end is an error here, not clamped
            let page_index = match page.page {
                PageArg::Number(n) => n - 1,
                _ => browser.page_index(),
            };
            let summary =
                export::export_page(&root, collection.name(), &layout, page_index, &out, &config)?;
            println!(
                "Exported page {}/{} of {} → {}",
                page_index + 1,
                layout.page_count(),
                collection,
                summary.html_path.display()
            );
            if !summary.skipped.is_empty() {
                println!("Skipped {} missing images", summary.skipped.len());
            }
        }
        Command::GenConfig => {}
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for `--json`. `RUST_LOG` overrides
/// the default `warn` level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores: user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}

fn resolve_collection(
    args: &CollectionArgs,
    config: &NoteSaveConfig,
) -> Result<Collection, note_save::collection::CollectionError> {
    Collection::parse(
        args.collection
            .as_deref()
            .unwrap_or(&config.default_collection),
    )
}

/// Load a collection and move to the requested page.
fn open_browser(
    root: &std::path::Path,
    collection: &Collection,
    page: &PageArgs,
    config: &NoteSaveConfig,
) -> Browser {
    let mut layout = config.layout.clone();
    if page.oldest_first {
        layout.most_recent_first = false;
    }
    let mut browser = Browser::new(root, collection.name(), &layout);
    match page.page {
        PageArg::First => browser.first(),
        PageArg::Last => browser.last(),
        PageArg::Number(n) => browser.go_to(n - 1),
    };
    browser
}
