mod table;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use log::info;

use rigmark_core::{discovery, insert_bookmark, Bookmark, BookmarkSet};

use crate::table::TableDisplay;

#[derive(Parser, Debug)]
#[command(version, about = "Manage rig-remote frequency bookmarks")]
struct Cli {
    /// Bookmark file to operate on. Default: the rig-remote search order
    /// (./rig-bookmarks.csv, then ~/.rig-remote).
    #[arg(short, long, global = true)]
    file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the bookmark table, sorted by frequency.
    List {
        /// Emit the raw records as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
    /// Validate and store a new bookmark.
    Add {
        /// Frequency in Hz; separators and stray characters are accepted.
        frequency: String,
        /// Mode token: OFF, RAW, AM, FM, WFM, WFM_ST, LSB, USB, CW, CWL,
        /// CWU, or empty.
        mode: String,
        #[arg(default_value = "")]
        description: String,
        /// Lock state: O (open) or L (locked).
        #[arg(long, default_value = "")]
        lock: String,
    },
    /// Delete the bookmark at a row of `list` output.
    Remove {
        /// 1-based row position.
        row: usize,
    },
    /// Print the discovered bookmark file path.
    Path,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    match cli.command {
        Command::List { json } => list(cli.file, json),
        Command::Add {
            frequency,
            mode,
            description,
            lock,
        } => add(cli.file, &frequency, &mode, &description, &lock),
        Command::Remove { row } => remove(cli.file, row),
        Command::Path => path(cli.file),
    }
}

fn list(file: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let path = existing_file(file)?;
    let mut set = load_set(&path)?;
    if json {
        println!("{}", serde_json::to_string_pretty(set.bookmarks())?);
        return Ok(());
    }
    let mut display = TableDisplay::new();
    set.load_into_display(&mut display)?;
    if display.is_empty() {
        println!("no bookmarks in {}", path.display());
    } else {
        print!("{}", display.render());
    }
    Ok(())
}

fn add(
    file: Option<PathBuf>,
    frequency: &str,
    mode: &str,
    description: &str,
    lock: &str,
) -> anyhow::Result<()> {
    // Accept formatted input ("145,500,000") by probing the separator
    // stripper first; anything still non-numeric falls to validation.
    let frequency = rigmark_core::frequency::strip_separator(frequency)
        .unwrap_or_else(|| frequency.to_string());

    let path = writable_file(file)?;
    let mut set = load_set(&path)?;
    let mut display = TableDisplay::new();
    set.load_into_display(&mut display)?;

    // Same order as the GUI add callback: place the row on the display
    // first (duplicate and format checks), then append under the new
    // row's id and save.
    let bookmark = Bookmark::validated(&frequency, mode, description, lock)?;
    let id = insert_bookmark(&bookmark, &mut display)?;
    set.append(&id, &frequency, mode, description, lock)?;
    set.save()
        .with_context(|| format!("saving {}", path.display()))?;
    let pretty = rigmark_core::frequency::format_with_separator(&bookmark.frequency)?;
    println!("added {} {} to {}", pretty, bookmark.mode, path.display());
    Ok(())
}

fn remove(file: Option<PathBuf>, row: usize) -> anyhow::Result<()> {
    let path = existing_file(file)?;
    let mut set = load_set(&path)?;
    let mut display = TableDisplay::new();
    set.load_into_display(&mut display)?;
    let id = display
        .id_at(row)
        .with_context(|| format!("no row {row}; see `rigmark list`"))?
        .to_string();
    set.delete(&id)?;
    set.save()
        .with_context(|| format!("saving {}", path.display()))?;
    println!("removed row {row} from {}", path.display());
    Ok(())
}

fn path(file: Option<PathBuf>) -> anyhow::Result<()> {
    match file.or_else(discovery::find_bookmark_file) {
        Some(path) => {
            println!("{}", path.display());
            Ok(())
        }
        None => bail!("no bookmark file found"),
    }
}

fn load_set(path: &std::path::Path) -> anyhow::Result<BookmarkSet> {
    let mut set = BookmarkSet::new(path);
    set.load()
        .with_context(|| format!("loading {}", path.display()))?;
    Ok(set)
}

/// Resolve the file for read-only commands: an explicit `--file` or the
/// discovery search order.
fn existing_file(file: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(file) = file {
        return Ok(file);
    }
    discovery::find_bookmark_file()
        .context("no bookmark file found; pass --file or add a bookmark first")
}

/// Resolve the file for writing commands, falling back to a fresh file
/// under `~/.rig-remote` when discovery comes up empty.
fn writable_file(file: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    if let Some(file) = file {
        return Ok(file);
    }
    if let Some(found) = discovery::find_bookmark_file() {
        return Ok(found);
    }
    let path = discovery::default_bookmark_path().context("cannot resolve the home directory")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {}", parent.display()))?;
    }
    info!("starting a new bookmark file at {}", path.display());
    Ok(path)
}
