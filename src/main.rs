//! pillar-mode command line
//!
//! A minimal host around the library: highlight documents on the
//! terminal, list the markup rules, plan insertions and run the compiler.

use std::fs;
use std::io;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};

use pillar_mode::compile::{CompileJob, Format};
use pillar_mode::config::Config;
use pillar_mode::error::{PillarError, Result};
use pillar_mode::insert::compute_insertion;
use pillar_mode::render::{describe_spans, write_styled};
use pillar_mode::syntax::{Highlighter, ScanWindow};

#[derive(Parser)]
#[command(name = "pillar-mode", version, about = "Highlight, edit and compile Pillar documents")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a document with its markup highlighted
    Highlight {
        file: PathBuf,
        /// List the styled spans instead of printing the document
        #[arg(long)]
        spans: bool,
        /// Start of the window to highlight (byte offset)
        #[arg(long)]
        start: Option<usize>,
        /// End of the window to highlight (byte offset)
        #[arg(long)]
        end: Option<usize>,
    },
    /// Export a document through the external compiler
    Compile {
        file: PathBuf,
        /// Export format: latex, html or markdown
        #[arg(long)]
        to: Option<String>,
        /// Output file (defaults to the input with the format's extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// List the markup rules and their shortcut keys
    Rules,
    /// Insert markup around a selection or at the caret and print the result
    Wrap {
        file: PathBuf,
        /// Markup to insert
        #[arg(long, conflicts_with = "key", required_unless_present = "key")]
        markup: Option<String>,
        /// Shortcut key of a special-text rule
        #[arg(long)]
        key: Option<String>,
        /// Caret offset used when there is no selection
        #[arg(long, default_value_t = 0)]
        caret: usize,
        /// Selection as START..END
        #[arg(long, value_parser = parse_range)]
        selection: Option<Range<usize>>,
    },
}

fn main() {
    env_logger::init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load();
    let mut highlighter = Highlighter::new();
    highlighter.enabled = config.highlighting;

    match cli.command {
        Commands::Highlight {
            file,
            spans,
            start,
            end,
        } => {
            let text = read_document(&file)?;
            let window = ScanWindow::new(start.unwrap_or(0), end.unwrap_or(text.len()));
            let (_, found) = highlighter.highlight(window, &text);

            if spans {
                for line in describe_spans(&text, &found) {
                    println!("{line}");
                }
            } else {
                let styles = highlighter.registry().styles();
                write_styled(&mut io::stdout().lock(), &text, &found, styles)?;
            }
        }
        Commands::Compile { file, to, output } => {
            let format = match to {
                Some(name) => Format::from_name(&name)?,
                None => config.default_format,
            };
            let mut job = CompileJob::new(&config.executable, &file, format);
            if let Some(output) = output {
                job = job.output(&output);
            }
            job.run()?;
            println!("{}", job.output.display());
        }
        Commands::Rules => {
            let registry = highlighter.registry();
            for rule in registry.all_rules() {
                let key = rule
                    .special
                    .as_ref()
                    .map(|s| format!(" [{}] {}", s.shortcut_key, s.delimiter))
                    .unwrap_or_default();
                println!("{}{}", rule.name, key);
            }
        }
        Commands::Wrap {
            file,
            markup,
            key,
            caret,
            selection,
        } => {
            let markup = match (markup, key) {
                (Some(markup), _) => markup,
                (None, Some(key)) => highlighter
                    .registry()
                    .action_for_key(&key)
                    .map(|action| action.markup.clone())
                    .ok_or(PillarError::InvalidMarkup(key))?,
                (None, None) => return Err(PillarError::InvalidMarkup(String::new())),
            };

            let mut text = read_document(&file)?;
            let plan = compute_insertion(&markup, selection, caret)?;
            plan.apply(&mut text)?;
            print!("{text}");
            log::debug!("caret now at {}", plan.caret);
        }
    }

    Ok(())
}

fn read_document(path: &Path) -> Result<String> {
    if !Highlighter::is_pillar_file(path) {
        log::warn!("{} does not look like a Pillar document", path.display());
    }
    Ok(fs::read_to_string(path)?)
}

fn parse_range(s: &str) -> std::result::Result<Range<usize>, String> {
    let (start, end) = s
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got {s}"))?;
    let start = start.trim().parse().map_err(|e| format!("bad start: {e}"))?;
    let end = end.trim().parse().map_err(|e| format!("bad end: {e}"))?;
    Ok(start..end)
}
