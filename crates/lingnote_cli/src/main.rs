//! Command-line entry point for Lingnote.
//!
//! # Responsibility
//! - Parse arguments and map them onto core filter/report options.
//! - Drive the interactive note-entry prompts.
//! - Own process concerns: logging bootstrap, exit codes.

use clap::{Args, Parser, Subcommand};
use lingnote_core::{
    default_log_level, init_logging, NewExample, NewNote, NoteQuery, NoteService, ReportOptions,
};
use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lingnote")]
#[command(about = "Study notes on language features, with glossed examples")]
struct Cli {
    /// Database file. Created and seeded on first use.
    #[arg(long, default_value = "lingnote.sqlite", global = true)]
    db: PathBuf,

    /// Directory for log files. Logging is off when omitted.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the filtered note report (the default command).
    Report(ReportArgs),
    /// Interactively add one note with tags and glossed examples.
    Add,
    /// List the known languages.
    Languages,
}

#[derive(Args)]
struct ReportArgs {
    /// Only notes in this language (exact name).
    #[arg(long)]
    language: Option<String>,

    /// Only notes carrying this tag; repeat to require several at once.
    #[arg(long = "tag", value_name = "NAME")]
    tags: Vec<String>,

    /// Do not print tag lists.
    #[arg(long)]
    hide_tags: bool,

    /// Do not print examples.
    #[arg(long)]
    hide_examples: bool,

    /// Show at most this many examples per note. 0 means unlimited.
    #[arg(long, value_name = "N")]
    max_examples: Option<usize>,

    /// Suppress the explanation printed when nothing matches.
    #[arg(long)]
    no_diagnostics: bool,

    /// Terminal width used for wrapping.
    #[arg(long, default_value_t = 100)]
    width: usize,
}

impl Default for ReportArgs {
    fn default() -> Self {
        Self {
            language: None,
            tags: Vec::new(),
            hide_tags: false,
            hide_examples: false,
            max_examples: None,
            no_diagnostics: false,
            width: 100,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_ref() {
        if let Err(err) = init_logging(default_log_level(), &log_dir.to_string_lossy()) {
            eprintln!("warning: {err}");
        }
    }

    if let Err(err) = run(cli) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    log::info!(
        "event=cli_start module=cli status=ok db={}",
        cli.db.display()
    );
    let mut conn = lingnote_core::db::open_db(&cli.db)?;
    let mut service = NoteService::new(&mut conn);

    match cli.command.unwrap_or(Commands::Report(ReportArgs::default())) {
        Commands::Report(args) => run_report(&service, args),
        Commands::Add => run_add(&mut service),
        Commands::Languages => {
            for name in service.language_names()? {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn run_report(service: &NoteService<'_>, args: ReportArgs) -> Result<(), Box<dyn Error>> {
    let filter = NoteQuery {
        language: args.language,
        tags: args.tags,
    };
    let options = ReportOptions {
        show_tags: !args.hide_tags,
        show_examples: !args.hide_examples,
        max_examples: args.max_examples,
        width: args.width.max(10),
        diagnostics: !args.no_diagnostics,
    };

    let outcome = service.run_report(&filter, &options)?;
    print!("{}", outcome.display_text());
    Ok(())
}

/// Sequential prompt flow: language (with create confirmation), note text,
/// tags, then examples until a blank original line.
fn run_add(service: &mut NoteService<'_>) -> Result<(), Box<dyn Error>> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    let language = prompt(&mut input, "Language: ")?;
    if language.is_empty() {
        return Err("a language name is required".into());
    }
    let mut create_language = false;
    if !service.language_exists(&language)? {
        let answer = prompt(
            &mut input,
            &format!("`{language}` is not in the database. Create it? [y/N] "),
        )?;
        if !answer.eq_ignore_ascii_case("y") && !answer.eq_ignore_ascii_case("yes") {
            return Err("aborted: language not created".into());
        }
        create_language = true;
    }

    println!("Note text (finish with an empty line):");
    let mut text_lines = Vec::new();
    loop {
        let line = read_line(&mut input)?;
        if line.trim().is_empty() {
            break;
        }
        text_lines.push(line.trim_end().to_string());
    }
    let text = text_lines.join(" ");

    let tags_line = prompt(&mut input, "Tags (comma-separated): ")?;
    let tags: Vec<String> = tags_line
        .split(',')
        .map(|tag| tag.trim().to_string())
        .filter(|tag| !tag.is_empty())
        .collect();

    let mut examples = Vec::new();
    loop {
        let original = prompt(&mut input, "Example original (empty to finish): ")?;
        if original.is_empty() {
            break;
        }
        let gloss = prompt(&mut input, "Gloss: ")?;
        let translation = prompt(&mut input, "Translation: ")?;
        let example = NewExample {
            original,
            gloss,
            translation,
        };
        if let Err(err) = example.validate() {
            eprintln!("discarded: {err}");
            continue;
        }
        examples.push(example);
    }

    let detail = service.add_note(&NewNote {
        language,
        create_language,
        text,
        tags,
        examples,
    })?;
    println!(
        "Added note {} ({}) with {} tag(s) and {} example(s).",
        detail.note.id,
        detail.note.language,
        detail.tags.len(),
        detail.examples.len()
    );
    Ok(())
}

fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let line = read_line(input)?;
    Ok(line.trim().to_string())
}

fn read_line(input: &mut impl BufRead) -> io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}
