//! Translator-side command line: resolve, check, normalize, list.

use std::fmt::Display;
use std::io::Write;
use std::path::{
    Path,
    PathBuf,
};

use clap::{
    Args,
    Parser,
    Subcommand,
};
use serde::Serialize;
use thiserror::Error;

use crate::active::{
    CatalogueStack,
    StackError,
};
use crate::catalogue::{
    Diagnostic,
    LoadError,
    LoadOptions,
    WriteError,
    load_file,
    write_file,
    write_string,
};
use crate::config::{
    ConfigError,
    ConfigManager,
    FileMatcher,
    MatcherError,
};
use crate::indexer::{
    IndexerError,
    discover,
    select_layers,
};
use crate::resolver::{
    Query,
    ResolveOutcome,
    Resolver,
};

#[derive(Debug, Parser)]
#[command(name = "ts-catalogue", version)]
#[command(about = "Inspect and query Qt Linguist translation catalogues")]
pub struct Cli {
    /// Workspace root holding `.ts-catalogue.json` (default: current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub workspace: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve one message through the fallback chain
    Resolve(ResolveArgs),

    /// Load a catalogue and report data-quality diagnostics
    Check {
        /// Catalogue file (.ts)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Load a catalogue and write it back in canonical layout
    Normalize {
        /// Catalogue file (.ts)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// List catalogue files in the translations directory
    List {
        /// Translations directory (default: from settings)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Show only the catalogue picked for this language
        #[arg(short, long)]
        language: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct ResolveArgs {
    /// Catalogue file (.ts)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Context name, e.g. AboutDialog
    pub context: String,

    /// Source text as written in the code
    pub source: String,

    /// Disambiguation comment
    #[arg(short, long)]
    pub disambiguation: Option<String>,

    /// Count for numerus messages
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub count: Option<i64>,

    /// Catalogue consulted when FILE has no translation (repeatable, in order)
    #[arg(long = "fallback", value_name = "FILE")]
    pub fallbacks: Vec<PathBuf>,

    /// Values for %1, %2, ...
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}

#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Stack(#[from] StackError),

    #[error(transparent)]
    Write(#[from] WriteError),

    #[error(transparent)]
    Matcher(#[from] MatcherError),

    #[error(transparent)]
    Indexer(#[from] IndexerError),

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No catalogue found for language '{language}'")]
    NoCatalogue { language: String },
}

/// How a successful command ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    /// `check` found warning-level diagnostics.
    WarningsFound,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport<'a> {
    file: &'a Path,
    language: &'a str,
    contexts: usize,
    resolvable: usize,
    retired: usize,
    diagnostics: &'a [Diagnostic],
}

/// Runs a parsed command, writing its output to `out`.
///
/// # Errors
/// Returns error if settings are invalid, a catalogue cannot be loaded or
/// written, or output fails.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<RunStatus, CliError> {
    let mut manager = ConfigManager::new();
    manager.load_settings(Some(cli.workspace.clone().unwrap_or_else(|| PathBuf::from("."))))?;
    let options = manager.get_settings().load_options();

    match &cli.command {
        Command::Resolve(args) => resolve(out, args, &options),
        Command::Check { file, json } => check(out, file, &options, *json),
        Command::Normalize { file, output } => normalize(out, file, &options, output.as_deref()),
        Command::List { dir, language } => {
            let dir = dir.clone().unwrap_or_else(|| manager.translations_dir());
            let language = language.as_deref().or(manager.get_settings().language.as_deref());
            list(out, &manager, dir, language)
        }
    }
}

fn resolve(
    out: &mut impl Write,
    request: &ResolveArgs,
    options: &LoadOptions,
) -> Result<RunStatus, CliError> {
    let (stack, _) = CatalogueStack::load(&request.file, &request.fallbacks, options)?;
    let args: Vec<&dyn Display> = request.args.iter().map(|arg| arg as &dyn Display).collect();

    let mut query = Query::new(&request.context, &request.source)
        .disambiguator(request.disambiguation.as_deref())
        .args(&args);
    query.count = request.count;
    let resolution = stack.resolve(&query);

    if !resolution.outcome.is_translated() {
        tracing::info!(outcome = ?resolution.outcome, "Falling back to source text");
    }
    if !resolution.missing_args.is_empty() {
        tracing::warn!(missing = ?resolution.missing_args, "Placeholders without arguments");
    }
    if let ResolveOutcome::PluralFallback { category, used } = resolution.outcome {
        tracing::info!(?category, used, "Plural form fallback");
    }

    writeln!(out, "{}", resolution.text)?;
    Ok(RunStatus::Success)
}

fn check(
    out: &mut impl Write,
    file: &Path,
    options: &LoadOptions,
    json: bool,
) -> Result<RunStatus, CliError> {
    let outcome = load_file(file, options)?;
    let catalogue = &outcome.catalogue;

    if json {
        let report = CheckReport {
            file,
            language: catalogue.language(),
            contexts: catalogue.groups().len(),
            resolvable: catalogue.resolvable_len(),
            retired: catalogue.retired_len(),
            diagnostics: &outcome.diagnostics,
        };
        serde_json::to_writer_pretty(&mut *out, &report)?;
        writeln!(out)?;
    } else {
        for diagnostic in &outcome.diagnostics {
            writeln!(out, "{diagnostic}")?;
        }
        writeln!(
            out,
            "{}: {} contexts, {} messages, {} retired, {} diagnostics",
            catalogue.language(),
            catalogue.groups().len(),
            catalogue.resolvable_len(),
            catalogue.retired_len(),
            outcome.diagnostics.len()
        )?;
    }

    Ok(if outcome.has_warnings() { RunStatus::WarningsFound } else { RunStatus::Success })
}

fn normalize(
    out: &mut impl Write,
    file: &Path,
    options: &LoadOptions,
    output: Option<&Path>,
) -> Result<RunStatus, CliError> {
    let catalogue = load_file(file, options)?.catalogue;

    match output {
        Some(path) => write_file(&catalogue, path)?,
        None => out.write_all(write_string(&catalogue)?.as_bytes())?,
    }
    Ok(RunStatus::Success)
}

fn list(
    out: &mut impl Write,
    manager: &ConfigManager,
    dir: PathBuf,
    language: Option<&str>,
) -> Result<RunStatus, CliError> {
    let matcher = FileMatcher::new(dir, manager.get_settings())?;
    let files = discover(&matcher)?;

    let selected: Vec<_> = match language {
        Some(language) => {
            let picked = select_layers(&files, &manager.get_settings().layers, language);
            if picked.is_empty() {
                return Err(CliError::NoCatalogue { language: language.to_string() });
            }
            picked
        }
        None => files.iter().collect(),
    };

    for file in selected {
        writeln!(
            out,
            "{}\t{}",
            file.language.as_deref().unwrap_or("-"),
            file.path.strip_prefix(matcher.root()).unwrap_or(&file.path).display()
        )?;
    }
    Ok(RunStatus::Success)
}
