// paper-builder: Assemble an academic paper's sections and export them as LaTeX

use clap::Parser;
use paper_builder::{
    export, generate_with, AppError, DocumentDate, GeneratorOptions, PaperForm, SectionKey,
    StructureMode, DEFAULT_AUTHOR, DEFAULT_OUTPUT,
};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "PAPER_BUILDER_LOG";

// ============================================================================
// Data Structures
// ============================================================================

/// CLI Arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble a paper's sections and export them as LaTeX")]
struct Args {
    /// Draft file (JSON object of section identifier to text)
    #[arg(long)]
    draft: Option<PathBuf>,

    /// Paper title
    #[arg(long)]
    title: Option<String>,

    /// Set a section, e.g. --set method1="We trained..." (repeatable)
    #[arg(short, long = "set", value_name = "KEY=TEXT")]
    set: Vec<String>,

    /// Set a section from the contents of a file (repeatable)
    #[arg(long = "set-file", value_name = "KEY=PATH")]
    set_file: Vec<String>,

    /// Fill a section with its template (repeatable)
    #[arg(long = "template", value_name = "KEY")]
    template: Vec<String>,

    /// Structure of the method/result/discussion sections
    /// (paired, grouped, merge-discussion)
    #[arg(short, long, value_name = "MODE", default_value = "paired")]
    mode: String,

    /// Author name
    #[arg(short, long, default_value = DEFAULT_AUTHOR)]
    author: String,

    /// Date (YYYY-MM-DD format, defaults to \today)
    #[arg(short, long)]
    date: Option<String>,

    /// Escape LaTeX special characters in section text
    #[arg(long)]
    escape: bool,

    /// Output filename, or - for stdout
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Print writing guidance for the active sections and exit
    #[arg(long)]
    guide: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let date = parse_date(&args.date)?;
    let mode: StructureMode = args.mode.parse()?;

    let mut form = PaperForm::new();
    form.set_mode(mode);

    if args.guide {
        print_guide(&form);
        return Ok(());
    }

    fill_form(&mut form, &args)?;

    let options = GeneratorOptions {
        author: args.author,
        date,
        escape: args.escape,
    };
    let document = generate_with(&form, form.mode(), &options);
    export(&document, &args.output)?;

    info!(output = %args.output.display(), mode = %form.mode(), "document generated");

    // Keep stdout clean when the document itself goes there
    if args.output.as_os_str() != "-" {
        println!("✓ Generated: {}", args.output.display());
        println!("  Title: {}", display_title(&form));
        println!("  Structure: {}", form.mode());
    }

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = if verbose {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_date(date_str: &Option<String>) -> Result<DocumentDate, AppError> {
    match date_str {
        Some(s) => DocumentDate::parse(s),
        None => Ok(DocumentDate::Today),
    }
}

fn parse_assignment(s: &str) -> Result<(SectionKey, String), AppError> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| AppError::AssignmentError(s.to_string()))?;
    Ok((key.trim().parse()?, value.to_string()))
}

/// Applies the draft, then explicit values, then templates, so later
/// sources win.
fn fill_form(form: &mut PaperForm, args: &Args) -> Result<(), AppError> {
    if let Some(path) = &args.draft {
        form.load_draft(path)?;
        info!(draft = %path.display(), "draft loaded");
    }

    if let Some(title) = &args.title {
        form.set_value(SectionKey::Title, title.as_str());
    }

    for assignment in &args.set {
        let (key, text) = parse_assignment(assignment)?;
        form.set_value(key, text);
    }

    for assignment in &args.set_file {
        let (key, path) = parse_assignment(assignment)?;
        let text = std::fs::read_to_string(&path)
            .map_err(|e| AppError::SectionFileError(format!("{}: {}", path, e)))?;
        form.set_value(key, text);
    }

    for name in &args.template {
        let key: SectionKey = name.parse()?;
        if !form.insert_template(key) {
            eprintln!("Note: {} has no template, left unchanged", key.label());
        }
    }

    Ok(())
}

fn display_title(form: &PaperForm) -> &str {
    match form.value(SectionKey::Title) {
        "" => "(untitled)",
        title => title,
    }
}

fn print_guide(form: &PaperForm) {
    println!("Structure: {}", form.mode());
    for key in form.active_keys() {
        let guidance = key.guidance();
        println!();
        println!("{} ({})", key.label(), key);
        println!("  {}", guidance.description);
        if let Some(template) = guidance.template {
            println!("  Template: {}", template);
        }
    }
}
