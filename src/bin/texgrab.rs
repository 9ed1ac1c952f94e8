//! texgrab CLI - find rendered formulas in HTML and print or copy their LaTeX

#[cfg(feature = "cli")]
use anyhow::{bail, Context, Result};
#[cfg(feature = "cli")]
use clap::{Parser, Subcommand, ValueEnum};
#[cfg(feature = "cli")]
use serde::Serialize;
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read};
#[cfg(feature = "cli")]
use std::path::PathBuf;
#[cfg(feature = "cli")]
use texgrab::{
    extract_detailed, find_formulas, locate_with_options, unicode_to_latex, Clipboard,
    Extraction, GrabError, GrabOptions, HtmlDocument, HtmlNode, MathNode, SystemClipboard,
};
#[cfg(feature = "cli")]
use tracing::{debug, info};
#[cfg(feature = "cli")]
use tracing_subscriber::EnvFilter;

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "texgrab")]
#[command(version)]
#[command(about = "Find rendered math formulas in HTML and recover their LaTeX source", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Maximum number of nodes inspected while walking up from a target
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Only report authoritative LaTeX; never convert rendered glyphs
    #[arg(long, global = true)]
    strict: bool,

    /// Verbose logging (same as TEXGRAB_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// List every formula in a document with its LaTeX
    Scan {
        /// Input HTML file (reads from stdin if not provided)
        input: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Locate the formula around an element and extract its LaTeX
    Extract {
        /// Input HTML file (reads from stdin if not provided)
        input: Option<PathBuf>,

        /// CSS selector of the pointer target
        #[arg(short, long)]
        select: String,

        /// Copy the result to the system clipboard
        #[arg(short, long)]
        copy: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Convert rendered Unicode math text to LaTeX
    Convert {
        /// Text to convert (reads from stdin if not provided)
        text: Option<String>,
    },

    /// Write the default config file
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[cfg(feature = "cli")]
#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// One line per formula
    Text,
    /// JSON array
    Json,
}

/// One formula as printed by `scan`/`extract`
#[cfg(feature = "cli")]
#[derive(Serialize)]
struct FormulaReport {
    index: usize,
    tag: String,
    class: Option<String>,
    #[serde(flatten)]
    extraction: Extraction,
    exact: bool,
}

#[cfg(feature = "cli")]
impl FormulaReport {
    fn new(index: usize, node: &HtmlNode<'_>, options: &GrabOptions) -> Self {
        let extraction = extract_detailed(node, options);
        Self {
            index,
            tag: node.tag_name().unwrap_or_default(),
            class: node.class_name(),
            exact: extraction.is_exact(),
            extraction,
        }
    }

    fn print_line(&self) {
        let marker = if self.exact { "" } else { " ~" };
        match &self.class {
            Some(class) => println!(
                "[{}] <{} class=\"{}\">{}: {}",
                self.index, self.tag, class, marker, self.extraction.latex
            ),
            None => println!(
                "[{}] <{}>{}: {}",
                self.index, self.tag, marker, self.extraction.latex
            ),
        }
    }
}

#[cfg(feature = "cli")]
fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let options = load_options(&cli)?;
    debug!(?options, "effective options");

    match cli.command {
        Commands::Scan { input, format } => {
            let source = read_input(input.as_ref())?;
            let doc = HtmlDocument::parse(&source);
            let reports: Vec<_> = find_formulas(&doc.root(), &options)
                .iter()
                .enumerate()
                .map(|(i, node)| FormulaReport::new(i, node, &options))
                .collect();
            info!(count = reports.len(), "scan finished");
            print_reports(&reports, format)?;
        }
        Commands::Extract {
            input,
            select,
            copy,
            format,
        } => {
            let source = read_input(input.as_ref())?;
            let doc = HtmlDocument::parse(&source);
            let target = doc
                .select_first(&select)?
                .ok_or_else(|| GrabError::no_formula_for(format!("'{}'", select)))?;
            let Some(formula) = locate_with_options(&target, &options) else {
                bail!(GrabError::no_formula_for(format!("'{}'", select)));
            };
            let report = FormulaReport::new(0, &formula, &options);
            if copy {
                let mut clipboard = SystemClipboard::new()?;
                clipboard.write_text(&report.extraction.latex)?;
                info!("copied to clipboard");
            }
            print_reports(std::slice::from_ref(&report), format)?;
        }
        Commands::Convert { text } => {
            let text = match text {
                Some(text) => text,
                None => read_stdin()?,
            };
            println!("{}", unicode_to_latex(text.trim()));
        }
        Commands::InitConfig { force } => {
            let path = match cli.config {
                Some(path) => path,
                None => GrabOptions::config_path()
                    .context("no config directory on this platform")?,
            };
            if path.exists() && !force {
                bail!("{} already exists (use --force to overwrite)", path.display());
            }
            GrabOptions::default().save_to(&path)?;
            println!("{}", path.display());
        }
    }

    Ok(())
}

#[cfg(feature = "cli")]
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("TEXGRAB_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Config file, then command line overrides
#[cfg(feature = "cli")]
fn load_options(cli: &Cli) -> Result<GrabOptions> {
    let mut options = match &cli.config {
        Some(path) if path.exists() => GrabOptions::load_from(path)
            .with_context(|| format!("reading {}", path.display()))?,
        Some(_) => GrabOptions::default(),
        None => GrabOptions::load()?,
    };
    if let Some(depth) = cli.max_depth {
        options.max_depth = depth;
    }
    if cli.strict {
        options.unicode_fallback = false;
    }
    Ok(options)
}

#[cfg(feature = "cli")]
fn read_input(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) => {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
        }
        None => read_stdin(),
    }
}

#[cfg(feature = "cli")]
fn read_stdin() -> Result<String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    Ok(buffer)
}

#[cfg(feature = "cli")]
fn print_reports(reports: &[FormulaReport], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Text => reports.iter().for_each(FormulaReport::print_line),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(reports)?),
    }
    Ok(())
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install texgrab --features cli");
    eprintln!("  texgrab scan [INPUT_FILE]");
}
