//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use geladaria_ast::OrderFormData;
use geladaria_core::diagnostics::Diagnostic;
use geladaria_invoice::{
    DirectoryTarget, DownloadReceipt, InvoiceService, Settings, CONFIG_FILE_NAME,
};
use geladaria_pdf::{Renderer, Transpiler};

/// Output format for diagnostics
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for tool consumption
    Json,
}

/// What `preview` prints
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum PreviewFormat {
    /// The document description as JSON
    #[default]
    Json,
    /// The Typst markup handed to the typesetter
    Typst,
}

#[derive(Parser)]
#[command(name = "geladaria")]
#[command(author, version, about = "Invoices for the ice-cream shop", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render an order to Fatura_<name>.pdf
    Export {
        /// Order JSON file (web form field names)
        order: PathBuf,

        /// Output directory (overrides `export.output_dir`)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Print the document description or Typst markup of an order
    Preview {
        /// Order JSON file
        order: PathBuf,

        /// Output format (json or typst)
        #[arg(short, long, value_enum, default_value = "json")]
        format: PreviewFormat,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Check an order for issues (validation)
    Check {
        /// Order JSON file
        order: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Print or write the default configuration
    Config {
        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI application
///
/// This is the main entry point for the command-line interface.
/// It parses arguments and dispatches to the appropriate command.
pub async fn run_cli() -> Result<()> {
    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();

    match cli.command {
        Commands::Export {
            order,
            output,
            config,
        } => {
            let receipt = export_command(&order, output.as_deref(), config.as_deref()).await?;
            if let Some(path) = receipt.path {
                writeln!(stdout, "Wrote {} ({} bytes)", path.display(), receipt.bytes)?;
            }
        }
        Commands::Preview {
            order,
            format,
            config,
        } => {
            preview_command(&order, format, config.as_deref(), &mut stdout)?;
        }
        Commands::Check { order, format } => {
            let errors = check_command(&order, format, &mut stdout)?;
            if errors > 0 {
                std::process::exit(1);
            }
        }
        Commands::Config { output } => {
            config_command(output.as_deref(), &mut stdout)?;
        }
    }

    Ok(())
}

/// Execute the export command
pub async fn export_command(
    order_path: &Path,
    output_dir: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<DownloadReceipt> {
    let order = read_order(order_path)?;
    let settings = load_settings(config_path)?;
    let dir = output_dir
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings.export.output_dir.clone());

    let service = InvoiceService::new(settings);
    let receipt = service
        .export(&order, &DirectoryTarget::new(dir))
        .await
        .with_context(|| format!("Failed to export invoice for {}", order_path.display()))?;

    Ok(receipt)
}

/// Execute the preview command
pub fn preview_command(
    order_path: &Path,
    format: PreviewFormat,
    config_path: Option<&Path>,
    out: &mut impl Write,
) -> Result<()> {
    let order = read_order(order_path)?;
    let settings = load_settings(config_path)?;
    let service = InvoiceService::new(settings);
    let doc = service.generate(&order);

    match format {
        PreviewFormat::Json => {
            let json = serde_json::to_string_pretty(&doc)
                .context("Failed to serialize document description to JSON")?;
            writeln!(out, "{}", json)?;
        }
        PreviewFormat::Typst => {
            let renderer = Renderer::new(service.settings().assets.clone());
            let bundle = renderer
                .load_assets(&doc)
                .context("Failed to load invoice assets")?;
            write!(out, "{}", Transpiler::transpile(&doc, &bundle))?;
        }
    }

    Ok(())
}

/// Execute the check command
///
/// Returns the number of errors found.
pub fn check_command(
    order_path: &Path,
    format: OutputFormat,
    out: &mut impl Write,
) -> Result<usize> {
    let order = read_order(order_path)?;
    let diagnostics: Vec<Diagnostic> = InvoiceService::default().diagnostics(&order);

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&diagnostics)
                .context("Failed to serialize diagnostics to JSON")?;
            writeln!(out, "{}", json)?;
        }
        OutputFormat::Text => {
            if diagnostics.is_empty() {
                writeln!(out, "✓ No issues found in {}", order_path.display())?;
            } else {
                for diag in &diagnostics {
                    writeln!(out, "{}", diag)?;
                    writeln!(out)?;
                }
                let error_count = diagnostics.iter().filter(|d| d.is_error()).count();
                let warning_count = diagnostics.iter().filter(|d| d.is_warning()).count();
                writeln!(
                    out,
                    "Found {} error(s) and {} warning(s)",
                    error_count, warning_count
                )?;
            }
        }
    }

    Ok(diagnostics.iter().filter(|d| d.is_error()).count())
}

/// Execute the config command
pub fn config_command(output: Option<&Path>, out: &mut impl Write) -> Result<()> {
    let toml = Settings::default()
        .to_toml()
        .context("Failed to serialize default configuration")?;

    match output {
        Some(path) => {
            fs::write(path, toml)
                .with_context(|| format!("Failed to write config: {}", path.display()))?;
            writeln!(out, "Wrote {}", path.display())?;
        }
        None => write!(out, "{}", toml)?,
    }

    Ok(())
}

/// Read an order from a JSON file
pub fn read_order(path: &Path) -> Result<OrderFormData> {
    if !path.exists() {
        anyhow::bail!("Order file not found: {}", path.display());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read order: {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse order: {}", path.display()))
}

/// Load settings from a config file or use defaults
fn load_settings(config_path: Option<&Path>) -> Result<Settings> {
    match config_path {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file not found: {}", path.display());
            }
            Settings::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))
        }
        None => {
            let candidate = Path::new(CONFIG_FILE_NAME);
            if candidate.exists() {
                debug!("using {} from the working directory", CONFIG_FILE_NAME);
                Settings::load(candidate)
                    .with_context(|| format!("Failed to load config: {}", CONFIG_FILE_NAME))
            } else {
                Ok(Settings::default())
            }
        }
    }
}
