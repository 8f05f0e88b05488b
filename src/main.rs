/// classmap: Java/Kotlin class outline extraction CLI
///
/// Modes:
/// - process: Walk a directory in parallel and write rotating Markdown files
/// - single: Extract one file, print JSON or Markdown
/// - merge: Concatenate a samples tree into fenced Markdown files
/// - init-config: Write a default classmap.toml
use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use classmap::cli::parallel::format_class_path;
use classmap::cli::{DirectoryProcessor, MarkdownWriter, OutputFormat, OutputWriter, merge_tree};
use classmap::config::ConfigOverrides;
use classmap::{ExtractorManager, ProcessorConfig};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::{non_blocking, rolling};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "classmap")]
#[command(about = "Tree-sitter class outlines for Java and Kotlin source trees", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract every Java/Kotlin file below a directory into Markdown files
    Process {
        /// Directory to scan recursively (required without --config)
        #[arg(short, long, required_unless_present = "config")]
        source: Option<PathBuf>,

        /// Base name of the generated Markdown files (required without --config)
        #[arg(short, long, required_unless_present = "config")]
        name: Option<String>,

        /// Directory the Markdown files are written to
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// Maximum lines per Markdown file
        #[arg(long)]
        max_lines: Option<usize>,

        /// Number of parallel workers (defaults to CPU count)
        #[arg(short, long)]
        workers: Option<usize>,

        /// Directory for the rolling error log
        #[arg(long)]
        log_dir: Option<PathBuf>,

        /// TOML configuration file; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Extract the class outline of a single file
    Single {
        /// Path to source file
        #[arg(short, long)]
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "json")]
        format: OutputFormatArg,
    },

    /// Merge .md/.java/.kts/.groovy/.xml files below a directory into Markdown
    Merge {
        /// Directory to merge recursively
        #[arg(short, long)]
        source: PathBuf,

        /// Base name of the generated Markdown files
        #[arg(short, long)]
        name: String,

        /// Directory the Markdown files are written to
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,

        /// Maximum lines per Markdown file
        #[arg(long, default_value_t = 100_000)]
        max_lines: usize,
    },

    /// Write a default configuration file
    InitConfig {
        /// Where to write the configuration
        #[arg(short, long, default_value = "classmap.toml")]
        path: PathBuf,
    },
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormatArg {
    /// Standard JSON array (pretty-printed)
    Json,
    /// Markdown tables
    Markdown,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            source,
            name,
            output_dir,
            max_lines,
            workers,
            log_dir,
            config,
        } => {
            let file_settings = match &config {
                Some(path) => ProcessorConfig::load(path)
                    .with_context(|| format!("Failed to load config {}", path.display()))?,
                None => ProcessorConfig::default(),
            };
            let settings = file_settings
                .with_overrides(ConfigOverrides {
                    source_dir: source,
                    base_name: name,
                    output_dir,
                    max_lines,
                    workers,
                    log_dir,
                })
                .context("Invalid command-line options")?;

            let _guard = init_logging(Some(&settings.log_dir))?;
            process_directory(settings)?;
        }
        Commands::Single { file, format } => {
            let _guard = init_logging(None)?;
            extract_single_file(&file, format)?;
        }
        Commands::Merge {
            source,
            name,
            output_dir,
            max_lines,
        } => {
            let _guard = init_logging(None)?;
            merge_directory(&source, &name, &output_dir, max_lines)?;
        }
        Commands::InitConfig { path } => {
            let _guard = init_logging(None)?;
            ProcessorConfig::default()
                .save(&path)
                .with_context(|| format!("Failed to write config {}", path.display()))?;
            info!("📝 Wrote default configuration to {}", path.display());
        }
    }

    Ok(())
}

/// Console logging on stderr, plus a daily `error.log` when a log directory is given
fn init_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("classmap=info"))
        .context("Failed to build log filter")?;

    let Some(log_dir) = log_dir else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(false)
                    .with_ansi(true),
            )
            .init();
        return Ok(None);
    };

    fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;
    let file_appender = rolling::daily(log_dir, "error.log");
    let (non_blocking_file, guard) = non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .with_ansi(true)
                .with_filter(filter),
        )
        .with(
            fmt::layer()
                .with_writer(non_blocking_file)
                .with_target(true)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_filter(LevelFilter::ERROR),
        )
        .init();

    debug!("Error log at {}", log_dir.join("error.log").display());
    Ok(Some(guard))
}

/// Process a directory and print a JSON summary to stdout
fn process_directory(settings: ProcessorConfig) -> Result<()> {
    info!(
        "🚀 Starting classmap: {} -> {}/{}-N.md ({} workers)",
        settings.source_dir.display(),
        settings.output_dir.display(),
        settings.base_name,
        settings.workers
    );

    let processor = DirectoryProcessor::new(settings);
    let summary = processor.run().with_context(|| {
        format!(
            "Failed to process {}",
            processor.config().source_dir.display()
        )
    })?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Extract a single file and print its outline
fn extract_single_file(file: &Path, format: OutputFormatArg) -> Result<()> {
    let mut manager = ExtractorManager::new();
    let classes = manager
        .extract_file(file)
        .with_context(|| format!("Failed to extract {}", file.display()))?;

    let format = match format {
        OutputFormatArg::Json => OutputFormat::Json,
        OutputFormatArg::Markdown => OutputFormat::Markdown,
    };

    let root = file.parent().unwrap_or_else(|| Path::new(""));
    let mut writer = OutputWriter::new(format);
    writer.write_outline(&format_class_path(file, root), &classes)?;
    Ok(())
}

/// Merge a samples tree and print a JSON summary to stdout
fn merge_directory(source: &Path, name: &str, output_dir: &Path, max_lines: usize) -> Result<()> {
    let writer = MarkdownWriter::new(output_dir, name, max_lines, "")
        .with_context(|| format!("Failed to open output in {}", output_dir.display()))?;
    let summary = merge_tree(source, writer)
        .with_context(|| format!("Failed to merge {}", source.display()))?;

    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}
