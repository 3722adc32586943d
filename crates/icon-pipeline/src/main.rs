use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use icon_pipeline::logging::{self, LogFormat};
use icon_pipeline::{run, PipelineConfig, PipelineError, RunSummary};

#[derive(Debug, Parser)]
#[command(name = "icon-pipeline")]
#[command(version, about = "Generate a CSS stylesheet from a directory of SVG/PNG icons")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Log debug events from the pipeline
    #[arg(short, long, global = true, default_value_t = false)]
    verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Text)]
    log_format: LogFormat,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build the stylesheet (the default task)
    Build(BuildArgs),
}

/// How the run summary is printed on stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum SummaryFormat {
    /// One count line
    #[default]
    Text,
    /// The full summary, warnings included, as JSON
    Json,
}

#[derive(Debug, Default, Args)]
struct BuildArgs {
    /// Source icon directory [default: icons/]
    #[arg(long)]
    src: Option<PathBuf>,

    /// Destination directory [default: stylesheets/icons/]
    #[arg(long)]
    dest: Option<PathBuf>,

    /// TOML file with pipeline settings; flags override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Selector prefix [default: .icon-]
    #[arg(long)]
    prefix: Option<String>,

    /// Inline icons smaller than this many bytes [default: 8192]
    #[arg(long)]
    inline_threshold: Option<u64>,

    /// Skip writing preview.html
    #[arg(long, default_value_t = false)]
    no_preview: bool,

    /// Abort the run after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Summary output on stdout
    #[arg(long, value_enum, default_value_t = SummaryFormat::Text)]
    summary: SummaryFormat,
}

fn main() -> ExitCode {
    // Usage errors share the internal exit code; 2 is reserved for an unwritable destination.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            return ExitCode::from(3);
        }
    };
    logging::init(cli.verbose, cli.log_format);

    let args = match cli.command {
        Some(Commands::Build(args)) => args,
        None => BuildArgs::default(),
    };

    match build(&args) {
        Ok(summary) => match report(&summary, args.summary) {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("error: {err:#}");
                ExitCode::from(3)
            }
        },
        Err(err) => {
            eprintln!("error: {err:#}");
            let code = err
                .downcast_ref::<PipelineError>()
                .map_or(3, PipelineError::exit_code);
            ExitCode::from(code)
        }
    }
}

fn build(args: &BuildArgs) -> anyhow::Result<RunSummary> {
    let config = resolve_config(args)?;
    let summary = run(&config)?;
    Ok(summary)
}

fn resolve_config(args: &BuildArgs) -> anyhow::Result<PipelineConfig> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_toml_file(path)
            .map_err(PipelineError::from)
            .with_context(|| format!("loading {}", path.display()))?,
        None => PipelineConfig::default(),
    };

    if let Some(src) = &args.src {
        config.source_dir.clone_from(src);
    }
    if let Some(dest) = &args.dest {
        config.dest_dir.clone_from(dest);
    }
    if let Some(prefix) = &args.prefix {
        config.css_prefix.clone_from(prefix);
    }
    if let Some(threshold) = args.inline_threshold {
        config.inline_threshold = threshold;
    }
    if args.no_preview {
        config.preview = false;
    }
    if let Some(secs) = args.timeout_secs {
        config.timeout_ms = Some(secs.saturating_mul(1000));
    }
    Ok(config)
}

fn report(summary: &RunSummary, format: SummaryFormat) -> anyhow::Result<()> {
    println!("{}", render_summary(summary, format)?);
    Ok(())
}

fn render_summary(summary: &RunSummary, format: SummaryFormat) -> anyhow::Result<String> {
    match format {
        SummaryFormat::Text => Ok(format!(
            "{} icons processed ({} inlined, {} copied), {} skipped, {} warnings",
            summary.processed,
            summary.inlined,
            summary.copied,
            summary.skipped,
            summary.warnings.len()
        )),
        SummaryFormat::Json => {
            serde_json::to_string_pretty(summary).context("serializing run summary")
        }
    }
}
