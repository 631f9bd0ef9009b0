use anyhow::{Context, Result};
use clap::Parser;
use std::io::Write;
use std::path::{Path, PathBuf};
use subconv::config::{Config, OutputFormat};
use subconv::interactive::run_interactive_wizard;
use subconv::pipeline::{self, convert_file, print_summary, PipelineConfig};
use subconv::subtitle::parse_records;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(name = "subconv")]
#[command(version, about = "Convert 60 FPS timecode subtitles to SRT / SBV")]
#[command(long_about = "Convert subtitle blocks written as `HH:MM:SS:FF - HH:MM:SS:FF` followed by text \
into SRT or SBV, using the platform's exact 60 FPS frame-to-millisecond mapping. \
Run without an input file to start the interactive wizard.")]
struct Cli {
    /// Input text file (omit to run the interactive wizard)
    input: Option<PathBuf>,

    /// Output file (defaults to input name with the format's extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format: srt, sbv
    #[arg(short, long)]
    format: Option<String>,

    /// Write both SRT and SBV
    #[arg(long, conflicts_with = "format")]
    both: bool,

    /// Print the converted subtitles instead of writing files
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();
}

fn resolve_formats(cli: &Cli, config: &Config) -> Result<Vec<OutputFormat>> {
    if cli.both {
        return Ok(OutputFormat::ALL.to_vec());
    }

    match &cli.format {
        Some(format) => {
            let format: OutputFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            Ok(vec![format])
        }
        None => Ok(config.formats()),
    }
}

fn print_to_stdout(cli_input: &Path, formats: &[OutputFormat]) -> Result<()> {
    let text = pipeline::read_input(cli_input)
        .with_context(|| format!("Failed to read {}", cli_input.display()))?;
    let records = parse_records(&text);

    if records.is_empty() {
        warn!("No subtitle blocks found in {:?}", cli_input);
        return Ok(());
    }

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(pipeline::render_combined(&records, formats).as_bytes())?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = Config::load().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    let (input, pipeline_config) = match &cli.input {
        Some(input) => {
            if !input.exists() {
                anyhow::bail!("Input file not found: {}", input.display());
            }

            let formats = resolve_formats(&cli, &config)?;
            if cli.stdout {
                return print_to_stdout(input, &formats);
            }

            let pipeline_config = PipelineConfig {
                formats,
                output: cli.output.clone(),
                output_dir: config.output_dir.clone(),
            };
            (input.clone(), pipeline_config)
        }
        None => {
            let wizard = run_interactive_wizard()?;
            (wizard.input, wizard.pipeline_config)
        }
    };

    info!("Input:    {}", input.display());
    let names: Vec<String> = pipeline_config.formats.iter().map(|f| f.to_string()).collect();
    info!("Format:   {}", names.join(", "));

    let result = convert_file(&input, &pipeline_config)
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    if result.is_empty() {
        warn!("Nothing to convert. Check that timecode lines look like `00:00:01:00 - 00:00:02:30`.");
        return Ok(());
    }

    print_summary(&result);
    Ok(())
}
