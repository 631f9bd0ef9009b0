use crate::config::{Config, OutputFormat};
use crate::error::{Result, SubconvError};
use crate::subtitle::{create_formatter, parse_report, SubtitleRecord};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const UTF8_BOM: char = '\u{feff}';

/// Configuration for a file conversion run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Formats to write, in order.
    pub formats: Vec<OutputFormat>,
    /// Explicit output path. With several formats, its extension is replaced
    /// per format.
    pub output: Option<PathBuf>,
    /// Directory for derived output paths (defaults to the input's directory).
    pub output_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            formats: vec![OutputFormat::default()],
            output: None,
            output_dir: None,
        }
    }
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            formats: config.formats(),
            output: None,
            output_dir: config.output_dir.clone(),
        }
    }
}

/// Statistics from one conversion.
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Timecode range lines found in the input.
    pub delimiters: usize,
    /// Blocks that produced a subtitle.
    pub records: usize,
    /// Timecode range lines with no text after them.
    pub discarded: usize,
    pub elapsed: Duration,
}

/// Result of converting one input file.
#[derive(Debug)]
pub struct PipelineResult {
    pub input_path: PathBuf,
    /// Files written, one per requested format. Empty when nothing was found.
    pub outputs: Vec<(OutputFormat, PathBuf)>,
    pub records: Vec<SubtitleRecord>,
    pub stats: PipelineStats,
}

impl PipelineResult {
    /// True when the input held no usable subtitle block.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read an input text file, dropping a leading UTF-8 BOM.
pub fn read_input(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(SubconvError::FileNotFound(path.display().to_string()));
    }

    let text = fs::read_to_string(path)?;
    Ok(match text.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => text,
    })
}

/// Render the same records once per format.
pub fn render_all(records: &[SubtitleRecord], formats: &[OutputFormat]) -> Vec<(OutputFormat, String)> {
    formats
        .iter()
        .map(|&format| (format, create_formatter(format).format(records)))
        .collect()
}

/// Render every format into one text, with a header line before each format
/// when there is more than one.
pub fn render_combined(records: &[SubtitleRecord], formats: &[OutputFormat]) -> String {
    match render_all(records, formats).as_slice() {
        [(_, only)] => only.clone(),
        rendered => rendered
            .iter()
            .map(|(format, content)| {
                format!(
                    "========== {} ==========\n\n{}",
                    format.extension().to_uppercase(),
                    content
                )
            })
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

/// True when both paths name the same file. Paths that cannot be resolved
/// (e.g. outputs not written yet) are compared as given.
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

/// Where the output for `format` is written.
pub fn derive_output_path(input: &Path, format: OutputFormat, config: &PipelineConfig) -> PathBuf {
    if let Some(output) = &config.output {
        return if config.formats.len() > 1 {
            output.with_extension(format.extension())
        } else {
            output.clone()
        };
    }

    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let file_name = format!("{}.{}", stem, format.extension());
    match &config.output_dir {
        Some(dir) => dir.join(file_name),
        None => input.with_file_name(file_name),
    }
}

/// Convert one input file into every requested format.
///
/// If no subtitle block is found, nothing is written and existing output
/// files are left as they were.
pub fn convert_file(input: &Path, config: &PipelineConfig) -> Result<PipelineResult> {
    let started = Instant::now();

    info!("Reading {:?}", input);
    let text = read_input(input)?;

    let report = parse_report(&text);
    let mut stats = PipelineStats {
        delimiters: report.delimiters,
        records: report.records.len(),
        discarded: report.discarded(),
        elapsed: Duration::ZERO,
    };
    debug!(
        "Found {} timecode lines, {} subtitles, {} without text",
        stats.delimiters, stats.records, stats.discarded
    );

    if report.is_empty() {
        warn!("No subtitle blocks found in {:?}; nothing written", input);
        stats.elapsed = started.elapsed();
        return Ok(PipelineResult {
            input_path: input.to_path_buf(),
            outputs: Vec::new(),
            records: report.records,
            stats,
        });
    }

    if let Some(dir) = &config.output_dir {
        fs::create_dir_all(dir)?;
    }

    let targets: Vec<(OutputFormat, PathBuf)> = config
        .formats
        .iter()
        .map(|&format| (format, derive_output_path(input, format, config)))
        .collect();
    if let Some((_, clash)) = targets.iter().find(|(_, path)| same_file(path, input)) {
        return Err(SubconvError::Config(format!(
            "output {} would overwrite the input file; pass a different --output",
            clash.display()
        )));
    }

    let mut outputs = Vec::with_capacity(targets.len());
    for ((format, path), (_, content)) in targets
        .into_iter()
        .zip(render_all(&report.records, &config.formats))
    {
        fs::write(&path, content)?;
        info!("Wrote {} entries to {:?}", stats.records, path);
        outputs.push((format, path));
    }

    stats.elapsed = started.elapsed();
    Ok(PipelineResult {
        input_path: input.to_path_buf(),
        outputs,
        records: report.records,
        stats,
    })
}

pub fn print_summary(result: &PipelineResult) {
    println!();
    println!("═══════════════════════════════════════════════════════════════");
    println!("                     Subtitle Conversion Complete              ");
    println!("═══════════════════════════════════════════════════════════════");
    println!();
    println!("  Input:      {}", result.input_path.display());
    for (format, path) in &result.outputs {
        println!(
            "  {:<11} {}",
            format!("{}:", format.extension().to_uppercase()),
            path.display()
        );
    }
    println!("  Entries:    {}", result.stats.records);
    if result.stats.discarded > 0 {
        println!(
            "  Skipped:    {} timecode lines without text",
            result.stats.discarded
        );
    }
    println!(
        "  Time:       {:.2}ms",
        result.stats.elapsed.as_secs_f64() * 1000.0
    );
    println!();
    println!("═══════════════════════════════════════════════════════════════");
}
