use crate::config::{Config, OutputFormat};
use crate::pipeline::PipelineConfig;
use console::style;
use dialoguer::{Confirm, Input, Select};
use std::fs;
use std::path::{Path, PathBuf};

const SUPPORTED_EXTENSIONS: &[&str] = &["txt", "text"];

pub struct InteractiveResult {
    pub input: PathBuf,
    pub pipeline_config: PipelineConfig,
}

pub fn run_interactive_wizard() -> anyhow::Result<InteractiveResult> {
    print_header();

    let mut config = Config::load().unwrap_or_default();

    // Step 1: Select source file
    let input = select_source_file()?;

    // Step 2: Select output format(s)
    let formats = select_output_formats(&config)?;

    let pipeline_config = PipelineConfig {
        formats,
        output: None,
        output_dir: config.output_dir.clone(),
    };

    // Step 3: Confirm
    print_summary(&input, &pipeline_config);

    if !Confirm::new()
        .with_prompt("Proceed with these settings?")
        .default(true)
        .interact()?
    {
        anyhow::bail!("Cancelled by user");
    }

    remember_formats(&mut config, &pipeline_config.formats)?;

    println!();

    Ok(InteractiveResult {
        input,
        pipeline_config,
    })
}

fn print_header() {
    println!();
    println!(
        "{}",
        style("╔═══════════════════════════════════════════════════╗").cyan()
    );
    println!(
        "{}",
        style("║      subconv - 60 FPS Timecode to SRT / SBV       ║").cyan()
    );
    println!(
        "{}",
        style("╚═══════════════════════════════════════════════════╝").cyan()
    );
    println!(
        "  Input format: {}",
        style("HH:MM:SS:FF - HH:MM:SS:FF, subtitle text on the following lines").dim()
    );
    println!();
}

fn select_source_file() -> anyhow::Result<PathBuf> {
    println!("\n{}", style("Select source file:").bold());

    let files = scan_text_files(Path::new("."))?;

    if files.is_empty() {
        println!("  No text files found in current directory.\n");
        return prompt_for_path();
    }

    let mut items: Vec<String> = files
        .iter()
        .map(|f| {
            let size = fs::metadata(f)
                .map(|m| format_size(m.len()))
                .unwrap_or_else(|_| "?".to_string());
            format!("{} ({})", f.display(), size)
        })
        .collect();
    items.push("Enter custom path...".to_string());

    let selection = Select::new()
        .with_prompt("Choose a file")
        .items(&items)
        .default(0)
        .interact()?;

    if selection == files.len() {
        prompt_for_path()
    } else {
        Ok(files[selection].clone())
    }
}

fn prompt_for_path() -> anyhow::Result<PathBuf> {
    let path: String = Input::new()
        .with_prompt("Enter file path")
        .interact_text()?;
    let path = PathBuf::from(path.trim());
    if !path.exists() {
        anyhow::bail!("File not found: {}", path.display());
    }
    Ok(path)
}

fn scan_text_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();

        if path.is_file() && has_supported_extension(&path) {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

fn has_supported_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

/// Menu entries in display order.
fn format_choices() -> Vec<(&'static str, Vec<OutputFormat>)> {
    vec![
        ("SRT - Most compatible (players, editors, upload)", vec![OutputFormat::Srt]),
        ("SBV - Platform caption upload format", vec![OutputFormat::Sbv]),
        ("Both SRT and SBV", OutputFormat::ALL.to_vec()),
    ]
}

fn default_choice(config: &Config) -> usize {
    let wanted = config.formats();
    format_choices()
        .iter()
        .position(|(_, formats)| *formats == wanted)
        .unwrap_or(0)
}

fn select_output_formats(config: &Config) -> anyhow::Result<Vec<OutputFormat>> {
    let choices = format_choices();
    let items: Vec<&str> = choices.iter().map(|(label, _)| *label).collect();

    let selection = Select::new()
        .with_prompt("Select output format")
        .items(&items)
        .default(default_choice(config))
        .interact()?;

    Ok(choices[selection].1.clone())
}

fn remember_formats(config: &mut Config, formats: &[OutputFormat]) -> anyhow::Result<()> {
    if formats == config.formats().as_slice() {
        return Ok(());
    }

    if Confirm::new()
        .with_prompt("Use this format by default next time?")
        .default(false)
        .interact()?
    {
        config.emit_both = formats.len() > 1;
        if let Some(&first) = formats.first() {
            config.default_format = first;
        }
        let path = config.save()?;
        println!("{} Saved to {}", style("✓").green(), path.display());
    }

    Ok(())
}

fn print_summary(input: &Path, pipeline_config: &PipelineConfig) {
    println!("\n{}", style("═══ Summary ═══").bold());
    println!("  Input:     {}", style(input.display()).cyan());
    for &format in &pipeline_config.formats {
        let output = crate::pipeline::derive_output_path(input, format, pipeline_config);
        println!("  Output:    {}", style(output.display()).cyan());
    }
    let names: Vec<String> = pipeline_config
        .formats
        .iter()
        .map(|f| f.extension().to_uppercase())
        .collect();
    println!("  Format:    {}", names.join(" + "));
    println!();
}
