pub mod parser;
pub mod sbv;
pub mod srt;

pub use parser::{parse_records, parse_report, Blocks, ParseReport};

use crate::config::OutputFormat;
use crate::timecode::{NormalizedTimecode, RawTimecode};

/// One timecode range and the text shown during it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleRecord {
    pub start: RawTimecode,
    pub end: RawTimecode,
    /// Non-empty lines joined with `\n`.
    pub text: String,
}

impl SubtitleRecord {
    pub fn normalized_start(&self) -> NormalizedTimecode {
        self.start.normalize()
    }

    pub fn normalized_end(&self) -> NormalizedTimecode {
        self.end.normalize()
    }
}

pub trait SubtitleFormatter {
    fn format(&self, records: &[SubtitleRecord]) -> String;
    fn extension(&self) -> &'static str;
}

pub fn create_formatter(format: OutputFormat) -> Box<dyn SubtitleFormatter> {
    match format {
        OutputFormat::Srt => Box::new(srt::SrtFormatter),
        OutputFormat::Sbv => Box::new(sbv::SbvFormatter),
    }
}

/// Parse `raw_text` and render it in `format`.
///
/// Returns an empty string when no subtitle block with text was found.
pub fn convert(raw_text: &str, format: OutputFormat) -> String {
    let records = parse_records(raw_text);
    create_formatter(format).format(&records)
}

/// Parse once and render both SRT and SBV.
pub fn convert_both(raw_text: &str) -> (String, String) {
    let records = parse_records(raw_text);
    (
        srt::SrtFormatter.format(&records),
        sbv::SbvFormatter.format(&records),
    )
}
