pub mod config;
pub mod error;
pub mod interactive;
pub mod pipeline;
pub mod subtitle;
pub mod timecode;

pub use config::{Config, OutputFormat};
pub use error::{Result, SubconvError};
pub use pipeline::{convert_file, print_summary, PipelineConfig, PipelineResult, PipelineStats};
pub use subtitle::{convert, convert_both, parse_records, SubtitleRecord};
pub use timecode::{NormalizedTimecode, RawTimecode};
