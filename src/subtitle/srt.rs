// SRT subtitle format
use super::{SubtitleFormatter, SubtitleRecord};

pub struct SrtFormatter;

impl SubtitleFormatter for SrtFormatter {
    fn format(&self, records: &[SubtitleRecord]) -> String {
        records
            .iter()
            .enumerate()
            .map(|(i, record)| {
                format!(
                    "{}\n{} --> {}\n{}\n\n",
                    i + 1,
                    record.normalized_start().to_srt(),
                    record.normalized_end().to_srt(),
                    record.text
                )
            })
            .collect()
    }

    fn extension(&self) -> &'static str {
        "srt"
    }
}
