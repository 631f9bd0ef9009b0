// SubViewer (SBV) subtitle format
use super::{SubtitleFormatter, SubtitleRecord};

pub struct SbvFormatter;

impl SubtitleFormatter for SbvFormatter {
    fn format(&self, records: &[SubtitleRecord]) -> String {
        let mut output = String::new();

        for record in records {
            output.push_str(&format!(
                "{},{}\n{}\n\n",
                record.normalized_start().to_sbv(),
                record.normalized_end().to_sbv(),
                record.text
            ));
        }

        output
    }

    fn extension(&self) -> &'static str {
        "sbv"
    }
}
