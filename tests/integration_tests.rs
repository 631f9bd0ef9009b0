//! Integration tests for subconv
//!
//! These exercise the public conversion API end to end and the file pipeline
//! against temporary directories.

use subconv::config::{Config, OutputFormat};
use subconv::pipeline::{convert_file, PipelineConfig};
use subconv::subtitle::{
    convert, convert_both, create_formatter, parse_records, parse_report, sbv::SbvFormatter,
    srt::SrtFormatter, SubtitleFormatter, SubtitleRecord,
};
use subconv::timecode::{frame_to_millis, normalize, RawTimecode, FRAME_MILLIS};

use std::fs;

const SCRIPT: &str = "\
Episode 12 script (draft)

00:00:00:00 - 00:00:02:30
Welcome back!

00:00:02:30 - 00:00:05:59
Today we look at
frame timing

in detail.
00:00:06:00 - 00:00:07:00

00:59:59:60 - 1:00:01:20
One hour in.
00:00:10:00 - 00:00:11:00
";

// ============================================================================
// Timecode Tests
// ============================================================================

mod timecode_tests {
    use super::*;

    #[test]
    fn test_frame_table_reference_points() {
        assert_eq!(FRAME_MILLIS.len(), 60);
        assert_eq!(frame_to_millis(0), "016");
        assert_eq!(frame_to_millis(15), "254");
        assert_eq!(frame_to_millis(16), "270");
        assert_eq!(frame_to_millis(19), "317");
        assert_eq!(frame_to_millis(20), "350");
        assert_eq!(frame_to_millis(59), "984");
    }

    #[test]
    fn test_carry_into_hour() {
        let n = normalize(RawTimecode::new(0, 59, 59, 60));
        assert_eq!((n.hour, n.minute, n.second, n.millis), (1, 0, 0, "016"));
    }

    #[test]
    fn test_normalized_values_stay_in_table() {
        for frame in 0..1000 {
            let n = normalize(RawTimecode::new(0, 0, 0, frame));
            assert_ne!(n.millis, "000", "frame {} fell outside the table", frame);
        }
    }
}

// ============================================================================
// Parser Tests
// ============================================================================

mod parser_tests {
    use super::*;

    #[test]
    fn test_script_records() {
        let records = parse_records(SCRIPT);
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].text, "Welcome back!");
        assert_eq!(records[1].text, "Today we look at\nframe timing\nin detail.");
        assert_eq!(records[2].start, RawTimecode::new(0, 59, 59, 60));
        assert_eq!(records[2].end, RawTimecode::new(1, 0, 1, 20));
        assert_eq!(records[2].text, "One hour in.");
    }

    #[test]
    fn test_script_report_counts_discarded() {
        let report = parse_report(SCRIPT);
        assert_eq!(report.delimiters, 5);
        assert_eq!(report.records.len(), 3);
        assert_eq!(report.discarded(), 2);
    }

    #[test]
    fn test_trailing_delimiter_yields_one_fewer_record() {
        let input = "00:00:00:00 - 00:00:01:00\nA\n00:00:01:00 - 00:00:02:00\n";
        let report = parse_report(input);
        assert_eq!(report.records.len(), report.delimiters - 1);
    }

    #[test]
    fn test_no_delimiters() {
        assert!(parse_records("plain text\nwith no timecodes\n").is_empty());
    }
}

// ============================================================================
// Conversion Tests
// ============================================================================

mod conversion_tests {
    use super::*;

    #[test]
    fn test_hello_srt() {
        assert_eq!(
            convert("00:00:00:00 - 00:00:01:00\nHello\n", OutputFormat::Srt),
            "1\n00:00:00,016 --> 00:00:01,016\nHello\n\n"
        );
    }

    #[test]
    fn test_script_srt() {
        let expected = "\
1
00:00:00,016 --> 00:00:02,508
Welcome back!

2
00:00:02,508 --> 00:00:05,984
Today we look at
frame timing
in detail.

3
01:00:00,016 --> 01:00:01,350
One hour in.

";
        assert_eq!(convert(SCRIPT, OutputFormat::Srt), expected);
    }

    #[test]
    fn test_script_sbv() {
        let expected = "\
0:00:00.016,0:00:02.508
Welcome back!

0:00:02.508,0:00:05.984
Today we look at
frame timing
in detail.

1:00:00.016,1:00:01.350
One hour in.

";
        assert_eq!(convert(SCRIPT, OutputFormat::Sbv), expected);
    }

    #[test]
    fn test_convert_both_equals_individual() {
        let (srt, sbv) = convert_both(SCRIPT);
        assert_eq!(srt, convert(SCRIPT, OutputFormat::Srt));
        assert_eq!(sbv, convert(SCRIPT, OutputFormat::Sbv));
    }

    #[test]
    fn test_emission_is_idempotent() {
        let records = parse_records(SCRIPT);
        for format in OutputFormat::ALL {
            let formatter = create_formatter(format);
            assert_eq!(formatter.format(&records), formatter.format(&records));
        }
    }

    #[test]
    fn test_formatters_match_factory() {
        let records: Vec<SubtitleRecord> = parse_records(SCRIPT);
        assert_eq!(
            SrtFormatter.format(&records),
            create_formatter(OutputFormat::Srt).format(&records)
        );
        assert_eq!(
            SbvFormatter.format(&records),
            create_formatter(OutputFormat::Sbv).format(&records)
        );
        assert_eq!(SbvFormatter.extension(), "sbv");
    }

    #[test]
    fn test_empty_input_gives_empty_output() {
        assert_eq!(convert("", OutputFormat::Srt), "");
        assert_eq!(convert("00:00:00:00 - 00:00:01:00\n\n", OutputFormat::Sbv), "");
    }
}

// ============================================================================
// Pipeline Tests
// ============================================================================

mod pipeline_tests {
    use super::*;

    #[test]
    fn test_convert_file_writes_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("episode.txt");
        fs::write(&input, SCRIPT).unwrap();

        let config = PipelineConfig {
            formats: OutputFormat::ALL.to_vec(),
            ..PipelineConfig::default()
        };
        let result = convert_file(&input, &config).unwrap();

        assert_eq!(result.stats.records, 3);
        assert_eq!(result.stats.discarded, 2);
        assert_eq!(result.outputs.len(), 2);

        let srt = fs::read_to_string(dir.path().join("episode.srt")).unwrap();
        let sbv = fs::read_to_string(dir.path().join("episode.sbv")).unwrap();
        assert_eq!(srt, convert(SCRIPT, OutputFormat::Srt));
        assert_eq!(sbv, convert(SCRIPT, OutputFormat::Sbv));
    }

    #[test]
    fn test_convert_file_into_output_dir() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("episode.txt");
        fs::write(&input, SCRIPT).unwrap();
        let out_dir = dir.path().join("subs");

        let config = PipelineConfig {
            output_dir: Some(out_dir.clone()),
            ..PipelineConfig::default()
        };
        let result = convert_file(&input, &config).unwrap();

        assert_eq!(result.outputs, vec![(OutputFormat::Srt, out_dir.join("episode.srt"))]);
        assert!(out_dir.join("episode.srt").exists());
    }

    #[test]
    fn test_no_records_leaves_existing_output_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("notes.txt");
        fs::write(&input, "nothing to see here\n").unwrap();
        let existing = dir.path().join("notes.srt");
        fs::write(&existing, "previous output").unwrap();

        let result = convert_file(&input, &PipelineConfig::default()).unwrap();

        assert!(result.is_empty());
        assert!(result.outputs.is_empty());
        assert_eq!(fs::read_to_string(&existing).unwrap(), "previous output");
    }

    #[test]
    fn test_input_with_output_extension_is_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("episode.srt");
        let source = "00:00:00:00 - 00:00:01:00\nHello\n";
        fs::write(&input, source).unwrap();

        let result = convert_file(&input, &PipelineConfig::default());

        assert!(result.is_err());
        assert_eq!(fs::read_to_string(&input).unwrap(), source);
    }

    #[test]
    fn test_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = convert_file(&dir.path().join("missing.txt"), &PipelineConfig::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_unicode_round_trips_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ko.txt");
        fs::write(&input, "00:00:01:00 - 00:00:02:00\n유튜브 자막 변환기\n").unwrap();

        convert_file(&input, &PipelineConfig::default()).unwrap();

        let srt = fs::read_to_string(dir.path().join("ko.srt")).unwrap();
        assert!(srt.contains("유튜브 자막 변환기"));
    }

    #[test]
    fn test_pipeline_config_from_default_config() {
        let config = PipelineConfig::from_config(&Config::default());
        assert_eq!(config.formats, vec![OutputFormat::Srt]);
    }
}
