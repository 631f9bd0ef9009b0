// Timecode range block parser
use super::SubtitleRecord;
use crate::timecode::RawTimecode;
use regex::{Captures, Regex};
use std::str::Lines;
use std::sync::LazyLock;

/// `H:MM:SS:FF - H:MM:SS:FF` at the start of a trimmed line. Anything after the
/// end timecode (past a word boundary) is ignored. Digits are ASCII only.
static DELIMITER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]{1,2}):([0-9]{2}):([0-9]{2}):([0-9]{2})\s*-\s*([0-9]{1,2}):([0-9]{2}):([0-9]{2}):([0-9]{2})\b",
    )
    .expect("Invalid regex")
});

/// Parse a delimiter line into its start and end timecodes.
pub fn parse_delimiter(line: &str) -> Option<(RawTimecode, RawTimecode)> {
    let caps = DELIMITER_RE.captures(line.trim())?;
    Some((timecode_at(&caps, 1)?, timecode_at(&caps, 5)?))
}

fn timecode_at(caps: &Captures<'_>, first: usize) -> Option<RawTimecode> {
    let group = |i: usize| caps.get(first + i)?.as_str().parse::<u32>().ok();
    Some(RawTimecode::new(group(0)?, group(1)?, group(2)?, group(3)?))
}

/// Lazily yields subtitle records in input order.
///
/// Each delimiter line owns every following line up to the next delimiter or
/// end of input. Blank lines are skipped and do not end a block. A delimiter
/// with no text after it yields nothing.
pub struct Blocks<'a> {
    lines: Lines<'a>,
    /// Delimiter that ended the previous block.
    pending: Option<(RawTimecode, RawTimecode)>,
    delimiters: usize,
}

impl<'a> Blocks<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines(),
            pending: None,
            delimiters: 0,
        }
    }

    /// Delimiter lines whose block has been consumed so far, including ones
    /// without text.
    pub fn delimiters_seen(&self) -> usize {
        self.delimiters
    }
}

impl Iterator for Blocks<'_> {
    type Item = SubtitleRecord;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (start, end) = match self.pending.take() {
                Some(range) => range,
                None => self.lines.by_ref().find_map(parse_delimiter)?,
            };
            self.delimiters += 1;

            let mut body: Vec<&str> = Vec::new();
            for line in self.lines.by_ref() {
                if let Some(range) = parse_delimiter(line) {
                    self.pending = Some(range);
                    break;
                }
                let text = line.trim();
                if !text.is_empty() {
                    body.push(text);
                }
            }

            if !body.is_empty() {
                return Some(SubtitleRecord {
                    start,
                    end,
                    text: body.join("\n"),
                });
            }
        }
    }
}

/// Records parsed from one input together with the delimiter count.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParseReport {
    pub records: Vec<SubtitleRecord>,
    pub delimiters: usize,
}

impl ParseReport {
    /// Delimiter lines that were dropped because no text followed them.
    pub fn discarded(&self) -> usize {
        self.delimiters - self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub fn parse_records(text: &str) -> Vec<SubtitleRecord> {
    Blocks::new(text).collect()
}

pub fn parse_report(text: &str) -> ParseReport {
    let mut blocks = Blocks::new(text);
    let records: Vec<SubtitleRecord> = blocks.by_ref().collect();
    ParseReport {
        records,
        delimiters: blocks.delimiters_seen(),
    }
}
