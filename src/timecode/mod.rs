pub mod frame_table;

pub use frame_table::{frame_to_millis, FRAME_MILLIS, MISSING_FRAME_MILLIS};

use crate::error::{Result, SubconvError};
use std::fmt;
use std::str::FromStr;

/// Frames per second of the source timecodes.
pub const FRAMES_PER_SECOND: u32 = 60;

/// A timecode as written by the editor: `HH:MM:SS:FF`.
///
/// The frame value may exceed 59 when it was typed by hand; [`normalize`]
/// carries the overflow into the larger units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RawTimecode {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub frame: u32,
}

impl RawTimecode {
    pub fn new(hour: u32, minute: u32, second: u32, frame: u32) -> Self {
        Self {
            hour,
            minute,
            second,
            frame,
        }
    }

    /// Build a timecode from signed components, rejecting negative values.
    pub fn from_signed(hour: i64, minute: i64, second: i64, frame: i64) -> Result<Self> {
        let component = |name: &str, value: i64| {
            u32::try_from(value).map_err(|_| {
                SubconvError::InvalidTimecode(format!(
                    "{} must be a non-negative 32-bit value, got {}",
                    name, value
                ))
            })
        };

        Ok(Self {
            hour: component("hour", hour)?,
            minute: component("minute", minute)?,
            second: component("second", second)?,
            frame: component("frame", frame)?,
        })
    }

    pub fn normalize(&self) -> NormalizedTimecode {
        normalize(*self)
    }
}

impl fmt::Display for RawTimecode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}:{:02}",
            self.hour, self.minute, self.second, self.frame
        )
    }
}

impl FromStr for RawTimecode {
    type Err = SubconvError;

    /// Parse `H:MM:SS:FF` or `HH:MM:SS:FF`.
    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let malformed = || SubconvError::MalformedTimecodeDigits(s.to_string());

        let groups: Vec<&str> = s.trim().split(':').collect();
        if groups.len() != 4 {
            return Err(malformed());
        }

        let mut values = [0u32; 4];
        for (i, group) in groups.iter().enumerate() {
            let width_ok = if i == 0 {
                (1..=2).contains(&group.len())
            } else {
                group.len() == 2
            };
            if !width_ok || !group.bytes().all(|b| b.is_ascii_digit()) {
                return Err(malformed());
            }
            values[i] = group.parse().map_err(|_| malformed())?;
        }

        Ok(Self::new(values[0], values[1], values[2], values[3]))
    }
}

/// A timecode with the frame resolved to the platform's millisecond value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NormalizedTimecode {
    pub hour: u64,
    pub minute: u32,
    pub second: u32,
    pub millis: &'static str,
}

impl NormalizedTimecode {
    /// `HH:MM:SS,mmm`
    pub fn to_srt(&self) -> String {
        format!(
            "{:02}:{:02}:{:02},{}",
            self.hour, self.minute, self.second, self.millis
        )
    }

    /// `H:MM:SS.mmm`
    pub fn to_sbv(&self) -> String {
        format!(
            "{}:{:02}:{:02}.{}",
            self.hour, self.minute, self.second, self.millis
        )
    }
}

/// Carry frame, second and minute overflow upwards and look up the
/// millisecond value of the remaining frame. Hours are never wrapped.
pub fn normalize(raw: RawTimecode) -> NormalizedTimecode {
    let frame = raw.frame % FRAMES_PER_SECOND;
    let seconds = u64::from(raw.second) + u64::from(raw.frame / FRAMES_PER_SECOND);

    let minutes = u64::from(raw.minute) + seconds / 60;
    let second = (seconds % 60) as u32;

    let hour = u64::from(raw.hour) + minutes / 60;
    let minute = (minutes % 60) as u32;

    NormalizedTimecode {
        hour,
        minute,
        second,
        millis: frame_to_millis(frame),
    }
}
