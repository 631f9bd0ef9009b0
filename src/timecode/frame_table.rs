// 60 FPS frame index to millisecond mapping
//
// These values come from the platform's own editor output. They are not evenly
// spaced (15 -> 254 -> 270 is a 16ms step, 19 -> 317 -> 350 is 33ms) and must
// not be replaced with a computed `frame * 1000 / 60`.

/// Millisecond string for each frame index 0-59.
pub const FRAME_MILLIS: [&str; 60] = [
    "016", "032", "048", "064", "080", "096", "111", "127", "143", "159", // 0-9
    "175", "191", "206", "222", "238", "254", "270", "286", "301", "317", // 10-19
    "350", "366", "381", "397", "413", "429", "445", "461", "476", "492", // 20-29
    "508", "524", "540", "556", "571", "587", "603", "619", "635", "651", // 30-39
    "683", "699", "715", "731", "746", "762", "778", "794", "810", "826", // 40-49
    "841", "857", "873", "889", "905", "921", "936", "952", "968", "984", // 50-59
];

/// Returned for any frame index outside 0-59.
pub const MISSING_FRAME_MILLIS: &str = "000";

/// Look up the millisecond string for a frame index.
pub fn frame_to_millis(frame: u32) -> &'static str {
    FRAME_MILLIS
        .get(frame as usize)
        .copied()
        .unwrap_or(MISSING_FRAME_MILLIS)
}
