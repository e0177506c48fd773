//! Duration and count formatting for cards

const SUFFIXES: [&str; 5] = ["", "K", "M", "B", "T"];

/// `M:SS` under an hour, `H:MM:SS` otherwise
pub fn format_duration(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// Compact count: at most two decimals, trailing zeros dropped
pub fn abbreviate_number(value: u64) -> String {
    if value < 1000 {
        return value.to_string();
    }

    // divide down until the value fits under 1000
    let mut tier = 0;
    let mut scaled = value as f64;
    while scaled >= 1000.0 && tier < SUFFIXES.len() - 1 {
        scaled /= 1000.0;
        tier += 1;
    }

    let mut rounded = (scaled * 100.0).round() / 100.0;
    // 999_999 rounds to 1000K; carry into the next suffix
    if rounded >= 1000.0 && tier < SUFFIXES.len() - 1 {
        rounded /= 1000.0;
        tier += 1;
    }

    // "1.50" -> "1.5", "2.00" -> "2"
    let text = format!("{rounded:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{text}{}", SUFFIXES[tier])
}
