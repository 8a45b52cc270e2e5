//! Score-to-display lookups. The color and label tables use different
//! boundaries: green starts at 70 together with "Ready for Dev", while
//! "Excellent" at 80 has no color tier of its own.

/// Traffic-light bucket for a total score.
pub fn score_color(total: u32) -> &'static str {
    match total {
        70.. => "green",
        50..=69 => "yellow",
        30..=49 => "orange",
        _ => "red",
    }
}

/// Readiness label for a total score.
pub fn score_label(total: u32) -> &'static str {
    match total {
        80.. => "Excellent",
        70..=79 => "Ready for Dev",
        50..=69 => "Needs Work",
        30..=49 => "Draft Quality",
        _ => "Incomplete",
    }
}
