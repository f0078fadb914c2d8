//! Playhead formatting for the transport bar

/// Shown wherever a time cannot be computed
pub const ZERO_TIME: &str = "0:00";

/// Format seconds as `m:ss`, or `h:mm:ss` past the hour
///
/// Unknown (NaN, infinite or negative) inputs render as `0:00`.
pub fn format_time(seconds: f64) -> String {
    if !seconds.is_finite() || seconds < 0.0 {
        return ZERO_TIME.to_string();
    }

    let total = seconds.floor() as u64;
    let hours = total / 3600;
    let minutes = (total % 3600) / 60;
    let secs = total % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, secs)
    } else {
        format!("{}:{:02}", minutes, secs)
    }
}
