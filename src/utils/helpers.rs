/// Formatting helpers shared by the panels and the one-shot CLI output

use crate::utils::constants::GIB;

/// Whole gigabytes, floored. The backend reports raw byte counts; the
/// header panels show integer GB exactly as the floor of `bytes / 2^30`.
pub fn gb_floor(bytes: u64) -> u64 {
    bytes / GIB
}

/// Floored whole-GB string, e.g. `"16 GB"`.
pub fn format_gb_floor(bytes: u64) -> String {
    format!("{} GB", gb_floor(bytes))
}

/// Two-decimal GB string used by the storage panel, e.g. `"237.45 GB"`.
pub fn format_gb(bytes: u64) -> String {
    format!("{:.2} GB", bytes as f64 / GIB as f64)
}

/// Percentages are always shown with one decimal place.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Decompose an uptime in seconds into whole hours and remaining minutes.
/// Leftover seconds are dropped, not rounded up.
pub fn uptime_hours_minutes(seconds: u64) -> (u64, u64) {
    (seconds / 3600, (seconds % 3600) / 60)
}

/// Container uptime as shown next to running containers, e.g. `"2h 5m"`.
pub fn format_uptime(seconds: u64) -> String {
    let (hours, minutes) = uptime_hours_minutes(seconds);
    format!("{}h {}m", hours, minutes)
}

/// Truncate string with ellipsis
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else {
        format!("{}...", &s[..max_len.saturating_sub(3)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gb_floor() {
        assert_eq!(gb_floor(0), 0);
        assert_eq!(gb_floor(GIB - 1), 0);
        assert_eq!(gb_floor(GIB), 1);
        assert_eq!(gb_floor(34_359_738_368), 32);
    }

    #[test]
    fn test_format_gb_floor() {
        assert_eq!(format_gb_floor(17_179_869_184), "16 GB");
        // just under 16 GB still floors down
        assert_eq!(format_gb_floor(17_179_869_183), "15 GB");
    }

    #[test]
    fn test_format_gb() {
        assert_eq!(format_gb(GIB), "1.00 GB");
        assert_eq!(format_gb(GIB + GIB / 2), "1.50 GB");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.0), "0.0%");
        assert_eq!(format_percent(72.25), "72.2%");
    }

    #[test]
    fn test_uptime_hours_minutes() {
        assert_eq!(uptime_hours_minutes(0), (0, 0));
        assert_eq!(uptime_hours_minutes(59), (0, 0));
        assert_eq!(uptime_hours_minutes(60), (0, 1));
        assert_eq!(uptime_hours_minutes(3600), (1, 0));
        assert_eq!(uptime_hours_minutes(7500), (2, 5));
        // minutes never reach 60
        let (_, m) = uptime_hours_minutes(3599);
        assert!(m < 60);
    }

    #[test]
    fn test_format_uptime() {
        assert_eq!(format_uptime(7500), "2h 5m");
        assert_eq!(format_uptime(45), "0h 0m");
    }

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a-much-longer-name", 10), "a-much-...");
    }
}
