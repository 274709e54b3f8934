//! period.rs: date → `YYYY-MM` grouping key for row sources.
//!
//! The aggregator never parses dates; row sources call `year_month` and hand
//! over the result (or `"Unknown"`).

use chrono::NaiveDate;

pub const UNKNOWN_PERIOD: &str = "Unknown";

/// Accepted input formats, tried in order. Day-first wins for ambiguous
/// slash dates such as `03/04/2024`.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y/%m/%d", "%d-%m-%Y"];

pub fn year_month(raw: &str) -> String {
    let s = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(|d| d.format("%Y-%m").to_string())
        .unwrap_or_else(|| UNKNOWN_PERIOD.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_known_formats() {
        assert_eq!(year_month("2024-03-17"), "2024-03");
        assert_eq!(year_month("17/03/2024"), "2024-03");
        assert_eq!(year_month("03/17/2024"), "2024-03");
        assert_eq!(year_month("2024/03/17"), "2024-03");
        assert_eq!(year_month("17-03-2024"), "2024-03");
    }

    #[test]
    fn ambiguous_slash_date_is_day_first() {
        assert_eq!(year_month("03/04/2024"), "2024-04");
    }

    #[test]
    fn garbage_is_unknown() {
        assert_eq!(year_month(""), "Unknown");
        assert_eq!(year_month("last tuesday"), "Unknown");
        assert_eq!(year_month("2024-13-01"), "Unknown");
    }
}
